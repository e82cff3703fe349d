//! Raw JSON:API resource objects
//!
//! Decodes the `type`/`id`/`attributes`/`relationships` members of a resource
//! object out of a `serde_json::Value`. Everything here is immutable once built.

use crate::error::JsonApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// A `(type, id)` pair, unique across one document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Read `type` and `id` from a resource object or a resource identifier object
    pub(crate) fn from_value(value: &Value) -> Result<Self, JsonApiError> {
        let Some(object) = value.as_object() else {
            return Err(JsonApiError::MalformedDocument(format!(
                "expected a resource identifier object, found {}",
                value_kind(value)
            )));
        };

        Ok(Self {
            resource_type: member_string(object, "type")?,
            id: member_string(object, "id")?,
        })
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.id)
    }
}

/// One resource object as delivered by the service
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceObject {
    pub identifier: ResourceIdentifier,
    /// Attribute keys are kept hyphenated, exactly as received
    pub attributes: Map<String, Value>,
    pub relationships: HashMap<String, Vec<ResourceIdentifier>>,
}

impl ResourceObject {
    pub(crate) fn from_value(value: &Value) -> Result<Self, JsonApiError> {
        let Some(object) = value.as_object() else {
            return Err(JsonApiError::MalformedDocument(format!(
                "expected a resource object, found {}",
                value_kind(value)
            )));
        };

        let identifier = ResourceIdentifier::from_value(value)?;

        let attributes = match object.get("attributes") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                return Err(JsonApiError::MalformedDocument(format!(
                    "attributes of {} must be an object, found {}",
                    identifier,
                    value_kind(other)
                )))
            }
        };

        let relationships = match object.get("relationships") {
            None | Some(Value::Null) => HashMap::new(),
            Some(Value::Object(map)) => {
                let mut relationships = HashMap::with_capacity(map.len());
                for (name, relationship) in map {
                    relationships.insert(name.clone(), relationship_linkage(relationship)?);
                }
                relationships
            }
            Some(other) => {
                return Err(JsonApiError::MalformedDocument(format!(
                    "relationships of {} must be an object, found {}",
                    identifier,
                    value_kind(other)
                )))
            }
        };

        Ok(Self {
            identifier,
            attributes,
            relationships,
        })
    }
}

/// Normalize a relationship's `data` member to an ordered identifier list.
/// To-many arrays, to-one objects and `null` are all accepted; a relationship
/// carrying only `links`/`meta` has no linkage.
fn relationship_linkage(relationship: &Value) -> Result<Vec<ResourceIdentifier>, JsonApiError> {
    match relationship.get("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(ResourceIdentifier::from_value).collect(),
        Some(single @ Value::Object(_)) => Ok(vec![ResourceIdentifier::from_value(single)?]),
        Some(other) => Err(JsonApiError::MalformedDocument(format!(
            "relationship data must be an array, object or null, found {}",
            value_kind(other)
        ))),
    }
}

/// Read a `type`/`id` member. Integer ids are accepted and stringified.
fn member_string(object: &Map<String, Value>, key: &str) -> Result<String, JsonApiError> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        Some(other) => Err(JsonApiError::MalformedDocument(format!(
            "member {:?} must be a string, found {}",
            key,
            value_kind(other)
        ))),
        None => Err(JsonApiError::MalformedDocument(format!(
            "resource is missing the {:?} member",
            key
        ))),
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
