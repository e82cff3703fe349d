//! Resource handles
//!
//! A [`Resource`] pairs one arena slot (the resource object) with the document's
//! shared [`IncludedIndex`]. Relationships are stored as identifiers and only
//! resolved when traversed, so cyclic links never need circular ownership.

use super::document::{ResourceIdentifier, ResourceObject};
use super::factory::AnyResource;
use super::index::IncludedIndex;
use crate::error::JsonApiError;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Timestamp format used by the agenda template service
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generic resource, also the fallback variant for unrecognized types
#[derive(Clone)]
pub struct Resource {
    object: Arc<ResourceObject>,
    index: Arc<IncludedIndex>,
}

impl Resource {
    pub(crate) fn bound(object: Arc<ResourceObject>, index: Arc<IncludedIndex>) -> Self {
        Self { object, index }
    }

    pub fn identifier(&self) -> &ResourceIdentifier {
        &self.object.identifier
    }

    pub fn resource_type(&self) -> &str {
        &self.object.identifier.resource_type
    }

    /// The `id` member exactly as delivered
    pub fn raw_id(&self) -> &str {
        &self.object.identifier.id
    }

    /// The id as an integer
    pub fn id(&self) -> Result<i64, JsonApiError> {
        let raw = self.raw_id();
        raw.parse::<i64>().map_err(|_| JsonApiError::TypeConversion {
            id: raw.to_string(),
        })
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.object.attributes
    }

    /// Look up an attribute. Underscores are translated to hyphens, so
    /// `short_description` and `short-description` address the same key.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        if name.contains('_') {
            self.object.attributes.get(&name.replace('_', "-"))
        } else {
            self.object.attributes.get(name)
        }
    }

    /// String attribute, `None` when missing or not a string
    pub fn str_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Value::as_str)
    }

    /// Integer attribute, accepting numbers and numeric strings
    pub fn int_attribute(&self, name: &str) -> Option<i64> {
        match self.attribute(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Parse a `YYYY-MM-DD HH:MM:SS` attribute. Empty strings give `None`.
    pub fn timestamp(&self, name: &str) -> Option<NaiveDateTime> {
        let raw = self.str_attribute(name)?;
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
    }

    /// Relationship names, sorted
    pub fn relationship_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.object.relationships.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Raw linkage of a relationship, empty if the relationship is absent
    pub fn relationship_identifiers(&self, name: &str) -> &[ResourceIdentifier] {
        self.object
            .relationships
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a relationship against the included index, in document order.
    ///
    /// Identifiers with no matching `included` entry are dropped from the
    /// result, so a shorter sequence than the raw linkage is not an error.
    pub fn relationship(&self, name: &str) -> Vec<AnyResource> {
        let identifiers = self.relationship_identifiers(name);
        let mut resolved = Vec::with_capacity(identifiers.len());

        for identifier in identifiers {
            match self.index.resolve(identifier) {
                Some(resource) => resolved.push(resource),
                None => tracing::trace!(
                    "{} -> {}: {} not included, skipping",
                    self.identifier(),
                    name,
                    identifier
                ),
            }
        }

        resolved
    }

    /// Whether both handles point at the same arena slot
    pub fn same_object(a: &Resource, b: &Resource) -> bool {
        Arc::ptr_eq(&a.object, &b.object)
    }

    /// Whether both handles resolve through the same included index
    pub fn shares_index_with(&self, other: &Resource) -> bool {
        Arc::ptr_eq(&self.index, &other.index)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("identifier", &self.object.identifier)
            .field("attributes", &self.object.attributes)
            .finish_non_exhaustive()
    }
}

/// Capabilities shared by every resource variant
pub trait RemoteResource {
    fn resource(&self) -> &Resource;

    fn identifier(&self) -> &ResourceIdentifier {
        self.resource().identifier()
    }

    fn id(&self) -> Result<i64, JsonApiError> {
        self.resource().id()
    }

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.resource().attribute(name)
    }

    fn relationship(&self, name: &str) -> Vec<AnyResource> {
        self.resource().relationship(name)
    }

    fn created_at(&self) -> Option<NaiveDateTime> {
        self.resource().timestamp("created-at")
    }

    fn updated_at(&self) -> Option<NaiveDateTime> {
        self.resource().timestamp("updated-at")
    }
}

impl RemoteResource for Resource {
    fn resource(&self) -> &Resource {
        self
    }
}
