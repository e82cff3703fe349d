//! Document Parser
//!
//! Entry point for turning a JSON:API response body into typed resources.

use super::document::{value_kind, ResourceObject};
use super::factory::{self, AnyResource};
use super::index::IncludedIndex;
use super::resource::Resource;
use crate::error::JsonApiError;
use crate::remote::{AgendaTemplate, SuggestedGoal};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// A parsed JSON:API document.
///
/// `data` and every `included` entry are decoded up front, so a malformed
/// document fails in [`Parser::new`] and never yields partial results. The
/// included index is built on the first accessor call and then reused.
pub struct Parser {
    primary: Arc<ResourceObject>,
    included: Vec<Arc<ResourceObject>>,
    index: OnceLock<Arc<IncludedIndex>>,
}

impl Parser {
    /// Parse a raw response body
    pub fn new(json: &str) -> Result<Self, JsonApiError> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| JsonApiError::MalformedDocument(format!("invalid JSON: {}", e)))?;
        Self::from_value(&document)
    }

    /// Build from an already decoded JSON value
    pub fn from_value(document: &Value) -> Result<Self, JsonApiError> {
        let Some(members) = document.as_object() else {
            return Err(JsonApiError::MalformedDocument(format!(
                "top level must be an object, found {}",
                value_kind(document)
            )));
        };

        let primary = match members.get("data") {
            Some(data @ Value::Object(_)) => ResourceObject::from_value(data)?,
            Some(other) => {
                return Err(JsonApiError::MalformedDocument(format!(
                    "primary data must be a single resource object, found {}",
                    value_kind(other)
                )))
            }
            None => {
                return Err(JsonApiError::MalformedDocument(
                    "document has no data member".to_string(),
                ))
            }
        };

        let included = match members.get("included") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| ResourceObject::from_value(entry).map(Arc::new))
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(JsonApiError::MalformedDocument(format!(
                    "included must be an array, found {}",
                    value_kind(other)
                )))
            }
        };

        tracing::debug!(
            "Parsed document for {} with {} included resources",
            primary.identifier,
            included.len()
        );

        Ok(Self {
            primary: Arc::new(primary),
            included,
            index: OnceLock::new(),
        })
    }

    /// The primary resource as an agenda template
    pub fn agenda_template(&self) -> AgendaTemplate {
        AgendaTemplate::from(self.primary_resource())
    }

    /// The primary resource as a suggested goal
    pub fn suggested_goal(&self) -> SuggestedGoal {
        SuggestedGoal::from(self.primary_resource())
    }

    /// The primary resource as whatever variant its `type` maps to
    pub fn document_resource(&self) -> AnyResource {
        factory::make_resource(self.primary_resource())
    }

    /// Number of distinct resources in the included index
    pub fn included_len(&self) -> usize {
        self.included_index().len()
    }

    fn primary_resource(&self) -> Resource {
        Resource::bound(Arc::clone(&self.primary), self.included_index())
    }

    fn included_index(&self) -> Arc<IncludedIndex> {
        let index = self
            .index
            .get_or_init(|| Arc::new(IncludedIndex::build(&self.included)));
        Arc::clone(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonapi::RemoteResource;
    use serde_json::json;

    #[test]
    fn test_not_json_is_malformed() {
        let err = Parser::new("not json").err().unwrap();
        assert!(matches!(err, JsonApiError::MalformedDocument(_)));
    }

    #[test]
    fn test_missing_data_is_malformed() {
        let err = Parser::new(r#"{"included": []}"#).err().unwrap();
        assert!(err.to_string().contains("no data member"));
    }

    #[test]
    fn test_collection_data_is_malformed() {
        let err = Parser::new(r#"{"data": []}"#).err().unwrap();
        assert!(matches!(err, JsonApiError::MalformedDocument(_)));
    }

    #[test]
    fn test_bad_included_entry_fails_the_whole_parse() {
        let err = Parser::from_value(&json!({
            "data": {"type": "agenda-templates", "id": "1"},
            "included": [{"type": "agenda-items", "id": "1"}, {"id": "2"}]
        }))
        .err()
        .unwrap();
        assert!(matches!(err, JsonApiError::MalformedDocument(_)));
    }

    #[test]
    fn test_index_is_built_once() {
        let parser = Parser::from_value(&json!({
            "data": {"type": "agenda-templates", "id": "1",
                "relationships": {"agenda-items": {"data": [{"type": "agenda-items", "id": "1"}]}}},
            "included": [{"type": "agenda-items", "id": "1"}]
        }))
        .unwrap();

        assert!(parser.index.get().is_none());

        let template = parser.agenda_template();
        let goal_view = parser.suggested_goal();
        assert!(template.resource().shares_index_with(goal_view.resource()));

        let first = template.relationship("agenda-items");
        let second = goal_view.relationship("agenda-items");
        assert!(Resource::same_object(first[0].resource(), second[0].resource()));
        assert_eq!(parser.included_len(), 1);
    }

    #[test]
    fn test_primary_is_not_part_of_the_index() {
        let parser = Parser::from_value(&json!({
            "data": {"type": "agenda-templates", "id": "1",
                "relationships": {"parent": {"data": {"type": "agenda-templates", "id": "1"}}}}
        }))
        .unwrap();

        assert!(parser.agenda_template().relationship("parent").is_empty());
        assert_eq!(parser.included_len(), 0);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_parser_and_handles_are_thread_safe() {
        assert_send_sync::<Parser>();
        assert_send_sync::<AnyResource>();
        assert_send_sync::<Resource>();

        let parser = Parser::from_value(&json!({
            "data": {"type": "agenda-templates", "id": "1",
                "relationships": {"agenda-items": {"data": [{"type": "agenda-items", "id": "1"}]}}},
            "included": [{"type": "agenda-items", "id": "1", "attributes": {"title": "Wins"}}]
        }))
        .unwrap();

        let titles: Vec<String> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let items = parser.agenda_template().agenda_items();
                        items[0].resource().str_attribute("title").unwrap().to_string()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert_eq!(titles, vec!["Wins"; 4]);
        assert_eq!(parser.included_len(), 1);
    }
}
