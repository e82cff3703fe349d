use crate::error::JsonApiError;
use crate::jsonapi::{RemoteResource, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One answer choice of a rating question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub emoji: String,
    pub text: String,
}

/// The rating question attached to an agenda template
#[derive(Debug, Clone)]
pub struct MeetingRatingQuestion {
    resource: Resource,
}

impl MeetingRatingQuestion {
    pub fn question(&self) -> Option<&str> {
        self.resource.str_attribute("question")
    }

    /// The `responses` attribute as `{emoji, text}` pairs, in document order.
    /// A missing or null attribute gives an empty list.
    pub fn responses(&self) -> Result<Vec<RatingResponse>, JsonApiError> {
        match self.resource.attribute("responses") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|source| {
                JsonApiError::InvalidAttribute {
                    name: "responses".to_string(),
                    source,
                }
            }),
        }
    }

    pub fn into_resource(self) -> Resource {
        self.resource
    }
}

impl From<Resource> for MeetingRatingQuestion {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl RemoteResource for MeetingRatingQuestion {
    fn resource(&self) -> &Resource {
        &self.resource
    }
}
