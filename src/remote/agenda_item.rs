use crate::jsonapi::{RemoteResource, Resource};
use serde_json::Value;

/// One item on an agenda template (`agenda-items`)
#[derive(Debug, Clone)]
pub struct AgendaItem {
    resource: Resource,
}

impl AgendaItem {
    pub fn title(&self) -> Option<&str> {
        self.resource.str_attribute("title")
    }

    pub fn is_repeating(&self) -> Option<bool> {
        self.resource.attribute("is-repeating").and_then(Value::as_bool)
    }

    pub fn into_resource(self) -> Resource {
        self.resource
    }
}

impl From<Resource> for AgendaItem {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl RemoteResource for AgendaItem {
    fn resource(&self) -> &Resource {
        &self.resource
    }
}
