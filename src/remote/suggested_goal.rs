use crate::jsonapi::{AnyResource, RemoteResource, Resource};

/// A suggested goal, fetched with `include=milestones`
#[derive(Debug, Clone)]
pub struct SuggestedGoal {
    resource: Resource,
}

impl SuggestedGoal {
    pub fn title(&self) -> Option<&str> {
        self.resource.str_attribute("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.resource.str_attribute("description")
    }

    pub fn icon(&self) -> Option<&str> {
        self.resource.str_attribute("icon")
    }

    /// The owning user's id, delivered either as a string or a number
    pub fn user_id(&self) -> Option<i64> {
        self.resource.int_attribute("user-id")
    }

    pub fn milestones(&self) -> Vec<AnyResource> {
        self.resource.relationship("milestones")
    }

    pub fn into_resource(self) -> Resource {
        self.resource
    }
}

impl From<Resource> for SuggestedGoal {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl RemoteResource for SuggestedGoal {
    fn resource(&self) -> &Resource {
        &self.resource
    }
}
