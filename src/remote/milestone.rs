use crate::jsonapi::{RemoteResource, Resource};

/// A milestone of a suggested goal
#[derive(Debug, Clone)]
pub struct Milestone {
    resource: Resource,
}

impl Milestone {
    pub fn body(&self) -> Option<&str> {
        self.resource.str_attribute("body")
    }

    /// The owning goal's id, delivered either as a string or a number
    pub fn suggested_goal_id(&self) -> Option<i64> {
        self.resource.int_attribute("suggested-goal-id")
    }

    pub fn into_resource(self) -> Resource {
        self.resource
    }
}

impl From<Resource> for Milestone {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl RemoteResource for Milestone {
    fn resource(&self) -> &Resource {
        &self.resource
    }
}
