use crate::jsonapi::{AnyResource, RemoteResource, Resource};

/// An agenda template (`agenda-templates`)
#[derive(Debug, Clone)]
pub struct AgendaTemplate {
    resource: Resource,
}

impl AgendaTemplate {
    pub fn name(&self) -> Option<&str> {
        self.resource.str_attribute("name")
    }

    /// e.g. `one-on-one`
    pub fn channel_type(&self) -> Option<&str> {
        self.resource.str_attribute("channel-type")
    }

    pub fn slug(&self) -> Option<&str> {
        self.resource.str_attribute("slug")
    }

    pub fn short_description(&self) -> Option<&str> {
        self.resource.str_attribute("short-description")
    }

    pub fn long_description(&self) -> Option<&str> {
        self.resource.str_attribute("long-description")
    }

    pub fn mascot(&self) -> Option<&str> {
        self.resource.str_attribute("mascot")
    }

    pub fn background(&self) -> Option<&str> {
        self.resource.str_attribute("background")
    }

    pub fn org_name(&self) -> Option<&str> {
        self.resource.str_attribute("org-name")
    }

    pub fn org_logo(&self) -> Option<&str> {
        self.resource.str_attribute("org-logo")
    }

    /// Items of the template, in document order
    pub fn agenda_items(&self) -> Vec<AnyResource> {
        self.resource.relationship("agenda-items")
    }

    /// The template's rating question.
    ///
    /// At most one is expected. If the service sends several, only the first
    /// is returned and the rest are ignored.
    pub fn meeting_rating_question(&self) -> Option<AnyResource> {
        self.resource
            .relationship("meeting-rating-questions")
            .into_iter()
            .next()
    }

    pub fn into_resource(self) -> Resource {
        self.resource
    }
}

impl From<Resource> for AgendaTemplate {
    fn from(resource: Resource) -> Self {
        Self { resource }
    }
}

impl RemoteResource for AgendaTemplate {
    fn resource(&self) -> &Resource {
        &self.resource
    }
}
