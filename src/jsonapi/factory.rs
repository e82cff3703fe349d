//! Resource Factory - map a JSON:API `type` to its resource variant
//!
//! The dispatch table is built once on first access. Types that are not in
//! the table become the generic [`Resource`] variant.

use super::resource::{RemoteResource, Resource};
use crate::remote::{AgendaItem, AgendaTemplate, MeetingRatingQuestion, Milestone, SuggestedGoal};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Wraps a bound resource handle as a concrete variant
pub type Constructor = fn(Resource) -> AnyResource;

/// Any resource the factory can produce
#[derive(Debug, Clone)]
pub enum AnyResource {
    AgendaTemplate(AgendaTemplate),
    AgendaItem(AgendaItem),
    MeetingRatingQuestion(MeetingRatingQuestion),
    SuggestedGoal(SuggestedGoal),
    Milestone(Milestone),
    Generic(Resource),
}

impl AnyResource {
    pub fn as_agenda_template(&self) -> Option<&AgendaTemplate> {
        match self {
            AnyResource::AgendaTemplate(template) => Some(template),
            _ => None,
        }
    }

    pub fn as_agenda_item(&self) -> Option<&AgendaItem> {
        match self {
            AnyResource::AgendaItem(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_meeting_rating_question(&self) -> Option<&MeetingRatingQuestion> {
        match self {
            AnyResource::MeetingRatingQuestion(question) => Some(question),
            _ => None,
        }
    }

    pub fn as_suggested_goal(&self) -> Option<&SuggestedGoal> {
        match self {
            AnyResource::SuggestedGoal(goal) => Some(goal),
            _ => None,
        }
    }

    pub fn as_milestone(&self) -> Option<&Milestone> {
        match self {
            AnyResource::Milestone(milestone) => Some(milestone),
            _ => None,
        }
    }

    /// Drop the variant and keep the generic handle
    pub fn into_resource(self) -> Resource {
        match self {
            AnyResource::AgendaTemplate(template) => template.into_resource(),
            AnyResource::AgendaItem(item) => item.into_resource(),
            AnyResource::MeetingRatingQuestion(question) => question.into_resource(),
            AnyResource::SuggestedGoal(goal) => goal.into_resource(),
            AnyResource::Milestone(milestone) => milestone.into_resource(),
            AnyResource::Generic(resource) => resource,
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, AnyResource::Generic(_))
    }
}

impl RemoteResource for AnyResource {
    fn resource(&self) -> &Resource {
        match self {
            AnyResource::AgendaTemplate(template) => template.resource(),
            AnyResource::AgendaItem(item) => item.resource(),
            AnyResource::MeetingRatingQuestion(question) => question.resource(),
            AnyResource::SuggestedGoal(goal) => goal.resource(),
            AnyResource::Milestone(milestone) => milestone.resource(),
            AnyResource::Generic(resource) => resource,
        }
    }
}

fn agenda_template(resource: Resource) -> AnyResource {
    AnyResource::AgendaTemplate(resource.into())
}

fn agenda_item(resource: Resource) -> AnyResource {
    AnyResource::AgendaItem(resource.into())
}

fn meeting_rating_question(resource: Resource) -> AnyResource {
    AnyResource::MeetingRatingQuestion(resource.into())
}

fn suggested_goal(resource: Resource) -> AnyResource {
    AnyResource::SuggestedGoal(resource.into())
}

fn milestone(resource: Resource) -> AnyResource {
    AnyResource::Milestone(resource.into())
}

fn generic(resource: Resource) -> AnyResource {
    AnyResource::Generic(resource)
}

static FACTORY: OnceLock<HashMap<&'static str, Constructor>> = OnceLock::new();

/// Get the dispatch table (built on first access)
fn factory_table() -> &'static HashMap<&'static str, Constructor> {
    FACTORY.get_or_init(|| {
        // The service is inconsistent about plural type names for goals
        HashMap::from([
            ("agenda-templates", agenda_template as Constructor),
            ("agenda-items", agenda_item as Constructor),
            ("meeting-rating-questions", meeting_rating_question as Constructor),
            ("suggested-goals", suggested_goal as Constructor),
            ("suggested-goal", suggested_goal as Constructor),
            ("milestones", milestone as Constructor),
            ("milestone", milestone as Constructor),
        ])
    })
}

/// Constructor for a `type`, the generic variant if the type is unknown
pub fn constructor_for(resource_type: &str) -> Constructor {
    factory_table()
        .get(resource_type)
        .copied()
        .unwrap_or(generic as Constructor)
}

/// Wrap a resource as the variant its `type` maps to
pub fn make_resource(resource: Resource) -> AnyResource {
    let construct = constructor_for(resource.resource_type());
    construct(resource)
}

/// All types with a dedicated variant
pub fn known_types() -> Vec<&'static str> {
    let mut types: Vec<&'static str> = factory_table().keys().copied().collect();
    types.sort_unstable();
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_contains_core_variants() {
        let types = known_types();
        assert!(types.contains(&"agenda-items"));
        assert!(types.contains(&"meeting-rating-questions"));
        assert!(types.contains(&"milestone"));
    }

    #[test]
    fn test_dispatch_by_type() {
        let parser = crate::jsonapi::Parser::new(
            r#"{"data": {"type": "sections", "id": "1"},
                "included": [{"type": "agenda-items", "id": "1"}]}"#,
        )
        .unwrap();

        let primary = parser.document_resource();
        assert!(primary.is_generic());

        let item = make_resource(primary.into_resource());
        assert!(item.is_generic());
    }

    #[test]
    fn test_make_resource_picks_variant() {
        let parser = crate::jsonapi::Parser::new(r#"{"data": {"type": "milestone", "id": "3"}}"#).unwrap();
        let generic = parser.document_resource().into_resource();

        let milestone = make_resource(generic);
        assert!(milestone.as_milestone().is_some());
        assert_eq!(milestone.id().unwrap(), 3);
    }
}
