//! Agenda template service resources
//!
//! Thin wrappers over [`Resource`](crate::jsonapi::Resource) that add named
//! relationship accessors and typed attribute getters.

mod agenda_item;
mod agenda_template;
mod meeting_rating_question;
mod milestone;
mod suggested_goal;

pub use agenda_item::AgendaItem;
pub use agenda_template::AgendaTemplate;
pub use meeting_rating_question::{MeetingRatingQuestion, RatingResponse};
pub use milestone::Milestone;
pub use suggested_goal::SuggestedGoal;
