//! Client for the agenda template service
//!
//! Fetches resources over HTTP and decodes the service's JSON:API responses
//! into typed resources that navigate to each other by relationship name.
//!
//! - [`jsonapi`] - Document parsing and the included-resource graph
//! - [`remote`] - Agenda templates, items, rating questions, goals, milestones
//! - [`client`] - Transport and per-endpoint methods
//! - [`config`] - Layered configuration

pub mod client;
pub mod config;
pub mod error;
pub mod jsonapi;
pub mod remote;

pub use client::{AgendaTemplateClient, ApiResponse, Author, HttpTransport, Transport};
pub use config::Config;
pub use error::{ClientError, JsonApiError, Result};
pub use jsonapi::{AnyResource, Parser, RemoteResource, Resource, ResourceIdentifier};
pub use remote::{AgendaItem, AgendaTemplate, MeetingRatingQuestion, Milestone, RatingResponse, SuggestedGoal};
