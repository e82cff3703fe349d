//! JSON:API resource graph
//!
//! Turns one JSON:API document (a primary resource plus a flat `included`
//! array) into resources that navigate to each other by relationship name.
//!
//! # Module Structure
//!
//! - [`document`] - Raw resource objects and identifiers
//! - [`resource`] - Resource handles and the [`RemoteResource`] capability trait
//! - [`factory`] - `type` string to variant dispatch
//! - [`index`] - The included-resource arena
//! - [`parser`] - Document entry point
//!
//! # Example
//!
//! ```
//! use agenda_template_client::jsonapi::{Parser, RemoteResource};
//!
//! let body = r#"{
//!     "data": {"type": "agenda-templates", "id": "1",
//!         "relationships": {"agenda-items": {"data": [{"type": "agenda-items", "id": "7"}]}}},
//!     "included": [{"type": "agenda-items", "id": "7", "attributes": {"title": "Wins"}}]
//! }"#;
//!
//! let template = Parser::new(body)?.agenda_template();
//! let items = template.agenda_items();
//! assert_eq!(items[0].as_agenda_item().and_then(|i| i.title()), Some("Wins"));
//! assert_eq!(template.id()?, 1);
//! # Ok::<(), agenda_template_client::JsonApiError>(())
//! ```

pub mod document;
pub mod factory;
pub mod index;
pub mod parser;
pub mod resource;

pub use document::{ResourceIdentifier, ResourceObject};
pub use factory::{make_resource, AnyResource};
pub use index::IncludedIndex;
pub use parser::Parser;
pub use resource::{RemoteResource, Resource, TIMESTAMP_FORMAT};
