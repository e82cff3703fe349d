//! Agenda template service access
//!
//! # Module Structure
//!
//! - [`http`] - The [`Transport`] contract and its reqwest implementation
//! - [`signing`] - Hook for the external request signing middleware
//! - [`endpoints`] - One method per remote operation
//!
//! # Example
//!
//! ```no_run
//! use agenda_template_client::{AgendaTemplateClient, Config};
//!
//! async fn example() -> agenda_template_client::Result<()> {
//!     let client = AgendaTemplateClient::from_config(&Config::load())?;
//!     let template = client.get_agenda_template_model(1, 10, "scrum-meeting").await?;
//!     println!("{} items", template.agenda_items().len());
//!     Ok(())
//! }
//! ```

pub mod endpoints;
pub mod http;
pub mod signing;

pub use endpoints::{AgendaTemplateClient, Author};
pub use http::{method_from_verb, ApiResponse, HttpTransport, Transport};
pub use signing::{RequestSigner, Unsigned};
