//! Error types for the agenda template client

use thiserror::Error;

/// Errors raised while decoding a JSON:API document or reading a resource
#[derive(Error, Debug)]
pub enum JsonApiError {
    #[error("Malformed JSON:API document: {0}")]
    MalformedDocument(String),

    #[error("Resource id {id:?} is not an integer")]
    TypeConversion { id: String },

    #[error("Attribute {name:?} has an unexpected shape: {source}")]
    InvalidAttribute {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the endpoint layer
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Agenda template not found")]
    AgendaTemplateNotFound,

    #[error("Suggested goal not found")]
    GoalNotFound,

    #[error("Items not found")]
    ItemNotFound,

    #[error("No base URL configured; set AGENDA_TEMPLATE_API_URL or base_url in the config file")]
    MissingBaseUrl,

    #[error("Invalid template slug {0:?}")]
    InvalidSlug(String),

    /// Raised by an external [`RequestSigner`](crate::client::RequestSigner)
    #[error("Request signing failed: {0}")]
    Signing(String),

    #[error("No response from the agenda template service: {0}")]
    Transport(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Document(#[from] JsonApiError),
}

/// Result alias for the endpoint layer
pub type Result<T> = std::result::Result<T, ClientError>;
