//! HTTP transport for the agenda template service

use super::signing::{RequestSigner, Unsigned};
use crate::config::Config;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let truncated = if total > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Map a verb to an HTTP method. Anything unrecognized becomes GET.
pub fn method_from_verb(verb: &str) -> Method {
    match verb.to_ascii_lowercase().as_str() {
        "put" => Method::PUT,
        "patch" => Method::PATCH,
        "post" => Method::POST,
        "delete" => Method::DELETE,
        _ => Method::GET,
    }
}

/// A response from the service, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body. An empty body decodes to `null`.
    pub fn json(&self) -> Result<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends requests to the service.
///
/// Error statuses come back as an [`ApiResponse`]; `Err` means no response
/// was received at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    signer: Arc<dyn RequestSigner>,
}

impl HttpTransport {
    /// Create a transport from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url.as_deref().ok_or(ClientError::MissingBaseUrl)?;
        Self::with_base_url(base_url, config)
    }

    /// Create a transport for an explicit base URL, taking timeouts from `config`
    pub fn with_base_url(base_url: &str, config: &Config) -> Result<Self> {
        // Without a trailing slash, `Url::join` would replace the last segment
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{}/", base_url))?
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("agenda-template-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .connect_timeout(config.http.connect_timeout())
            .timeout(config.http.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url,
            signer: Arc::new(Unsigned),
        })
    }

    /// Sign every outgoing request with `signer`
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse> {
        let url = self.base_url.join(path)?;
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let mut request = builder.build()?;
        self.signer.sign(&mut request)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            // Only log sanitized/truncated error body
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        Ok(ApiResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_verbs_fall_back_to_get() {
        assert_eq!(method_from_verb("PUT"), Method::PUT);
        assert_eq!(method_from_verb("delete"), Method::DELETE);
        assert_eq!(method_from_verb("options"), Method::GET);
        assert_eq!(method_from_verb(""), Method::GET);
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundaries() {
        let body = "🙋".repeat(MAX_LOG_BODY_LENGTH + 10);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("[truncated"));
        assert!(sanitize_for_log("ok\n").eq("ok"));
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(ApiResponse::new(204, "").json().unwrap(), Value::Null);
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(422, "{}").is_success());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let transport = HttpTransport::with_base_url("http://localhost:9000/api", &Config::default()).unwrap();
        assert_eq!(transport.base_url().as_str(), "http://localhost:9000/api/");
        assert_eq!(
            transport.base_url().join("items/2").unwrap().as_str(),
            "http://localhost:9000/api/items/2"
        );
    }

    #[test]
    fn test_missing_base_url() {
        let err = HttpTransport::new(&Config::default()).err().unwrap();
        assert!(matches!(err, ClientError::MissingBaseUrl));
    }
}
