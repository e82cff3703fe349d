//! Configuration Management
//!
//! Persistent configuration for the agenda template client, layered as
//! CLI flags > environment > config file > defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HTTP timeouts, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout: u64,
    pub timeout: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 15,
            timeout: 15,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Settings handed to the request signing middleware. This crate only
/// loads them; an external [`RequestSigner`](crate::client::RequestSigner)
/// reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignedRequestsConfig {
    pub algorithm: String,
    pub cache_prefix: String,
}

impl Default for SignedRequestsConfig {
    fn default() -> Self {
        Self {
            algorithm: "sha256".to_string(),
            cache_prefix: "signed-requests".to_string(),
        }
    }
}

/// Header names used by the signing middleware
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub signature: String,
    pub algorithm: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            signature: "X-Signature".to_string(),
            algorithm: "X-Signature-Algorithm".to_string(),
        }
    }
}

/// Replay protection settings for signed requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestReplayConfig {
    pub allow: bool,
    /// Seconds
    pub tolerance: u64,
}

impl Default for RequestReplayConfig {
    fn default() -> Self {
        Self {
            allow: false,
            tolerance: 30,
        }
    }
}

/// Client configuration
///
/// The signing fields (`signed_requests`, `headers`, `key`, `request_replay`)
/// are not used by the bundled [`Unsigned`](crate::client::Unsigned) signer.
/// They are handed to the external signing middleware.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the agenda template service
    pub base_url: Option<String>,
    pub http: HttpConfig,
    pub signed_requests: SignedRequestsConfig,
    pub headers: HeaderConfig,
    /// Shared signing key
    pub key: String,
    pub request_replay: RequestReplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            http: HttpConfig::default(),
            signed_requests: SignedRequestsConfig::default(),
            headers: HeaderConfig::default(),
            key: "customKey".to_string(),
            request_replay: RequestReplayConfig::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .field("signed_requests", &self.signed_requests)
            .field("headers", &self.headers)
            .field("key", &"<redacted>")
            .field("request_replay", &self.request_replay)
            .finish()
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("agenda-template-client").join("config.json"))
    }

    /// Load configuration from disk, then apply environment overrides
    pub fn load() -> Self {
        Self::load_file().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load the config file alone, without environment overrides
    pub fn load_file() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a file. Missing or unreadable files give defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to the default location. Every field is written
    /// as-is, so save a config from [`Config::load_file`], not [`Config::load`].
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Apply the service's deployment variables.
    /// Values that do not parse leave the current setting in place.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("AGENDA_TEMPLATE_API_URL") {
            self.base_url = Some(url);
        }
        if let Some(secs) = lookup("REMOTE_CLIENT_HTTP_CONNECT_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.http.connect_timeout = secs;
        }
        if let Some(secs) = lookup("REMOTE_CLIENT_HTTP_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.http.timeout = secs;
        }
        if let Some(algorithm) = lookup("ATC_SIGNED_REQUEST_ALGORITHM") {
            self.signed_requests.algorithm = algorithm;
        }
        if let Some(prefix) = lookup("ATC_SIGNED_REQUEST_CACHE_PREFIX") {
            self.signed_requests.cache_prefix = prefix;
        }
        if let Some(header) = lookup("ATC_SIGNED_REQUEST_SIGNATURE_HEADER") {
            self.headers.signature = header;
        }
        if let Some(header) = lookup("ATC_SIGNED_REQUEST_ALGORITHM_HEADER") {
            self.headers.algorithm = header;
        }
        if let Some(key) = lookup("ATC_SIGNED_REQUEST_KEY") {
            self.key = key;
        }
        if let Some(allow) = lookup("ATC_SIGNED_REQUEST_ALLOW_REPLAYS").and_then(|v| parse_bool(&v)) {
            self.request_replay.allow = allow;
        }
        if let Some(secs) = lookup("ATC_SIGNED_REQUEST_TOLERANCE_SECONDS").and_then(|v| v.parse().ok()) {
            self.request_replay.tolerance = secs;
        }
        self
    }

    /// Set base URL for this run and remember it in the config file.
    /// Only the file's own values are written back, so environment
    /// overrides applied to `self` never reach the disk.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.base_url = Some(base_url.to_string());
        match Self::config_path() {
            Some(path) => Self::store_base_url(&path, base_url),
            None => Ok(()),
        }
    }

    /// Update `base_url` in the file at `path`, keeping its other values
    pub fn store_base_url(path: &Path, base_url: &str) -> Result<()> {
        let mut stored = Self::load_from(path);
        stored.base_url = Some(base_url.to_string());
        stored.save_to(path)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
