//! Request signing seam
//!
//! The signing middleware itself lives outside this crate. It plugs in here
//! and adds its authentication headers to each request before it is sent.

use crate::error::Result;

/// Adds authentication to an outgoing request
pub trait RequestSigner: Send + Sync {
    fn sign(&self, request: &mut reqwest::Request) -> Result<()>;
}

/// Sends requests as they are
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsigned;

impl RequestSigner for Unsigned {
    fn sign(&self, _request: &mut reqwest::Request) -> Result<()> {
        Ok(())
    }
}
