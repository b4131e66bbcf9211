//! Sending serialized requests: the sender boundary, a reqwest-backed
//! implementation, a stub for dry runs, and batch-file loading.
mod batchfile;
mod http;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use tracing::debug;

use crate::error::HttpError;
use crate::request::{SerializedRequest, SerializedResponse};

pub use batchfile::load_requests;
pub use http::HttpSender;

/// Transport boundary: anything that can turn a serialized request into a
/// response. Implementations must tolerate being called concurrently up to
/// the dispatcher's concurrency limit.
#[async_trait]
pub trait RequestSender: Send + Sync {
    /// Sends one request.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be delivered or the target
    /// answers with a non-success status.
    async fn send(&self, request: &SerializedRequest) -> Result<SerializedResponse, HttpError>;
}

/// Stub sender for dry runs and tests: every request "succeeds" with status
/// 200 without touching the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubSender;

#[async_trait]
impl RequestSender for StubSender {
    async fn send(&self, request: &SerializedRequest) -> Result<SerializedResponse, HttpError> {
        debug!("Faking sending request {} {}", request.method, request.path);
        Ok(SerializedResponse {
            code: 200,
            body: Some("{ \"message\": \"ok\" }".to_owned()),
        })
    }
}
