//! In-memory transport double.
//!
//! [`MockTransport`] records every request it is handed and answers from a
//! script, so client behavior can be checked without a network.
//!
//! # Example
//!
//! ```
//! use mockserver_client::testing::MockTransport;
//! use mockserver_client::{Client, TransportResponse};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(MockTransport::new().respond(TransportResponse::new(200, "")));
//! let client = Client::with_transport("mockserver:1080", transport.clone())?;
//!
//! client.reset().await?;
//! assert_eq!(transport.request_count(), 1);
//! # Ok(())
//! # }
//! ```

use crate::transport::{SendFuture, Transport, TransportError, TransportRequest, TransportResponse};
use parking_lot::RwLock;
use std::collections::VecDeque;

/// Scripted transport that records requests.
///
/// Scripted outcomes are consumed in order. Once the script is empty, the
/// fallback outcome is used; without one, sends fail with
/// [`TransportError::Other`].
#[derive(Debug, Default)]
pub struct MockTransport {
    script: RwLock<VecDeque<Result<TransportResponse, TransportError>>>,
    fallback: Option<Result<TransportResponse, TransportError>>,
    requests: RwLock<Vec<TransportRequest>>,
}

impl MockTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond(self, response: TransportResponse) -> Self {
        self.script.write().push_back(Ok(response));
        self
    }

    /// Queue a response built from a status and body.
    pub fn respond_with(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.respond(TransportResponse::new(status, body))
    }

    /// Queue a transport failure.
    pub fn fail(self, error: TransportError) -> Self {
        self.script.write().push_back(Err(error));
        self
    }

    /// Answer every unscripted send with this response.
    pub fn always(mut self, response: TransportResponse) -> Self {
        self.fallback = Some(Ok(response));
        self
    }

    /// Fail every unscripted send with this error.
    pub fn always_fail(mut self, error: TransportError) -> Self {
        self.fallback = Some(Err(error));
        self
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.read().clone()
    }

    /// Get the most recent request.
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.requests.read().last().cloned()
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.read().len()
    }

    /// Clear recorded requests.
    pub fn clear_requests(&self) {
        self.requests.write().clear();
    }
}

impl Transport for MockTransport {
    fn send(&self, request: TransportRequest) -> SendFuture<'_> {
        let description = format!("{} {}", request.method, request.url);
        self.requests.write().push(request);

        let outcome = self
            .script
            .write()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| {
                Err(TransportError::Other(format!(
                    "no scripted response for {}",
                    description
                )))
            });

        Box::pin(async move { outcome })
    }
}
