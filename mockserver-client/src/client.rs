//! Core MockServer client implementation.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::operations::Operation;
use crate::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::types::{Expectation, VerificationRequest};
use reqwest::Url;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A client for the MockServer control API.
///
/// The client is immutable after construction. Clones share the transport,
/// so one client can serve concurrent tests.
///
/// # Example
///
/// ```no_run
/// use mockserver_client::{CallPolicy, Client, Expectation, RequestMatcher, ResponseTemplate};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("localhost:1080")?;
///
/// client.reset().await?;
/// client
///     .create_expectation(&Expectation::new(
///         RequestMatcher::new("GET", "/health"),
///         ResponseTemplate::new(200),
///         CallPolicy::unlimited(),
///     ))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    /// Base URL of the MockServer instance, scheme included.
    base_url: String,
    /// Sends the control requests.
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client that talks to MockServer over the network.
    ///
    /// # Arguments
    ///
    /// * `address` - MockServer address, e.g. `"mockserver:1080"` or
    ///   `"https://mock.internal:1080"`. `http://` is assumed when no scheme
    ///   is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is malformed or the HTTP client cannot
    /// be created.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        Self::with_transport(address, ReqwestTransport::new()?)
    }

    /// Create a client that sends through the given transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is malformed.
    pub fn with_transport(
        address: impl Into<String>,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        let base_url = normalize_address(address.into());
        validate_base_url(&base_url)?;

        Ok(Self {
            base_url,
            transport: Arc::new(transport),
        })
    }

    /// Create a network client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is malformed or the HTTP client cannot
    /// be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(config.timeout())?;
        Self::with_transport(config.address(), transport)
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register an expectation.
    ///
    /// MockServer answers `201 Created` once the expectation is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] if MockServer answers with any other
    /// status, or a transport/serialization error.
    pub async fn create_expectation(&self, expectation: &Expectation) -> Result<()> {
        let body = serde_json::to_vec(expectation)?;
        self.execute(Operation::CreateExpectation, Some(body)).await
    }

    /// Verify that matching requests were received within the given bounds.
    ///
    /// MockServer answers `202 Accepted` when the bounds hold and
    /// `406 Not Acceptable` when they do not; the rejection carries
    /// MockServer's explanation in its body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] for any status other than 202, or a
    /// transport/serialization error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use mockserver_client::{CallBounds, Client, VerificationMatcher, VerificationRequest};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("localhost:1080")?;
    /// let verification = VerificationRequest::new(
    ///     VerificationMatcher::new("POST", "/orders"),
    ///     CallBounds::at_least(1),
    /// );
    ///
    /// if let Err(e) = client.verify_request(&verification).await {
    ///     eprintln!("expected traffic missing: {}", e);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn verify_request(&self, verification: &VerificationRequest) -> Result<()> {
        let body = serde_json::to_vec(verification)?;
        self.execute(Operation::VerifyRequest, Some(body)).await
    }

    /// Clear all expectations and recorded requests.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] for any status other than 200, or a
    /// transport error.
    pub async fn reset(&self) -> Result<()> {
        self.execute(Operation::Reset, None).await
    }

    /// Build a full URL from a path.
    fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Send one control request and check its status.
    async fn execute(&self, operation: Operation, body: Option<Vec<u8>>) -> Result<()> {
        let mut request = TransportRequest::new(operation.method(), self.url(operation.path()));
        if let Some(body) = body {
            request = request.with_json_body(body);
        }

        debug!(%operation, url = %request.url, "Sending control request");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(%operation, error = %e, "Control request failed");
            ClientError::Transport(e)
        })?;

        if response.status == operation.expected_status() {
            debug!(%operation, status = response.status, "Control request succeeded");
            return Ok(());
        }

        let body = response.body_text();
        warn!(%operation, status = response.status, body = %body, "MockServer rejected control request");

        Err(ClientError::Rejected {
            operation,
            status: response.status,
            body,
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Prefix `http://` unless the address already names a scheme.
///
/// Only a `://` ahead of the first path, query or fragment delimiter counts,
/// so `host:1080/cb?u=http://x` is still treated as a bare address.
fn normalize_address(address: String) -> String {
    let has_scheme = match address.find("://") {
        Some(end) => !address[..end].contains(&['/', '?', '#'][..]),
        None => false,
    };

    if has_scheme {
        address
    } else {
        format!("http://{}", address)
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "URL must use http:// or https://, got: {}",
            base_url
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ClientError::InvalidUrl(format!(
            "URL has no host: {}",
            base_url
        )));
    }

    Ok(())
}
