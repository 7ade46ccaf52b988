//! Rust client for the MockServer control API.
//!
//! Tests use this crate to program a running MockServer instance, check the
//! traffic it received, and clear it between runs.
//!
//! # Features
//!
//! - Create expectations (`PUT /mockserver/expectation`, expects 201)
//! - Verify requests (`PUT /mockserver/verify`, expects 202)
//! - Reset state (`PUT /mockserver/reset`, expects 200)
//! - Typed wire models that omit unset optional fields
//! - Pluggable [`Transport`], with a [`MockTransport`](testing::MockTransport)
//!   for tests
//!
//! # Example
//!
//! ```no_run
//! use mockserver_client::{
//!     CallBounds, CallPolicy, Client, Expectation, RequestMatcher, ResponseTemplate,
//!     VerificationMatcher, VerificationRequest,
//! };
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("mockserver:1080")?;
//! client.reset().await?;
//!
//! client
//!     .create_expectation(&Expectation::new(
//!         RequestMatcher::new("POST", "/users"),
//!         ResponseTemplate::new(201).with_body(json!({"id": 1})),
//!         CallPolicy::once(),
//!     ))
//!     .await?;
//!
//! // ... exercise the code under test ...
//!
//! client
//!     .verify_request(&VerificationRequest::new(
//!         VerificationMatcher::new("POST", "/users"),
//!         CallBounds::exactly(1),
//!     ))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<(), ClientError>`. A status other than the
//! one the operation expects becomes [`ClientError::Rejected`], carrying the
//! status and MockServer's response body:
//!
//! ```no_run
//! # use mockserver_client::{CallBounds, Client, ClientError, VerificationMatcher, VerificationRequest};
//! # async fn example() -> Result<(), ClientError> {
//! # let client = Client::new("localhost:1080")?;
//! # let verification = VerificationRequest::new(VerificationMatcher::new("GET", "/"), CallBounds::once());
//! match client.verify_request(&verification).await {
//!     Ok(()) => println!("Traffic observed"),
//!     Err(ClientError::Rejected { status: 406, body, .. }) => println!("Not observed: {}", body),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod operations;
pub mod testing;
mod transport;
mod types;

// Re-export the main types
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use operations::Operation;
pub use transport::{
    ReqwestTransport, SendFuture, Transport, TransportError, TransportRequest, TransportResponse,
};
pub use types::{
    BodyKind, BodyMatcher, CallBounds, CallPolicy, Expectation, RequestMatcher, ResponseTemplate,
    VerificationMatcher, VerificationRequest, MATCH_ONLY_MATCHING_FIELDS, MATCH_STRICT,
};
