//! The MockServer control operations and their per-operation contract.

use http::Method;
use std::fmt;

/// A control operation exposed by MockServer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Register a request/response expectation.
    CreateExpectation,
    /// Check the request log against call-count bounds.
    VerifyRequest,
    /// Clear all expectations and recorded requests.
    Reset,
}

impl Operation {
    /// Path of the control endpoint, relative to the base address.
    pub fn path(self) -> &'static str {
        match self {
            Self::CreateExpectation => "/mockserver/expectation",
            Self::VerifyRequest => "/mockserver/verify",
            Self::Reset => "/mockserver/reset",
        }
    }

    /// HTTP method used for the call. MockServer takes PUT on every control endpoint.
    pub fn method(self) -> Method {
        Method::PUT
    }

    /// The single status code that counts as success.
    pub fn expected_status(self) -> u16 {
        match self {
            Self::CreateExpectation => 201,
            Self::VerifyRequest => 202,
            Self::Reset => 200,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Self::CreateExpectation => "creating mockserver expectation",
            Self::VerifyRequest => "verifying mockserver request",
            Self::Reset => "resetting mockserver",
        };
        f.write_str(action)
    }
}
