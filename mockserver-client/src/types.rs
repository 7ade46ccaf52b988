//! Wire models for the MockServer control API.
//!
//! Field names follow MockServer's JSON schema. Optional fields are left out
//! of the encoded payload when unset, because MockServer treats a missing
//! field differently from one that is present but empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body match type requiring an exact JSON match.
pub const MATCH_STRICT: &str = "STRICT";

/// Body match type ignoring fields absent from the expected body.
pub const MATCH_ONLY_MATCHING_FIELDS: &str = "ONLY_MATCHING_FIELDS";

/// An expectation: when a matching request arrives, answer with the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// Requests this expectation applies to.
    #[serde(rename = "httpRequest")]
    pub request: RequestMatcher,
    /// Response MockServer sends back.
    #[serde(rename = "httpResponse")]
    pub response: ResponseTemplate,
    /// How many times the expectation may be consumed.
    pub times: CallPolicy,
}

impl Expectation {
    /// Create an expectation.
    pub fn new(request: RequestMatcher, response: ResponseTemplate, times: CallPolicy) -> Self {
        Self {
            request,
            response,
            times,
        }
    }
}

/// Describes the requests an expectation matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMatcher {
    /// HTTP method, e.g. `"POST"`.
    pub method: String,
    /// Request path, e.g. `"/some/resource"`.
    pub path: String,
    /// Expected request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestMatcher {
    /// Match requests by method and path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
        }
    }

    /// Also match on the request body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The response MockServer returns for a matched request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTemplate {
    /// Status code to respond with.
    pub status_code: u16,
    /// Response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ResponseTemplate {
    /// Respond with a bare status code.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            body: None,
        }
    }

    /// Attach a response body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// How often an expectation may be matched.
///
/// When `unlimited` is set MockServer ignores `remaining_times`, but the value
/// is still transmitted as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPolicy {
    /// Number of matches left before the expectation expires.
    pub remaining_times: u32,
    /// Match any number of times.
    pub unlimited: bool,
}

impl CallPolicy {
    /// Match exactly `n` times.
    pub fn times(n: u32) -> Self {
        Self {
            remaining_times: n,
            unlimited: false,
        }
    }

    /// Match a single time.
    pub fn once() -> Self {
        Self::times(1)
    }

    /// Match without limit.
    pub fn unlimited() -> Self {
        Self {
            remaining_times: 0,
            unlimited: true,
        }
    }
}

/// A query against MockServer's request log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Requests to count.
    #[serde(rename = "httpRequest")]
    pub request: VerificationMatcher,
    /// Bounds the count must fall within.
    pub times: CallBounds,
}

impl VerificationRequest {
    /// Create a verification request.
    pub fn new(request: VerificationMatcher, times: CallBounds) -> Self {
        Self { request, times }
    }
}

/// Describes the recorded requests a verification counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationMatcher {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// How recorded bodies are compared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyMatcher>,
}

impl VerificationMatcher {
    /// Count requests by method and path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
        }
    }

    /// Also compare request bodies.
    #[must_use]
    pub fn with_body(mut self, body: BodyMatcher) -> Self {
        self.body = Some(body);
        self
    }
}

/// Kind of body matcher. MockServer's verification API only needs JSON here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// JSON body comparison.
    #[serde(rename = "JSON")]
    Json,
}

/// Body comparison descriptor, passed through to MockServer uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMatcher {
    /// Always `"JSON"`.
    #[serde(rename = "type")]
    pub kind: BodyKind,
    /// Match type, e.g. [`MATCH_STRICT`] or [`MATCH_ONLY_MATCHING_FIELDS`].
    pub match_type: String,
}

impl BodyMatcher {
    /// A JSON body matcher with the given match type.
    pub fn json(match_type: impl Into<String>) -> Self {
        Self {
            kind: BodyKind::Json,
            match_type: match_type.into(),
        }
    }
}

/// Call-count bounds for a verification. Unset bounds are not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallBounds {
    /// Minimum number of matching requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_least: Option<u32>,
    /// Maximum number of matching requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_most: Option<u32>,
}

impl CallBounds {
    /// No bounds at all.
    pub fn any() -> Self {
        Self::default()
    }

    /// At least `n` matching requests.
    pub fn at_least(n: u32) -> Self {
        Self {
            at_least: Some(n),
            at_most: None,
        }
    }

    /// At most `n` matching requests.
    pub fn at_most(n: u32) -> Self {
        Self {
            at_least: None,
            at_most: Some(n),
        }
    }

    /// Between `min` and `max` matching requests, inclusive.
    pub fn between(min: u32, max: u32) -> Self {
        Self {
            at_least: Some(min),
            at_most: Some(max),
        }
    }

    /// Exactly `n` matching requests.
    pub fn exactly(n: u32) -> Self {
        Self::between(n, n)
    }

    /// Exactly one matching request.
    pub fn once() -> Self {
        Self::exactly(1)
    }
}
