//! Per-request context consumed by the envelope builder and handlers.
//!
//! The request id is assigned upstream (e.g. tower-http's
//! `SetRequestIdLayer`) before this layer runs; this extractor only reads it.

use axum::extract::FromRequestParts;
use http::{Method, request::Parts};
use std::convert::Infallible;

use crate::trace::TRACEPARENT;

/// Header carrying the per-request identifier assigned upstream.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Correlation inputs read once per request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Pre-populated request id; `None` signals upstream misconfiguration.
    pub request_id: Option<String>,
    pub method: Method,
    pub path: String,
    /// Raw `traceparent` header value, validated lazily at envelope build.
    pub traceparent: Option<String>,
}

impl RequestContext {
    /// Build the context from request parts.
    #[must_use]
    pub fn of(parts: &Parts) -> Self {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned)
        };
        Self {
            request_id: header(X_REQUEST_ID),
            method: parts.method.clone(),
            path: parts.uri.path().to_owned(),
            traceparent: header(TRACEPARENT),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::of(parts))
    }
}
