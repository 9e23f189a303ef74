//! The canonical error value domain code returns.
//!
//! `AppError` carries a [`ProblemKey`] plus optional overrides. Named
//! factories are the only construction path: each fixes the category and
//! supplies a default human message, so callers cannot produce a malformed
//! classification. Construction never logs and performs no I/O; the problem
//! converter consumes the value exactly once at the boundary.

use std::fmt::Display;

use http::StatusCode;
use thiserror::Error;

use crate::problem::FieldError;
use crate::registry::ProblemKey;

type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Canonical application error.
///
/// Fields are private so the factory set stays the only construction path;
/// the converter reads them in-crate, collaborators go through the accessors.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    pub(crate) key: ProblemKey,
    pub(crate) message: String,
    pub(crate) detail: Option<String>,
    pub(crate) errors: Vec<FieldError>,
    pub(crate) status_override: Option<StatusCode>,
    pub(crate) code_override: Option<String>,
    #[source]
    pub(crate) source: Option<BoxedCause>,
}

impl AppError {
    fn new(key: ProblemKey, message: impl Into<String>) -> Self {
        Self {
            key,
            message: message.into(),
            detail: None,
            errors: Vec::new(),
            status_override: None,
            code_override: None,
            source: None,
        }
    }

    /// Validation failure with field-level errors. Maps to 422 / `E1001`.
    #[must_use]
    pub fn validation(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        let mut err = Self::new(ProblemKey::ValidationError, message);
        err.errors = errors;
        err
    }

    /// A named resource was not found. Maps to 404 / `E1404`.
    ///
    /// The message shape is part of the client contract:
    /// `"{resource} with identifier '{id}' was not found"`.
    #[must_use]
    pub fn not_found(resource: &str, id: impl Display) -> Self {
        Self::new(
            ProblemKey::NotFound,
            format!("{resource} with identifier '{id}' was not found"),
        )
    }

    /// Authentication is missing or invalid. Maps to 401 / `E1401`.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ProblemKey::Unauthorized, message)
    }

    /// The caller is authenticated but not allowed. Maps to 403 / `E1403`.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ProblemKey::Forbidden, message)
    }

    /// The request conflicts with current state. Maps to 409 / `E1409`.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ProblemKey::Conflict, message)
    }

    /// The request is malformed outside schema validation. Maps to 400 / `E1400`.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProblemKey::BadRequest, message)
    }

    /// Unexpected internal failure. Maps to 500 / `E1500`; detail is hidden
    /// from clients in production.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProblemKey::InternalError, message)
    }

    /// A dependency is down or overloaded. Maps to 503 / `E1503`; detail is
    /// hidden from clients in production.
    #[must_use]
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ProblemKey::ServiceUnavailable, message)
    }

    /// The caller exceeded a rate limit. Maps to 429 / `E1429`.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProblemKey::RateLimited, message)
    }

    /// Client-facing detail; falls back to the message when unset.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach field-level errors.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    /// Override the HTTP status while keeping the category.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_override = Some(status);
        self
    }

    /// Report a more specific stable code (domain ranges `E2xxx`..`E5xxx`)
    /// while keeping the category's HTTP mapping.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code_override = Some(code.into());
        self
    }

    /// Attach the underlying cause for `source()` chaining.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxedCause>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn key(&self) -> ProblemKey {
        self.key
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn code_override(&self) -> Option<&str> {
        self.code_override.as_deref()
    }
}
