//! Adapter from raw schema-validation issues to field errors.
//!
//! Validators attach a machine-readable marker code to each issue; the
//! adapter only ever reads that marker, never the human message, so the
//! stable client contract survives rewording and localization. Untagged
//! issues collapse to the generic validation code.

use thiserror::Error;

use crate::pointer::{PathSegment, to_fragment};
use crate::problem::FieldError;
use crate::registry::{ProblemKey, def};

/// One raw issue as produced by a schema-validation library.
#[derive(Debug, Clone)]
pub struct RawIssue {
    /// Path to the offending value inside the request document.
    pub path: Vec<PathSegment>,
    /// Human-readable message; never parsed for codes.
    pub message: String,
    /// Machine-readable marker carrying the stable code, when tagged.
    pub code: Option<String>,
    /// Validator-internal issue kind, surfaced as telemetry only.
    pub kind: Option<String>,
}

impl RawIssue {
    #[must_use]
    pub fn new(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: None,
            kind: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// A raw issue list that escaped its call-site unnormalized.
///
/// The problem converter recognizes this type and maps it with the
/// [`GenericAdapter`].
#[derive(Debug, Error)]
#[error("request validation failed with {} issue(s)", .issues.len())]
pub struct ValidationFailure {
    pub issues: Vec<RawIssue>,
}

impl ValidationFailure {
    #[must_use]
    pub fn new(issues: Vec<RawIssue>) -> Self {
        Self { issues }
    }
}

/// Pluggable per call-site mapping from raw issues to field errors.
///
/// Implementations must preserve input order and populate `code` for every
/// field error.
pub trait ValidationAdapter {
    fn field_errors(&self, issues: &[RawIssue]) -> Vec<FieldError>;
}

/// Reads the marker code on each issue, falling back to the generic
/// validation code for untagged issues.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerAdapter;

/// Assigns the generic validation code to every issue regardless of markers.
/// The default for issue lists surfacing outside any structured call-site.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericAdapter;

/// The constant fallback code for untagged validation issues.
#[must_use]
pub fn generic_code() -> &'static str {
    def(ProblemKey::ValidationError).code
}

fn field_error(issue: &RawIssue, code: String) -> FieldError {
    let field = if issue.path.is_empty() {
        None
    } else {
        Some(
            issue
                .path
                .iter()
                .map(PathSegment::as_text)
                .collect::<Vec<_>>()
                .join("."),
        )
    };
    FieldError {
        field,
        pointer: Some(to_fragment(&issue.path, false)),
        message: issue.message.clone(),
        code: Some(code),
        reason: issue.kind.clone(),
    }
}

impl ValidationAdapter for MarkerAdapter {
    fn field_errors(&self, issues: &[RawIssue]) -> Vec<FieldError> {
        issues
            .iter()
            .map(|issue| {
                let code = issue
                    .code
                    .clone()
                    .unwrap_or_else(|| generic_code().to_owned());
                field_error(issue, code)
            })
            .collect()
    }
}

impl ValidationAdapter for GenericAdapter {
    fn field_errors(&self, issues: &[RawIssue]) -> Vec<FieldError> {
        issues
            .iter()
            .map(|issue| field_error(issue, generic_code().to_owned()))
            .collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn issues() -> Vec<RawIssue> {
        vec![
            RawIssue::new(vec!["email".into()], "Invalid email address")
                .with_code("E2003")
                .with_kind("invalid_string"),
            RawIssue::new(vec!["items".into(), 0usize.into(), "qty".into()], "Too small")
                .with_kind("too_small"),
        ]
    }

    #[test]
    fn marker_adapter_reads_tags_and_falls_back() {
        let errors = MarkerAdapter.field_errors(&issues());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code.as_deref(), Some("E2003"));
        assert_eq!(errors[1].code.as_deref(), Some("E1001"));
    }

    #[test]
    fn generic_adapter_ignores_markers() {
        let errors = GenericAdapter.field_errors(&issues());
        assert_eq!(errors[0].code.as_deref(), Some("E1001"));
        assert_eq!(errors[1].code.as_deref(), Some("E1001"));
    }

    #[test]
    fn pointers_and_fields_come_from_the_path() {
        let errors = MarkerAdapter.field_errors(&issues());
        assert_eq!(errors[0].pointer.as_deref(), Some("#/email"));
        assert_eq!(errors[0].field.as_deref(), Some("email"));
        assert_eq!(errors[1].pointer.as_deref(), Some("#/items/0/qty"));
        assert_eq!(errors[1].field.as_deref(), Some("items.0.qty"));
    }

    #[test]
    fn root_level_issue_points_at_the_document() {
        let issue = RawIssue::new(Vec::new(), "Expected an object");
        let errors = GenericAdapter.field_errors(&[issue]);
        assert_eq!(errors[0].pointer.as_deref(), Some("#"));
        assert_eq!(errors[0].field, None);
    }

    #[test]
    fn input_order_is_preserved() {
        let errors = MarkerAdapter.field_errors(&issues());
        assert_eq!(errors[0].message, "Invalid email address");
        assert_eq!(errors[1].message, "Too small");
    }

    #[test]
    fn reason_carries_the_validator_kind() {
        let errors = MarkerAdapter.field_errors(&issues());
        assert_eq!(errors[0].reason.as_deref(), Some("invalid_string"));
    }
}
