//! RFC 9457 Problem Details for HTTP APIs (pure data model, no HTTP framework dependencies)

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Custom serializer for `StatusCode` to u16
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// Custom deserializer for `StatusCode` from u16
fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// RFC 9457 Problem Details for HTTP APIs.
///
/// The wire field names (`type`, `title`, `status`, `detail`, `instance`,
/// `code`, `errors`) are part of the client contract. `status` always equals
/// the HTTP status the response is sent with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(
    feature = "utoipa",
    schema(
        title = "ProblemDetails",
        description = "RFC 9457 Problem Details for HTTP APIs"
    )
)]
#[must_use]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    /// When dereferenced, it might provide human-readable documentation.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    /// Constant across occurrences of the same problem key.
    pub title: String,
    /// The HTTP status code for this occurrence of the problem.
    /// Serializes as u16 for RFC 9457 compatibility.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    #[cfg_attr(feature = "utoipa", schema(value_type = u16))]
    pub status: StatusCode,
    /// A human-readable explanation specific to this occurrence of the problem.
    pub detail: String,
    /// A URI reference that identifies the specific occurrence of the problem
    /// (the request path).
    pub instance: String,
    /// Stable machine-readable error code (`E` + 4 digits).
    pub code: String,
    /// Field-level errors for validation problems. Empty for other categories.
    pub errors: Vec<FieldError>,
    /// Application-specific extension members, flattened into the body.
    #[serde(flatten, default)]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

/// Individual field-level error attached to a validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(feature = "utoipa", schema(title = "FieldError"))]
pub struct FieldError {
    /// Dotted field path, e.g. "email" or "items.0.name"
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<String>,
    /// RFC 6901 JSON Pointer as a URI fragment, e.g. "#/items/0/name"
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pointer: Option<String>,
    /// Human-readable message describing the error
    pub message: String,
    /// Stable machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
    /// Raw validator issue kind, for telemetry only; not a client contract
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

impl FieldError {
    /// Create a field error with just a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            pointer: None,
            message: message.into(),
            code: None,
            reason: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl ProblemDetails {
    /// Create a new problem with the given status, title, and detail.
    ///
    /// Note: This function accepts `http::StatusCode` for type safety.
    /// The status is serialized as `u16` for RFC 9457 compatibility.
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            errors: Vec::new(),
            extensions: serde_json::Map::new(),
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}

/// Axum integration: make `ProblemDetails` directly usable as a bare
/// (non-enveloped) response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        use axum::http::HeaderValue;

        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn problem_builder_pattern() {
        let p = ProblemDetails::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Validation Error",
            "The request contains invalid data",
        )
        .with_code("E1001")
        .with_instance("/users/123")
        .with_errors(vec![
            FieldError::new("Email is required")
                .with_field("email")
                .with_pointer("#/email")
                .with_code("E1001"),
        ]);

        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(p.code, "E1001");
        assert_eq!(p.instance, "/users/123");
        assert_eq!(p.errors.len(), 1);
        assert_eq!(p.errors[0].pointer.as_deref(), Some("#/email"));
    }

    #[test]
    fn problem_serializes_status_as_u16() {
        let p = ProblemDetails::new(StatusCode::NOT_FOUND, "Not Found", "Resource not found");
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"status\":404"));
    }

    #[test]
    fn problem_deserializes_status_from_u16() {
        let json = r#"{"type":"about:blank","title":"Not Found","status":404,"detail":"Resource not found","instance":"","code":"E1404","errors":[]}"#;
        let p: ProblemDetails = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.code, "E1404");
    }

    #[test]
    fn field_error_omits_absent_optionals() {
        let fe = FieldError::new("bad");
        let json = serde_json::to_value(&fe).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "bad" }));
    }

    #[test]
    fn extensions_flatten_into_body() {
        let p = ProblemDetails::new(StatusCode::TOO_MANY_REQUESTS, "Rate Limited", "Slow down")
            .with_extension("retryAfter", serde_json::json!(30));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["retryAfter"], 30);
        assert!(json.get("extensions").is_none());
    }
}
