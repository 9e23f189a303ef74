//! Problem registry: the closed set of problem categories and their wire metadata.
//!
//! Every error leaving the boundary is classified into exactly one
//! [`ProblemKey`]. The registry is a compile-time table; nothing mutates it at
//! runtime, so lookups are lock-free and total.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Closed enumeration of problem categories.
///
/// The set never changes at runtime; domain modules extend the taxonomy only
/// by adding namespaced codes (see [`crate::codes`]), never new categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKey {
    ValidationError,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    PayloadTooLarge,
    RateLimited,
    InternalError,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
}

impl ProblemKey {
    /// Every key, in registry order.
    pub const ALL: [ProblemKey; 12] = [
        ProblemKey::ValidationError,
        ProblemKey::BadRequest,
        ProblemKey::Unauthorized,
        ProblemKey::Forbidden,
        ProblemKey::NotFound,
        ProblemKey::Conflict,
        ProblemKey::PayloadTooLarge,
        ProblemKey::RateLimited,
        ProblemKey::InternalError,
        ProblemKey::BadGateway,
        ProblemKey::ServiceUnavailable,
        ProblemKey::GatewayTimeout,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProblemKey::ValidationError => "validation_error",
            ProblemKey::BadRequest => "bad_request",
            ProblemKey::Unauthorized => "unauthorized",
            ProblemKey::Forbidden => "forbidden",
            ProblemKey::NotFound => "not_found",
            ProblemKey::Conflict => "conflict",
            ProblemKey::PayloadTooLarge => "payload_too_large",
            ProblemKey::RateLimited => "rate_limited",
            ProblemKey::InternalError => "internal_error",
            ProblemKey::BadGateway => "bad_gateway",
            ProblemKey::ServiceUnavailable => "service_unavailable",
            ProblemKey::GatewayTimeout => "gateway_timeout",
        }
    }
}

/// Log severity fixed per problem category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Static wire metadata for one problem category.
#[derive(Debug, Clone, Copy)]
pub struct ProblemDef {
    pub key: ProblemKey,
    /// Suffix appended to the configured problems base URL.
    pub uri_suffix: &'static str,
    /// Human-readable title; constant across occurrences of the same key.
    pub title: &'static str,
    pub status: StatusCode,
    /// Stable internal code from the generic `E1xxx` range.
    pub code: &'static str,
    /// Error origin label used in log context, not on the wire.
    pub error_type: &'static str,
    pub log_level: LogLevel,
    /// Whether raw detail may be shown to clients in production.
    pub expose_detail: bool,
}

/// The registry table, one entry per [`ProblemKey`], in `ProblemKey::ALL` order.
const DEFS: [ProblemDef; 12] = [
    ProblemDef {
        key: ProblemKey::ValidationError,
        uri_suffix: "validation-error",
        title: "Validation Error",
        status: StatusCode::UNPROCESSABLE_ENTITY,
        code: "E1001",
        error_type: "VALIDATION_ERROR",
        log_level: LogLevel::Info,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::BadRequest,
        uri_suffix: "bad-request",
        title: "Bad Request",
        status: StatusCode::BAD_REQUEST,
        code: "E1400",
        error_type: "BAD_REQUEST",
        log_level: LogLevel::Info,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::Unauthorized,
        uri_suffix: "unauthorized",
        title: "Unauthorized",
        status: StatusCode::UNAUTHORIZED,
        code: "E1401",
        error_type: "UNAUTHORIZED",
        log_level: LogLevel::Info,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::Forbidden,
        uri_suffix: "forbidden",
        title: "Forbidden",
        status: StatusCode::FORBIDDEN,
        code: "E1403",
        error_type: "FORBIDDEN",
        log_level: LogLevel::Info,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::NotFound,
        uri_suffix: "not-found",
        title: "Not Found",
        status: StatusCode::NOT_FOUND,
        code: "E1404",
        error_type: "NOT_FOUND",
        log_level: LogLevel::Info,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::Conflict,
        uri_suffix: "conflict",
        title: "Conflict",
        status: StatusCode::CONFLICT,
        code: "E1409",
        error_type: "CONFLICT",
        log_level: LogLevel::Info,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::PayloadTooLarge,
        uri_suffix: "payload-too-large",
        title: "Payload Too Large",
        status: StatusCode::PAYLOAD_TOO_LARGE,
        code: "E1413",
        error_type: "PAYLOAD_TOO_LARGE",
        log_level: LogLevel::Warn,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::RateLimited,
        uri_suffix: "rate-limited",
        title: "Rate Limited",
        status: StatusCode::TOO_MANY_REQUESTS,
        code: "E1429",
        error_type: "RATE_LIMITED",
        log_level: LogLevel::Warn,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::InternalError,
        uri_suffix: "internal-error",
        title: "Internal Server Error",
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "E1500",
        error_type: "INTERNAL_ERROR",
        log_level: LogLevel::Error,
        expose_detail: false,
    },
    ProblemDef {
        key: ProblemKey::BadGateway,
        uri_suffix: "bad-gateway",
        title: "Bad Gateway",
        status: StatusCode::BAD_GATEWAY,
        code: "E1502",
        error_type: "BAD_GATEWAY",
        log_level: LogLevel::Error,
        expose_detail: true,
    },
    ProblemDef {
        key: ProblemKey::ServiceUnavailable,
        uri_suffix: "service-unavailable",
        title: "Service Unavailable",
        status: StatusCode::SERVICE_UNAVAILABLE,
        code: "E1503",
        error_type: "SERVICE_UNAVAILABLE",
        log_level: LogLevel::Error,
        expose_detail: false,
    },
    ProblemDef {
        key: ProblemKey::GatewayTimeout,
        uri_suffix: "gateway-timeout",
        title: "Gateway Timeout",
        status: StatusCode::GATEWAY_TIMEOUT,
        code: "E1504",
        error_type: "GATEWAY_TIMEOUT",
        log_level: LogLevel::Error,
        expose_detail: true,
    },
];

/// Look up the static definition for a problem key.
#[must_use]
pub fn def(key: ProblemKey) -> &'static ProblemDef {
    // ALL and DEFS share ordering; the bijection is asserted in tests.
    &DEFS[key as usize]
}

/// Build the problem `type` URI from the configured base URL.
#[must_use]
pub fn type_uri(base_url: &str, key: ProblemKey) -> String {
    let base = base_url.trim_end_matches('/');
    let suffix = def(key).uri_suffix;
    format!("{base}/{suffix}")
}

/// Map an HTTP status to the problem category it belongs to.
///
/// Total function: every unmapped status falls back to `internal_error`.
#[must_use]
pub fn status_to_key(status: StatusCode) -> ProblemKey {
    match status.as_u16() {
        400 => ProblemKey::BadRequest,
        401 => ProblemKey::Unauthorized,
        403 => ProblemKey::Forbidden,
        404 => ProblemKey::NotFound,
        409 => ProblemKey::Conflict,
        413 => ProblemKey::PayloadTooLarge,
        422 => ProblemKey::ValidationError,
        429 => ProblemKey::RateLimited,
        502 => ProblemKey::BadGateway,
        503 => ProblemKey::ServiceUnavailable,
        504 => ProblemKey::GatewayTimeout,
        _ => ProblemKey::InternalError,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn registry_is_bijective_with_keys() {
        assert_eq!(DEFS.len(), ProblemKey::ALL.len());
        for (i, key) in ProblemKey::ALL.iter().enumerate() {
            assert_eq!(DEFS[i].key, *key, "DEFS order must match ProblemKey::ALL");
            assert_eq!(def(*key).key, *key);
        }
    }

    #[test]
    fn base_codes_are_in_the_generic_range() {
        for d in &DEFS {
            let bytes = d.code.as_bytes();
            assert_eq!(bytes.len(), 5, "code {} must be E + 4 digits", d.code);
            assert_eq!(bytes[0], b'E');
            assert_eq!(bytes[1], b'1', "base code {} must be E1xxx", d.code);
            assert!(bytes[2..].iter().all(u8::is_ascii_digit));
        }
    }

    #[test]
    fn titles_and_statuses_match_the_contract() {
        assert_eq!(
            def(ProblemKey::ValidationError).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(def(ProblemKey::ValidationError).code, "E1001");
        assert_eq!(def(ProblemKey::NotFound).code, "E1404");
        assert_eq!(def(ProblemKey::InternalError).title, "Internal Server Error");
        assert_eq!(def(ProblemKey::RateLimited).code, "E1429");
    }

    #[test]
    fn detail_exposure_policy_is_static_per_category() {
        for d in &DEFS {
            let hidden = matches!(
                d.key,
                ProblemKey::InternalError | ProblemKey::ServiceUnavailable
            );
            assert_eq!(d.expose_detail, !hidden, "expose_detail for {:?}", d.key);
        }
    }

    #[test]
    fn severity_is_static_per_category() {
        assert_eq!(def(ProblemKey::ValidationError).log_level, LogLevel::Info);
        assert_eq!(def(ProblemKey::Conflict).log_level, LogLevel::Info);
        assert_eq!(def(ProblemKey::PayloadTooLarge).log_level, LogLevel::Warn);
        assert_eq!(def(ProblemKey::RateLimited).log_level, LogLevel::Warn);
        assert_eq!(def(ProblemKey::BadGateway).log_level, LogLevel::Error);
        assert_eq!(def(ProblemKey::InternalError).log_level, LogLevel::Error);
    }

    #[test]
    fn status_to_key_follows_the_table() {
        assert_eq!(status_to_key(StatusCode::NOT_FOUND), ProblemKey::NotFound);
        assert_eq!(
            status_to_key(StatusCode::UNAUTHORIZED),
            ProblemKey::Unauthorized
        );
        assert_eq!(
            status_to_key(StatusCode::UNPROCESSABLE_ENTITY),
            ProblemKey::ValidationError
        );
        // Unmapped statuses fall back to internal_error.
        let unmapped = StatusCode::from_u16(999).unwrap();
        assert_eq!(status_to_key(unmapped), ProblemKey::InternalError);
        assert_eq!(
            status_to_key(StatusCode::IM_A_TEAPOT),
            ProblemKey::InternalError
        );
    }

    #[test]
    fn type_uri_joins_base_and_suffix() {
        assert_eq!(
            type_uri("https://api.example.com/problems", ProblemKey::NotFound),
            "https://api.example.com/problems/not-found"
        );
        // Trailing slash on the base does not double up.
        assert_eq!(
            type_uri("https://api.example.com/problems/", ProblemKey::Conflict),
            "https://api.example.com/problems/conflict"
        );
    }

    #[test]
    fn key_serializes_as_snake_case() {
        let json = serde_json::to_string(&ProblemKey::PayloadTooLarge).unwrap();
        assert_eq!(json, "\"payload_too_large\"");
        assert_eq!(ProblemKey::GatewayTimeout.as_str(), "gateway_timeout");
    }
}
