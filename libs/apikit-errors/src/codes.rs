//! Domain code registries.
//!
//! Each feature domain owns a private thousand-range of stable codes:
//! `E2xxx` auth, `E3xxx` document signing, `E4xxx` company/environment,
//! `E5xxx` external integration. Generic `E1xxx` codes live in the
//! [`crate::registry`] table. The tables are pure data plus thin `AppError`
//! factories; the cross-domain uniqueness invariant is asserted at test time.

use crate::app_error::AppError;

/// True when `code` is `E` followed by exactly four digits.
#[must_use]
pub fn is_well_formed(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 5 && bytes[0] == b'E' && bytes[1..].iter().all(u8::is_ascii_digit)
}

/// True when `code` is well formed and starts with the domain digit.
fn in_range(code: &str, domain_digit: u8) -> bool {
    is_well_formed(code) && code.as_bytes()[1] == domain_digit
}

/// Authentication and session codes (`E2xxx`).
pub mod auth {
    use super::AppError;

    pub const INVALID_CREDENTIALS: &str = "E2001";
    pub const TOKEN_EXPIRED: &str = "E2002";
    pub const TOKEN_INVALID: &str = "E2003";
    pub const SESSION_REVOKED: &str = "E2004";
    pub const MFA_REQUIRED: &str = "E2005";

    /// Symbolic name to code, for catalog tooling and the uniqueness test.
    pub const NAMES: &[(&str, &str)] = &[
        ("INVALID_CREDENTIALS", INVALID_CREDENTIALS),
        ("TOKEN_EXPIRED", TOKEN_EXPIRED),
        ("TOKEN_INVALID", TOKEN_INVALID),
        ("SESSION_REVOKED", SESSION_REVOKED),
        ("MFA_REQUIRED", MFA_REQUIRED),
    ];

    #[must_use]
    pub fn belongs_to(code: &str) -> bool {
        super::in_range(code, b'2')
    }

    /// Credentials did not match; resolves to 401 but reports `E2001`.
    #[must_use]
    pub fn invalid_credentials() -> AppError {
        AppError::unauthorized("Invalid credentials").with_code(INVALID_CREDENTIALS)
    }

    /// The presented token is past its expiry.
    #[must_use]
    pub fn token_expired() -> AppError {
        AppError::unauthorized("Access token has expired").with_code(TOKEN_EXPIRED)
    }

    /// The session was revoked server-side.
    #[must_use]
    pub fn session_revoked() -> AppError {
        AppError::unauthorized("Session has been revoked").with_code(SESSION_REVOKED)
    }
}

/// Document-signing codes (`E3xxx`).
pub mod signing {
    use super::AppError;

    pub const SIGNATURE_INVALID: &str = "E3001";
    pub const DOCUMENT_ALREADY_SIGNED: &str = "E3002";
    pub const SIGNING_SESSION_EXPIRED: &str = "E3003";
    pub const CERTIFICATE_REVOKED: &str = "E3004";

    pub const NAMES: &[(&str, &str)] = &[
        ("SIGNATURE_INVALID", SIGNATURE_INVALID),
        ("DOCUMENT_ALREADY_SIGNED", DOCUMENT_ALREADY_SIGNED),
        ("SIGNING_SESSION_EXPIRED", SIGNING_SESSION_EXPIRED),
        ("CERTIFICATE_REVOKED", CERTIFICATE_REVOKED),
    ];

    #[must_use]
    pub fn belongs_to(code: &str) -> bool {
        super::in_range(code, b'3')
    }

    /// The document already carries a completed signature.
    #[must_use]
    pub fn document_already_signed() -> AppError {
        AppError::conflict("Document has already been signed").with_code(DOCUMENT_ALREADY_SIGNED)
    }

    /// The signing session timed out before completion.
    #[must_use]
    pub fn signing_session_expired() -> AppError {
        AppError::conflict("Signing session has expired").with_code(SIGNING_SESSION_EXPIRED)
    }
}

/// Company and environment codes (`E4xxx`).
pub mod company {
    use super::AppError;

    pub const COMPANY_NOT_FOUND: &str = "E4001";
    pub const ENVIRONMENT_DISABLED: &str = "E4002";
    pub const COMPANY_SUSPENDED: &str = "E4003";

    pub const NAMES: &[(&str, &str)] = &[
        ("COMPANY_NOT_FOUND", COMPANY_NOT_FOUND),
        ("ENVIRONMENT_DISABLED", ENVIRONMENT_DISABLED),
        ("COMPANY_SUSPENDED", COMPANY_SUSPENDED),
    ];

    #[must_use]
    pub fn belongs_to(code: &str) -> bool {
        super::in_range(code, b'4')
    }

    /// No company matches the identifier.
    #[must_use]
    pub fn company_not_found(id: impl std::fmt::Display) -> AppError {
        AppError::not_found("Company", id).with_code(COMPANY_NOT_FOUND)
    }

    /// The target environment is administratively disabled.
    #[must_use]
    pub fn environment_disabled(name: &str) -> AppError {
        AppError::forbidden(format!("Environment '{name}' is disabled"))
            .with_code(ENVIRONMENT_DISABLED)
    }
}

/// External integration (SOAP upstream) codes (`E5xxx`).
pub mod integration {
    use super::AppError;
    use http::StatusCode;

    pub const UPSTREAM_FAULT: &str = "E5001";
    pub const UPSTREAM_TIMEOUT: &str = "E5002";
    pub const UPSTREAM_UNAVAILABLE: &str = "E5003";
    pub const RESPONSE_MALFORMED: &str = "E5004";

    pub const NAMES: &[(&str, &str)] = &[
        ("UPSTREAM_FAULT", UPSTREAM_FAULT),
        ("UPSTREAM_TIMEOUT", UPSTREAM_TIMEOUT),
        ("UPSTREAM_UNAVAILABLE", UPSTREAM_UNAVAILABLE),
        ("RESPONSE_MALFORMED", RESPONSE_MALFORMED),
    ];

    #[must_use]
    pub fn belongs_to(code: &str) -> bool {
        super::in_range(code, b'5')
    }

    /// The upstream returned a SOAP fault; surfaces as 502.
    #[must_use]
    pub fn upstream_fault(operation: &str) -> AppError {
        AppError::service_unavailable(format!("Upstream fault during '{operation}'"))
            .with_status(StatusCode::BAD_GATEWAY)
            .with_code(UPSTREAM_FAULT)
    }

    /// The upstream did not answer in time; surfaces as 504.
    #[must_use]
    pub fn upstream_timeout(operation: &str) -> AppError {
        AppError::service_unavailable(format!("Upstream timed out during '{operation}'"))
            .with_status(StatusCode::GATEWAY_TIMEOUT)
            .with_code(UPSTREAM_TIMEOUT)
    }

    /// The upstream is unreachable.
    #[must_use]
    pub fn upstream_unavailable() -> AppError {
        AppError::service_unavailable("Upstream service is unavailable")
            .with_code(UPSTREAM_UNAVAILABLE)
    }
}
