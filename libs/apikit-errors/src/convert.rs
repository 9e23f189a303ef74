//! The single dispatch point that turns any error value into a normalized
//! problem, grounded on `&dyn Any` downcasting so arbitrarily many error
//! origins funnel through one conversion.

use std::any::Any;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_error::AppError;
use crate::problem::{FieldError, ProblemDetails};
use crate::registry::{LogLevel, ProblemDef, ProblemKey, def, status_to_key, type_uri};
use crate::validation::{GenericAdapter, ValidationAdapter, ValidationFailure};

/// Generic detail shown in production for categories that hide internals.
pub const GENERIC_DETAIL: &str = "An unexpected error occurred";

/// Boundary configuration: problem-type URI base and the production flag
/// that drives the detail-exposure policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemConfig {
    /// Base URL problem `type` URIs are built from.
    pub problems_base_url: String,
    /// In production, categories with `expose_detail = false` return
    /// [`GENERIC_DETAIL`] instead of the raw message.
    pub production: bool,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            problems_base_url: "https://api.example.com/problems".to_owned(),
            production: true,
        }
    }
}

/// A framework-level HTTP exception carrying an explicit status but no
/// problem key.
#[derive(Debug, Error)]
#[error("HTTP {status}: {message}")]
pub struct HttpException {
    pub status: StatusCode,
    pub message: String,
}

impl HttpException {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Normalized conversion result consumed by the boundary handlers.
#[derive(Debug)]
pub struct Converted {
    pub problem: ProblemDetails,
    pub status: StatusCode,
    pub key: ProblemKey,
    pub log_level: LogLevel,
    pub error_type: &'static str,
}

/// The sole point where sensitive internals are kept from clients.
fn safe_detail(cfg: &ProblemConfig, problem_def: &ProblemDef, raw: String) -> String {
    if cfg.production && !problem_def.expose_detail {
        GENERIC_DETAIL.to_owned()
    } else {
        raw
    }
}

fn build(
    cfg: &ProblemConfig,
    problem_def: &'static ProblemDef,
    status: StatusCode,
    code: String,
    detail: String,
    instance: &str,
    errors: Vec<FieldError>,
) -> Converted {
    let problem = ProblemDetails::new(status, problem_def.title, detail)
        .with_type(type_uri(&cfg.problems_base_url, problem_def.key))
        .with_instance(instance)
        .with_code(code)
        .with_errors(errors);
    Converted {
        problem,
        status,
        key: problem_def.key,
        log_level: problem_def.log_level,
        error_type: problem_def.error_type,
    }
}

/// Build a problem directly against a registry entry.
///
/// Used by the not-found handler and exposed to collaborators that already
/// know the category. The detail-exposure policy applies here too.
#[must_use]
pub fn create_problem(
    cfg: &ProblemConfig,
    key: ProblemKey,
    instance: &str,
    detail: impl Into<String>,
    errors: Vec<FieldError>,
    code_override: Option<&str>,
) -> ProblemDetails {
    let problem_def = def(key);
    let code = code_override.unwrap_or(problem_def.code).to_owned();
    let detail = safe_detail(cfg, problem_def, detail.into());
    build(
        cfg,
        problem_def,
        problem_def.status,
        code,
        detail,
        instance,
        errors,
    )
    .problem
}

/// Convert any error value into a normalized problem.
///
/// Dispatch precedence, first match wins:
/// 1. [`AppError`] — registry lookup with status/code overrides applied
/// 2. [`ValidationFailure`] — forced `validation_error` via the generic adapter
/// 3. [`HttpException`] — its own status is authoritative on the wire
/// 4. anything else — `internal_error` with whatever message can be recovered
#[must_use]
pub fn to_problem(cfg: &ProblemConfig, instance: &str, err: &dyn Any) -> Converted {
    if let Some(app) = err.downcast_ref::<AppError>() {
        let problem_def = def(app.key);
        let status = app.status_override.unwrap_or(problem_def.status);
        let code = app
            .code_override
            .clone()
            .unwrap_or_else(|| problem_def.code.to_owned());
        let raw = app.detail.clone().unwrap_or_else(|| app.message.clone());
        let detail = safe_detail(cfg, problem_def, raw);
        return build(
            cfg,
            problem_def,
            status,
            code,
            detail,
            instance,
            app.errors.clone(),
        );
    }

    if let Some(failure) = err.downcast_ref::<ValidationFailure>() {
        let problem_def = def(ProblemKey::ValidationError);
        let errors = GenericAdapter.field_errors(&failure.issues);
        let detail = safe_detail(
            cfg,
            problem_def,
            "The request contains invalid data".to_owned(),
        );
        return build(
            cfg,
            problem_def,
            problem_def.status,
            problem_def.code.to_owned(),
            detail,
            instance,
            errors,
        );
    }

    if let Some(exception) = err.downcast_ref::<HttpException>() {
        let problem_def = def(status_to_key(exception.status));
        let detail = safe_detail(cfg, problem_def, exception.message.clone());
        // The exception's own status is authoritative, not the registry default.
        return build(
            cfg,
            problem_def,
            exception.status,
            problem_def.code.to_owned(),
            detail,
            instance,
            Vec::new(),
        );
    }

    let problem_def = def(ProblemKey::InternalError);
    let raw = recover_message(err);
    let detail = safe_detail(cfg, problem_def, raw);
    build(
        cfg,
        problem_def,
        problem_def.status,
        problem_def.code.to_owned(),
        detail,
        instance,
        Vec::new(),
    )
}

/// Best-effort message recovery from foreign error values.
fn recover_message(err: &dyn Any) -> String {
    if let Some(e) = err.downcast_ref::<anyhow::Error>() {
        return e.to_string();
    }
    if let Some(e) = err.downcast_ref::<Box<dyn std::error::Error + Send + Sync>>() {
        return e.to_string();
    }
    if let Some(s) = err.downcast_ref::<String>() {
        return s.clone();
    }
    if let Some(s) = err.downcast_ref::<&str>() {
        return (*s).to_owned();
    }
    "Unknown error".to_owned()
}
