//! Terminal boundary handlers: the top-level catch-all and the not-found
//! fallback.
//!
//! Register each exactly once, at the outermost router; nested components
//! must never install their own terminal handlers or errors get converted
//! and logged twice. Per request the converter runs at most once and exactly
//! one leveled log line is emitted, before the response bytes are sent.

use std::any::Any;

use axum::extract::State;
use axum::response::Response;
use http::StatusCode;

use apikit_errors::{
    Converted, LogLevel, ProblemConfig, ProblemKey, create_problem, def, to_problem,
};

use crate::context::RequestContext;
use crate::envelope::fail;

/// Convert any error value, log once at the category's severity, and respond
/// with an error envelope.
pub fn error_response(cfg: &ProblemConfig, ctx: &RequestContext, err: &dyn Any) -> Response {
    let converted = to_problem(cfg, &ctx.path, err);
    log_converted(ctx, &converted);
    fail(ctx, converted.problem, converted.status)
}

/// Respond to an unmatched route with a `not_found` problem envelope.
pub fn not_found_response(cfg: &ProblemConfig, ctx: &RequestContext) -> Response {
    let detail = format!("No route matches {} {}", ctx.method, ctx.path);
    let problem = create_problem(cfg, ProblemKey::NotFound, &ctx.path, detail, Vec::new(), None);
    let not_found = def(ProblemKey::NotFound);
    log_line(
        not_found.log_level,
        ctx,
        StatusCode::NOT_FOUND,
        &problem.code,
        not_found.error_type,
        &problem.title,
    );
    fail(ctx, problem, StatusCode::NOT_FOUND)
}

/// Axum fallback handler; wire it once with `Router::fallback`.
pub async fn not_found_handler(
    State(cfg): State<ProblemConfig>,
    ctx: RequestContext,
) -> Response {
    not_found_response(&cfg, &ctx)
}

fn log_converted(ctx: &RequestContext, converted: &Converted) {
    log_line(
        converted.log_level,
        ctx,
        converted.status,
        &converted.problem.code,
        converted.error_type,
        &converted.problem.title,
    );
}

fn log_line(
    level: LogLevel,
    ctx: &RequestContext,
    status: StatusCode,
    code: &str,
    error_type: &str,
    title: &str,
) {
    // tracing macros require a const level, hence the match.
    macro_rules! emit {
        ($macro:ident) => {
            tracing::$macro!(
                status = status.as_u16(),
                code = %code,
                error_type = %error_type,
                method = %ctx.method,
                path = %ctx.path,
                request_id = ctx.request_id.as_deref(),
                "request failed: {title}"
            )
        };
    }
    match level {
        LogLevel::Debug => emit!(debug),
        LogLevel::Info => emit!(info),
        LogLevel::Warn => emit!(warn),
        LogLevel::Error => emit!(error),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use apikit_errors::AppError;
    use http::Method;

    fn ctx() -> RequestContext {
        RequestContext {
            request_id: Some("req-9".to_owned()),
            method: Method::DELETE,
            path: "/users/5".to_owned(),
            traceparent: None,
        }
    }

    #[test]
    fn error_response_status_comes_from_the_conversion() {
        let cfg = ProblemConfig::default();
        let resp = error_response(&cfg, &ctx(), &AppError::not_found("User", "5"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_found_response_is_a_404_envelope() {
        let cfg = ProblemConfig::default();
        let resp = not_found_response(&cfg, &ctx());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
