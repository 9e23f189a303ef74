//! Uniform success/error response envelope with correlation metadata.
//!
//! The envelope is a tagged union: exactly one of `data`/`error` is non-null,
//! and the type makes the other unrepresentable. Serialization is
//! hand-written so the wire shape (`success`, `data`, `error`, `meta`) stays
//! fixed regardless of the payload type.

use axum::Json;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use apikit_errors::ProblemDetails;

use crate::context::RequestContext;
use crate::trace::parse_traceparent;

/// Correlation metadata attached to every envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    /// Envelope build time, ISO-8601.
    pub timestamp: DateTime<Utc>,
    /// Present iff a valid `traceparent` header accompanied the request.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub span_id: Option<String>,
}

/// The uniform wrapper returned by every endpoint.
#[derive(Debug)]
pub enum Envelope<T> {
    Success { data: T, meta: ResponseMeta },
    Error { problem: ProblemDetails, meta: ResponseMeta },
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Envelope", 4)?;
        match self {
            Envelope::Success { data, meta } => {
                st.serialize_field("success", &true)?;
                st.serialize_field("data", data)?;
                st.serialize_field("error", &None::<ProblemDetails>)?;
                st.serialize_field("meta", meta)?;
            }
            Envelope::Error { problem, meta } => {
                st.serialize_field("success", &false)?;
                st.serialize_field("data", &None::<()>)?;
                st.serialize_field("error", problem)?;
                st.serialize_field("meta", meta)?;
            }
        }
        st.end()
    }
}

/// Build the correlation metadata for one response.
///
/// A missing request id is an upstream misconfiguration; a random id is
/// fabricated so the response still correlates, and a warning is logged.
#[must_use]
pub fn build_meta(ctx: &RequestContext) -> ResponseMeta {
    let request_id = ctx.request_id.clone().unwrap_or_else(|| {
        let fabricated = uuid::Uuid::new_v4().to_string();
        tracing::warn!(
            path = %ctx.path,
            request_id = %fabricated,
            "request id missing; fabricated one (request-id middleware not installed?)"
        );
        fabricated
    });
    let trace = ctx
        .traceparent
        .as_deref()
        .and_then(parse_traceparent);
    ResponseMeta {
        request_id,
        timestamp: Utc::now(),
        trace_id: trace.as_ref().map(|t| t.trace_id.clone()),
        span_id: trace.map(|t| t.span_id),
    }
}

/// Wrap a success payload with status 200.
pub fn ok<T: Serialize>(ctx: &RequestContext, data: T) -> Response {
    ok_with_status(ctx, data, StatusCode::OK)
}

/// Wrap a success payload with an explicit status (e.g. 201).
pub fn ok_with_status<T: Serialize>(ctx: &RequestContext, data: T, status: StatusCode) -> Response {
    let envelope = Envelope::Success {
        data,
        meta: build_meta(ctx),
    };
    respond(envelope, status)
}

/// Wrap a problem in an error envelope.
///
/// `status` is required so the response status and `problem.status` cannot
/// silently desynchronize; they are asserted equal in debug builds.
pub fn fail(ctx: &RequestContext, problem: ProblemDetails, status: StatusCode) -> Response {
    debug_assert_eq!(
        status, problem.status,
        "envelope status must match problem.status"
    );
    let envelope: Envelope<()> = Envelope::Error {
        problem,
        meta: build_meta(ctx),
    };
    respond(envelope, status)
}

fn respond<T: Serialize>(envelope: Envelope<T>, status: StatusCode) -> Response {
    let mut resp = Json(envelope).into_response();
    *resp.status_mut() = status;
    resp
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::Method;

    fn ctx(request_id: Option<&str>, traceparent: Option<&str>) -> RequestContext {
        RequestContext {
            request_id: request_id.map(ToOwned::to_owned),
            method: Method::GET,
            path: "/things".to_owned(),
            traceparent: traceparent.map(ToOwned::to_owned),
        }
    }

    fn meta() -> ResponseMeta {
        ResponseMeta {
            request_id: "req-1".to_owned(),
            timestamp: Utc::now(),
            trace_id: None,
            span_id: None,
        }
    }

    #[test]
    fn success_envelope_wire_shape() {
        let envelope = Envelope::Success {
            data: serde_json::json!({"id": 7}),
            meta: meta(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 7);
        assert!(json["error"].is_null());
        assert_eq!(json["meta"]["requestId"], "req-1");
    }

    #[test]
    fn error_envelope_wire_shape() {
        let problem =
            ProblemDetails::new(StatusCode::NOT_FOUND, "Not Found", "gone").with_code("E1404");
        let envelope: Envelope<()> = Envelope::Error {
            problem,
            meta: meta(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], "E1404");
        assert_eq!(json["error"]["status"], 404);
    }

    #[test]
    fn meta_timestamp_is_iso8601() {
        let json = serde_json::to_value(build_meta(&ctx(Some("req-1"), None))).unwrap();
        let ts = json["timestamp"].as_str().unwrap();
        assert!(ts.parse::<DateTime<Utc>>().is_ok(), "not ISO-8601: {ts}");
    }

    #[test]
    fn valid_traceparent_surfaces_trace_and_span() {
        let meta = build_meta(&ctx(
            Some("req-1"),
            Some("00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01"),
        ));
        assert_eq!(
            meta.trace_id.as_deref(),
            Some("0af7651916cd43dd8448eb211c80319c")
        );
        assert_eq!(meta.span_id.as_deref(), Some("b7ad6b7169203331"));
    }

    #[test]
    fn invalid_traceparent_is_silently_dropped() {
        let meta = build_meta(&ctx(
            Some("req-1"),
            Some("00-00000000000000000000000000000000-b7ad6b7169203331-01"),
        ));
        assert_eq!(meta.trace_id, None);
        assert_eq!(meta.span_id, None);
    }

    #[test]
    fn missing_request_id_is_fabricated_not_fatal() {
        let meta = build_meta(&ctx(None, None));
        assert!(uuid::Uuid::parse_str(&meta.request_id).is_ok());
    }

    #[test]
    fn trace_fields_are_omitted_from_the_wire_when_absent() {
        let json = serde_json::to_value(meta()).unwrap();
        assert!(json.get("traceId").is_none());
        assert!(json.get("spanId").is_none());
    }
}
