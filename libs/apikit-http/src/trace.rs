//! W3C Trace Context parsing for response correlation metadata.
//!
//! Strictly validates the `traceparent` header
//! (`version-traceid-parentid-flags`). Malformed or reserved values are
//! treated as absent; parsing never fails the request.

/// W3C Trace Context header name
pub const TRACEPARENT: &str = "traceparent";

/// Validated trace identifiers extracted from a `traceparent` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
}

fn is_lower_hex(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn is_all_zero(s: &str) -> bool {
    s.bytes().all(|b| b == b'0')
}

/// Parse a `traceparent` value (format: `00-{trace_id}-{span_id}-{flags}`).
///
/// Returns `None` when the value does not match
/// `^[0-9a-f]{2}-[0-9a-f]{32}-[0-9a-f]{16}-[0-9a-f]{2}$`, when the version is
/// the reserved `ff`, or when the trace id or parent id is all zeros.
#[must_use]
pub fn parse_traceparent(value: &str) -> Option<TraceContext> {
    let mut parts = value.split('-');
    let version = parts.next()?;
    let trace_id = parts.next()?;
    let parent_id = parts.next()?;
    let flags = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if version.len() != 2 || trace_id.len() != 32 || parent_id.len() != 16 || flags.len() != 2 {
        return None;
    }
    if ![version, trace_id, parent_id, flags]
        .iter()
        .all(|part| is_lower_hex(part))
    {
        return None;
    }
    // "ff" is reserved; all-zero ids mean "no trace".
    if version == "ff" || is_all_zero(trace_id) || is_all_zero(parent_id) {
        return None;
    }

    Some(TraceContext {
        trace_id: trace_id.to_owned(),
        span_id: parent_id.to_owned(),
    })
}
