//! HTTP boundary for the apikit error taxonomy
//!
//! Wraps success and error payloads in the uniform envelope
//! (`{success, data, error, meta}`), parses W3C Trace-Context headers for
//! correlation metadata, and provides the terminal axum handlers that invoke
//! the problem converter exactly once per request.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod context;
pub mod envelope;
pub mod handlers;
pub mod trace;

// Re-export commonly used types
pub use config::load_config;
pub use context::{RequestContext, X_REQUEST_ID};
pub use envelope::{Envelope, ResponseMeta, build_meta, fail, ok, ok_with_status};
pub use handlers::{error_response, not_found_handler, not_found_response};
pub use trace::{TRACEPARENT, TraceContext, parse_traceparent};

// The data-model crate is re-exported so boundary consumers need one import.
pub use apikit_errors as errors;
