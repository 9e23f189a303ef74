//! Error taxonomy for the apikit boundary
//!
//! This crate provides pure data types for error handling, with no
//! dependencies on HTTP frameworks. It includes:
//! - RFC 9457 Problem Details (`ProblemDetails`, `FieldError`)
//! - The closed problem-category registry (`ProblemKey`, `ProblemDef`)
//! - Namespaced domain code tables (`codes`)
//! - The canonical application error (`AppError`) and its factories
//! - RFC 6901 JSON Pointer encoding (`pointer`)
//! - The validation-issue adapter (`validation`)
//! - The single error-to-problem converter (`convert`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app_error;
pub mod codes;
pub mod convert;
pub mod pointer;
pub mod problem;
pub mod registry;
pub mod validation;

// Re-export commonly used types
pub use app_error::AppError;
pub use convert::{
    Converted, GENERIC_DETAIL, HttpException, ProblemConfig, create_problem, to_problem,
};
pub use pointer::{PathSegment, escape_token, to_fragment};
pub use problem::{APPLICATION_PROBLEM_JSON, FieldError, ProblemDetails};
pub use registry::{LogLevel, ProblemDef, ProblemKey, def, status_to_key, type_uri};
pub use validation::{
    GenericAdapter, MarkerAdapter, RawIssue, ValidationAdapter, ValidationFailure,
};
