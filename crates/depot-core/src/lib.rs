//! # Depot Core
//!
//! The domain layer of the Depot task platform.
//! This crate owns the failure-reporting boundary: stable error codes, the
//! domain error taxonomy, the code registry and the task boundary that turns
//! any failure into a sanitized [`FailureRecord`](domain::FailureRecord).
//! It has zero infrastructure dependencies.

pub mod boundary;
pub mod domain;
pub mod error;
pub mod ports;

pub use boundary::TaskBoundary;
pub use error::{DomainError, ErrorCode, ErrorDescriptor, ErrorParams, ErrorRegistry};
