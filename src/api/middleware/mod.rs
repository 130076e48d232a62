//! HTTP middleware for request processing.
//!
//! Provides request tracing and the last-resort panic handler.

pub mod panic;
pub mod tracing;
