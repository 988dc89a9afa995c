//! Tracing/logging setup shared by order-desk binaries.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{LogFormat, init};
