//! Diagnostics for the agnostic code generators.
//!
//! - Error codes for searchability (`E1001` ...)
//! - One error type, [`CodegenError`], returned by every fallible operation
//!
//! Unsupported constructs, broken model references and configuration errors
//! come from the backend contract. Suite errors come from the fact compiler.
//! Output and handle errors cover the rest.

mod error;
mod error_code;

pub use error::CodegenError;
pub use error_code::ErrorCode;

/// Result alias used throughout the generators.
pub type Result<T, E = CodegenError> = std::result::Result<T, E>;
