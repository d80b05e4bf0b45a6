//! Error codes for all generator diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the failure class. Every code is fatal: a run that reports one
//! produces no output.

use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: E#### where first digit indicates class:
/// - E1xxx: Lowering errors (backend contract)
/// - E2xxx: Fact suite errors
/// - E3xxx: Output errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lowering Errors (E1xxx)
    /// Unsupported construct (type or value the backend cannot lower)
    E1001,
    /// Broken reference (method for a model that was never declared)
    E1002,
    /// Configuration error (missing or malformed backend argument)
    E1003,

    // Suite Errors (E2xxx)
    /// Invalid fact suite
    E2001,

    // Output Errors (E3xxx)
    /// Writing the output file failed
    E3001,

    // Internal Errors (E9xxx)
    /// Block handle not issued by this builder
    E9001,
}

impl ErrorCode {
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E3001,
        ErrorCode::E9001,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
