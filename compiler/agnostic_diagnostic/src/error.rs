//! The generator error type.
//!
//! Every variant is fatal. Lowering functions return `Result<_, CodegenError>`
//! and the driver stops at the first `Err`; nothing is downgraded to a
//! warning and no partial output is written.

use std::io;
use std::path::PathBuf;

use agnostic_ir::BlockId;
use thiserror::Error;

use crate::ErrorCode;

#[derive(Debug, Error)]
pub enum CodegenError {
    /// A backend met a type kind or value variant it does not lower.
    #[error("{backend}: unsupported {construct}")]
    UnsupportedConstruct {
        backend: &'static str,
        construct: String,
    },

    /// A method was attached to a model name that was never declared.
    #[error("no model with name \"{model}\" found for method `{method}`")]
    BrokenReference { model: String, method: String },

    /// Missing or malformed construction argument.
    #[error("{backend}: {message}")]
    Configuration {
        backend: &'static str,
        message: String,
    },

    #[error("invalid fact suite: {message}")]
    InvalidSuite { message: String },

    #[error("failed to write `{}`: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("block {block} was not issued by this builder")]
    InvalidBlock { block: BlockId },
}

impl CodegenError {
    pub fn unsupported(backend: &'static str, construct: impl Into<String>) -> Self {
        CodegenError::UnsupportedConstruct {
            backend,
            construct: construct.into(),
        }
    }

    pub fn missing_argument(backend: &'static str, argument: &str) -> Self {
        CodegenError::Configuration {
            backend,
            message: format!("missing required argument `{argument}`"),
        }
    }

    pub fn configuration(backend: &'static str, message: impl Into<String>) -> Self {
        CodegenError::Configuration {
            backend,
            message: message.into(),
        }
    }

    pub fn invalid_suite(message: impl Into<String>) -> Self {
        CodegenError::InvalidSuite {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CodegenError::UnsupportedConstruct { .. } => ErrorCode::E1001,
            CodegenError::BrokenReference { .. } => ErrorCode::E1002,
            CodegenError::Configuration { .. } => ErrorCode::E1003,
            CodegenError::InvalidSuite { .. } => ErrorCode::E2001,
            CodegenError::Output { .. } => ErrorCode::E3001,
            CodegenError::InvalidBlock { .. } => ErrorCode::E9001,
        }
    }
}
