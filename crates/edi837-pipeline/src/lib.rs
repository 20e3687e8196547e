#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi837-pipeline
//!
//! Claim file generation.
//!
//! This crate wraps the serializer with persistence: it resolves the
//! variant, builds and validates the document, and writes it to a
//! timestamped `.edi` file, reporting the outcome in the shape form
//! collaborators expect.

pub mod generator;

pub use generator::{ClaimFileGenerator, GenerationOutcome, PipelineConfig};

use thiserror::Error;

/// Errors that can occur in the pipeline
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("IO error during {operation} for '{path}': {message}")]
    Io {
        operation: String,
        path: String,
        message: String,
    },

    #[error("No free file name for '{0}'")]
    NameExhausted(String),
}

impl Error {
    /// Create a structured I/O error with operation/path context.
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("io", "<unknown>", e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
