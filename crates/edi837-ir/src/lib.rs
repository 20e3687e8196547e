#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi837-ir
//!
//! Input model for 837 claim generation.
//!
//! Claim data arrives as a nested mapping keyed by loop id. Each loop holds
//! either a single [`Record`] (element id to value) or, for the service-line
//! loop, an ordered list of records. Transmission metadata for the envelope
//! travels alongside as an [`EnvelopeContext`].
//!
//! The [`syntax`] module holds the delimiter set and the sanitizer applied
//! to every value before it is checked or emitted.

/// Loop-keyed claim data and envelope context.
pub mod claim;
/// Element-id keyed field records.
pub mod record;
/// Generation request and result shapes exchanged with collaborators.
pub mod request;
/// Delimiters and value sanitization shared by validation and serialization.
pub mod syntax;

/// Claim data container and its parts.
pub use claim::{ClaimData, EnvelopeContext, LoopData};
/// Single loop-instance record.
pub use record::Record;
/// Request/result contract.
pub use request::{GenerationRequest, GenerationResult};
/// Wire delimiters and the sanitizer.
pub use syntax::{Delimiters, sanitize};

use thiserror::Error;

/// Errors that can occur when reading claim input
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid claim data in {context}: {message}")]
    InvalidData { context: String, message: String },
}

impl Error {
    /// Build an invalid-data error with the input context that failed.
    pub fn invalid_data(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Crate-local result type for claim input operations.
pub type Result<T> = std::result::Result<T, Error>;
