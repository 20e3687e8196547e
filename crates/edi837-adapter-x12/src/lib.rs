//! # edi837-adapter-x12
//!
//! X12 837 serializer and envelope handling.
//!
//! This crate turns validated claim data into delimiter-separated X12 text
//! wrapped in an ISA/GS/ST envelope, and provides the trailer-count
//! post-pass for documents edited after generation.

pub mod envelopes;
pub mod serializer;
pub mod syntax;

pub use serializer::{
    BuildOutput, TransactionCount, X12Serializer, generate_document, recount_transaction_trailer,
    transaction_segment_count,
};
pub use syntax::{Segment, format_date};

use thiserror::Error;

/// Errors that can occur when serializing 837 documents
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] edi837_schema::Error),

    #[error("Envelope error: {0}")]
    Envelope(String),
}

pub type Result<T> = std::result::Result<T, Error>;
