#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi837-schema
//!
//! Loop, segment, and element schema for 837 claims.
//!
//! Two variants are supported, Professional (837P) and Institutional (837I).
//! Each is an ordered table of loops; each loop an ordered list of segments;
//! each segment an ordered list of elements. Tables are static data, shared
//! freely across threads.

pub mod model;
pub mod registry;
mod tables;

pub use model::{ElementDefinition, ElementFormat, LoopDefinition, SegmentDefinition};
pub use registry::{SchemaRegistry, Variant, get_loops, loops_for};

use thiserror::Error;

/// Errors that can occur when working with schemas
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown claim type '{0}': expected 837P or 837I")]
    UnknownVariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
