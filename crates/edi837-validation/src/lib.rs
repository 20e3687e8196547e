#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi837-validation
//!
//! Advisory validation of 837 claim data against the loop schema.
//!
//! Findings never block generation. They are returned as [`Deficiency`]
//! values whose rendered text follows a fixed grammar that form
//! collaborators parse back with [`parse_deficiency`].
//!
//! ## Example Usage
//!
//! ```rust
//! use edi837_ir::{ClaimData, Record};
//! use edi837_schema::Variant;
//! use edi837_validation::ValidationEngine;
//!
//! let data = ClaimData::new().with_loop("2300", Record::new().with("CLM01", "CLM001"));
//! let report = ValidationEngine::new().validate(Variant::Professional, &data);
//!
//! assert!(report
//!     .messages()
//!     .contains(&"Loop 2300: Required CLM02 (Total Claim Charge Amount) is missing.".to_string()));
//! ```

pub mod engine;
pub mod reporter;

pub use engine::{
    StrictnessLevel, ValidationConfig, ValidationEngine, check_mandatory_loops,
    check_undeclared_loops, validate,
};
pub use reporter::{Deficiency, DeficiencyRef, ValidationReport, parse_deficiency};
