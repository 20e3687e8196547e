//! Variant lookup over the static loop tables

use crate::model::LoopDefinition;
use crate::tables::{institutional, professional};
use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Supported 837 document variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// 837P, physician and ambulatory claims
    Professional,
    /// 837I, hospital and facility claims
    Institutional,
}

impl Variant {
    /// Every supported variant
    pub const ALL: [Variant; 2] = [Variant::Professional, Variant::Institutional];

    /// Transaction code used on the wire and in file names
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Variant::Professional => "837P",
            Variant::Institutional => "837I",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Variant::Professional => "Professional (Physician/Ambulatory)",
            Variant::Institutional => "Institutional (Hospital/Facility)",
        }
    }

    /// Version/release identifier carried in GS08
    #[must_use]
    pub const fn functional_group_version(self) -> &'static str {
        match self {
            Variant::Professional => "005010X222A1",
            Variant::Institutional => "005010X223A2",
        }
    }

    /// Implementation guide reference carried in ST03
    #[must_use]
    pub const fn implementation_guide(self) -> &'static str {
        match self {
            Variant::Professional => "004010X098A1",
            Variant::Institutional => "004010X096A1",
        }
    }

    /// Loop table for this variant
    #[must_use]
    pub fn loops(self) -> &'static [LoopDefinition] {
        get_loops(self)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Variant {
    type Err = Error;

    /// Accepts `837P`/`837I` and the `TYPE_A`/`TYPE_B` aliases, ignoring case
    /// and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "837P" | "TYPE_A" | "PROFESSIONAL" => Ok(Variant::Professional),
            "837I" | "TYPE_B" | "INSTITUTIONAL" => Ok(Variant::Institutional),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Loop definitions for a variant, in emission order
#[must_use]
pub fn get_loops(variant: Variant) -> &'static [LoopDefinition] {
    match variant {
        Variant::Professional => professional::LOOPS,
        Variant::Institutional => institutional::LOOPS,
    }
}

/// Resolve a variant identifier and return its loop definitions
///
/// # Errors
///
/// Returns [`Error::UnknownVariant`] naming the identifier when it is not a
/// supported variant.
pub fn loops_for(identifier: &str) -> Result<&'static [LoopDefinition]> {
    let variant = identifier.parse::<Variant>()?;
    trace!(%variant, "Resolved loop table");
    Ok(get_loops(variant))
}

/// Read-only view over both variant tables
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// Create a registry view
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Get the loop table for a variant
    #[must_use]
    pub fn get(&self, variant: Variant) -> &'static [LoopDefinition] {
        get_loops(variant)
    }

    /// Resolve a variant identifier
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariant`] for unsupported identifiers.
    pub fn resolve(&self, identifier: &str) -> Result<(Variant, &'static [LoopDefinition])> {
        let variant = identifier.parse::<Variant>()?;
        Ok((variant, get_loops(variant)))
    }

    /// Check if an identifier names a supported variant
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        identifier.parse::<Variant>().is_ok()
    }

    /// Loop ids declared for a variant, in emission order
    pub fn loop_ids(&self, variant: Variant) -> impl Iterator<Item = &'static str> {
        get_loops(variant).iter().map(|l| l.loop_id)
    }

    /// Find a loop definition by id
    #[must_use]
    pub fn find_loop(&self, variant: Variant, loop_id: &str) -> Option<&'static LoopDefinition> {
        get_loops(variant).iter().find(|l| l.loop_id == loop_id)
    }
}
