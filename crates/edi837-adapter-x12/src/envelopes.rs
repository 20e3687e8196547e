//! X12 envelope handling (ISA/IEA, GS/GE, ST/SE, BHT)
//!
//! This module builds the typed envelope segments for a single-transaction
//! interchange and renders them as [`Segment`] values.

use crate::syntax::{Delimiters, Segment, sanitize};
use chrono::NaiveDateTime;
use edi837_ir::EnvelopeContext;
use edi837_schema::Variant;

/// Transaction set control number (ST02/SE02)
pub const TRANSACTION_CONTROL_NUMBER: &str = "0001";
/// Functional group control number (GS06/GE02)
pub const GROUP_CONTROL_NUMBER: &str = "1";
/// Interchange control number echoed by IEA02
pub const INTERCHANGE_CONTROL_NUMBER: &str = "000000001";
/// BHT03 reference used when none is supplied
pub const DEFAULT_BHT_REFERENCE: &str = "0000000001";

// ============================================================================
// Interchange
// ============================================================================

/// ISA - Interchange Control Header
///
/// Every field except the two separators is fixed width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsaSegment {
    /// ISA01 (2)
    pub authorization_qualifier: String,
    /// ISA02 (10)
    pub authorization_info: String,
    /// ISA03 (2)
    pub security_qualifier: String,
    /// ISA04 (10)
    pub security_info: String,
    /// ISA05 (2)
    pub sender_qualifier: String,
    /// ISA06 (15)
    pub sender_id: String,
    /// ISA07 (2)
    pub receiver_qualifier: String,
    /// ISA08 (15)
    pub receiver_id: String,
    /// ISA09, `YYMMDD`
    pub date: String,
    /// ISA10, `HHMM`
    pub time: String,
    /// ISA11
    pub repetition_separator: char,
    /// ISA12 (5)
    pub version: String,
    /// ISA13 (9, right-justified)
    pub control_number: String,
    /// ISA14 (1)
    pub ack_requested: String,
    /// ISA15 (1), `T` test or `P` production
    pub usage_indicator: String,
    /// ISA16
    pub component_separator: char,
}

impl IsaSegment {
    /// Build from the envelope context, falling back to defaults for blank fields
    ///
    /// Values are sanitized before padding so delimiter characters cannot
    /// leak into fixed-width fields. Date and time always come from the
    /// timestamp. The separators are the effective ones in `delimiters`.
    pub fn from_context(
        context: &EnvelopeContext,
        delimiters: &Delimiters,
        timestamp: NaiveDateTime,
    ) -> Self {
        let field = |id: &str, default: &str| {
            let value = sanitize(context.value(id), delimiters);
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        };
        let default_control = timestamp.format("%y%m%d%H%M").to_string();
        let default_control: String = default_control.chars().take(9).collect();

        Self {
            authorization_qualifier: left_justify(&field("ISA01", "00"), 2),
            authorization_info: left_justify(&field("ISA02", ""), 10),
            security_qualifier: left_justify(&field("ISA03", "00"), 2),
            security_info: left_justify(&field("ISA04", ""), 10),
            sender_qualifier: left_justify(&field("ISA05", "01"), 2),
            sender_id: left_justify(&field("ISA06", "SENDER"), 15),
            receiver_qualifier: left_justify(&field("ISA07", "01"), 2),
            receiver_id: left_justify(&field("ISA08", "RECEIVER"), 15),
            date: timestamp.format("%y%m%d").to_string(),
            time: timestamp.format("%H%M").to_string(),
            repetition_separator: delimiters.repetition,
            version: left_justify(&field("ISA12", "00501"), 5),
            control_number: right_justify(&field("ISA13", &default_control), 9),
            ack_requested: truncate(&field("ISA14", "0"), 1),
            usage_indicator: truncate(&field("ISA15", "T"), 1),
            component_separator: delimiters.component,
        }
    }

    pub fn generate(&self) -> Segment {
        Segment::new(
            "ISA",
            vec![
                self.authorization_qualifier.clone(),
                self.authorization_info.clone(),
                self.security_qualifier.clone(),
                self.security_info.clone(),
                self.sender_qualifier.clone(),
                self.sender_id.clone(),
                self.receiver_qualifier.clone(),
                self.receiver_id.clone(),
                self.date.clone(),
                self.time.clone(),
                self.repetition_separator.to_string(),
                self.version.clone(),
                self.control_number.clone(),
                self.ack_requested.clone(),
                self.usage_indicator.clone(),
                self.component_separator.to_string(),
            ],
        )
    }
}

/// IEA - Interchange Control Trailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IeaSegment {
    /// Number of functional groups
    pub group_count: usize,
    pub control_number: String,
}

impl Default for IeaSegment {
    fn default() -> Self {
        Self {
            group_count: 1,
            control_number: INTERCHANGE_CONTROL_NUMBER.to_string(),
        }
    }
}

impl IeaSegment {
    pub fn generate(&self) -> Segment {
        Segment::new(
            "IEA",
            vec![self.group_count.to_string(), self.control_number.clone()],
        )
    }
}

// ============================================================================
// Functional group
// ============================================================================

/// GS - Functional Group Header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsSegment {
    /// GS01, `HC` for health care claims
    pub functional_id: String,
    pub sender_code: String,
    pub receiver_code: String,
    /// GS04, `CCYYMMDD`
    pub date: String,
    /// GS05, `HHMM`
    pub time: String,
    pub control_number: String,
    /// GS07, `X` for ASC X12
    pub agency: String,
    /// GS08, implementation guide version of the variant
    pub version: String,
}

impl GsSegment {
    pub fn from_context(variant: Variant, timestamp: NaiveDateTime) -> Self {
        Self {
            functional_id: "HC".to_string(),
            sender_code: "SENDER".to_string(),
            receiver_code: "RECEIVER".to_string(),
            date: timestamp.format("%Y%m%d").to_string(),
            time: timestamp.format("%H%M").to_string(),
            control_number: GROUP_CONTROL_NUMBER.to_string(),
            agency: "X".to_string(),
            version: variant.functional_group_version().to_string(),
        }
    }

    pub fn generate(&self) -> Segment {
        Segment::new(
            "GS",
            vec![
                self.functional_id.clone(),
                self.sender_code.clone(),
                self.receiver_code.clone(),
                self.date.clone(),
                self.time.clone(),
                self.control_number.clone(),
                self.agency.clone(),
                self.version.clone(),
            ],
        )
    }
}

/// GE - Functional Group Trailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeSegment {
    /// Number of transaction sets in the group
    pub transaction_count: usize,
    /// Must match GS06
    pub control_number: String,
}

impl Default for GeSegment {
    fn default() -> Self {
        Self {
            transaction_count: 1,
            control_number: GROUP_CONTROL_NUMBER.to_string(),
        }
    }
}

impl GeSegment {
    pub fn generate(&self) -> Segment {
        Segment::new(
            "GE",
            vec![self.transaction_count.to_string(), self.control_number.clone()],
        )
    }
}

// ============================================================================
// Transaction set
// ============================================================================

/// ST - Transaction Set Header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StSegment {
    /// ST01, always `837`
    pub transaction_set_id: String,
    pub control_number: String,
    /// ST03, implementation convention reference of the variant
    pub implementation_ref: String,
}

impl StSegment {
    pub fn from_context(variant: Variant) -> Self {
        Self {
            transaction_set_id: "837".to_string(),
            control_number: TRANSACTION_CONTROL_NUMBER.to_string(),
            implementation_ref: variant.implementation_guide().to_string(),
        }
    }

    pub fn generate(&self) -> Segment {
        Segment::new(
            "ST",
            vec![
                self.transaction_set_id.clone(),
                self.control_number.clone(),
                self.implementation_ref.clone(),
            ],
        )
    }
}

/// BHT - Beginning of Hierarchical Transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BhtSegment {
    /// BHT01, `0019` information source/subscriber/dependent structure
    pub structure_code: String,
    /// BHT02, `00` original
    pub purpose_code: String,
    /// BHT03, originator reference
    pub reference: String,
    pub date: String,
    pub time: String,
    /// BHT06, `CH` chargeable
    pub transaction_type: String,
}

impl BhtSegment {
    pub fn from_context(
        context: &EnvelopeContext,
        delimiters: &Delimiters,
        timestamp: NaiveDateTime,
    ) -> Self {
        let reference = match sanitize(context.value("BHT03"), delimiters) {
            value if value.is_empty() => DEFAULT_BHT_REFERENCE.to_string(),
            value => value,
        };
        Self {
            structure_code: "0019".to_string(),
            purpose_code: "00".to_string(),
            reference,
            date: timestamp.format("%Y%m%d").to_string(),
            time: timestamp.format("%H%M").to_string(),
            transaction_type: "CH".to_string(),
        }
    }

    pub fn generate(&self) -> Segment {
        Segment::new(
            "BHT",
            vec![
                self.structure_code.clone(),
                self.purpose_code.clone(),
                self.reference.clone(),
                self.date.clone(),
                self.time.clone(),
                self.transaction_type.clone(),
            ],
        )
    }
}

/// SE - Transaction Set Trailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeSegment {
    /// Number of segments from ST through SE inclusive
    pub segment_count: usize,
    /// Must match ST02
    pub control_number: String,
}

impl SeSegment {
    pub fn new(segment_count: usize) -> Self {
        Self {
            segment_count,
            control_number: TRANSACTION_CONTROL_NUMBER.to_string(),
        }
    }

    pub fn generate(&self) -> Segment {
        Segment::new(
            "SE",
            vec![self.segment_count.to_string(), self.control_number.clone()],
        )
    }
}

// ============================================================================
// Fixed-width helpers
// ============================================================================

fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

fn left_justify(value: &str, width: usize) -> String {
    format!("{:<width$}", truncate(value, width))
}

/// Right-justify to `width`, keeping the last `width` characters of longer values
fn right_justify(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let tail: String = value.chars().skip(len.saturating_sub(width)).collect();
    format!("{tail:>width$}")
}
