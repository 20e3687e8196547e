//! Static loop tables for the supported variants
//!
//! Reference guides: ASC X12N 005010X222A1 (837P) and 005010X223A2 (837I).

pub mod institutional;
pub mod professional;

use crate::model::{ElementDefinition, LoopDefinition};

const fn el(
    id: &'static str,
    label: &'static str,
    required: bool,
    help: &'static str,
) -> ElementDefinition {
    ElementDefinition::new(id, label, required, help)
}

/// Segment definition literal; expands to a struct literal so the element
/// slice is promoted to `'static`.
macro_rules! segment {
    ($seg_id:literal, $name:literal, [$($element:expr),* $(,)?]) => {
        $crate::model::SegmentDefinition {
            seg_id: $seg_id,
            name: $name,
            elements: &[$($element),*],
        }
    };
}
pub(crate) use segment;

/// Coordination of benefits; identical in both variants and entirely optional.
const COB_LOOP: LoopDefinition = LoopDefinition {
    loop_id: "2320",
    name: "COB (Coordination of Benefits)",
    description: "Optional. Other payer / coordination of benefits information. Include only when COB applies.",
    repeatable: false,
    mandatory: false,
    segments: &[
        segment!(
            "SBR",
            "Other Subscriber Information",
            [
                el("SBR01", "Payer Responsibility (P=Primary, S=Secondary, T=Tertiary)", false, "P, S, or T").code(),
                el("SBR02", "Individual Relationship Code (18=Self, 01=Spouse)", false, "").code(),
                el("SBR03", "Group Policy Number", false, ""),
                el("SBR04", "Group or Policy Number", false, ""),
                el("SBR09", "Claim Filing Code (11=Other, 12=Medicare)", false, "11, 12, etc.").code(),
            ]
        ),
        segment!(
            "AMT",
            "COB Amount (e.g. Paid / Allowed)",
            [
                el("AMT01", "Amount Qualifier (D=Amount Paid, B6=Allowed)", false, "D or B6").code(),
                el("AMT02", "Amount", false, "Numeric amount").amount(),
            ]
        ),
        segment!(
            "OI",
            "Other Insurance Coverage",
            [
                el("OI01", "Benefits Assignment (Y/N)", false, "Y or N").code(),
                el("OI02", "Release of Information (Y/N)", false, "Y or N").code(),
                el("OI03", "Provider Accept Assignment (Y/N)", false, "Y or N").code(),
            ]
        ),
        segment!(
            "REF",
            "Other Payer Reference",
            [
                el("REF01", "Reference Qualifier (1L=Group, 17=Member ID)", false, "1L or 17").code(),
                el("REF02", "Reference Identifier", false, "Other payer ID or group number"),
            ]
        ),
    ],
};
