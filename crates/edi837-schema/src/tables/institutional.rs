//! 837I (Institutional) loops

use super::{COB_LOOP, el, segment};
use crate::model::LoopDefinition;

/// Institutional claim loops in emission order
pub static LOOPS: &[LoopDefinition] = &[
    LoopDefinition {
        loop_id: "1000A",
        name: "Submitter Information",
        description: "Identifies the entity submitting the claim.",
        repeatable: false,
        mandatory: true,
        segments: &[
            segment!(
                "NM1",
                "Submitter Name",
                [
                    el("NM101", "Entity Identifier (41=Submitter)", true, "41").code(),
                    el("NM102", "Entity Type (1=Person, 2=Non-Person)", true, "1 or 2").code(),
                    el("NM103", "Submitter Last/Org Name", true, ""),
                    el("NM104", "Submitter First Name", false, ""),
                    el("NM108", "ID Code Qualifier (46=EIN)", false, "46").code(),
                    el("NM109", "Submitter EIN", false, ""),
                ]
            ),
            segment!(
                "PER",
                "Submitter Contact",
                [
                    el("PER01", "Contact Function (IC)", true, "IC").code(),
                    el("PER02", "Contact Name", false, ""),
                    el("PER03", "Comm Qualifier (TE)", false, "TE").code(),
                    el("PER04", "Contact Number", false, ""),
                ]
            ),
        ],
    },
    LoopDefinition {
        loop_id: "1000B",
        name: "Receiver Information",
        description: "Identifies the receiver (payer).",
        repeatable: false,
        mandatory: true,
        segments: &[segment!(
            "NM1",
            "Receiver Name",
            [
                el("NM101", "Entity Identifier (40=Receiver)", true, "40").code(),
                el("NM102", "Entity Type", true, "2").code(),
                el("NM103", "Receiver Name", true, ""),
                el("NM108", "ID Code Qualifier", false, "46").code(),
                el("NM109", "Receiver EIN", false, ""),
            ]
        )],
    },
    LoopDefinition {
        loop_id: "2000A",
        name: "Billing Provider",
        description: "Billing provider hierarchy.",
        repeatable: false,
        mandatory: true,
        segments: &[
            segment!(
                "HL",
                "Hierarchical Level",
                [
                    el("HL01", "Parent ID", true, "0"),
                    el("HL02", "ID", true, "1"),
                    el("HL03", "Level (20=Billing Provider)", true, "20").code(),
                ]
            ),
            segment!(
                "NM1",
                "Billing Provider Name",
                [
                    el("NM101", "Entity Identifier (85)", true, "85").code(),
                    el("NM102", "Entity Type", true, "2").code(),
                    el("NM103", "Provider Name", true, ""),
                    el("NM108", "ID Qualifier (XX=NPI)", true, "XX").code(),
                    el("NM109", "NPI (10 digits)", true, ""),
                ]
            ),
            segment!(
                "N3",
                "Provider Address",
                [
                    el("N301", "Address Line 1", true, ""),
                    el("N302", "Address Line 2", false, ""),
                ]
            ),
            segment!(
                "N4",
                "Provider City/State/ZIP",
                [
                    el("N401", "City", true, ""),
                    el("N402", "State", true, "").code(),
                    el("N403", "ZIP", true, ""),
                ]
            ),
        ],
    },
    LoopDefinition {
        loop_id: "2000B",
        name: "Subscriber Information",
        description: "Subscriber (insured) information.",
        repeatable: false,
        mandatory: true,
        segments: &[
            segment!(
                "HL",
                "Hierarchical Level",
                [
                    el("HL01", "Parent ID", true, "1"),
                    el("HL02", "ID", true, "2"),
                    el("HL03", "Level (22=Subscriber)", true, "22").code(),
                ]
            ),
            segment!(
                "SBR",
                "Subscriber Info",
                [
                    el("SBR01", "Payer Responsibility (P/S/T)", true, "P").code(),
                    el("SBR02", "Individual Relationship", false, "18=Self").code(),
                    el("SBR03", "Group Policy Number", false, ""),
                    el("SBR09", "Claim Filing Code", true, "11, 12, etc.").code(),
                ]
            ),
            segment!(
                "NM1",
                "Subscriber Name",
                [
                    el("NM101", "Entity Identifier (IL)", true, "IL").code(),
                    el("NM102", "Entity Type", true, "1 or 2").code(),
                    el("NM103", "Subscriber Last Name", true, ""),
                    el("NM104", "Subscriber First Name", false, ""),
                    el("NM108", "ID Qualifier (MI)", false, "MI").code(),
                    el("NM109", "Subscriber ID", true, ""),
                ]
            ),
            segment!(
                "N3",
                "Subscriber Address",
                [
                    el("N301", "Address Line 1", false, ""),
                    el("N302", "Address Line 2", false, ""),
                ]
            ),
            segment!(
                "N4",
                "Subscriber City/State/ZIP",
                [
                    el("N401", "City", false, ""),
                    el("N402", "State", false, "").code(),
                    el("N403", "ZIP", false, ""),
                ]
            ),
            segment!(
                "DMG",
                "Subscriber Demographics",
                [
                    el("DMG01", "Date Time Qualifier (D8)", true, "D8").code(),
                    el("DMG02", "Date of Birth (YYYYMMDD)", true, ""),
                    el("DMG03", "Gender (F/M/U)", false, "").code(),
                ]
            ),
        ],
    },
    LoopDefinition {
        loop_id: "2000C",
        name: "Patient Information",
        description: "Patient demographic information.",
        repeatable: false,
        mandatory: false,
        segments: &[
            segment!(
                "HL",
                "Hierarchical Level",
                [
                    el("HL01", "Parent ID", true, "2"),
                    el("HL02", "ID", true, "3"),
                    el("HL03", "Level (23=Patient)", true, "23").code(),
                ]
            ),
            segment!(
                "PAT",
                "Patient Info",
                [el("PAT01", "Individual Relationship", false, "01, 19, 20").code()]
            ),
            segment!(
                "NM1",
                "Patient Name",
                [
                    el("NM101", "Entity Identifier (QC)", true, "QC").code(),
                    el("NM102", "Entity Type", true, "1").code(),
                    el("NM103", "Patient Last Name", true, ""),
                    el("NM104", "Patient First Name", false, ""),
                    el("NM108", "ID Qualifier", false, "").code(),
                    el("NM109", "Patient ID", false, ""),
                ]
            ),
            segment!(
                "DMG",
                "Patient Demographics",
                [
                    el("DMG01", "Date Time Qualifier (D8)", true, "D8").code(),
                    el("DMG02", "Date of Birth (YYYYMMDD)", true, ""),
                    el("DMG03", "Gender (F/M/U)", false, "").code(),
                ]
            ),
        ],
    },
    LoopDefinition {
        loop_id: "2300",
        name: "Claim Information (Institutional)",
        description: "Claim-level data including type of bill and statement dates.",
        repeatable: false,
        mandatory: true,
        segments: &[
            segment!(
                "CLM",
                "Claim",
                [
                    el("CLM01", "Patient Control Number", true, ""),
                    el("CLM02", "Total Claim Charge Amount", true, "").amount(),
                    el("CLM05", "Type of Bill (TOB)", true, "3-digit (e.g. 011x)").code(),
                    el("CLM06", "Claim Type", false, "A or B").code(),
                    el("CLM07", "Assignment (Y/N)", false, "Y").code(),
                    el("CLM08", "Benefits Assignment (Y/N)", false, "Y").code(),
                    el("CLM11", "Provider Signature (Y/N)", false, "Y").code(),
                ]
            ),
            segment!(
                "DTP",
                "Statement Date",
                [
                    el("DTP01", "Date Qualifier (434=Admission)", true, "434 or 435").code(),
                    el("DTP02", "Date Format (D8)", true, "D8").code(),
                    el("DTP03", "Date (YYYYMMDD)", true, "").date(),
                ]
            ),
            segment!(
                "DTP",
                "Discharge Date",
                [
                    el("DTP01_2", "Date Qualifier (096=Discharge)", true, "096").code(),
                    el("DTP02_2", "Date Format (D8)", true, "D8").code(),
                    el("DTP03_2", "Discharge Date (YYYYMMDD)", true, "").date(),
                ]
            ),
            segment!(
                "HI",
                "Diagnosis Codes",
                [
                    el("HI01", "Code List Qualifier (ABK=ICD-10)", true, "ABK or BF").code(),
                    el("HI02", "Diagnosis Code 1", true, "").code(),
                    el("HI03", "Code 2", false, "").code(),
                    el("HI04", "Code 3", false, "").code(),
                    el("HI05", "Code 4", false, "").code(),
                ]
            ),
        ],
    },
    COB_LOOP,
    LoopDefinition {
        loop_id: "2400",
        name: "Service Line (Institutional)",
        description: "Revenue code and charge per line (repeatable).",
        repeatable: true,
        mandatory: false,
        segments: &[
            segment!(
                "LX",
                "Service Line Number",
                [el("LX01", "Assigned Number", true, "1, 2, 3...")]
            ),
            segment!(
                "SV2",
                "Institutional Service",
                [
                    el("SV201", "Revenue Code", true, "3-digit revenue code").code(),
                    el("SV202", "Line Charge Amount", true, "").amount(),
                    el("SV203", "Unit or Basis (UN=Unit)", true, "UN").code(),
                    el("SV204", "Service Unit Count", true, "1 or quantity"),
                ]
            ),
            segment!(
                "DTP",
                "Service Date",
                [
                    el("DTP01", "Date Qualifier (472)", true, "472").code(),
                    el("DTP02", "Date Format (D8)", true, "D8").code(),
                    el("DTP03", "Date (YYYYMMDD)", true, "").date(),
                ]
            ),
        ],
    },
];
