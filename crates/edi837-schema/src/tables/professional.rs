//! 837P (Professional) loops

use super::{COB_LOOP, el, segment};
use crate::model::LoopDefinition;

/// Professional claim loops in emission order
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
                    el("NM101", "Entity Identifier (41=Submitter)", true, "Use 41").code(),
                    el("NM102", "Entity Type (1=Person, 2=Non-Person)", true, "1 or 2").code(),
                    el("NM103", "Submitter Last/Org Name", true, ""),
                    el("NM104", "Submitter First Name", false, ""),
                    el("NM108", "ID Code Qualifier (46=EIN)", false, "46 for EIN").code(),
                    el("NM109", "Submitter EIN/NPI", false, "9-digit EIN"),
                ]
            ),
            segment!(
                "PER",
                "Submitter Contact",
                [
                    el("PER01", "Contact Function (IC=Info Contact)", true, "IC").code(),
                    el("PER02", "Contact Name", false, ""),
                    el("PER03", "Comm Qualifier (TE=Telephone)", false, "TE").code(),
                    el("PER04", "Contact Number", false, ""),
                ]
            ),
        ],
    },
    LoopDefinition {
        loop_id: "1000B",
        name: "Receiver Information",
        description: "Identifies the receiver (payer/clearinghouse).",
        repeatable: false,
        mandatory: true,
        segments: &[segment!(
            "NM1",
            "Receiver Name",
            [
                el("NM101", "Entity Identifier (40=Receiver)", true, "40").code(),
                el("NM102", "Entity Type (1=Person, 2=Non-Person)", true, "2").code(),
                el("NM103", "Receiver Name", true, "Payer or clearinghouse name"),
                el("NM108", "ID Code Qualifier (46=EIN)", false, "46").code(),
                el("NM109", "Receiver EIN", false, ""),
            ]
        )],
    },
    LoopDefinition {
        loop_id: "2000A",
        name: "Billing Provider Hierarchy",
        description: "Billing provider and pay-to provider information.",
        repeatable: false,
        mandatory: true,
        segments: &[
            segment!(
                "HL",
                "Hierarchical Level",
                [
                    el("HL01", "Parent ID", true, "0 for top level"),
                    el("HL02", "ID", true, "1"),
                    el("HL03", "Level (20=Billing Provider)", true, "20").code(),
                ]
            ),
            segment!(
                "NM1",
                "Billing Provider Name",
                [
                    el("NM101", "Entity Identifier (85=Billing Provider)", true, "85").code(),
                    el("NM102", "Entity Type", true, "1 or 2").code(),
                    el("NM103", "Provider Last/Org Name", true, ""),
                    el("NM104", "Provider First Name", false, ""),
                    el("NM108", "ID Qualifier (XX=NPI)", true, "XX").code(),
                    el("NM109", "National Provider Identifier (NPI)", true, "10 digits"),
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
                    el("N402", "State (2-letter)", true, "").code(),
                    el("N403", "ZIP", true, "5 or 9 digits"),
                ]
            ),
        ],
    },
    LoopDefinition {
        loop_id: "2000B",
        name: "Subscriber Information",
        description: "Subscriber (insured) demographic and insurance info.",
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
                    el("SBR01", "Payer Responsibility (P=Primary)", true, "P, S, or T").code(),
                    el("SBR02", "Individual Relationship (18=Self)", false, "18=Self").code(),
                    el("SBR03", "Group Policy Number", false, ""),
                    el("SBR09", "Claim Filing Code", true, "e.g. 11=Other, 12=Medicare").code(),
                ]
            ),
            segment!(
                "NM1",
                "Subscriber Name",
                [
                    el("NM101", "Entity Identifier (IL=Insured)", true, "IL").code(),
                    el("NM102", "Entity Type", true, "1 or 2").code(),
                    el("NM103", "Subscriber Last Name", true, ""),
                    el("NM104", "Subscriber First Name", false, ""),
                    el("NM108", "ID Qualifier (MI=Member ID)", false, "MI").code(),
                    el("NM109", "Subscriber ID (Member ID)", true, ""),
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
                    el("DMG01", "Date Time Qualifier (D8=Date)", true, "D8").code(),
                    el("DMG02", "Date of Birth (YYYYMMDD)", true, ""),
                    el("DMG03", "Gender (F/M/U)", false, "F, M, or U").code(),
                ]
            ),
        ],
    },
    LoopDefinition {
        loop_id: "2000C",
        name: "Patient Information",
        description: "Patient (if different from subscriber).",
        repeatable: false,
        mandatory: false,
        segments: &[
            segment!(
                "HL",
                "Hierarchical Level",
                [
                    el("HL01", "Parent ID", true, "2"),
                    el("HL02", "ID", true, "3"),
                    el("HL03", "Level (23=Dependent)", true, "23").code(),
                ]
            ),
            segment!(
                "PAT",
                "Patient Info",
                [el("PAT01", "Individual Relationship (01=Spouse, 19=Child)", false, "01, 19, 20, etc.").code()]
            ),
            segment!(
                "NM1",
                "Patient Name",
                [
                    el("NM101", "Entity Identifier (QC=Patient)", true, "QC").code(),
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
        name: "Claim Information",
        description: "Claim-level data (dates, diagnosis, charges).",
        repeatable: false,
        mandatory: true,
        segments: &[
            segment!(
                "CLM",
                "Claim",
                [
                    el("CLM01", "Patient Control Number", true, "Unique claim ID"),
                    el("CLM02", "Total Claim Charge Amount", true, "Total charges").amount(),
                    el("CLM05", "Place of Service Code", true, "2-digit POS code").code(),
                    el("CLM06", "Claim Type (B=Medical, A=Accident)", false, "B or A").code(),
                    el("CLM09", "Claim Filing Code", false, "11, 12, etc.").code(),
                    el("CLM11", "Provider or Supplier Signature (Y/N)", false, "Y").code(),
                ]
            ),
            segment!(
                "DTP",
                "Date of Service",
                [
                    el("DTP01", "Date Qualifier (431=Onset)", true, "431 or 472").code(),
                    el("DTP02", "Date Format (D8=YYYYMMDD)", true, "D8").code(),
                    el("DTP03", "Service Date (YYYYMMDD)", true, "").date(),
                ]
            ),
            segment!(
                "HI",
                "Diagnosis Codes",
                [
                    el("HI01", "Code List Qualifier (ABK=ICD-10)", true, "ABK, BF=ICD-9").code(),
                    el("HI02", "Diagnosis Code 1", true, "ICD-10 code").code(),
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
        name: "Service Line",
        description: "Line-level service and charge (repeat for each line).",
        repeatable: true,
        mandatory: false,
        segments: &[
            segment!(
                "LX",
                "Service Line Number",
                [el("LX01", "Assigned Number", true, "1, 2, 3...")]
            ),
            segment!(
                "SV1",
                "Professional Service",
                [
                    el("SV101", "Product/Service ID Qualifier (HC=HCPCS)", true, "HC").code(),
                    el("SV102", "Procedure Code (HCPCS/CPT)", true, "").code(),
                    el("SV103", "Line Charge Amount", true, "").amount(),
                    el("SV104", "Unit or Basis (UN=Unit)", true, "UN").code(),
                    el("SV105", "Service Unit Count", true, "1 or quantity"),
                ]
            ),
            segment!(
                "DTP",
                "Service Date",
                [
                    el("DTP01", "Date Qualifier (472=Service)", true, "472").code(),
                    el("DTP02", "Date Format (D8)", true, "D8").code(),
                    el("DTP03", "Date (YYYYMMDD)", true, "").date(),
                ]
            ),
        ],
    },
];
