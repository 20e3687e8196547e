use std::fs;
use std::path::PathBuf;

use edi837_ir::{ClaimData, LoopData, Record};
use edi837_schema::Variant;
use edi837_validation::{
    StrictnessLevel, ValidationConfig, ValidationEngine, parse_deficiency,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn load_claim(file_name: &str) -> ClaimData {
    let path = repo_root().join(format!("testdata/claims/{file_name}"));
    let json = fs::read_to_string(&path).expect("claim fixture should load");
    ClaimData::from_json(&json).expect("claim fixture should parse")
}

#[test]
fn professional_fixture_has_no_deficiencies() {
    let data = load_claim("837p_minimal.json");
    let report = ValidationEngine::new().validate(Variant::Professional, &data);
    assert!(report.is_clean(), "unexpected deficiencies: {:?}", report.messages());
}

#[test]
fn institutional_fixture_has_no_deficiencies() {
    let data = load_claim("837i_minimal.json");
    let report = ValidationEngine::new().validate(Variant::Institutional, &data);
    assert!(report.is_clean(), "unexpected deficiencies: {:?}", report.messages());
}

#[test]
fn patient_loop_is_optional() {
    let mut data = load_claim("837p_minimal.json");
    data.remove_loop("2000C");
    let report = ValidationEngine::new().validate(Variant::Professional, &data);
    assert!(report.is_clean(), "unexpected deficiencies: {:?}", report.messages());
}

#[test]
fn null_patient_loop_is_treated_as_absent() {
    let path = repo_root().join("testdata/claims/837p_minimal.json");
    let mut json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("claim fixture should load"))
            .expect("claim fixture should be JSON");
    json["2000C"] = serde_json::Value::Null;
    json["2400"]
        .as_array_mut()
        .expect("service lines are a list")
        .push(serde_json::json!("stray"));

    let data = ClaimData::from_json(&json.to_string()).expect("null loop should parse");
    assert!(data.get("2000C").is_none());
    let report = ValidationEngine::new().validate(Variant::Professional, &data);
    assert!(report.is_clean(), "unexpected deficiencies: {:?}", report.messages());
}

#[test]
fn blank_total_charge_is_reported_with_label() {
    let mut data = load_claim("837p_minimal.json");
    if let Some(LoopData::Single(claim)) = data.get_mut("2300") {
        claim.insert("CLM02", "");
    }
    let report = ValidationEngine::new().validate(Variant::Professional, &data);
    assert_eq!(
        report.messages(),
        vec!["Loop 2300: Required CLM02 (Total Claim Charge Amount) is missing.".to_string()]
    );
}

#[test]
fn institutional_claim_checks_discharge_date() {
    let mut data = load_claim("837i_minimal.json");
    if let Some(LoopData::Single(claim)) = data.get_mut("2300") {
        claim.remove("DTP03_2");
    }
    let report = ValidationEngine::new().validate(Variant::Institutional, &data);
    let messages = report.messages();
    assert_eq!(messages.len(), 1);

    let location = parse_deficiency(&messages[0]).expect("message should parse");
    assert_eq!(location.loop_id, "2300");
    assert_eq!(location.field_key().as_deref(), Some("2300_DTP03_2"));
}

#[test]
fn professional_rules_do_not_apply_to_institutional_lines() {
    let data = load_claim("837i_minimal.json");
    let report = ValidationEngine::new().validate(Variant::Professional, &data);
    assert!(
        report
            .iter()
            .any(|d| d.loop_id() == "2400" && d.element_id() == Some("SV101"))
    );
}

#[test]
fn service_line_findings_carry_entry_index() {
    let mut data = load_claim("837p_minimal.json");
    let second_line = Record::new()
        .with("LX01", "2")
        .with("SV101", "HC")
        .with("SV103", "75.00");
    if let Some(LoopData::Repeated(lines)) = data.get_mut("2400") {
        lines.push(second_line);
    }

    let report = ValidationEngine::new().validate(Variant::Professional, &data);
    let keys: Vec<String> = report
        .messages()
        .iter()
        .filter_map(|m| parse_deficiency(m))
        .filter_map(|location| location.field_key())
        .collect();
    assert_eq!(
        keys,
        vec![
            "2400_1_SV102",
            "2400_1_SV104",
            "2400_1_SV105",
            "2400_1_DTP01",
            "2400_1_DTP02",
            "2400_1_DTP03",
        ]
    );
}

#[test]
fn empty_data_reports_every_mandatory_loop() {
    let report = ValidationEngine::new().validate(Variant::Professional, &ClaimData::new());
    let loop_level: Vec<String> = report
        .messages()
        .into_iter()
        .filter(|m| m.ends_with("is required."))
        .collect();
    assert_eq!(
        loop_level,
        vec![
            "Loop 1000A is required.",
            "Loop 1000B is required.",
            "Loop 2000A is required.",
            "Loop 2000B is required.",
            "Loop 2300 is required.",
        ]
    );
}

#[test]
fn strict_mode_notes_undeclared_loops() {
    let mut data = load_claim("837p_minimal.json");
    data.insert_loop("2310B", Record::new().with("NM101", "82"));

    let standard = ValidationEngine::new().validate(Variant::Professional, &data);
    assert!(standard.is_clean());

    let engine = ValidationEngine::with_config(ValidationConfig {
        strictness: StrictnessLevel::Strict,
    });
    let strict = engine.validate(Variant::Professional, &data);
    assert_eq!(
        strict.messages(),
        vec!["Loop 2310B is not declared for 837P and was ignored.".to_string()]
    );
}
