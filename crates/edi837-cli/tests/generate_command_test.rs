use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_edi837") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("edi837{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_edi837 is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn testdata_path(path: &str) -> PathBuf {
    repo_root().join(path)
}

fn run(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run edi837")
}

fn assert_exit_code(output: &Output, expected: i32) {
    let actual = output.status.code().unwrap_or(-1);
    assert_eq!(
        actual,
        expected,
        "unexpected exit code; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn edi_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("output dir should exist")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "edi"))
        .collect();
    files.sort();
    files
}

#[test]
fn generate_bare_data_writes_edi_file() {
    let out = TempDir::new().unwrap();
    let input = testdata_path("testdata/claims/837p_minimal.json");
    let output = run(&[
        "generate",
        input.to_str().unwrap(),
        "-t",
        "837P",
        "-o",
        out.path().to_str().unwrap(),
    ]);

    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("EDI file generated: 837P_"), "{stdout}");
    assert!(!stdout.contains("Warning"));

    let files = edi_files(out.path());
    assert_eq!(files.len(), 1);
    let text = fs::read_to_string(&files[0]).unwrap();
    assert!(text.starts_with("ISA*"));
    assert!(text.ends_with("IEA*1*000000001~"));
}

#[test]
fn generate_request_file_uses_its_variant() {
    let out = TempDir::new().unwrap();
    let data = fs::read_to_string(testdata_path("testdata/claims/837i_minimal.json")).unwrap();
    let input = out.path().join("request.json");
    fs::write(
        &input,
        format!(r#"{{ "variant": "TYPE_B", "data": {data}, "envelope": {{ "ISA06": "HOSP01" }} }}"#),
    )
    .unwrap();
    let target = out.path().join("edi");

    let output = run(&[
        "generate",
        input.to_str().unwrap(),
        "--output-dir",
        target.to_str().unwrap(),
    ]);

    assert_exit_code(&output, 0);
    let files = edi_files(&target);
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("837I_"), "{name}");
    let text = fs::read_to_string(&files[0]).unwrap();
    assert!(text.contains("*HOSP01         *"));
    assert!(text.contains("*005010X223A2~"));
}

#[test]
fn generate_reports_warnings_but_succeeds() {
    let out = TempDir::new().unwrap();
    let input = out.path().join("partial.json");
    fs::write(&input, r#"{ "2300": { "CLM01": "CLM001", "CLM05": "11" } }"#).unwrap();

    let output = run(&[
        "generate",
        input.to_str().unwrap(),
        "-t",
        "837P",
        "-o",
        out.path().to_str().unwrap(),
    ]);

    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation warning(s).)"), "{stdout}");
    assert!(
        stdout.contains("  Warning: Loop 2300: Required CLM02 (Total Claim Charge Amount) is missing."),
        "{stdout}"
    );
    assert_eq!(edi_files(out.path()).len(), 1);
}

#[test]
fn generate_unknown_type_fails_without_file() {
    let out = TempDir::new().unwrap();
    let input = testdata_path("testdata/claims/837p_minimal.json");
    let output = run(&[
        "generate",
        input.to_str().unwrap(),
        "-t",
        "837X",
        "-o",
        out.path().to_str().unwrap(),
    ]);

    assert_exit_code(&output, 1);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Invalid claim type."), "{stdout}");
    assert!(stderr.contains("Invalid claim type: 837X. Use 837P or 837I."), "{stderr}");
    assert!(edi_files(out.path()).is_empty());
}

#[test]
fn generate_to_stdout_prints_document() {
    let input = testdata_path("testdata/claims/837p_minimal.json");
    let output = run(&["generate", input.to_str().unwrap(), "-t", "837p", "--stdout"]);

    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ISA*"));
    assert_eq!(stdout.matches("CLM*").count(), 1);
    assert!(stdout.trim_end().ends_with("IEA*1*000000001~"));
}

#[test]
fn generate_applies_config_file() {
    let out = TempDir::new().unwrap();
    let config = out.path().join("edi837.yaml");
    let target = out.path().join("from-config");
    fs::write(
        &config,
        format!(
            "output_dir: {}\nstrict: true\nenvelope:\n  ISA08: PAYER99\n  ISA15: P\n",
            target.display()
        ),
    )
    .unwrap();
    let input = out.path().join("extra.json");
    let data = fs::read_to_string(testdata_path("testdata/claims/837p_minimal.json")).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&data).unwrap();
    value["9000"] = serde_json::json!({ "X01": "1" });
    fs::write(&input, value.to_string()).unwrap();

    let output = run(&[
        "-c",
        config.to_str().unwrap(),
        "generate",
        input.to_str().unwrap(),
        "-t",
        "837P",
    ]);

    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Warning: Loop 9000 is not declared for 837P and was ignored."),
        "{stdout}"
    );
    let files = edi_files(&target);
    assert_eq!(files.len(), 1);
    let text = fs::read_to_string(&files[0]).unwrap();
    assert!(text.contains("*PAYER99        *"));
    assert!(text.contains("*0*P*:~"));
}
