use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("edidex"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("fixtures").join(name)
}

#[test]
fn help_supports_extract_and_alias() {
    cmd().arg("extract").arg("--help").assert().success();
    cmd().arg("extract-edids").arg("--help").assert().success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.log");

    cmd()
        .arg("extract")
        .arg(missing)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn directory_input_is_rejected() {
    let temp = TempDir::new().expect("tempdir");

    cmd()
        .arg("extract")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(contains("input is not a file"));
}

#[test]
fn log_fixture_writes_one_edid() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("viewsonic.bin");

    cmd()
        .arg("extract")
        .arg(fixture("nvidia-bug-report.log"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(
            contains("Found 1 EDID in")
                .and(contains("Wrote EDID for \"ViewSonic VPD150 (DFP-1)\""))
                .and(contains("(128 bytes).")),
        );

    let bytes = std::fs::read(&output).expect("read output");
    assert_eq!(bytes.len(), 128);
    assert_eq!(&bytes[..8], &[0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00]);
    assert_eq!(bytes[127], 0xce);
}

#[test]
fn second_run_does_not_overwrite() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("edid.bin");

    for _ in 0..2 {
        cmd()
            .arg("extract")
            .arg(fixture("nvidia-bug-report.log"))
            .arg("--output")
            .arg(&output)
            .assert()
            .success();
    }

    let suffixed = temp.path().join("edid.bin.0");
    assert!(output.exists());
    assert!(suffixed.exists());
    assert_eq!(
        std::fs::read(&output).expect("read first"),
        std::fs::read(&suffixed).expect("read second")
    );
}

#[test]
fn default_output_goes_to_working_directory() {
    let temp = TempDir::new().expect("tempdir");

    cmd()
        .current_dir(temp.path())
        .arg("extract")
        .arg(fixture("two-displays.log"))
        .assert()
        .success()
        .stdout(
            contains("Found 2 EDIDs in")
                .and(contains("Wrote EDID for \"CRT-0\" to \"./edid.bin\" (16 bytes)."))
                .and(contains(
                    "Wrote EDID for \"ViewSonic VPD150 (DFP-1)\" to \"./edid.bin.0\" (32 bytes).",
                )),
        );

    assert_eq!(
        std::fs::read(temp.path().join("edid.bin"))
            .expect("read first")
            .len(),
        16
    );
    assert_eq!(
        std::fs::read(temp.path().join("edid.bin.0"))
            .expect("read second")
            .len(),
        32
    );
}

#[test]
fn text_fixture_uses_monitor_name() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("apple.bin");

    cmd()
        .arg("extract")
        .arg(fixture("apple-studio.txt"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Wrote EDID for \"AppleStudio\"").and(contains("(128 bytes).")));

    let bytes = std::fs::read(&output).expect("read output");
    assert_eq!(bytes[127], 0x88);
}

#[test]
fn unrecognized_input_reports_zero() {
    let temp = TempDir::new().expect("tempdir");

    cmd()
        .current_dir(temp.path())
        .arg("extract")
        .arg(fixture("no-edid.log"))
        .assert()
        .success()
        .stdout(contains("Found 0 EDIDs in"));

    assert!(!temp.path().join("edid.bin").exists());
}

#[test]
fn empty_input_fails() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("empty.log");
    std::fs::write(&input, b"").expect("write empty input");

    cmd()
        .arg("extract")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(contains("is empty.").and(contains("hint:")));
}

#[test]
fn summary_is_valid_json() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("edid.bin");
    let summary = temp.path().join("nested").join("summary.json");

    cmd()
        .arg("extract")
        .arg(fixture("two-displays.log"))
        .arg("-o")
        .arg(&output)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success();

    let text = std::fs::read_to_string(&summary).expect("read summary");
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["summary_version"], 1);
    assert_eq!(value["tool"]["name"], "edidex");
    assert_eq!(value["format"], "log");
    assert_eq!(value["edids_found"], 2);
    let writes = value["writes"].as_array().expect("writes array");
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0]["name"], "CRT-0");
    assert_eq!(writes[0]["status"], "written");
    assert_eq!(writes[1]["bytes"], 32);
}

#[test]
fn summary_may_not_replace_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("Xorg.0.log");
    std::fs::copy(fixture("nvidia-bug-report.log"), &input).expect("copy fixture");

    cmd()
        .arg("extract")
        .arg(&input)
        .arg("--summary")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("summary path must differ from input"));
}

#[test]
fn quiet_suppresses_progress() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("edid.bin");

    cmd()
        .arg("extract")
        .arg(fixture("nvidia-bug-report.log"))
        .arg("-o")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicates::str::is_empty());

    assert!(output.exists());
}

#[test]
fn write_failure_is_reported_and_strict_fails() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("absent").join("edid.bin");

    cmd()
        .arg("extract")
        .arg(fixture("nvidia-bug-report.log"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("Failed to write EDID for \"ViewSonic VPD150 (DFP-1)\""));

    cmd()
        .arg("extract")
        .arg(fixture("nvidia-bug-report.log"))
        .arg("-o")
        .arg(&output)
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("1 of 1 EDIDs could not be written"));
}

#[test]
fn glob_input_must_match_one_file() {
    let pattern = repo_root().join("tests").join("fixtures").join("*.log");

    cmd()
        .arg("extract")
        .arg(pattern)
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn version_includes_build_info() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("edidex"));
}
