use std::fs;
use std::path::Path;

use assert_cmd::Command;
use cve_register_sync::error::{GENERIC_FAILURE, MISSING_RESULTS};
use predicates::str::contains;
use tempfile::tempdir;

fn write_register(path: &Path) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 2, "CVE ID").expect("header written");
    sheet.write_string(1, 2, "CVE-2023-0001").expect("cell written");
    workbook.save(path).expect("register saved");
}

fn tool() -> Command {
    Command::cargo_bin("cve-register-sync").unwrap()
}

#[test]
fn reports_added_count_on_success() {
    let temp_dir = tempdir().unwrap();
    write_register(&temp_dir.path().join("register.xlsx"));
    fs::write(
        temp_dir.path().join("report.json"),
        r#"{"results":[{"vulnerabilities":[{"id":"CVE-2023-0001"},{"id":"CVE-2023-0004"}]}]}"#,
    )
    .unwrap();

    tool()
        .current_dir(temp_dir.path())
        .args(["register.xlsx", "report.json"])
        .assert()
        .success()
        .stdout(contains("Done. Added 1 new CVE(s) to output.xlsx"));

    assert!(temp_dir.path().join("output.xlsx").exists());
}

#[test]
fn missing_results_has_its_own_message() {
    let temp_dir = tempdir().unwrap();
    write_register(&temp_dir.path().join("register.xlsx"));
    fs::write(temp_dir.path().join("report.json"), r#"{"findings":[]}"#).unwrap();

    tool()
        .current_dir(temp_dir.path())
        .args(["register.xlsx", "report.json"])
        .assert()
        .code(1)
        .stdout(contains(MISSING_RESULTS));

    assert!(!temp_dir.path().join("output.xlsx").exists());
}

#[test]
fn other_failures_share_the_generic_message() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("report.json"), r#"{"results":[]}"#).unwrap();

    tool()
        .current_dir(temp_dir.path())
        .args(["absent.xlsx", "report.json"])
        .assert()
        .code(1)
        .stdout(contains(GENERIC_FAILURE));

    fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();
    write_register(&temp_dir.path().join("register.xlsx"));

    tool()
        .current_dir(temp_dir.path())
        .args(["register.xlsx", "broken.json"])
        .assert()
        .code(1)
        .stdout(contains(GENERIC_FAILURE));
}

#[test]
fn wrong_argument_count_prints_usage() {
    tool()
        .arg("register.xlsx")
        .assert()
        .code(2)
        .stderr(contains("Usage"));
}

#[test]
fn json_summary_lists_changes() {
    let temp_dir = tempdir().unwrap();
    write_register(&temp_dir.path().join("register.xlsx"));
    fs::write(
        temp_dir.path().join("report.json"),
        r#"{"results":[{"vulnerabilities":[{"id":"CVE-2023-0009"}]}]}"#,
    )
    .unwrap();

    tool()
        .current_dir(temp_dir.path())
        .args(["register.xlsx", "report.json", "--output", "synced.xlsx", "--json"])
        .assert()
        .success()
        .stdout(contains("CVE-2023-0009"))
        .stdout(contains("CVE-2023-0001"));

    assert!(temp_dir.path().join("synced.xlsx").exists());
}
