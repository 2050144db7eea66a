use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn recibo() -> Command {
    Command::cargo_bin("recibo").unwrap()
}

/// Config file with defaults, so a user config cannot leak into the tests.
fn write_config(dir: &Path) -> String {
    let path = dir.join("config.json");
    fs::write(&path, "{}").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_rename_missing_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());

    recibo()
        .args(["--config", &config, "rename"])
        .arg(tmp.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("input directory does not exist"));
}

#[test]
fn test_rename_empty_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());
    let bills = tmp.path().join("bills");
    fs::create_dir(&bills).unwrap();

    recibo()
        .args(["--config", &config, "rename"])
        .arg(&bills)
        .assert()
        .success()
        .stdout(predicate::str::contains("No PDF files"));
}

#[test]
fn test_rename_reports_unreadable_file_and_continues() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());
    let bills = tmp.path().join("bills");
    fs::create_dir(&bills).unwrap();
    fs::write(bills.join("broken.pdf"), b"not a pdf").unwrap();
    fs::write(bills.join("text2025_ya_procesado.pdf"), b"not a pdf either").unwrap();
    fs::write(bills.join("2025_06_29_CFE_441000800801_ABR-JUN.pdf"), b"renamed earlier").unwrap();

    let summary = tmp.path().join("summary.csv");

    recibo()
        .args(["--config", &config, "rename"])
        .arg(&bills)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("broken.pdf"))
        .stdout(predicate::str::contains("renamed: 0"));

    assert!(bills.join("broken.pdf").exists());
    assert!(bills.join("text2025_ya_procesado.pdf").exists());
    assert!(bills.join("2025_06_29_CFE_441000800801_ABR-JUN.pdf").exists());

    let csv = fs::read_to_string(&summary).unwrap();
    assert!(csv.contains("broken.pdf,failed"));
    assert!(csv.contains("text2025_ya_procesado.pdf,skipped,,prefix text20"));
    assert!(csv.contains("2025_06_29_CFE_441000800801_ABR-JUN.pdf,skipped,,canonical name"));
}

#[test]
fn test_extract_missing_file_fails() {
    let tmp = tempfile::tempdir().unwrap();

    recibo()
        .arg("extract")
        .arg(tmp.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_extract_invalid_pdf_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("broken.pdf");
    fs::write(&path, b"not a pdf").unwrap();

    recibo()
        .arg("extract")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse PDF"));
}

#[test]
fn test_config_path() {
    recibo()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_config_init_writes_file() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("nested").join("recibo.json");

    recibo()
        .args(["config", "init", "--input-dir", "/srv/cfe", "--output"])
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("/srv/cfe"));
    assert!(content.contains("text20"));

    recibo()
        .args(["config", "init", "--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_set_and_get_use_global_config_flag() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());

    recibo()
        .args(["--config", &config, "config", "set", "rename.dry_run", "true"])
        .assert()
        .success();

    recibo()
        .args(["--config", &config, "config", "get", "rename.dry_run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));

    recibo()
        .args(["--config", &config, "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.as_str()));

    assert!(fs::read_to_string(&config).unwrap().contains("\"dry_run\": true"));
}
