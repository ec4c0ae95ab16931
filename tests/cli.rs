use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PEOPLE: &str = r#"[
  {"id": "A1 (old)", "firstName": "Ann", "city": "Oslo"},
  {"id": "B2", "firstName": "Bo", "city": "Rome"}
]"#;

fn write_table(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

fn write_empty_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();
    path
}

#[test]
fn help_lists_options() {
    Command::cargo_bin("tabfocus")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--summary"))
        .stdout(predicate::str::contains("--id-column"));
}

#[test]
fn missing_path_fails() {
    Command::cargo_bin("tabfocus")
        .unwrap()
        .arg("/definitely/not/here.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn summary_reports_layout() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "people.json", PEOPLE);
    let config = write_empty_config(&dir);

    Command::cargo_bin("tabfocus")
        .unwrap()
        .arg(&table)
        .arg("--config")
        .arg(&config)
        .args(["--summary", "--width", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: people"))
        .stdout(predicate::str::contains("Rows: 2"))
        .stdout(predicate::str::contains("Visible at 500px: 2 (Id, First Name)"))
        .stdout(predicate::str::contains("Identifiers: A1, B2"));
}

#[test]
fn id_column_flag_overrides_identifiers() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "people.json", PEOPLE);
    let config = write_empty_config(&dir);

    Command::cargo_bin("tabfocus")
        .unwrap()
        .arg(&table)
        .arg("--config")
        .arg(&config)
        .args(["--summary", "--id-column", "city"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifiers: Oslo, Rome"));
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "people.csv", "id,name\n1,Ann\n");
    let config = write_empty_config(&dir);

    Command::cargo_bin("tabfocus")
        .unwrap()
        .arg(&table)
        .arg("--config")
        .arg(&config)
        .arg("--summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "people.json", PEOPLE);
    let config = dir.path().join("config.toml");
    fs::write(&config, "[layout\nmin_column_width = ").unwrap();

    Command::cargo_bin("tabfocus")
        .unwrap()
        .arg(&table)
        .arg("--config")
        .arg(&config)
        .arg("--summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}
