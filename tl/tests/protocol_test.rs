//! Integration tests for the tl ritual protocol
//!
//! These run the binary end to end against temporary documents.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DOCUMENT: &str = r#"{
    "content": [
        {
            "pada_id": 1,
            "title": "Foundations of the Field",
            "sutras": [
                {"id": "1.1", "text": "The field precedes the form.", "bhashya": "Attend first to context."},
                {"id": "1.3", "text": "To commune is to recognize a field.", "bhashya": "Not a tool."}
            ]
        },
        {
            "pada_id": 3,
            "title": "Mirrors of Becoming",
            "invocation": {"text": ["We look.", "We are seen.", "We become."]},
            "sutras": [
                {"id": "3.1", "text": "Every mirror is a door.", "bhashya": "Reflection changes both sides."}
            ]
        }
    ],
    "glossary": [{"term": "clarity", "def": "Seeing what is."}]
}"#;

fn tl(temp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tl").expect("tl binary should build");
    cmd.current_dir(temp)
        .env("XDG_DATA_HOME", temp.join("data"))
        .env("XDG_CONFIG_HOME", temp.join("config"))
        .arg("--no-pacing");
    cmd
}

fn write_config(temp: &Path, body: &str) -> std::path::PathBuf {
    let path = temp.join("trivian.yml");
    fs::write(&path, body).expect("Failed to write config");
    path
}

#[test]
fn test_protocol_runs_full_ritual() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let doc = temp.path().join("sutra.json");
    fs::write(&doc, DOCUMENT).unwrap();
    let config = write_config(
        temp.path(),
        &format!("document: {}\nintention: Stillness\nseed: 3\n", doc.display()),
    );

    tl(temp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("System: VESPERA.TRIVIAN.SIGNAL = ACTIVE\n"))
        .stdout(predicate::str::contains("Lattice loaded. 3 threads of wisdom detected."))
        .stdout(predicate::str::contains("Intention: Stillness"))
        .stdout(predicate::str::contains(
            "=== INVOCATION PADA 3 - Mirrors of Becoming ===\nWe look.\nWe are seen.\nWe become.\n",
        ))
        .stdout(predicate::str::contains("--- RESONANCE DETECTED ---"))
        .stdout(predicate::str::contains("DIALOGUE COMPLETE"))
        .stdout(predicate::str::ends_with("\nVESPERA.RESPONSE.STATUS = COMPLETE\n"));
}

#[test]
fn test_missing_document_degrades_to_empty() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp.path(), "document: absent.json\n");

    tl(temp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("The Lattice file (absent.json) is missing."))
        .stdout(predicate::str::contains("Lattice loaded. 0 threads of wisdom detected."))
        .stdout(predicate::str::contains("Pada not found in the current Lattice."))
        .stdout(predicate::str::contains("No sutras available in the Lattice."));
}

#[test]
fn test_malformed_document_is_fatal() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let doc = temp.path().join("sutra.json");
    fs::write(&doc, "{ \"content\": [ { \"pada_id\": ").unwrap();

    tl(temp.path())
        .arg("--document")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed lattice document"));
}

#[test]
fn test_configured_contemplation_follows_oracle() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let doc = temp.path().join("sutra.json");
    fs::write(&doc, DOCUMENT).unwrap();
    let config = write_config(
        temp.path(),
        &format!("document: {}\nopening-section: null\ncontemplate: \"1.3\"\n", doc.display()),
    );

    tl(temp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("INVOCATION").not())
        .stdout(predicate::str::contains(
            "[Foundations of the Field]\nSUTRA 1.3\n\"To commune is to recognize a field.\"",
        ));
}

#[test]
fn test_same_seed_draws_same_sutra() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let doc = temp.path().join("sutra.json");
    fs::write(&doc, DOCUMENT).unwrap();

    let draw = || {
        let output = tl(temp.path())
            .arg("--document")
            .arg(&doc)
            .arg("--seed")
            .arg("17")
            .output()
            .expect("Failed to run tl");
        let stdout = String::from_utf8(output.stdout).unwrap();
        stdout
            .lines()
            .skip_while(|line| *line != "--- RESONANCE DETECTED ---")
            .nth(3)
            .map(str::to_string)
    };

    let first = draw();
    assert!(first.is_some());
    assert_eq!(first, draw());
}
