use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

use api_envelope::crypto::EnvelopeKey;
use api_envelope::envelope;

fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("api-envelope").unwrap();
    cmd.env("API_ENVELOPE_HOME", home.path())
        .env_remove("API_ENVELOPE_KEY")
        .env_remove("API_ENVELOPE_PASSPHRASE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn encrypt_then_decrypt_round_trip() {
    let home = TempDir::new().unwrap();
    let key = EnvelopeKey::generate().to_base64();
    let payload = r#"{"status":200,"data":[{"id":1,"title":"Banner A"}]}"#;

    let output = cmd(&home)
        .env("API_ENVELOPE_KEY", &key)
        .arg("encrypt")
        .write_stdin(payload)
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(body["data"].is_string());

    let output = cmd(&home)
        .env("API_ENVELOPE_KEY", &key)
        .args(["decrypt", "--check-status"])
        .write_stdin(body.to_string())
        .output()
        .unwrap();
    assert!(output.status.success());

    let decrypted: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decrypted, serde_json::from_str::<Value>(payload).unwrap());
}

#[test]
fn raw_ciphertext_is_library_compatible() {
    let home = TempDir::new().unwrap();
    let key = EnvelopeKey::generate();

    let output = cmd(&home)
        .env("API_ENVELOPE_KEY", key.to_base64())
        .args(["encrypt", "--raw"])
        .write_stdin("[]")
        .output()
        .unwrap();
    assert!(output.status.success());

    let ciphertext = String::from_utf8(output.stdout).unwrap();
    assert_eq!(envelope::decrypt(ciphertext.trim(), &key).unwrap(), json!([]));
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let home = TempDir::new().unwrap();
    let body = envelope::Envelope::seal(&json!({"status": 200}), &EnvelopeKey::generate()).unwrap();

    cmd(&home)
        .env("API_ENVELOPE_KEY", EnvelopeKey::generate().to_base64())
        .arg("decrypt")
        .write_stdin(serde_json::to_string(&body).unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption error"));
}

#[test]
fn check_status_surfaces_server_message() {
    let home = TempDir::new().unwrap();
    let key = EnvelopeKey::generate();
    let body =
        envelope::Envelope::seal(&json!({"status": 403, "message": "Not allowed"}), &key).unwrap();

    cmd(&home)
        .env("API_ENVELOPE_KEY", key.to_base64())
        .args(["decrypt", "--check-status"])
        .write_stdin(serde_json::to_string(&body).unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not allowed"));
}

#[test]
fn missing_key_is_reported() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .arg("encrypt")
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No envelope key configured"));
}

#[test]
fn plaintext_endpoint_passes_through_without_key() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["endpoint", "set", "/banner/upload", "--request", "plaintext"])
        .assert()
        .success()
        .stdout(predicate::str::contains("request plaintext"));

    let output = cmd(&home)
        .args(["encrypt", "--endpoint", "/banner/upload"])
        .write_stdin(r#"{"title":"A"}"#)
        .output()
        .unwrap();
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body, json!({"title": "A"}));

    cmd(&home)
        .args(["endpoint", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/banner/upload"));
}

#[test]
fn key_generate_save_then_use() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["key", "generate", "--save"])
        .assert()
        .success();

    cmd(&home)
        .args(["key", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings file"))
        .stdout(predicate::str::contains("valid"));

    cmd(&home)
        .arg("encrypt")
        .write_stdin(r#"{"page":1}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data\""));
}

#[test]
fn init_and_config() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));
    assert!(home.path().join("config.json").exists());

    cmd(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Endpoint overrides: 0"));
}

#[test]
fn invalid_mode_rejected_by_parser() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["encrypt", "--mode", "rot13"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown body mode"));
}

#[test]
fn raw_conflicts_with_endpoint() {
    let home = TempDir::new().unwrap();
    let key = EnvelopeKey::generate().to_base64();

    cmd(&home)
        .env("API_ENVELOPE_KEY", &key)
        .args(["encrypt", "--raw", "--endpoint", "/banner/list"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    cmd(&home)
        .env("API_ENVELOPE_KEY", &key)
        .args(["decrypt", "--raw", "--endpoint", "/banner/list"])
        .write_stdin("AAAA")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
