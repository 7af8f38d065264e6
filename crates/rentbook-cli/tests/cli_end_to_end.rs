#![deny(clippy::all, clippy::pedantic)]

use std::path::Path;

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use tempfile::TempDir;

const AUTH_BODY: &str = r#"{"accessToken":"cli-token","profile":{"_id":"u1","telegramId":42,"firstName":"Mai"}}"#;

fn cli(server: &MockServer, session: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rentbook-cli"));
    cmd.env_remove("RENTBOOK_CONFIG_FILE")
        .env_remove("RENTBOOK__API__BASE_URL")
        .arg("--api-base-url")
        .arg(server.base_url())
        .arg("--session-store-path")
        .arg(session);
    cmd
}

fn sign_in(server: &MockServer, session: &Path) {
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/auth/telegram/auth")
            .json_body(serde_json::json!({"code": "123456"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(AUTH_BODY);
    });

    cli(server, session)
        .args(["login", "confirm", "123456"])
        .assert()
        .success()
        .stdout(contains("\"firstName\": \"Mai\""));
    mock.assert();
}

#[test]
fn session_survives_between_runs() {
    let server = MockServer::start();
    let dir = TempDir::new().expect("temp dir");
    let session = dir.path().join("session.json");

    sign_in(&server, &session);

    cli(&server, &session)
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("\"id\": \"u1\""));
}

#[test]
fn list_uses_stored_token() {
    let server = MockServer::start();
    let dir = TempDir::new().expect("temp dir");
    let session = dir.path().join("session.json");
    sign_in(&server, &session);

    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/tenant")
            .query_param("room", "r1")
            .header("authorization", "Bearer cli-token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"items":[{"_id":"t1","room":"r1","name":"An","phone":"0900"}],"total":42}"#);
    });

    let assert = cli(&server, &session)
        .args(["tenants", "list", "--room", "r1"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"total\": 42"));
    mock.assert();
}

#[test]
fn logout_forgets_the_session() {
    let server = MockServer::start();
    let dir = TempDir::new().expect("temp dir");
    let session = dir.path().join("session.json");
    sign_in(&server, &session);

    cli(&server, &session)
        .arg("logout")
        .assert()
        .success()
        .stderr(contains("Signed out"));

    cli(&server, &session)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(contains("NotSignedIn"));
}

#[test]
fn missing_base_url_fails_fast() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rentbook-cli"));
    cmd.arg("whoami")
        .env_remove("RENTBOOK_CONFIG_FILE")
        .env_remove("RENTBOOK__API__BASE_URL")
        .assert()
        .failure()
        .stderr(contains("api.base_url"));
}
