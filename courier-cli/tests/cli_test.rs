//! Tests for the `courier` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_file(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn courier() -> Command {
    let mut cmd = Command::cargo_bin("courier").unwrap();
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_check_shows_negotiated_json() {
    let file = config_file(
        r#"{"Method": "post", "URL": "https://api.example.com/orders", "Body": {"item": "widget"}}"#,
        ".json",
    );

    courier()
        .args(["check", file.path().to_str().unwrap()])
        .args(["-H", "X-Trace: abc", "-s", "quantity=5", "-s", "meta.source=cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("POST https://api.example.com/orders"))
        .stdout(predicate::str::contains("content-type: application/json"))
        .stdout(predicate::str::contains("x-trace: abc"))
        .stdout(predicate::str::contains(
            r#"{"item":"widget","meta":{"source":"cli"},"quantity":5}"#,
        ));
}

#[test]
fn test_check_soap_from_toml() {
    let file = config_file(
        r#"
Method = "POST"
URL = "https://soap.example.com/service"
Body = "<soap:Envelope><soap:Body><Amount>1</Amount></soap:Body></soap:Envelope>"

[[Header]]
Nombre = "SOAPAction"
Valor = "urn:pay"
"#,
        ".toml",
    );

    courier()
        .args(["check", file.path().to_str().unwrap(), "-s", "Pay.Amount=250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("content-type: application/xml"))
        .stdout(predicate::str::contains(
            "<soap:Envelope><soap:Body><Amount>250</Amount></soap:Body></soap:Envelope>",
        ));
}

#[test]
fn test_check_reports_mutation_errors() {
    courier()
        .args([
            "check",
            r#"{"Method": "POST", "URL": "https://x.test", "Body": [1, 2, 3]}"#,
            "-s",
            "5.x=1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_check_rejects_huge_index() {
    courier()
        .args([
            "check",
            r#"{"Method": "POST", "URL": "https://x.test"}"#,
            "-s",
            "99999999999=x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index 99999999999 out of range"));
}

#[test]
fn test_invalid_config() {
    courier()
        .args(["check", r#"{"Method": "GET", "URL": "not-a-url"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_invalid_header_argument() {
    courier()
        .args(["check", r#"{"Method": "GET", "URL": "https://x.test"}"#, "-H", "broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME:VALUE"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_sends_request() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/items/1"))
        .and(header("authorization", "Bearer t"))
        .and(body_json(serde_json::json!({"name": "new", "count": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_string("updated"))
        .expect(1)
        .mount(&server)
        .await;

    let config = format!(
        r#"{{"Method": "PUT", "URL": "{}/items/1", "Body": {{"name": "old"}}}}"#,
        server.uri()
    );

    let assert = tokio::task::spawn_blocking(move || {
        courier()
            .args(["run", &config, "-H", "Authorization: Bearer t"])
            .args(["-s", "name=new", "-s", "count=3"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("updated"))
        .stderr(predicate::str::contains("200 OK"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_non_success_status_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let config = format!(r#"{{"Method": "GET", "URL": "{}/nothing"}}"#, server.uri());

    let assert = tokio::task::spawn_blocking(move || courier().args(["run", &config]).assert())
        .await
        .unwrap();

    assert.failure().stdout(predicate::str::contains("missing"));
}
