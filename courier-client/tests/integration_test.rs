//! End-to-end tests against a mock HTTP server.

use courier_client::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENVELOPE: &str = concat!(
    r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:x="urn:x">"#,
    "<soapenv:Header/>",
    "<soapenv:Body><x:GetQuote><x:Symbol>OLD</x:Symbol><Amount>1</Amount></x:GetQuote></soapenv:Body>",
    "</soapenv:Envelope>"
);

fn config(server: &MockServer, verb: &str, route: &str) -> RequestConfig {
    RequestConfig::new(verb, format!("{}{}", server.uri(), route))
}

#[tokio::test]
async fn test_json_body_is_patched_and_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer token123"))
        .and(body_json(json!({
            "item": "widget",
            "quantity": 5,
            "shipping": {"city": "Lisbon"},
            "tags": ["a", "b"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    let manager = RequestManager::new(
        config(&server, "post", "/orders")
            .with_body(json!({"item": "widget", "quantity": 1, "tags": ["a", "x"]})),
    )
    .unwrap();

    manager.set_header("Authorization", "Bearer token123");
    manager.set_body("quantity", 5).unwrap();
    manager.set_body("shipping.city", "Lisbon").unwrap();
    manager.set_body("tags.1", "b").unwrap();

    let response = manager.execute().await.unwrap();
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.text(), "created");
    assert_eq!(manager.state(), ExecutionState::Completed);
}

#[tokio::test]
async fn test_soap_envelope_is_edited_in_place() {
    let server = MockServer::start().await;
    let expected = ENVELOPE.replace(">OLD<", ">IBM<").replace("<Amount>1<", "<Amount>250<");

    Mock::given(method("POST"))
        .and(path("/quotes"))
        .and(header("content-type", "application/xml"))
        .and(header("soapaction", "urn:x#GetQuote"))
        .and(body_string(expected))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .expect(1)
        .mount(&server)
        .await;

    let manager = RequestManager::new(
        config(&server, "POST", "/quotes")
            .with_header("SOAPAction", "urn:x#GetQuote")
            .with_body(json!(ENVELOPE)),
    )
    .unwrap();

    assert_eq!(manager.mode(), MutationMode::Soap);
    manager.set_body("GetQuote.x:Symbol", "IBM").unwrap();
    manager.set_body("GetQuote.Amount", 250).unwrap();

    let (text, status) = manager.execute_text().await;
    assert_eq!(status, 200);
    assert_eq!(text, "<ok/>");
}

#[tokio::test]
async fn test_form_body_is_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("a=1+2&b=x%26y&user=me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let manager =
        RequestManager::new(config(&server, "POST", "/login").with_body(json!("user=me"))).unwrap();

    assert_eq!(manager.mode(), MutationMode::Form);
    manager.set_body("a", "1 2").unwrap();
    manager.set_body("b", "x&y").unwrap();

    let response = manager.execute().await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_cancel_unblocks_in_flight_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let manager = Arc::new(RequestManager::new(config(&server, "GET", "/slow")).unwrap());
    let started = Instant::now();

    let worker = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.execute().await })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(manager.state(), ExecutionState::Running);
    manager.cancel();
    manager.cancel();

    let result = worker.await.unwrap();
    assert!(matches!(result, Err(CourierError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(manager.state(), ExecutionState::Cancelled);
}

#[tokio::test]
async fn test_cancelled_text_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let manager = Arc::new(RequestManager::new(config(&server, "GET", "/slow")).unwrap());
    let worker = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.execute_text().await })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    manager.cancel();

    assert_eq!(worker.await.unwrap(), ("request cancelled".to_string(), 0));
}

#[tokio::test]
async fn test_cancel_after_completion_is_noop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("done"))
        .mount(&server)
        .await;

    let manager = RequestManager::new(config(&server, "GET", "/")).unwrap();
    let response = manager.execute().await.unwrap();

    manager.cancel();
    assert_eq!(response.text(), "done");
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(manager.state(), ExecutionState::Completed);

    // a fresh execution gets a fresh token
    let again = manager.execute().await.unwrap();
    assert_eq!(again.text(), "done");
}

#[tokio::test]
async fn test_overlapping_execute_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let manager = Arc::new(RequestManager::new(config(&server, "GET", "/slow")).unwrap());
    let worker = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.execute().await })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(matches!(manager.execute().await, Err(CourierError::Busy)));

    manager.cancel();
    assert!(matches!(worker.await.unwrap(), Err(CourierError::Cancelled)));
}

#[tokio::test]
async fn test_configured_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let manager = RequestManager::new(config(&server, "GET", "/slow").with_timeout(1)).unwrap();

    let err = manager.execute().await.unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(err, CourierError::Timeout(d) if d == Duration::from_secs(1)));
    assert_eq!(manager.state(), ExecutionState::Failed);
}

#[tokio::test]
async fn test_transport_error_is_reported() {
    // nothing listens on the discard port
    let manager = RequestManager::new(RequestConfig::new("GET", "http://127.0.0.1:9/")).unwrap();

    let (message, status) = manager.execute_text().await;
    assert_eq!(status, 0);
    assert!(message.starts_with("Transport error"));
    assert_eq!(manager.state(), ExecutionState::Failed);
}

#[tokio::test]
async fn test_negotiation_failure_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manager = RequestManager::new(
        config(&server, "POST", "/")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(json!([1, 2])),
    )
    .unwrap();

    let err = manager.execute().await.unwrap_err();
    assert!(matches!(err, CourierError::UnsupportedBodyType { .. }));
    assert_eq!(manager.state(), ExecutionState::Failed);

    let (message, status) = manager.execute_text().await;
    assert_eq!(status, 0);
    assert!(message.starts_with("Unsupported body type"));
}
