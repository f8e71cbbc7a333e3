use crate::support::{FakeBackend, fake_client, status_error};
use assert_json_diff::assert_json_eq;
use chrono::Utc;
use reqwest::Method;
use sap_b1_client::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

async fn logged_in(backend: &Arc<FakeBackend>) -> Client {
    let client = fake_client(backend, &MockClock::new(Utc::now()));
    client
        .create_session(ConfigOverride::default())
        .await
        .expect("login should succeed");
    client
}

#[tokio::test]
async fn get_returns_body() {
    let backend = FakeBackend::new(30);
    backend.route(
        "BusinessPartners('C20000')",
        Ok(json!({"CardCode": "C20000", "CardName": "Norm Thompson"})),
    );
    let client = logged_in(&backend).await;

    let result = client
        .get("BusinessPartners('C20000')", &RequestOptions::default())
        .await
        .unwrap();

    assert_json_eq!(
        result.unwrap(),
        json!({"CardCode": "C20000", "CardName": "Norm Thompson"})
    );
    let request = backend.requests();
    assert_eq!(request.len(), 1);
    assert_eq!(request[0].method, Method::GET);
    assert_eq!(
        request[0].cookie.as_deref(),
        Some("B1SESSION=session-1;CompanyDB=SBODEMO")
    );
}

#[tokio::test]
async fn mutating_verbs_forward_method_and_body() {
    let backend = FakeBackend::new(30);
    backend.route("Orders", Ok(json!({"DocEntry": 42})));
    backend.route("Orders(42)", Ok(serde_json::Value::Null));
    let client = logged_in(&backend).await;
    let order = json!({"CardCode": "C20000", "DocumentLines": [{"ItemCode": "A1", "Quantity": 2}]});
    let options = RequestOptions::default();

    let created = client.post("Orders", &order, &options).await.unwrap();
    assert_eq!(created.unwrap()["DocEntry"], 42);
    assert!(client.put("Orders(42)", &order, &options).await.unwrap().is_ok());
    assert!(
        client
            .patch("Orders(42)", &json!({"Comments": "rush"}), &options)
            .await
            .unwrap()
            .is_ok()
    );
    assert!(client.delete("Orders(42)", &options).await.unwrap().is_ok());

    let requests = backend.requests();
    let methods: Vec<_> = requests.iter().map(|r| r.method.clone()).collect();
    assert_eq!(
        methods,
        vec![Method::POST, Method::PUT, Method::PATCH, Method::DELETE]
    );
    assert_eq!(requests[0].body, Some(order.clone()));
    assert_eq!(requests[2].body, Some(json!({"Comments": "rush"})));
    assert_eq!(requests[3].body, None);
}

#[tokio::test]
async fn server_error_is_returned_as_value() {
    let backend = FakeBackend::new(30);
    let body = r#"{"error":{"code":-2028,"message":{"lang":"en-us","value":"No matching records found"}}}"#;
    backend.route("Items('NOPE')", Err(status_error(404, "Items('NOPE')", body)));
    let client = logged_in(&backend).await;

    let err = client
        .get("Items('NOPE')", &RequestOptions::default())
        .await
        .expect("server errors are not raised")
        .expect_err("server error expected");

    assert_eq!(err.kind, ApiErrorKind::Server { status: 404 });
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message, body);
    let decoded = json!({
        "error": {
            "code": -2028,
            "message": {"lang": "en-us", "value": "No matching records found"}
        }
    });
    assert_eq!(err.body, decoded);
    assert_json_eq!(err.to_value(), json!({"error": true, "message": decoded}));
}

#[tokio::test]
async fn network_failure_is_returned_as_value() {
    let backend = FakeBackend::new(30);
    backend.route(
        "Items",
        Err(TransportError::Network("operation timed out".to_string())),
    );
    let client = logged_in(&backend).await;

    let err = client
        .get("Items", &RequestOptions::default())
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_json_eq!(err.to_value(), json!({"error": true, "message": "ERROR REQUEST"}));
}

#[tokio::test]
async fn setup_failure_is_returned_as_value() {
    let backend = FakeBackend::new(30);
    backend.route(
        "Items",
        Err(TransportError::Setup("invalid header name".to_string())),
    );
    let client = logged_in(&backend).await;

    let err = client
        .post("Items", &json!({}), &RequestOptions::default())
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::RequestSetup);
    assert_json_eq!(
        err.to_value(),
        json!({"error": true, "message": "invalid header name"})
    );
}

#[tokio::test]
async fn unserializable_body_is_a_setup_failure() {
    let backend = FakeBackend::new(30);
    let client = logged_in(&backend).await;
    let mut body = HashMap::new();
    body.insert((1, 2), "tuple keys cannot become JSON object keys");

    let err = client
        .patch("Items('A1')", &body, &RequestOptions::default())
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::RequestSetup);
    assert!(!err.message.is_empty());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn options_are_forwarded_to_transport() {
    let backend = FakeBackend::new(30);
    backend.route("Items", Ok(json!({"value": []})));
    let client = logged_in(&backend).await;
    let options = RequestOptions::new()
        .with_header("Prefer", "odata.maxpagesize=50")
        .with_timeout(Duration::from_secs(5))
        .with_query("$select", "ItemCode");

    client.get("Items", &options).await.unwrap().unwrap();

    assert_eq!(backend.requests()[0].options, options);
}

#[tokio::test]
async fn query_raises_transport_failures() {
    let backend = FakeBackend::new(30);
    backend.route("Items", Err(status_error(500, "Items", "boom")));
    let client = logged_in(&backend).await;

    match client.query("Items", &RequestOptions::default()).await {
        Err(AppError::Api(err)) => {
            assert_eq!(err.kind, ApiErrorKind::Server { status: 500 });
            assert_eq!(err.message, "boom");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn query_returns_raw_body() {
    let backend = FakeBackend::new(30);
    let raw = json!({"odata.metadata": "$metadata#Items", "value": [{"ItemCode": "A1"}]});
    backend.route("Items?$top=1", Ok(raw.clone()));
    let client = logged_in(&backend).await;

    let body = client
        .query("Items?$top=1", &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(body, raw);
}
