/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An app wired to a fresh in-memory member store
/// - Form and JSON request helpers

use axum::body::Body;
use axum::http::{Request, StatusCode};
use members_api::app::{build_router, AppState};
use members_api::config::Config;
use members_shared::hobbies::HobbyCatalog;
use members_shared::store::InMemoryMemberStore;
use std::sync::Arc;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<InMemoryMemberStore>,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with an empty store and the built-in catalog
    pub fn new() -> Self {
        let store = Arc::new(InMemoryMemberStore::new());
        let state = AppState::new(store.clone(), HobbyCatalog::default(), Config::default());

        TestContext {
            store,
            app: build_router(state),
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };

        (status, json)
    }

    /// Posts a form-encoded registration
    pub async fn register(&self, fields: &[(&str, &str)]) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/members")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();

        self.send(request).await
    }

    /// Issues a GET request
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }
}

/// Encodes `fields` as `application/x-www-form-urlencoded`
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn percent_encode(value: &str) -> String {
    let mut encoded = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// A complete, valid registration
pub fn taro() -> Vec<(&'static str, &'static str)> {
    vec![
        ("email", "test@example.jp"),
        ("password", "123456"),
        ("name", "テスト太郎"),
        ("nickname", "taro"),
        ("hobby1", "1"),
        ("hobby2", ""),
        ("hobby3", "3"),
    ]
}
