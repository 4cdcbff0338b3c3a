#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tool_depot_api::config::AppConfig;
use tool_depot_api::database::Database;
use tool_depot_api::{app, AppState};

pub const TEST_SECRET: &str = "test-secret";

/// App state over a fresh in-memory store
pub fn test_state() -> AppState {
    let mut config = AppConfig::development();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.password_hash_cost = 4;

    AppState::new(config, Database::in_memory()).expect("test state")
}

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = test_state();
        let router = app(state.clone());
        Self { state, router }
    }

    /// Run one request through the router and decode the body as JSON
    /// (`Value::Null` for empty bodies, a string for plain text)
    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router call failed")?;

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.send(request(Method::GET, uri, None, None)).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.send(request(Method::GET, uri, None, Some(token))).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(request(Method::POST, uri, Some(body), None)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(request(Method::PUT, uri, Some(body), None)).await
    }

    pub async fn put_with_token(&self, uri: &str, body: Value, token: &str) -> Result<(StatusCode, Value)> {
        self.send(request(Method::PUT, uri, Some(body), Some(token))).await
    }

    pub async fn delete(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.send(request(Method::DELETE, uri, None, None)).await
    }

    /// Register `email` with a password and log in, returning the access token
    pub async fn register_and_login(&self, email: &str, password: &str) -> Result<String> {
        let (status, _) = self
            .put(&format!("/user/{}", email), json!({ "password": password }))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "profile upsert failed: {}", status);

        let (status, body) = self
            .post("/login", json!({ "email": email, "password": password }))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);

        body["accessToken"]
            .as_str()
            .map(str::to_string)
            .context("login response without accessToken")
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub fn sample_product() -> Value {
    json!({
        "name": "Cordless Drill",
        "email": "seller@example.com",
        "image": "https://example.com/drill.png",
        "description": "18V drill with two batteries",
        "price": 120,
        "quantity": 40,
        "minimum": 5
    })
}

pub fn sample_booking(email: &str) -> Value {
    json!({
        "name": "Cordless Drill",
        "email": email,
        "product": "507f1f77bcf86cd799439011",
        "phone": "555-0100",
        "price": 600,
        "address": "12 Main St"
    })
}
