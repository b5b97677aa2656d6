//! Helpers for driving the router in unit tests without a server.

use axum::{
    body::Body,
    extract::FromRef,
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{app::build_app, auth::services::JwtKeys, state::AppState};

pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(header::HeaderName, String)>,
    body: Option<Value>,
}

impl TestRequest {
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Attaches a fresh access token for `user_id`.
    pub fn auth(mut self, state: &AppState, user_id: Uuid) -> Self {
        let token = JwtKeys::from_ref(state)
            .sign_access(user_id)
            .expect("sign access token");
        self.headers
            .push((header::AUTHORIZATION, format!("Bearer {token}")));
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.headers
            .push((header::AUTHORIZATION, format!("Bearer {token}")));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        let request = match self.body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        };
        request.expect("valid request")
    }
}

/// Sends one request through a fresh router over `state`; returns the status
/// and the JSON body (`Value::Null` when the body is not JSON).
pub async fn send(state: &AppState, req: TestRequest) -> (StatusCode, Value) {
    let response = build_app(state.clone())
        .oneshot(req.build())
        .await
        .expect("infallible router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
