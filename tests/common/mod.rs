#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test,
};
use serde_json::{json, Value};
use taskboard::auth::TokenKeys;
use taskboard::store::MemoryStore;
use taskboard::{build_app, AppState};
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration_test_secret";
pub const TEST_PASSWORD: &str = "Password123!";

/// Lowest cost bcrypt accepts; keeps the suite fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryStore::new()),
        TokenKeys::new(TEST_SECRET, 3600),
        TEST_BCRYPT_COST,
    )
    .expect("failed to build app state")
}

pub async fn spawn_app() -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(build_app(test_state())).await
}

/// Sends `req` and returns the status with the body parsed as JSON.
/// An empty body comes back as `Value::Null`.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "response with status {} is not JSON: {}",
            status,
            String::from_utf8_lossy(&body)
        )
    });
    (status, value)
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

pub async fn register_user<S, B>(app: &S, email: &str) -> TestUser
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "register {} failed: {}", email, body);

    let id = body["user"]["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("register response carries a user id");
    let token = body["token"]
        .as_str()
        .expect("register response carries a token")
        .to_string();
    TestUser { id, token }
}
