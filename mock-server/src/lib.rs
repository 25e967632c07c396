use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sha2::{Digest, Sha256};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

pub const AUTH_TOKEN_HEADER: &str = "Badsec-Authentication-Token";
pub const CHECKSUM_HEADER: &str = "X-Request-Checksum";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Auth,
    Users,
}

#[derive(Debug, Default)]
struct Inner {
    token: Option<String>,
    users: Vec<String>,
    auth_failures: u32,
    users_failures: u32,
    auth_requests: u32,
    users_requests: u32,
    auth_delay: Duration,
    users_delay: Duration,
}

/// Shared server state. Clones share the same data, so a test can keep a
/// handle to queue failures and read counters while the router serves.
#[derive(Clone, Debug, Default)]
pub struct MockState(Arc<RwLock<Inner>>);

impl MockState {
    pub fn new(users: Vec<String>) -> Self {
        Self(Arc::new(RwLock::new(Inner {
            users,
            ..Inner::default()
        })))
    }

    /// Answer the next `count` requests to `endpoint` with 503.
    pub async fn fail_next(&self, endpoint: Endpoint, count: u32) {
        let mut inner = self.0.write().await;
        match endpoint {
            Endpoint::Auth => inner.auth_failures = count,
            Endpoint::Users => inner.users_failures = count,
        }
    }

    /// Hold every response from `endpoint` for `delay` before answering.
    pub async fn delay(&self, endpoint: Endpoint, delay: Duration) {
        let mut inner = self.0.write().await;
        match endpoint {
            Endpoint::Auth => inner.auth_delay = delay,
            Endpoint::Users => inner.users_delay = delay,
        }
    }

    /// Requests received by `endpoint`, failed ones included.
    pub async fn requests(&self, endpoint: Endpoint) -> u32 {
        let inner = self.0.read().await;
        match endpoint {
            Endpoint::Auth => inner.auth_requests,
            Endpoint::Users => inner.users_requests,
        }
    }

    pub async fn issued_token(&self) -> Option<String> {
        self.0.read().await.token.clone()
    }
}

pub fn default_users() -> Vec<String> {
    [
        "9757263792576857988",
        "7789651288773276582",
        "16283886502782682407",
        "14004083302316520812",
        "5818453755154208291",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn expected_checksum(token: &str) -> String {
    hex::encode(Sha256::digest(format!("{token}/users")))
}

pub fn app() -> Router {
    router(MockState::new(default_users()))
}

pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/auth", get(auth))
        .route("/users", get(users))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}

// `get` also answers HEAD, which is what clients use here.
async fn auth(State(state): State<MockState>) -> Response {
    let delay = state.0.read().await.auth_delay;
    tokio::time::sleep(delay).await;
    let mut inner = state.0.write().await;
    inner.auth_requests += 1;
    if inner.auth_failures > 0 {
        inner.auth_failures -= 1;
        warn!(remaining = inner.auth_failures, "injected /auth failure");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let token = Uuid::new_v4().simple().to_string().to_uppercase();
    inner.token = Some(token.clone());
    info!("issued auth token");
    (StatusCode::OK, [(AUTH_TOKEN_HEADER, token)]).into_response()
}

async fn users(State(state): State<MockState>, headers: HeaderMap) -> Response {
    let delay = state.0.read().await.users_delay;
    tokio::time::sleep(delay).await;
    let mut inner = state.0.write().await;
    inner.users_requests += 1;
    if inner.users_failures > 0 {
        inner.users_failures -= 1;
        warn!(remaining = inner.users_failures, "injected /users failure");
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let provided = headers.get(CHECKSUM_HEADER).and_then(|v| v.to_str().ok());
    let expected = inner.token.as_deref().map(expected_checksum);
    match (provided, expected) {
        (Some(provided), Some(expected)) if provided == expected => {
            info!(count = inner.users.len(), "served user list");
            (StatusCode::OK, inner.users.join("\n")).into_response()
        }
        _ => {
            warn!("rejected /users request with bad checksum");
            (StatusCode::UNAUTHORIZED, "Invalid checksum").into_response()
        }
    }
}
