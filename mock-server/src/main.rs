use mock_server::{default_users, Endpoint, MockState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8888".to_string());
    let addr = format!("0.0.0.0:{port}");

    let state = MockState::new(default_users());
    state.fail_next(Endpoint::Auth, env_count("FAIL_AUTH")).await;
    state.fail_next(Endpoint::Users, env_count("FAIL_USERS")).await;

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::serve(listener, state).await
}

/// Leading 503 responses to inject, read from `var`. Unset or invalid means 0.
fn env_count(var: &str) -> u32 {
    std::env::var(var).ok().and_then(|v| v.parse().ok()).unwrap_or(0)
}
