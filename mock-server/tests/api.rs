use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{
    app, default_users, expected_checksum, router, Endpoint, MockState, AUTH_TOKEN_HEADER,
    CHECKSUM_HEADER,
};
use tower::ServiceExt;

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn users_request(checksum: &str) -> Request<String> {
    Request::builder()
        .uri("/users")
        .header(CHECKSUM_HEADER, checksum)
        .body(String::new())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn head_auth_returns_token_header() {
    let resp = app().oneshot(request("HEAD", "/auth")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let token = resp.headers()[AUTH_TOKEN_HEADER].to_str().unwrap();
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
}

#[tokio::test]
async fn get_auth_also_issues_token() {
    let resp = app().oneshot(request("GET", "/auth")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(AUTH_TOKEN_HEADER));
}

#[tokio::test]
async fn auth_injected_failures_return_503() {
    let state = MockState::new(default_users());
    state.fail_next(Endpoint::Auth, 1).await;

    let resp = router(state.clone()).oneshot(request("HEAD", "/auth")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(state.issued_token().await.is_none());

    let resp = router(state.clone()).oneshot(request("HEAD", "/auth")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.requests(Endpoint::Auth).await, 2);
}

// --- users ---

#[tokio::test]
async fn users_without_token_is_unauthorized() {
    let resp = app()
        .oneshot(users_request(&expected_checksum("")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_missing_checksum_is_unauthorized() {
    let state = MockState::new(default_users());
    router(state.clone()).oneshot(request("HEAD", "/auth")).await.unwrap();

    let resp = router(state).oneshot(request("GET", "/users")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_with_valid_checksum_returns_ids() {
    let state = MockState::new(vec!["1234".to_string(), "5678".to_string()]);
    router(state.clone()).oneshot(request("HEAD", "/auth")).await.unwrap();
    let token = state.issued_token().await.unwrap();

    let resp = router(state.clone())
        .oneshot(users_request(&expected_checksum(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "1234\n5678");
    assert_eq!(state.requests(Endpoint::Users).await, 1);
}

#[tokio::test]
async fn users_checksum_of_stale_token_is_rejected() {
    let state = MockState::new(default_users());
    router(state.clone()).oneshot(request("HEAD", "/auth")).await.unwrap();
    let stale = state.issued_token().await.unwrap();
    router(state.clone()).oneshot(request("HEAD", "/auth")).await.unwrap();

    let resp = router(state)
        .oneshot(users_request(&expected_checksum(&stale)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_injected_failure_precedes_checksum_check() {
    let state = MockState::new(default_users());
    router(state.clone()).oneshot(request("HEAD", "/auth")).await.unwrap();
    let token = state.issued_token().await.unwrap();
    state.fail_next(Endpoint::Users, 1).await;

    let resp = router(state.clone())
        .oneshot(users_request(&expected_checksum(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let resp = router(state)
        .oneshot(users_request(&expected_checksum(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, default_users().join("\n"));
}

#[tokio::test]
async fn delayed_auth_still_answers() {
    let state = MockState::new(default_users());
    state.delay(Endpoint::Auth, std::time::Duration::from_millis(50)).await;

    let started = std::time::Instant::now();
    let resp = router(state).oneshot(request("HEAD", "/auth")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(started.elapsed() >= std::time::Duration::from_millis(50));
}
