//! BADSEC API client.
//!
//! # Design
//! Every call is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` function that interprets the
//! `HttpResponse`, as plain data. `BadsecClient` joins the two through its
//! `Transport` and wraps each operation in its own `RetryPolicy`, so the
//! `/auth` and `/users` counters never influence each other.

use tracing::{debug, info, warn};

use crate::checksum::{request_checksum, USERS_PATH};
use crate::error::{RequestError, RetriesExhausted};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::retry::{Operation, RetryPolicy, MAX_RETRIES};
use crate::types::{AuthToken, UserList};

pub const AUTH_PATH: &str = "/auth";
pub const AUTH_TOKEN_HEADER: &str = "Badsec-Authentication-Token";
pub const CHECKSUM_HEADER: &str = "X-Request-Checksum";
pub const USER_AGENT: &str = concat!("noclist/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the BADSEC API.
///
/// Holds retry state, so build a fresh client for each run.
#[derive(Debug)]
pub struct BadsecClient<T> {
    base_url: String,
    transport: T,
    auth_retries: RetryPolicy,
    users_retries: RetryPolicy,
}

impl<T: Transport> BadsecClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            auth_retries: RetryPolicy::new(Operation::Authorize, MAX_RETRIES),
            users_retries: RetryPolicy::new(Operation::ListUsers, MAX_RETRIES),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.auth_retries = RetryPolicy::new(Operation::Authorize, max_retries);
        self.users_retries = RetryPolicy::new(Operation::ListUsers, max_retries);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn retry_policy(&self, operation: Operation) -> &RetryPolicy {
        match operation {
            Operation::Authorize => &self.auth_retries,
            Operation::ListUsers => &self.users_retries,
        }
    }

    pub fn build_authorize(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Head,
            url: format!("{}{AUTH_PATH}", self.base_url),
            headers: default_headers(),
        }
    }

    pub fn build_list_users(&self, token: Option<&AuthToken>) -> HttpRequest {
        let mut headers = default_headers();
        headers.push((CHECKSUM_HEADER.to_string(), request_checksum(token)));
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{USERS_PATH}", self.base_url),
            headers,
        }
    }

    /// Fetch an auth token, retrying failed calls.
    ///
    /// `Ok(None)` means the server answered 2xx without a token header; the
    /// checksum is then computed over the empty string.
    pub fn authorize(&mut self) -> Result<Option<AuthToken>, RetriesExhausted> {
        let request = self.build_authorize();
        let transport = &mut self.transport;
        self.auth_retries.run(|| {
            debug!(url = %request.url, "requesting auth token");
            let response = transport.execute(&request)?;
            parse_authorize(response)
        })
    }

    /// Fetch the user list, retrying failed calls, and log it.
    pub fn list_users(&mut self, token: Option<&AuthToken>) -> Result<UserList, RetriesExhausted> {
        let request = self.build_list_users(token);
        let transport = &mut self.transport;
        let users = self.users_retries.run(|| {
            debug!(url = %request.url, "requesting user list");
            let response = transport.execute(&request)?;
            parse_list_users(response)
        })?;
        info!(count = users.len(), users = %users, "retrieved user list");
        Ok(users)
    }

    /// Authorize, then list users. A terminal `/auth` failure stops here;
    /// `/users` is never requested without a token from a successful call.
    pub fn fetch_users(&mut self) -> Result<UserList, RetriesExhausted> {
        let token = self.authorize()?;
        self.list_users(token.as_ref())
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("User-Agent".to_string(), USER_AGENT.to_string()),
        ("Accept".to_string(), "text/plain".to_string()),
    ]
}

pub fn parse_authorize(response: HttpResponse) -> Result<Option<AuthToken>, RequestError> {
    check_status(&response)?;
    let token = response.header(AUTH_TOKEN_HEADER).map(AuthToken::new);
    if token.is_none() {
        warn!(header = AUTH_TOKEN_HEADER, "auth response carried no token");
    }
    Ok(token)
}

pub fn parse_list_users(response: HttpResponse) -> Result<UserList, RequestError> {
    check_status(&response)?;
    Ok(UserList::from_body(&response.body))
}

fn check_status(response: &HttpResponse) -> Result<(), RequestError> {
    if response.is_success() {
        return Ok(());
    }
    Err(RequestError::UnsuccessfulStatus {
        status: response.status,
    })
}
