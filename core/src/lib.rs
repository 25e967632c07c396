//! Blocking client core for the BADSEC noclist API.
//!
//! # Overview
//! Fetches a short-lived token from `/auth`, derives the `/users` request
//! checksum from it, and retrieves the user list. Each call is retried
//! immediately through a per-operation `RetryPolicy`; once the policy is spent
//! the client returns `RetriesExhausted` and the run is over.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`).
//!   The network round-trip goes through the `Transport` trait, so the core
//!   never links an HTTP stack.
//! - Retry state is owned by the client, one counter per operation.
//! - Recoverable failures (`TransportError`, non-2xx status) never escape the
//!   client; only `RetriesExhausted` does.

pub mod checksum;
pub mod client;
pub mod error;
pub mod http;
pub mod retry;
pub mod types;

pub use checksum::{request_checksum, USERS_PATH};
pub use client::{
    parse_authorize, parse_list_users, BadsecClient, AUTH_PATH, AUTH_TOKEN_HEADER, CHECKSUM_HEADER,
    USER_AGENT,
};
pub use error::{RequestError, RetriesExhausted, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use retry::{Decision, Operation, RetryPolicy, MAX_RETRIES};
pub use types::{AuthToken, UserList};
