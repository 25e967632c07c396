//! Error types for the BADSEC client.
//!
//! # Design
//! `TransportError` and `RequestError` describe a single failed call and are
//! recovered by retrying. `RetriesExhausted` is the only error that escapes
//! `BadsecClient`; the last recoverable cause rides along as its `source()`.

use thiserror::Error;

use crate::retry::Operation;

/// Connection-level failure reported by a `Transport`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),
}

/// Why a single call to the BADSEC API did not succeed.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status outside 2xx.
    #[error("unsuccessful status {status}")]
    UnsuccessfulStatus { status: u16 },
}

/// Terminal failure: an operation kept failing after its allowed retries.
#[derive(Debug, Error)]
#[error("{operation} failed after {attempts} attempts")]
pub struct RetriesExhausted {
    pub operation: Operation,
    /// Total calls made, including the first.
    pub attempts: u32,
    #[source]
    pub last_failure: RequestError,
}
