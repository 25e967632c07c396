//! Bounded retry bookkeeping for a single logical operation.
//!
//! # Design
//! Each operation owns one `RetryPolicy`. A failure is retried while
//! `attempts < max_retries`; the failure that arrives once `attempts` has
//! reached `max_retries` is terminal. The check happens before the counter
//! moves, so a policy with `max_retries = N` tolerates N failures and gives up
//! on failure N+1. Success resets the counter. Retries are immediate.

use std::fmt;

use tracing::error;

use crate::error::{RequestError, RetriesExhausted};

/// Retries allowed per operation before the next failure is terminal.
pub const MAX_RETRIES: u32 = 2;

/// The two calls the client makes against the BADSEC API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Authorize,
    ListUsers,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Authorize => write!(f, "authorize"),
            Operation::ListUsers => write!(f, "list_users"),
        }
    }
}

/// What to do after a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Retry,
    Fail,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    operation: Operation,
    max_retries: u32,
    attempts: u32,
}

impl RetryPolicy {
    pub fn new(operation: Operation, max_retries: u32) -> Self {
        Self {
            operation,
            max_retries,
            attempts: 0,
        }
    }

    /// Failures recorded since the last success.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn record_success(&mut self) {
        self.attempts = 0;
    }

    /// Record a failed call and decide whether another one is allowed.
    ///
    /// `Fail` leaves the counter at `max_retries`; a policy that has failed
    /// stays spent until the next success.
    pub fn record_failure(&mut self, cause: &RequestError) -> Decision {
        if self.attempts == self.max_retries {
            return Decision::Fail;
        }
        self.attempts += 1;
        error!(
            operation = %self.operation,
            attempt = self.attempts,
            max_retries = self.max_retries,
            error = %cause,
            "there was a problem with the request; retrying"
        );
        Decision::Retry
    }

    /// Invoke `call` until it succeeds or the policy gives up.
    ///
    /// The counter bounds the loop: at most `max_retries + 1` calls are made
    /// from a fresh policy.
    pub fn run<R>(
        &mut self,
        mut call: impl FnMut() -> Result<R, RequestError>,
    ) -> Result<R, RetriesExhausted> {
        let mut calls = 0;
        loop {
            calls += 1;
            match call() {
                Ok(value) => {
                    self.record_success();
                    return Ok(value);
                }
                Err(cause) => {
                    if self.record_failure(&cause) == Decision::Fail {
                        error!(
                            operation = %self.operation,
                            attempts = calls,
                            error = %cause,
                            "request failed; giving up"
                        );
                        return Err(RetriesExhausted {
                            operation: self.operation,
                            attempts: calls,
                            last_failure: cause,
                        });
                    }
                }
            }
        }
    }
}
