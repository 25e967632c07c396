//! `noclist`: prints the BADSEC NOC user list.
//!
//! Wires the core client to a ureq transport and the command-line
//! configuration. `main` owns logging setup and the exit code.

pub mod config;
pub mod logging;
pub mod transport;

use badsec_core::{BadsecClient, RetriesExhausted, UserList};

pub use config::{Args, LogFormat};
pub use transport::UreqTransport;

/// Printed to stderr when a run ends in terminal failure.
pub const FAILURE_MESSAGE: &str =
    "The service has failed to respond successfully. Please try again later.";

/// One complete run: authorize, then fetch and log the user list.
pub fn run(args: &Args) -> Result<UserList, RetriesExhausted> {
    let transport = UreqTransport::new(args.timeout());
    let mut client =
        BadsecClient::new(&args.base_url, transport).with_max_retries(args.max_retries);
    client.fetch_users()
}
