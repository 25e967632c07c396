use std::time::Duration;

use badsec_core::MAX_RETRIES;
use clap::{Parser, ValueEnum};

/// Fetch the NOC user list from the BADSEC server
#[derive(Parser, Debug, Clone)]
#[command(name = "noclist", version)]
pub struct Args {
    /// Base URL of the BADSEC server
    #[arg(long, env = "BADSEC_URL", default_value = "http://0.0.0.0:8888")]
    pub base_url: String,

    /// Retries allowed per request before giving up
    #[arg(long, env = "BADSEC_MAX_RETRIES", default_value_t = MAX_RETRIES)]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "BADSEC_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}
