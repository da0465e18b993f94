//! apt-s3 — an APT acquire method for Amazon S3.
//!
//! Installed as `/usr/lib/apt/methods/s3`, this binary lets APT sources
//! use `s3://` URLs. APT launches it with the method protocol on
//! stdin/stdout; stdout therefore belongs to the protocol and every
//! diagnostic goes to stderr.
//!
//! # Usage
//!
//! ```text
//! deb s3://my-bucket.s3.amazonaws.com/repo stable main
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `warn` | Log level filter (stderr) |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! Region, role, and endpoint overrides arrive through APT's own
//! configuration (`-o Acquire::s3::region=…`), not the environment.
//! AWS credentials are resolved by the SDK default chain unless the
//! source URL embeds them.
//!
//! # Exit Codes
//!
//! `0` once APT closes stdin and all fetches have finished; `1` after any
//! fatal protocol or store error (reported as `401 General Failure`).

use anyhow::{Context, Result};
use apt_s3_core::AcquireEngine;
use apt_s3_store::AwsStoreProvider;
use tokio::io::BufReader;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    Ok(())
}

/// Read the log level from the environment.
fn log_level() -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&log_level())?;

    let engine = AcquireEngine::new(AwsStoreProvider);
    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    engine
        .run(input, output)
        .await
        .inspect_err(|err| error!(error = %err, "method terminated on fatal error"))?;

    Ok(())
}
