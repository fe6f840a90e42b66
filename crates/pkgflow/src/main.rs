//! Pkgflow CLI binary.

use anyhow::Result;
use pkgflow::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the pkgflow CLI.
///
/// Uses tokio's current_thread runtime; layouts themselves run on the
/// blocking pool.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for JSON and JSONL output.
    // Example: RUST_LOG=pkgflow=debug,pkgflow_jsonl=trace pkgflow serve
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pkgflow=info,pkgflow_jsonl=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting pkgflow CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Pkgflow CLI completed successfully");
    Ok(())
}
