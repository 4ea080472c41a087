//! Chat API server entry point
//!
//! ```bash
//! cargo run -p chat-api
//! ```
//!
//! Configuration comes from the environment (and `.env` when present).

use anyhow::Context;
use chat_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        addr = %config.api.address(),
        "Starting chat API server"
    );

    chat_api::run(config).await.context("server failed")?;
    Ok(())
}
