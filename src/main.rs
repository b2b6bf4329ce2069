//! docgate: token-gated document server.
//! Used by: binary entrypoint.

use docgate::{config, server, state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = state::build_state(&config)?;
    let addr = config.bind_addr();
    tracing::info!(docs = %config.docs_path, "starting docgate on {}", addr);

    server::run(state, &addr).await?;
    Ok(())
}
