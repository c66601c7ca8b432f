//! cicd-composer - Entry Point
//!
//! Serves the request composer form.

use std::env;
use std::sync::Arc;

use anyhow::Context;
use cicd_toolkit::app::options::ComposerOptions;
use cicd_toolkit::composer::client::Composer;
use cicd_toolkit::logs::{init_logging, LogOptions};
use cicd_toolkit::server::serve::serve;
use cicd_toolkit::server::state::ServerState;
use cicd_toolkit::utils::{parse_cli_args, version_info};

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli_args = parse_cli_args(env::args().skip(1));

    if cli_args.contains_key("version") {
        println!("{}", serde_json::to_string_pretty(&version_info())?);
        return Ok(());
    }

    if let Err(e) = init_logging(LogOptions::from_lookup(|key| env::var(key).ok())) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let mut options = ComposerOptions::from_lookup(|key| env::var(key).ok())?;
    if let Some(host) = cli_args.get("host") {
        options.host = host.clone();
    }
    if let Some(port) = cli_args.get("port") {
        options.port = port
            .parse()
            .with_context(|| format!("invalid --port value '{}'", port))?;
    }

    match &options.base_url_override {
        Some(base) => info!("Requests go to {}", base),
        None => info!("Requests go to http://localhost:<port>"),
    }

    let composer = Arc::new(Composer::new(options.base_url_override.clone())?);
    let state = Arc::new(ServerState::new(composer, options));

    let handle = serve(state, await_shutdown_signal()).await?;
    handle.await.context("composer server task panicked")??;

    Ok(())
}

async fn await_shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Ctrl+C received, shutting down...");
    }
}
