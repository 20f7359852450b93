use std::sync::Arc;

use aspectkit_core::TracingLogger;
use aspectkit_server::telemetry::init_logging;
use aspectkit_server::{Cli, NetworkModule};
use clap::Parser;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config();
    init_logging(&config.log)?;

    let mut module = NetworkModule::new(&config, Arc::new(TracingLogger));
    let port = module.start().await?;
    info!(port, "aspectkit server listening");

    module.serve(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c, shutting down");
    }
}
