use std::sync::Arc;

use anyhow::Context;
use lq_server::{LqServer, ServerConfig};
use lq_store::QueueStore;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let store = Arc::new(QueueStore::new());
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(LqServer::new(config, store).serve())?;
    Ok(())
}

/// Defaults, then the config file, then command-line flags.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
