pub mod cli;

use std::sync::Arc;

use backend::{booking::BookingClient, config::AppConfig, logger::init_tracing, run::run};
use clap::Parser;
use cli::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = apply_overrides(&cli, AppConfig::from_env()?);
    cfg.validate()?;

    init_tracing(cfg.json_logs);

    tracing::info!(
        host = %cfg.base_url,
        num_owners = cfg.contention.num_owners,
        num_blocks = cfg.contention.num_blocks,
        under = cfg.contention.under,
        over = cfg.contention.over,
        owner_assignment = %cfg.owner_assignment,
        "starting seat contention load"
    );

    let client = Arc::new(BookingClient::new(cfg.base_url.clone(), cfg.request_timeout)?);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let summary = run(client, &cfg, shutdown).await?;

    tracing::info!(
        cycles = summary.counters.cycles,
        mutations_sent = summary.counters.mutations_sent,
        "done"
    );

    Ok(())
}
