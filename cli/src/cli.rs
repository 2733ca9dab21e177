use std::time::Duration;

use backend::config::{AppConfig, new_round_from};
use clap::{Parser, ValueEnum};
use engine::OwnerAssignment;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OwnerAssignmentCli {
    PerBatch,
    PerUser,
}

#[derive(Debug, Parser)]
#[clap(
    name = "seat-contention",
    version,
    about = "Drives contended seat bookings against a booking service"
)]
pub struct Cli {
    /// Booking service base URL
    #[clap(long)]
    pub host: Option<String>,

    /// Size of the synthetic owner pool (locust-0 .. locust-N-1)
    #[clap(long)]
    pub num_owners: Option<usize>,

    /// Mutations per batch; rosters smaller than this fail the cycle
    #[clap(long)]
    pub num_blocks: Option<usize>,

    /// Max downward step of the counter walk
    #[clap(long)]
    pub under: Option<u32>,

    /// Max upward step of the counter walk
    #[clap(long)]
    pub over: Option<u32>,

    /// When the owner is drawn
    #[clap(long, value_enum)]
    pub owner_assignment: Option<OwnerAssignmentCli>,

    /// Milliseconds between cycle starts
    #[clap(long)]
    pub interval_ms: Option<u64>,

    /// Stop after this many cycles (default: run until Ctrl-C)
    #[clap(long)]
    pub cycles: Option<u64>,

    /// Seed for reproducible runs
    #[clap(long)]
    pub seed: Option<u64>,

    /// Start a fresh round with this many rows before running
    #[clap(long)]
    pub new_round_rows: Option<u32>,

    /// Start a fresh round with this many columns before running
    #[clap(long)]
    pub new_round_cols: Option<u32>,

    /// Emit JSON logs
    #[clap(long)]
    pub json_logs: bool,
}

/// Convert CLI owner assignment → engine policy
pub(crate) fn cli_to_assignment(a: OwnerAssignmentCli) -> OwnerAssignment {
    match a {
        OwnerAssignmentCli::PerBatch => OwnerAssignment::PerBatch,
        OwnerAssignmentCli::PerUser => OwnerAssignment::PerUser,
    }
}

/// Flags win over the environment-derived config.
pub(crate) fn apply_overrides(cli: &Cli, mut cfg: AppConfig) -> AppConfig {
    if let Some(host) = &cli.host {
        cfg.base_url = host.clone();
    }
    if let Some(n) = cli.num_owners {
        cfg.contention.num_owners = n;
    }
    if let Some(n) = cli.num_blocks {
        cfg.contention.num_blocks = n;
    }
    if let Some(n) = cli.under {
        cfg.contention.under = n;
    }
    if let Some(n) = cli.over {
        cfg.contention.over = n;
    }
    if let Some(a) = cli.owner_assignment {
        cfg.owner_assignment = cli_to_assignment(a);
    }
    if let Some(ms) = cli.interval_ms {
        cfg.cycle_interval = Duration::from_millis(ms);
    }
    if cli.cycles.is_some() {
        cfg.max_cycles = cli.cycles;
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    if cli.new_round_rows.is_some() || cli.new_round_cols.is_some() {
        cfg.new_round = new_round_from(cli.new_round_rows, cli.new_round_cols);
    }
    cfg.json_logs |= cli.json_logs;
    cfg
}
