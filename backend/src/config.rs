use std::str::FromStr;
use std::time::Duration;

use corelib::NewRoundRequest;
use engine::{ContentionConfig, OwnerAssignment};

use crate::error::AppError;

/// Seats per side when only one of rows/cols is given for a new round.
const DEFAULT_ROUND_SIDE: u32 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the booking service, e.g. `http://localhost:3000`.
    pub base_url: String,

    // =========================
    // Contention configuration
    // =========================
    /// Owner pool size, batch size and the counter walk bounds.
    pub contention: ContentionConfig,

    /// Whether the owner is redrawn each batch or fixed per user.
    pub owner_assignment: OwnerAssignment,

    // =========================
    // Run configuration
    // =========================
    /// Pause between the starts of two cycles.
    ///
    /// Missed ticks are skipped, so a slow service lowers the request rate
    /// instead of producing a burst afterwards.
    pub cycle_interval: Duration,

    /// Per-request timeout applied by the HTTP client.
    pub request_timeout: Duration,

    /// Stop after this many cycles. `None` runs until Ctrl-C.
    pub max_cycles: Option<u64>,

    /// Seed for the user RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Reset the service to a fresh `rows × cols` round before starting.
    pub new_round: Option<NewRoundRequest>,

    /// Emit JSON logs instead of the pretty format.
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            contention: ContentionConfig::default(),
            owner_assignment: OwnerAssignment::default(),
            cycle_interval: Duration::from_millis(1_000),
            request_timeout: Duration::from_millis(5_000),
            max_cycles: None,
            seed: None,
            new_round: None,
            json_logs: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (env, test map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let contention = ContentionConfig {
            num_owners: parse_or(&lookup, "LOADGEN_NUM_OWNERS", defaults.contention.num_owners)?,
            num_blocks: parse_or(&lookup, "LOADGEN_NUM_BLOCKS", defaults.contention.num_blocks)?,
            under: parse_or(&lookup, "LOADGEN_UNDER", defaults.contention.under)?,
            over: parse_or(&lookup, "LOADGEN_OVER", defaults.contention.over)?,
        };

        let owner_assignment = match lookup("LOADGEN_OWNER_ASSIGNMENT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("LOADGEN_OWNER_ASSIGNMENT: {e}")))?,
            None => defaults.owner_assignment,
        };

        let rows: Option<u32> = parse_opt(&lookup, "LOADGEN_NEW_ROUND_ROWS")?;
        let cols: Option<u32> = parse_opt(&lookup, "LOADGEN_NEW_ROUND_COLS")?;
        let new_round = new_round_from(rows, cols);

        let cfg = Self {
            base_url: lookup("LOADGEN_HOST").unwrap_or(defaults.base_url),
            contention,
            owner_assignment,
            cycle_interval: Duration::from_millis(parse_or(
                &lookup,
                "LOADGEN_CYCLE_INTERVAL_MS",
                defaults.cycle_interval.as_millis() as u64,
            )?),
            request_timeout: Duration::from_millis(parse_or(
                &lookup,
                "LOADGEN_REQUEST_TIMEOUT_MS",
                defaults.request_timeout.as_millis() as u64,
            )?),
            max_cycles: parse_opt(&lookup, "LOADGEN_MAX_CYCLES")?,
            seed: parse_opt(&lookup, "LOADGEN_SEED")?,
            new_round,
            json_logs: parse_or(&lookup, "LOADGEN_LOG_JSON", defaults.json_logs)?,
        };

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.contention.validate()?;

        if self.base_url.trim().is_empty() {
            return Err(AppError::Config("base url is empty".into()));
        }
        if self.cycle_interval.is_zero() {
            return Err(AppError::Config("cycle interval must be positive".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::Config("request timeout must be positive".into()));
        }
        if matches!(self.new_round, Some(r) if r.rows == 0 || r.cols == 0) {
            return Err(AppError::Config("new round needs at least one row and column".into()));
        }
        Ok(())
    }
}

/// Either side of a new round may be omitted; the other keeps its default.
pub fn new_round_from(rows: Option<u32>, cols: Option<u32>) -> Option<NewRoundRequest> {
    match (rows, cols) {
        (None, None) => None,
        (rows, cols) => Some(NewRoundRequest {
            rows: rows.unwrap_or(DEFAULT_ROUND_SIDE),
            cols: cols.unwrap_or(DEFAULT_ROUND_SIDE),
        }),
    }
}

fn parse_opt<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::Config(format!("{key}={raw:?}: {e}")))
        })
        .transpose()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
