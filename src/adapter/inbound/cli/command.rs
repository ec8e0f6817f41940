//! Command-line interface definitions.
//!
//! Defines the `hindsight` CLI using `clap`: running the tracker, recording
//! and observing events by hand, and querying analytics.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::domain::horizon::Horizon;

/// Outcome tracking and scoring for predictive events
#[derive(Parser, Debug)]
#[command(name = "hindsight")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.hindsight/config.toml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the tracker until interrupted
    Run(RunArgs),

    /// Record a new event with its baseline
    Record(RecordArgs),

    /// Record an observed value for one horizon of an event
    Observe(ObserveArgs),

    /// Attach confidence and direction correctness to an event
    Annotate(AnnotateArgs),

    /// Attach trade exit details to an event
    Exit(ExitArgs),

    /// List events due for observation at a horizon
    Due(DueArgs),

    /// Query outcome analytics
    #[command(subcommand)]
    Stats(StatsCommand),

    /// Export recent outcomes as JSON lines
    Export(ExportArgs),

    /// Delete events older than a retention window
    Prune(PruneArgs),
}

/// Arguments for `run`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Run a single tick and exit
    #[arg(long)]
    pub once: bool,
}

/// Arguments for `record`.
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Ticker symbol (stored upper-case)
    #[arg(long)]
    pub ticker: String,

    /// Free-form category tag, e.g. "breakout"
    #[arg(long)]
    pub category: String,

    /// Baseline value at the time of the prediction
    #[arg(long)]
    pub baseline: f64,

    /// Origin tag
    #[arg(long, default_value = "manual")]
    pub source: String,

    /// Optional description
    #[arg(long)]
    pub label: Option<String>,

    /// Explicit event id; reusing an id refreshes that event
    #[arg(long)]
    pub id: Option<String>,

    /// Baseline time (RFC 3339); defaults to now
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

/// Arguments for `observe`.
#[derive(Args, Debug)]
pub struct ObserveArgs {
    /// Event id
    pub id: String,

    /// Horizon key: 15m, 30m, 1h, 4h, 1d, or 7d
    pub horizon: String,

    /// Observed value
    pub value: f64,
}

/// Arguments for `annotate`.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Event id
    pub id: String,

    /// Stated confidence in [0, 1]
    #[arg(long)]
    pub confidence: f64,

    /// Whether the predicted direction was correct
    #[arg(long, action = clap::ArgAction::Set)]
    pub correct: bool,
}

/// Arguments for `exit`.
#[derive(Args, Debug)]
pub struct ExitArgs {
    /// Event id
    pub id: String,

    /// Exit reason tag, e.g. "take_profit"
    #[arg(long)]
    pub reason: String,

    /// Realized profit or loss in percent
    #[arg(long, allow_negative_numbers = true)]
    pub pnl: f64,

    /// Hours the position was held
    #[arg(long)]
    pub hold_hours: f64,
}

/// Arguments for `due`.
#[derive(Args, Debug)]
pub struct DueArgs {
    /// Horizon key: 15m, 30m, 1h, 4h, 1d, or 7d
    pub horizon: Horizon,

    /// Ignore events older than this (defaults to tracker.max_age_days)
    #[arg(long)]
    pub max_age_days: Option<u32>,
}

/// Subcommands for `stats`.
#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// Outcome statistics for a category at one horizon
    Category {
        category: String,
        #[arg(long, default_value_t = 7)]
        days: u32,
        #[arg(long, default_value = "1h")]
        horizon: Horizon,
    },
    /// Final-outcome statistics for a ticker
    Ticker {
        ticker: String,
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Stated confidence versus observed accuracy
    Calibration {
        #[arg(long, default_value_t = 30)]
        days: u32,
        #[arg(long, default_value_t = 0.1)]
        bucket_width: f64,
    },
    /// Trade results grouped by exit reason
    Exits {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Trade results grouped by hold duration
    Holds {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Outcomes grouped by UTC hour of the baseline
    Hours {
        #[arg(long, default_value_t = 30)]
        days: u32,
        #[arg(long, default_value = "1h")]
        horizon: Horizon,
    },
    /// Most recent events with their key horizons
    Recent {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

/// Arguments for `export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Maximum number of events to export
    #[arg(long, default_value_t = 1000)]
    pub limit: usize,

    /// Lookback window in days
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Output file (appends); writes to stdout if not specified
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `prune`.
#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Retention period in days; older events are deleted
    #[arg(long)]
    pub days: u32,
}
