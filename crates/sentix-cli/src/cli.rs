//! CLI argument definitions for sentix.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `snapshot` | One full render: sentiment, prices, headlines |
//! | `watch` | Re-render on a fixed interval until Ctrl-C |
//! | `prices` | Spot prices only |
//! | `sentiment` | Fear & Greed history only |
//! | `news` | Sampled headlines only |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `5000` | Per-request timeout in ms |
//! | `--offline` | `false` | Skip the network and serve fallbacks |
//! | `--log-level` | `warn` | Log filter when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! sentix snapshot
//! sentix sentiment --days 30 --format json --pretty
//! RUST_LOG=sentix_core=debug sentix watch --interval-secs 15
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use sentix_core::config::{DEFAULT_HEADLINE_COUNT, DEFAULT_SENTIMENT_DAYS};
use sentix_core::http_client::DEFAULT_TIMEOUT_MS;

/// Crypto market sentiment dashboard
#[derive(Debug, Parser)]
#[command(
    name = "sentix",
    author,
    version,
    about = "Crypto market sentiment dashboard",
    long_about = "Shows the Fear & Greed index, spot prices for a fixed asset set, and a short \
headline feed. Upstream failures never abort a render: each panel falls back to static data."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Never touch the network; every panel shows its fallback data.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal panel.
    Table,
    /// Single JSON document.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the dashboard once.
    Snapshot,
    /// Render the dashboard repeatedly.
    Watch(WatchArgs),
    /// Show spot prices.
    Prices,
    /// Show Fear & Greed history.
    Sentiment(SentimentArgs),
    /// Show sampled headlines.
    News(NewsArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between renders.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,
}

#[derive(Debug, Args)]
pub struct SentimentArgs {
    /// Number of daily readings, newest first.
    #[arg(long, default_value_t = DEFAULT_SENTIMENT_DAYS)]
    pub days: usize,
}

#[derive(Debug, Args)]
pub struct NewsArgs {
    /// Number of distinct headlines to draw.
    #[arg(long, default_value_t = DEFAULT_HEADLINE_COUNT)]
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard() {
        let cli = Cli::try_parse_from(["sentix", "snapshot"]).expect("valid args");
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.timeout_ms, 5_000);
        assert!(!cli.offline);
        assert!(matches!(cli.command, Command::Snapshot));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "sentix",
            "sentiment",
            "--days",
            "30",
            "--format",
            "json",
            "--offline",
        ])
        .expect("valid args");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.offline);
        match cli.command {
            Command::Sentiment(args) => assert_eq!(args.days, 30),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn zero_watch_interval_is_rejected() {
        assert!(Cli::try_parse_from(["sentix", "watch", "--interval-secs", "0"]).is_err());
    }
}
