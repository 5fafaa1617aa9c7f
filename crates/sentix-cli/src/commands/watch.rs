use std::time::Duration;

use sentix_core::Dashboard;
use tokio::time::MissedTickBehavior;

use crate::cli::{Cli, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::Report;

/// Render on every tick until Ctrl-C. The fetcher caches decide whether a
/// tick actually reaches the network.
pub async fn run(dashboard: &Dashboard, args: &WatchArgs, cli: &Cli) -> Result<(), CliError> {
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut renders = 0_u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = dashboard.snapshot().await;
                if renders > 0 {
                    output::render_separator(cli.format);
                }
                output::render(&Report::Snapshot(snapshot), cli.format, cli.pretty)?;
                renders += 1;
            }
            signal = &mut shutdown => {
                signal?;
                tracing::info!(renders, "watch stopped");
                return Ok(());
            }
        }
    }
}
