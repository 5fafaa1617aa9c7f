mod watch;

use std::sync::Arc;

use sentix_core::{
    Dashboard, DashboardConfig, DashboardSnapshot, HttpClient, NewsItem, OfflineHttpClient,
    PriceBook, ReqwestHttpClient, SentimentPanel,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output;

/// Data produced by one command, ready to render.
#[derive(Debug)]
pub enum Report {
    Snapshot(DashboardSnapshot),
    Prices(PriceBook),
    Sentiment(SentimentPanel),
    News(Vec<NewsItem>),
}

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let dashboard = build_dashboard(cli)?;

    let report = match &cli.command {
        Command::Snapshot => Report::Snapshot(dashboard.snapshot().await),
        Command::Watch(args) => return watch::run(&dashboard, args, cli).await,
        Command::Prices => Report::Prices(dashboard.prices().get_prices().await),
        Command::Sentiment(args) => Report::Sentiment(SentimentPanel::from_history(
            dashboard.sentiment().get_sentiment_history(args.days).await,
        )),
        Command::News(args) => Report::News(dashboard.news().sample_headlines(args.count)?),
    };

    output::render(&report, cli.format, cli.pretty)
}

fn build_dashboard(cli: &Cli) -> Result<Dashboard, CliError> {
    let http_client: Arc<dyn HttpClient> = if cli.offline {
        Arc::new(OfflineHttpClient)
    } else {
        Arc::new(ReqwestHttpClient::new())
    };
    let config = DashboardConfig::default().with_timeout_ms(cli.timeout_ms);

    Ok(Dashboard::new(config, http_client)?)
}
