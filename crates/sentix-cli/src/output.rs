use serde::Serialize;
use sentix_core::{DashboardSnapshot, NewsItem, Polarity, PriceBook, SentimentPanel};

use crate::cli::OutputFormat;
use crate::commands::Report;
use crate::error::CliError;

const GAUGE_WIDTH: usize = 20;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = match report {
                Report::Snapshot(snapshot) => to_json(snapshot, pretty)?,
                Report::Prices(prices) => to_json(prices, pretty)?,
                Report::Sentiment(panel) => to_json(panel, pretty)?,
                Report::News(items) => to_json(items, pretty)?,
            };
            println!("{payload}");
        }
        OutputFormat::Table => {
            let lines = match report {
                Report::Snapshot(snapshot) => snapshot_lines(snapshot),
                Report::Prices(prices) => price_lines(prices),
                Report::Sentiment(panel) => sentiment_lines(panel),
                Report::News(items) => headline_lines(items),
            };
            for line in lines {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Visual break between consecutive watch renders.
pub fn render_separator(format: OutputFormat) {
    if format == OutputFormat::Table {
        println!("{}", "─".repeat(48));
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn snapshot_lines(snapshot: &DashboardSnapshot) -> Vec<String> {
    let mut lines = sentiment_lines(&snapshot.sentiment);
    lines.push(String::new());
    lines.extend(price_lines(&snapshot.prices));
    lines.push(String::new());
    lines.extend(headline_lines(&snapshot.headlines));
    lines.push(String::new());
    lines.push(format!("rendered at {}", snapshot.rendered_at));
    lines
}

fn sentiment_lines(panel: &SentimentPanel) -> Vec<String> {
    let mut lines = Vec::with_capacity(panel.trend.len() + 2);
    match &panel.current {
        Some(current) => lines.push(format!(
            "Fear & Greed  {:>3}  {:<13}  {}",
            current.value,
            current.classification,
            gauge(current.value)
        )),
        None => lines.push(String::from("Fear & Greed  no readings")),
    }

    if !panel.trend.is_empty() {
        lines.push(format!("Trend ({} days)", panel.trend.len()));
        for reading in &panel.trend {
            lines.push(format!(
                "  {}  {:>3}  {}",
                reading.timestamp.date_label(),
                reading.value,
                gauge(reading.value)
            ));
        }
    }
    lines
}

fn price_lines(prices: &PriceBook) -> Vec<String> {
    let mut lines = vec![String::from("Prices")];
    lines.extend(prices.values().map(|price| {
        format!(
            "  {:<10}  {:>12}  {:>8}",
            price.asset_id.as_str(),
            format_usd(price.price_usd),
            format_change(price.change_24h_pct)
        )
    }));
    lines
}

fn headline_lines(items: &[NewsItem]) -> Vec<String> {
    let mut lines = vec![String::from("Headlines")];
    lines.extend(
        items
            .iter()
            .map(|item| format!("  {} {}", polarity_tag(item.polarity), item.headline)),
    );
    lines
}

fn gauge(value: u8) -> String {
    let filled = usize::from(value.min(100)) * GAUGE_WIDTH / 100;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled)
    )
}

const fn polarity_tag(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Positive => "[+]",
        Polarity::Neutral => "[=]",
        Polarity::Negative => "[-]",
    }
}

/// Whole dollars with thousands separators above $1,000, cents below.
fn format_usd(value: f64) -> String {
    if value < 1_000.0 {
        return format!("${value:.2}");
    }

    let digits = format!("{:.0}", value);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

fn format_change(pct: f64) -> String {
    format!("{pct:+.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentix_core::fetchers::{fallback_history, fallback_prices};
    use sentix_core::{AssetId, UtcDateTime};

    #[test]
    fn usd_amounts_are_grouped() {
        assert_eq!(format_usd(96_450.20), "$96,450");
        assert_eq!(format_usd(3_450.12), "$3,450");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
        assert_eq!(format_usd(0.4567), "$0.46");
    }

    #[test]
    fn changes_carry_a_sign() {
        assert_eq!(format_change(2.45), "+2.45%");
        assert_eq!(format_change(-1.2), "-1.20%");
    }

    #[test]
    fn gauge_is_proportional() {
        assert_eq!(gauge(0), format!("[{}]", "░".repeat(20)));
        assert_eq!(gauge(100), format!("[{}]", "█".repeat(20)));
        assert_eq!(gauge(78).matches('█').count(), 15);
    }

    #[test]
    fn fallback_prices_render_as_cards() {
        let assets = vec![
            AssetId::parse("bitcoin").expect("valid"),
            AssetId::parse("ethereum").expect("valid"),
        ];
        let lines = price_lines(&fallback_prices(&assets));

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("bitcoin") && lines[1].contains("$96,450") && lines[1].contains("+2.45%"));
        assert!(lines[2].contains("ethereum") && lines[2].contains("$3,450") && lines[2].contains("-1.20%"));
    }

    #[test]
    fn sentiment_panel_shows_current_and_trend() {
        let panel = SentimentPanel::from_history(fallback_history(
            3,
            UtcDateTime::from_unix_seconds(1_700_000_000).expect("in range"),
        ));
        let lines = sentiment_lines(&panel);

        assert!(lines[0].contains("78") && lines[0].contains("Extreme Greed"));
        assert_eq!(lines[1], "Trend (3 days)");
        assert!(lines[2].starts_with("  2023-11-14"));
    }
}
