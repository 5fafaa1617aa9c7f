//! # Sentix Core
//!
//! Data-acquisition layer for the sentix market dashboard.
//!
//! ## Overview
//!
//! Three independent sources feed the dashboard:
//!
//! - **Prices** for a fixed asset set from CoinGecko, cached for 60 seconds
//! - **Fear & Greed** history from alternative.me, cached for one hour
//! - **Headlines** sampled from a small embedded catalog
//!
//! The network fetchers never fail from the caller's point of view. Any
//! upstream problem (timeout, non-2xx status, malformed payload) is logged
//! and replaced by a static fallback value of the same shape.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Keyed TTL cache with single-flight misses |
//! | [`clock`] | Injectable monotonic clock |
//! | [`config`] | Fixed endpoints, TTLs, timeouts and fallbacks |
//! | [`dashboard`] | Concurrent render cycle and snapshot shaping |
//! | [`domain`] | Prices, sentiment readings, headlines, timestamps |
//! | [`error`] | Validation and upstream error types |
//! | [`fetchers`] | Price, sentiment and news sources |
//! | [`http_client`] | HTTP transport abstraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sentix_core::{Dashboard, DashboardConfig, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dashboard = Dashboard::new(DashboardConfig::default(), Arc::new(ReqwestHttpClient::new()))?;
//!     let snapshot = dashboard.snapshot().await;
//!
//!     if let Some(current) = &snapshot.sentiment.current {
//!         println!("Fear & Greed: {} ({})", current.value, current.classification);
//!     }
//!     for (asset, price) in &snapshot.prices {
//!         println!("{asset}: ${:.0} ({:+.2}%)", price.price_usd, price.change_24h_pct);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!                ┌─────────────────┐
//!                │    Dashboard    │
//!                └────────┬────────┘
//!        ┌────────────────┼────────────────┐
//!        ▼                ▼                ▼
//! ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//! │ PriceFetcher │ │  Sentiment   │ │ NewsSampler  │
//! │  TtlCache    │ │  TtlCache    │ │ (catalog)    │
//! └──────┬───────┘ └──────┬───────┘ └──────────────┘
//!        └───────┬────────┘
//!                ▼
//!        ┌──────────────┐
//!        │  HttpClient  │
//!        │  (reqwest)   │
//!        └──────────────┘
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod fetchers;
pub mod http_client;

pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DashboardConfig, PriceFetcherConfig, SentimentFetcherConfig};
pub use dashboard::{Dashboard, DashboardSnapshot, SentimentPanel};
pub use domain::{
    AssetId, AssetPrice, Classification, NewsItem, Polarity, PriceBook, SentimentReading,
    UtcDateTime,
};
pub use error::{UpstreamError, ValidationError};
pub use fetchers::{NewsSampler, PriceFetcher, SentimentFetcher, HEADLINE_CATALOG};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, OfflineHttpClient, ReqwestHttpClient,
    ScriptedHttpClient,
};
