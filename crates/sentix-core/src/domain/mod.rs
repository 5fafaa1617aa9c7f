//! # Domain Models
//!
//! Display-ready values produced by the fetchers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AssetId`] | Validated upstream asset identifier |
//! | [`AssetPrice`] | USD price and 24h change for one asset |
//! | [`PriceBook`] | Prices keyed by asset id |
//! | [`SentimentReading`] | One daily Fear & Greed reading |
//! | [`Classification`] | Fear & Greed band |
//! | [`NewsItem`] | Static headline with a [`Polarity`] |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Constructors validate their invariants (non-negative prices, index
//! values in `0..=100`, UTC timestamps), so a value that exists is valid.

mod asset;
mod news;
mod sentiment;
mod timestamp;

pub use asset::{AssetId, AssetPrice, PriceBook};
pub use news::{NewsItem, Polarity};
pub use sentiment::{Classification, SentimentReading};
pub use timestamp::UtcDateTime;
