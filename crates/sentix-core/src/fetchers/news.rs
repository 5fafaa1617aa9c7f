use std::sync::Mutex;

use crate::domain::{NewsItem, Polarity};
use crate::ValidationError;

/// Statically authored headlines for the feed panel.
pub const HEADLINE_CATALOG: [NewsItem; 6] = [
    NewsItem::new(
        "BlackRock Bitcoin ETF trading volume hits an all-time high",
        Polarity::Positive,
    ),
    NewsItem::new(
        "Fed signals rates will stay on hold next quarter",
        Polarity::Neutral,
    ),
    NewsItem::new(
        "Whale moves 10,000 ETH onto an exchange",
        Polarity::Negative,
    ),
    NewsItem::new(
        "SEC delays its ruling on spot Ethereum ETFs",
        Polarity::Negative,
    ),
    NewsItem::new("MicroStrategy buys another 500 BTC", Polarity::Positive),
    NewsItem::new(
        "Inflation prints slightly above forecast, markets turn fearful",
        Polarity::Negative,
    ),
];

/// Draws headlines uniformly at random, without replacement, from a fixed
/// catalog.
#[derive(Debug)]
pub struct NewsSampler {
    catalog: &'static [NewsItem],
    rng: Mutex<fastrand::Rng>,
}

impl NewsSampler {
    /// Sampler over [`HEADLINE_CATALOG`], seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(&HEADLINE_CATALOG, fastrand::Rng::new())
    }

    /// Deterministic sampler over [`HEADLINE_CATALOG`].
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(&HEADLINE_CATALOG, fastrand::Rng::with_seed(seed))
    }

    pub fn with_rng(catalog: &'static [NewsItem], rng: fastrand::Rng) -> Self {
        Self {
            catalog,
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &'static [NewsItem] {
        self.catalog
    }

    /// Return `n` distinct catalog items in random order.
    ///
    /// Runs the first `n` steps of a Fisher-Yates shuffle over catalog
    /// indices, so every `n`-subset is equally likely and no item repeats.
    pub fn sample_headlines(&self, n: usize) -> Result<Vec<NewsItem>, ValidationError> {
        let available = self.catalog.len();
        if n > available {
            return Err(ValidationError::SampleTooLarge {
                requested: n,
                available,
            });
        }

        let mut indices: Vec<usize> = (0..available).collect();
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for i in 0..n {
            let j = rng.usize(i..available);
            indices.swap(i, j);
        }

        Ok(indices[..n].iter().map(|&index| self.catalog[index]).collect())
    }
}

impl Default for NewsSampler {
    fn default() -> Self {
        Self::new()
    }
}
