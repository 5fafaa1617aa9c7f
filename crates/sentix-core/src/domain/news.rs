use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Tone of a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl Polarity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl Display for Polarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statically authored feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NewsItem {
    pub headline: &'static str,
    pub polarity: Polarity,
}

impl NewsItem {
    pub const fn new(headline: &'static str, polarity: Polarity) -> Self {
        Self { headline, polarity }
    }
}
