use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_ASSET_ID_LEN: usize = 64;

/// Upstream asset identifier such as `bitcoin` or `ethereum`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId(String);

impl AssetId {
    /// Parse and normalize an id to lowercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyAssetId);
        }

        let len = normalized.chars().count();
        if len > MAX_ASSET_ID_LEN {
            return Err(ValidationError::AssetIdTooLong {
                len,
                max: MAX_ASSET_ID_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_lowercase() {
                return Err(ValidationError::AssetIdInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-';
            if !valid {
                return Err(ValidationError::AssetIdInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Wrap a compile-time id. Only used for the built-in constants, which
    /// the tests check against [`AssetId::parse`].
    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AssetId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for AssetId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AssetId> for String {
    fn from(value: AssetId) -> Self {
        value.0
    }
}

/// Current USD price and 24h change for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPrice {
    pub asset_id: AssetId,
    pub price_usd: f64,
    pub change_24h_pct: f64,
}

impl AssetPrice {
    pub fn new(
        asset_id: AssetId,
        price_usd: f64,
        change_24h_pct: f64,
    ) -> Result<Self, ValidationError> {
        if !price_usd.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "price_usd" });
        }
        if price_usd < 0.0 {
            return Err(ValidationError::NegativeValue { field: "price_usd" });
        }
        if !change_24h_pct.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "change_24h_pct",
            });
        }

        Ok(Self {
            asset_id,
            price_usd,
            change_24h_pct,
        })
    }
}

/// Prices keyed by asset id, in id order.
pub type PriceBook = BTreeMap<AssetId, AssetPrice>;
