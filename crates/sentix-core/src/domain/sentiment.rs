use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Fear & Greed band label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl Classification {
    pub const ALL: [Self; 5] = [
        Self::ExtremeFear,
        Self::Fear,
        Self::Neutral,
        Self::Greed,
        Self::ExtremeGreed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtremeFear => "Extreme Fear",
            Self::Fear => "Fear",
            Self::Neutral => "Neutral",
            Self::Greed => "Greed",
            Self::ExtremeGreed => "Extreme Greed",
        }
    }

    /// Match an upstream label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.label().eq_ignore_ascii_case(label))
    }

    /// Band for an index value in `0..=100`.
    pub const fn from_value(value: u8) -> Self {
        match value {
            0..=24 => Self::ExtremeFear,
            25..=44 => Self::Fear,
            45..=55 => Self::Neutral,
            56..=75 => Self::Greed,
            _ => Self::ExtremeGreed,
        }
    }

    pub const fn is_greed(self) -> bool {
        matches!(self, Self::Greed | Self::ExtremeGreed)
    }

    pub const fn is_fear(self) -> bool {
        matches!(self, Self::Fear | Self::ExtremeFear)
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// One daily reading of the Fear & Greed index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub value: u8,
    pub classification: Classification,
    pub timestamp: UtcDateTime,
}

impl SentimentReading {
    pub fn new(
        value: i64,
        classification: Classification,
        timestamp: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        let value = u8::try_from(value)
            .ok()
            .filter(|value| *value <= 100)
            .ok_or(ValidationError::SentimentOutOfRange { value })?;

        Ok(Self {
            value,
            classification,
            timestamp,
        })
    }

    /// Build a reading from the string-encoded fields the index API returns.
    ///
    /// An unrecognised label falls back to the band implied by `value`.
    pub fn from_raw(value: &str, label: &str, timestamp: &str) -> Result<Self, ValidationError> {
        let value = parse_integer("value", value)?;
        let seconds = parse_integer("timestamp", timestamp)?;
        let timestamp = UtcDateTime::from_unix_seconds(seconds)?;

        let mut reading = Self::new(value, Classification::Neutral, timestamp)?;
        reading.classification =
            Classification::from_label(label).unwrap_or(Classification::from_value(reading.value));
        Ok(reading)
    }
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_encoded_record() {
        let reading = SentimentReading::from_raw("78", "Extreme Greed", "1700000000")
            .expect("record should parse");

        assert_eq!(reading.value, 78);
        assert_eq!(reading.classification, Classification::ExtremeGreed);
        assert_eq!(
            reading.timestamp,
            UtcDateTime::from_unix_seconds(1_700_000_000).expect("in range")
        );
    }

    #[test]
    fn unknown_label_is_derived_from_value() {
        let reading = SentimentReading::from_raw("30", "Anxious", "1700000000").expect("parses");
        assert_eq!(reading.classification, Classification::Fear);
    }

    #[test]
    fn label_matching_ignores_case() {
        assert_eq!(
            Classification::from_label(" extreme fear "),
            Some(Classification::ExtremeFear)
        );
        assert_eq!(Classification::from_label("Bullish"), None);
    }

    #[test]
    fn value_bands_cover_the_full_range() {
        assert_eq!(Classification::from_value(0), Classification::ExtremeFear);
        assert_eq!(Classification::from_value(24), Classification::ExtremeFear);
        assert_eq!(Classification::from_value(25), Classification::Fear);
        assert_eq!(Classification::from_value(50), Classification::Neutral);
        assert_eq!(Classification::from_value(75), Classification::Greed);
        assert_eq!(Classification::from_value(76), Classification::ExtremeGreed);
        assert_eq!(Classification::from_value(100), Classification::ExtremeGreed);
    }

    #[test]
    fn rejects_out_of_range_or_non_numeric_values() {
        let ts = "1700000000";
        assert!(matches!(
            SentimentReading::from_raw("101", "Extreme Greed", ts),
            Err(ValidationError::SentimentOutOfRange { value: 101 })
        ));
        assert!(SentimentReading::from_raw("-3", "Fear", ts).is_err());
        assert!(matches!(
            SentimentReading::from_raw("high", "Greed", ts),
            Err(ValidationError::NotAnInteger { field: "value", .. })
        ));
        assert!(SentimentReading::from_raw("50", "Neutral", "yesterday").is_err());
    }
}
