use thiserror::Error;

use crate::http_client::HttpError;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("asset id cannot be empty")]
    EmptyAssetId,
    #[error("asset id length {len} exceeds max {max}")]
    AssetIdTooLong { len: usize, max: usize },
    #[error("asset id must start with a lowercase ASCII letter: '{ch}'")]
    AssetIdInvalidStart { ch: char },
    #[error("asset id contains invalid character '{ch}' at index {index}")]
    AssetIdInvalidChar { ch: char, index: usize },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("field '{field}' is not an integer: '{value}'")]
    NotAnInteger { field: &'static str, value: String },
    #[error("sentiment value {value} is outside 0..=100")]
    SentimentOutOfRange { value: i64 },
    #[error("unix timestamp {value} is out of range")]
    TimestampOutOfRange { value: i64 },
    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("cannot sample {requested} headlines from a catalog of {available}")]
    SampleTooLarge { requested: usize, available: usize },
}

/// Upstream failures absorbed by the fetchers.
///
/// Every variant means the same thing to callers: the upstream is
/// unavailable and the fallback value applies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("malformed payload: {reason}")]
    Malformed { reason: String },
}

impl UpstreamError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(error: serde_json::Error) -> Self {
        Self::malformed(error.to_string())
    }
}

impl From<ValidationError> for UpstreamError {
    fn from(error: ValidationError) -> Self {
        Self::malformed(error.to_string())
    }
}
