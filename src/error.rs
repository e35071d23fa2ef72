//! Error types for the configuration surface.
//!
//! Drawing itself never fails: contract violations are logged and the
//! element is skipped. Only loading style sheets, metric tables and
//! engraving configs returns errors.

use thiserror::Error;

use crate::style::Sid;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("style value for `{key:?}` must be {expected}")]
    StyleType { key: Sid, expected: &'static str },

    #[error("invalid color `{0}` (expected #rrggbb or #rrggbbaa)")]
    Color(String),

    #[error("symbol `{0}` has a negative advance")]
    Metric(String),
}
