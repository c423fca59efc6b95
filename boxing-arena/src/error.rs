//! Boundary errors - configuration and JS pose decoding
//!
//! The combat core never fails. These only surface where JSON or JS data
//! enters the crate.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while loading or validating a [`crate::config::GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{difficulty} weights must be non-negative and sum to 1 (got {sum})")]
    InvalidWeights { difficulty: &'static str, sum: f64 },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Errors raised while decoding a pose payload from JavaScript
#[derive(Debug, Error)]
pub enum PoseError {
    #[error("invalid pose data length: {got} (expected {expected})")]
    WrongLength { got: usize, expected: usize },

    #[error("undecodable keypoint list: {0}")]
    Decode(String),
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<PoseError> for JsValue {
    fn from(err: PoseError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
