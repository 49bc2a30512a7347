// Error types for each stage of a conversion request

use thiserror::Error;

/// Text recognizer failures
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("OCR models not found, expected:\n  - {detection}\n  - {recognition}")]
    ModelsNotFound {
        detection: String,
        recognition: String,
    },

    #[error("Failed to load OCR model: {0}")]
    ModelLoad(String),

    #[error("Image rejected by OCR engine: {0}")]
    InvalidImage(String),

    #[error("OCR engine error: {0}")]
    Engine(String),
}

/// Price detection failures
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("No price detected in image")]
    NoPriceFound,
}

/// Exchange-rate lookup failures
#[derive(Debug, Error)]
pub enum RateError {
    #[error("Rate service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Rate service returned malformed JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Rate service response has no numeric data.KRW.value")]
    MissingRate,

    #[error("Rate service returned unusable rate {0}")]
    InvalidRate(f64),
}

/// Session misuse and the stage errors it surfaces
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {action} while on the {state} screen")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Rate(#[from] RateError),
}

/// Configuration problems found at start-up
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No currency API key configured (set CURRENCY_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
