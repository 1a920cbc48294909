//! Error types for parking-system

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Errors raised while reading operator input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid input provided: vehicle registration number is empty")]
    InvalidRegistration,

    #[error("Input stream closed")]
    Closed,
}

/// Invalid input to the fare calculation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FareError {
    #[error("Out time is missing")]
    MissingOutTime,

    #[error("Out time provided is incorrect: {out_time} is before {in_time}")]
    OutTimeBeforeInTime {
        in_time: DateTime<Utc>,
        out_time: DateTime<Utc>,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Fare calculation error: {0}")]
    Fare(#[from] FareError),

    #[error("Unknown parking type: {0}")]
    UnknownParkingType(String),

    #[error("Invalid parking layout: {0}")]
    InvalidLayout(String),

    #[error("Parking transaction failed: {0}")]
    TransactionFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
