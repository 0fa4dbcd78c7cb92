//! Error types for NetMonit.
//!
//! The reasoning engine itself never fails on data quality; these errors only
//! surface from configuration loading and the optional completion transport.

use crate::llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetmonitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Completion error: {0}")]
    Llm(#[from] LlmError),
}

impl NetmonitError {
    pub fn code(&self) -> i32 {
        match self {
            NetmonitError::Config(_) => -32010,
            NetmonitError::Io(_) => -32006,
            NetmonitError::Toml(_) => -32011,
            NetmonitError::Json(_) => -32700,
            NetmonitError::Llm(_) => -32002,
        }
    }
}

pub type Result<T> = std::result::Result<T, NetmonitError>;
