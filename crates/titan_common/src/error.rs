//! Error types for the TITAN-1 uplink.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TitanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document index request failed with status {0}")]
    HttpStatus(u16),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Render error: {0}")]
    Render(String),
}

impl TitanError {
    /// Short category label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            TitanError::Io(_) => "io",
            TitanError::Json(_) => "json",
            TitanError::Http(_) | TitanError::HttpStatus(_) => "http",
            TitanError::Config(_) => "config",
            TitanError::Render(_) => "render",
        }
    }
}

pub type Result<T> = std::result::Result<T, TitanError>;
