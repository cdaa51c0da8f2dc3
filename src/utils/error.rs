//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the holder lookup service
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid lookup response: {0}")]
    InvalidResponse(String),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(String),

    #[error("Contract address is required")]
    MissingAddress,
}

/// Errors that can occur while reading or writing contract lists
#[derive(Error, Debug)]
pub enum ContractListError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur when selecting holders for export
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("No holder data available for export")]
    Empty,

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}
