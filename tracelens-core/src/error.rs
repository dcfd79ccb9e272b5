//! Error types for tracelens-core

use thiserror::Error;

/// Main error type for the tracelens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// No qualifying tool invocation block in a record.
    ///
    /// This is the only structural failure a per-tool parser raises;
    /// input-shape defects are absorbed with defaults instead.
    #[error("no '{tool}' invocation block in record {record_id}")]
    MissingInvocation { tool: String, record_id: String },

    /// JSON parsing error (fixtures, embedded payloads)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for tracelens-core
pub type Result<T> = std::result::Result<T, Error>;
