//! Error handling for the chainapi generator and client.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use chainapi_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for chainapi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for chainapi operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Swagger document error
    #[error("Swagger error: {0}")]
    Swagger(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The driver was handed nothing to generate from
    #[error("No Swagger documents were supplied")]
    NoDocuments,

    /// Two documents were supplied under the same chain name
    #[error("Chain '{0}' was supplied more than once")]
    DuplicateChain(String),

    /// A path entry has no usable operation identifier
    #[error("Operation at '{path}' in chain '{chain}' has no operationId")]
    MissingOperationId { chain: String, path: String },

    /// A definition refers back to itself while being expanded
    #[error("Cyclic schema reference through definition '{0}'")]
    CyclicReference(String),

    /// Non-success HTTP status from a chain node
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// RPC envelope carried an error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// REST envelope carried an error
    #[error("REST error: {0}")]
    Rest(String),

    /// Chain name missing from the built-in chain table
    #[error("Unknown chain: {0}")]
    UnknownChain(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new Swagger document error
    pub fn swagger<S: Into<String>>(msg: S) -> Self {
        Self::Swagger(msg.into())
    }
}
