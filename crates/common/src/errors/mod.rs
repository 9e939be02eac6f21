//! Error types for SAP
//!
//! Provides a single error enum shared by the loader, the classifier and the
//! command line front end, with:
//! - Distinct error kinds for different failure modes
//! - Machine-readable error codes
//! - Process exit code mapping

use crate::graph::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using SapError
pub type Result<T> = std::result::Result<T, SapError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Graph errors (1xxx)
    CyclicGraph,
    PaperNotFound,
    EmptySelection,

    // Configuration errors (2xxx)
    InvalidConfiguration,
    ConfigurationError,

    // Input errors (3xxx)
    ParseError,
    IoError,

    // Internal errors (9xxx)
    SerializationError,
    InternalError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Graph (1xxx)
            ErrorCode::CyclicGraph => 1001,
            ErrorCode::PaperNotFound => 1002,
            ErrorCode::EmptySelection => 1003,

            // Configuration (2xxx)
            ErrorCode::InvalidConfiguration => 2001,
            ErrorCode::ConfigurationError => 2002,

            // Input (3xxx)
            ErrorCode::ParseError => 3001,
            ErrorCode::IoError => 3002,

            // Internal (9xxx)
            ErrorCode::SerializationError => 9001,
            ErrorCode::InternalError => 9002,
        }
    }
}

/// SAP error types
#[derive(Error, Debug)]
pub enum SapError {
    // Graph errors
    #[error("Citation graph contains a cycle through paper: {paper}")]
    CyclicGraph { paper: String },

    #[error("Paper not found: {id}")]
    PaperNotFound { id: String },

    #[error("No {role} members selected")]
    EmptySelection { role: Role },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Input errors
    #[error("Parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl SapError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            SapError::CyclicGraph { .. } => ErrorCode::CyclicGraph,
            SapError::PaperNotFound { .. } => ErrorCode::PaperNotFound,
            SapError::EmptySelection { .. } => ErrorCode::EmptySelection,
            SapError::InvalidConfiguration { .. } => ErrorCode::InvalidConfiguration,
            SapError::Config(_) => ErrorCode::ConfigurationError,
            SapError::Parse { .. } => ErrorCode::ParseError,
            SapError::Io(_) => ErrorCode::IoError,
            SapError::Serialization(_) => ErrorCode::SerializationError,
            SapError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            // Bad input data
            SapError::CyclicGraph { .. }
            | SapError::PaperNotFound { .. }
            | SapError::EmptySelection { .. }
            | SapError::Parse { .. } => 65,

            // Bad configuration or usage
            SapError::InvalidConfiguration { .. } | SapError::Config(_) => 78,

            // Files and streams
            SapError::Io(_) => 74,

            SapError::Serialization(_) | SapError::Other(_) => 70,
        }
    }

    /// Whether the error only invalidates the current graph
    ///
    /// Callers iterating over a collection may report these and move on to the
    /// next graph; every other error aborts the whole run.
    pub fn is_graph_local(&self) -> bool {
        matches!(
            self,
            SapError::CyclicGraph { .. } | SapError::EmptySelection { .. }
        )
    }
}
