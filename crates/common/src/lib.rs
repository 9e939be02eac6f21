//! SAP Common Library
//!
//! Shared code for all SAP crates including:
//! - Citation graph model (papers, citations, role scores)
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod graph;
pub mod metrics;

// Re-export commonly used types
pub use config::{AppConfig, ClassifierConfig, Count};
pub use errors::{ErrorCode, Result, SapError};
pub use graph::{CitationGraph, Paper, PaperIndex, Role, RoleEntry};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default resolver prefix for DOI links
pub const DEFAULT_DOI_RESOLVER: &str = "https://dx.doi.org/";
