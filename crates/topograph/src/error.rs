//! Error types for Topograph operations.
//!
//! [`TopographError`] covers everything a host can run into: reading and
//! decoding inventory documents, invalid configuration, provider failures and
//! export problems. [`ProviderError`] is the narrower error a
//! [`DataProvider`](crate::controller::DataProvider) reports.

use std::io;

use thiserror::Error;

/// Failure reported by a data provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Traversal depth {0} is outside the supported range 1..=5")]
    InvalidDepth(u8),

    #[error("Topology unavailable: {0}")]
    Unavailable(String),
}

/// The main error type for Topograph operations.
///
/// # Diagnostic Variants
///
/// The `Decode` variant keeps the document it failed on, so hosts can point
/// at the offending line and column.
#[derive(Debug, Error)]
pub enum TopographError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Decode {
        err: serde_json::Error,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Export error: {0}")]
    Export(String),
}

impl TopographError {
    /// Create a new `Decode` error with the associated source document.
    pub fn new_decode_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Decode {
            err,
            src: src.into(),
        }
    }
}
