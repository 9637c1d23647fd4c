//! Error types for promptline.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! layout, repository and cluster-context failures.

use thiserror::Error;

/// Unified error type for promptline.
///
/// Only configuration errors are ever fatal. Everything raised by an optional
/// collaborator is turned into an empty segment by the composer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Segment layout errors (bad order, duplicate rank)
    #[error("Layout error: {0}")]
    Layout(String),

    /// Version-control repository errors
    #[error("Repository error: {0}")]
    Repository(String),

    /// Cluster config errors
    #[error("Cluster context error: {0}")]
    Cluster(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
