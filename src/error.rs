//! Error types for the fallible edges of the crate.
//!
//! The chunk store itself never fails: writes always land and reads answer with
//! `None`. Errors only come from loading configuration and resolving string ids.

use std::io;

use thiserror::Error;

/// Failure to load or validate a [`ChunkManagerConfig`](crate::config::ChunkManagerConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    /// The configuration is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure to resolve a block type from the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No block type is registered under this id.
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),
}
