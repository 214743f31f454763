//! Chunk manager configuration.
//!
//! Every field has a default, so an empty JSON object is a valid configuration:
//!
//! ```json
//! {
//!     "max_loaded_chunks": 64,
//!     "eviction_radius": 8,
//!     "eviction_policy": "proximity_sweep",
//!     "block_size": 0.1
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Resident chunk count above which eviction runs.
pub const DEFAULT_MAX_LOADED_CHUNKS: usize = 64;
/// Manhattan distance, in chunks, beyond which a proximity sweep unloads chunks.
pub const DEFAULT_EVICTION_RADIUS: i32 = 8;
/// Physical edge length of one block in continuous space.
pub const DEFAULT_BLOCK_SIZE: f32 = 0.1;

/// How the chunk manager frees memory once it holds too many chunks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Unload every chunk farther than `eviction_radius` from the chunk that was just
    /// created. There is no recency tracking and no hard cap: chunks inside the radius
    /// stay resident, even if that keeps the count above the maximum.
    #[default]
    ProximitySweep,
    /// Unload the least recently used chunks until the count fits the maximum. The
    /// resident count never exceeds `max_loaded_chunks`.
    LeastRecentlyUsed,
}

/// Tuning knobs for [`ChunkManager`](crate::voxels::chunk_manager::ChunkManager).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkManagerConfig {
    /// Resident chunk count that triggers eviction when exceeded. At least 1.
    pub max_loaded_chunks: usize,
    /// Radius used by [`EvictionPolicy::ProximitySweep`]. Not negative.
    pub eviction_radius: i32,
    /// Which eviction strategy to run.
    pub eviction_policy: EvictionPolicy,
    /// Edge length of one block in continuous space. Positive.
    pub block_size: f32,
}

impl Default for ChunkManagerConfig {
    fn default() -> Self {
        ChunkManagerConfig {
            max_loaded_chunks: DEFAULT_MAX_LOADED_CHUNKS,
            eviction_radius: DEFAULT_EVICTION_RADIUS,
            eviction_policy: EvictionPolicy::default(),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl ChunkManagerConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ChunkManagerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Checks that every field lies in its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_loaded_chunks == 0 {
            return Err(ConfigError::Invalid(
                "max_loaded_chunks must be at least 1".to_owned(),
            ));
        }
        if self.eviction_radius < 0 {
            return Err(ConfigError::Invalid(format!(
                "eviction_radius must not be negative, got {}",
                self.eviction_radius
            )));
        }
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "block_size must be positive, got {}",
                self.block_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ChunkManagerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ChunkManagerConfig::default());
        assert_eq!(config.max_loaded_chunks, 64);
        assert_eq!(config.eviction_radius, 8);
        assert_eq!(config.eviction_policy, EvictionPolicy::ProximitySweep);
    }

    #[test]
    fn test_partial_override() {
        let config = ChunkManagerConfig::from_json_str(
            r#"{ "max_loaded_chunks": 2, "eviction_policy": "least_recently_used" }"#,
        )
        .unwrap();
        assert_eq!(config.max_loaded_chunks, 2);
        assert_eq!(config.eviction_policy, EvictionPolicy::LeastRecentlyUsed);
        assert_eq!(config.eviction_radius, DEFAULT_EVICTION_RADIUS);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        for json in [
            r#"{ "max_loaded_chunks": 0 }"#,
            r#"{ "eviction_radius": -1 }"#,
            r#"{ "block_size": 0.0 }"#,
        ] {
            let err = ChunkManagerConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json} gave {err}");
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ChunkManagerConfig::from_json_str("{ max_loaded_chunks: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("chunk-store-config-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "eviction_radius": 3 }}"#).unwrap();
        drop(file);

        let config = ChunkManagerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.eviction_radius, 3);
        std::fs::remove_file(&path).unwrap();

        let err = ChunkManagerConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
