#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Chunk Store
//!
//! A chunk-based voxel world store: a sparse 3D map from global integer block
//! coordinates to typed blocks, grouped into 16x16x16 chunks that are created on
//! first write and evicted when too many are resident.
//!
//! ## Key Modules
//!
//! * `voxels` - Coordinates, blocks, chunks and the chunk manager
//! * `config` - Chunk manager tuning, loadable from JSON
//! * `core` - The shared handle used to serialize access from several threads
//! * `error` - Error types for configuration and catalog lookups
//!
//! ## Usage
//!
//! ```rust
//! use chunk_store::{Block, BlockPosition, BlockType, ChunkManager};
//!
//! let mut manager = ChunkManager::new();
//! let position = BlockPosition::new(-20, 3, 40);
//! manager.set_block(position, Some(Block::new(position, BlockType::Glowstone)));
//!
//! let block = manager.get_block(position).unwrap();
//! assert_eq!(block.light_emission(), 15);
//! ```
//!
//! ## Performance Considerations
//!
//! * Each chunk allocates its 4096 cells once; writes never allocate
//! * An occupancy bit vector makes block counts and iteration skip air
//! * Chunks live in a dense arena indexed through a hash map

use std::env;

use log::info;

pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod voxels;

pub use config::{ChunkManagerConfig, EvictionPolicy};
pub use error::{CatalogError, ConfigError};
pub use voxels::block::{Block, BlockCatalog, BlockType};
pub use voxels::chunk::Chunk;
pub use voxels::chunk_manager::{BlockState, ChunkManager, SharedChunkManager};
pub use voxels::position::{BlockPosition, ChunkPosition};

/// Entry point of the `chunk-store` binary.
///
/// Initializes logging, reads an optional JSON config path from the first
/// argument and runs the demo walkthrough.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            ChunkManagerConfig::from_json_file(path)?
        }
        None => ChunkManagerConfig::default(),
    };
    info!("Using {:?}", config);

    let report = demo::run_demo(config);
    info!("Demo finished: {:?}", report);
    Ok(())
}
