//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel store.
//! It includes block type definitions, the static block catalog, block faces, and
//! the per-cell [`Block`] value.

use std::collections::BTreeMap;

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use super::position::BlockPosition;

pub mod block_face;
pub mod block_type;
pub mod catalog;

pub use block_face::BlockFace;
pub use block_type::{BlockDefinition, BlockProperties, BlockType, MaterialTier, ToolType};
pub use catalog::BlockCatalog;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// The highest light level a block can receive or emit.
pub const MAX_LIGHT_LEVEL: u8 = 15;

/// Represents a single voxel block occupying one cell of the world.
///
/// A block knows its global position, its type, and per-instance state: the light
/// it currently receives (independent of what its type emits) and optional metadata.
/// Static properties are looked up through [`Block::definition`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Global position of the cell this block occupies.
    pub position: BlockPosition,
    /// The type of this block. Replaced in place when the block is mined or transformed.
    pub block_type: BlockType,
    /// Optional per-instance data. Boxed so that plain blocks stay small.
    pub metadata: Option<Box<BlockMetadata>>,
    light_level: u8,
}

impl Block {
    /// Creates a new block of the specified type with no light and no metadata.
    ///
    /// # Arguments
    /// * `position` - The global position the block occupies
    /// * `block_type` - The type of block to create
    pub fn new(position: BlockPosition, block_type: BlockType) -> Self {
        Block {
            position,
            block_type,
            metadata: None,
            light_level: 0,
        }
    }

    /// Returns this block with the given received light level, clamped to [`MAX_LIGHT_LEVEL`].
    pub fn with_light_level(mut self, light_level: u8) -> Self {
        self.set_light_level(light_level);
        self
    }

    /// Returns this block with the given metadata attached.
    pub fn with_metadata(mut self, metadata: BlockMetadata) -> Self {
        self.metadata = Some(Box::new(metadata));
        self
    }

    /// The light this block currently receives, in `[0, 15]`.
    pub fn light_level(&self) -> u8 {
        self.light_level
    }

    /// Updates the received light level, clamping to [`MAX_LIGHT_LEVEL`].
    pub fn set_light_level(&mut self, light_level: u8) {
        self.light_level = light_level.min(MAX_LIGHT_LEVEL);
    }

    /// The static definition of this block's type.
    pub fn definition(&self) -> &'static BlockDefinition {
        self.block_type.definition()
    }

    /// The light this block emits, from its type.
    pub fn light_emission(&self) -> u8 {
        self.definition().light_emission
    }

    /// Places the block in continuous space relative to its chunk's origin.
    pub fn to_world_position(&self, chunk_origin: Point3<f32>, block_size: f32) -> Point3<f32> {
        self.position.to_world_position(chunk_origin, block_size)
    }
}

/// Optional per-instance block data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Rotation step, when the block is orientable.
    pub rotation: Option<u8>,
    /// Free-form key/value data.
    pub custom_data: BTreeMap<String, String>,
}
