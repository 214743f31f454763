//! # Chunk Module
//!
//! This module provides the `Chunk` struct: dense storage for one 16x16x16 volume
//! of optional blocks, plus the two flags external consumers use to learn that the
//! chunk changed.
//!
//! ## Storage
//!
//! Chunks keep two parallel structures:
//! - `cells`: a flat, fixed-size slice of `Option<Block>` with one slot per cell,
//!   indexed as `x * 256 + y * 16 + z`. Empty slots are air.
//! - `occupancy`: a bit vector (1 bit per cell) mirroring which slots are filled
//!
//! The slice is allocated once per chunk, so filling and clearing cells never
//! allocates. The bit vector gives O(1) occupancy checks and fast block counts,
//! and lets [`ChunkBlockIterator`] skip air without touching the cells.
//!
//! ## Flags
//!
//! `set` raises both `is_dirty` and `mesh_needs_update`. The chunk never lowers
//! them itself: persistence calls [`Chunk::mark_saved`] and the renderer calls
//! [`Chunk::mark_meshed`] once they have consumed the change.

use bitvec::vec::BitVec;
use cgmath::Point3;

use super::block::Block;
use super::position::{local_index, BlockPosition, ChunkPosition, CHUNK_SIZE};

mod chunk_creation;
pub mod chunk_iteration;

pub use chunk_iteration::ChunkBlockIterator;

/// Represents a 16x16x16 collection of voxel blocks in the world.
///
/// All cells start empty. Accessors take chunk-local positions and quietly ignore
/// anything outside `[0, 16)` on any axis.
#[derive(Clone, Debug)]
pub struct Chunk {
    position: ChunkPosition,
    cells: Box<[Option<Block>]>,
    occupancy: BitVec,
    is_dirty: bool,
    mesh_needs_update: bool,
}

impl Chunk {
    /// Creates a new, completely empty chunk.
    ///
    /// A fresh chunk has never been persisted or meshed, so both flags start raised.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    pub fn new(position: ChunkPosition) -> Self {
        Chunk {
            position,
            cells: vec![None; CHUNK_SIZE].into_boxed_slice(),
            occupancy: BitVec::repeat(false, CHUNK_SIZE),
            is_dirty: true,
            mesh_needs_update: true,
        }
    }

    /// The position of this chunk in chunk coordinates.
    pub fn position(&self) -> ChunkPosition {
        self.position
    }

    /// Gets the block at a local position.
    ///
    /// # Returns
    /// `None` if the position is out of bounds or the cell is air.
    pub fn get(&self, local: BlockPosition) -> Option<&Block> {
        let index = local_index(local)?;
        self.cells[index].as_ref()
    }

    /// Gets a mutable reference to the block at a local position.
    ///
    /// Handing out a mutable block counts as a change, so both flags are raised
    /// whenever a block is returned.
    pub fn get_mut(&mut self, local: BlockPosition) -> Option<&mut Block> {
        let index = local_index(local)?;
        let block = self.cells[index].as_mut()?;
        self.is_dirty = true;
        self.mesh_needs_update = true;
        Some(block)
    }

    /// Replaces the cell at a local position. `None` removes the block.
    ///
    /// Out-of-bounds positions are ignored and leave the flags untouched.
    pub fn set(&mut self, local: BlockPosition, block: Option<Block>) {
        let Some(index) = local_index(local) else {
            return;
        };
        self.occupancy.set(index, block.is_some());
        self.cells[index] = block;
        self.is_dirty = true;
        self.mesh_needs_update = true;
    }

    /// Checks whether the cell at a local position holds a block.
    pub fn is_occupied(&self, local: BlockPosition) -> bool {
        local_index(local).is_some_and(|index| self.occupancy[index])
    }

    /// Number of occupied cells.
    pub fn block_count(&self) -> usize {
        self.occupancy.count_ones()
    }

    /// Returns `true` if every cell is air.
    pub fn is_empty(&self) -> bool {
        self.occupancy.not_any()
    }

    /// Iterates over occupied cells as `(local position, block)` pairs.
    pub fn blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Data changed since persistence last acknowledged it.
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// The visual representation is stale.
    pub fn mesh_needs_update(&self) -> bool {
        self.mesh_needs_update
    }

    /// Called by persistence once the chunk's contents have been saved.
    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    /// Called by the renderer once the chunk's geometry has been rebuilt.
    pub fn mark_meshed(&mut self) {
        self.mesh_needs_update = false;
    }

    /// Places the chunk in continuous space.
    pub fn world_origin(&self, block_size: f32) -> Point3<f32> {
        self.position.world_origin(block_size)
    }
}
