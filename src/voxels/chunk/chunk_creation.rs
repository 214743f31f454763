//! # Chunk Creation Module
//!
//! Fixture generators used by tests, benchmarks and the demo binary. None of this is
//! game logic; it only exists to put predictable data into chunks.

use crate::voxels::block::{Block, BlockType};
use crate::voxels::position::{BlockPosition, ChunkPosition, CHUNK_DIMENSION};

use super::Chunk;

/// Number of layers above the floor that may receive scattered stone.
const PATTERN_STONE_LAYERS: i32 = 2;

impl Chunk {
    /// Creates a new chunk with every cell set to the given type.
    ///
    /// Passing [`BlockType::Air`] yields an empty chunk, matching [`Chunk::new`].
    pub fn filled(position: ChunkPosition, block_type: BlockType) -> Self {
        let mut chunk = Chunk::new(position);
        if block_type.is_air() {
            return chunk;
        }

        for x in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for z in 0..CHUNK_DIMENSION {
                    chunk.place(BlockPosition::new(x, y, z), block_type);
                }
            }
        }

        chunk
    }

    /// Fills the chunk with a simple ground pattern.
    ///
    /// The whole floor (local `y == 0`) becomes grass, then each cell of the next two
    /// layers becomes stone with probability one half. Pass a seeded generator for
    /// reproducible output.
    pub fn fill_pattern(&mut self, rng: &mut fastrand::Rng) {
        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                self.place(BlockPosition::new(x, 0, z), BlockType::Grass);
            }
        }

        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                for y in 1..=PATTERN_STONE_LAYERS {
                    if rng.bool() {
                        self.place(BlockPosition::new(x, y, z), BlockType::Stone);
                    }
                }
            }
        }
    }

    /// Sets a fresh block whose stored position is the cell's global coordinate.
    fn place(&mut self, local: BlockPosition, block_type: BlockType) {
        let global = self.position.block_at(local);
        self.set(local, Some(Block::new(global, block_type)));
    }
}
