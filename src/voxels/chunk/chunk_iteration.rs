//! # Chunk Iteration Module
//!
//! An iterator over the occupied cells of a chunk. It walks the occupancy bit
//! vector and only touches the cells whose bit is set, so mostly-air chunks are
//! cheap to enumerate.

use bitvec::order::Lsb0;
use bitvec::slice::IterOnes;

use crate::voxels::block::Block;
use crate::voxels::position::{index_to_local, BlockPosition};

use super::Chunk;

/// An iterator over all non-air blocks in a chunk, in cell-index order.
///
/// Yields each block together with its chunk-local position.
pub struct ChunkBlockIterator<'a> {
    chunk_ref: &'a Chunk,
    occupied: IterOnes<'a, usize, Lsb0>,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned at the first occupied cell.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            occupied: chunk_ref.occupancy.iter_ones(),
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (BlockPosition, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        for index in self.occupied.by_ref() {
            // Occupancy and cells are updated together; skip rather than trust a stale bit.
            if let Some(block) = self.chunk_ref.cells[index].as_ref() {
                return Some((index_to_local(index), block));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.occupied.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::BlockType;
    use crate::voxels::position::ChunkPosition;

    #[test]
    fn test_iterates_only_occupied_cells_in_index_order() {
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0, 0));
        let positions = [
            BlockPosition::new(3, 0, 0),
            BlockPosition::new(0, 0, 9),
            BlockPosition::new(0, 2, 0),
        ];
        for local in positions {
            chunk.set(local, Some(Block::new(local, BlockType::Dirt)));
        }

        let visited: Vec<BlockPosition> = chunk.blocks().map(|(local, _)| local).collect();
        assert_eq!(
            visited,
            vec![
                BlockPosition::new(0, 0, 9),
                BlockPosition::new(0, 2, 0),
                BlockPosition::new(3, 0, 0),
            ]
        );
    }

    #[test]
    fn test_empty_chunk_yields_nothing() {
        let chunk = Chunk::new(ChunkPosition::new(0, 0, 0));
        assert_eq!(chunk.blocks().count(), 0);
    }

    #[test]
    fn test_yields_the_stored_block() {
        let mut chunk = Chunk::new(ChunkPosition::new(0, 0, 0));
        let local = BlockPosition::new(15, 15, 15);
        chunk.set(local, Some(Block::new(local, BlockType::Torch)));

        let (position, block) = chunk.blocks().next().unwrap();
        assert_eq!(position, local);
        assert_eq!(block.block_type, BlockType::Torch);
    }
}
