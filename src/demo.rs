//! A short walkthrough of the chunk store, run by the `chunk-store` binary.

use log::info;

use crate::config::ChunkManagerConfig;
use crate::voxels::block::{Block, BlockType};
use crate::voxels::chunk_manager::{BlockState, ChunkManager};
use crate::voxels::position::{BlockPosition, ChunkPosition};

/// Half-width of the square chunk grid filled around the origin.
const GRID_RADIUS: i32 = 2;
/// How many chunks the reference point moves away from the origin.
const WALK_DISTANCE: i32 = 48;
const DEMO_SEED: u64 = 0x5EED;

/// Counts gathered while the demo runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DemoReport {
    /// Resident chunks after the grid was filled.
    pub filled_chunks: usize,
    /// Non-air blocks across the filled grid.
    pub filled_blocks: usize,
    /// Resident chunks after walking away from the origin.
    pub resident_after_walk: usize,
    /// Whether the origin chunk survived the walk.
    pub origin_resident: bool,
}

/// Fills a grid of chunks, then walks a reference point outward so eviction kicks in.
pub fn run_demo(config: ChunkManagerConfig) -> DemoReport {
    let mut manager = ChunkManager::with_config(config);
    let mut rng = fastrand::Rng::with_seed(DEMO_SEED);

    for x in -GRID_RADIUS..=GRID_RADIUS {
        for z in -GRID_RADIUS..=GRID_RADIUS {
            manager
                .get_or_create_chunk(ChunkPosition::new(x, 0, z))
                .fill_pattern(&mut rng);
        }
    }

    let filled_blocks = manager.chunks().map(|chunk| chunk.block_count()).sum();
    let mut report = DemoReport {
        filled_chunks: manager.chunk_count(),
        filled_blocks,
        ..Default::default()
    };
    info!(
        "Filled {} chunks holding {} blocks",
        report.filled_chunks, report.filled_blocks
    );

    let sample = BlockPosition::new(-1, 0, -1);
    match manager.block_state(sample) {
        BlockState::Block(block) => info!("Block at {:?} is {}", sample, block.definition().display_name),
        BlockState::Air => info!("Block at {:?} is air", sample),
        BlockState::NotResident => info!("Chunk holding {:?} is not loaded", sample),
    }
    let top = sample.offset(0, 1, 0);
    if manager.get_block(top).is_none() {
        info!("Nothing above {:?} yet, placing a torch", sample);
        manager.set_block(top, Some(Block::new(top, BlockType::Torch)));
    }

    for step in 1..=WALK_DISTANCE {
        manager.get_or_create_chunk(ChunkPosition::new(step, 0, 0));
    }

    report.resident_after_walk = manager.chunk_count();
    report.origin_resident = manager.contains_chunk(ChunkPosition::new(0, 0, 0));
    info!(
        "After walking {} chunks: {} resident, origin {}",
        WALK_DISTANCE,
        report.resident_after_walk,
        if report.origin_resident { "kept" } else { "evicted" }
    );

    for chunk in manager.dirty_chunks_mut() {
        chunk.mark_saved();
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvictionPolicy;

    #[test]
    fn test_demo_with_defaults() {
        let report = run_demo(ChunkManagerConfig::default());
        assert_eq!(report.filled_chunks, 25);
        assert!(report.filled_blocks >= 25 * 256);
        assert!(!report.origin_resident);
        assert!(report.resident_after_walk < 25 + WALK_DISTANCE as usize);
    }

    #[test]
    fn test_demo_with_hard_cap() {
        let report = run_demo(ChunkManagerConfig {
            max_loaded_chunks: 10,
            eviction_policy: EvictionPolicy::LeastRecentlyUsed,
            ..Default::default()
        });
        assert_eq!(report.filled_chunks, 10);
        assert_eq!(report.resident_after_walk, 10);
        assert!(!report.origin_resident);
    }
}
