//! # Chunk Manager Module
//!
//! This module provides the `ChunkManager` struct, the single owner of every
//! resident chunk. Callers address the world with global block positions and never
//! hold a chunk beyond one call; the manager translates coordinates, creates chunks
//! on first write, and evicts chunks when the working set grows too large.
//!
//! ## Architecture
//!
//! Chunks live in an arena (`Vec<Chunk>`) with a lookup map from chunk position to
//! arena slot. Unloading swaps the last chunk into the freed slot and fixes its map
//! entry, so both structures stay dense.
//!
//! ## Eviction
//!
//! Eviction only runs when creating a chunk would push the resident count above
//! `max_loaded_chunks`. The default [`EvictionPolicy::ProximitySweep`] unloads every
//! chunk whose Manhattan distance from the new chunk exceeds `eviction_radius` and
//! keeps everything else, so the count is not strictly capped. The opt-in
//! [`EvictionPolicy::LeastRecentlyUsed`] enforces a hard cap instead.
//!
//! Evicted chunks are dropped. A chunk that is still dirty at that point loses its
//! unsaved changes; this is logged as a warning. Persistence that cares should drain
//! [`ChunkManager::dirty_chunks_mut`] or take chunks through
//! [`ChunkManager::unload_chunk`].

use std::collections::{HashMap, VecDeque};

use log::{debug, info, warn};
use lru::LruCache;

use crate::config::{ChunkManagerConfig, EvictionPolicy};
use crate::core::MtResource;

use super::block::Block;
use super::chunk::Chunk;
use super::position::{chunk_of, local_of, BlockPosition, ChunkPosition};

/// A chunk manager shared between threads behind a single read-write lock.
pub type SharedChunkManager = MtResource<ChunkManager>;

/// The result of looking up a global position without conflating air and unloaded
/// chunks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BlockState<'a> {
    /// The chunk is resident and the cell holds this block.
    Block(&'a Block),
    /// The chunk is resident and the cell is empty.
    Air,
    /// The owning chunk is not resident, so the cell's content is unknown.
    NotResident,
}

impl<'a> BlockState<'a> {
    /// The block, if the cell is known to hold one.
    pub fn block(&self) -> Option<&'a Block> {
        match self {
            BlockState::Block(block) => Some(block),
            BlockState::Air | BlockState::NotResident => None,
        }
    }

    /// Whether the owning chunk is resident.
    pub fn is_resident(&self) -> bool {
        !matches!(self, BlockState::NotResident)
    }
}

/// Owns all resident chunks and routes global block access into them.
///
/// # Examples
///
/// ```
/// use chunk_store::voxels::block::{Block, BlockType};
/// use chunk_store::voxels::chunk_manager::ChunkManager;
/// use chunk_store::voxels::position::{BlockPosition, ChunkPosition};
///
/// let mut manager = ChunkManager::new();
/// let position = BlockPosition::new(-1, 20, 3);
///
/// assert!(manager.get_block(position).is_none());
/// manager.set_block(position, Some(Block::new(position, BlockType::Stone)));
///
/// assert_eq!(manager.get_block(position).map(|b| b.block_type), Some(BlockType::Stone));
/// assert!(manager.get_chunk(ChunkPosition::new(-1, 1, 0)).is_some());
/// ```
pub struct ChunkManager {
    chunks: Vec<Chunk>,
    slots: HashMap<ChunkPosition, usize>,
    config: ChunkManagerConfig,
    recency: LruCache<ChunkPosition, ()>,
    load_queue: VecDeque<ChunkPosition>,
}

impl ChunkManager {
    /// Creates an empty manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ChunkManagerConfig::default())
    }

    /// Creates an empty manager with the given configuration.
    ///
    /// Run [`ChunkManagerConfig::validate`] first when the configuration comes from
    /// outside. A negative `eviction_radius` is clamped to zero, so the chunk being
    /// created always survives its own sweep.
    pub fn with_config(mut config: ChunkManagerConfig) -> Self {
        if config.eviction_radius < 0 {
            warn!(
                "Negative eviction radius {} clamped to 0",
                config.eviction_radius
            );
            config.eviction_radius = 0;
        }
        ChunkManager {
            chunks: Vec::new(),
            slots: HashMap::new(),
            config,
            recency: LruCache::unbounded(),
            load_queue: VecDeque::new(),
        }
    }

    /// Wraps the manager for use from several threads.
    pub fn into_shared(self) -> SharedChunkManager {
        MtResource::new(self)
    }

    /// The active configuration.
    pub fn config(&self) -> &ChunkManagerConfig {
        &self.config
    }

    /// Returns the resident chunk at `position`, creating an empty one if needed.
    ///
    /// Creating a chunk that pushes the resident count above `max_loaded_chunks`
    /// triggers eviction around `position`. The returned chunk itself is never evicted.
    pub fn get_or_create_chunk(&mut self, position: ChunkPosition) -> &mut Chunk {
        if let Some(&slot) = self.slots.get(&position) {
            self.touch(position);
            return &mut self.chunks[slot];
        }

        // Evicting before the insert is equivalent to sweeping right after it: the new
        // chunk sits at distance zero and is always the most recent one.
        if self.chunks.len() + 1 > self.config.max_loaded_chunks {
            self.evict_around(position);
        }

        debug!("Creating chunk at {:?}", position);
        let slot = self.chunks.len();
        self.chunks.push(Chunk::new(position));
        self.slots.insert(position, slot);
        self.touch(position);
        &mut self.chunks[slot]
    }

    /// Looks up a resident chunk. Never creates one.
    pub fn get_chunk(&self, position: ChunkPosition) -> Option<&Chunk> {
        self.slots.get(&position).map(|&slot| &self.chunks[slot])
    }

    /// Looks up a resident chunk for modification. Never creates one.
    pub fn get_chunk_mut(&mut self, position: ChunkPosition) -> Option<&mut Chunk> {
        let slot = *self.slots.get(&position)?;
        self.touch(position);
        Some(&mut self.chunks[slot])
    }

    /// Whether a chunk is resident at `position`.
    pub fn contains_chunk(&self, position: ChunkPosition) -> bool {
        self.slots.contains_key(&position)
    }

    /// Marks a chunk as recently used without otherwise accessing it.
    ///
    /// Only meaningful under [`EvictionPolicy::LeastRecentlyUsed`].
    pub fn touch_chunk(&mut self, position: ChunkPosition) {
        if self.contains_chunk(position) {
            self.touch(position);
        }
    }

    /// Removes a chunk and hands it back to the caller.
    ///
    /// There is no dirty check: dropping the returned chunk discards any unsaved
    /// changes.
    pub fn unload_chunk(&mut self, position: ChunkPosition) -> Option<Chunk> {
        let chunk = self.remove_slot(position)?;
        debug!("Unloaded chunk at {:?} (dirty: {})", position, chunk.is_dirty());
        Some(chunk)
    }

    /// Gets the block at a global position.
    ///
    /// Does not create chunks. `None` means either air or an unloaded chunk; use
    /// [`ChunkManager::block_state`] to tell them apart.
    pub fn get_block(&self, position: BlockPosition) -> Option<&Block> {
        self.get_chunk(chunk_of(position))?.get(local_of(position))
    }

    /// Gets a mutable reference to the block at a global position.
    ///
    /// Does not create chunks. Raises the owning chunk's flags when a block is returned.
    pub fn get_block_mut(&mut self, position: BlockPosition) -> Option<&mut Block> {
        self.get_chunk_mut(chunk_of(position))?
            .get_mut(local_of(position))
    }

    /// Looks up a global position, distinguishing air from unloaded chunks.
    pub fn block_state(&self, position: BlockPosition) -> BlockState<'_> {
        match self.get_chunk(chunk_of(position)) {
            None => BlockState::NotResident,
            Some(chunk) => match chunk.get(local_of(position)) {
                Some(block) => BlockState::Block(block),
                None => BlockState::Air,
            },
        }
    }

    /// Writes the cell at a global position. `None` removes the block.
    ///
    /// Always succeeds: the owning chunk is created if it is not resident, which may
    /// trigger eviction of other chunks.
    pub fn set_block(&mut self, position: BlockPosition, block: Option<Block>) {
        self.get_or_create_chunk(chunk_of(position))
            .set(local_of(position), block);
    }

    /// Snapshot of every resident chunk, in no particular order.
    pub fn get_all_chunks(&self) -> Vec<&Chunk> {
        self.chunks.iter().collect()
    }

    /// Iterates over every resident chunk, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Iterates over resident chunks that persistence has not acknowledged yet.
    pub fn dirty_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|chunk| chunk.is_dirty())
    }

    /// Mutable variant of [`ChunkManager::dirty_chunks`], for marking chunks saved.
    pub fn dirty_chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks.iter_mut().filter(|chunk| chunk.is_dirty())
    }

    /// Iterates over resident chunks whose geometry is stale, for the renderer.
    pub fn chunks_needing_mesh_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks
            .iter_mut()
            .filter(|chunk| chunk.mesh_needs_update())
    }

    /// Number of resident chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunk is resident.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Drops every resident chunk, dirty or not.
    pub fn clear_all_chunks(&mut self) {
        let dirty = self.dirty_chunks().count();
        if dirty > 0 {
            warn!("Clearing {} dirty chunks; unsaved changes are lost", dirty);
        }
        debug!("Clearing {} chunks", self.chunks.len());
        self.chunks.clear();
        self.slots.clear();
        self.recency.clear();
    }

    /// Queues a chunk to be created later by [`ChunkManager::process_load_queue`].
    ///
    /// # Returns
    /// `false` if the chunk is already resident or already queued.
    pub fn queue_chunk_load(&mut self, position: ChunkPosition) -> bool {
        if self.contains_chunk(position) || self.load_queue.contains(&position) {
            return false;
        }
        self.load_queue.push_back(position);
        true
    }

    /// Number of queued chunk loads.
    pub fn pending_loads(&self) -> usize {
        self.load_queue.len()
    }

    /// Creates up to `budget` queued chunks in the order they were queued.
    ///
    /// Entries that became resident while queued are dropped without counting
    /// against the budget.
    ///
    /// # Returns
    /// The number of chunks created.
    pub fn process_load_queue(&mut self, budget: usize) -> usize {
        let mut created = 0;
        while created < budget {
            let Some(position) = self.load_queue.pop_front() else {
                break;
            };
            if self.contains_chunk(position) {
                continue;
            }
            self.get_or_create_chunk(position);
            created += 1;
        }
        created
    }

    fn touch(&mut self, position: ChunkPosition) {
        if self.config.eviction_policy == EvictionPolicy::LeastRecentlyUsed {
            self.recency.put(position, ());
        }
    }

    fn remove_slot(&mut self, position: ChunkPosition) -> Option<Chunk> {
        let slot = self.slots.remove(&position)?;
        let chunk = self.chunks.swap_remove(slot);
        if let Some(moved) = self.chunks.get(slot) {
            self.slots.insert(moved.position(), slot);
        }
        self.recency.pop(&position);
        Some(chunk)
    }

    /// Makes room for a chunk about to be created at `reference`.
    fn evict_around(&mut self, reference: ChunkPosition) {
        let evicted = match self.config.eviction_policy {
            EvictionPolicy::ProximitySweep => self.sweep_distant(reference),
            EvictionPolicy::LeastRecentlyUsed => self.evict_least_recently_used(),
        };

        if evicted > 0 {
            info!(
                "Evicted {} chunks around {:?}, {} remain resident",
                evicted,
                reference,
                self.chunks.len()
            );
        }
    }

    fn sweep_distant(&mut self, reference: ChunkPosition) -> usize {
        let radius = i64::from(self.config.eviction_radius);
        let distant: Vec<ChunkPosition> = self
            .slots
            .keys()
            .filter(|position| position.manhattan_distance(&reference) > radius)
            .copied()
            .collect();

        for &position in &distant {
            if let Some(chunk) = self.remove_slot(position) {
                discard(chunk);
            }
        }
        distant.len()
    }

    fn evict_least_recently_used(&mut self) -> usize {
        let mut evicted = 0;
        while self.chunks.len() + 1 > self.config.max_loaded_chunks {
            let Some((position, ())) = self.recency.pop_lru() else {
                break;
            };
            if let Some(chunk) = self.remove_slot(position) {
                discard(chunk);
                evicted += 1;
            }
        }
        evicted
    }
}

impl Default for ChunkManager {
    fn default() -> Self {
        ChunkManager::new()
    }
}

fn discard(chunk: Chunk) {
    if chunk.is_dirty() {
        warn!(
            "Evicting dirty chunk at {:?}; {} blocks of unsaved changes are lost",
            chunk.position(),
            chunk.block_count()
        );
    } else {
        debug!("Evicting chunk at {:?}", chunk.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::BlockType;

    fn manager(max_loaded_chunks: usize, eviction_radius: i32) -> ChunkManager {
        ChunkManager::with_config(ChunkManagerConfig {
            max_loaded_chunks,
            eviction_radius,
            ..Default::default()
        })
    }

    fn lru_manager(max_loaded_chunks: usize) -> ChunkManager {
        ChunkManager::with_config(ChunkManagerConfig {
            max_loaded_chunks,
            eviction_policy: EvictionPolicy::LeastRecentlyUsed,
            ..Default::default()
        })
    }

    fn resident(manager: &ChunkManager) -> Vec<ChunkPosition> {
        let mut positions: Vec<_> = manager.chunks().map(|chunk| chunk.position()).collect();
        positions.sort_by_key(|p| (p.x, p.y, p.z));
        positions
    }

    #[test]
    fn test_get_or_create_is_lazy_and_idempotent() {
        let mut manager = ChunkManager::new();
        let position = ChunkPosition::new(2, 0, -3);
        assert!(manager.get_chunk(position).is_none());

        manager.get_or_create_chunk(position);
        manager.get_or_create_chunk(position);
        assert_eq!(manager.chunk_count(), 1);
        assert_eq!(manager.get_chunk(position).map(Chunk::position), Some(position));
    }

    #[test]
    fn test_get_block_does_not_create_chunks() {
        let manager = ChunkManager::new();
        assert!(manager.get_block(BlockPosition::new(5, 5, 5)).is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_block_state_distinguishes_air_from_unloaded() {
        let mut manager = ChunkManager::new();
        let stone = BlockPosition::new(-17, 0, 4);
        assert_eq!(manager.block_state(stone), BlockState::NotResident);

        manager.set_block(stone, Some(Block::new(stone, BlockType::Stone)));
        assert_eq!(
            manager.block_state(stone).block().map(|b| b.block_type),
            Some(BlockType::Stone)
        );
        assert_eq!(manager.block_state(stone.offset(-1, 0, 0)), BlockState::Air);
        assert!(manager.block_state(stone.offset(-1, 0, 0)).is_resident());
    }

    #[test]
    fn test_unload_swaps_slots_correctly() {
        let mut manager = ChunkManager::new();
        let positions: Vec<_> = (0..5).map(|x| ChunkPosition::new(x, 0, 0)).collect();
        for &position in &positions {
            let origin = position.block_origin();
            manager.set_block(origin, Some(Block::new(origin, BlockType::Dirt)));
        }

        let removed = manager.unload_chunk(positions[1]).unwrap();
        assert_eq!(removed.position(), positions[1]);
        assert!(manager.unload_chunk(positions[1]).is_none());

        for &position in positions.iter().filter(|&&p| p != positions[1]) {
            let chunk = manager.get_chunk(position).unwrap();
            assert_eq!(chunk.position(), position);
            assert!(manager.get_block(position.block_origin()).is_some());
        }
        assert_eq!(manager.chunk_count(), 4);
    }

    #[test]
    fn test_sweep_keeps_chunks_within_radius() {
        let mut manager = manager(2, 1);
        manager.get_or_create_chunk(ChunkPosition::new(0, 0, 0));
        manager.get_or_create_chunk(ChunkPosition::new(5, 0, 0));
        manager.get_or_create_chunk(ChunkPosition::new(0, 0, 0));
        assert_eq!(manager.chunk_count(), 2);

        manager.get_or_create_chunk(ChunkPosition::new(5, 1, 0));
        assert_eq!(
            resident(&manager),
            vec![ChunkPosition::new(5, 0, 0), ChunkPosition::new(5, 1, 0)]
        );
    }

    #[test]
    fn test_negative_radius_keeps_the_new_chunk() {
        let mut manager = manager(1, -1);
        assert_eq!(manager.config().eviction_radius, 0);

        manager.get_or_create_chunk(ChunkPosition::new(0, 0, 0));
        manager.get_or_create_chunk(ChunkPosition::new(3, 0, 0));
        assert_eq!(resident(&manager), vec![ChunkPosition::new(3, 0, 0)]);
    }

    #[test]
    fn test_sweep_does_not_cap_the_count() {
        let mut manager = manager(2, 8);
        for x in 0..5 {
            manager.get_or_create_chunk(ChunkPosition::new(x, 0, 0));
        }
        assert_eq!(manager.chunk_count(), 5);
    }

    #[test]
    fn test_lru_enforces_hard_cap() {
        let mut manager = lru_manager(3);
        for x in 0..3 {
            manager.get_or_create_chunk(ChunkPosition::new(x, 0, 0));
        }
        manager.touch_chunk(ChunkPosition::new(0, 0, 0));
        manager.get_or_create_chunk(ChunkPosition::new(3, 0, 0));

        assert_eq!(manager.chunk_count(), 3);
        assert!(manager.contains_chunk(ChunkPosition::new(0, 0, 0)));
        assert!(!manager.contains_chunk(ChunkPosition::new(1, 0, 0)));
        assert!(manager.contains_chunk(ChunkPosition::new(3, 0, 0)));
    }

    #[test]
    fn test_lru_counts_writes_as_use() {
        let mut manager = lru_manager(2);
        let a = BlockPosition::new(0, 0, 0);
        let b = BlockPosition::new(16, 0, 0);
        manager.set_block(a, None);
        manager.set_block(b, None);
        manager.set_block(a, Some(Block::new(a, BlockType::Glass)));

        manager.set_block(BlockPosition::new(32, 0, 0), None);
        assert!(manager.contains_chunk(a.chunk()));
        assert!(!manager.contains_chunk(b.chunk()));
    }

    #[test]
    fn test_clear_all_chunks() {
        let mut manager = ChunkManager::new();
        for x in -2..=2 {
            manager.get_or_create_chunk(ChunkPosition::new(x, 0, 0));
        }
        manager.clear_all_chunks();
        assert!(manager.is_empty());
        assert!(manager.get_chunk(ChunkPosition::new(0, 0, 0)).is_none());
    }

    #[test]
    fn test_load_queue() {
        let mut manager = ChunkManager::new();
        manager.get_or_create_chunk(ChunkPosition::new(0, 0, 0));

        assert!(!manager.queue_chunk_load(ChunkPosition::new(0, 0, 0)));
        assert!(manager.queue_chunk_load(ChunkPosition::new(1, 0, 0)));
        assert!(!manager.queue_chunk_load(ChunkPosition::new(1, 0, 0)));
        assert!(manager.queue_chunk_load(ChunkPosition::new(2, 0, 0)));
        assert!(manager.queue_chunk_load(ChunkPosition::new(3, 0, 0)));
        assert_eq!(manager.pending_loads(), 3);

        manager.get_or_create_chunk(ChunkPosition::new(1, 0, 0));
        assert_eq!(manager.process_load_queue(1), 1);
        assert!(manager.contains_chunk(ChunkPosition::new(2, 0, 0)));
        assert!(!manager.contains_chunk(ChunkPosition::new(3, 0, 0)));

        assert_eq!(manager.process_load_queue(10), 1);
        assert_eq!(manager.pending_loads(), 0);
        assert_eq!(manager.chunk_count(), 4);
    }

    #[test]
    fn test_dirty_and_mesh_views() {
        let mut manager = ChunkManager::new();
        manager.get_or_create_chunk(ChunkPosition::new(0, 0, 0));
        manager.get_or_create_chunk(ChunkPosition::new(1, 0, 0));

        for chunk in manager.dirty_chunks_mut() {
            chunk.mark_saved();
        }
        assert_eq!(manager.dirty_chunks().count(), 0);

        let position = BlockPosition::new(17, 0, 0);
        manager.set_block(position, Some(Block::new(position, BlockType::Torch)));
        let dirty: Vec<_> = manager.dirty_chunks().map(Chunk::position).collect();
        assert_eq!(dirty, vec![ChunkPosition::new(1, 0, 0)]);

        for chunk in manager.chunks_needing_mesh_mut() {
            chunk.mark_meshed();
        }
        assert!(manager.chunks().all(|chunk| !chunk.mesh_needs_update()));
    }
}
