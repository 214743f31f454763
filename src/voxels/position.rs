//! # Position Module
//!
//! Integer coordinate types for the voxel world and the pure functions that move
//! between them.
//!
//! There are two distinct integer triples:
//! - [`BlockPosition`]: a global block coordinate (also used for chunk-local cells)
//! - [`ChunkPosition`]: the index of a chunk, one unit per `CHUNK_DIMENSION` blocks
//!
//! Every global block position decomposes into exactly one chunk position and one
//! local position in `[0, CHUNK_DIMENSION)` on each axis, such that
//! `global == chunk * CHUNK_DIMENSION + local`. This holds for negative coordinates
//! as well, which is why the conversions use Euclidean division rather than `/` and `%`.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: usize = (CHUNK_PLANE_SIZE * CHUNK_DIMENSION) as usize;

/// A block coordinate, one unit per block.
///
/// Used both for global positions and for positions local to a chunk. Local
/// positions are only meaningful when every axis lies in `[0, CHUNK_DIMENSION)`;
/// see [`BlockPosition::is_local`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    /// X coordinate in blocks.
    pub x: i32,
    /// Y coordinate in blocks.
    pub y: i32,
    /// Z coordinate in blocks.
    pub z: i32,
}

impl BlockPosition {
    /// Creates a new block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPosition { x, y, z }
    }

    /// Returns this position shifted by the given deltas. Wraps at the `i32` edges.
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        BlockPosition::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    /// The chunk containing this global position. See [`chunk_of`].
    pub fn chunk(&self) -> ChunkPosition {
        chunk_of(*self)
    }

    /// This global position relative to its chunk. See [`local_of`].
    pub fn local(&self) -> BlockPosition {
        local_of(*self)
    }

    /// Returns `true` if every axis lies in `[0, CHUNK_DIMENSION)`.
    pub fn is_local(&self) -> bool {
        let range = 0..CHUNK_DIMENSION;
        range.contains(&self.x) && range.contains(&self.y) && range.contains(&self.z)
    }

    /// Places this position in continuous space relative to a chunk origin.
    ///
    /// # Arguments
    /// * `chunk_origin` - The continuous-space origin of the owning chunk
    /// * `block_size` - The physical edge length of one block
    pub fn to_world_position(&self, chunk_origin: Point3<f32>, block_size: f32) -> Point3<f32> {
        Point3::new(
            self.x as f32 * block_size + chunk_origin.x,
            self.y as f32 * block_size + chunk_origin.y,
            self.z as f32 * block_size + chunk_origin.z,
        )
    }
}

impl From<Point3<i32>> for BlockPosition {
    fn from(point: Point3<i32>) -> Self {
        BlockPosition::new(point.x, point.y, point.z)
    }
}

impl From<BlockPosition> for Point3<i32> {
    fn from(position: BlockPosition) -> Self {
        Point3::new(position.x, position.y, position.z)
    }
}

/// The position of a chunk, in chunk units (not block units).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPosition {
    /// X index of the chunk.
    pub x: i32,
    /// Y index of the chunk.
    pub y: i32,
    /// Z index of the chunk.
    pub z: i32,
}

impl ChunkPosition {
    /// Creates a new chunk position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        ChunkPosition { x, y, z }
    }

    /// The global position of this chunk's `(0, 0, 0)` cell.
    ///
    /// Only chunks reachable from an `i32` block position have an exact origin;
    /// beyond that the result wraps.
    pub const fn block_origin(&self) -> BlockPosition {
        BlockPosition::new(
            self.x.wrapping_mul(CHUNK_DIMENSION),
            self.y.wrapping_mul(CHUNK_DIMENSION),
            self.z.wrapping_mul(CHUNK_DIMENSION),
        )
    }

    /// The global position of a local cell inside this chunk.
    pub const fn block_at(&self, local: BlockPosition) -> BlockPosition {
        let origin = self.block_origin();
        origin.offset(local.x, local.y, local.z)
    }

    /// Places the chunk in continuous space. Only rendering cares about this;
    /// storage never reads it.
    pub fn world_origin(&self, block_size: f32) -> Point3<f32> {
        let chunk_extent = CHUNK_DIMENSION as f32 * block_size;
        Point3::new(
            self.x as f32 * chunk_extent,
            self.y as f32 * chunk_extent,
            self.z as f32 * chunk_extent,
        )
    }

    /// L1 distance in chunk units. Widened to `i64` so extreme positions cannot overflow.
    pub fn manhattan_distance(&self, other: &ChunkPosition) -> i64 {
        (self.x as i64 - other.x as i64).abs()
            + (self.y as i64 - other.y as i64).abs()
            + (self.z as i64 - other.z as i64).abs()
    }
}

impl From<Point3<i32>> for ChunkPosition {
    fn from(point: Point3<i32>) -> Self {
        ChunkPosition::new(point.x, point.y, point.z)
    }
}

impl From<ChunkPosition> for Point3<i32> {
    fn from(position: ChunkPosition) -> Self {
        Point3::new(position.x, position.y, position.z)
    }
}

/// The chunk owning a global block position.
///
/// Each axis is floor-divided by `CHUNK_DIMENSION`, so `-1` maps to chunk `-1`
/// rather than chunk `0`.
pub fn chunk_of(position: BlockPosition) -> ChunkPosition {
    ChunkPosition::new(
        position.x.div_euclid(CHUNK_DIMENSION),
        position.y.div_euclid(CHUNK_DIMENSION),
        position.z.div_euclid(CHUNK_DIMENSION),
    )
}

/// The position of a global block inside its chunk, each axis in `[0, CHUNK_DIMENSION)`.
pub fn local_of(position: BlockPosition) -> BlockPosition {
    BlockPosition::new(
        position.x.rem_euclid(CHUNK_DIMENSION),
        position.y.rem_euclid(CHUNK_DIMENSION),
        position.z.rem_euclid(CHUNK_DIMENSION),
    )
}

/// Continuous-space origin of a chunk. Equivalent to [`ChunkPosition::world_origin`].
pub fn world_origin(position: ChunkPosition, block_size: f32) -> Point3<f32> {
    position.world_origin(block_size)
}

/// Flat cell index of a local position, laid out as `x * 256 + y * 16 + z`.
///
/// Returns `None` if any axis falls outside the chunk.
pub fn local_index(local: BlockPosition) -> Option<usize> {
    if !local.is_local() {
        return None;
    }
    Some((local.x * CHUNK_PLANE_SIZE + local.y * CHUNK_DIMENSION + local.z) as usize)
}

/// Inverse of [`local_index`] for indices below `CHUNK_SIZE`.
pub fn index_to_local(index: usize) -> BlockPosition {
    let index = index as i32;
    BlockPosition::new(
        index / CHUNK_PLANE_SIZE,
        (index / CHUNK_DIMENSION) % CHUNK_DIMENSION,
        index % CHUNK_DIMENSION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_of_negative_coordinates() {
        assert_eq!(chunk_of(BlockPosition::new(-1, -16, -17)), ChunkPosition::new(-1, -1, -2));
        assert_eq!(chunk_of(BlockPosition::new(15, 16, 0)), ChunkPosition::new(0, 1, 0));
    }

    #[test]
    fn test_local_of_is_never_negative() {
        assert_eq!(local_of(BlockPosition::new(-1, -16, -17)), BlockPosition::new(15, 0, 15));
        assert_eq!(local_of(BlockPosition::new(31, 16, 5)), BlockPosition::new(15, 0, 5));
    }

    #[test]
    fn test_decomposition_round_trips() {
        for v in -1000..=1000 {
            let position = BlockPosition::new(v, -v, v * 7);
            let chunk = chunk_of(position);
            let local = local_of(position);
            assert!(local.is_local(), "{local:?} escaped the chunk for {position:?}");
            assert_eq!(chunk.block_at(local), position);
        }
    }

    #[test]
    fn test_decomposition_at_extremes() {
        for v in [i32::MIN, i32::MIN + 1, i32::MAX - 1, i32::MAX] {
            let position = BlockPosition::new(v, v, v);
            assert_eq!(position.chunk().block_at(position.local()), position);
        }
    }

    #[test]
    fn test_local_index_layout() {
        assert_eq!(local_index(BlockPosition::new(0, 0, 0)), Some(0));
        assert_eq!(local_index(BlockPosition::new(0, 0, 1)), Some(1));
        assert_eq!(local_index(BlockPosition::new(0, 1, 0)), Some(16));
        assert_eq!(local_index(BlockPosition::new(1, 0, 0)), Some(256));
        assert_eq!(local_index(BlockPosition::new(15, 15, 15)), Some(CHUNK_SIZE - 1));
        assert_eq!(local_index(BlockPosition::new(16, 0, 0)), None);
        assert_eq!(local_index(BlockPosition::new(0, -1, 0)), None);

        for index in 0..CHUNK_SIZE {
            assert_eq!(local_index(index_to_local(index)), Some(index));
        }
    }

    #[test]
    fn test_world_origin_scales_by_block_size() {
        let origin = ChunkPosition::new(1, -2, 0).world_origin(0.1);
        assert!((origin.x - 1.6).abs() < 1e-5);
        assert!((origin.y + 3.2).abs() < 1e-5);
        assert_eq!(origin.z, 0.0);
    }

    #[test]
    fn test_manhattan_distance() {
        let a = ChunkPosition::new(0, 0, 0);
        assert_eq!(a.manhattan_distance(&ChunkPosition::new(5, -2, 1)), 8);
        assert_eq!(
            ChunkPosition::new(i32::MIN, 0, 0).manhattan_distance(&ChunkPosition::new(i32::MAX, 0, 0)),
            u32::MAX as i64
        );
    }

    #[test]
    fn test_offsets_wrap_at_extremes() {
        let edge = BlockPosition::new(i32::MAX, i32::MIN, 0);
        assert_eq!(edge.offset(1, -1, 0), BlockPosition::new(i32::MIN, i32::MAX, 0));

        let far = ChunkPosition::new(i32::MAX, 0, 0);
        assert_eq!(far.block_origin().x, i32::MAX.wrapping_mul(CHUNK_DIMENSION));
        assert_eq!(far.block_at(BlockPosition::new(15, 0, 0)).y, 0);
    }
}
