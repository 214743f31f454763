//! # Block Face Module
//!
//! This module defines the six faces of a voxel block. Renderers use the face
//! normals for per-face culling; the store itself never reads them.

use cgmath::Vector3;

use crate::voxels::position::BlockPosition;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [Top, Bottom, North, South, East, West]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockFace {
    /// Facing positive Y.
    Top = 0,
    /// Facing negative Y.
    Bottom = 1,
    /// Facing positive Z.
    North = 2,
    /// Facing negative Z.
    South = 3,
    /// Facing positive X.
    East = 4,
    /// Facing negative X.
    West = 5,
}

const FACE_OFFSETS: [[i32; 3]; 6] = [
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
    [1, 0, 0],
    [-1, 0, 0],
];

impl BlockFace {
    /// Returns an array containing all six block faces in a consistent order.
    pub fn all() -> [BlockFace; 6] {
        [
            BlockFace::Top,
            BlockFace::Bottom,
            BlockFace::North,
            BlockFace::South,
            BlockFace::East,
            BlockFace::West,
        ]
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let [x, y, z] = FACE_OFFSETS[self as usize];
        Vector3::new(x as f32, y as f32, z as f32)
    }

    /// The face pointing the other way.
    pub fn opposite(self) -> BlockFace {
        match self {
            BlockFace::Top => BlockFace::Bottom,
            BlockFace::Bottom => BlockFace::Top,
            BlockFace::North => BlockFace::South,
            BlockFace::South => BlockFace::North,
            BlockFace::East => BlockFace::West,
            BlockFace::West => BlockFace::East,
        }
    }

    /// The position one step across this face.
    pub fn neighbor(self, position: BlockPosition) -> BlockPosition {
        let [dx, dy, dz] = FACE_OFFSETS[self as usize];
        position.offset(dx, dy, dz)
    }
}
