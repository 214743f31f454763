//! # Voxel Store
//!
//! This module contains the voxel data model and the chunk store built on it.
//!
//! ## Architecture
//!
//! * **Position**: Global, chunk and local coordinates, and the floor-based
//!   conversions between them
//! * **Block**: Block types, the static catalog describing them, and per-instance
//!   block state
//! * **Chunk**: Fixed 16x16x16 arrays of optional blocks with change flags
//! * **Chunk Manager**: Owns every resident chunk, creates them on demand and evicts
//!   them when too many are loaded
//!
//! ## Data Flow
//!
//! 1. Callers read or write a block at a global position
//! 2. The manager splits the position into chunk and local coordinates
//! 3. Writes create the owning chunk if needed, which may evict other chunks
//! 4. The chunk raises its dirty and mesh flags for persistence and rendering
//!
//! ## Thread Safety
//!
//! Nothing in here locks. Wrap the manager in a
//! [`SharedChunkManager`](chunk_manager::SharedChunkManager) to share it between
//! threads.

pub mod block;
pub mod chunk;
pub mod chunk_manager;
pub mod position;
