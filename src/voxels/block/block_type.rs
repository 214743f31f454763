//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and the
//! static properties attached to each of them.
//!
//! A [`BlockType`] is a compact identifier. Everything else about a type (display
//! name, texture, hardness, tooling, light emission) lives in an immutable
//! [`BlockDefinition`] looked up through the catalog.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::catalog::BLOCK_DEFINITIONS;
use super::BlockTypeSize;

/// Number of block types in the standard catalog.
pub const BLOCK_TYPE_COUNT: usize = 10;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant doubles as the index into the catalog table, and the
/// `FromPrimitive` derive allows conversion back from the compact integer form.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockType {
    /// Empty space. Transparent and non-solid.
    Air = 0,
    /// A basic dirt block.
    Dirt = 1,
    /// A grass-topped dirt block.
    Grass = 2,
    /// Natural stone, needs a pickaxe.
    Stone = 3,
    /// Broken stone, needs a pickaxe.
    Cobblestone = 4,
    /// A flammable log.
    OakLog = 5,
    /// Flammable planks crafted from logs.
    OakPlanks = 6,
    /// Transparent but solid.
    Glass = 7,
    /// A non-solid light source.
    Torch = 8,
    /// A solid block emitting full light.
    Glowstone = 9,
}

impl BlockType {
    /// Every block type, in catalog order.
    pub const ALL: [BlockType; BLOCK_TYPE_COUNT] = [
        BlockType::Air,
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Stone,
        BlockType::Cobblestone,
        BlockType::OakLog,
        BlockType::OakPlanks,
        BlockType::Glass,
        BlockType::Torch,
        BlockType::Glowstone,
    ];

    /// Converts the compact integer form back into a `BlockType`.
    ///
    /// # Returns
    /// `None` if the value does not name a known type.
    pub fn from_index(btype: BlockTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(btype)
    }

    /// The compact integer form of this type.
    pub const fn index(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// The static definition of this type.
    pub fn definition(self) -> &'static BlockDefinition {
        &BLOCK_DEFINITIONS[self as usize]
    }

    /// The string identifier of this type, e.g. `"oak_log"`.
    pub fn id(self) -> &'static str {
        self.definition().id
    }

    /// Returns `true` for [`BlockType::Air`].
    #[inline]
    pub const fn is_air(self) -> bool {
        matches!(self, BlockType::Air)
    }
}

impl Default for BlockType {
    fn default() -> Self {
        BlockType::Air
    }
}

/// Immutable properties shared by every block of one type.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BlockDefinition {
    /// Stable string identifier, e.g. `"stone"`.
    pub id: &'static str,
    /// Human readable name.
    pub display_name: &'static str,
    /// Index into the texture atlas.
    pub texture_index: u32,
    /// Whether light and neighboring faces are visible through this block.
    pub is_transparent: bool,
    /// Whether the block occupies its cell physically.
    pub is_solid: bool,
    /// Mining resistance. Never negative.
    pub hardness: f32,
    /// Tool needed to harvest the block, if any.
    pub tool_required: Option<ToolType>,
    /// Emitted light level in `[0, 15]`.
    pub light_emission: u8,
    /// Miscellaneous behavior flags.
    pub properties: BlockProperties,
}

/// Miscellaneous behavior flags of a block type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockProperties {
    /// Falls when unsupported.
    pub is_gravity_affected: bool,
    /// Can catch fire.
    pub is_flammable: bool,
    /// Can share its cell with water.
    pub can_be_waterlogged: bool,
    /// Blocks movement.
    pub has_collision: bool,
}

impl BlockProperties {
    /// The default flag set: only collision enabled.
    pub const DEFAULT: BlockProperties = BlockProperties {
        is_gravity_affected: false,
        is_flammable: false,
        can_be_waterlogged: false,
        has_collision: true,
    };

    /// The default flag set with `is_flammable` enabled.
    pub const FLAMMABLE: BlockProperties = BlockProperties {
        is_flammable: true,
        ..BlockProperties::DEFAULT
    };
}

impl Default for BlockProperties {
    fn default() -> Self {
        BlockProperties::DEFAULT
    }
}

/// The kind of tool required to harvest a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// A pickaxe of at least the given tier.
    Pickaxe(MaterialTier),
    /// An axe of at least the given tier.
    Axe(MaterialTier),
    /// A shovel of at least the given tier.
    Shovel(MaterialTier),
    /// A hoe of at least the given tier.
    Hoe(MaterialTier),
    /// A sword of at least the given tier.
    Sword(MaterialTier),
    /// Shears, which have no tier.
    Shears,
}

/// The material a tool is made of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialTier {
    /// Any material qualifies.
    Any,
    /// Wooden tools.
    Wood,
    /// Stone tools.
    Stone,
    /// Iron tools.
    Iron,
    /// Diamond tools.
    Diamond,
    /// Gold tools.
    Gold,
}
