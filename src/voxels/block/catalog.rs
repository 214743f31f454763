//! # Block Catalog Module
//!
//! The standard block catalog: a compile-time table of [`BlockDefinition`]s indexed
//! by [`BlockType`], plus a perfect-hash map from string ids to types.
//!
//! Nothing here is mutated or lazily initialized. Consumers hold a [`BlockCatalog`]
//! (a pair of `'static` references) and pass it around by value.

use phf::phf_map;

use crate::error::CatalogError;

use super::block_type::{
    BlockDefinition, BlockProperties, BlockType, MaterialTier, ToolType, BLOCK_TYPE_COUNT,
};

/// Definitions for every block type, indexed by `BlockType as usize`.
pub static BLOCK_DEFINITIONS: [BlockDefinition; BLOCK_TYPE_COUNT] = [
    BlockDefinition {
        id: "air",
        display_name: "Air",
        texture_index: 0,
        is_transparent: true,
        is_solid: false,
        hardness: 0.0,
        tool_required: None,
        light_emission: 0,
        properties: BlockProperties::DEFAULT,
    },
    BlockDefinition {
        id: "dirt",
        display_name: "Dirt",
        texture_index: 1,
        is_transparent: false,
        is_solid: true,
        hardness: 0.5,
        tool_required: None,
        light_emission: 0,
        properties: BlockProperties::DEFAULT,
    },
    BlockDefinition {
        id: "grass",
        display_name: "Grass",
        texture_index: 2,
        is_transparent: false,
        is_solid: true,
        hardness: 0.6,
        tool_required: None,
        light_emission: 0,
        properties: BlockProperties::DEFAULT,
    },
    BlockDefinition {
        id: "stone",
        display_name: "Stone",
        texture_index: 3,
        is_transparent: false,
        is_solid: true,
        hardness: 1.5,
        tool_required: Some(ToolType::Pickaxe(MaterialTier::Any)),
        light_emission: 0,
        properties: BlockProperties::DEFAULT,
    },
    BlockDefinition {
        id: "cobblestone",
        display_name: "Cobblestone",
        texture_index: 4,
        is_transparent: false,
        is_solid: true,
        hardness: 2.0,
        tool_required: Some(ToolType::Pickaxe(MaterialTier::Any)),
        light_emission: 0,
        properties: BlockProperties::DEFAULT,
    },
    BlockDefinition {
        id: "oak_log",
        display_name: "Oak Log",
        texture_index: 5,
        is_transparent: false,
        is_solid: true,
        hardness: 2.0,
        tool_required: None,
        light_emission: 0,
        properties: BlockProperties::FLAMMABLE,
    },
    BlockDefinition {
        id: "oak_planks",
        display_name: "Oak Planks",
        texture_index: 6,
        is_transparent: false,
        is_solid: true,
        hardness: 2.0,
        tool_required: None,
        light_emission: 0,
        properties: BlockProperties::FLAMMABLE,
    },
    BlockDefinition {
        id: "glass",
        display_name: "Glass",
        texture_index: 7,
        is_transparent: true,
        is_solid: true,
        hardness: 0.3,
        tool_required: None,
        light_emission: 0,
        properties: BlockProperties::DEFAULT,
    },
    BlockDefinition {
        id: "torch",
        display_name: "Torch",
        texture_index: 8,
        is_transparent: true,
        is_solid: false,
        hardness: 0.0,
        tool_required: None,
        light_emission: 14,
        properties: BlockProperties::DEFAULT,
    },
    BlockDefinition {
        id: "glowstone",
        display_name: "Glowstone",
        texture_index: 9,
        is_transparent: false,
        is_solid: true,
        hardness: 0.3,
        tool_required: None,
        light_emission: 15,
        properties: BlockProperties::DEFAULT,
    },
];

static BLOCK_TYPES_BY_ID: phf::Map<&'static str, BlockType> = phf_map! {
    "air" => BlockType::Air,
    "dirt" => BlockType::Dirt,
    "grass" => BlockType::Grass,
    "stone" => BlockType::Stone,
    "cobblestone" => BlockType::Cobblestone,
    "oak_log" => BlockType::OakLog,
    "oak_planks" => BlockType::OakPlanks,
    "glass" => BlockType::Glass,
    "torch" => BlockType::Torch,
    "glowstone" => BlockType::Glowstone,
};

/// Read-only view over the standard block definitions.
///
/// Copying a catalog copies two references, so it can be handed to every consumer
/// without shared ownership.
///
/// # Examples
///
/// ```
/// use chunk_store::voxels::block::{BlockCatalog, BlockType};
///
/// let catalog = BlockCatalog::standard();
/// assert_eq!(catalog.lookup("glass").unwrap(), BlockType::Glass);
/// assert!(catalog.definition(BlockType::Glass).is_transparent);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct BlockCatalog {
    definitions: &'static [BlockDefinition; BLOCK_TYPE_COUNT],
    types_by_id: &'static phf::Map<&'static str, BlockType>,
}

impl BlockCatalog {
    /// The standard catalog.
    pub fn standard() -> Self {
        BlockCatalog {
            definitions: &BLOCK_DEFINITIONS,
            types_by_id: &BLOCK_TYPES_BY_ID,
        }
    }

    /// The definition of a block type.
    pub fn definition(&self, block_type: BlockType) -> &'static BlockDefinition {
        &self.definitions[block_type as usize]
    }

    /// Resolves a string id such as `"oak_log"` to its block type.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownBlockType`] if no type has that id.
    pub fn lookup(&self, id: &str) -> Result<BlockType, CatalogError> {
        self.types_by_id
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::UnknownBlockType(id.to_owned()))
    }

    /// Resolves a string id straight to its definition.
    pub fn definition_by_id(&self, id: &str) -> Result<&'static BlockDefinition, CatalogError> {
        self.lookup(id).map(|block_type| self.definition(block_type))
    }

    /// Iterates over every type with its definition, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockType, &'static BlockDefinition)> + '_ {
        BlockType::ALL
            .into_iter()
            .map(|block_type| (block_type, self.definition(block_type)))
    }

    /// Number of defined block types.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Always `false` for the standard catalog.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        BlockCatalog::standard()
    }
}
