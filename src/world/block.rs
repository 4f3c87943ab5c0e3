use serde::{Deserialize, Serialize};
use std::fmt;

use crate::physics::VoxelShape;
use crate::world::{Direction, VoxelPos};

/// Unique identifier for a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BlockId::AIR => write!(f, "Air"),
            BlockId::STONE => write!(f, "Stone"),
            BlockId::OBSIDIAN => write!(f, "Obsidian"),
            BlockId::LEAVES => write!(f, "Leaves"),
            BlockId::SLAB => write!(f, "Slab"),
            BlockId::GLAZED => write!(f, "Glazed"),
            BlockId::BEDROCK => write!(f, "Bedrock"),
            BlockId::PISTON => write!(f, "Piston"),
            BlockId::PISTON_HEAD => write!(f, "Piston Head"),
            BlockId::MOVING => write!(f, "Moving"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const STONE: BlockId = BlockId(1);
    pub const OBSIDIAN: BlockId = BlockId(2);
    pub const LEAVES: BlockId = BlockId(3);
    pub const SLAB: BlockId = BlockId(4);
    pub const GLAZED: BlockId = BlockId(5);
    pub const BEDROCK: BlockId = BlockId(6);
    pub const PISTON: BlockId = BlockId(7);
    pub const PISTON_HEAD: BlockId = BlockId(8);
    /// Transient placeholder written at a cell while its contents are in transit
    pub const MOVING: BlockId = BlockId(9);

    // Game-specific blocks register from here up
    pub const GAME_BLOCK_START: u16 = 100;
}

/// How a block reacts to being caught in a push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PushReaction {
    /// Pushed and pulled like any other block
    Normal,
    /// Breaks instead of moving (plants, leaves)
    Destroy,
    /// Stops the whole push
    Block,
    /// Can be pushed but never pulled
    PushOnly,
}

/// The complete state stored at one grid cell: a block id plus its
/// property values. Immutable value type; the grid swaps whole states,
/// it never mutates one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    pub id: BlockId,
    pub facing: Direction,
    pub extended: bool,
    pub waterlogged: bool,
}

impl BlockState {
    pub const AIR: BlockState = BlockState {
        id: BlockId::AIR,
        facing: Direction::North,
        extended: false,
        waterlogged: false,
    };

    pub const MOVING: BlockState = BlockState {
        id: BlockId::MOVING,
        facing: Direction::North,
        extended: false,
        waterlogged: false,
    };

    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            facing: Direction::North,
            extended: false,
            waterlogged: false,
        }
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    pub fn is_air(&self) -> bool {
        self.id == BlockId::AIR
    }
}

impl Default for BlockState {
    fn default() -> Self {
        BlockState::AIR
    }
}

/// Trait every block type implements. Only the capabilities the movement
/// and push cores consume live here; rendering, drops, interaction and the
/// rest stay with the host.
pub trait Block: Send + Sync {
    /// Get the unique ID for this block type
    fn get_id(&self) -> BlockId;

    /// Get display name for this block
    fn get_name(&self) -> &str;

    /// How this block reacts to a push
    fn push_reaction(&self, _state: &BlockState) -> PushReaction {
        PushReaction::Normal
    }

    /// Collidable volume inside the unit cell, in cell-local coordinates
    fn collision_shape(&self, _state: &BlockState) -> VoxelShape {
        VoxelShape::full_cube()
    }

    /// Whether the given face is a full solid square
    fn is_solid_face(&self, state: &BlockState, _dir: Direction) -> bool {
        !self.collision_shape(state).is_empty()
    }

    /// Get the hardness of this block (time in seconds to break).
    /// Negative means unbreakable; an unbreakable block never moves.
    fn hardness(&self, _state: &BlockState) -> f32 {
        1.0
    }

    /// Cells occupied by the same multi-cell structure as `pos`. Any cell
    /// returned here moves in lock-step with `pos` during a push.
    fn attached_cells(&self, _state: &BlockState, _pos: VoxelPos) -> Vec<VoxelPos> {
        Vec::new()
    }

    /// Whether destroying this block should emit drop side effects
    fn drops_on_destroy(&self, _state: &BlockState) -> bool {
        true
    }
}

/// The reaction actually used by the push resolver: negative hardness
/// overrides whatever the block declares.
pub fn effective_reaction(block: &dyn Block, state: &BlockState) -> PushReaction {
    if block.hardness(state) < 0.0 {
        PushReaction::Block
    } else {
        block.push_reaction(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unbreakable;

    impl Block for Unbreakable {
        fn get_id(&self) -> BlockId {
            BlockId::BEDROCK
        }
        fn get_name(&self) -> &str {
            "Unbreakable"
        }
        fn push_reaction(&self, _state: &BlockState) -> PushReaction {
            PushReaction::Normal
        }
        fn hardness(&self, _state: &BlockState) -> f32 {
            -1.0
        }
    }

    #[test]
    fn negative_hardness_forces_block_reaction() {
        let state = BlockState::new(BlockId::BEDROCK);
        assert_eq!(
            effective_reaction(&Unbreakable, &state),
            PushReaction::Block
        );
    }

    #[test]
    fn state_is_a_value() {
        let a = BlockState::new(BlockId::STONE).with_facing(Direction::East);
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, BlockState::new(BlockId::STONE));
    }
}
