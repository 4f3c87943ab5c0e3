use crate::physics::VoxelShape;
use crate::world::{Block, BlockId, BlockState, Direction, PushReaction, VoxelPos};

/// Register every built-in block kind. Panics if two built-ins claim the
/// same id.
pub fn register_all(registry: &mut super::BlockRegistry) {
    registry
        .register_with_id(AirBlock)
        .and_then(|_| registry.register_with_id(StoneBlock))
        .and_then(|_| registry.register_with_id(ObsidianBlock))
        .and_then(|_| registry.register_with_id(LeavesBlock))
        .and_then(|_| registry.register_with_id(SlabBlock))
        .and_then(|_| registry.register_with_id(GlazedBlock))
        .and_then(|_| registry.register_with_id(BedrockBlock))
        .and_then(|_| registry.register_with_id(PistonBlock))
        .and_then(|_| registry.register_with_id(PistonHeadBlock))
        .and_then(|_| registry.register_with_id(MovingBlock))
        .expect("built-in block ids collide");
}

/// Air: no collision, vanishes under a push
#[derive(Debug, Clone)]
pub struct AirBlock;

impl Block for AirBlock {
    fn get_id(&self) -> BlockId {
        BlockId::AIR
    }

    fn get_name(&self) -> &str {
        "Air"
    }

    fn push_reaction(&self, _state: &BlockState) -> PushReaction {
        PushReaction::Destroy
    }

    fn collision_shape(&self, _state: &BlockState) -> VoxelShape {
        VoxelShape::empty()
    }

    fn drops_on_destroy(&self, _state: &BlockState) -> bool {
        false
    }
}

/// Stone: the ordinary full-cube movable block
#[derive(Debug, Clone)]
pub struct StoneBlock;

impl Block for StoneBlock {
    fn get_id(&self) -> BlockId {
        BlockId::STONE
    }

    fn get_name(&self) -> &str {
        "Stone"
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        3.0
    }
}

/// Obsidian: declares itself immovable
#[derive(Debug, Clone)]
pub struct ObsidianBlock;

impl Block for ObsidianBlock {
    fn get_id(&self) -> BlockId {
        BlockId::OBSIDIAN
    }

    fn get_name(&self) -> &str {
        "Obsidian"
    }

    fn push_reaction(&self, _state: &BlockState) -> PushReaction {
        PushReaction::Block
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        50.0
    }
}

/// Leaves: break instead of moving
#[derive(Debug, Clone)]
pub struct LeavesBlock;

impl Block for LeavesBlock {
    fn get_id(&self) -> BlockId {
        BlockId::LEAVES
    }

    fn get_name(&self) -> &str {
        "Leaves"
    }

    fn push_reaction(&self, _state: &BlockState) -> PushReaction {
        PushReaction::Destroy
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        0.2
    }
}

/// Bottom slab: half-height collision volume
#[derive(Debug, Clone)]
pub struct SlabBlock;

impl Block for SlabBlock {
    fn get_id(&self) -> BlockId {
        BlockId::SLAB
    }

    fn get_name(&self) -> &str {
        "Slab"
    }

    fn collision_shape(&self, _state: &BlockState) -> VoxelShape {
        VoxelShape::bottom_slab()
    }

    fn is_solid_face(&self, _state: &BlockState, dir: Direction) -> bool {
        dir == Direction::Down
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        2.0
    }
}

/// Glazed block: pushable, but a sticky retraction cannot grab it
#[derive(Debug, Clone)]
pub struct GlazedBlock;

impl Block for GlazedBlock {
    fn get_id(&self) -> BlockId {
        BlockId::GLAZED
    }

    fn get_name(&self) -> &str {
        "Glazed"
    }

    fn push_reaction(&self, _state: &BlockState) -> PushReaction {
        PushReaction::PushOnly
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        1.4
    }
}

/// Bedrock: unbreakable; the negative hardness overrides any reaction
#[derive(Debug, Clone)]
pub struct BedrockBlock;

impl Block for BedrockBlock {
    fn get_id(&self) -> BlockId {
        BlockId::BEDROCK
    }

    fn get_name(&self) -> &str {
        "Bedrock"
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        -1.0
    }
}

/// Piston base. While extended it owns the head cell in front of it and
/// cannot itself be displaced.
#[derive(Debug, Clone)]
pub struct PistonBlock;

impl Block for PistonBlock {
    fn get_id(&self) -> BlockId {
        BlockId::PISTON
    }

    fn get_name(&self) -> &str {
        "Piston"
    }

    fn push_reaction(&self, state: &BlockState) -> PushReaction {
        if state.extended {
            PushReaction::Block
        } else {
            PushReaction::Normal
        }
    }

    fn attached_cells(&self, state: &BlockState, pos: VoxelPos) -> Vec<VoxelPos> {
        if state.extended {
            vec![pos.relative(state.facing)]
        } else {
            Vec::new()
        }
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        1.5
    }
}

/// Piston head: moves only in lock-step with its base
#[derive(Debug, Clone)]
pub struct PistonHeadBlock;

impl Block for PistonHeadBlock {
    fn get_id(&self) -> BlockId {
        BlockId::PISTON_HEAD
    }

    fn get_name(&self) -> &str {
        "Piston Head"
    }

    fn push_reaction(&self, _state: &BlockState) -> PushReaction {
        PushReaction::Block
    }

    fn attached_cells(&self, state: &BlockState, pos: VoxelPos) -> Vec<VoxelPos> {
        vec![pos.relative(state.facing.opposite())]
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        1.5
    }
}

/// In-transit placeholder. Fully blocking so that nothing else claims the
/// cell while a push is mid-commit; never dropped, never pushed.
#[derive(Debug, Clone)]
pub struct MovingBlock;

impl Block for MovingBlock {
    fn get_id(&self) -> BlockId {
        BlockId::MOVING
    }

    fn get_name(&self) -> &str {
        "Moving"
    }

    fn push_reaction(&self, _state: &BlockState) -> PushReaction {
        PushReaction::Block
    }

    fn drops_on_destroy(&self, _state: &BlockState) -> bool {
        false
    }

    fn hardness(&self, _state: &BlockState) -> f32 {
        -1.0
    }
}
