//! Voxel-world movement and block-displacement core.
//!
//! Two subsystems share the grid collaborators: the collision sweep, which
//! resolves how an axis-aligned box travels through occupied cells with
//! optional step assist, and the push engine, which relocates contiguous
//! runs of cells (and whatever rides on them) one step along an axis,
//! refusing atomically when the move cannot happen.

pub mod constants;
pub mod error;
pub mod physics;
pub mod push;
pub mod world;

pub use error::{MechanicsError, MechanicsResult};
pub use physics::{sweep_move, Aabb, Body, EntityId, PhysicsWorld, SweepParams, VoxelShape};
pub use push::{apply_push, resolve_push, try_extend, try_retract, NoHooks, PushGraph, PushHooks};
pub use world::{
    place, Block, BlockGrid, BlockId, BlockRegistry, BlockState, Direction, PushReaction,
    SparseGrid, VoxelPos,
};

/// Engine-level tuning knobs. The defaults mirror the classic game feel:
/// a chain cap small enough to stay bounded, a step height of a little
/// over half a cell.
#[derive(Debug, Clone)]
pub struct MechanicsConfig {
    pub step_height: f64,
    pub push_limit: usize,
}

impl Default for MechanicsConfig {
    fn default() -> Self {
        Self {
            step_height: constants::collision::DEFAULT_STEP_HEIGHT,
            push_limit: constants::push::DEFAULT_PUSH_LIMIT,
        }
    }
}
