//! Grid-facing data model: positions, block identity and state, the
//! capability trait blocks implement, the registry, and the storage
//! collaborator interface.

pub mod basic_blocks;
pub mod block;
pub mod grid;
pub mod position;
pub mod registry;

pub use block::{effective_reaction, Block, BlockId, BlockState, PushReaction};
pub use grid::{place, BlockGrid, SparseGrid};
pub use position::{Axis, Direction, VoxelPos};
pub use registry::BlockRegistry;
