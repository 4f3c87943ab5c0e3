//! Continuous-space side of the core: box math, the sub-cell shape
//! algebra, the per-axis collision sweep with step assist, and the entity
//! bodies that consume it.

pub mod aabb;
pub mod body;
pub mod shape;
pub mod sweep;

pub use aabb::Aabb;
pub use body::{Body, EntityId, PhysicsWorld};
pub use shape::VoxelShape;
pub use sweep::{sweep_move, SweepParams};
