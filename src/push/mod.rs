//! Block-displacement core: resolve which cells a push moves or breaks,
//! then apply the relocation atomically and carry riders along.

pub mod executor;
pub mod resolver;

pub use executor::{apply_push, NoHooks, PushHooks};
pub use resolver::{resolve_push, PushGraph};

use cgmath::Vector3;
use log::debug;

use crate::constants::notify;
use crate::physics::{Aabb, PhysicsWorld};
use crate::world::{BlockGrid, BlockId, BlockRegistry, BlockState, Direction, VoxelPos};
use crate::MechanicsConfig;

/// Try to extend the actuator at `origin` one cell along `facing`.
///
/// Resolves the push graph first; if it is infeasible nothing is mutated
/// and `false` comes back. Otherwise entities riding the displaced cells
/// shift by the same unit vector, the grid relocation commits, and when the
/// origin block is a piston base its head and extended flag are maintained.
pub fn try_extend(
    grid: &mut dyn BlockGrid,
    registry: &BlockRegistry,
    entities: &mut PhysicsWorld,
    origin: VoxelPos,
    facing: Direction,
    config: &MechanicsConfig,
    hooks: &mut dyn PushHooks,
) -> bool {
    let graph = resolve_push(grid, registry, origin, facing, true, config.push_limit);
    if !graph.feasible {
        return false;
    }

    let base = grid.get(origin);
    // The head also sweeps into the cell in front of the actuator
    let head_cell = (base.id == BlockId::PISTON).then(|| origin.relative(facing));
    shift_riders(entities, &graph, head_cell, facing.to_vec());

    apply_push(grid, registry, &graph, hooks);

    if base.id == BlockId::PISTON {
        grid.set(origin, base.with_extended(true), notify::UPDATE_NEIGHBORS);
        grid.set(
            origin.relative(facing),
            BlockState::new(BlockId::PISTON_HEAD).with_facing(facing),
            notify::UPDATE_NEIGHBORS,
        );
        hooks.on_update(origin);
        hooks.on_update(origin.relative(facing));
    }
    debug!("extend at {:?} toward {:?} succeeded", origin, facing);
    true
}

/// Try to retract the actuator at `origin`, pulling the cell beyond the
/// vacated head back toward it when that cell can be pulled.
pub fn try_retract(
    grid: &mut dyn BlockGrid,
    registry: &BlockRegistry,
    entities: &mut PhysicsWorld,
    origin: VoxelPos,
    facing: Direction,
    config: &MechanicsConfig,
    hooks: &mut dyn PushHooks,
) -> bool {
    let graph = resolve_push(grid, registry, origin, facing, false, config.push_limit);
    if !graph.feasible {
        return false;
    }

    // Vacate the head cell before the pulled states commit into it
    let head_pos = origin.relative(facing);
    let base = grid.get(origin);
    if base.id == BlockId::PISTON {
        grid.set(head_pos, BlockState::AIR, notify::SILENT);
        grid.set(origin, base.with_extended(false), notify::UPDATE_NEIGHBORS);
    }

    shift_riders(entities, &graph, None, graph.direction.to_vec());
    apply_push(grid, registry, &graph, hooks);

    if base.id == BlockId::PISTON {
        hooks.on_update(origin);
        hooks.on_update(head_pos);
    }
    debug!("retract at {:?} toward {:?} succeeded", origin, facing);
    true
}

// A relocated cell displaces whatever stands in the space it arrives in,
// so the overlap test runs against destination cells. The cells are
// gathered into one pass so a body straddling several of them still
// shifts exactly one unit.
fn shift_riders(
    entities: &mut PhysicsWorld,
    graph: &PushGraph,
    head_cell: Option<VoxelPos>,
    offset: Vector3<f64>,
) {
    let cells: Vec<Aabb> = graph
        .to_move
        .iter()
        .map(|p| Aabb::unit_cell(p.relative(graph.direction)))
        .chain(head_cell.map(Aabb::unit_cell))
        .collect();
    entities.shift_overlapping(&cells, offset);
}
