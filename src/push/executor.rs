use log::{trace, warn};
use std::collections::HashSet;

use crate::constants::notify;
use crate::push::PushGraph;
use crate::world::{BlockGrid, BlockRegistry, BlockState, VoxelPos};

/// Side-effect hooks the executor fires while applying a push. Drops,
/// particles, sounds and redstone-like cascades all live behind this seam;
/// the executor itself only mutates the grid.
pub trait PushHooks {
    /// A cell broke instead of moving
    fn on_destroy(&mut self, _pos: VoxelPos, _state: BlockState) {}
    /// A cell's state arrived at its destination
    fn on_moved(&mut self, _from: VoxelPos, _to: VoxelPos, _state: BlockState) {}
    /// A touched cell should notify its neighbors
    fn on_update(&mut self, _pos: VoxelPos) {}
}

/// Hook implementation that does nothing
pub struct NoHooks;

impl PushHooks for NoHooks {}

/// Apply a feasible push graph to the grid.
///
/// Precondition: `graph.feasible`. Calling with an infeasible graph is a
/// contract violation; it trips a debug assertion and does nothing in
/// release builds.
///
/// The step order is load-bearing:
/// 1. destroy far-to-near, so a near teardown never masks a far read;
/// 2. stage relocations far-to-near, writing the in-motion placeholder at
///    each source so no intermediate read sees a half-moved chain;
/// 3. clear every source that is not about to be overwritten by a staged
///    destination;
/// 4. commit the staged destination states;
/// 5. one notification pass over touched cells, in relocate-list order.
pub fn apply_push(
    grid: &mut dyn BlockGrid,
    registry: &BlockRegistry,
    graph: &PushGraph,
    hooks: &mut dyn PushHooks,
) -> bool {
    debug_assert!(graph.feasible, "apply_push called with an infeasible graph");
    if !graph.feasible {
        return false;
    }
    let dir = graph.direction;

    // 1. Destroy, furthest from the actuator first
    for &pos in graph.to_destroy.iter().rev() {
        let state = grid.get(pos);
        if let Some(block) = registry.get_block(state.id) {
            if block.drops_on_destroy(&state) {
                hooks.on_destroy(pos, state);
            }
        }
        set_or_warn(grid, pos, BlockState::AIR, notify::UPDATE_NEIGHBORS);
    }

    // 2. Stage relocations, furthest first, leaving the in-motion
    //    placeholder behind at each source
    let mut staged: Vec<(VoxelPos, BlockState)> = Vec::with_capacity(graph.to_move.len());
    for &pos in graph.to_move.iter().rev() {
        let state = grid.get(pos);
        staged.push((pos.relative(dir), state));
        set_or_warn(grid, pos, BlockState::MOVING, notify::SILENT);
    }

    // 3. Clear sources that no staged destination will overwrite
    let destinations: HashSet<VoxelPos> = staged.iter().map(|(d, _)| *d).collect();
    for &pos in graph.to_move.iter() {
        if !destinations.contains(&pos) {
            set_or_warn(grid, pos, BlockState::AIR, notify::SILENT);
        }
    }

    // 4. Commit destinations
    for &(dest, state) in &staged {
        set_or_warn(grid, dest, state, notify::UPDATE_NEIGHBORS);
        hooks.on_moved(dest.relative(dir.opposite()), dest, state);
    }
    trace!(
        "push applied: {} relocated, {} destroyed toward {:?}",
        staged.len(),
        graph.to_destroy.len(),
        dir
    );

    // 5. Notifications, relocate-list order, sources then destinations
    for &pos in &graph.to_move {
        hooks.on_update(pos);
        hooks.on_update(pos.relative(dir));
    }
    for &pos in &graph.to_destroy {
        hooks.on_update(pos);
    }

    true
}

fn set_or_warn(grid: &mut dyn BlockGrid, pos: VoxelPos, state: BlockState, flags: u8) {
    if !grid.set(pos, state, flags) {
        // The resolver verified residency, so a rejected write here means
        // the grid changed under us; keep going to leave no staged state.
        warn!("grid rejected write at {:?} during push execution", pos);
    }
}
