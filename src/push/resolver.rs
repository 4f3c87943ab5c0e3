use log::debug;
use std::collections::VecDeque;

use crate::world::{
    effective_reaction, BlockGrid, BlockRegistry, Direction, PushReaction, VoxelPos,
};

/// Result of resolving one push attempt. Ephemeral: built, checked,
/// handed to the executor, discarded. An infeasible graph keeps whatever
/// was gathered before the failure, for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushGraph {
    /// Cells to relocate, nearest to the actuator first
    pub to_move: Vec<VoxelPos>,
    /// Cells that break instead of moving
    pub to_destroy: Vec<VoxelPos>,
    /// Direction every relocated cell travels
    pub direction: Direction,
    pub feasible: bool,
}

/// Work out which cells a push displaces or destroys, without mutating
/// anything. Bounded breadth-first traversal from the cell in front of the
/// actuator: the frontier advances along the push direction and branches
/// into cells attached to multi-cell structures.
///
/// Infeasibility (an immovable obstruction, the chain cap, a traversal
/// cycle, unloaded terrain, the chain curling back into the actuator) is a
/// normal result, not an error; the reason is only logged.
pub fn resolve_push(
    grid: &dyn BlockGrid,
    registry: &BlockRegistry,
    origin: VoxelPos,
    facing: Direction,
    extending: bool,
    limit: usize,
) -> PushGraph {
    let push_dir = if extending { facing } else { facing.opposite() };
    // Extension displaces the cell in front of the actuator; retraction
    // pulls the cell beyond the vacated head position.
    let start = if extending {
        origin.relative(facing)
    } else {
        origin.relative_n(facing, 2)
    };
    // The head cell is vacated by a retraction, so the frontier treats it
    // as empty rather than as part of the chain.
    let vacated = origin.relative(facing);

    let mut graph = PushGraph {
        to_move: Vec::new(),
        to_destroy: Vec::new(),
        direction: push_dir,
        feasible: true,
    };
    let mut frontier: VecDeque<VoxelPos> = VecDeque::new();
    frontier.push_back(start);

    while let Some(pos) = frontier.pop_front() {
        if !extending && pos == vacated {
            continue;
        }
        if pos == origin {
            debug!("push at {:?} infeasible: chain reaches the actuator", origin);
            graph.feasible = false;
            return graph;
        }
        if !grid.is_loaded(pos, pos) {
            debug!("push at {:?} infeasible: {:?} is not loaded", origin, pos);
            graph.feasible = false;
            return graph;
        }

        let state = grid.get(pos);
        if state.is_air() {
            continue;
        }
        if graph.to_move.contains(&pos) {
            // A cell asked to occupy two displaced positions at once
            debug!("push at {:?} infeasible: cycle through {:?}", origin, pos);
            graph.feasible = false;
            return graph;
        }
        if graph.to_destroy.contains(&pos) {
            continue;
        }

        let Some(block) = registry.get_block(state.id) else {
            debug!(
                "push at {:?} infeasible: unknown block id {} at {:?}",
                origin, state.id, pos
            );
            graph.feasible = false;
            return graph;
        };

        match effective_reaction(block.as_ref(), &state) {
            PushReaction::Block => {
                if !extending {
                    // A pull never forces the obstruction along; the chain
                    // simply ends here.
                    continue;
                }
                debug!(
                    "push at {:?} infeasible: immovable {} at {:?}",
                    origin, state.id, pos
                );
                graph.feasible = false;
                return graph;
            }
            PushReaction::Destroy => {
                if extending {
                    graph.to_destroy.push(pos);
                }
                continue;
            }
            PushReaction::PushOnly if !extending => {
                // Cannot be pulled; stays where it is
                continue;
            }
            PushReaction::Normal | PushReaction::PushOnly => {
                if !extending && pos == start && !block.is_solid_face(&state, push_dir) {
                    // A pull only latches onto a solid face
                    continue;
                }
                graph.to_move.push(pos);
                if graph.to_move.len() > limit {
                    debug!(
                        "push at {:?} infeasible: chain exceeds cap of {}",
                        origin, limit
                    );
                    graph.feasible = false;
                    return graph;
                }
                frontier.push_back(pos.relative(push_dir));
                for dep in block.attached_cells(&state, pos) {
                    if !graph.to_move.contains(&dep) {
                        frontier.push_back(dep);
                    }
                }
            }
        }
    }

    graph
}
