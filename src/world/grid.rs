use log::warn;
use std::collections::HashMap;

use crate::constants::notify;
use crate::world::{BlockState, VoxelPos};

/// Storage collaborator for the movement and push cores. Implementations
/// own chunk residency and persistence; this core only reads cells, writes
/// cells, and asks whether a region is resident.
pub trait BlockGrid {
    /// Current state at `pos`. Reads outside the loaded region return air;
    /// callers that care must check `is_loaded` first (the sweep and the
    /// push resolver both do, and treat unloaded as solid).
    fn get(&self, pos: VoxelPos) -> BlockState;

    /// Replace the state at `pos`. Returns false when the write was
    /// rejected (e.g. the cell is not resident).
    fn set(&mut self, pos: VoxelPos, state: BlockState, flags: u8) -> bool;

    /// Whether every cell in the inclusive box `min..=max` is resident
    fn is_loaded(&self, min: VoxelPos, max: VoxelPos) -> bool;
}

/// In-memory grid backed by a hash map, with an optional inclusive loaded
/// bound. Cells outside the bound reject writes and report unloaded.
/// Used by the test suite and by hosts without their own storage layer.
pub struct SparseGrid {
    cells: HashMap<VoxelPos, BlockState>,
    bounds: Option<(VoxelPos, VoxelPos)>,
}

impl SparseGrid {
    /// Unbounded grid: every position is loaded
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            bounds: None,
        }
    }

    /// Grid where only `min..=max` (inclusive) is loaded
    pub fn bounded(min: VoxelPos, max: VoxelPos) -> Self {
        Self {
            cells: HashMap::new(),
            bounds: Some((min, max)),
        }
    }

    fn in_bounds(&self, pos: VoxelPos) -> bool {
        match self.bounds {
            None => true,
            Some((min, max)) => {
                pos.x >= min.x
                    && pos.x <= max.x
                    && pos.y >= min.y
                    && pos.y <= max.y
                    && pos.z >= min.z
                    && pos.z <= max.z
            }
        }
    }

    /// Every non-air cell, sorted, for snapshot comparison
    pub fn snapshot(&self) -> Vec<(VoxelPos, BlockState)> {
        let mut cells: Vec<_> = self
            .cells
            .iter()
            .filter(|(_, s)| !s.is_air())
            .map(|(p, s)| (*p, *s))
            .collect();
        cells.sort_by_key(|(p, _)| (p.x, p.y, p.z));
        cells
    }
}

impl Default for SparseGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockGrid for SparseGrid {
    fn get(&self, pos: VoxelPos) -> BlockState {
        self.cells.get(&pos).copied().unwrap_or(BlockState::AIR)
    }

    fn set(&mut self, pos: VoxelPos, state: BlockState, _flags: u8) -> bool {
        if !self.in_bounds(pos) {
            warn!("rejected block write outside loaded bounds at {:?}", pos);
            return false;
        }
        if state.is_air() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, state);
        }
        true
    }

    fn is_loaded(&self, min: VoxelPos, max: VoxelPos) -> bool {
        self.in_bounds(min) && self.in_bounds(max)
    }
}

/// Convenience for placing a block with the default notify flags
pub fn place(grid: &mut dyn BlockGrid, pos: VoxelPos, state: BlockState) -> bool {
    grid.set(pos, state, notify::UPDATE_NEIGHBORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BlockId;

    #[test]
    fn unbounded_grid_accepts_any_write() {
        let mut grid = SparseGrid::new();
        let pos = VoxelPos::new(1000, -1000, 0);
        assert!(place(&mut grid, pos, BlockState::new(BlockId::STONE)));
        assert_eq!(grid.get(pos).id, BlockId::STONE);
    }

    #[test]
    fn bounded_grid_rejects_outside_writes() {
        let mut grid = SparseGrid::bounded(VoxelPos::new(0, 0, 0), VoxelPos::new(7, 7, 7));
        assert!(!place(
            &mut grid,
            VoxelPos::new(8, 0, 0),
            BlockState::new(BlockId::STONE)
        ));
        assert!(!grid.is_loaded(VoxelPos::new(0, 0, 0), VoxelPos::new(8, 0, 0)));
        assert!(grid.is_loaded(VoxelPos::new(0, 0, 0), VoxelPos::new(7, 7, 7)));
    }

    #[test]
    fn air_writes_clear_the_cell() {
        let mut grid = SparseGrid::new();
        let pos = VoxelPos::new(0, 0, 0);
        place(&mut grid, pos, BlockState::new(BlockId::STONE));
        place(&mut grid, pos, BlockState::AIR);
        assert!(grid.snapshot().is_empty());
    }
}
