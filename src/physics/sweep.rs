use cgmath::{InnerSpace, Vector3, Zero};
use log::trace;

use crate::constants::collision::CONTACT_EPSILON;
use crate::physics::{Aabb, VoxelShape};
use crate::world::{Axis, BlockGrid, BlockRegistry, VoxelPos};

/// Per-call sweep inputs beyond the box and the wanted displacement
#[derive(Debug, Clone, Default)]
pub struct SweepParams {
    /// Maximum ledge height the mover may climb in one motion. Zero
    /// disables step assist entirely.
    pub step_height: f64,
    /// Whether the mover currently rests on a surface. Step assist only
    /// engages for grounded or descending movers.
    pub on_ground: bool,
    /// Extra world-space obstructions outside the grid, e.g. the world
    /// border plane near the edge.
    pub extra_shapes: Vec<Aabb>,
}

/// Resolve the displacement a box may actually travel.
///
/// Axes resolve in a fixed order: Y first, then whichever horizontal axis
/// wants the larger magnitude, then the last. Each later axis collides
/// against the box already shifted by the earlier results. The returned
/// displacement never exceeds the request on any axis, and the shifted box
/// never penetrates an occupied shape beyond the contact epsilon.
///
/// A malformed box (min above max) is a contract violation: it trips a
/// debug assertion and resolves to zero movement in release builds.
pub fn sweep_move(
    bbox: &Aabb,
    wanted: Vector3<f64>,
    grid: &dyn BlockGrid,
    registry: &BlockRegistry,
    params: &SweepParams,
) -> Vector3<f64> {
    debug_assert!(bbox.is_well_formed(), "sweep_move: malformed box");
    if !bbox.is_well_formed() || wanted.is_zero() {
        return Vector3::zero();
    }

    let flat = sweep_once(bbox, wanted, grid, registry, params);

    if params.step_height > 0.0
        && (params.on_ground || wanted.y < 0.0)
        && horizontal_reduced(wanted, flat)
    {
        // Raise, retry the horizontal motion at the higher elevation, then
        // settle back down onto the first surface below.
        let up = sweep_once(
            bbox,
            Vector3::new(0.0, params.step_height, 0.0),
            grid,
            registry,
            params,
        );
        let raised = bbox.translated(up);
        let across = sweep_once(
            &raised,
            Vector3::new(wanted.x, 0.0, wanted.z),
            grid,
            registry,
            params,
        );
        let landed = raised.translated(across);
        let down = sweep_once(
            &landed,
            Vector3::new(0.0, -up.y, 0.0),
            grid,
            registry,
            params,
        );
        let stepped = up + across + down;

        if horizontal_len2(stepped) > horizontal_len2(flat) {
            trace!(
                "step assist engaged: flat {:?} -> stepped {:?}",
                flat,
                stepped
            );
            return stepped;
        }
    }

    flat
}

/// One plain per-axis resolution pass, no step assist
fn sweep_once(
    bbox: &Aabb,
    wanted: Vector3<f64>,
    grid: &dyn BlockGrid,
    registry: &BlockRegistry,
    params: &SweepParams,
) -> Vector3<f64> {
    if wanted.is_zero() {
        return Vector3::zero();
    }

    let shapes = match collect_shapes(&bbox.expand_towards(wanted), grid, registry) {
        Some(shapes) => shapes,
        // Unloaded terrain is treated as fully solid: no movement at all
        None => {
            trace!("sweep into unloaded region resolved to zero");
            return Vector3::zero();
        }
    };
    let mut boxes = shapes;
    boxes.extend(params.extra_shapes.iter().cloned());
    let combined = VoxelShape::from_world_boxes(boxes);

    let mut result = Vector3::zero();
    let mut shifted = *bbox;
    for axis in axis_order(wanted) {
        let want = axis.of(wanted);
        if want == 0.0 {
            continue;
        }
        let allowed = combined.max_offset(axis, &shifted, want);
        result = axis.with(result, allowed);
        shifted = shifted.translated(axis.with(Vector3::zero(), allowed));
    }
    result
}

/// Y first, then the horizontal axis with the larger request, then the last
fn axis_order(wanted: Vector3<f64>) -> [Axis; 3] {
    if wanted.x.abs() >= wanted.z.abs() {
        [Axis::Y, Axis::X, Axis::Z]
    } else {
        [Axis::Y, Axis::Z, Axis::X]
    }
}

/// World-space collision boxes of every occupied cell the query box covers.
/// None when part of the queried region is not resident.
fn collect_shapes(
    query: &Aabb,
    grid: &dyn BlockGrid,
    registry: &BlockRegistry,
) -> Option<Vec<Aabb>> {
    let (min, max) = query.voxel_range();
    if !grid.is_loaded(min, max) {
        return None;
    }

    let mut out = Vec::new();
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                let pos = VoxelPos::new(x, y, z);
                let state = grid.get(pos);
                if state.is_air() {
                    continue;
                }
                // Unknown ids collide as full cubes: fail safe, not through
                let shape = match registry.get_block(state.id) {
                    Some(block) => block.collision_shape(&state),
                    None => VoxelShape::full_cube(),
                };
                if shape.is_empty() {
                    continue;
                }
                let world = shape.offset(pos.min_corner());
                out.extend_from_slice(world.boxes());
            }
        }
    }
    Some(out)
}

fn horizontal_reduced(wanted: Vector3<f64>, got: Vector3<f64>) -> bool {
    (wanted.x - got.x).abs() > CONTACT_EPSILON || (wanted.z - got.z).abs() > CONTACT_EPSILON
}

fn horizontal_len2(v: Vector3<f64>) -> f64 {
    Vector3::new(v.x, 0.0, v.z).magnitude2()
}
