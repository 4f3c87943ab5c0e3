use cgmath::{Point3, Vector3};

use crate::constants::collision::CONTACT_EPSILON;
use crate::physics::Aabb;
use crate::world::Axis;

/// Collidable volume as a union of axis-aligned boxes. Block shapes live in
/// cell-local `[0,1]^3` space; `offset` turns them into world-space shapes
/// the sweep can query directly.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelShape {
    boxes: Vec<Aabb>,
}

impl VoxelShape {
    pub fn empty() -> Self {
        Self { boxes: Vec::new() }
    }

    /// The whole unit cell
    pub fn full_cube() -> Self {
        Self::from_boxes(vec![Aabb::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        )])
    }

    /// Lower half of the unit cell
    pub fn bottom_slab() -> Self {
        Self::from_boxes(vec![Aabb::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.5, 1.0),
        )])
    }

    /// Build a cell-local shape. Boxes must stay inside the unit cell.
    pub fn from_boxes(boxes: Vec<Aabb>) -> Self {
        debug_assert!(boxes.iter().all(|b| {
            b.min.x >= 0.0
                && b.min.y >= 0.0
                && b.min.z >= 0.0
                && b.max.x <= 1.0
                && b.max.y <= 1.0
                && b.max.z <= 1.0
        }));
        Self { boxes }
    }

    /// Build a world-space shape from already-placed boxes (broad-phase
    /// output, world border planes). No unit-cell bound applies.
    pub fn from_world_boxes(boxes: Vec<Aabb>) -> Self {
        Self { boxes }
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    /// Structural union. Duplicate boxes collapse, so the operation is
    /// idempotent as well as commutative and associative up to box order.
    pub fn union(&self, other: &VoxelShape) -> VoxelShape {
        let mut boxes = self.boxes.clone();
        for b in &other.boxes {
            if !boxes.contains(b) {
                boxes.push(*b);
            }
        }
        VoxelShape { boxes }
    }

    /// Shape translated into world space at the given origin
    pub fn offset(&self, origin: Vector3<f64>) -> VoxelShape {
        VoxelShape {
            boxes: self.boxes.iter().map(|b| b.translated(origin)).collect(),
        }
    }

    /// True iff the two shapes share positive volume
    pub fn intersects(&self, other: &VoxelShape) -> bool {
        self.boxes
            .iter()
            .any(|a| other.boxes.iter().any(|b| a.intersects(b)))
    }

    /// Largest offset with the sign of `wanted` by which `moving` can
    /// translate along `axis` before first contact with this shape.
    /// Returns `wanted` untouched when nothing is in the way; on contact
    /// the returned value leaves the box flush against the obstruction.
    /// Gaps smaller than the contact epsilon count as already touching.
    pub fn max_offset(&self, axis: Axis, moving: &Aabb, wanted: f64) -> f64 {
        let mut allowed = wanted;
        if allowed == 0.0 {
            return 0.0;
        }
        let mut limited = false;
        for b in &self.boxes {
            if !overlaps_off_axis(axis, moving, b) {
                continue;
            }
            if allowed > 0.0 {
                let gap = b.min_on(axis) - moving.max_on(axis);
                if gap >= -CONTACT_EPSILON && gap < allowed {
                    allowed = gap.max(0.0);
                    limited = true;
                }
            } else {
                let gap = b.max_on(axis) - moving.min_on(axis);
                if gap <= CONTACT_EPSILON && gap > allowed {
                    allowed = gap.min(0.0);
                    limited = true;
                }
            }
            if allowed == 0.0 {
                break;
            }
        }
        // Snap sub-epsilon leftovers to zero, but only when contact cut the
        // motion; an unobstructed request passes through exactly.
        if limited && allowed.abs() < CONTACT_EPSILON {
            0.0
        } else {
            allowed
        }
    }
}

/// Positive-volume overlap on the two axes other than `axis`
fn overlaps_off_axis(axis: Axis, a: &Aabb, b: &Aabb) -> bool {
    for other in [Axis::X, Axis::Y, Axis::Z] {
        if other == axis {
            continue;
        }
        if a.min_on(other) >= b.max_on(other) - CONTACT_EPSILON
            || a.max_on(other) <= b.min_on(other) + CONTACT_EPSILON
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: f64, y: f64, z: f64) -> Aabb {
        Aabb::new(
            Point3::new(x, y, z),
            Point3::new(x + 1.0, y + 1.0, z + 1.0),
        )
    }

    #[test]
    fn union_is_idempotent() {
        let cube = VoxelShape::full_cube();
        assert_eq!(cube.union(&cube), cube);
        assert_eq!(cube.union(&VoxelShape::empty()), cube);
    }

    #[test]
    fn max_offset_returns_wanted_when_clear() {
        let shape = VoxelShape::full_cube().offset(Vector3::new(10.0, 0.0, 0.0));
        let moving = unit_box_at(0.0, 0.0, 0.0);
        assert_eq!(shape.max_offset(Axis::X, &moving, 3.0), 3.0);
        assert_eq!(shape.max_offset(Axis::X, &moving, -3.0), -3.0);
    }

    #[test]
    fn max_offset_leaves_box_flush() {
        let shape = VoxelShape::full_cube().offset(Vector3::new(2.5, 0.0, 0.0));
        let moving = unit_box_at(0.0, 0.0, 0.0);
        // 1.5 units of clearance ahead of the moving box
        assert!((shape.max_offset(Axis::X, &moving, 4.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn max_offset_descending_onto_surface() {
        let shape = VoxelShape::full_cube().offset(Vector3::new(0.0, -1.5, 0.0));
        let moving = unit_box_at(0.0, 0.0, 0.0);
        assert!((shape.max_offset(Axis::Y, &moving, -1.0) - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn offset_cells_out_of_line_are_ignored() {
        // Shape fully beside the motion corridor
        let shape = VoxelShape::full_cube().offset(Vector3::new(2.0, 1.0, 0.0));
        let moving = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(shape.max_offset(Axis::X, &moving, 5.0), 5.0);
    }

    #[test]
    fn sub_epsilon_request_with_nothing_in_the_way_passes_through() {
        let shape = VoxelShape::full_cube().offset(Vector3::new(10.0, 0.0, 0.0));
        let moving = unit_box_at(0.0, 0.0, 0.0);
        assert_eq!(shape.max_offset(Axis::X, &moving, 5.0e-8), 5.0e-8);
        assert_eq!(shape.max_offset(Axis::X, &moving, -5.0e-8), -5.0e-8);
    }

    #[test]
    fn near_zero_gap_counts_as_contact() {
        let shape = VoxelShape::full_cube().offset(Vector3::new(1.0 + 5e-8, 0.0, 0.0));
        let moving = unit_box_at(0.0, 0.0, 0.0);
        assert_eq!(shape.max_offset(Axis::X, &moving, 2.0), 0.0);
    }

    #[test]
    fn intersects_requires_positive_volume() {
        let a = VoxelShape::full_cube();
        let flush = VoxelShape::full_cube().offset(Vector3::new(1.0, 0.0, 0.0));
        let overlapping = VoxelShape::full_cube().offset(Vector3::new(0.5, 0.0, 0.0));
        assert!(!a.intersects(&flush));
        assert!(a.intersects(&overlapping));
    }
}
