use cgmath::{Point3, Vector3};

use crate::world::{Axis, VoxelPos};

/// Axis-aligned bounding box in world space, double precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "malformed box: min must not exceed max"
        );
        Self { min, max }
    }

    /// The full collision box of one voxel cell
    pub fn unit_cell(pos: VoxelPos) -> Self {
        let min = Point3::new(pos.x as f64, pos.y as f64, pos.z as f64);
        Self {
            min,
            max: Point3::new(min.x + 1.0, min.y + 1.0, min.z + 1.0),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Positive-volume overlap test. Boxes that merely touch do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn translated(&self, offset: Vector3<f64>) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Grow the box to cover everywhere it would sweep through when
    /// displaced by `d`: min gains the negative components, max the positive.
    pub fn expand_towards(&self, d: Vector3<f64>) -> Aabb {
        Aabb {
            min: Point3::new(
                self.min.x + d.x.min(0.0),
                self.min.y + d.y.min(0.0),
                self.min.z + d.z.min(0.0),
            ),
            max: Point3::new(
                self.max.x + d.x.max(0.0),
                self.max.y + d.y.max(0.0),
                self.max.z + d.z.max(0.0),
            ),
        }
    }

    /// Inclusive voxel range covering this box, for broad-phase gathering
    pub fn voxel_range(&self) -> (VoxelPos, VoxelPos) {
        (
            VoxelPos::new(
                self.min.x.floor() as i32,
                self.min.y.floor() as i32,
                self.min.z.floor() as i32,
            ),
            VoxelPos::new(
                self.max.x.floor() as i32,
                self.max.y.floor() as i32,
                self.max.z.floor() as i32,
            ),
        )
    }

    pub fn min_on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.min.x,
            Axis::Y => self.min.y,
            Axis::Z => self.min.z,
        }
    }

    pub fn max_on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.max.x,
            Axis::Y => self.max.y,
            Axis::Z => self.max.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = a.translated(Vector3::new(1.0, 0.0, 0.0));
        assert!(!a.intersects(&b));
        let c = a.translated(Vector3::new(0.5, 0.0, 0.0));
        assert!(a.intersects(&c));
    }

    #[test]
    fn expand_towards_covers_the_swept_volume() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let swept = a.expand_towards(Vector3::new(2.0, -1.0, 0.0));
        assert_eq!(swept.min, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(swept.max, Point3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn voxel_range_is_inclusive_of_flush_cells() {
        let a = Aabb::new(Point3::new(0.25, 0.0, 0.25), Point3::new(0.75, 2.0, 0.75));
        let (min, max) = a.voxel_range();
        assert_eq!(min, VoxelPos::new(0, 0, 0));
        assert_eq!(max, VoxelPos::new(0, 2, 0));
    }
}
