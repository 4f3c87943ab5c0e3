use cgmath::{Vector3, Zero};
use std::collections::HashMap;

use crate::constants::collision::CONTACT_EPSILON;
use crate::physics::{sweep_move, Aabb, SweepParams};
use crate::world::{BlockGrid, BlockRegistry};

pub type EntityId = u32;

/// Minimal entity bookkeeping the movement and push cores touch: a bounding
/// box, a velocity, and the collision flags derived from the last sweep.
/// Everything else about an entity lives with the host.
#[derive(Debug, Clone)]
pub struct Body {
    pub aabb: Aabb,
    pub velocity: Vector3<f64>,
    pub step_height: f64,
    pub on_ground: bool,
    pub collided_horizontally: bool,
    pub collided_vertically: bool,
}

impl Body {
    pub fn new(aabb: Aabb) -> Self {
        Self {
            aabb,
            velocity: Vector3::zero(),
            step_height: 0.0,
            on_ground: false,
            collided_horizontally: false,
            collided_vertically: false,
        }
    }

    pub fn with_step_height(mut self, step_height: f64) -> Self {
        self.step_height = step_height;
        self
    }
}

/// Owns the bodies and runs their sweeps. Also the seam the push executor
/// uses to carry riders along with relocated cells.
pub struct PhysicsWorld {
    bodies: HashMap<EntityId, Body>,
    next_entity_id: EntityId,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            next_entity_id: 1,
        }
    }

    pub fn add_body(&mut self, body: Body) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        self.bodies.insert(id, body);
        id
    }

    pub fn remove_body(&mut self, id: EntityId) -> Option<Body> {
        self.bodies.remove(&id)
    }

    pub fn get_body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn get_body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    /// Sweep one body by `wanted`, shift it by the resolved displacement,
    /// and refresh its collision flags. Exact per-axis equality between
    /// wanted and resolved means no contact happened on that axis.
    pub fn move_body(
        &mut self,
        id: EntityId,
        wanted: Vector3<f64>,
        grid: &dyn BlockGrid,
        registry: &BlockRegistry,
    ) -> Vector3<f64> {
        let Some(body) = self.bodies.get_mut(&id) else {
            return Vector3::zero();
        };

        let params = SweepParams {
            step_height: body.step_height,
            on_ground: body.on_ground,
            extra_shapes: Vec::new(),
        };
        let actual = sweep_move(&body.aabb, wanted, grid, registry, &params);

        body.aabb = body.aabb.translated(actual);
        body.collided_horizontally = (wanted.x - actual.x).abs() > CONTACT_EPSILON
            || (wanted.z - actual.z).abs() > CONTACT_EPSILON;
        body.collided_vertically = (wanted.y - actual.y).abs() > CONTACT_EPSILON;
        body.on_ground = body.collided_vertically && wanted.y < 0.0;

        if body.collided_horizontally {
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
        }
        if body.collided_vertically {
            body.velocity.y = 0.0;
        }

        actual
    }

    /// Shift every body whose box overlaps any of `regions` by `offset`,
    /// each body at most once. The push executor passes the destination
    /// cells of a push so riders move with the cells under them.
    pub fn shift_overlapping(&mut self, regions: &[Aabb], offset: Vector3<f64>) {
        for body in self.bodies.values_mut() {
            if regions.iter().any(|r| body.aabb.intersects(r)) {
                body.aabb = body.aabb.translated(offset);
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{place, BlockId, BlockState, SparseGrid, VoxelPos};
    use cgmath::Point3;

    fn standing_box() -> Aabb {
        Aabb::new(Point3::new(0.2, 1.0, 0.2), Point3::new(0.8, 2.8, 0.8))
    }

    #[test]
    fn landing_sets_ground_flag_and_kills_fall_speed() {
        let mut grid = SparseGrid::new();
        place(&mut grid, VoxelPos::new(0, 0, 0), BlockState::new(BlockId::STONE));
        let registry = crate::world::BlockRegistry::with_basic_blocks();

        let mut world = PhysicsWorld::new();
        let mut body = Body::new(standing_box());
        body.velocity = Vector3::new(0.0, -5.0, 0.0);
        let id = world.add_body(body);

        let actual = world.move_body(id, Vector3::new(0.0, -0.5, 0.0), &grid, &registry);
        assert_eq!(actual, Vector3::new(0.0, 0.0, 0.0));

        let body = world.get_body(id).unwrap();
        assert!(body.on_ground);
        assert!(body.collided_vertically);
        assert!(!body.collided_horizontally);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn shift_overlapping_only_moves_riders() {
        let mut world = PhysicsWorld::new();
        let rider = world.add_body(Body::new(standing_box()));
        let bystander = world.add_body(Body::new(Aabb::new(
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(11.0, 2.0, 11.0),
        )));

        world.shift_overlapping(
            &[Aabb::unit_cell(VoxelPos::new(0, 1, 0))],
            Vector3::new(1.0, 0.0, 0.0),
        );

        assert_eq!(world.get_body(rider).unwrap().aabb.min.x, 1.2);
        assert_eq!(world.get_body(bystander).unwrap().aabb.min.x, 10.0);
    }

    #[test]
    fn body_spanning_two_regions_shifts_once() {
        let mut world = PhysicsWorld::new();
        let id = world.add_body(Body::new(Aabb::new(
            Point3::new(0.6, 1.0, 0.2),
            Point3::new(1.4, 2.8, 0.8),
        )));

        world.shift_overlapping(
            &[
                Aabb::unit_cell(VoxelPos::new(0, 1, 0)),
                Aabb::unit_cell(VoxelPos::new(1, 1, 0)),
            ],
            Vector3::new(1.0, 0.0, 0.0),
        );

        assert_eq!(world.get_body(id).unwrap().aabb.min.x, 1.6);
    }
}
