use cgmath::Vector3;
use serde::{Deserialize, Serialize};

/// Position of a voxel in the world (world coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Create a new position offset by the given amounts
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The neighboring position one cell along `dir`
    pub fn relative(&self, dir: Direction) -> Self {
        self.relative_n(dir, 1)
    }

    /// The position `n` cells along `dir`
    pub fn relative_n(&self, dir: Direction, n: i32) -> Self {
        let d = dir.offset();
        Self::new(self.x + d.x * n, self.y + d.y * n, self.z + d.z * n)
    }

    /// Create VoxelPos from a continuous world position
    pub fn from_world_pos(pos: glam::DVec3) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
            z: pos.z.floor() as i32,
        }
    }

    /// Minimum corner of this voxel as a continuous world position
    pub fn min_corner(&self) -> Vector3<f64> {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

/// The three world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Extract this axis' component from a vector
    pub fn of(&self, v: Vector3<f64>) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Replace this axis' component in a vector
    pub fn with(&self, v: Vector3<f64>, value: f64) -> Vector3<f64> {
        let mut out = v;
        match self {
            Axis::X => out.x = value,
            Axis::Y => out.y = value,
            Axis::Z => out.z = value,
        }
        out
    }
}

/// One of the six axis-aligned directions a face can point or a push can travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit offset in voxel coordinates
    pub fn offset(&self) -> VoxelPos {
        match self {
            Direction::Down => VoxelPos::new(0, -1, 0),
            Direction::Up => VoxelPos::new(0, 1, 0),
            Direction::North => VoxelPos::new(0, 0, -1),
            Direction::South => VoxelPos::new(0, 0, 1),
            Direction::West => VoxelPos::new(-1, 0, 0),
            Direction::East => VoxelPos::new(1, 0, 0),
        }
    }

    /// Unit offset as a continuous displacement
    pub fn to_vec(&self) -> Vector3<f64> {
        let o = self.offset();
        Vector3::new(o.x as f64, o.y as f64, o.z as f64)
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Down | Direction::Up => Axis::Y,
            Direction::North | Direction::South => Axis::Z,
            Direction::West | Direction::East => Axis::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_follows_offsets() {
        let p = VoxelPos::new(1, 2, 3);
        assert_eq!(p.relative(Direction::Up), VoxelPos::new(1, 3, 3));
        assert_eq!(p.relative_n(Direction::West, 2), VoxelPos::new(-1, 2, 3));
    }

    #[test]
    fn opposites_cancel() {
        for dir in Direction::ALL {
            let p = VoxelPos::new(0, 0, 0);
            assert_eq!(p.relative(dir).relative(dir.opposite()), p);
        }
    }

    #[test]
    fn from_world_pos_floors() {
        let p = VoxelPos::from_world_pos(glam::DVec3::new(-0.5, 1.9, 0.0));
        assert_eq!(p, VoxelPos::new(-1, 1, 0));
    }
}
