//! Direction and axis types for face and rotation handling.

use super::Rotation;
use serde::{Deserialize, Serialize};

/// The six cardinal directions / face directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All six directions in canonical order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Face order of the per-element face records in the geometry texture.
    /// The external renderer decodes faces in exactly this order.
    pub const ENCODING_ORDER: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    /// Get the axis this direction is on.
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Down | Direction::Up => Axis::Y,
            Direction::North | Direction::South => Axis::Z,
            Direction::West | Direction::East => Axis::X,
        }
    }

    /// Remap this face through a rotation about the X axis.
    pub fn rotate_x(self, rotation: Rotation) -> Direction {
        use Direction::*;
        match rotation {
            Rotation::Deg0 => self,
            Rotation::Deg90 => match self {
                Down => South,
                Up => North,
                North => Down,
                South => Up,
                West => West,
                East => East,
            },
            Rotation::Deg180 => match self {
                Down => Up,
                Up => Down,
                North => South,
                South => North,
                West => West,
                East => East,
            },
            Rotation::Deg270 => match self {
                Down => North,
                Up => South,
                North => Up,
                South => Down,
                West => West,
                East => East,
            },
        }
    }

    /// Remap this face through a rotation about the Y axis.
    /// Looking from above, positive rotation goes North -> East -> South -> West.
    pub fn rotate_y(self, rotation: Rotation) -> Direction {
        use Direction::*;
        match rotation {
            Rotation::Deg0 => self,
            Rotation::Deg90 => match self {
                North => East,
                East => South,
                South => West,
                West => North,
                Down => Down,
                Up => Up,
            },
            Rotation::Deg180 => match self {
                North => South,
                South => North,
                East => West,
                West => East,
                Down => Down,
                Up => Up,
            },
            Rotation::Deg270 => match self {
                North => West,
                West => South,
                South => East,
                East => North,
                Down => Down,
                Up => Up,
            },
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Down => write!(f, "down"),
            Direction::Up => write!(f, "up"),
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
            Direction::East => write!(f, "east"),
        }
    }
}

/// The three axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Get the unit vector for this axis.
    pub fn unit_vector(&self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }

    /// Remap an element rotation axis through a block rotation about X.
    pub fn rotate_x(self, rotation: Rotation) -> Axis {
        match (rotation, self) {
            (Rotation::Deg90 | Rotation::Deg270, Axis::Y) => Axis::Z,
            (Rotation::Deg90 | Rotation::Deg270, Axis::Z) => Axis::Y,
            _ => self,
        }
    }

    /// Remap an element rotation axis through a block rotation about Y.
    pub fn rotate_y(self, rotation: Rotation) -> Axis {
        match (rotation, self) {
            (Rotation::Deg90 | Rotation::Deg270, Axis::X) => Axis::Z,
            (Rotation::Deg90 | Rotation::Deg270, Axis::Z) => Axis::X,
            _ => self,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}
