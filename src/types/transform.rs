//! Transform types for block and element rotations.

use super::{Axis, Direction};
use serde::{Deserialize, Serialize};

/// A quarter-turn block rotation from a blockstate variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation in degrees.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn is_identity(self) -> bool {
        self == Rotation::Deg0
    }

    /// Rotate a point of the 0-16 block cube about the X axis.
    pub fn rotate_point_x(self, [x, y, z]: [f32; 3]) -> [f32; 3] {
        match self {
            Rotation::Deg0 => [x, y, z],
            Rotation::Deg90 => [x, z, 16.0 - y],
            Rotation::Deg180 => [x, 16.0 - y, 16.0 - z],
            Rotation::Deg270 => [x, 16.0 - z, y],
        }
    }

    /// Rotate a point of the 0-16 block cube about the Y axis.
    pub fn rotate_point_y(self, [x, y, z]: [f32; 3]) -> [f32; 3] {
        match self {
            Rotation::Deg0 => [x, y, z],
            Rotation::Deg90 => [16.0 - z, y, x],
            Rotation::Deg180 => [16.0 - x, y, 16.0 - z],
            Rotation::Deg270 => [z, y, 16.0 - x],
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = String;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(format!("unsupported rotation {other}, expected 0, 90, 180 or 270")),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Block-level transform from a blockstate variant: X rotation, then Y rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockTransform {
    pub x: Rotation,
    pub y: Rotation,
}

impl BlockTransform {
    pub fn new(x: Rotation, y: Rotation) -> Self {
        Self { x, y }
    }

    /// Check if this is an identity transform (no rotation).
    pub fn is_identity(&self) -> bool {
        self.x.is_identity() && self.y.is_identity()
    }

    /// Rotate a point (X first, then Y).
    pub fn rotate_point(&self, point: [f32; 3]) -> [f32; 3] {
        self.y.rotate_point_y(self.x.rotate_point_x(point))
    }

    /// Rotate an axis-aligned box, keeping `from` as the minimum corner.
    pub fn rotate_box(&self, from: [f32; 3], to: [f32; 3]) -> ([f32; 3], [f32; 3]) {
        let a = self.rotate_point(from);
        let b = self.rotate_point(to);
        (
            [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])],
            [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])],
        )
    }

    /// Remap a face direction (X first, then Y).
    pub fn rotate_direction(&self, direction: Direction) -> Direction {
        direction.rotate_x(self.x).rotate_y(self.y)
    }

    /// Remap an element rotation axis (X first, then Y).
    pub fn rotate_axis(&self, axis: Axis) -> Axis {
        axis.rotate_x(self.x).rotate_y(self.y)
    }
}

/// Element-level rotation from model element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 Minecraft coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Axis to rotate around.
    pub axis: Axis,
    /// Rotation angle in degrees (-45 to 45, in 22.5 increments).
    pub angle: f32,
    /// Whether the element is stretched back to its footprint after rotation.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rescale: bool,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

impl ElementRotation {
    /// Get the angle in radians.
    pub fn angle_radians(&self) -> f32 {
        self.angle.to_radians()
    }

    /// Get the rescale factor for this rotation.
    /// When rescale is true, the element is scaled to maintain its original size.
    pub fn rescale_factor(&self) -> f32 {
        if self.rescale {
            1.0 / self.angle_radians().cos()
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_parse() {
        let rotation: Rotation = serde_json::from_str("270").unwrap();
        assert_eq!(rotation, Rotation::Deg270);
        assert!(serde_json::from_str::<Rotation>("45").is_err());
        assert_eq!(serde_json::to_string(&Rotation::Deg90).unwrap(), "90");
    }

    #[test]
    fn test_rotate_box_x90() {
        let transform = BlockTransform::new(Rotation::Deg90, Rotation::Deg0);
        let (from, to) = transform.rotate_box([0.0, 0.0, 0.0], [16.0, 8.0, 16.0]);
        // (x, y, z) -> (x, z, 16 - y)
        assert_eq!(from, [0.0, 0.0, 8.0]);
        assert_eq!(to, [16.0, 16.0, 16.0]);
    }

    #[test]
    fn test_rotate_box_y90() {
        let transform = BlockTransform::new(Rotation::Deg0, Rotation::Deg90);
        let (from, to) = transform.rotate_box([0.0, 0.0, 0.0], [4.0, 16.0, 2.0]);
        // (x, y, z) -> (16 - z, y, x)
        assert_eq!(from, [14.0, 0.0, 0.0]);
        assert_eq!(to, [16.0, 16.0, 4.0]);
    }

    #[test]
    fn test_identity_transform() {
        let transform = BlockTransform::default();
        assert!(transform.is_identity());
        assert_eq!(transform.rotate_point([1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
        assert_eq!(transform.rotate_direction(Direction::North), Direction::North);
        assert_eq!(transform.rotate_axis(Axis::Z), Axis::Z);
    }

    #[test]
    fn test_rescale_factor() {
        let rotation = ElementRotation {
            origin: [8.0, 8.0, 8.0],
            axis: Axis::Y,
            angle: 45.0,
            rescale: true,
        };
        assert!((rotation.rescale_factor() - std::f32::consts::SQRT_2).abs() < 1e-5);
    }
}
