//! Spawn-point coordinates.
//!
//! The framework never does geometry of its own — distance and pathing are
//! host queries — so `Position` is a plain value the framework hands back to
//! the host when summoning auxiliaries at design-time spawn points.

/// A world position plus facing, in host units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x:      f32,
    pub y:      f32,
    pub z:      f32,
    /// Facing angle in radians.
    pub facing: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32, facing: f32) -> Self {
        Self { x, y, z, facing }
    }

    /// Straight-line distance ignoring facing.  Only used by the reference
    /// host; a real host answers distance queries itself.
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
