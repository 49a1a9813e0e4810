use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Per-physics-tick collision probe results, produced by the host's shape
/// casts against the ground/wall surface classification.
///
/// The core only consumes these booleans and points; it never casts. The
/// probe geometry itself is tuned through the detection fields on
/// [`MotionParameters`](crate::params::MotionParameters).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactProbes {
    pub grounded: bool,
    pub head_bumped: bool,
    pub touching_wall: bool,
    /// Closest point on the touched wall, world space. May be absent even
    /// when `touching_wall` is set; the core then keeps its last record.
    pub wall_contact: Option<Vec2>,
    /// Body capsule center at probe time, world space. Compared against the
    /// wall contact to pick the wall-jump launch direction.
    pub body_center: Vec2,
}

impl ContactProbes {
    /// Probe result for a body standing on the ground, clear of walls.
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..Default::default()
        }
    }

    /// Probe result for a body in open air.
    pub fn airborne() -> Self {
        Self::default()
    }
}
