/*!
Value types exchanged between the detector and its callers.

This module intentionally contains no algorithms.
*/

use nalgebra as na;

use crate::bitmask_flags::BitmaskFlags;

/// Common math alias for clarity and consistency.
pub type Vec3 = na::Vector3<f64>;

crate::define_bitmask_flags!(CollisionAxis, u8, { X, Y, Z });

/// Outcome of one sweep test.
///
/// `motion` is the displacement the actor may actually apply this tick. Each axis flag
/// is set when that axis was clipped by an obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResult {
    pub motion: Vec3,
    pub collided: BitmaskFlags<u8>,
    on_ground: bool,
}

impl CollisionResult {
    /// `on_ground` is derived: only a blocked downward request counts. Bumping a
    /// ceiling sets `collided_y` but never grounds the actor.
    pub fn new(
        motion: Vec3,
        collided_x: bool,
        collided_y: bool,
        collided_z: bool,
        requested_dy: f64,
    ) -> Self {
        let mut collided = BitmaskFlags::default();
        collided.set(CollisionAxis::X, collided_x);
        collided.set(CollisionAxis::Y, collided_y);
        collided.set(CollisionAxis::Z, collided_z);
        Self {
            motion,
            collided,
            on_ground: collided_y && requested_dy < 0.0,
        }
    }

    /// Unobstructed result: the requested motion passes through unchanged.
    #[inline]
    pub fn free(motion: Vec3) -> Self {
        Self::new(motion, false, false, false, motion.y)
    }

    #[inline]
    pub fn collided_x(&self) -> bool {
        self.collided.has(CollisionAxis::X)
    }

    #[inline]
    pub fn collided_y(&self) -> bool {
        self.collided.has(CollisionAxis::Y)
    }

    #[inline]
    pub fn collided_z(&self) -> bool {
        self.collided.has(CollisionAxis::Z)
    }

    /// X or Z was clipped.
    #[inline]
    pub fn collided_horizontally(&self) -> bool {
        self.collided.has_any(&[CollisionAxis::X, CollisionAxis::Z])
    }

    #[inline]
    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }
}
