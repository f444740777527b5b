use super::types::Vec3;

/// Axis-aligned bounding box with `f64` bounds.
///
/// The type is a plain value: every transform returns a new box. Callers must keep
/// `min <= max` on each axis; this is not checked, and a degenerate box produces
/// unspecified (but non-panicking) results.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Aabb {
    #[inline]
    pub const fn new(
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// Actor box standing on `anchor` (bottom-center), `width` wide on X and Z.
    #[inline]
    pub fn from_bottom_center(anchor: Vec3, width: f64, height: f64) -> Self {
        let half = width * 0.5;
        Self::new(
            anchor.x - half,
            anchor.y,
            anchor.z - half,
            anchor.x + half,
            anchor.y + height,
            anchor.z + half,
        )
    }

    /// Unit cube occupying the voxel cell at integer coordinates.
    #[inline]
    pub fn from_block(x: i32, y: i32, z: i32) -> Self {
        let (x, y, z) = (f64::from(x), f64::from(y), f64::from(z));
        Self::new(x, y, z, x + 1.0, y + 1.0, z + 1.0)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// The eight corners, min corner first.
    pub fn corners(&self) -> [Vec3; 8] {
        let (x0, y0, z0) = (self.min_x, self.min_y, self.min_z);
        let (x1, y1, z1) = (self.max_x, self.max_y, self.max_z);
        [
            Vec3::new(x0, y0, z0),
            Vec3::new(x1, y0, z0),
            Vec3::new(x0, y1, z0),
            Vec3::new(x1, y1, z0),
            Vec3::new(x0, y0, z1),
            Vec3::new(x1, y0, z1),
            Vec3::new(x0, y1, z1),
            Vec3::new(x1, y1, z1),
        ]
    }

    /// Open-interval overlap on all three axes. Boxes that only share a face do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
            && self.min_z < other.max_z
            && self.max_z > other.min_z
    }

    /// Inclusive point test.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
            && point.z >= self.min_z
            && point.z <= self.max_z
    }

    /// Grow the box toward the sign of each delta; the opposite face stays put.
    ///
    /// `actor.expand(motion)` is the volume swept by `actor` over `motion`.
    pub fn expand(&self, dx: f64, dy: f64, dz: f64) -> Self {
        let mut out = *self;
        if dx < 0.0 {
            out.min_x += dx;
        } else {
            out.max_x += dx;
        }
        if dy < 0.0 {
            out.min_y += dy;
        } else {
            out.max_y += dy;
        }
        if dz < 0.0 {
            out.min_z += dz;
        } else {
            out.max_z += dz;
        }
        out
    }

    /// Move every face inward by `amount`. A negative amount grows the box.
    #[inline]
    pub fn shrink(&self, amount: f64) -> Self {
        Self::new(
            self.min_x + amount,
            self.min_y + amount,
            self.min_z + amount,
            self.max_x - amount,
            self.max_y - amount,
            self.max_z - amount,
        )
    }

    #[inline]
    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(
            self.min_x + dx,
            self.min_y + dy,
            self.min_z + dz,
            self.max_x + dx,
            self.max_y + dy,
            self.max_z + dz,
        )
    }

    #[inline]
    pub fn offset_by(&self, delta: Vec3) -> Self {
        self.offset(delta.x, delta.y, delta.z)
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.min_z.min(other.min_z),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
            self.max_z.max(other.max_z),
        )
    }

    /// Euclidean distance between the nearest faces. Zero when the boxes overlap or touch.
    pub fn distance_to(&self, other: &Aabb) -> f64 {
        let gap = |a_min: f64, a_max: f64, b_min: f64, b_max: f64| {
            (b_min - a_max).max(a_min - b_max).max(0.0)
        };
        let dx = gap(self.min_x, self.max_x, other.min_x, other.max_x);
        let dy = gap(self.min_y, self.max_y, other.min_y, other.max_y);
        let dz = gap(self.min_z, self.max_z, other.min_z, other.max_z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    // Per-axis sweep clamps.
    //
    // `self` is the static obstacle and `other` the moving box. When the two overlap on
    // the other two axes, `delta` is tightened so `other` stops flush against `self`;
    // otherwise it passes through. A clamp only ever shrinks |delta|.

    pub fn calculate_x_offset(&self, other: &Aabb, mut delta: f64) -> f64 {
        if other.max_y <= self.min_y || other.min_y >= self.max_y {
            return delta;
        }
        if other.max_z <= self.min_z || other.min_z >= self.max_z {
            return delta;
        }
        if delta > 0.0 && other.max_x <= self.min_x {
            let gap = self.min_x - other.max_x;
            if gap < delta {
                delta = gap;
            }
        } else if delta < 0.0 && other.min_x >= self.max_x {
            let gap = self.max_x - other.min_x;
            if gap > delta {
                delta = gap;
            }
        }
        delta
    }

    pub fn calculate_y_offset(&self, other: &Aabb, mut delta: f64) -> f64 {
        if other.max_x <= self.min_x || other.min_x >= self.max_x {
            return delta;
        }
        if other.max_z <= self.min_z || other.min_z >= self.max_z {
            return delta;
        }
        if delta > 0.0 && other.max_y <= self.min_y {
            let gap = self.min_y - other.max_y;
            if gap < delta {
                delta = gap;
            }
        } else if delta < 0.0 && other.min_y >= self.max_y {
            let gap = self.max_y - other.min_y;
            if gap > delta {
                delta = gap;
            }
        }
        delta
    }

    pub fn calculate_z_offset(&self, other: &Aabb, mut delta: f64) -> f64 {
        if other.max_x <= self.min_x || other.min_x >= self.max_x {
            return delta;
        }
        if other.max_y <= self.min_y || other.min_y >= self.max_y {
            return delta;
        }
        if delta > 0.0 && other.max_z <= self.min_z {
            let gap = self.min_z - other.max_z;
            if gap < delta {
                delta = gap;
            }
        } else if delta < 0.0 && other.min_z >= self.max_z {
            let gap = self.max_z - other.min_z;
            if gap > delta {
                delta = gap;
            }
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1.0e-12;

    fn unit_at(x: f64, y: f64, z: f64) -> Aabb {
        Aabb::new(x, y, z, x + 1.0, y + 1.0, z + 1.0)
    }

    #[test]
    fn touching_faces_do_not_intersect() {
        let a = unit_at(0.0, 0.0, 0.0);
        assert!(!a.intersects(&unit_at(1.0, 0.0, 0.0)));
        assert!(!a.intersects(&unit_at(0.0, -1.0, 0.0)));
        assert!(a.intersects(&unit_at(0.999, 0.0, 0.0)));
        // Edge contact only.
        assert!(!a.intersects(&unit_at(1.0, 1.0, 0.0)));
    }

    #[test]
    fn contains_is_inclusive() {
        let a = unit_at(0.0, 0.0, 0.0);
        assert!(a.contains(Vec3::new(0.0, 0.0, 0.0)));
        assert!(a.contains(Vec3::new(1.0, 1.0, 1.0)));
        assert!(a.contains(Vec3::new(0.5, 0.25, 1.0)));
        assert!(!a.contains(Vec3::new(1.0 + 1.0e-9, 0.5, 0.5)));
    }

    #[test]
    fn expand_grows_toward_motion_only() {
        let a = unit_at(0.0, 0.0, 0.0).expand(2.0, -3.0, 0.0);
        assert_eq!(a, Aabb::new(0.0, -3.0, 0.0, 3.0, 1.0, 1.0));
    }

    #[test]
    fn shrink_is_symmetric_and_negative_grows() {
        let a = Aabb::new(0.0, 0.0, 0.0, 2.0, 4.0, 2.0);
        assert_eq!(a.shrink(0.5), Aabb::new(0.5, 0.5, 0.5, 1.5, 3.5, 1.5));
        assert_eq!(a.shrink(-1.0), Aabb::new(-1.0, -1.0, -1.0, 3.0, 5.0, 3.0));
    }

    #[test]
    fn bottom_center_anchor_builds_actor_box() {
        let a = Aabb::from_bottom_center(Vec3::new(10.0, 64.0, -3.0), 0.6, 1.8);
        assert!((a.width() - 0.6).abs() < EPS);
        assert!((a.depth() - 0.6).abs() < EPS);
        assert!((a.height() - 1.8).abs() < EPS);
        assert_eq!(a.min_y, 64.0);
        assert!((a.center().x - 10.0).abs() < EPS);
        assert!((a.center().z + 3.0).abs() < EPS);
    }

    #[test]
    fn from_block_handles_negative_coordinates() {
        assert_eq!(
            Aabb::from_block(-1, -64, 7),
            Aabb::new(-1.0, -64.0, 7.0, 0.0, -63.0, 8.0)
        );
    }

    #[test]
    fn union_is_smallest_enclosing_box() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(3.0, -2.0, 1.0);
        assert_eq!(a.union(&b), Aabb::new(0.0, -2.0, 0.0, 4.0, 1.0, 2.0));
    }

    #[test]
    fn distance_between_faces() {
        let a = unit_at(0.0, 0.0, 0.0);
        assert_eq!(a.distance_to(&unit_at(3.0, 0.0, 0.0)), 2.0);
        assert_eq!(a.distance_to(&unit_at(0.5, 0.5, 0.0)), 0.0);
        assert_eq!(a.distance_to(&unit_at(1.0, 0.0, 0.0)), 0.0);
        // Diagonal gap of 3 on X and 4 on Z.
        assert!((a.distance_to(&unit_at(4.0, 0.0, 5.0)) - 5.0).abs() < EPS);
    }

    #[test]
    fn y_offset_lands_on_top_face() {
        let block = unit_at(0.0, 0.0, 0.0);
        let actor = unit_at(0.0, 2.0, 0.0);
        assert_eq!(block.calculate_y_offset(&actor, -5.0), -1.0);
        // Already shorter than the gap: untouched.
        assert_eq!(block.calculate_y_offset(&actor, -0.5), -0.5);
        // Moving away is never constrained.
        assert_eq!(block.calculate_y_offset(&actor, 3.0), 3.0);
    }

    #[test]
    fn offsets_ignore_obstacles_outside_the_cross_section() {
        let block = unit_at(0.0, 0.0, 0.0);
        // Beside the block on X, falling: no overlap on X.
        let actor = unit_at(1.0, 2.0, 0.0);
        assert_eq!(block.calculate_y_offset(&actor, -5.0), -5.0);
        // Level with the block but offset on Z: no overlap on Z for an X move.
        let actor = unit_at(-3.0, 0.0, 1.0);
        assert_eq!(block.calculate_x_offset(&actor, 5.0), 5.0);
    }

    #[test]
    fn x_and_z_offsets_clamp_both_directions() {
        let block = unit_at(0.0, 0.0, 0.0);

        let west = unit_at(-3.0, 0.0, 0.0);
        assert_eq!(block.calculate_x_offset(&west, 5.0), 2.0);
        let east = unit_at(2.5, 0.0, 0.0);
        assert_eq!(block.calculate_x_offset(&east, -5.0), -1.5);

        let north = unit_at(0.0, 0.0, -2.0);
        assert_eq!(block.calculate_z_offset(&north, 1.5), 1.0);
        let south = unit_at(0.0, 0.0, 4.0);
        assert_eq!(block.calculate_z_offset(&south, -4.0), -3.0);
    }

    #[test]
    fn offsets_never_loosen_an_existing_clamp() {
        let far = unit_at(5.0, 0.0, 0.0);
        let actor = unit_at(0.0, 0.0, 0.0);
        // The current delta (1.0) is already tighter than the 4.0 gap.
        assert_eq!(far.calculate_x_offset(&actor, 1.0), 1.0);
    }

    #[test]
    fn overlapping_boxes_do_not_clamp() {
        // Embedded: the actor overlaps the obstacle on the sweep axis already.
        let block = unit_at(0.0, 0.0, 0.0);
        let actor = Aabb::new(0.5, 0.5, 0.0, 1.5, 1.5, 1.0);
        assert_eq!(block.calculate_y_offset(&actor, -2.0), -2.0);
        assert_eq!(block.calculate_x_offset(&actor, -2.0), -2.0);
    }
}
