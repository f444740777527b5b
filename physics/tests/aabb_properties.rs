use proptest::prelude::*;
use voxel_physics::{Aabb, Vec3};

// Strategy: boxes with finite, strictly positive extents in a modest world range.
fn aabb() -> impl Strategy<Value = Aabb> {
    (
        prop::array::uniform3(-50.0f64..50.0),
        prop::array::uniform3(0.01f64..10.0),
    )
        .prop_map(|(min, size)| {
            Aabb::new(
                min[0],
                min[1],
                min[2],
                min[0] + size[0],
                min[1] + size[1],
                min[2] + size[2],
            )
        })
}

proptest! {
    #[test]
    fn intersects_is_symmetric(a in aabb(), b in aabb()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn grown_box_overlaps_itself(a in aabb(), e in 1.0e-6f64..5.0) {
        prop_assert!(a.intersects(&a.shrink(-e)));
        prop_assert!(a.shrink(-e).intersects(&a));
    }

    #[test]
    fn union_contains_every_corner(a in aabb(), b in aabb()) {
        let u = a.union(&b);
        for corner in a.corners().into_iter().chain(b.corners()) {
            prop_assert!(u.contains(corner), "{:?} not in {:?}", corner, u);
        }
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_overlap(a in aabb(), b in aabb()) {
        let d = a.distance_to(&b);
        prop_assert!(d >= 0.0);
        prop_assert!((d - b.distance_to(&a)).abs() < 1.0e-12);
        if a.intersects(&b) {
            prop_assert_eq!(d, 0.0);
        }
    }

    #[test]
    fn expand_covers_start_and_end(a in aabb(), m in prop::array::uniform3(-10.0f64..10.0)) {
        let motion = Vec3::new(m[0], m[1], m[2]);
        let swept = a.expand(motion.x, motion.y, motion.z);
        let end = a.offset_by(motion);
        for corner in a.corners().into_iter().chain(end.corners()) {
            // Offsetting rounds, so allow the end corners an ulp or two of slack.
            prop_assert!(swept.shrink(-1.0e-9).contains(corner));
        }
    }

    #[test]
    fn clamps_never_loosen_or_flip_sign(
        obstacle in aabb(),
        actor in aabb(),
        delta in -20.0f64..20.0,
    ) {
        for clamped in [
            obstacle.calculate_x_offset(&actor, delta),
            obstacle.calculate_y_offset(&actor, delta),
            obstacle.calculate_z_offset(&actor, delta),
        ] {
            prop_assert!(clamped.abs() <= delta.abs());
            prop_assert!(clamped * delta >= 0.0);
        }
    }
}
