use super::{
    aabb::Aabb,
    broad::{VoxelSolidityOracle, query_blocks},
    ground,
    settings::{DetectorSettings, STEP_CANDIDATES, SettingsError},
    types::{CollisionResult, Vec3},
};

/// Resolves requested actor motion against static voxel geometry.
///
/// The detector is stateless apart from its tolerances: every call builds its own
/// obstacle list and working box, so one detector can be shared freely between
/// threads as long as the oracle tolerates concurrent reads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionDetector {
    settings: DetectorSettings,
}

impl CollisionDetector {
    /// Build a detector with caller-supplied tolerances. Settings are trusted; use
    /// [`try_new`](Self::try_new) for values that came from outside the program.
    #[inline]
    pub fn new(settings: DetectorSettings) -> Self {
        Self { settings }
    }

    pub fn try_new(settings: DetectorSettings) -> Result<Self, SettingsError> {
        settings.validate().inspect_err(|err| {
            log::warn!("Rejected collision detector settings: {err}");
        })?;
        Ok(Self::new(settings))
    }

    #[inline]
    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    /// Sweep `actor` along `motion` and return the motion it can actually make.
    ///
    /// Algorithm:
    /// - Gather every block box in the volume swept by the full motion. The list is
    ///   fixed for the rest of the call.
    /// - Clip Y first, then whichever horizontal axis has the smaller requested
    ///   magnitude, then the other one. After each clipped axis the working box is
    ///   moved so later axes are tested from where the actor really is.
    ///
    /// Resolving one axis at a time means a diagonal move into a wall slides along it
    /// instead of stopping dead, and a thin obstacle cannot be skipped because every
    /// block in the swept volume is considered.
    pub fn sweep_test<O: VoxelSolidityOracle + ?Sized>(
        &self,
        oracle: &O,
        actor: Aabb,
        motion: Vec3,
    ) -> CollisionResult {
        let swept = actor.expand(motion.x, motion.y, motion.z);
        let blocks = query_blocks(oracle, &swept);
        if blocks.is_empty() {
            return CollisionResult::free(motion);
        }

        let eps = self.settings.sweep_epsilon;
        let mut working = actor;

        let dy = clip_axis(&blocks, motion.y, eps, |b, d| b.calculate_y_offset(&working, d));
        let collided_y = dy != motion.y;
        if dy != 0.0 {
            working = working.offset(0.0, dy, 0.0);
        }

        let x_first = motion.x.abs() < motion.z.abs();
        let (dx, dz) = if x_first {
            let dx = clip_axis(&blocks, motion.x, eps, |b, d| b.calculate_x_offset(&working, d));
            if dx != 0.0 {
                working = working.offset(dx, 0.0, 0.0);
            }
            let dz = clip_axis(&blocks, motion.z, eps, |b, d| b.calculate_z_offset(&working, d));
            (dx, dz)
        } else {
            let dz = clip_axis(&blocks, motion.z, eps, |b, d| b.calculate_z_offset(&working, d));
            if dz != 0.0 {
                working = working.offset(0.0, 0.0, dz);
            }
            let dx = clip_axis(&blocks, motion.x, eps, |b, d| b.calculate_x_offset(&working, d));
            (dx, dz)
        };

        let result = CollisionResult::new(
            Vec3::new(dx, dy, dz),
            dx != motion.x,
            collided_y,
            dz != motion.z,
            motion.y,
        );
        if !result.collided.is_empty() {
            log::trace!(
                "sweep clipped {:?} -> {:?} against {} blocks",
                motion,
                result.motion,
                blocks.len()
            );
        }
        result
    }

    /// Does the actor rest on a blocking cell (within the ground probe distance)?
    pub fn is_on_ground<O: VoxelSolidityOracle + ?Sized>(&self, oracle: &O, actor: Aabb) -> bool {
        ground::has_support_within(oracle, &actor, self.settings.ground_probe)
    }

    /// Top face of the highest block the actor is stuck inside, or `None` if it is clear.
    pub fn check_embedded<O: VoxelSolidityOracle + ?Sized>(
        &self,
        oracle: &O,
        actor: Aabb,
    ) -> Option<f64> {
        ground::embedded_top(oracle, &actor)
    }

    /// Smallest step-up that lets `horizontal_motion` go through unobstructed.
    ///
    /// Returns `None` when the horizontal move is already free, or when neither
    /// candidate height (0.5, then 1.0, skipping any above `max_step_height`) clears the
    /// obstacle. Any vertical component of `horizontal_motion` is ignored.
    pub fn calculate_step_height<O: VoxelSolidityOracle + ?Sized>(
        &self,
        oracle: &O,
        actor: Aabb,
        horizontal_motion: Vec3,
        max_step_height: f64,
    ) -> Option<f64> {
        let flat = Vec3::new(horizontal_motion.x, 0.0, horizontal_motion.z);
        if !self.sweep_test(oracle, actor, flat).collided_horizontally() {
            return None;
        }

        let tol = self.settings.step_match_tolerance;
        STEP_CANDIDATES
            .into_iter()
            .take_while(|&candidate| candidate <= max_step_height)
            .find(|&candidate| {
                let stepped = self.sweep_test(oracle, actor, Vec3::new(flat.x, candidate, flat.z));
                (stepped.motion.x - flat.x).abs() <= tol && (stepped.motion.z - flat.z).abs() <= tol
            })
    }
}

/// Clip one axis' delta against every block, stopping once nothing is left to clip.
#[inline]
fn clip_axis(blocks: &[Aabb], delta: f64, eps: f64, clip: impl Fn(&Aabb, f64) -> f64) -> f64 {
    let mut d = delta;
    for block in blocks {
        if d.abs() < eps {
            break;
        }
        d = clip(block, d);
    }
    d
}
