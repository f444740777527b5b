use crate::collision::{
    Aabb, CollisionDetector, CollisionResult, KccSettings, Vec3, VoxelSolidityOracle,
    settings::DIST_EPS,
};

/// Size of an upright actor box. The actor's position is its bottom-center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorShape {
    pub width: f64,
    pub height: f64,
}

impl ActorShape {
    #[inline]
    pub fn aabb_at(&self, feet: Vec3) -> Aabb {
        Aabb::from_bottom_center(feet, self.width, self.height)
    }
}

/// Per-actor state carried between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementState {
    /// Bottom-center of the actor box.
    pub position: Vec3,
    /// Blocks per second, positive up. Set it positive and clear `grounded` to jump.
    pub vertical_velocity: f64,
    pub grounded: bool,
}

/// Output of a single `step_movement()` tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepMovementResult {
    pub state: MovementState,
    /// Collision outcome of the motion that was applied.
    pub collision: CollisionResult,
    /// Height climbed by step-up this tick, if any.
    pub stepped: Option<f64>,
    /// How far the actor was lifted out of a block it started inside, if any.
    pub unstuck_by: Option<f64>,
}

/// Perform one kinematic tick for an upright box actor.
///
/// Behavior
/// - Lifts the actor out of any block it starts embedded in.
/// - Grounded actors get a small constant downward bias so the sweep keeps touching
///   the floor; airborne actors integrate gravity, clamped at terminal velocity.
/// - Sweeps the combined planar + vertical motion.
/// - If a grounded actor hits a wall, tries a step-up (up, forward, down) no higher
///   than `settings.max_step_height`.
/// - Grounded means the downward sweep was blocked or the ground probe finds support.
///   Landing or bumping a ceiling clears vertical velocity.
pub fn step_movement<O: VoxelSolidityOracle + ?Sized>(
    detector: &CollisionDetector,
    oracle: &O,
    settings: &KccSettings,
    shape: ActorShape,
    state: MovementState,
    planar_velocity: Vec3,
    dt_seconds: f64,
) -> StepMovementResult {
    let dt = dt_seconds.max(0.0);
    let mut position = state.position;
    let mut vertical_velocity = state.vertical_velocity;

    // 0) Un-stick before moving; sweeps do not push out of blocks already overlapped.
    let mut unstuck_by = None;
    if let Some(top) = detector.check_embedded(oracle, shape.aabb_at(position)) {
        let lift = top - position.y;
        log::debug!("actor embedded at {position:?}, lifting by {lift}");
        position.y = top;
        vertical_velocity = 0.0;
        unstuck_by = Some(lift);
    }

    // 1) Vertical velocity for this tick.
    if state.grounded && vertical_velocity <= 0.0 {
        vertical_velocity = -settings.grounded_down_bias_mps;
    } else {
        vertical_velocity = (vertical_velocity - settings.gravity_mps2 * dt)
            .max(settings.terminal_velocity_mps);
    }

    let desired = Vec3::new(
        planar_velocity.x * dt,
        vertical_velocity * dt,
        planar_velocity.z * dt,
    );

    // 2) Sweep, with an optional step-up when a grounded actor walks into a ledge.
    let actor = shape.aabb_at(position);
    let mut collision = detector.sweep_test(oracle, actor, desired);
    let mut stepped = None;
    if state.grounded
        && collision.collided_horizontally()
        && settings.max_step_height > 0.0
        && let Some(height) =
            detector.calculate_step_height(oracle, actor, desired, settings.max_step_height)
    {
        log::debug!("actor at {position:?} stepping up {height}");
        collision = step_up(detector, oracle, actor, desired, height);
        stepped = Some(height);
    }

    position += collision.motion;

    // 3) Ground state. Rising actors are never grounded by the probe alone.
    let grounded = collision.is_on_ground()
        || (vertical_velocity <= 0.0 && detector.is_on_ground(oracle, shape.aabb_at(position)));
    if grounded || (collision.collided_y() && vertical_velocity > 0.0) {
        vertical_velocity = 0.0;
    }

    StepMovementResult {
        state: MovementState {
            position,
            vertical_velocity,
            grounded,
        },
        collision,
        stepped,
        unstuck_by,
    }
}

/// Up by `height`, forward by the planar part of `desired`, then down by the same
/// height plus any downward part of `desired` to settle on the ledge.
fn step_up<O: VoxelSolidityOracle + ?Sized>(
    detector: &CollisionDetector,
    oracle: &O,
    actor: Aabb,
    desired: Vec3,
    height: f64,
) -> CollisionResult {
    let up = detector.sweep_test(oracle, actor, Vec3::new(0.0, height, 0.0));
    let raised = actor.offset_by(up.motion);

    let forward = detector.sweep_test(oracle, raised, Vec3::new(desired.x, 0.0, desired.z));
    let moved = raised.offset_by(forward.motion);

    let settle = -up.motion.y + desired.y.min(0.0);
    let down = detector.sweep_test(oracle, moved, Vec3::new(0.0, settle, 0.0));

    CollisionResult::new(
        up.motion + forward.motion + down.motion,
        forward.collided_x(),
        down.collided_y(),
        forward.collided_z(),
        settle,
    )
}

/// Planar (XZ) velocity toward `target` at `speed`, slowed on the last tick so the
/// actor stops on the target instead of overshooting it.
pub fn planar_velocity_toward(current: Vec3, target: Vec3, speed: f64, dt_seconds: f64) -> Vec3 {
    let delta = Vec3::new(target.x - current.x, 0.0, target.z - current.z);
    let dist = delta.norm();
    if dist <= DIST_EPS || speed <= 0.0 || dt_seconds <= 0.0 {
        return Vec3::zeros();
    }
    let step = (speed * dt_seconds).min(dist);
    delta * (step / (dist * dt_seconds))
}

/// Returns true if two positions are within a centimetre of each other on the XZ plane.
pub fn is_at_target_planar(current: Vec3, target: Vec3) -> bool {
    const CM_SQ: f64 = 1.0e-4;
    let dx = target.x - current.x;
    let dz = target.z - current.z;
    dx * dx + dz * dz <= CM_SQ
}
