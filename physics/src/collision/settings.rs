/*!
Collision detector and kinematic controller settings.

Tolerances used by the sweep test, ground probe and step-up search live here as
constants. The tunable subset is grouped into two plain configuration records:

- [`DetectorSettings`]: tolerances owned by a [`CollisionDetector`](super::CollisionDetector).
- [`KccSettings`]: per-world movement tuning consumed by [`step_movement`](crate::movement::step_movement).

Both are built once by the caller and passed in explicitly; nothing in this crate
memoizes configuration globally.

Notes
- Distances are in blocks (one voxel cell = 1.0), time in seconds.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
*/

use thiserror::Error;

/// Per-axis sweep stops scanning obstacles once the remaining delta is this small.
pub const SWEEP_EPSILON: f64 = 1.0e-7;

/// How far below the actor the ground probe reaches (blocks).
pub const GROUND_PROBE_DISTANCE: f64 = 0.001;

/// Step heights tried by the step-up search, in order. No interpolation in between.
pub const STEP_CANDIDATES: [f64; 2] = [0.5, 1.0];

/// A stepped sweep counts as unobstructed when its horizontal deltas are within this
/// distance of the requested ones.
pub const STEP_MATCH_TOLERANCE: f64 = 0.001;

/// Default maximum step-up height for walking actors (half a block: slabs, not full blocks).
pub const DEFAULT_MAX_STEP_HEIGHT: f64 = 0.5;

/// Gravity magnitude in blocks per second squared (positive value).
pub const GRAVITY_MPS2: f64 = 32.0;

/// Fastest downward speed an actor reaches while falling (negative, blocks per second).
pub const TERMINAL_VELOCITY_MPS: f64 = -78.4;

/// Constant downward speed applied while grounded so the sweep keeps touching the floor.
pub const GROUNDED_DOWN_BIAS_MPS: f64 = 0.08;

/// Planar distances below this are treated as zero.
pub const DIST_EPS: f64 = 1.0e-6;

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("terminal velocity must be finite and negative, got {0}")]
    TerminalVelocityNotDownward(f64),
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Negative { field, value })
    }
}

/// Tolerances used by the collision detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorSettings {
    /// See [`SWEEP_EPSILON`].
    pub sweep_epsilon: f64,
    /// See [`GROUND_PROBE_DISTANCE`].
    pub ground_probe: f64,
    /// See [`STEP_MATCH_TOLERANCE`].
    pub step_match_tolerance: f64,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            sweep_epsilon: SWEEP_EPSILON,
            ground_probe: GROUND_PROBE_DISTANCE,
            step_match_tolerance: STEP_MATCH_TOLERANCE,
        }
    }
}

impl DetectorSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        ensure_positive("sweep_epsilon", self.sweep_epsilon)?;
        ensure_positive("ground_probe", self.ground_probe)?;
        ensure_positive("step_match_tolerance", self.step_match_tolerance)?;
        Ok(())
    }
}

/// Movement tuning for the kinematic step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KccSettings {
    pub gravity_mps2: f64,
    /// Negative: the clamp applies to downward speed.
    pub terminal_velocity_mps: f64,
    pub grounded_down_bias_mps: f64,
    /// Highest ledge the actor climbs without jumping. Zero disables step-up.
    pub max_step_height: f64,
}

impl Default for KccSettings {
    fn default() -> Self {
        Self {
            gravity_mps2: GRAVITY_MPS2,
            terminal_velocity_mps: TERMINAL_VELOCITY_MPS,
            grounded_down_bias_mps: GROUNDED_DOWN_BIAS_MPS,
            max_step_height: DEFAULT_MAX_STEP_HEIGHT,
        }
    }
}

impl KccSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        ensure_non_negative("gravity_mps2", self.gravity_mps2)?;
        ensure_non_negative("grounded_down_bias_mps", self.grounded_down_bias_mps)?;
        ensure_non_negative("max_step_height", self.max_step_height)?;
        if !(self.terminal_velocity_mps.is_finite() && self.terminal_velocity_mps < 0.0) {
            return Err(SettingsError::TerminalVelocityNotDownward(
                self.terminal_velocity_mps,
            ));
        }
        Ok(())
    }
}
