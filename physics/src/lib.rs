pub mod bitmask_flags;
pub mod collision;
pub mod movement;
pub mod voxel;

pub use bitmask_flags::{BitmaskFlags, FlagBitmask};
pub use collision::{
    Aabb, BlockPos, BlockRegion, CollisionAxis, CollisionDetector, CollisionResult,
    DetectorSettings, KccSettings, SettingsError, Vec3, VoxelSolidityOracle,
};
pub use movement::{
    ActorShape, MovementState, StepMovementResult, is_at_target_planar, planar_velocity_toward,
    step_movement,
};
pub use voxel::{BlockShape, VoxelGrid};
