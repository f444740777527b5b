/*!
Collision root module.

Continuous collision of axis-aligned actor boxes against a static voxel world.
The code is split for clarity:

- aabb:     the box value type and its per-axis sweep clamps
- types:    result and flag types returned to callers
- settings: tolerances and configuration records
- broad:    the voxel oracle trait and swept-region block queries
- ground:   support probing and embedded detection
- detector: the sweep test and step-height search
*/

pub mod aabb;
pub mod broad;
pub mod detector;
pub mod ground;
pub mod settings;
pub mod types;

// Re-export commonly used types and functions.
pub use aabb::Aabb;
pub use broad::{BlockPos, BlockRegion, VoxelSolidityOracle, query_blocks};
pub use detector::CollisionDetector;
pub use settings::{DetectorSettings, KccSettings, SettingsError};
pub use types::{CollisionAxis, CollisionResult, Vec3};
