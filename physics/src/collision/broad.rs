//! Broad-phase: turn a query volume into the block boxes a sweep must consider.
//!
//! There is no acceleration structure. The world is asked directly for every cell in
//! the integer range covering the query box, which for a single tick's swept volume is
//! a handful of cells.

use super::aabb::Aabb;

/// Integer coordinates of one voxel cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_block(self.x, self.y, self.z)
    }
}

/// Half-open range of cells `[min, max)` on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRegion {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl BlockRegion {
    /// Every cell whose unit cube can overlap `aabb`: floor of the min face (inclusive)
    /// to ceiling of the max face (exclusive).
    pub fn covering(aabb: &Aabb) -> Self {
        Self {
            min: BlockPos::new(
                floor_to_block(aabb.min_x),
                floor_to_block(aabb.min_y),
                floor_to_block(aabb.min_z),
            ),
            max: BlockPos::new(
                ceil_to_block(aabb.max_x),
                ceil_to_block(aabb.max_y),
                ceil_to_block(aabb.max_z),
            ),
        }
    }

    /// Number of cells in the region (0 when any axis is empty). Saturates at
    /// `u64::MAX` for regions spanning most of the `i32` range.
    pub fn volume(&self) -> u64 {
        let span = |lo: i32, hi: i32| u64::try_from(i64::from(hi) - i64::from(lo)).unwrap_or(0);
        span(self.min.x, self.max.x)
            .saturating_mul(span(self.min.y, self.max.y))
            .saturating_mul(span(self.min.z, self.max.z))
    }

    #[inline]
    pub fn contains(&self, pos: BlockPos) -> bool {
        (self.min.x..self.max.x).contains(&pos.x)
            && (self.min.y..self.max.y).contains(&pos.y)
            && (self.min.z..self.max.z).contains(&pos.z)
    }

    /// Cells in Y, then Z, then X order.
    pub fn iter(&self) -> impl Iterator<Item = BlockPos> + use<> {
        let Self { min, max } = *self;
        (min.y..max.y).flat_map(move |y| {
            (min.z..max.z).flat_map(move |z| (min.x..max.x).map(move |x| BlockPos::new(x, y, z)))
        })
    }
}

// `as` saturates out-of-range floats, which keeps absurd coordinates from wrapping.
#[inline]
fn floor_to_block(v: f64) -> i32 {
    v.floor() as i32
}

#[inline]
fn ceil_to_block(v: f64) -> i32 {
    v.ceil() as i32
}

/// Read-only view of the voxel world consumed by the detector.
///
/// Only [`is_solid`](Self::is_solid) is required. Implementors with partial blocks
/// (slabs, carpets) override [`block_aabb`](Self::block_aabb); the returned box must
/// stay inside the cell's unit cube so region queries still find it. Implementors
/// with chunked storage can override [`collect_blocks`](Self::collect_blocks) to
/// batch lookups.
///
/// Calls are synchronous. If sweeps run on several threads the implementation must
/// tolerate concurrent reads.
pub trait VoxelSolidityOracle {
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool;

    /// Collision box of the cell, or `None` when it does not block movement.
    fn block_aabb(&self, x: i32, y: i32, z: i32) -> Option<Aabb> {
        self.is_solid(x, y, z).then(|| Aabb::from_block(x, y, z))
    }

    /// Append the collision box of every blocking cell in `region` to `out`.
    fn collect_blocks(&self, region: &BlockRegion, out: &mut Vec<Aabb>) {
        out.extend(
            region
                .iter()
                .filter_map(|pos| self.block_aabb(pos.x, pos.y, pos.z)),
        );
    }
}

impl<F> VoxelSolidityOracle for F
where
    F: Fn(i32, i32, i32) -> bool,
{
    #[inline]
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self(x, y, z)
    }
}

/// Block boxes whose cells overlap `query`. One batch query against the oracle.
pub fn query_blocks<O: VoxelSolidityOracle + ?Sized>(oracle: &O, query: &Aabb) -> Vec<Aabb> {
    let region = BlockRegion::covering(query);
    let mut blocks = Vec::new();
    oracle.collect_blocks(&region, &mut blocks);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_uses_floor_and_exclusive_ceiling() {
        let region = BlockRegion::covering(&Aabb::new(-0.5, 1.0, 0.2, 1.5, 2.0, 0.8));
        assert_eq!(region.min, BlockPos::new(-1, 1, 0));
        assert_eq!(region.max, BlockPos::new(2, 2, 1));
        assert_eq!(region.volume(), 3);

        // A box flush with cell boundaries covers exactly the cells it spans.
        let flush = BlockRegion::covering(&Aabb::from_block(4, 5, 6));
        assert_eq!(flush.volume(), 1);
        assert!(flush.contains(BlockPos::new(4, 5, 6)));
        assert!(!flush.contains(BlockPos::new(5, 5, 6)));
    }

    #[test]
    fn iter_visits_every_cell_once_y_major() {
        let region = BlockRegion {
            min: BlockPos::new(0, 0, 0),
            max: BlockPos::new(2, 2, 1),
        };
        let cells: Vec<_> = region.iter().collect();
        assert_eq!(
            cells,
            vec![
                BlockPos::new(0, 0, 0),
                BlockPos::new(1, 0, 0),
                BlockPos::new(0, 1, 0),
                BlockPos::new(1, 1, 0),
            ]
        );
    }

    #[test]
    fn empty_region_has_no_cells() {
        let region = BlockRegion {
            min: BlockPos::new(3, 0, 0),
            max: BlockPos::new(1, 4, 4),
        };
        assert_eq!(region.volume(), 0);
        assert_eq!(region.iter().count(), 0);
    }

    #[test]
    fn volume_saturates_for_huge_regions() {
        let region = BlockRegion::covering(&Aabb::new(0.0, 0.0, 0.0, 1.0e7, 1.0e7, 1.0e7));
        assert_eq!(region.volume(), u64::MAX);

        let huge = 1.0e12;
        let whole = BlockRegion::covering(&Aabb::new(-huge, -huge, -huge, huge, huge, huge));
        assert_eq!(whole.volume(), u64::MAX);

        let row = BlockRegion::covering(&Aabb::new(0.0, 0.0, 0.0, 1.0e7, 1.0, 1.0));
        assert_eq!(row.volume(), 10_000_000);
    }

    #[test]
    fn closures_act_as_oracles() {
        let floor = |_x: i32, y: i32, _z: i32| y < 0;
        let blocks = query_blocks(&floor, &Aabb::new(0.0, -1.0, 0.0, 2.0, 1.0, 1.0));
        assert_eq!(
            blocks,
            vec![Aabb::from_block(0, -1, 0), Aabb::from_block(1, -1, 0)]
        );
    }

    struct Slabs;

    impl VoxelSolidityOracle for Slabs {
        fn is_solid(&self, _x: i32, y: i32, _z: i32) -> bool {
            y == 0
        }

        fn block_aabb(&self, x: i32, y: i32, z: i32) -> Option<Aabb> {
            self.is_solid(x, y, z).then(|| {
                let b = Aabb::from_block(x, y, z);
                Aabb { max_y: b.min_y + 0.5, ..b }
            })
        }
    }

    #[test]
    fn custom_block_boxes_flow_through_the_batch_query() {
        let blocks = query_blocks(&Slabs, &Aabb::new(0.2, 0.0, 0.2, 0.8, 1.0, 0.8));
        assert_eq!(blocks, vec![Aabb::new(0.0, 0.0, 0.0, 1.0, 0.5, 1.0)]);
    }
}
