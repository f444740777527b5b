//! In-memory sparse voxel world.
//!
//! `VoxelGrid` stores only non-empty cells, keyed by [`BlockPos`]. It is what tests and
//! small tools use as a [`VoxelSolidityOracle`]; a game with chunked storage would
//! implement the trait on its own world type instead.

use std::collections::HashMap;

use crate::collision::{Aabb, BlockPos, BlockRegion, VoxelSolidityOracle};

/// Collision shape of a non-empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockShape {
    /// The whole unit cube.
    Full,
    /// Lower half of the cell.
    BottomSlab,
    /// Upper half of the cell.
    TopSlab,
}

impl BlockShape {
    pub fn aabb_at(self, pos: BlockPos) -> Aabb {
        let cell = pos.aabb();
        match self {
            BlockShape::Full => cell,
            BlockShape::BottomSlab => Aabb {
                max_y: cell.min_y + 0.5,
                ..cell
            },
            BlockShape::TopSlab => Aabb {
                min_y: cell.min_y + 0.5,
                ..cell
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VoxelGrid {
    cells: HashMap<BlockPos, BlockShape>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid with a full block at each of `blocks`.
    pub fn from_blocks(blocks: impl IntoIterator<Item = (i32, i32, i32)>) -> Self {
        let mut grid = Self::new();
        for (x, y, z) in blocks {
            grid.set_solid(x, y, z);
        }
        grid
    }

    pub fn set_solid(&mut self, x: i32, y: i32, z: i32) {
        self.cells.insert(BlockPos::new(x, y, z), BlockShape::Full);
    }

    /// Place a bottom slab (half-height block).
    pub fn set_slab(&mut self, x: i32, y: i32, z: i32) {
        self.cells.insert(BlockPos::new(x, y, z), BlockShape::BottomSlab);
    }

    pub fn set_shape(&mut self, pos: BlockPos, shape: BlockShape) {
        self.cells.insert(pos, shape);
    }

    /// Empty the cell. Returns whether it held anything.
    pub fn clear(&mut self, x: i32, y: i32, z: i32) -> bool {
        self.cells.remove(&BlockPos::new(x, y, z)).is_some()
    }

    /// Fill the inclusive box `min..=max` with full blocks.
    pub fn fill(&mut self, min: (i32, i32, i32), max: (i32, i32, i32)) {
        let region = BlockRegion {
            min: BlockPos::new(min.0, min.1, min.2),
            max: BlockPos::new(max.0 + 1, max.1 + 1, max.2 + 1),
        };
        self.cells
            .extend(region.iter().map(|pos| (pos, BlockShape::Full)));
    }

    #[inline]
    pub fn shape(&self, pos: BlockPos) -> Option<BlockShape> {
        self.cells.get(&pos).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl VoxelSolidityOracle for VoxelGrid {
    #[inline]
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.cells.contains_key(&BlockPos::new(x, y, z))
    }

    fn block_aabb(&self, x: i32, y: i32, z: i32) -> Option<Aabb> {
        let pos = BlockPos::new(x, y, z);
        self.shape(pos).map(|shape| shape.aabb_at(pos))
    }

    fn collect_blocks(&self, region: &BlockRegion, out: &mut Vec<Aabb>) {
        // Sparse worlds can be much smaller than a long sweep's region.
        if (self.cells.len() as u64) < region.volume() {
            let start = out.len();
            out.extend(
                self.cells
                    .iter()
                    .filter(|(pos, _)| region.contains(**pos))
                    .map(|(pos, shape)| shape.aabb_at(*pos)),
            );
            // Keep the region's Y-Z-X visiting order so results do not depend on hashing.
            out[start..].sort_by(|a, b| {
                (a.min_y, a.min_z, a.min_x)
                    .partial_cmp(&(b.min_y, b.min_z, b.min_x))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            return;
        }
        out.extend(
            region
                .iter()
                .filter_map(|pos| self.block_aabb(pos.x, pos.y, pos.z)),
        );
    }
}
