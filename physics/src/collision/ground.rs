use super::{
    aabb::Aabb,
    broad::{VoxelSolidityOracle, query_blocks},
};

/// Is there a blocking cell within `probe_distance` below `actor`?
///
/// The actor box is shifted down by the probe distance and tested for strict overlap
/// against the blocks in that region. An actor standing flush on a floor overlaps it
/// after the shift; one hovering higher than the probe does not.
pub fn has_support_within<O: VoxelSolidityOracle + ?Sized>(
    oracle: &O,
    actor: &Aabb,
    probe_distance: f64,
) -> bool {
    let probe = actor.offset(0.0, -probe_distance, 0.0);
    query_blocks(oracle, &probe)
        .iter()
        .any(|block| block.intersects(&probe))
}

/// Highest top face among the blocks `actor` currently overlaps.
///
/// `None` means the actor is clear of the world. Otherwise raising the actor's feet to
/// the returned height un-sticks it from every block it was inside (ceiling permitting).
pub fn embedded_top<O: VoxelSolidityOracle + ?Sized>(oracle: &O, actor: &Aabb) -> Option<f64> {
    query_blocks(oracle, actor)
        .iter()
        .filter(|block| block.intersects(actor))
        .map(|block| block.max_y)
        .reduce(f64::max)
}
