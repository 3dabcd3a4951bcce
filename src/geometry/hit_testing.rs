use super::{ButtonRegion, Point};

/// Returns the index of the first region containing `point`.
///
/// Regions are checked in the order given. Neighbouring buttons share edges
/// under the inclusive test, so the earlier region must win.
pub fn locate(point: Point, regions: &[ButtonRegion]) -> Option<usize> {
    regions.iter().position(|region| region.contains(point))
}
