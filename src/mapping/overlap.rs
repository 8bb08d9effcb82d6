use glam::{IVec2, UVec2};

use crate::mapping::CellMapper;
use crate::types::{CellRegion, GridInfo};

/// Range of `target` cells the footprint of `source` may touch.
///
/// Only the two diagonal corners of the source, `(0, 0)` and `(res - 1, res - 1)`, are
/// mapped; the result is their axis-aligned bounding box clamped to the target grid. Under
/// rotation this is not the exact footprint, so every cell in the range must still pass the
/// per-cell bounds check of [`CellMapper`] before it is written.
pub fn overlap_range(source: &GridInfo, target: &GridInfo) -> CellRegion {
    let mapper = CellMapper::new(source, target);
    let first = mapper.map_cell(UVec2::ZERO).cell;
    let last = mapper.map_cell(UVec2::splat(source.last_index())).cell;

    let upper = IVec2::splat(target.last_index() as i32);
    let min = first.min(last).clamp(IVec2::ZERO, upper);
    let max = first.max(last).clamp(IVec2::ZERO, upper);

    CellRegion::new(min.as_uvec2(), max.as_uvec2())
}
