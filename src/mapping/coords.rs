use glam::{Affine3A, IVec2, UVec2, Vec2, Vec3};

use crate::types::GridInfo;

/// Continuous position of a cell in another grid, normalized to that grid's extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPoint {
    /// `(0, 0)` is the destination's first sample, `(1, 1)` its last.
    pub uv: Vec2,
    /// Whether `uv` lies within the closed unit square.
    pub in_bounds: bool,
}

/// Nearest destination cell for a mapped position. `cell` may fall outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedCell {
    pub cell: IVec2,
    pub in_bounds: bool,
}

impl MappedCell {
    /// The cell as an index into the destination grid, or `None` when out of bounds.
    #[inline]
    pub fn in_bounds_cell(&self) -> Option<UVec2> {
        self.in_bounds.then(|| self.cell.as_uvec2())
    }
}

/// Maps cells of one grid into the cell space of another.
///
/// The affine change of basis (grid-local of `from` -> world -> grid-local of `to`) is
/// computed once; both the continuous and the rounded lookup go through it.
#[derive(Debug, Clone, Copy)]
pub struct CellMapper {
    from: GridInfo,
    to_last: u32,
    to_extent: Vec2,
    change_of_basis: Affine3A,
}

impl CellMapper {
    pub fn new(from: &GridInfo, to: &GridInfo) -> Self {
        let change_of_basis = to.placement.to_affine().inverse() * from.placement.to_affine();
        Self {
            from: *from,
            to_last: to.last_index(),
            to_extent: Vec2::new(to.world_size.x, to.world_size.z),
            change_of_basis,
        }
    }

    /// Normalized destination coordinates of `cell`.
    pub fn map_continuous(&self, cell: UVec2) -> MappedPoint {
        let local: Vec3 = self.from.local_position(cell);
        let to_local = self.change_of_basis.transform_point3(local);
        let uv = Vec2::new(to_local.x, to_local.z) / self.to_extent;
        let in_bounds = uv.cmpge(Vec2::ZERO).all() && uv.cmple(Vec2::ONE).all();
        MappedPoint { uv, in_bounds }
    }

    /// Nearest destination cell of `cell`, rounding half away from zero.
    pub fn map_cell(&self, cell: UVec2) -> MappedCell {
        let MappedPoint { uv, in_bounds } = self.map_continuous(cell);
        let cell = (uv * self.to_last as f32).round().as_ivec2();
        MappedCell { cell, in_bounds }
    }
}

/// Position of `cell` of grid `from` inside grid `to`, normalized to `to`'s extent.
pub fn map_cell_continuous(cell: UVec2, from: &GridInfo, to: &GridInfo) -> MappedPoint {
    CellMapper::new(from, to).map_continuous(cell)
}

/// Nearest cell of grid `to` for `cell` of grid `from`.
pub fn map_cell(cell: UVec2, from: &GridInfo, to: &GridInfo) -> MappedCell {
    CellMapper::new(from, to).map_cell(cell)
}
