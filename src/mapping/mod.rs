//! Conversions between the cell spaces of two independently placed grids.

pub mod coords;
pub mod overlap;

pub use coords::{CellMapper, MappedCell, MappedPoint, map_cell, map_cell_continuous};
pub use overlap::overlap_range;
