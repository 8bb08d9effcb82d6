pub mod grid2d;
pub mod layered;
mod sampling;
pub mod traits;

pub use grid2d::{Grid2d, HeightField, MaskField};
pub use layered::{LayerId, WeightLayers};
pub use traits::Raster;
