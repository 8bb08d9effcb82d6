//! Transfer of terrain rasters between independently sized and placed grids.
//!
//! Height fields, splat weight layers and hole masks are resampled from a source terrain
//! onto a target terrain. Both terrains may differ in resolution, world size, vertical scale
//! and placement; the target is scanned cell by cell over the overlap of the two footprints
//! and each cell is merged under the requested policy.

pub mod config;
pub mod grid;
pub mod loaders;
pub mod mapping;
pub mod resample;
pub mod transfer;
pub mod types;
pub mod visualization;

pub use config::load_copy_settings;
pub use grid::{Grid2d, HeightField, LayerId, MaskField, Raster, WeightLayers};
pub use loaders::{Scene, load_scene};
pub use mapping::{CellMapper, map_cell, map_cell_continuous, overlap_range};
pub use resample::{HeightMergeMode, LayerMergeMode, PassReport, SampleMode};
pub use transfer::{CopyRequest, CopySettings, Terrain, TransferReport};
pub use types::{CellRegion, GridInfo, Placement, SurfaceFrame, TransferError};
