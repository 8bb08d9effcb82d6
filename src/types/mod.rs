pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;

pub use constants::*;
pub use error::TransferError;
pub use geometry::{CellRegion, Placement};
pub use info::{GridInfo, SurfaceFrame};
