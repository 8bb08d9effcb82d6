use crate::types::{GridInfo, SurfaceFrame};

/// Shared interface for the square per-layer buffers of a terrain.
pub trait Raster {
    /// Samples per side.
    fn resolution(&self) -> u32;

    /// Grid metadata for this buffer placed by `frame`.
    fn grid_info(&self, frame: &SurfaceFrame) -> GridInfo {
        frame.grid(self.resolution())
    }
}
