//! Grid metadata.

use glam::{UVec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{MIN_RESOLUTION, Placement, TransferError};

/// Physical extent and world placement shared by every layer of one terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceFrame {
    /// Width (x), vertical scale (y) and depth (z) in world units.
    pub world_size: Vec3,
    #[serde(default)]
    pub placement: Placement,
}

impl Default for SurfaceFrame {
    fn default() -> Self {
        Self {
            world_size: Vec3::ONE,
            placement: Placement::default(),
        }
    }
}

impl SurfaceFrame {
    pub fn new(world_size: Vec3, placement: Placement) -> Self {
        Self {
            world_size,
            placement,
        }
    }

    /// Grid metadata for a layer of this frame sampled at `resolution` cells per side.
    pub fn grid(&self, resolution: u32) -> GridInfo {
        GridInfo {
            resolution,
            world_size: self.world_size,
            placement: self.placement,
        }
    }
}

/// A square raster placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridInfo {
    /// Samples per side.
    pub resolution: u32,
    pub world_size: Vec3,
    pub placement: Placement,
}

impl GridInfo {
    /// Rejects grids that cannot carry a cell spacing or a physical extent.
    pub fn validate(&self) -> Result<(), TransferError> {
        if self.resolution < MIN_RESOLUTION {
            return Err(TransferError::InvalidGrid(format!(
                "resolution {} is below the minimum of {}",
                self.resolution, MIN_RESOLUTION
            )));
        }
        let size = self.world_size;
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(TransferError::InvalidGrid(format!(
                "world size ({}, {}, {}) must be finite and positive",
                size.x, size.y, size.z
            )));
        }
        Ok(())
    }

    /// Index of the last sample along each axis.
    #[inline]
    pub fn last_index(&self) -> u32 {
        self.resolution - 1
    }

    /// Position of sample `cell` in the grid's local frame (y = 0).
    #[inline]
    pub fn local_position(&self, cell: UVec2) -> Vec3 {
        let divisions = self.last_index() as f32;
        Vec3::new(
            cell.x as f32 / divisions * self.world_size.x,
            0.0,
            cell.y as f32 / divisions * self.world_size.z,
        )
    }

    /// World position of sample `cell` on the grid's base plane.
    pub fn world_position(&self, cell: UVec2) -> Vec3 {
        self.placement.transform_point(self.local_position(cell))
    }
}
