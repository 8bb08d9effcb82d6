//! Multi-layer blend weights (splat maps).
//!
//! Weights are stored interleaved per cell: `[(y * resolution + x) * layer_count + layer]`.
//! Nothing forces a cell's weights to sum to one; callers renormalize if they need to.

use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid2d, Raster};
use crate::types::{BASE_LAYER_WEIGHT, TransferError};

/// Identity of the material or texture a weight layer index refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl From<&str> for LayerId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightLayers {
    resolution: u32,
    layer_count: usize,
    layer_ids: Vec<LayerId>,
    data: Vec<f32>,
}

impl WeightLayers {
    pub fn new(resolution: u32, layer_count: usize, data: Vec<f32>) -> Result<Self, TransferError> {
        if layer_count == 0 {
            return Err(TransferError::InvalidGrid(
                "weight layers need at least one layer".to_string(),
            ));
        }
        let expected_len = (resolution as usize) * (resolution as usize) * layer_count;
        if data.len() != expected_len {
            return Err(TransferError::InvalidMetadata(format!(
                "data length {} does not match {}x{} grid with {} layers",
                data.len(),
                resolution,
                resolution,
                layer_count
            )));
        }

        Ok(Self {
            resolution,
            layer_count,
            layer_ids: Vec::new(),
            data,
        })
    }

    /// Every cell fully weighted to layer 0, all other layers zero.
    pub fn with_base_layer(resolution: u32, layer_count: usize) -> Result<Self, TransferError> {
        let cells = (resolution as usize) * (resolution as usize);
        let mut data = vec![0.0; cells * layer_count];
        for cell in data.chunks_exact_mut(layer_count.max(1)) {
            cell[0] = BASE_LAYER_WEIGHT;
        }
        Self::new(resolution, layer_count, data)
    }

    pub fn with_layer_ids(mut self, layer_ids: Vec<LayerId>) -> Self {
        self.layer_ids = layer_ids;
        self
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn layer_ids(&self) -> &[LayerId] {
        &self.layer_ids
    }

    pub fn set_layer_ids(&mut self, layer_ids: Vec<LayerId>) {
        self.layer_ids = layer_ids;
    }

    #[inline]
    fn cell_offset(&self, cell: UVec2) -> usize {
        ((cell.y as usize) * (self.resolution as usize) + (cell.x as usize)) * self.layer_count
    }

    fn in_bounds(&self, cell: UVec2) -> bool {
        cell.x < self.resolution && cell.y < self.resolution
    }

    /// All layer weights of one cell.
    pub fn cell_weights(&self, cell: UVec2) -> Option<&[f32]> {
        if !self.in_bounds(cell) {
            return None;
        }
        let offset = self.cell_offset(cell);
        Some(&self.data[offset..offset + self.layer_count])
    }

    pub fn weight(&self, cell: UVec2, layer: usize) -> Option<f32> {
        if layer >= self.layer_count {
            return None;
        }
        self.cell_weights(cell).map(|weights| weights[layer])
    }

    pub fn set_weight(
        &mut self,
        cell: UVec2,
        layer: usize,
        value: f32,
    ) -> Result<(), TransferError> {
        if !self.in_bounds(cell) || layer >= self.layer_count {
            return Err(TransferError::OutOfBounds(format!(
                "cell ({}, {}) layer {} out of bounds for {}x{} grid with {} layers",
                cell.x, cell.y, layer, self.resolution, self.resolution, self.layer_count
            )));
        }
        let idx = self.cell_offset(cell) + layer;
        self.data[idx] = value;
        Ok(())
    }

    /// Grows the buffer to `layer_count` layers; added layers start at zero weight.
    /// Does nothing when the buffer already has at least that many layers.
    pub fn widen_layers(&mut self, layer_count: usize) {
        if layer_count <= self.layer_count {
            return;
        }
        let cells = (self.resolution as usize) * (self.resolution as usize);
        let mut data = vec![0.0; cells * layer_count];
        for (old, new) in self
            .data
            .chunks_exact(self.layer_count)
            .zip(data.chunks_exact_mut(layer_count))
        {
            new[..old.len()].copy_from_slice(old);
        }
        self.data = data;
        self.layer_count = layer_count;
    }

    /// Copy of a single layer as a 2D raster.
    pub fn layer(&self, layer: usize) -> Option<Grid2d<f32>> {
        if layer >= self.layer_count {
            return None;
        }
        let values = self
            .data
            .chunks_exact(self.layer_count)
            .map(|weights| weights[layer])
            .collect();
        Grid2d::new(self.resolution, values).ok()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

impl Raster for WeightLayers {
    fn resolution(&self) -> u32 {
        self.resolution
    }
}
