//! One-shot transfer of a terrain's rasters onto another terrain.
//!
//! The host owns both terrains. It snapshots the target beforehand if it wants undo
//! (`Terrain` is `Clone`), builds a [`CopyRequest`] and calls [`CopyRequest::execute`].

use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::grid::{HeightField, MaskField, Raster, WeightLayers};
use crate::resample::{
    Frames, HeightMergeMode, LayerMergeMode, PassReport, SampleMode, merge_heights, merge_mask,
    merge_weights,
};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_SOLID, GridInfo, SurfaceFrame, TransferError};

/// A placed terrain with its three independently sized layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    pub frame: SurfaceFrame,
    pub heights: HeightField,
    pub weights: WeightLayers,
    pub mask: MaskField,
}

impl Terrain {
    pub fn new(
        frame: SurfaceFrame,
        heights: HeightField,
        weights: WeightLayers,
        mask: MaskField,
    ) -> Self {
        Self {
            frame,
            heights,
            weights,
            mask,
        }
    }

    /// Flat, fully solid terrain painted with a single base layer.
    pub fn flat(
        frame: SurfaceFrame,
        height_resolution: u32,
        weight_resolution: u32,
        layer_count: usize,
        mask_resolution: u32,
    ) -> Result<Self, TransferError> {
        Ok(Self {
            frame,
            heights: HeightField::filled(height_resolution, DEFAULT_HEIGHT),
            weights: WeightLayers::with_base_layer(weight_resolution, layer_count)?,
            mask: MaskField::filled(mask_resolution, DEFAULT_SOLID),
        })
    }

    pub fn height_info(&self) -> GridInfo {
        self.heights.grid_info(&self.frame)
    }

    pub fn weight_info(&self) -> GridInfo {
        self.weights.grid_info(&self.frame)
    }

    pub fn mask_info(&self) -> GridInfo {
        self.mask.grid_info(&self.frame)
    }

    /// Elevation of a height sample in world units above the terrain's base plane.
    pub fn world_height(&self, cell: UVec2) -> Option<f32> {
        self.heights
            .get(cell)
            .map(|height| height * self.frame.world_size.y)
    }
}

/// Which layers a transfer touches and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopySettings {
    pub height: HeightMergeMode,
    /// Only consulted when the height pass runs.
    pub height_sample: SampleMode,
    pub weights: LayerMergeMode,
    pub mask: LayerMergeMode,
}

impl CopySettings {
    /// Settings with every pass skipped.
    pub fn none() -> Self {
        Self {
            height: HeightMergeMode::Skip,
            height_sample: SampleMode::default(),
            weights: LayerMergeMode::Skip,
            mask: LayerMergeMode::Skip,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.height == HeightMergeMode::Skip
            && self.weights == LayerMergeMode::Skip
            && self.mask == LayerMergeMode::Skip
    }
}

/// Per-pass results of a transfer. `None` marks a skipped pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferReport {
    pub heights: Option<PassReport>,
    pub weights: Option<PassReport>,
    pub mask: Option<PassReport>,
}

impl TransferReport {
    /// Total cells written across all passes.
    pub fn written(&self) -> usize {
        [self.heights, self.weights, self.mask]
            .iter()
            .flatten()
            .map(|report| report.written)
            .sum()
    }
}

/// Parameters of a single transfer. Consumed by [`CopyRequest::execute`].
#[derive(Debug)]
pub struct CopyRequest<'a> {
    pub source: &'a Terrain,
    pub target: &'a mut Terrain,
    pub settings: CopySettings,
}

impl<'a> CopyRequest<'a> {
    pub fn new(source: &'a Terrain, target: &'a mut Terrain, settings: CopySettings) -> Self {
        Self {
            source,
            target,
            settings,
        }
    }

    /// Checks every grid an enabled pass will read or write.
    pub fn validate(&self) -> Result<(), TransferError> {
        let Self {
            source,
            target,
            settings,
        } = self;
        if settings.height != HeightMergeMode::Skip {
            source.height_info().validate()?;
            target.height_info().validate()?;
        }
        if settings.weights != LayerMergeMode::Skip {
            source.weight_info().validate()?;
            target.weight_info().validate()?;
        }
        if settings.mask != LayerMergeMode::Skip {
            source.mask_info().validate()?;
            target.mask_info().validate()?;
        }
        Ok(())
    }

    /// Runs the height, weight and mask passes in that order.
    ///
    /// All grids are validated before the first write, so an error leaves the target exactly
    /// as it was. Each pass reads and writes only its own layer.
    pub fn execute(self) -> Result<TransferReport, TransferError> {
        self.validate()?;

        let Self {
            source,
            target,
            settings,
        } = self;
        let frames = Frames {
            source: source.frame,
            target: target.frame,
        };

        let report = TransferReport {
            heights: merge_heights(
                &source.heights,
                &mut target.heights,
                frames,
                settings.height,
                settings.height_sample,
            )?,
            weights: merge_weights(
                &source.weights,
                &mut target.weights,
                frames,
                settings.weights,
            )?,
            mask: merge_mask(&source.mask, &mut target.mask, frames, settings.mask)?,
        };

        tracing::debug!(
            target: "terrain_copy::transfer",
            height_mode = ?settings.height,
            sample_mode = ?settings.height_sample,
            weight_mode = ?settings.weights,
            mask_mode = ?settings.mask,
            written = report.written(),
            "transfer.done"
        );
        Ok(report)
    }
}
