//! Per-layer-kind resamplers.
//!
//! Every pass is driven by destination cells: the overlap range of the target is scanned row
//! by row, each cell is mapped back into the source, sampled and combined in place. Rows are
//! disjoint slices of the target buffer, so with the `parallel` feature they are handed to
//! rayon without any locking.

pub mod height;
pub mod mask;
pub mod weights;

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::types::{CellRegion, SurfaceFrame};

pub use height::merge_heights;
pub use mask::merge_mask;
pub use weights::merge_weights;

/// How sampled elevation is combined with the existing target elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightMergeMode {
    /// Leave heights alone.
    #[serde(alias = "none")]
    Skip,
    /// Zero the whole target, then write the overlap.
    #[default]
    ReplaceAll,
    /// Overwrite the overlap only.
    ReplaceArea,
    Max,
    Min,
    Average,
}

impl HeightMergeMode {
    /// Combined value for a target cell holding `existing` that received `sampled`.
    #[inline]
    pub fn combine(self, existing: f32, sampled: f32) -> f32 {
        match self {
            Self::Max => existing.max(sampled),
            Self::Min => existing.min(sampled),
            Self::Average => (existing + sampled) * 0.5,
            Self::Skip => existing,
            Self::ReplaceAll | Self::ReplaceArea => sampled,
        }
    }
}

/// How the source height field is read at a mapped position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMode {
    /// Nearest source sample, rescaled by the ratio of vertical extents.
    Rounded,
    /// Bilinear blend of the four surrounding source samples.
    #[default]
    Interpolated,
}

/// Merge policy for layers that are copied verbatim (weights and holes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerMergeMode {
    #[serde(alias = "none")]
    Skip,
    /// Reset the target to its default, then write the overlap.
    #[default]
    ReplaceAll,
    /// Overwrite the overlap only.
    ReplaceArea,
}

/// Placement of the two terrains taking part in a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frames {
    pub source: SurfaceFrame,
    pub target: SurfaceFrame,
}

/// Outcome of a single resampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Target cells that were scanned.
    pub region: CellRegion,
    /// Cells that received a sample.
    pub written: usize,
    /// Cells in the region whose mapped position fell outside the source.
    pub skipped: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellCounts {
    pub written: usize,
    pub skipped: usize,
}

impl CellCounts {
    pub(crate) fn record(&mut self, written: bool) {
        if written {
            self.written += 1;
        } else {
            self.skipped += 1;
        }
    }

    pub(crate) fn into_report(self, region: CellRegion) -> PassReport {
        PassReport {
            region,
            written: self.written,
            skipped: self.skipped,
        }
    }
}

impl Add for CellCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            written: self.written + rhs.written,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

/// Calls `f(y, row)` for every row of `data` inside `region` and sums the counts.
///
/// `row_len` is the number of elements per grid row (resolution times values per cell).
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(
    data: &mut [T],
    row_len: usize,
    region: CellRegion,
    f: F,
) -> CellCounts
where
    T: Send,
    F: Fn(u32, &mut [T]) -> CellCounts + Sync + Send,
{
    data.chunks_mut(row_len)
        .enumerate()
        .skip(region.min.y as usize)
        .take(region.height() as usize)
        .map(|(y, row)| f(y as u32, row))
        .fold(CellCounts::default(), Add::add)
}

#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(
    data: &mut [T],
    row_len: usize,
    region: CellRegion,
    f: F,
) -> CellCounts
where
    T: Send,
    F: Fn(u32, &mut [T]) -> CellCounts + Sync + Send,
{
    use rayon::prelude::*;

    data.par_chunks_mut(row_len)
        .enumerate()
        .skip(region.min.y as usize)
        .take(region.height() as usize)
        .map(|(y, row)| f(y as u32, row))
        .reduce(CellCounts::default, Add::add)
}

pub(crate) fn log_pass(pass: &'static str, report: &PassReport) {
    tracing::debug!(
        target: "terrain_copy::resample",
        pass,
        min_x = report.region.min.x,
        min_y = report.region.min.y,
        max_x = report.region.max.x,
        max_y = report.region.max.y,
        written = report.written,
        skipped = report.skipped,
        "resample.pass.done"
    );
    if report.written == 0 {
        tracing::warn!(
            target: "terrain_copy::resample",
            pass,
            "resample.pass.no_overlap"
        );
    }
}
