use glam::UVec2;

use crate::grid::{HeightField, Raster};
use crate::mapping::{CellMapper, overlap_range};
use crate::resample::{
    CellCounts, Frames, HeightMergeMode, PassReport, SampleMode, for_each_row, log_pass,
};
use crate::types::{DEFAULT_HEIGHT, TransferError};

/// Merges `source` elevation into `target`.
///
/// Target cells are scanned over the overlap range and mapped back into the source. Cells
/// whose mapped position falls outside the source keep their current value in every mode.
///
/// With [`SampleMode::Rounded`] the nearest source sample is rescaled by
/// `source.world_size.y / target.world_size.y` and clamped to `[0, 1]`. With
/// [`SampleMode::Interpolated`] the bilinear sample is used as-is, without that rescale.
///
/// Returns `Ok(None)` for [`HeightMergeMode::Skip`].
pub fn merge_heights(
    source: &HeightField,
    target: &mut HeightField,
    frames: Frames,
    mode: HeightMergeMode,
    sample_mode: SampleMode,
) -> Result<Option<PassReport>, TransferError> {
    if mode == HeightMergeMode::Skip {
        return Ok(None);
    }

    let source_info = source.grid_info(&frames.source);
    let target_info = target.grid_info(&frames.target);
    source_info.validate()?;
    target_info.validate()?;

    if mode == HeightMergeMode::ReplaceAll {
        target.fill(DEFAULT_HEIGHT);
    }

    let region = overlap_range(&source_info, &target_info);
    let mapper = CellMapper::new(&target_info, &source_info);
    let height_ratio = frames.source.world_size.y / frames.target.world_size.y;

    let sample = |cell: UVec2| -> Option<f32> {
        match sample_mode {
            SampleMode::Rounded => {
                let source_cell = mapper.map_cell(cell).in_bounds_cell()?;
                let raw = *source.get(source_cell)?;
                Some((raw * height_ratio).clamp(0.0, 1.0))
            }
            SampleMode::Interpolated => {
                let mapped = mapper.map_continuous(cell);
                mapped.in_bounds.then(|| source.interpolated(mapped.uv))
            }
        }
    };

    let row_len = target.resolution() as usize;
    let counts = for_each_row(target.data_mut(), row_len, region, |y, row| {
        let mut counts = CellCounts::default();
        for x in region.min.x..=region.max.x {
            let sampled = sample(UVec2::new(x, y));
            if let Some(value) = sampled {
                let existing = &mut row[x as usize];
                *existing = mode.combine(*existing, value);
            }
            counts.record(sampled.is_some());
        }
        counts
    });

    let report = counts.into_report(region);
    log_pass("height", &report);
    Ok(Some(report))
}
