use glam::UVec2;

use crate::grid::{MaskField, Raster};
use crate::mapping::{CellMapper, overlap_range};
use crate::resample::{CellCounts, Frames, LayerMergeMode, PassReport, for_each_row, log_pass};
use crate::types::{DEFAULT_SOLID, TransferError};

/// Copies the `source` hole mask into `target`.
///
/// [`LayerMergeMode::ReplaceAll`] first makes the whole target solid; in both modes cells in
/// the overlap range take the nearest source value and cells mapping outside the source keep
/// their current value.
pub fn merge_mask(
    source: &MaskField,
    target: &mut MaskField,
    frames: Frames,
    mode: LayerMergeMode,
) -> Result<Option<PassReport>, TransferError> {
    if mode == LayerMergeMode::Skip {
        return Ok(None);
    }

    let source_info = source.grid_info(&frames.source);
    let target_info = target.grid_info(&frames.target);
    source_info.validate()?;
    target_info.validate()?;

    if mode == LayerMergeMode::ReplaceAll {
        target.fill(DEFAULT_SOLID);
    }

    let region = overlap_range(&source_info, &target_info);
    let mapper = CellMapper::new(&target_info, &source_info);

    let row_len = target.resolution() as usize;
    let counts = for_each_row(target.data_mut(), row_len, region, |y, row| {
        let mut counts = CellCounts::default();
        for x in region.min.x..=region.max.x {
            let solid = mapper
                .map_cell(UVec2::new(x, y))
                .in_bounds_cell()
                .and_then(|cell| source.get(cell).copied());
            if let Some(solid) = solid {
                row[x as usize] = solid;
            }
            counts.record(solid.is_some());
        }
        counts
    });

    let report = counts.into_report(region);
    log_pass("mask", &report);
    Ok(Some(report))
}
