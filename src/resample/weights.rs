use glam::UVec2;

use crate::grid::{Raster, WeightLayers};
use crate::mapping::{CellMapper, overlap_range};
use crate::resample::{CellCounts, Frames, LayerMergeMode, PassReport, for_each_row, log_pass};
use crate::types::TransferError;

/// Copies `source` blend weights into `target`.
///
/// [`LayerMergeMode::ReplaceAll`] first rebuilds the target with the source's layer count,
/// every cell fully weighted to layer 0. [`LayerMergeMode::ReplaceArea`] keeps the target
/// buffer, widening it when the source has more layers; target layers past the source's
/// count are left as they are.
///
/// In the overlap range each layer below the source's layer count is copied verbatim from
/// the nearest source cell. Nothing is renormalized. The target's layer identities are
/// replaced by the source's.
pub fn merge_weights(
    source: &WeightLayers,
    target: &mut WeightLayers,
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

    match mode {
        LayerMergeMode::ReplaceAll => {
            *target = WeightLayers::with_base_layer(target.resolution(), source.layer_count())?;
        }
        LayerMergeMode::ReplaceArea => target.widen_layers(source.layer_count()),
        LayerMergeMode::Skip => {}
    }

    let region = overlap_range(&source_info, &target_info);
    let mapper = CellMapper::new(&target_info, &source_info);
    let layers = source.layer_count();
    let stride = target.layer_count();

    let row_len = target.resolution() as usize * stride;
    let counts = for_each_row(target.data_mut(), row_len, region, |y, row| {
        let mut counts = CellCounts::default();
        for x in region.min.x..=region.max.x {
            let weights = mapper
                .map_cell(UVec2::new(x, y))
                .in_bounds_cell()
                .and_then(|cell| source.cell_weights(cell));
            if let Some(weights) = weights {
                let offset = x as usize * stride;
                row[offset..offset + layers].copy_from_slice(&weights[..layers]);
            }
            counts.record(weights.is_some());
        }
        counts
    });

    target.set_layer_ids(source.layer_ids().to_vec());

    let report = counts.into_report(region);
    log_pass("weights", &report);
    Ok(Some(report))
}
