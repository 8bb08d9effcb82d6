use std::f32::consts::FRAC_PI_2;

use glam::{IVec2, Quat, UVec2, Vec2, Vec3};

use terrain_copy::types::{DEFAULT_HEIGHT, DEFAULT_SOLID};
use terrain_copy::{
    CellRegion, CopyRequest, CopySettings, HeightField, HeightMergeMode, LayerId, LayerMergeMode,
    MaskField, Placement, SampleMode, SurfaceFrame, Terrain, WeightLayers, map_cell,
    map_cell_continuous, overlap_range,
};

fn frame(world_size: Vec3, placement: Placement) -> SurfaceFrame {
    SurfaceFrame::new(world_size, placement)
}

fn terrain(frame: SurfaceFrame, resolution: u32, height: f32) -> Terrain {
    let mut terrain =
        Terrain::flat(frame, resolution, resolution, 2, resolution).expect("valid terrain");
    terrain.heights.fill(height);
    terrain
}

fn settings(height: HeightMergeMode, sample: SampleMode) -> CopySettings {
    CopySettings {
        height,
        height_sample: sample,
        weights: LayerMergeMode::Skip,
        mask: LayerMergeMode::Skip,
    }
}

/// Origin on the far z edge of a 4x4 footprint, turned +90 degrees about Y.
fn quarter_turn() -> Placement {
    Placement::new(Vec3::new(0.0, 0.0, 4.0), Quat::from_rotation_y(FRAC_PI_2))
}

fn all_close(field: &HeightField, value: f32) -> bool {
    field.data().iter().all(|&h| (h - value).abs() < 1e-6)
}

#[test]
fn uniform_copy_then_vertical_rescale() {
    let size = Vec3::new(2.0, 1.0, 2.0);
    let source = terrain(frame(size, Placement::default()), 3, 1.0);
    let replace = settings(HeightMergeMode::ReplaceAll, SampleMode::Rounded);

    let mut target = terrain(frame(size, Placement::default()), 3, 0.0);
    CopyRequest::new(&source, &mut target, replace)
        .execute()
        .unwrap();
    assert!(target.heights.data().iter().all(|&h| h == 1.0));

    let tall = Vec3::new(2.0, 2.0, 2.0);
    let mut taller = terrain(frame(tall, Placement::default()), 3, 0.0);
    CopyRequest::new(&source, &mut taller, replace)
        .execute()
        .unwrap();
    assert!(all_close(&taller.heights, 0.5));
}

#[test]
fn identity_transfer_reproduces_every_layer() {
    let placement = Placement::new(Vec3::new(-12.0, 3.0, 40.0), Quat::IDENTITY);
    let size = Vec3::new(16.0, 8.0, 16.0);

    let heights = HeightField::from_fn(9, |cell| ((cell.x * 7 + cell.y * 3) % 11) as f32 / 10.0);
    let data = (0..81)
        .flat_map(|i| {
            let w = (i % 5) as f32 / 4.0;
            [w, 1.0 - w]
        })
        .collect();
    let weights = WeightLayers::new(9, 2, data)
        .unwrap()
        .with_layer_ids(vec![LayerId::from("rock"), LayerId::from("snow")]);
    let mask = MaskField::from_fn(9, |cell| (cell.x + cell.y) % 3 != 0);
    let source = Terrain::new(frame(size, placement), heights, weights, mask);

    let mut target = Terrain::flat(frame(size, placement), 9, 9, 1, 9).unwrap();
    let all = CopySettings {
        height: HeightMergeMode::ReplaceAll,
        height_sample: SampleMode::Rounded,
        weights: LayerMergeMode::ReplaceAll,
        mask: LayerMergeMode::ReplaceAll,
    };
    let report = CopyRequest::new(&source, &mut target, all)
        .execute()
        .unwrap();

    assert_eq!(target, source);
    assert_eq!(report.written(), 3 * 81);
    assert_eq!(report.heights.unwrap().skipped, 0);
}

#[test]
fn interpolation_hits_grid_points_exactly() {
    // Target at twice the source resolution: every other target sample lands on a source
    // sample, where the interpolated value must equal the rounded one.
    let size = Vec3::new(4.0, 1.0, 4.0);
    let mut source = terrain(frame(size, Placement::default()), 5, 0.0);
    source.heights = HeightField::from_fn(5, |cell| (cell.x * cell.x + cell.y) as f32 / 20.0);

    let mut rounded = terrain(frame(size, Placement::default()), 9, 0.0);
    let mut interpolated = rounded.clone();
    let nearest = settings(HeightMergeMode::ReplaceAll, SampleMode::Rounded);
    let smooth = settings(HeightMergeMode::ReplaceAll, SampleMode::Interpolated);
    CopyRequest::new(&source, &mut rounded, nearest)
        .execute()
        .unwrap();
    CopyRequest::new(&source, &mut interpolated, smooth)
        .execute()
        .unwrap();

    for y in (0..9).step_by(2) {
        for x in (0..9).step_by(2) {
            let cell = UVec2::new(x, y);
            let a = *rounded.heights.get(cell).unwrap();
            let b = *interpolated.heights.get(cell).unwrap();
            let raw = *source.heights.get(cell / 2).unwrap();
            assert!((a - raw).abs() < 1e-5, "rounded {cell}");
            assert!((b - raw).abs() < 1e-5, "interpolated {cell}");
        }
    }

    // Between samples the interpolated value is the mean of its neighbours along x.
    let mid = *interpolated.heights.get(UVec2::new(3, 0)).unwrap();
    let left = *source.heights.get(UVec2::new(1, 0)).unwrap();
    let right = *source.heights.get(UVec2::new(2, 0)).unwrap();
    assert!((mid - (left + right) / 2.0).abs() < 1e-5);
}

#[test]
fn replace_area_leaves_cells_outside_range_alone() {
    let target_frame = frame(Vec3::new(8.0, 1.0, 8.0), Placement::default());
    let source_frame = frame(
        Vec3::new(3.0, 1.0, 2.0),
        Placement::from_position(Vec3::new(2.0, 0.0, 5.0)),
    );
    let mut source = terrain(source_frame, 4, 0.75);
    source.mask.fill(false);
    source.weights = WeightLayers::new(4, 2, [0.0_f32, 1.0].repeat(16)).unwrap();

    let mut target = terrain(target_frame, 9, 0.1);
    let before = target.clone();
    let request = CopySettings {
        height: HeightMergeMode::ReplaceArea,
        height_sample: SampleMode::Interpolated,
        weights: LayerMergeMode::ReplaceArea,
        mask: LayerMergeMode::ReplaceArea,
    };
    let report = CopyRequest::new(&source, &mut target, request)
        .execute()
        .unwrap();

    let region = report.heights.unwrap().region;
    assert_eq!(region, CellRegion::new(UVec2::new(2, 5), UVec2::new(5, 7)));
    assert_eq!(report.weights.unwrap().region, region);
    assert_eq!(report.mask.unwrap().region, region);

    for cell in CellRegion::full(9).cells() {
        if region.contains(cell) {
            let height = *target.heights.get(cell).unwrap();
            assert!((height - 0.75).abs() < 1e-6, "height {cell}");
            assert_eq!(
                target.weights.cell_weights(cell),
                Some(&[0.0, 1.0][..]),
                "weights {cell}"
            );
            assert_eq!(target.mask.get(cell), Some(&false), "mask {cell}");
        } else {
            assert_eq!(
                target.heights.get(cell),
                before.heights.get(cell),
                "height {cell}"
            );
            assert_eq!(
                target.weights.cell_weights(cell),
                before.weights.cell_weights(cell),
                "weights {cell}"
            );
            assert_eq!(target.mask.get(cell), before.mask.get(cell), "mask {cell}");
        }
    }
}

#[test]
fn replace_all_restores_defaults_outside_range() {
    let target_frame = frame(Vec3::new(8.0, 1.0, 8.0), Placement::default());
    let source_frame = frame(
        Vec3::new(2.0, 1.0, 2.0),
        Placement::from_position(Vec3::new(4.0, 0.0, 4.0)),
    );
    let mut source = terrain(source_frame, 3, 0.5);
    source.mask.fill(false);
    source.weights = WeightLayers::new(3, 3, [0.2_f32, 0.3, 0.5].repeat(9)).unwrap();

    let mut target = terrain(target_frame, 9, 0.9);
    target.mask.fill(false);
    target.weights = WeightLayers::new(9, 2, vec![0.5; 162]).unwrap();

    let all = CopySettings {
        height: HeightMergeMode::ReplaceAll,
        height_sample: SampleMode::Rounded,
        weights: LayerMergeMode::ReplaceAll,
        mask: LayerMergeMode::ReplaceAll,
    };
    let report = CopyRequest::new(&source, &mut target, all)
        .execute()
        .unwrap();
    let region = report.heights.unwrap().region;
    assert_eq!(region, CellRegion::new(UVec2::new(4, 4), UVec2::new(6, 6)));
    assert_eq!(target.weights.layer_count(), 3);

    for cell in CellRegion::full(9).cells() {
        if region.contains(cell) {
            continue;
        }
        let height = *target.heights.get(cell).unwrap();
        assert_eq!(height, DEFAULT_HEIGHT, "height {cell}");
        assert_eq!(
            target.weights.cell_weights(cell),
            Some(&[1.0, 0.0, 0.0][..]),
            "weights {cell}"
        );
        let solid = *target.mask.get(cell).unwrap();
        assert_eq!(solid, DEFAULT_SOLID, "mask {cell}");
    }
    assert_eq!(
        target.weights.cell_weights(UVec2::new(5, 5)),
        Some(&[0.2, 0.3, 0.5][..])
    );
    assert_eq!(target.mask.get(UVec2::new(5, 5)), Some(&false));
}

#[test]
fn blending_modes_see_only_pre_transfer_values() {
    let size = Vec3::new(4.0, 1.0, 4.0);
    let mut source = terrain(frame(size, Placement::default()), 5, 0.0);
    source.heights = HeightField::from_fn(5, |cell| cell.x as f32 / 4.0);

    let cases: [(HeightMergeMode, fn(f32, f32) -> f32); 3] = [
        (HeightMergeMode::Max, f32::max),
        (HeightMergeMode::Min, f32::min),
        (HeightMergeMode::Average, |a, b| (a + b) / 2.0),
    ];
    for (mode, combine) in cases {
        let mut target = terrain(frame(size, Placement::default()), 5, 0.0);
        target.heights = HeightField::from_fn(5, |cell| cell.y as f32 / 4.0);
        let before = target.heights.clone();
        CopyRequest::new(&source, &mut target, settings(mode, SampleMode::Rounded))
            .execute()
            .unwrap();

        for cell in CellRegion::full(5).cells() {
            let existing = *before.get(cell).unwrap();
            let sampled = *source.heights.get(cell).unwrap();
            let expected = combine(existing, sampled);
            let actual = *target.heights.get(cell).unwrap();
            assert!((actual - expected).abs() < 1e-6, "{mode:?} {cell}");
        }
    }
}

#[test]
fn quarter_turn_swaps_axes() {
    let size = Vec3::new(4.0, 1.0, 4.0);
    let target_info = frame(size, Placement::default()).grid(5);
    let source_info = frame(size, quarter_turn()).grid(5);

    // Source (x, y) lands on target (y, 4 - x).
    for (from, to) in [
        (UVec2::new(0, 0), IVec2::new(0, 4)),
        (UVec2::new(4, 0), IVec2::new(0, 0)),
        (UVec2::new(0, 4), IVec2::new(4, 4)),
        (UVec2::new(4, 4), IVec2::new(4, 0)),
        (UVec2::new(1, 3), IVec2::new(3, 3)),
    ] {
        let mapped = map_cell(from, &source_info, &target_info);
        assert_eq!(mapped.cell, to, "{from}");
    }

    // The mapping back is the inverse quarter turn.
    let back = map_cell_continuous(UVec2::new(3, 3), &target_info, &source_info);
    assert!(back.in_bounds);
    assert!(back.uv.abs_diff_eq(Vec2::new(0.25, 0.75), 1e-5));

    let region = overlap_range(&source_info, &target_info);
    assert_eq!(region, CellRegion::full(5));
}

#[test]
fn rotated_copy_moves_features_with_the_turn() {
    let size = Vec3::new(4.0, 1.0, 4.0);
    let mut source = terrain(frame(size, quarter_turn()), 5, 0.0);
    // A ridge along source x at y = 1.
    source.heights = HeightField::from_fn(5, |cell| if cell.y == 1 { 1.0 } else { 0.0 });

    let mut target = terrain(frame(size, Placement::default()), 5, 0.0);
    let replace = settings(HeightMergeMode::ReplaceArea, SampleMode::Rounded);
    CopyRequest::new(&source, &mut target, replace)
        .execute()
        .unwrap();

    // Source row y = 1 becomes target column x = 1; check interior cells, whose mapped
    // positions are well clear of the source edges.
    for y in 1..4 {
        let ridge = *target.heights.get(UVec2::new(1, y)).unwrap();
        let flat = *target.heights.get(UVec2::new(2, y)).unwrap();
        assert_eq!(ridge, 1.0, "ridge at y {y}");
        assert_eq!(flat, 0.0, "flat at y {y}");
    }
}

#[test]
fn quarter_turn_drops_one_edge_to_the_strict_bounds_check() {
    // The turned source covers the target exactly, but the f32 rotation lands one edge of
    // target samples a hair outside the source's unit square. Those cells are skipped and
    // keep the ReplaceAll default.
    let size = Vec3::new(4.0, 1.0, 4.0);
    let source = terrain(frame(size, quarter_turn()), 5, 1.0);

    for sample in [SampleMode::Rounded, SampleMode::Interpolated] {
        let mut target = terrain(frame(size, Placement::default()), 5, 0.5);
        let replace = settings(HeightMergeMode::ReplaceAll, sample);
        let report = CopyRequest::new(&source, &mut target, replace)
            .execute()
            .unwrap();

        let heights = report.heights.unwrap();
        assert_eq!(heights.region, CellRegion::full(5), "{sample:?}");
        assert_eq!(heights.written, 20, "{sample:?}");
        assert_eq!(heights.skipped, 5, "{sample:?}");

        let unwritten: Vec<UVec2> = CellRegion::full(5)
            .cells()
            .filter(|&cell| *target.heights.get(cell).unwrap() == DEFAULT_HEIGHT)
            .collect();
        assert_eq!(unwritten.len(), 5, "{sample:?}");
        let first = unwritten[0];
        let same_column = unwritten.iter().all(|cell| cell.x == first.x);
        let same_row = unwritten.iter().all(|cell| cell.y == first.y);
        assert!(same_column || same_row, "{sample:?} {unwritten:?}");
    }
}

#[test]
fn disjoint_footprints_write_nothing() {
    let size = Vec3::new(2.0, 1.0, 2.0);
    let far = Placement::from_position(Vec3::new(100.0, 0.0, 100.0));
    let source = terrain(frame(size, far), 3, 1.0);
    let mut target = terrain(frame(size, Placement::default()), 3, 0.2);
    let replace = settings(HeightMergeMode::ReplaceArea, SampleMode::Rounded);
    let report = CopyRequest::new(&source, &mut target, replace)
        .execute()
        .unwrap();
    let heights = report.heights.unwrap();
    assert_eq!(heights.written, 0);
    assert!(target.heights.data().iter().all(|&h| h == 0.2));
}
