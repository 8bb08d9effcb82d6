//! Grayscale previews of terrain layers.
//!
//! Images are oriented like typical map images: the grid's y = 0 row (lowest in terrain
//! coordinates) is written to the **bottom** of the image.

use glam::UVec2;
use image::{GrayImage, ImageBuffer, Luma};

use crate::grid::{Grid2d, HeightField, MaskField, WeightLayers};

/// 16-bit grayscale image, the usual interchange format for height maps.
pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Heights as 8-bit gray: 0.0 is black, 1.0 is white. Values are clamped to `[0, 1]`.
pub fn height_field_to_image(field: &HeightField) -> GrayImage {
    unit_grid_to_image(field)
}

/// Heights as 16-bit gray, lossless enough to round-trip through
/// [`crate::loaders::height_field_from_image`].
pub fn height_field_to_image16(field: &HeightField) -> Gray16Image {
    let resolution = field.resolution();
    let mut img = Gray16Image::new(resolution, resolution);
    for y_img in 0..resolution {
        let y_grid = resolution - 1 - y_img;
        for x in 0..resolution {
            let value = *field.get(UVec2::new(x, y_grid)).unwrap_or(&0.0);
            let px = (value.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16;
            img.put_pixel(x, y_img, Luma([px]));
        }
    }
    img
}

/// Solid cells white, holes black.
pub fn mask_to_image(mask: &MaskField) -> GrayImage {
    let resolution = mask.resolution();
    let mut img = GrayImage::new(resolution, resolution);
    for y_img in 0..resolution {
        let y_grid = resolution - 1 - y_img;
        for x in 0..resolution {
            let solid = mask.get(UVec2::new(x, y_grid)).copied().unwrap_or(true);
            img.put_pixel(x, y_img, Luma([if solid { 255 } else { 0 }]));
        }
    }
    img
}

/// One weight layer as 8-bit gray, or `None` if the layer does not exist.
pub fn weight_layer_to_image(weights: &WeightLayers, layer: usize) -> Option<GrayImage> {
    weights.layer(layer).map(|plane| unit_grid_to_image(&plane))
}

fn unit_grid_to_image(grid: &Grid2d<f32>) -> GrayImage {
    let resolution = grid.resolution();
    let mut img = GrayImage::new(resolution, resolution);
    for y_img in 0..resolution {
        // Flip vertically so the image reads like a top-down map.
        let y_grid = resolution - 1 - y_img;
        for x in 0..resolution {
            let value = *grid.get(UVec2::new(x, y_grid)).unwrap_or(&0.0);
            img.put_pixel(x, y_img, Luma([unit_to_gray(value)]));
        }
    }
    img
}

fn unit_to_gray(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
