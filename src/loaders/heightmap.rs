use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::grid::{HeightField, MaskField};
use crate::types::TransferError;

/// Loads a square grayscale image as normalized heights.
///
/// 8-bit and 16-bit images are both accepted; full white maps to 1.0. The bottom image row
/// becomes grid row y = 0.
pub fn height_field_from_image(path: impl AsRef<Path>) -> Result<HeightField, TransferError> {
    let image = image::open(path.as_ref())?;
    height_field_from_dynamic(&image)
}

pub fn height_field_from_dynamic(image: &DynamicImage) -> Result<HeightField, TransferError> {
    let resolution = square_side(image)?;
    let luma = image.to_luma16();

    let mut data = vec![0.0; (resolution as usize) * (resolution as usize)];
    for (x, y, pixel) in luma.enumerate_pixels() {
        let grid_y = resolution - y - 1;
        let idx = (grid_y as usize) * (resolution as usize) + (x as usize);
        data[idx] = pixel.0[0] as f32 / u16::MAX as f32;
    }

    HeightField::new(resolution, data)
}

/// Loads a square image as a hole mask: pixels at or above mid gray are solid.
pub fn mask_from_image(path: impl AsRef<Path>) -> Result<MaskField, TransferError> {
    let image = image::open(path.as_ref())?;
    let resolution = square_side(&image)?;
    let luma = image.to_luma8();

    let mut data = vec![true; (resolution as usize) * (resolution as usize)];
    for (x, y, pixel) in luma.enumerate_pixels() {
        let grid_y = resolution - y - 1;
        let idx = (grid_y as usize) * (resolution as usize) + (x as usize);
        data[idx] = pixel.0[0] >= 128;
    }

    MaskField::new(resolution, data)
}

fn square_side(image: &DynamicImage) -> Result<u32, TransferError> {
    let (width, height) = image.dimensions();
    if width != height {
        return Err(TransferError::InvalidMetadata(format!(
            "terrain images must be square, got {width}x{height}"
        )));
    }
    Ok(width)
}
