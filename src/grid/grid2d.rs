use glam::UVec2;

use crate::grid::Raster;
use crate::types::TransferError;

/// Square row-major raster with one value per sample.
///
/// Cell `(x, y)` lives at index `y * resolution + x`; x runs along the terrain's local X
/// axis and y along its local Z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    resolution: u32,
    data: Vec<T>,
}

/// Normalized elevation samples in `[0, 1]`.
pub type HeightField = Grid2d<f32>;

/// Solid (`true`) / hole (`false`) samples.
pub type MaskField = Grid2d<bool>;

impl<T> Grid2d<T> {
    pub fn new(resolution: u32, data: Vec<T>) -> Result<Self, TransferError> {
        let expected_len = (resolution as usize) * (resolution as usize);
        if data.len() != expected_len {
            return Err(TransferError::InvalidMetadata(format!(
                "data length {} does not match grid size {}x{}",
                data.len(),
                resolution,
                resolution
            )));
        }

        Ok(Self { resolution, data })
    }

    pub fn filled(resolution: u32, value: T) -> Self
    where
        T: Clone,
    {
        let len = (resolution as usize) * (resolution as usize);
        Self {
            resolution,
            data: vec![value; len],
        }
    }

    /// Builds a grid by evaluating `f` at every cell.
    pub fn from_fn(resolution: u32, mut f: impl FnMut(UVec2) -> T) -> Self {
        let mut data = Vec::with_capacity((resolution as usize) * (resolution as usize));
        for y in 0..resolution {
            for x in 0..resolution {
                data.push(f(UVec2::new(x, y)));
            }
        }
        Self { resolution, data }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn get(&self, cell: UVec2) -> Option<&T> {
        if cell.x >= self.resolution || cell.y >= self.resolution {
            return None;
        }
        Some(&self.data[self.index(cell)])
    }

    pub fn set(&mut self, cell: UVec2, value: T) -> Result<(), TransferError> {
        if cell.x >= self.resolution || cell.y >= self.resolution {
            return Err(TransferError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for grid {}x{}",
                cell.x, cell.y, self.resolution, self.resolution
            )));
        }
        let idx = self.index(cell);
        self.data[idx] = value;
        Ok(())
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    #[inline]
    fn index(&self, cell: UVec2) -> usize {
        (cell.y as usize) * (self.resolution as usize) + (cell.x as usize)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> Raster for Grid2d<T> {
    fn resolution(&self) -> u32 {
        self.resolution
    }
}
