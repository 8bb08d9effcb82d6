//! Placement and cell-range types shared by the mapping and resampling code.

use glam::{Affine3A, Quat, UVec2, Vec3};
use serde::{Deserialize, Serialize};

/// World-space placement of a grid's origin corner (cell `(0, 0)`).
///
/// Grid cells extend along the local +X and +Z axes; local Y is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Placement {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Unrotated placement at `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Placement rotated about the vertical axis by `yaw` degrees.
    pub fn from_yaw_degrees(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw.to_radians()),
        }
    }

    /// Local-to-world transform.
    #[inline]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.position)
    }

    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.to_affine().transform_point3(local)
    }

    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.to_affine().inverse().transform_point3(world)
    }
}

/// Range of cell indices. Region is [min.x, max.x] x [min.y, max.y], both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRegion {
    pub min: UVec2,
    pub max: UVec2,
}

impl CellRegion {
    pub fn new(min: UVec2, max: UVec2) -> Self {
        Self { min, max }
    }

    /// Region spanning every cell of a `resolution x resolution` grid.
    pub fn full(resolution: u32) -> Self {
        let last = resolution.saturating_sub(1);
        Self {
            min: UVec2::ZERO,
            max: UVec2::splat(last),
        }
    }

    pub fn width(&self) -> u32 {
        self.max.x + 1 - self.min.x
    }

    pub fn height(&self) -> u32 {
        self.max.y + 1 - self.min.y
    }

    pub fn cell_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn contains(&self, cell: UVec2) -> bool {
        cell.cmpge(self.min).all() && cell.cmple(self.max).all()
    }

    /// Cells in row-major order (y outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = UVec2> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| UVec2::new(x, y)))
    }
}
