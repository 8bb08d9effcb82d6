pub mod heightmap;
pub mod scene;

pub use heightmap::{height_field_from_dynamic, height_field_from_image, mask_from_image};
pub use scene::{Scene, load_scene};
