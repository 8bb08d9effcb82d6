/// Elevation written outside the overlap range by a height `ReplaceAll`.
pub const DEFAULT_HEIGHT: f32 = 0.0;
/// Mask value written outside the overlap range by a mask `ReplaceAll` (solid, no hole).
pub const DEFAULT_SOLID: bool = true;
/// Weight given to layer 0 when a weight buffer is rebuilt from scratch.
pub const BASE_LAYER_WEIGHT: f32 = 1.0;

/// Smallest resolution that still has one cell division per side.
pub const MIN_RESOLUTION: u32 = 2;
