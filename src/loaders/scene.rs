//! YAML description of a source/target terrain pair.
//!
//! ```yaml
//! source:
//!   world_size: [64.0, 20.0, 64.0]
//!   position: [16.0, 0.0, 16.0]
//!   yaw_degrees: 90.0
//!   heightmap: hill.png        # relative to the yaml file
//!   layers: [rock, grass]
//! target:
//!   world_size: [256.0, 40.0, 256.0]
//!   height_resolution: 257     # flat terrain when no heightmap is given
//! settings:
//!   height: max
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;

use crate::grid::{HeightField, LayerId, MaskField, WeightLayers};
use crate::loaders::heightmap::{height_field_from_image, mask_from_image};
use crate::transfer::{CopyRequest, CopySettings, Terrain, TransferReport};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_SOLID, Placement, SurfaceFrame, TransferError};

#[derive(Debug, Deserialize)]
struct SceneDescription {
    source: TerrainDescription,
    target: TerrainDescription,
    #[serde(default)]
    settings: CopySettings,
}

#[derive(Debug, Deserialize)]
struct TerrainDescription {
    #[serde(deserialize_with = "deserialize_world_size")]
    world_size: [f32; 3],
    #[serde(default)]
    position: [f32; 3],
    #[serde(default)]
    yaw_degrees: f32,
    #[serde(default)]
    heightmap: Option<String>,
    #[serde(default)]
    height_resolution: Option<u32>,
    /// Defaults to the height resolution.
    #[serde(default)]
    weight_resolution: Option<u32>,
    #[serde(default = "default_layers")]
    layers: Vec<LayerId>,
    #[serde(default)]
    mask: Option<String>,
    /// Defaults to the height resolution. Ignored when `mask` is set.
    #[serde(default)]
    mask_resolution: Option<u32>,
}

fn default_layers() -> Vec<LayerId> {
    vec![LayerId::from("base")]
}

fn deserialize_world_size<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <[f32; 3]>::deserialize(deserializer)?;
    if value.iter().all(|component| component.is_finite() && *component > 0.0) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("world_size components must be positive"))
    }
}

/// A terrain pair ready to be transferred.
#[derive(Debug, Clone)]
pub struct Scene {
    pub source: Terrain,
    pub target: Terrain,
    pub settings: CopySettings,
}

impl Scene {
    pub fn request(&mut self) -> CopyRequest<'_> {
        CopyRequest::new(&self.source, &mut self.target, self.settings)
    }

    pub fn execute(&mut self) -> Result<TransferReport, TransferError> {
        self.request().execute()
    }
}

pub fn load_scene(yaml_path: impl AsRef<Path>) -> Result<Scene, TransferError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let description: SceneDescription = serde_yaml::from_str(&yaml_str)?;

    let scene = Scene {
        source: build_terrain(yaml_path, &description.source)?,
        target: build_terrain(yaml_path, &description.target)?,
        settings: description.settings,
    };
    tracing::info!(
        target: "terrain_copy::config",
        path = %yaml_path.display(),
        source_resolution = scene.source.heights.resolution(),
        target_resolution = scene.target.heights.resolution(),
        "scene.loaded=file"
    );
    Ok(scene)
}

fn build_terrain(
    yaml_path: &Path,
    description: &TerrainDescription,
) -> Result<Terrain, TransferError> {
    let position = Vec3::from_array(description.position);
    let frame = SurfaceFrame::new(
        Vec3::from_array(description.world_size),
        Placement::from_yaw_degrees(position, description.yaw_degrees),
    );

    let heights = match (&description.heightmap, description.height_resolution) {
        (Some(image), _) => height_field_from_image(resolve_image_path(yaml_path, image))?,
        (None, Some(resolution)) => HeightField::filled(resolution, DEFAULT_HEIGHT),
        (None, None) => {
            return Err(TransferError::InvalidMetadata(
                "terrain needs either a heightmap or a height_resolution".to_string(),
            ));
        }
    };
    let resolution = heights.resolution();

    let weights = WeightLayers::with_base_layer(
        description.weight_resolution.unwrap_or(resolution),
        description.layers.len(),
    )?
    .with_layer_ids(description.layers.clone());

    let mask_resolution = description.mask_resolution.unwrap_or(resolution);
    let mask = match &description.mask {
        Some(image) => mask_from_image(resolve_image_path(yaml_path, image))?,
        None => MaskField::filled(mask_resolution, DEFAULT_SOLID),
    };

    Ok(Terrain::new(frame, heights, weights, mask))
}

fn resolve_image_path(yaml_path: &Path, image_ref: &str) -> PathBuf {
    let image_path = PathBuf::from(image_ref);
    if image_path.is_absolute() {
        return image_path;
    }

    match yaml_path.parent() {
        Some(parent) => parent.join(image_path),
        None => image_path,
    }
}
