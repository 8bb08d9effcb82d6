//! YAML configuration for copy settings.
//!
//! ```yaml
//! height: max            # skip | none | replace_all | replace_area | max | min | average
//! height_sample: rounded # rounded | interpolated
//! weights: replace_area  # skip | none | replace_all | replace_area
//! mask: none
//! ```
//!
//! Omitted keys take the defaults of [`CopySettings`].

use std::path::Path;

use crate::transfer::CopySettings;
use crate::types::TransferError;

impl CopySettings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TransferError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, TransferError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Reads [`CopySettings`] from a YAML file.
pub fn load_copy_settings(path: impl AsRef<Path>) -> Result<CopySettings, TransferError> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path)?;
    let settings = CopySettings::from_yaml_str(&yaml)?;
    tracing::info!(
        target: "terrain_copy::config",
        path = %path.display(),
        ?settings,
        "copy_settings.loaded=file"
    );
    Ok(settings)
}
