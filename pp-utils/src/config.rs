//! Portal configuration, loaded from an optional TOML file.
//!
//! Every field has a default so a partial file (or no file at all) is valid.

use std::path::{Path, PathBuf};

use bevy::ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub model: ModelConfig,
    pub overlay: OverlayConfig,
    pub page: PageConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Asset path of the glTF/GLB file, relative to the assets root.
    pub path: String,
    /// Height in world units the model is rescaled to.
    pub target_height: f32,
    /// Downward shift applied after recentering.
    pub vertical_offset: f32,
    /// Bone used as target when the asset has no skinned mesh.
    pub reference_bone: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "models/human.glb".to_string(),
            target_height: 1.9,
            vertical_offset: 1.05,
            reference_bone: "mixamorigHips".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Upward lift of each connector's control point, in pixels.
    pub connector_lift: f32,
    pub connector_width: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            connector_lift: 30.0,
            connector_width: 2.3,
        }
    }
}

/// Three-column page geometry in logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub padding: f32,
    pub side_column_width: f32,
    pub gap: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            side_column_width: 360.0,
            gap: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub fov_degrees: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    /// Radians of rotation per pixel of mouse drag.
    pub orbit_sensitivity: f32,
    pub ambient_brightness: f32,
    pub light_position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.8, 2.6],
            fov_degrees: 46.0,
            min_polar_angle: 0.4,
            max_polar_angle: std::f32::consts::PI - 0.5,
            orbit_sensitivity: 0.005,
            ambient_brightness: 400.0,
            light_position: [4.0, 5.0, 5.0],
        }
    }
}

impl PortalConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: PortalConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.model.target_height.is_finite() && self.model.target_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "model.target_height must be positive, got {}",
                self.model.target_height
            )));
        }
        if !self.model.vertical_offset.is_finite() {
            return Err(ConfigError::Invalid(
                "model.vertical_offset must be finite".to_string(),
            ));
        }
        if self.model.path.is_empty() {
            return Err(ConfigError::Invalid("model.path is empty".to_string()));
        }
        if !self.overlay.connector_lift.is_finite() {
            return Err(ConfigError::Invalid(
                "overlay.connector_lift must be finite".to_string(),
            ));
        }
        let page = &self.page;
        if [page.padding, page.side_column_width, page.gap]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::Invalid(
                "page dimensions must be finite and non-negative".to_string(),
            ));
        }
        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees out of range: {}",
                cam.fov_degrees
            )));
        }
        if !(cam.min_polar_angle < cam.max_polar_angle) {
            return Err(ConfigError::Invalid(
                "camera.min_polar_angle must be below camera.max_polar_angle".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = PortalConfig::from_toml_str("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.model.target_height, 1.9);
        assert_eq!(config.model.reference_bone, "mixamorigHips");
        assert_eq!(config.overlay.connector_lift, 30.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = PortalConfig::from_toml_str(
            r#"
            [model]
            path = "models/other.glb"

            [page]
            side_column_width = 300.0
            "#,
        )
        .unwrap();
        assert_eq!(config.model.path, "models/other.glb");
        assert_eq!(config.model.vertical_offset, 1.05);
        assert_eq!(config.page.side_column_width, 300.0);
        assert_eq!(config.page.padding, 20.0);
    }

    #[test]
    fn rejects_non_positive_target_height() {
        let err = PortalConfig::from_toml_str("[model]\ntarget_height = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(format!("{err}").contains("target_height"));
    }

    #[test]
    fn rejects_inverted_polar_limits() {
        let err = PortalConfig::from_toml_str(
            "[camera]\nmin_polar_angle = 2.0\nmax_polar_angle = 1.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = PortalConfig::from_toml_str("[model\npath = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PortalConfig::load("/nonexistent/portal.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
