//! # Viewer Configuration
//!
//! All tunables of the AR viewer in one serde-backed structure. Every field
//! has a default, so an empty JSON object (or no file at all) yields the stock
//! behavior: a half-meter helmet, editable between 0.2x and 0.75x scale, with
//! depth enabled when the device supports it.
//!
//! ```
//! use anchorview::config::ViewerConfig;
//!
//! let config = ViewerConfig::from_json_str(r#"{ "model": { "target_size": 0.3 } }"#).unwrap();
//! assert_eq!(config.model.target_size, 0.3);
//! assert_eq!(config.model.default_model, "models/damaged_helmet.glb");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tracking::{InstantPlacementMode, LightEstimationMode};

/// Built-in model shown when the host does not name one
pub const DEFAULT_MODEL: &str = "models/damaged_helmet.glb";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model: ModelSettings,
    pub hit_test: HitTestSettings,
    pub prompts: PromptSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub default_model: String,
    /// Longest edge of a freshly placed model, in meters
    pub target_size: f32,
    /// Inclusive uniform scale range while editing
    pub scale_range: [f32; 2],
    /// RGBA color of the selection box
    pub bounding_box_color: [f32; 4],
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            target_size: 0.5,
            scale_range: [0.2, 0.75],
            bounding_box_color: [1.0, 1.0, 1.0, 0.5],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestSettings {
    pub accept_depth_points: bool,
    pub accept_feature_points: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    pub scan_surface: String,
    pub tap_to_add: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            scan_surface: "Point your phone down at an empty space, and move it around slowly"
                .to_string(),
            tap_to_add: "Tap anywhere to add model".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub depth_when_supported: bool,
    pub instant_placement: InstantPlacementMode,
    pub light_estimation: LightEstimationMode,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            depth_when_supported: true,
            instant_placement: InstantPlacementMode::LocalYUp,
            light_estimation: LightEstimationMode::EnvironmentalHdr,
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let model = &self.model;
        if model.default_model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "model.default_model",
                reason: "must not be empty".to_string(),
            });
        }
        if !(model.target_size.is_finite() && model.target_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "model.target_size",
                reason: format!("must be positive, got {}", model.target_size),
            });
        }
        let [min, max] = model.scale_range;
        if !(min > 0.0 && min <= max && max.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "model.scale_range",
                reason: format!("expected 0 < min <= max, got [{min}, {max}]"),
            });
        }
        if model
            .bounding_box_color
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
        {
            return Err(ConfigError::Invalid {
                field: "model.bounding_box_color",
                reason: "channels must lie in [0, 1]".to_string(),
            });
        }
        Ok(())
    }

    /// Scale range as a tuple
    pub fn scale_range(&self) -> (f32, f32) {
        (self.model.scale_range[0], self.model.scale_range[1])
    }
}
