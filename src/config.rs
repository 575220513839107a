//! Tunable settings for both tools.
//!
//! Defaults reproduce the fixed transforms: a quarter-size preview blurred
//! with sigma 6, and a 128x128 icon with 16-unit corners and no padding.
//! A YAML file passed with `--config` may override any field:
//!
//! ```yaml
//! blur:
//!   divisor: 4
//!   sigma: 6.0
//! icon:
//!   size: 128
//!   corner_radius: 16
//!   padding: 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MediaError, Result};

/// Settings for the blur preview transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurSettings {
    /// Linear downscale divisor applied to both axes.
    pub divisor: u32,

    /// Standard deviation of the Gaussian blur, in output pixels.
    pub sigma: f32,
}

impl Default for BlurSettings {
    fn default() -> Self {
        Self {
            divisor: 4,
            sigma: 6.0,
        }
    }
}

/// Geometry of the generated app icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconStyle {
    /// Width and height of the square canvas.
    pub size: u32,

    /// Corner radius of the background rectangle.
    pub corner_radius: u32,

    /// Gap between the canvas edge and the artwork.
    pub padding: u32,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            size: 128,
            corner_radius: 16,
            padding: 0,
        }
    }
}

impl IconStyle {
    /// Side of the square the artwork is fitted into.
    pub fn inner_size(&self) -> f64 {
        self.size as f64 - 2.0 * self.padding as f64
    }
}

/// All settings, as loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub blur: BlurSettings,
    pub icon: IconStyle,
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MediaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load settings from `path` if given, defaults otherwise.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file means defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self = serde_yaml::from_str(content).map_err(|e| MediaError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some("Check the YAML syntax and field names".to_string()),
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.blur.divisor == 0 {
            return Err(invalid("blur.divisor must be at least 1"));
        }
        if !(self.blur.sigma.is_finite() && self.blur.sigma > 0.0) {
            return Err(invalid("blur.sigma must be a positive number"));
        }
        if self.icon.size == 0 {
            return Err(invalid("icon.size must be at least 1"));
        }
        if self.icon.inner_size() <= 0.0 {
            return Err(invalid("icon.padding leaves no room for the artwork"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> MediaError {
    MediaError::Parse {
        message: format!("Invalid config: {}", message),
        help: None,
    }
}
