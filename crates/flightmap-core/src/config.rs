use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consts::{
    APP_DIR_NAME, COVERAGE_ZOOM_OUT_SCALE, DEFAULT_EXPORT_FILE_NAME, FLIGHT_PATH_ZOOM_OUT_SCALE,
    MAX_RANDOM_SCALE, MIN_GRATICULE_SPACING_DEG, MIN_RANDOM_SCALE, RANDOM_ZOOM_OUT_SCALE,
    TRANSITION_MILLIS,
};
use crate::error::{FlightMapError, Result};

const CONFIG_FILE_NAME: &str = "config.toml";

/// RGBA colour with straight (unmultiplied) alpha.
pub type Rgba = [u8; 4];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub viewpoint: ViewpointConfig,
    #[serde(default)]
    pub overlays: OverlayConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub basemap: BasemapConfig,
}

/// Bounds and timing of the random viewpoint jump.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewpointConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_out_scale: f64,
    /// Duration of each animation phase.
    pub transition_ms: u64,
}

impl Default for ViewpointConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_RANDOM_SCALE,
            max_scale: MAX_RANDOM_SCALE,
            zoom_out_scale: RANDOM_ZOOM_OUT_SCALE,
            transition_ms: TRANSITION_MILLIS,
        }
    }
}

impl ViewpointConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Zoom behaviour and default styling of the two overlay slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub flight_path_zoom_out_scale: f64,
    pub coverage_zoom_out_scale: f64,
    pub transition_ms: u64,
    pub flight_path_color: Rgba,
    pub flight_path_width: f32,
    pub coverage_stroke_color: Rgba,
    pub coverage_fill_color: Rgba,
    pub coverage_width: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            flight_path_zoom_out_scale: FLIGHT_PATH_ZOOM_OUT_SCALE,
            coverage_zoom_out_scale: COVERAGE_ZOOM_OUT_SCALE,
            transition_ms: TRANSITION_MILLIS,
            flight_path_color: [255, 196, 0, 255],
            flight_path_width: 3.0,
            coverage_stroke_color: [0, 170, 255, 255],
            coverage_fill_color: [0, 170, 255, 70],
            coverage_width: 1.5,
        }
    }
}

impl OverlayConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Where "Save Image" writes its PNG.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
    /// Overrides the platform pictures directory.
    pub directory: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            directory: None,
        }
    }
}

/// Colours of the built-in graticule basemap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasemapConfig {
    pub background: Rgba,
    pub world: Rgba,
    pub graticule: Rgba,
    pub graticule_spacing_deg: f64,
}

impl Default for BasemapConfig {
    fn default() -> Self {
        Self {
            background: [18, 22, 30, 255],
            world: [22, 52, 84, 255],
            graticule: [120, 150, 180, 90],
            graticule_spacing_deg: 15.0,
        }
    }
}

impl AppConfig {
    /// `<config dir>/flightmap/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when it exists and is valid, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring invalid config");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.viewpoint;
        for (name, scale) in [
            ("viewpoint.min_scale", v.min_scale),
            ("viewpoint.max_scale", v.max_scale),
            ("viewpoint.zoom_out_scale", v.zoom_out_scale),
            ("overlays.flight_path_zoom_out_scale", self.overlays.flight_path_zoom_out_scale),
            ("overlays.coverage_zoom_out_scale", self.overlays.coverage_zoom_out_scale),
        ] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(FlightMapError::InvalidConfig(format!(
                    "{name} must be a positive number, got {scale}"
                )));
            }
        }
        if v.min_scale > v.max_scale {
            return Err(FlightMapError::InvalidConfig(format!(
                "viewpoint.min_scale ({}) exceeds viewpoint.max_scale ({})",
                v.min_scale, v.max_scale
            )));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(FlightMapError::InvalidConfig(
                "export.file_name must not be empty".into(),
            ));
        }
        let spacing = self.basemap.graticule_spacing_deg;
        if !spacing.is_finite() || spacing < MIN_GRATICULE_SPACING_DEG {
            return Err(FlightMapError::InvalidConfig(format!(
                "basemap.graticule_spacing_deg must be at least \
                 {MIN_GRATICULE_SPACING_DEG}, got {spacing}"
            )));
        }
        Ok(())
    }
}
