//! Configuration file handling.
//!
//! Settings live in an INI file at `<config dir>/geoveil/config.ini`:
//!
//! ```ini
//! [masking]
//! min_radius_m = 100
//! max_radius_m = 300
//! disclosure_floor_m = 120
//!
//! [projection]
//! marker_inset_px = 8
//! cull_margin = 0.25
//!
//! [logging]
//! level = info
//! file =
//! ```
//!
//! A missing file yields defaults. Missing keys fall back to their defaults
//! individually; present but unparsable values are an error.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;

use crate::error::{GeoError, GeoResult};
use crate::logging::{parse_level, LoggingConfig};
use crate::mask::{
    Masker, RadiusBounds, DEFAULT_DISCLOSURE_FLOOR_M, DEFAULT_MAX_RADIUS_M, DEFAULT_MIN_RADIUS_M,
};
use crate::projection::{
    Projector, Region, Viewport, DEFAULT_CULL_MARGIN, DEFAULT_MARKER_INSET_PX,
};

const SECTION_MASKING: &str = "masking";
const SECTION_PROJECTION: &str = "projection";
const SECTION_LOGGING: &str = "logging";

/// Path of the user configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("geoveil")
        .join("config.ini")
}

/// `[masking]` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskingSettings {
    pub min_radius_m: f64,
    pub max_radius_m: f64,
    pub disclosure_floor_m: f64,
}

impl Default for MaskingSettings {
    fn default() -> Self {
        Self {
            min_radius_m: DEFAULT_MIN_RADIUS_M,
            max_radius_m: DEFAULT_MAX_RADIUS_M,
            disclosure_floor_m: DEFAULT_DISCLOSURE_FLOOR_M,
        }
    }
}

/// `[projection]` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionSettings {
    pub marker_inset_px: f64,
    pub cull_margin: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            marker_inset_px: DEFAULT_MARKER_INSET_PX,
            cull_margin: DEFAULT_CULL_MARGIN,
        }
    }
}

/// The complete configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub masking: MaskingSettings,
    pub projection: ProjectionSettings,
    pub logging: LoggingConfig,
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> GeoResult<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, returning defaults if it does not exist.
    pub fn load_from(path: &Path) -> GeoResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        let mut config = Self::default();

        // Apply every present key through the same validation as `config set`
        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }

        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> GeoResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> GeoResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini.write_to_file(path)?;
        Ok(())
    }

    /// Build a masker from the `[masking]` section.
    pub fn masker(&self) -> Masker {
        Masker::new(RadiusBounds::new(
            self.masking.min_radius_m,
            self.masking.max_radius_m,
        ))
        .with_disclosure_floor(self.masking.disclosure_floor_m)
    }

    /// Build a viewport of the given size using the configured inset.
    pub fn viewport(&self, width_px: f64, height_px: f64) -> Viewport {
        Viewport::new(width_px, height_px).with_inset(self.projection.marker_inset_px)
    }

    /// Build a projector for a region shown at the given size.
    pub fn projector(&self, region: Region, width_px: f64, height_px: f64) -> Projector {
        Projector::new(region, self.viewport(width_px, height_px))
            .with_cull_margin(self.projection.cull_margin)
    }
}

/// A single addressable setting, written `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    MaskingMinRadius,
    MaskingMaxRadius,
    MaskingDisclosureFloor,
    ProjectionMarkerInset,
    ProjectionCullMargin,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::MaskingMinRadius,
            ConfigKey::MaskingMaxRadius,
            ConfigKey::MaskingDisclosureFloor,
            ConfigKey::ProjectionMarkerInset,
            ConfigKey::ProjectionCullMargin,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::MaskingMinRadius
            | ConfigKey::MaskingMaxRadius
            | ConfigKey::MaskingDisclosureFloor => SECTION_MASKING,
            ConfigKey::ProjectionMarkerInset | ConfigKey::ProjectionCullMargin => {
                SECTION_PROJECTION
            }
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => SECTION_LOGGING,
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::MaskingMinRadius => "min_radius_m",
            ConfigKey::MaskingMaxRadius => "max_radius_m",
            ConfigKey::MaskingDisclosureFloor => "disclosure_floor_m",
            ConfigKey::ProjectionMarkerInset => "marker_inset_px",
            ConfigKey::ProjectionCullMargin => "cull_margin",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::MaskingMinRadius => config.masking.min_radius_m.to_string(),
            ConfigKey::MaskingMaxRadius => config.masking.max_radius_m.to_string(),
            ConfigKey::MaskingDisclosureFloor => config.masking.disclosure_floor_m.to_string(),
            ConfigKey::ProjectionMarkerInset => config.projection.marker_inset_px.to_string(),
            ConfigKey::ProjectionCullMargin => config.projection.cull_margin.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate and apply a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> GeoResult<()> {
        match self {
            ConfigKey::MaskingMinRadius => {
                config.masking.min_radius_m = parse_positive(self, value)?;
            }
            ConfigKey::MaskingMaxRadius => {
                config.masking.max_radius_m = parse_positive(self, value)?;
            }
            ConfigKey::MaskingDisclosureFloor => {
                config.masking.disclosure_floor_m = parse_non_negative(self, value)?;
            }
            ConfigKey::ProjectionMarkerInset => {
                config.projection.marker_inset_px = parse_non_negative(self, value)?;
            }
            ConfigKey::ProjectionCullMargin => {
                config.projection.cull_margin = parse_non_negative(self, value)?;
            }
            ConfigKey::LoggingLevel => {
                parse_level(value)?;
                config.logging.level = value.trim().to_lowercase();
            }
            ConfigKey::LoggingFile => {
                let trimmed = value.trim();
                config.logging.file = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s.trim())
            .ok_or_else(|| GeoError::Config(format!("unknown configuration key '{}'", s)))
    }
}

fn parse_number(key: &ConfigKey, value: &str) -> GeoResult<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| GeoError::Config(format!("{}: '{}' is not a number", key, value)))?;
    if !parsed.is_finite() {
        return Err(GeoError::Config(format!("{}: '{}' is not finite", key, value)));
    }
    Ok(parsed)
}

fn parse_positive(key: &ConfigKey, value: &str) -> GeoResult<f64> {
    let v = parse_number(key, value)?;
    if v <= 0.0 {
        return Err(GeoError::Config(format!("{}: must be greater than 0", key)));
    }
    Ok(v)
}

fn parse_non_negative(key: &ConfigKey, value: &str) -> GeoResult<f64> {
    let v = parse_number(key, value)?;
    if v < 0.0 {
        return Err(GeoError::Config(format!("{}: must not be negative", key)));
    }
    Ok(v)
}
