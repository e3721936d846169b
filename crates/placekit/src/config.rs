//! Engine configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! continuity_threshold = 0.05
//! freeform_distance = 0.2
//! initial_mode = "freeform"
//! image_catalog = "AR Resources"
//! clear_gesture_on_begin = true
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlacekitError, Result};
use crate::mode::PlacementMode;

/// Default minimum distance between two placements within one gesture
pub const DEFAULT_CONTINUITY_THRESHOLD: f32 = 0.05;
/// Default distance in front of the viewpoint for freeform placement
pub const DEFAULT_FREEFORM_DISTANCE: f32 = 0.2;
/// Default reference image group requested in image-triggered mode
pub const DEFAULT_IMAGE_CATALOG: &str = "AR Resources";

/// Tunables for a [`PlacementEngine`](crate::PlacementEngine) session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Placements closer than this to the previous one in the same gesture are skipped
    pub continuity_threshold: f32,
    /// Forward offset from the viewpoint used in freeform mode
    pub freeform_distance: f32,
    /// Mode applied when the engine is created
    pub initial_mode: PlacementMode,
    /// Reference image group handed to the tracking provider in image-triggered mode
    pub image_catalog: String,
    /// Clear a stale last-placement position when a new gesture begins
    pub clear_gesture_on_begin: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            continuity_threshold: DEFAULT_CONTINUITY_THRESHOLD,
            freeform_distance: DEFAULT_FREEFORM_DISTANCE,
            initial_mode: PlacementMode::default(),
            image_catalog: DEFAULT_IMAGE_CATALOG.to_string(),
            clear_gesture_on_begin: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PlacekitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded engine config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Platform config location, e.g. `~/.config/placekit/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "placekit").ok_or(PlacekitError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load the file at `default_path()` if it exists, defaults otherwise
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load(path),
            Ok(_) | Err(PlacekitError::NoConfigDir) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Reject values that would make placement decisions meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.continuity_threshold.is_finite() || self.continuity_threshold < 0.0 {
            return Err(PlacekitError::InvalidConfig {
                field: "continuity_threshold",
                reason: format!(
                    "must be a finite, non-negative distance (got {})",
                    self.continuity_threshold
                ),
            });
        }
        if !self.freeform_distance.is_finite() || self.freeform_distance < 0.0 {
            return Err(PlacekitError::InvalidConfig {
                field: "freeform_distance",
                reason: format!(
                    "must be a finite, non-negative distance (got {})",
                    self.freeform_distance
                ),
            });
        }
        if self.image_catalog.trim().is_empty() {
            return Err(PlacekitError::InvalidConfig {
                field: "image_catalog",
                reason: "must name a reference image group".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.continuity_threshold, 0.05);
        assert_eq!(config.freeform_distance, 0.2);
        assert_eq!(config.initial_mode, PlacementMode::Freeform);
        assert!(config.clear_gesture_on_begin);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            continuity_threshold = 0.1
            initial_mode = "surface-constrained"
            "#,
        )
        .unwrap();
        assert_eq!(config.continuity_threshold, 0.1);
        assert_eq!(config.initial_mode, PlacementMode::SurfaceConstrained);
        assert_eq!(config.freeform_distance, DEFAULT_FREEFORM_DISTANCE);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = EngineConfig::from_toml_str("continuity_threshold = -1.0").unwrap_err();
        assert!(matches!(
            err,
            PlacekitError::InvalidConfig { field: "continuity_threshold", .. }
        ));
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let err = EngineConfig::from_toml_str("initial_mode = \"orbit\"").unwrap_err();
        assert!(matches!(err, PlacekitError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "freeform_distance = 0.5").unwrap();
        writeln!(file, "image_catalog = \"Posters\"").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.freeform_distance, 0.5);
        assert_eq!(config.image_catalog, "Posters");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
