//! Placement modes and the tracking setup each one requires

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tracking::{ImageCatalog, TrackingConfiguration};

/// How input gestures resolve to placement positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementMode {
    /// Place a fixed distance in front of the viewpoint, once per gesture
    #[default]
    Freeform,
    /// Place on detected surfaces under the pointer while dragging
    SurfaceConstrained,
    /// Place only when a reference image is recognized
    ImageTriggered,
}

impl PlacementMode {
    /// All modes, in menu order
    pub const ALL: [PlacementMode; 3] = [
        PlacementMode::Freeform,
        PlacementMode::SurfaceConstrained,
        PlacementMode::ImageTriggered,
    ];

    /// Tracking setup for this mode. Plane detection is always requested;
    /// image detection only when placement is image-triggered.
    pub fn tracking_configuration(&self, catalog: &str) -> TrackingConfiguration {
        let image_detection = match self {
            PlacementMode::ImageTriggered => Some(ImageCatalog::new(catalog)),
            PlacementMode::Freeform | PlacementMode::SurfaceConstrained => None,
        };
        TrackingConfiguration {
            plane_detection: true,
            image_detection,
        }
    }

    /// Whether surface overlays are shown when entering this mode
    pub fn shows_overlays(&self) -> bool {
        matches!(self, PlacementMode::SurfaceConstrained)
    }

    /// Get mode name
    pub fn name(&self) -> &'static str {
        match self {
            PlacementMode::Freeform => "freeform",
            PlacementMode::SurfaceConstrained => "surface-constrained",
            PlacementMode::ImageTriggered => "image-triggered",
        }
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlacementMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlacementMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| format!("unknown placement mode `{}`", s))
    }
}
