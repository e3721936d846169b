//! Scripted sessions: a TOML list of input, tracking and options-UI steps

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use placekit::{NodeId, PlacementMode, PlaneExtent, ScreenPoint, Transform, Vec3};

/// A recorded or hand-written session
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Camera pose before the first step; absent means tracking has not
    /// initialized yet
    #[serde(default)]
    pub viewpoint: Option<Transform>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One scripted event
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    StartSession,
    PauseSession,
    SetMode { mode: PlacementMode },
    Select {
        name: String,
        #[serde(default)]
        asset: Option<String>,
    },
    Deselect,
    /// Make `point` hit an existing surface at `world`
    Surface { point: ScreenPoint, world: Vec3 },
    /// Move the tracked camera; omit `transform` to lose tracking
    Viewpoint {
        #[serde(default)]
        transform: Option<Transform>,
    },
    GestureBegin { point: ScreenPoint },
    GestureMove { point: ScreenPoint },
    GestureEnd,
    PlaneAdded {
        id: String,
        extent: PlaneExtent,
        #[serde(default)]
        center: Vec3,
    },
    PlaneUpdated {
        id: String,
        extent: PlaneExtent,
        #[serde(default)]
        center: Vec3,
    },
    ImageAdded { id: String, node: NodeId },
    AnchorRemoved { id: String },
    TogglePlanes,
    Undo,
    Reset,
}

impl Step {
    /// Short label used in logs and the report
    pub fn label(&self) -> &'static str {
        match self {
            Step::StartSession => "start_session",
            Step::PauseSession => "pause_session",
            Step::SetMode { .. } => "set_mode",
            Step::Select { .. } => "select",
            Step::Deselect => "deselect",
            Step::Surface { .. } => "surface",
            Step::Viewpoint { .. } => "viewpoint",
            Step::GestureBegin { .. } => "gesture_begin",
            Step::GestureMove { .. } => "gesture_move",
            Step::GestureEnd => "gesture_end",
            Step::PlaneAdded { .. } => "plane_added",
            Step::PlaneUpdated { .. } => "plane_updated",
            Step::ImageAdded { .. } => "image_added",
            Step::AnchorRemoved { .. } => "anchor_removed",
            Step::TogglePlanes => "toggle_planes",
            Step::Undo => "undo",
            Step::Reset => "reset",
        }
    }
}

impl Scenario {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid scenario")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("In {}", path.display()))
    }
}
