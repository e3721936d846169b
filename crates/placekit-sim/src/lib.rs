//! placekit-sim: replays scripted sessions through the placement engine
//!
//! Tracking, hit testing and rendering are served by the in-memory
//! collaborators from `placekit::sim`; the result of a replay is a
//! [`Report`] describing what ended up in the scene.

pub mod scenario;

use serde::Serialize;
use tracing::{debug, info};

use placekit::sim::{SimQuery, SimScene, SimTracking};
use placekit::{
    EngineConfig, GestureEvent, PlacedObject, PlacementEngine, PlacementMode, Prototype,
    SurfaceOverlay,
};

pub use scenario::{Scenario, Step};

/// Something that changed the placement history
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryChange {
    Placed { step: usize, object: PlacedObject },
    Undone { step: usize, object: PlacedObject },
    Reset { step: usize, removed: usize },
}

/// Outcome of a replay
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: PlacementMode,
    pub overlays_visible: bool,
    pub tracking_running: bool,
    pub tracking_runs: usize,
    /// Placement history at the end, oldest first
    pub history: Vec<PlacedObject>,
    pub overlays: Vec<SurfaceOverlay>,
    pub scene_nodes: usize,
    pub changes: Vec<HistoryChange>,
}

/// Run every step of `scenario` through a fresh engine
pub fn replay(scenario: &Scenario, config: EngineConfig) -> Report {
    let tracking = match scenario.viewpoint {
        Some(viewpoint) => SimTracking::with_viewpoint(viewpoint),
        None => SimTracking::new(),
    };
    let mut engine = PlacementEngine::new(config, tracking, SimQuery::new(), SimScene::new());
    let mut changes = Vec::new();

    for (index, step) in scenario.steps.iter().enumerate() {
        debug!("Step {}: {}", index, step.label());
        let placed = match step {
            Step::StartSession => {
                engine.start_session();
                None
            }
            Step::PauseSession => {
                engine.pause_session();
                None
            }
            Step::SetMode { mode } => {
                engine.set_mode(*mode);
                None
            }
            Step::Select { name, asset } => {
                let prototype = match asset {
                    Some(asset) => Prototype::new(name.clone()).with_asset(asset.clone()),
                    None => Prototype::new(name.clone()),
                };
                engine.object_selected(prototype);
                None
            }
            Step::Deselect => {
                engine.clear_prototype();
                None
            }
            Step::Surface { point, world } => {
                engine.query_mut().add_surface_hit(*point, *world);
                None
            }
            Step::Viewpoint { transform } => {
                engine.tracking_mut().set_viewpoint(*transform);
                None
            }
            Step::GestureBegin { point } => {
                engine.handle_gesture(GestureEvent::Begin { point: *point })
            }
            Step::GestureMove { point } => {
                engine.handle_gesture(GestureEvent::Move { point: *point })
            }
            Step::GestureEnd => engine.handle_gesture(GestureEvent::End),
            Step::PlaneAdded { id, extent, center } => {
                engine.on_plane_anchor_added(id, *extent, *center);
                None
            }
            Step::PlaneUpdated { id, extent, center } => {
                engine.on_plane_anchor_updated(id, *extent, *center);
                None
            }
            Step::ImageAdded { id, node } => engine.on_image_anchor_added(id, *node),
            Step::AnchorRemoved { id } => {
                engine.on_anchor_removed(id);
                None
            }
            Step::TogglePlanes => {
                engine.toggle_plane_visualization();
                None
            }
            Step::Undo => {
                if let Some(object) = engine.undo_last_object() {
                    changes.push(HistoryChange::Undone { step: index, object });
                }
                None
            }
            Step::Reset => {
                let removed = engine.history().len();
                engine.reset_scene();
                changes.push(HistoryChange::Reset { step: index, removed });
                None
            }
        };
        if let Some(object) = placed {
            changes.push(HistoryChange::Placed { step: index, object });
        }
    }

    let report = Report {
        mode: engine.mode(),
        overlays_visible: engine.overlays_visible(),
        tracking_running: engine.tracking().is_running(),
        tracking_runs: engine.tracking().runs().len(),
        history: engine.history().iter().cloned().collect(),
        overlays: engine.anchors().overlays().to_vec(),
        scene_nodes: engine.scene().node_count(),
        changes,
    };
    info!(
        "Replayed {} steps: {} objects placed, {} overlays",
        scenario.steps.len(),
        report.history.len(),
        report.overlays.len()
    );
    report
}
