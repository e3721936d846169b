//! Placement engine: mode, selection and gesture state for one tracking session
//!
//! The engine is created at session start, owns its collaborators and all
//! placement state, and is only mutated through the methods below. Every
//! call is synchronous; a call that lacks its precondition (no prototype,
//! no viewpoint, no surface hit, nothing to undo) returns without effect.

use tracing::{debug, info, trace};

use crate::anchor::{PlaneExtent, SpatialAnchorRegistry, SurfaceOverlay};
use crate::config::EngineConfig;
use crate::continuity::ContinuityFilter;
use crate::gesture::{GestureEvent, GestureSession};
use crate::mode::PlacementMode;
use crate::overlay::PlaneOverlayManager;
use crate::scene::{NodeId, PlacedObject, Prototype, SceneGraph};
use crate::spatial::{ScreenPoint, Transform, Vec3};
use crate::store::PlacedObjectStore;
use crate::tracking::{
    Anchor, AnchorEvent, RunOptions, SpatialQuery, TrackingConfiguration, TrackingProvider,
};

/// Top-level placement controller
pub struct PlacementEngine<T, Q, S> {
    config: EngineConfig,
    tracking: T,
    query: Q,
    scene: S,
    mode: PlacementMode,
    selected: Option<Prototype>,
    gesture: GestureSession,
    continuity: ContinuityFilter,
    anchors: SpatialAnchorRegistry,
    store: PlacedObjectStore,
    overlays: PlaneOverlayManager,
}

impl<T, Q, S> PlacementEngine<T, Q, S>
where
    T: TrackingProvider,
    Q: SpatialQuery,
    S: SceneGraph,
{
    /// Create an engine in `config.initial_mode`. The tracking provider is
    /// not touched until [`start_session`](Self::start_session).
    pub fn new(config: EngineConfig, tracking: T, query: Q, scene: S) -> Self {
        let mode = config.initial_mode;
        Self {
            continuity: ContinuityFilter::new(config.continuity_threshold),
            overlays: PlaneOverlayManager::new(mode.shows_overlays()),
            config,
            tracking,
            query,
            scene,
            mode,
            selected: None,
            gesture: GestureSession::new(),
            anchors: SpatialAnchorRegistry::new(),
            store: PlacedObjectStore::new(),
        }
    }

    /// Configure and run tracking for the current mode
    pub fn start_session(&mut self) -> TrackingConfiguration {
        let configuration = self.apply_tracking(RunOptions::default());
        info!("Tracking session started in {} mode", self.mode);
        configuration
    }

    /// Pause tracking. Placement state is kept.
    pub fn pause_session(&mut self) {
        self.tracking.pause();
        info!("Tracking session paused");
    }

    /// Switch placement mode. Reconfigures tracking (image detection only in
    /// image-triggered mode) and resets overlay visibility to the mode's
    /// default, overriding any earlier manual toggle.
    pub fn set_mode(&mut self, mode: PlacementMode) -> TrackingConfiguration {
        let previous = self.mode;
        self.mode = mode;
        let configuration = self.apply_tracking(RunOptions::default());
        self.overlays
            .set_visible(mode.shows_overlays(), &mut self.anchors, &mut self.scene);
        info!("Placement mode {} -> {}", previous, mode);
        configuration
    }

    fn apply_tracking(&mut self, options: RunOptions) -> TrackingConfiguration {
        let configuration = self.mode.tracking_configuration(&self.config.image_catalog);
        self.tracking.configure(&configuration);
        self.tracking.run(options);
        configuration
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Choose the template for subsequent placements
    pub fn select_prototype(&mut self, prototype: Prototype) {
        debug!("Selected prototype {}", prototype.name);
        self.selected = Some(prototype);
    }

    /// Options UI callback for a catalog selection
    pub fn object_selected(&mut self, prototype: Prototype) {
        self.select_prototype(prototype);
    }

    pub fn clear_prototype(&mut self) {
        self.selected = None;
    }

    pub fn selected_prototype(&self) -> Option<&Prototype> {
        self.selected.as_ref()
    }

    /// Start of a placement gesture
    pub fn on_gesture_begin(&mut self, point: ScreenPoint) -> Option<PlacedObject> {
        self.gesture.begin(self.config.clear_gesture_on_begin);
        match self.mode {
            PlacementMode::Freeform => self.place_in_front(),
            PlacementMode::SurfaceConstrained => self.place_on_surface(point),
            PlacementMode::ImageTriggered => None,
        }
    }

    /// Pointer moved during a gesture. Only surface-constrained mode places
    /// on moves, and only while a gesture is active.
    pub fn on_gesture_move(&mut self, point: ScreenPoint) -> Option<PlacedObject> {
        if !self.gesture.is_active() {
            trace!("Move outside of a gesture ignored");
            return None;
        }
        match self.mode {
            PlacementMode::SurfaceConstrained => self.place_on_surface(point),
            PlacementMode::Freeform | PlacementMode::ImageTriggered => None,
        }
    }

    /// End of a gesture, in every mode
    pub fn on_gesture_end(&mut self) {
        self.gesture.end();
    }

    /// Route one gesture step to the matching handler
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<PlacedObject> {
        match event {
            GestureEvent::Begin { point } => self.on_gesture_begin(point),
            GestureEvent::Move { point } => self.on_gesture_move(point),
            GestureEvent::End => {
                self.on_gesture_end();
                None
            }
        }
    }

    fn place_in_front(&mut self) -> Option<PlacedObject> {
        let Some(prototype) = self.selected.as_ref() else {
            trace!("No prototype selected; gesture ignored");
            return None;
        };
        let Some(viewpoint) = self.tracking.current_viewpoint() else {
            debug!("No tracked viewpoint yet; freeform placement skipped");
            return None;
        };
        let transform = viewpoint.ahead(self.config.freeform_distance);
        Some(
            self.store
                .add(&mut self.scene, prototype, NodeId::ROOT, transform),
        )
    }

    fn place_on_surface(&mut self, point: ScreenPoint) -> Option<PlacedObject> {
        let Some(prototype) = self.selected.as_ref() else {
            trace!("No prototype selected; gesture ignored");
            return None;
        };
        let Some(hit) = self.query.hit_test_existing_surfaces(point) else {
            trace!("No surface under ({}, {})", point.x, point.y);
            return None;
        };
        if !self
            .continuity
            .should_place(hit, self.gesture.last_placement())
        {
            return None;
        }
        let placed = self.store.add(
            &mut self.scene,
            prototype,
            NodeId::ROOT,
            Transform::from_position(hit),
        );
        self.gesture.record_placement(hit);
        Some(placed)
    }

    /// Apply one tracking event. Returns the object placed, if any.
    pub fn handle_anchor_event(&mut self, event: AnchorEvent) -> Option<PlacedObject> {
        match event {
            AnchorEvent::Added(Anchor::Plane { id, extent, center }) => {
                self.on_plane_anchor_added(&id, extent, center);
                None
            }
            AnchorEvent::Added(Anchor::Image { id, node }) => self.on_image_anchor_added(&id, node),
            AnchorEvent::Updated(Anchor::Plane { id, extent, center }) => {
                self.on_plane_anchor_updated(&id, extent, center);
                None
            }
            AnchorEvent::Updated(Anchor::Image { id, .. }) => {
                trace!("Image anchor {} moved; attached objects follow its node", id);
                None
            }
            AnchorEvent::Removed(id) => {
                self.on_anchor_removed(&id);
                None
            }
        }
    }

    /// A plane was detected; its overlay starts with the current toggle value
    pub fn on_plane_anchor_added(
        &mut self,
        id: &str,
        extent: PlaneExtent,
        center: Vec3,
    ) -> &SurfaceOverlay {
        let visible = self.overlays.is_visible();
        self.anchors
            .on_plane_anchor_added(&mut self.scene, id, extent, center, visible)
    }

    /// A plane grew, shrank or shifted
    pub fn on_plane_anchor_updated(&mut self, id: &str, extent: PlaneExtent, center: Vec3) -> bool {
        self.anchors
            .on_plane_anchor_updated(&mut self.scene, id, extent, center)
    }

    /// A reference image was recognized; places the selected prototype on it
    pub fn on_image_anchor_added(&mut self, id: &str, image_node: NodeId) -> Option<PlacedObject> {
        self.anchors.on_image_anchor_added(
            &mut self.scene,
            &mut self.store,
            id,
            image_node,
            self.selected.as_ref(),
        )
    }

    /// The tracking provider dropped an anchor
    pub fn on_anchor_removed(&mut self, id: &str) -> bool {
        self.anchors.on_anchor_removed(&mut self.scene, id)
    }

    /// Options UI callback: flip overlay visibility. Returns the new value.
    pub fn toggle_plane_visualization(&mut self) -> bool {
        self.overlays.toggle(&mut self.anchors, &mut self.scene)
    }

    pub fn overlays_visible(&self) -> bool {
        self.overlays.is_visible()
    }

    /// Options UI callback: remove the most recent placement
    pub fn undo_last_object(&mut self) -> Option<PlacedObject> {
        let placed = self.store.undo_last(&mut self.scene)?;
        self.anchors.unbind(placed.node);
        Some(placed)
    }

    /// Options UI callback: remove every placed object and overlay, then
    /// restart tracking from scratch in the current mode. The selection and
    /// the overlay toggle survive.
    pub fn reset_scene(&mut self) {
        let removed = self.store.clear(&mut self.scene);
        let planes = self.anchors.len();
        self.anchors.clear(&mut self.scene);
        self.gesture.end();
        self.apply_tracking(RunOptions::reset());
        info!("Scene reset: {} objects and {} overlays removed", removed, planes);
    }

    /// Position of the last object placed by the current gesture
    pub fn last_placement_position(&self) -> Option<Vec3> {
        self.gesture.last_placement()
    }

    pub fn history(&self) -> &PlacedObjectStore {
        &self.store
    }

    pub fn anchors(&self) -> &SpatialAnchorRegistry {
        &self.anchors
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tracking(&self) -> &T {
        &self.tracking
    }

    pub fn tracking_mut(&mut self) -> &mut T {
        &mut self.tracking
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut Q {
        &mut self.query
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimQuery, SimScene, SimTracking};
    use crate::tracking::ImageCatalog;

    type SimEngine = PlacementEngine<SimTracking, SimQuery, SimScene>;

    fn engine() -> SimEngine {
        PlacementEngine::new(
            EngineConfig::default(),
            SimTracking::with_viewpoint(Transform::identity()),
            SimQuery::new(),
            SimScene::new(),
        )
    }

    #[test]
    fn test_new_does_not_touch_tracking() {
        let engine = engine();
        assert_eq!(engine.mode(), PlacementMode::Freeform);
        assert!(engine.tracking().configurations().is_empty());
        assert!(!engine.overlays_visible());
    }

    #[test]
    fn test_start_and_pause_session() {
        let mut engine = engine();
        let configuration = engine.start_session();
        assert!(configuration.plane_detection);
        assert!(configuration.image_detection.is_none());
        assert!(engine.tracking().is_running());

        engine.pause_session();
        assert!(!engine.tracking().is_running());
    }

    #[test]
    fn test_set_mode_reconfigures_tracking() {
        let mut engine = engine();

        let configuration = engine.set_mode(PlacementMode::ImageTriggered);
        assert_eq!(
            configuration.image_detection,
            Some(ImageCatalog::new("AR Resources"))
        );
        assert_eq!(engine.tracking().current_configuration(), Some(&configuration));

        let configuration = engine.set_mode(PlacementMode::SurfaceConstrained);
        assert!(configuration.plane_detection);
        assert!(configuration.image_detection.is_none());
        assert_eq!(engine.tracking().runs().len(), 2);
        assert!(engine.tracking().runs().iter().all(|run| !run.reset_tracking));
    }

    #[test]
    fn test_mode_change_overrides_manual_toggle() {
        let mut engine = engine();
        engine.on_plane_anchor_added("floor", PlaneExtent::new(1.0, 1.0), Vec3::ZERO);
        engine.set_mode(PlacementMode::SurfaceConstrained);
        assert!(engine.anchors().overlay("floor").unwrap().is_visible());

        assert!(!engine.toggle_plane_visualization());
        assert!(engine.anchors().overlay("floor").unwrap().hidden);

        engine.set_mode(PlacementMode::SurfaceConstrained);
        assert!(engine.anchors().overlay("floor").unwrap().is_visible());

        engine.set_mode(PlacementMode::Freeform);
        assert!(engine.scene().overlay("floor").unwrap().hidden);
    }

    #[test]
    fn test_freeform_places_ahead_once_per_gesture() {
        let mut engine = engine();
        engine.select_prototype(Prototype::new("cup"));

        let placed = engine.on_gesture_begin(ScreenPoint::new(50.0, 50.0)).unwrap();
        assert!((placed.transform.position.z - 0.2).abs() < 0.0001);
        assert_eq!(placed.parent, NodeId::ROOT);

        assert!(engine.on_gesture_move(ScreenPoint::new(80.0, 10.0)).is_none());
        engine.on_gesture_end();
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_freeform_without_viewpoint() {
        let mut engine = PlacementEngine::new(
            EngineConfig::default(),
            SimTracking::new(),
            SimQuery::new(),
            SimScene::new(),
        );
        engine.select_prototype(Prototype::new("cup"));
        assert!(engine.on_gesture_begin(ScreenPoint::default()).is_none());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_move_after_end_is_ignored() {
        let mut engine = engine();
        let point = ScreenPoint::new(3.0, 4.0);
        engine.query_mut().add_surface_hit(point, Vec3::ZERO);
        engine.select_prototype(Prototype::new("cup"));
        engine.set_mode(PlacementMode::SurfaceConstrained);

        assert!(engine.on_gesture_begin(point).is_some());
        engine.on_gesture_end();

        assert!(engine.on_gesture_move(point).is_none());
        assert_eq!(engine.last_placement_position(), None);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_move_without_any_begin_is_ignored() {
        let mut engine = engine();
        let point = ScreenPoint::new(3.0, 4.0);
        engine.query_mut().add_surface_hit(point, Vec3::ZERO);
        engine.select_prototype(Prototype::new("cup"));
        engine.set_mode(PlacementMode::SurfaceConstrained);

        assert!(engine.on_gesture_move(point).is_none());
        assert_eq!(engine.last_placement_position(), None);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_image_mode_ignores_gestures() {
        let mut engine = engine();
        let point = ScreenPoint::new(1.0, 1.0);
        engine.query_mut().add_surface_hit(point, Vec3::ZERO);
        engine.select_prototype(Prototype::new("cup"));
        engine.set_mode(PlacementMode::ImageTriggered);

        assert!(engine.on_gesture_begin(point).is_none());
        assert!(engine.on_gesture_move(point).is_none());
        engine.on_gesture_end();
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_undo_unbinds_image_placement() {
        let mut engine = engine();
        engine.select_prototype(Prototype::new("frame"));
        let placed = engine.on_image_anchor_added("poster", NodeId(900)).unwrap();
        assert_eq!(engine.anchors().image_bindings("poster"), &[placed.node]);

        assert_eq!(engine.undo_last_object(), Some(placed));
        assert!(engine.anchors().image_bindings("poster").is_empty());
        assert!(engine.undo_last_object().is_none());
    }

    #[test]
    fn test_reset_scene() {
        let mut engine = engine();
        engine.select_prototype(Prototype::new("cup"));
        engine.on_gesture_begin(ScreenPoint::default());
        engine.on_plane_anchor_added("floor", PlaneExtent::new(2.0, 2.0), Vec3::ZERO);

        engine.reset_scene();

        assert!(engine.history().is_empty());
        assert!(engine.anchors().is_empty());
        assert_eq!(engine.scene().node_count(), 0);
        assert_eq!(engine.scene().overlay_count(), 0);
        assert_eq!(engine.tracking().runs().last(), Some(&RunOptions::reset()));
        assert_eq!(engine.selected_prototype(), Some(&Prototype::new("cup")));
    }
}
