//! In-memory collaborators for development without tracking hardware
//!
//! Each one records what the engine asked of it so tests and the
//! `placekit-sim` replay tool can inspect the outcome.

use std::collections::BTreeMap;

use crate::anchor::SurfaceOverlay;
use crate::scene::{NodeId, Prototype, SceneGraph};
use crate::spatial::{ScreenPoint, Transform, Vec3};
use crate::tracking::{AnchorId, RunOptions, SpatialQuery, TrackingConfiguration, TrackingProvider};

/// A node created through [`SceneGraph::attach_clone`]
#[derive(Debug, Clone, PartialEq)]
pub struct SimNode {
    pub prototype: String,
    pub parent: NodeId,
    pub transform: Transform,
}

/// Scene graph that keeps nodes and overlay proxies in maps
#[derive(Debug, Clone)]
pub struct SimScene {
    nodes: BTreeMap<NodeId, SimNode>,
    overlays: BTreeMap<AnchorId, SurfaceOverlay>,
    next_id: u64,
}

impl Default for SimScene {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            overlays: BTreeMap::new(),
            // 0 is the world root
            next_id: 1,
        }
    }
}

impl SimScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a node id outside of `attach_clone`, as a tracking provider
    /// does for the nodes it creates for image anchors
    pub fn allocate_node(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node(&self, node: NodeId) -> Option<&SimNode> {
        self.nodes.get(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes attached directly under `parent`, in creation order
    pub fn children_of(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent == parent)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn overlay(&self, anchor: &str) -> Option<&SurfaceOverlay> {
        self.overlays.get(anchor)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }
}

impl SceneGraph for SimScene {
    fn attach_clone(
        &mut self,
        prototype: &Prototype,
        parent: NodeId,
        transform: Transform,
    ) -> NodeId {
        let id = self.allocate_node();
        self.nodes.insert(
            id,
            SimNode {
                prototype: prototype.name.clone(),
                parent,
                transform,
            },
        );
        id
    }

    fn detach(&mut self, node: NodeId) {
        self.nodes.remove(&node);
    }

    fn sync_overlay(&mut self, overlay: &SurfaceOverlay) {
        self.overlays.insert(overlay.anchor.clone(), overlay.clone());
    }

    fn remove_overlay(&mut self, anchor: &str) {
        self.overlays.remove(anchor);
    }
}

/// Tracking provider with a settable viewpoint that logs session calls
#[derive(Debug, Clone, Default)]
pub struct SimTracking {
    viewpoint: Option<Transform>,
    configurations: Vec<TrackingConfiguration>,
    runs: Vec<RunOptions>,
    running: bool,
}

impl SimTracking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with tracking already initialized at `viewpoint`
    pub fn with_viewpoint(viewpoint: Transform) -> Self {
        Self {
            viewpoint: Some(viewpoint),
            ..Self::default()
        }
    }

    pub fn set_viewpoint(&mut self, viewpoint: Option<Transform>) {
        self.viewpoint = viewpoint;
    }

    /// Every configuration applied, oldest first
    pub fn configurations(&self) -> &[TrackingConfiguration] {
        &self.configurations
    }

    /// The configuration currently in effect
    pub fn current_configuration(&self) -> Option<&TrackingConfiguration> {
        self.configurations.last()
    }

    /// Options of every `run` call, oldest first
    pub fn runs(&self) -> &[RunOptions] {
        &self.runs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl TrackingProvider for SimTracking {
    fn configure(&mut self, configuration: &TrackingConfiguration) {
        self.configurations.push(configuration.clone());
    }

    fn run(&mut self, options: RunOptions) {
        self.runs.push(options);
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn current_viewpoint(&self) -> Option<Transform> {
        self.viewpoint
    }
}

/// Spatial query answering from a table of screen point to surface hit
#[derive(Debug, Clone, Default)]
pub struct SimQuery {
    surfaces: Vec<(ScreenPoint, Vec3)>,
}

impl SimQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `point` hit an existing surface at `world`
    pub fn add_surface_hit(&mut self, point: ScreenPoint, world: Vec3) {
        self.surfaces.retain(|(p, _)| *p != point);
        self.surfaces.push((point, world));
    }

    pub fn with_surface_hit(mut self, point: ScreenPoint, world: Vec3) -> Self {
        self.add_surface_hit(point, world);
        self
    }
}

impl SpatialQuery for SimQuery {
    fn hit_test_existing_surfaces(&self, point: ScreenPoint) -> Option<Vec3> {
        self.surfaces
            .iter()
            .find(|(p, _)| *p == point)
            .map(|(_, world)| *world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_ids_skip_root() {
        let mut scene = SimScene::new();
        let node = scene.attach_clone(&Prototype::new("cup"), NodeId::ROOT, Transform::identity());
        assert_ne!(node, NodeId::ROOT);
        assert_eq!(scene.children_of(NodeId::ROOT), vec![node]);

        scene.detach(node);
        assert!(!scene.contains(node));
    }

    #[test]
    fn test_query_misses_unknown_points() {
        let query = SimQuery::new().with_surface_hit(ScreenPoint::new(1.0, 1.0), Vec3::UP);
        assert_eq!(query.hit_test_existing_surfaces(ScreenPoint::new(1.0, 1.0)), Some(Vec3::UP));
        assert_eq!(query.hit_test_existing_surfaces(ScreenPoint::new(2.0, 1.0)), None);
    }

    #[test]
    fn test_tracking_records_session_calls() {
        let mut tracking = SimTracking::new();
        assert_eq!(tracking.current_viewpoint(), None);

        tracking.run(RunOptions::default());
        assert!(tracking.is_running());
        tracking.pause();
        assert!(!tracking.is_running());
        assert_eq!(tracking.runs().len(), 1);
    }
}
