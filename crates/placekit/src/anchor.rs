//! Anchor bookkeeping: one surface overlay per plane anchor, and the objects
//! each recognized image triggered

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scene::{NodeId, PlacedObject, Prototype, SceneGraph};
use crate::spatial::{Transform, Vec3};
use crate::store::PlacedObjectStore;
use crate::tracking::AnchorId;

/// Size of a detected plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneExtent {
    /// Extent along the plane's local X axis
    pub width: f32,
    /// Extent along the plane's local Z axis
    pub depth: f32,
}

impl PlaneExtent {
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }
}

/// Visual proxy showing the extent of a detected plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceOverlay {
    /// Plane anchor this overlay is bound to
    pub anchor: AnchorId,
    pub extent: PlaneExtent,
    /// Center in anchor-local coordinates, flattened onto the plane
    pub center: Vec3,
    pub hidden: bool,
}

impl SurfaceOverlay {
    fn new(anchor: AnchorId, extent: PlaneExtent, center: Vec3, visible: bool) -> Self {
        Self {
            anchor,
            extent,
            center: project_onto_plane(center),
            hidden: !visible,
        }
    }

    fn reshape(&mut self, extent: PlaneExtent, center: Vec3) {
        self.extent = extent;
        self.center = project_onto_plane(center);
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// The overlay lies in the plane, so only the in-plane components of the
/// anchor's center are kept
fn project_onto_plane(center: Vec3) -> Vec3 {
    Vec3::new(center.x, 0.0, center.z)
}

/// Tracks overlays by plane anchor and placements by image anchor
#[derive(Debug, Clone, Default)]
pub struct SpatialAnchorRegistry {
    /// Overlays in creation order
    overlays: Vec<SurfaceOverlay>,
    /// Anchor id to position in `overlays`
    index: HashMap<AnchorId, usize>,
    image_bindings: HashMap<AnchorId, Vec<NodeId>>,
}

impl SpatialAnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the overlay for a newly detected plane. `visible` is the
    /// overlay toggle's value at this moment.
    ///
    /// A repeated add for a known anchor reshapes its existing overlay, so an
    /// anchor never ends up with two.
    pub fn on_plane_anchor_added(
        &mut self,
        scene: &mut dyn SceneGraph,
        id: &str,
        extent: PlaneExtent,
        center: Vec3,
        visible: bool,
    ) -> &SurfaceOverlay {
        let slot = match self.index.get(id) {
            Some(&slot) => {
                debug!("Plane anchor {} added twice; reshaping its overlay", id);
                self.overlays[slot].reshape(extent, center);
                slot
            }
            None => {
                let slot = self.overlays.len();
                self.overlays
                    .push(SurfaceOverlay::new(id.to_string(), extent, center, visible));
                self.index.insert(id.to_string(), slot);
                debug!(
                    "Overlay for plane {} created ({} x {})",
                    id, extent.width, extent.depth
                );
                slot
            }
        };
        let overlay = &self.overlays[slot];
        scene.sync_overlay(overlay);
        overlay
    }

    /// Reshape the overlay of a known plane. Returns `false`, without
    /// creating anything, when the anchor was never added.
    pub fn on_plane_anchor_updated(
        &mut self,
        scene: &mut dyn SceneGraph,
        id: &str,
        extent: PlaneExtent,
        center: Vec3,
    ) -> bool {
        let Some(&slot) = self.index.get(id) else {
            debug!("Update for unknown plane anchor {} ignored", id);
            return false;
        };
        let overlay = &mut self.overlays[slot];
        overlay.reshape(extent, center);
        scene.sync_overlay(overlay);
        true
    }

    /// Place a clone of the selected prototype on a recognized image.
    /// Nothing happens without a selection. Every call places again.
    pub fn on_image_anchor_added(
        &mut self,
        scene: &mut dyn SceneGraph,
        store: &mut PlacedObjectStore,
        id: &str,
        image_node: NodeId,
        selected: Option<&Prototype>,
    ) -> Option<PlacedObject> {
        let Some(prototype) = selected else {
            debug!("Image anchor {} detected with no prototype selected", id);
            return None;
        };
        let placed = store.add(scene, prototype, image_node, Transform::identity());
        self.image_bindings
            .entry(id.to_string())
            .or_default()
            .push(placed.node);
        Some(placed)
    }

    /// Forget an anchor the tracking provider dropped. Unknown ids are ignored.
    pub fn on_anchor_removed(&mut self, scene: &mut dyn SceneGraph, id: &str) -> bool {
        let had_binding = self.image_bindings.remove(id).is_some();
        let Some(slot) = self.index.remove(id) else {
            if !had_binding {
                debug!("Removal of unknown anchor {} ignored", id);
            }
            return had_binding;
        };
        self.overlays.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        scene.remove_overlay(id);
        true
    }

    /// Drop a placed node from whichever image binding holds it
    pub fn unbind(&mut self, node: NodeId) {
        for nodes in self.image_bindings.values_mut() {
            nodes.retain(|bound| *bound != node);
        }
    }

    /// Remove every overlay from the scene and forget all anchors
    pub fn clear(&mut self, scene: &mut dyn SceneGraph) {
        for overlay in self.overlays.drain(..) {
            scene.remove_overlay(&overlay.anchor);
        }
        self.index.clear();
        self.image_bindings.clear();
    }

    pub fn overlay(&self, id: &str) -> Option<&SurfaceOverlay> {
        self.index.get(id).map(|&slot| &self.overlays[slot])
    }

    /// Overlays in creation order
    pub fn overlays(&self) -> &[SurfaceOverlay] {
        &self.overlays
    }

    pub(crate) fn overlays_mut(&mut self) -> impl Iterator<Item = &mut SurfaceOverlay> {
        self.overlays.iter_mut()
    }

    /// Nodes placed because image anchor `id` was recognized
    pub fn image_bindings(&self, id: &str) -> &[NodeId] {
        self.image_bindings.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of plane overlays
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
