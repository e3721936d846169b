//! Session-wide visibility toggle for surface overlays

use tracing::debug;

use crate::anchor::SpatialAnchorRegistry;
use crate::scene::SceneGraph;

/// Holds the overlay visibility flag and pushes it to every registered
/// overlay. Overlays created later read the flag when they are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaneOverlayManager {
    visible: bool,
}

impl PlaneOverlayManager {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the flag and apply it to all current overlays
    pub fn set_visible(
        &mut self,
        visible: bool,
        registry: &mut SpatialAnchorRegistry,
        scene: &mut dyn SceneGraph,
    ) {
        self.visible = visible;
        let mut applied = 0;
        for overlay in registry.overlays_mut() {
            overlay.hidden = !visible;
            scene.sync_overlay(overlay);
            applied += 1;
        }
        debug!("Plane overlays {} ({} applied)", if visible { "shown" } else { "hidden" }, applied);
    }

    /// Flip the flag and reapply. Returns the new value.
    pub fn toggle(
        &mut self,
        registry: &mut SpatialAnchorRegistry,
        scene: &mut dyn SceneGraph,
    ) -> bool {
        self.set_visible(!self.visible, registry, scene);
        self.visible
    }
}
