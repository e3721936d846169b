//! Tracking provider seam: session configuration, viewpoint, anchor events

use serde::{Deserialize, Serialize};

use crate::anchor::PlaneExtent;
use crate::scene::NodeId;
use crate::spatial::{ScreenPoint, Transform, Vec3};

/// Identifier of a tracked anchor, issued by the tracking provider
pub type AnchorId = String;

/// A named group of reference images to detect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCatalog {
    pub name: String,
}

impl ImageCatalog {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// What the tracking provider should detect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfiguration {
    /// Detect planar surfaces
    pub plane_detection: bool,
    /// Detect these reference images, if any
    pub image_detection: Option<ImageCatalog>,
}

/// Options for (re)starting a tracking session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunOptions {
    /// Restart world tracking from scratch
    pub reset_tracking: bool,
    /// Drop all anchors detected so far
    pub remove_existing_anchors: bool,
}

impl RunOptions {
    /// Options used when the whole scene is reset
    pub fn reset() -> Self {
        Self {
            reset_tracking: true,
            remove_existing_anchors: true,
        }
    }
}

/// An anchor reported by the tracking provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anchor {
    /// A detected planar surface
    Plane {
        id: AnchorId,
        extent: PlaneExtent,
        /// Plane center in anchor-local coordinates
        center: Vec3,
    },
    /// A recognized reference image; `node` is the scene node the provider
    /// created for it
    Image { id: AnchorId, node: NodeId },
}

/// Anchor lifecycle event, applied in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorEvent {
    Added(Anchor),
    Updated(Anchor),
    Removed(AnchorId),
}

/// The session that tracks the device and reports anchors
pub trait TrackingProvider {
    /// Replace the session configuration
    fn configure(&mut self, configuration: &TrackingConfiguration);

    /// Start (or restart) the session with the current configuration
    fn run(&mut self, options: RunOptions);

    /// Pause the session
    fn pause(&mut self);

    /// Current camera pose; `None` until tracking has initialized
    fn current_viewpoint(&self) -> Option<Transform>;
}

/// Hit testing against the live scene
pub trait SpatialQuery {
    /// World position of the first existing surface under `point`
    fn hit_test_existing_surfaces(&self, point: ScreenPoint) -> Option<Vec3>;
}
