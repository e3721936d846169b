//! Scene graph seam and the objects the engine inserts into it

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::anchor::SurfaceOverlay;
use crate::spatial::Transform;

/// Opaque handle to a node in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// The world root node
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Template an instance is cloned from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prototype {
    /// Display name, e.g. "cup"
    pub name: String,
    /// Asset reference resolved by the scene graph
    #[serde(default)]
    pub asset: Option<String>,
}

impl Prototype {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset: None,
        }
    }

    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }
}

/// An instance the engine inserted into the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Node created by the scene graph for this instance
    pub node: NodeId,
    /// Name of the prototype it was cloned from
    pub prototype: String,
    /// Node it was attached under
    pub parent: NodeId,
    /// Transform relative to `parent`
    pub transform: Transform,
}

/// The renderer-side scene graph
pub trait SceneGraph {
    /// Clone `prototype` and attach the clone under `parent`
    fn attach_clone(
        &mut self,
        prototype: &Prototype,
        parent: NodeId,
        transform: Transform,
    ) -> NodeId;

    /// Remove a node previously returned by `attach_clone`
    fn detach(&mut self, node: NodeId);

    /// Create or refresh the visual proxy for a plane overlay
    fn sync_overlay(&mut self, overlay: &SurfaceOverlay);

    /// Drop the visual proxy for a plane anchor
    fn remove_overlay(&mut self, anchor: &str);
}
