//! Placement history with LIFO undo

use tracing::debug;

use crate::scene::{NodeId, PlacedObject, Prototype, SceneGraph};
use crate::spatial::Transform;

/// Objects inserted into the scene, in placement order.
///
/// Only the tail can be removed, and removal always detaches the node from
/// the scene graph in the same step.
#[derive(Debug, Clone, Default)]
pub struct PlacedObjectStore {
    history: Vec<PlacedObject>,
}

impl PlacedObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone `prototype` under `parent` and append the instance to the history
    pub fn add(
        &mut self,
        scene: &mut dyn SceneGraph,
        prototype: &Prototype,
        parent: NodeId,
        transform: Transform,
    ) -> PlacedObject {
        let node = scene.attach_clone(prototype, parent, transform);
        let placed = PlacedObject {
            node,
            prototype: prototype.name.clone(),
            parent,
            transform,
        };
        debug!(
            "Placed {} as {} under {} ({} in history)",
            placed.prototype,
            node,
            parent,
            self.history.len() + 1
        );
        self.history.push(placed.clone());
        placed
    }

    /// Remove the most recent object from the scene and the history.
    /// An empty history is left untouched.
    pub fn undo_last(&mut self, scene: &mut dyn SceneGraph) -> Option<PlacedObject> {
        let Some(placed) = self.history.pop() else {
            debug!("Nothing to undo");
            return None;
        };
        scene.detach(placed.node);
        debug!("Undid placement of {} ({})", placed.prototype, placed.node);
        Some(placed)
    }

    /// Remove every object, newest first. Returns how many were removed.
    pub fn clear(&mut self, scene: &mut dyn SceneGraph) -> usize {
        let count = self.history.len();
        while let Some(placed) = self.history.pop() {
            scene.detach(placed.node);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recent placement
    pub fn last(&self) -> Option<&PlacedObject> {
        self.history.last()
    }

    /// History in placement order
    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.history.iter()
    }
}
