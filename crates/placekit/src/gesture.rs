//! Continuous placement gestures, independent of the input technology

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::spatial::{ScreenPoint, Vec3};

/// One step of a continuous touch, drag or pinch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GestureEvent {
    Begin { point: ScreenPoint },
    Move { point: ScreenPoint },
    End,
}

impl GestureEvent {
    /// The pointer location, if this step carries one
    pub fn point(&self) -> Option<ScreenPoint> {
        match self {
            GestureEvent::Begin { point } | GestureEvent::Move { point } => Some(*point),
            GestureEvent::End => None,
        }
    }
}

/// State scoped to a single gesture: whether one is active and where the
/// last object of this gesture was placed
#[derive(Debug, Clone, Default)]
pub struct GestureSession {
    active: bool,
    last_placement: Option<Vec3>,
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture. With `clear_stale`, a position left over from a
    /// gesture whose end was never delivered is discarded.
    pub fn begin(&mut self, clear_stale: bool) {
        if clear_stale && self.last_placement.take().is_some() {
            debug!("Discarding stale placement position from an unterminated gesture");
        }
        self.active = true;
    }

    /// Record where this gesture last placed an object
    pub fn record_placement(&mut self, position: Vec3) {
        self.last_placement = Some(position);
    }

    /// Finish the gesture; always clears the last placement position
    pub fn end(&mut self) {
        self.active = false;
        self.last_placement = None;
    }

    /// Whether a gesture is in progress
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Where the current gesture last placed an object
    pub fn last_placement(&self) -> Option<Vec3> {
        self.last_placement
    }
}
