//! placekit: placement and anchor synchronization for tracked 3D scenes
//!
//! This crate decides where, when and how many times an object is inserted
//! into a scene graph while a tracking provider reports surfaces and images:
//! - Mode-dependent placement (freeform, on surfaces, on recognized images)
//! - Drag de-duplication through a distance threshold
//! - One overlay per detected plane, kept in sync with anchor updates
//! - A single visibility toggle for all overlays
//! - LIFO undo of placed objects
//!
//! Tracking, hit testing and rendering are external and reached through the
//! [`TrackingProvider`], [`SpatialQuery`] and [`SceneGraph`] traits. The
//! [`sim`] module provides in-memory versions of all three.

pub mod anchor;
pub mod config;
pub mod continuity;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod mode;
pub mod overlay;
pub mod scene;
pub mod sim;
pub mod spatial;
pub mod store;
pub mod tracking;

// Re-export commonly used types
pub use anchor::{PlaneExtent, SpatialAnchorRegistry, SurfaceOverlay};
pub use config::EngineConfig;
pub use continuity::ContinuityFilter;
pub use engine::PlacementEngine;
pub use error::{PlacekitError, Result};
pub use gesture::{GestureEvent, GestureSession};
pub use mode::PlacementMode;
pub use overlay::PlaneOverlayManager;
pub use scene::{NodeId, PlacedObject, Prototype, SceneGraph};
pub use spatial::{Quaternion, ScreenPoint, Transform, Vec3};
pub use store::PlacedObjectStore;
pub use tracking::{
    Anchor, AnchorEvent, AnchorId, ImageCatalog, RunOptions, SpatialQuery, TrackingConfiguration,
    TrackingProvider,
};
