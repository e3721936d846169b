//! Spatial primitives for placement math
//!
//! Uses a right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)

mod quaternion;
mod transform;
mod vec3;

pub use quaternion::Quaternion;
pub use transform::Transform;
pub use vec3::Vec3;

/// A 2D input point in view coordinates, as delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
