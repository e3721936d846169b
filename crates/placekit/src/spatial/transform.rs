//! Pose of a tracked viewpoint or a placed node

use serde::{Deserialize, Serialize};

use super::{Quaternion, Vec3};

/// Position and rotation in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Quaternion,
}

impl Transform {
    /// Identity transform (origin, no rotation)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
        }
    }

    /// Create a transform with just position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quaternion::IDENTITY,
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Forward direction of this transform
    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    /// Transform a point from local space to world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation.rotate_vector(local)
    }

    /// The pose `distance` units along this transform's forward axis, same rotation
    pub fn ahead(&self, distance: f32) -> Self {
        Self {
            position: self.transform_point(Vec3::FORWARD * distance),
            rotation: self.rotation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
