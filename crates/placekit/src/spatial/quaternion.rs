//! Quaternion representation for viewpoint rotations

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::Vec3;

/// A quaternion for representing 3D rotations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a new quaternion
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from axis-angle representation
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let half_angle = angle_radians / 2.0;
        let sin_half = half_angle.sin();
        let normalized = axis.normalize();

        Self {
            x: normalized.x * sin_half,
            y: normalized.y * sin_half,
            z: normalized.z * sin_half,
            w: half_angle.cos(),
        }
    }

    /// Get the magnitude of the quaternion
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Normalize the quaternion
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag)
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vector(&self, v: Vec3) -> Vec3 {
        let q_vec = Vec3::new(self.x, self.y, self.z);
        let uv = q_vec.cross(&v);
        let uuv = q_vec.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// Get the forward vector (where this rotation points)
    pub fn forward(&self) -> Vec3 {
        self.rotate_vector(Vec3::FORWARD)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_identity_forward() {
        let forward = Quaternion::IDENTITY.forward();
        assert!((forward.z - 1.0).abs() < 0.0001);
        assert!(forward.x.abs() < 0.0001);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let q = Quaternion::from_axis_angle(Vec3::UP, PI / 2.0);
        let rotated = q.forward();
        // FORWARD becomes RIGHT
        assert!((rotated.x - 1.0).abs() < 0.0001);
        assert!(rotated.y.abs() < 0.0001);
        assert!(rotated.z.abs() < 0.0001);
    }

    #[test]
    fn test_composition() {
        let eighth = Quaternion::from_axis_angle(Vec3::UP, PI / 4.0);
        let quarter = eighth * eighth;
        let rotated = quarter.forward();
        assert!((rotated.x - 1.0).abs() < 0.0001);
    }
}
