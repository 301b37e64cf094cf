//! Rigid poses (position + orientation) in tracking-space coordinates.

use cgmath::{InnerSpace, One, Quaternion, Vector3, Zero};

/// A position and orientation reported by the tracking engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Pose {
    /// Create a pose from a translation and rotation.
    ///
    /// The rotation is normalized so engines handing over slightly drifted
    /// quaternions still produce rigid transforms.
    pub fn new(translation: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        let rotation = if rotation.magnitude2() > f32::EPSILON {
            rotation.normalize()
        } else {
            Quaternion::one()
        };
        Self {
            translation,
            rotation,
        }
    }

    /// The identity pose at the tracking origin
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zero(),
            rotation: Quaternion::one(),
        }
    }

    /// Pose at a position with no rotation
    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            rotation: Quaternion::one(),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
