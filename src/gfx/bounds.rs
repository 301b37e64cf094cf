//! # Axis-Aligned Bounds
//!
//! Model extents as reported by the rendering engine, and the helpers the
//! anchor factory needs to size the selection box and fit a model to a target
//! size.

use cgmath::Vector3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Bounds {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Bounds centered on `center` with full edge lengths `extents`
    pub fn from_center_extents(center: Vector3<f32>, extents: Vector3<f32>) -> Self {
        let half = extents * 0.5;
        Self::new(center - half, center + half)
    }

    /// Full edge lengths along each axis
    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Length of the longest edge
    pub fn max_extent(&self) -> f32 {
        let e = self.extents();
        e.x.max(e.y).max(e.z)
    }

    /// Uniform scale that makes the longest edge equal `units`.
    ///
    /// Degenerate (flat or empty) bounds keep their native size.
    pub fn scale_to_units(&self, units: f32) -> f32 {
        let longest = self.max_extent();
        if longest > f32::EPSILON {
            units / longest
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Zero;

    #[test]
    fn test_from_center_extents() {
        let bounds = Bounds::from_center_extents(Vector3::new(0.0, 0.5, 0.0), Vector3::new(2.0, 3.0, 2.0));

        assert_eq!(bounds.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vector3::new(1.0, 2.0, 1.0));
        assert_eq!(bounds.extents(), Vector3::new(2.0, 3.0, 2.0));
        assert_eq!(bounds.max_extent(), 3.0);
    }

    #[test]
    fn test_scale_to_units_fits_longest_edge() {
        let bounds = Bounds::from_center_extents(Vector3::zero(), Vector3::new(2.0, 1.0, 0.5));
        assert!((bounds.scale_to_units(0.5) - 0.25).abs() < 1e-6);

        let flat = Bounds::new(Vector3::zero(), Vector3::zero());
        assert_eq!(flat.scale_to_units(0.5), 1.0);
    }
}
