//! Data handed over by the tracking engine each frame.

use std::fmt;

use crate::gfx::Pose;

/// Handle to an anchor owned by the tracking engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorHandle(pub u64);

/// Handle to a detected plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneId(pub u64);

/// Tracking state of the camera or of a trackable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    Tracking,
    Paused,
    Stopped,
}

/// Why camera tracking is currently degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingFailureReason {
    BadState,
    InsufficientLight,
    ExcessiveMotion,
    InsufficientFeatures,
    CameraUnavailable,
}

impl TrackingFailureReason {
    /// User-facing description of the failure
    pub fn description(&self) -> &'static str {
        match self {
            TrackingFailureReason::BadState => {
                "Tracking lost due to bad internal state. Please try restarting the AR experience."
            }
            TrackingFailureReason::InsufficientLight => "Too dark. Try moving to a well-lit area.",
            TrackingFailureReason::ExcessiveMotion => "Moving too fast. Slow down.",
            TrackingFailureReason::InsufficientFeatures => {
                "Can't find anything. Aim device at a surface with more texture or color."
            }
            TrackingFailureReason::CameraUnavailable => {
                "Another app is using the camera. Tap on this app or try closing the other one."
            }
        }
    }
}

impl fmt::Display for TrackingFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Plane orientation classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneType {
    HorizontalUpwardFacing,
    HorizontalDownwardFacing,
    Vertical,
}

/// A detected flat surface
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub id: PlaneId,
    pub plane_type: PlaneType,
    pub center_pose: Pose,
    /// Boundary polygon in the plane's local XZ coordinates
    pub polygon: Vec<[f32; 2]>,
    pub tracking_state: TrackingState,
}

impl Plane {
    pub fn is_horizontal_upward(&self) -> bool {
        self.plane_type == PlaneType::HorizontalUpwardFacing
    }
}

/// Classification of a hit-test result, from least to most confident
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitKind {
    /// Estimated from the depth map only
    DepthPoint,
    /// Sparse feature point from the point cloud
    FeaturePoint,
    /// A detected plane; `in_polygon` tells whether the hit lies within its boundary
    Plane { plane: PlaneId, in_polygon: bool },
    /// Instant placement point not yet resolved to a surface
    InstantPlacement,
}

/// One candidate surface/point under a screen coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    pub pose: Pose,
    /// Distance from the camera in meters
    pub distance: f32,
    pub kind: HitKind,
    /// Tracking state of the hit trackable
    pub tracking_state: TrackingState,
}

/// One tracking tick worth of engine output
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestamp_ns: i64,
    pub camera_pose: Pose,
    pub camera_tracking: TrackingState,
    pub failure_reason: Option<TrackingFailureReason>,
    /// Planes updated since the previous frame, in engine order
    pub updated_planes: Vec<Plane>,
}
