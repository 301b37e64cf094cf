//! Tracking engine seam and session configuration.

use serde::{Deserialize, Serialize};

use crate::error::AnchorError;
use crate::gfx::Pose;

use super::types::{AnchorHandle, Frame, HitResult, Plane};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthMode {
    Disabled,
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstantPlacementMode {
    Disabled,
    LocalYUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightEstimationMode {
    Disabled,
    AmbientIntensity,
    EnvironmentalHdr,
}

/// Settings applied to the engine when the session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfiguration {
    pub depth_mode: DepthMode,
    pub instant_placement: InstantPlacementMode,
    pub light_estimation: LightEstimationMode,
}

/// 6-DoF tracking capability consumed by the placement core
pub trait TrackingEngine {
    fn is_depth_mode_supported(&self, mode: DepthMode) -> bool;

    fn configure(&mut self, config: &SessionConfiguration);

    /// Project a screen coordinate into the tracked scene.
    ///
    /// Returns every candidate, unfiltered, nearest first.
    fn hit_test(&self, frame: &Frame, x: f32, y: f32) -> Vec<HitResult>;

    /// Create an anchor attached to `plane` at `pose`
    fn create_plane_anchor(&mut self, plane: &Plane, pose: &Pose)
        -> Result<AnchorHandle, AnchorError>;

    /// Create an anchor at a hit-test result
    fn create_hit_anchor(&mut self, hit: &HitResult) -> Result<AnchorHandle, AnchorError>;

    /// Stop tracking an anchor that will never get a node
    fn detach_anchor(&mut self, anchor: AnchorHandle);
}
