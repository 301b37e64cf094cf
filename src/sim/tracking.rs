//! In-memory tracking engine with scripted answers.

use cgmath::Vector3;

use crate::error::AnchorError;
use crate::gfx::Pose;
use crate::tracking::{
    AnchorHandle, DepthMode, Frame, HitResult, Plane, PlaneId, PlaneType, SessionConfiguration,
    TrackingEngine, TrackingFailureReason, TrackingState,
};

#[derive(Debug)]
pub struct SimulatedTrackingEngine {
    depth_supported: bool,
    applied: Option<SessionConfiguration>,
    hits: Vec<HitResult>,
    reject_remaining: usize,
    next_anchor: u64,
    plane_requests: Vec<PlaneId>,
    live_anchors: Vec<AnchorHandle>,
    detached: Vec<AnchorHandle>,
}

impl SimulatedTrackingEngine {
    pub fn new() -> Self {
        Self {
            depth_supported: true,
            applied: None,
            hits: Vec::new(),
            reject_remaining: 0,
            next_anchor: 1,
            plane_requests: Vec::new(),
            live_anchors: Vec::new(),
            detached: Vec::new(),
        }
    }

    pub fn with_depth_support(mut self, supported: bool) -> Self {
        self.depth_supported = supported;
        self
    }

    /// Hits returned by every subsequent hit-test
    pub fn set_hits(&mut self, hits: Vec<HitResult>) {
        self.hits = hits;
    }

    /// Refuse the next `count` anchor requests (replaces any pending count)
    pub fn reject_next_anchors(&mut self, count: usize) {
        self.reject_remaining = count;
    }

    pub fn applied_configuration(&self) -> Option<SessionConfiguration> {
        self.applied
    }

    /// Planes an anchor was requested on, in request order
    pub fn plane_anchor_requests(&self) -> &[PlaneId] {
        &self.plane_requests
    }

    pub fn live_anchors(&self) -> &[AnchorHandle] {
        &self.live_anchors
    }

    pub fn detached_anchors(&self) -> &[AnchorHandle] {
        &self.detached
    }

    fn issue_anchor(&mut self) -> Result<AnchorHandle, AnchorError> {
        if self.reject_remaining > 0 {
            self.reject_remaining -= 1;
            return Err(AnchorError::PoseRejected);
        }
        let anchor = AnchorHandle(self.next_anchor);
        self.next_anchor += 1;
        self.live_anchors.push(anchor);
        Ok(anchor)
    }

    /// A frame with nominal camera tracking unless `failure` is set
    pub fn frame(
        timestamp_ns: i64,
        failure: Option<TrackingFailureReason>,
        updated_planes: Vec<Plane>,
    ) -> Frame {
        Frame {
            timestamp_ns,
            camera_pose: Pose::from_translation(Vector3::new(0.0, 1.4, 0.0)),
            camera_tracking: if failure.is_some() {
                TrackingState::Paused
            } else {
                TrackingState::Tracking
            },
            failure_reason: failure,
            updated_planes,
        }
    }

    fn plane(id: u64, plane_type: PlaneType) -> Plane {
        Plane {
            id: PlaneId(id),
            plane_type,
            center_pose: Pose::from_translation(Vector3::new(0.0, 0.0, -1.0 - id as f32 * 0.1)),
            polygon: vec![[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]],
            tracking_state: TrackingState::Tracking,
        }
    }

    /// A tracked 1m x 1m floor plane
    pub fn upward_plane(id: u64) -> Plane {
        Self::plane(id, PlaneType::HorizontalUpwardFacing)
    }

    pub fn downward_plane(id: u64) -> Plane {
        Self::plane(id, PlaneType::HorizontalDownwardFacing)
    }

    pub fn vertical_plane(id: u64) -> Plane {
        Self::plane(id, PlaneType::Vertical)
    }
}

impl Default for SimulatedTrackingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingEngine for SimulatedTrackingEngine {
    fn is_depth_mode_supported(&self, mode: DepthMode) -> bool {
        match mode {
            DepthMode::Disabled => true,
            DepthMode::Automatic => self.depth_supported,
        }
    }

    fn configure(&mut self, config: &SessionConfiguration) {
        self.applied = Some(*config);
    }

    fn hit_test(&self, _frame: &Frame, _x: f32, _y: f32) -> Vec<HitResult> {
        self.hits.clone()
    }

    fn create_plane_anchor(
        &mut self,
        plane: &Plane,
        _pose: &Pose,
    ) -> Result<AnchorHandle, AnchorError> {
        self.plane_requests.push(plane.id);
        self.issue_anchor()
    }

    fn create_hit_anchor(&mut self, hit: &HitResult) -> Result<AnchorHandle, AnchorError> {
        if hit.tracking_state != TrackingState::Tracking {
            return Err(AnchorError::NotTracking);
        }
        self.issue_anchor()
    }

    fn detach_anchor(&mut self, anchor: AnchorHandle) {
        self.live_anchors.retain(|a| *a != anchor);
        self.detached.push(anchor);
    }
}
