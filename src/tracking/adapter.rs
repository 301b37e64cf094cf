//! # Tracking Session Adapter
//!
//! Wraps a [`TrackingEngine`] and turns its raw output into what the placement
//! controller consumes: one [`TrackingTick`] per frame, hit-tests filtered down
//! to confident results, and anchor derivation. The adapter never touches the
//! scene and never tries to recover from tracking loss.

use log::{debug, info};

use crate::config::{HitTestSettings, SessionSettings, ViewerConfig};
use crate::error::AnchorError;

use super::engine::{DepthMode, SessionConfiguration, TrackingEngine};
use super::types::{AnchorHandle, Frame, HitKind, HitResult, Plane, TrackingFailureReason, TrackingState};

/// Engine output for a single tracking tick
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingTick {
    pub frame: Frame,
}

impl TrackingTick {
    /// Current failure reason, `None` while tracking is nominal
    pub fn failure_reason(&self) -> Option<TrackingFailureReason> {
        self.frame.failure_reason
    }

    /// Planes updated this tick, in engine order
    pub fn updated_planes(&self) -> &[Plane] {
        &self.frame.updated_planes
    }
}

/// Whether a hit is confident enough to place a model on.
///
/// The trackable must be tracking. Plane hits must land inside the plane
/// polygon; depth-only and feature-point hits are accepted only when the
/// settings opt in.
pub fn is_qualifying_hit(hit: &HitResult, settings: &HitTestSettings) -> bool {
    if hit.tracking_state != TrackingState::Tracking {
        return false;
    }
    match hit.kind {
        HitKind::Plane { in_polygon, .. } => in_polygon,
        HitKind::InstantPlacement => true,
        HitKind::DepthPoint => settings.accept_depth_points,
        HitKind::FeaturePoint => settings.accept_feature_points,
    }
}

pub struct TrackingSessionAdapter<E: TrackingEngine> {
    engine: E,
    hit_test: HitTestSettings,
    session: SessionSettings,
    configuration: Option<SessionConfiguration>,
}

impl<E: TrackingEngine> TrackingSessionAdapter<E> {
    pub fn new(engine: E, config: &ViewerConfig) -> Self {
        Self {
            engine,
            hit_test: config.hit_test.clone(),
            session: config.session.clone(),
            configuration: None,
        }
    }

    /// Configure the engine for this session.
    ///
    /// Depth is enabled automatically when the device supports it and the
    /// settings ask for it. Calling this again re-applies the same settings.
    pub fn start(&mut self) -> SessionConfiguration {
        let depth_mode = if self.session.depth_when_supported
            && self.engine.is_depth_mode_supported(DepthMode::Automatic)
        {
            DepthMode::Automatic
        } else {
            DepthMode::Disabled
        };

        let configuration = SessionConfiguration {
            depth_mode,
            instant_placement: self.session.instant_placement,
            light_estimation: self.session.light_estimation,
        };
        self.engine.configure(&configuration);
        info!(target: "ar_placement", "Tracking session configured: {:?}", configuration);
        self.configuration = Some(configuration);
        configuration
    }

    /// Configuration applied by [`start`](Self::start), if any
    pub fn configuration(&self) -> Option<&SessionConfiguration> {
        self.configuration.as_ref()
    }

    /// Wrap an engine frame as a tick
    pub fn on_frame(&self, frame: Frame) -> TrackingTick {
        TrackingTick { frame }
    }

    /// Qualifying hits under the screen coordinate, in engine order
    pub fn hit_test(&self, frame: &Frame, x: f32, y: f32) -> Vec<HitResult> {
        let hits = self.engine.hit_test(frame, x, y);
        let total = hits.len();
        let qualifying: Vec<HitResult> = hits
            .into_iter()
            .filter(|hit| is_qualifying_hit(hit, &self.hit_test))
            .collect();
        debug!(
            target: "ar_placement",
            "Hit-test at ({x:.1}, {y:.1}): {} of {total} hits qualify",
            qualifying.len()
        );
        qualifying
    }

    /// Derive an anchor at the plane's center pose
    pub fn anchor_on_plane(&mut self, plane: &Plane) -> Result<AnchorHandle, AnchorError> {
        if plane.tracking_state != TrackingState::Tracking {
            return Err(AnchorError::NotTracking);
        }
        self.engine.create_plane_anchor(plane, &plane.center_pose)
    }

    /// Derive an anchor at a hit-test result
    pub fn anchor_at_hit(&mut self, hit: &HitResult) -> Result<AnchorHandle, AnchorError> {
        self.engine.create_hit_anchor(hit)
    }

    /// Release an anchor whose placement could not be built
    pub fn release_anchor(&mut self, anchor: AnchorHandle) {
        self.engine.detach_anchor(anchor);
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::Pose;
    use crate::sim::SimulatedTrackingEngine;
    use crate::tracking::{LightEstimationMode, PlaneId};

    fn hit(kind: HitKind, tracking_state: TrackingState) -> HitResult {
        HitResult {
            pose: Pose::identity(),
            distance: 1.0,
            kind,
            tracking_state,
        }
    }

    #[test]
    fn test_qualification_rejects_low_confidence_hits() {
        let settings = HitTestSettings::default();
        let plane_in = HitKind::Plane { plane: PlaneId(1), in_polygon: true };
        let plane_out = HitKind::Plane { plane: PlaneId(1), in_polygon: false };

        assert!(is_qualifying_hit(&hit(plane_in, TrackingState::Tracking), &settings));
        assert!(is_qualifying_hit(&hit(HitKind::InstantPlacement, TrackingState::Tracking), &settings));
        assert!(!is_qualifying_hit(&hit(plane_out, TrackingState::Tracking), &settings));
        assert!(!is_qualifying_hit(&hit(HitKind::DepthPoint, TrackingState::Tracking), &settings));
        assert!(!is_qualifying_hit(&hit(HitKind::FeaturePoint, TrackingState::Tracking), &settings));
        assert!(!is_qualifying_hit(&hit(plane_in, TrackingState::Paused), &settings));
    }

    #[test]
    fn test_qualification_opt_in_point_hits() {
        let settings = HitTestSettings {
            accept_depth_points: true,
            accept_feature_points: true,
        };
        assert!(is_qualifying_hit(&hit(HitKind::DepthPoint, TrackingState::Tracking), &settings));
        assert!(is_qualifying_hit(&hit(HitKind::FeaturePoint, TrackingState::Tracking), &settings));
    }

    #[test]
    fn test_start_enables_depth_when_supported() {
        let engine = SimulatedTrackingEngine::new().with_depth_support(true);
        let mut adapter = TrackingSessionAdapter::new(engine, &ViewerConfig::default());
        let cfg = adapter.start();
        assert_eq!(cfg.depth_mode, DepthMode::Automatic);
        assert_eq!(cfg.light_estimation, LightEstimationMode::EnvironmentalHdr);
        assert_eq!(adapter.engine().applied_configuration(), Some(cfg));

        let engine = SimulatedTrackingEngine::new().with_depth_support(false);
        let mut adapter = TrackingSessionAdapter::new(engine, &ViewerConfig::default());
        assert_eq!(adapter.start().depth_mode, DepthMode::Disabled);
    }

    #[test]
    fn test_hit_test_keeps_engine_order() {
        let mut engine = SimulatedTrackingEngine::new();
        engine.set_hits(vec![
            hit(HitKind::FeaturePoint, TrackingState::Tracking),
            hit(HitKind::Plane { plane: PlaneId(4), in_polygon: true }, TrackingState::Tracking),
            hit(HitKind::InstantPlacement, TrackingState::Tracking),
        ]);
        let adapter = TrackingSessionAdapter::new(engine, &ViewerConfig::default());
        let frame = SimulatedTrackingEngine::frame(0, None, vec![]);
        let hits = adapter.hit_test(&frame, 10.0, 10.0);
        assert_eq!(hits.len(), 2);
        assert!(matches!(hits[0].kind, HitKind::Plane { .. }));
    }

    #[test]
    fn test_plane_anchor_requires_tracking_plane() {
        let mut adapter =
            TrackingSessionAdapter::new(SimulatedTrackingEngine::new(), &ViewerConfig::default());
        let mut plane = SimulatedTrackingEngine::upward_plane(1);
        plane.tracking_state = TrackingState::Stopped;
        assert_eq!(adapter.anchor_on_plane(&plane), Err(AnchorError::NotTracking));
    }
}
