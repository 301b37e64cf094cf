//! # Tracking Module
//!
//! The camera-tracking engine (pose estimation, plane detection, depth) is an
//! external collaborator. This module defines the data it hands over each
//! frame, the [`TrackingEngine`] trait the placement core calls into, and the
//! [`TrackingSessionAdapter`] that filters engine output for the controller.

pub mod adapter;
pub mod engine;
pub mod types;

pub use adapter::{is_qualifying_hit, TrackingSessionAdapter, TrackingTick};
pub use engine::{
    DepthMode, InstantPlacementMode, LightEstimationMode, SessionConfiguration, TrackingEngine,
};
pub use types::{
    AnchorHandle, Frame, HitKind, HitResult, Plane, PlaneId, PlaneType, TrackingFailureReason,
    TrackingState,
};
