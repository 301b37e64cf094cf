//! # Anchorview Prelude
//!
//! Brings the types a host integration typically touches into scope.
//!
//! ## Usage
//!
//! ```rust
//! use anchorview::prelude::*;
//!
//! let config = ViewerConfig::default();
//! let mut screen = ArViewerScreen::start(
//!     LaunchParams { model_file: config.model.default_model.clone() },
//!     SimulatedTrackingEngine::new(),
//!     SimulatedRenderer::with_default_models(),
//!     &config,
//! );
//! screen.on_frame(SimulatedTrackingEngine::frame(0, None, vec![SimulatedTrackingEngine::upward_plane(1)]));
//! assert_eq!(screen.state(), PlacementState::HasPlacement);
//! let report = screen.dismiss();
//! assert!(report.is_clean());
//! ```

// Core screen and configuration
pub use crate::app::ArViewerScreen;
pub use crate::config::ViewerConfig;

// Host bridge
pub use crate::bridge::{
    Availability, BridgeResponse, CapabilityProbe, HostBridge, LaunchParams, MethodCall,
    ScreenLauncher,
};

// Tracking engine seam
pub use crate::tracking::{
    Frame, HitResult, Plane, SessionConfiguration, TrackingEngine, TrackingFailureReason,
};

// Scene seam and placement
pub use crate::gfx::scene::{EditTransform, NodeId, SceneRenderer};
pub use crate::gfx::{Bounds, Pose};
pub use crate::lifecycle::TeardownReport;
pub use crate::placement::{PlacementEvent, PlacementState, Prompt, TapEvent, TapOutcome};

// In-memory backends
pub use crate::sim::{
    RecordingLauncher, ScriptedProbe, SimulatedRenderer, SimulatedTrackingEngine,
};

// Common external dependencies
pub use cgmath::{Quaternion, Vector3};
