// src/lib.rs
//! Anchorview
//!
//! The placement core of an AR model viewer: anchors a 3-D model on the first
//! detected floor plane or wherever the user taps, shows a selection box while
//! the model is being edited, and tears every node down when the screen goes
//! away. The tracking engine, renderer and host application are reached
//! through traits; [`sim`] provides in-memory implementations of all of them.

pub mod app;
pub mod bridge;
pub mod config;
pub mod error;
pub mod gfx;
pub mod lifecycle;
pub mod placement;
pub mod prelude;
pub mod sim;
pub mod tracking;

// Re-export main types for convenience
pub use app::ArViewerScreen;
pub use config::ViewerConfig;
pub use error::{AnchorError, CapabilityError, ConfigError, PlacementError, SceneError};
