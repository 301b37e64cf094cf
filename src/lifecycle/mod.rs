//! # Scene Lifecycle
//!
//! Deterministic teardown of everything a session put into the scene graph.
//! A node that fails to die is logged and reported; it never blocks the rest.

pub mod batch;
pub mod manager;

pub use batch::{run_all, BatchReport, ItemFailure};
pub use manager::{SceneLifecycleManager, TeardownReport};
