//! # Simulated Backends
//!
//! In-memory implementations of every external seam: tracking engine,
//! renderer, screen launcher and capability probe. They record what was asked
//! of them and can be told to fail, which makes them the test doubles of this
//! crate and the backends of the scripted demo.

pub mod host;
pub mod renderer;
pub mod tracking;

pub use host::{RecordingLauncher, ScriptedProbe};
pub use renderer::{SimNode, SimulatedRenderer};
pub use tracking::SimulatedTrackingEngine;
