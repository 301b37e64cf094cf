//! # Graphics Module
//!
//! Spatial types and the scene-graph seam for the placement core.
//!
//! - **Poses** ([`pose`]) - Rigid transforms reported by the tracking engine
//! - **Bounds** ([`bounds`]) - Axis-aligned extents for fitting and selection boxes
//! - **Scene** ([`scene`]) - Node handles, edit sessions and the renderer trait

pub mod bounds;
pub mod pose;
pub mod scene;

// Re-export commonly used types
pub use bounds::Bounds;
pub use pose::Pose;
