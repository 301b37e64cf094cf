//! # Scene Graph Module
//!
//! Node handles, edit state and the rendering engine seam used by the
//! placement core.
//!
//! ## Key Components
//!
//! - [`SceneRenderer`] - Operations the placement core needs from the renderer
//! - [`NodeId`] / [`NodeKind`] - Handles to engine-owned nodes
//! - [`EditSession`] - Shared edit state deciding selection box visibility
//! - [`ModelAsset`] - A loaded model with its native bounds

pub mod edit_session;
pub mod node;
pub mod renderer;

// Re-export main types
pub use edit_session::EditSession;
pub use node::{EditConstraints, EditTransform, NodeId, NodeKind};
pub use renderer::{ModelAsset, SceneRenderer};
