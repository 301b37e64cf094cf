//! Rendering engine seam.
//!
//! The scene-graph engine (mesh loading, materials, drawing) lives outside this
//! crate. Everything the placement core needs from it is expressed by the
//! [`SceneRenderer`] trait; node handles come back synchronously even when the
//! engine finishes loading in the background.

use crate::error::SceneError;
use crate::gfx::bounds::Bounds;
use crate::gfx::scene::node::{EditConstraints, NodeId};
use crate::tracking::AnchorHandle;

/// A loaded model instance, ready to be wrapped in a node
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub model_id: String,
    /// Native (unscaled) bounds of the model
    pub bounds: Bounds,
}

/// Operations the placement core performs on the rendering engine
pub trait SceneRenderer {
    /// Load an instance of the model identified by `model_id`
    fn load_model(&mut self, model_id: &str) -> Result<ModelAsset, SceneError>;

    /// Create a container node that follows an engine anchor
    fn create_anchor_node(&mut self, anchor: AnchorHandle) -> Result<NodeId, SceneError>;

    /// Create a node rendering `model` at a uniform `scale`
    fn create_model_node(&mut self, model: &ModelAsset, scale: f32) -> Result<NodeId, SceneError>;

    /// Create a box node covering `bounds` with a flat RGBA color material
    fn create_box_node(&mut self, bounds: Bounds, color: [f32; 4]) -> Result<NodeId, SceneError>;

    /// Parent `child` under `parent`
    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError>;

    fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<(), SceneError>;

    fn set_edit_constraints(
        &mut self,
        node: NodeId,
        constraints: EditConstraints,
    ) -> Result<(), SceneError>;

    fn set_scale(&mut self, node: NodeId, scale: f32) -> Result<(), SceneError>;

    /// Destroy a single node. Children are not destroyed implicitly.
    fn destroy_node(&mut self, node: NodeId) -> Result<(), SceneError>;
}
