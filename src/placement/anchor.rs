use crate::gfx::scene::{EditConstraints, EditSession, EditTransform, NodeId};
use crate::gfx::{Bounds, Pose};
use crate::tracking::AnchorHandle;

/// How an anchor came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementTrigger {
    /// Automatic placement on the first upward-facing plane
    PlaneAuto,
    /// User tapped on a surface
    Tap,
}

/// The model composite hanging off an anchor
#[derive(Debug, Clone)]
pub struct ModelPlacement {
    pub model_id: String,
    pub model_node: NodeId,
    pub bounding_box_node: NodeId,
    /// Native bounds of the loaded model
    pub model_bounds: Bounds,
    scale: f32,
    constraints: EditConstraints,
    edit_session: EditSession,
}

impl ModelPlacement {
    pub(crate) fn new(
        model_id: String,
        model_node: NodeId,
        bounding_box_node: NodeId,
        model_bounds: Bounds,
        scale: f32,
        constraints: EditConstraints,
        edit_session: EditSession,
    ) -> Self {
        Self {
            model_id,
            model_node,
            bounding_box_node,
            model_bounds,
            scale,
            constraints,
            edit_session,
        }
    }

    /// Current uniform scale of the model node
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_editable(&self) -> bool {
        self.constraints.editable
    }

    pub fn constraints(&self) -> EditConstraints {
        self.constraints
    }

    /// Selection box visibility, derived from the edit session
    pub fn bounding_box_visible(&self) -> bool {
        self.edit_session.is_editing()
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit_session
    }

    /// Record the edit transforms reported by `node`.
    ///
    /// Returns the new selection box visibility when it changed.
    pub(crate) fn update_editing(
        &mut self,
        node: NodeId,
        transforms: impl IntoIterator<Item = EditTransform>,
    ) -> Option<bool> {
        self.edit_session.update(node, transforms)
    }

    /// Clamp and store a requested scale, returning the applied value
    pub(crate) fn rescale(&mut self, requested: f32) -> f32 {
        self.scale = self.constraints.clamp_scale(requested);
        self.scale
    }
}

/// An engine anchor together with the model placed on it
#[derive(Debug, Clone)]
pub struct PlacementAnchor {
    pub anchor: AnchorHandle,
    pub anchor_node: NodeId,
    pub pose: Pose,
    pub trigger: PlacementTrigger,
    pub placement: ModelPlacement,
}

impl PlacementAnchor {
    /// Every node of the composite, children first
    pub fn nodes(&self) -> [NodeId; 3] {
        [
            self.placement.bounding_box_node,
            self.placement.model_node,
            self.anchor_node,
        ]
    }
}
