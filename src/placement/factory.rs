//! # Anchor Node Factory
//!
//! Builds the renderable composite for one placement:
//!
//! ```text
//! anchor node ── model node (scaled to target size, editable)
//!                    └── bounding box node (invisible until edited)
//! ```
//!
//! Construction is all-or-nothing. If the model fails to load nothing is
//! created; if a later step fails, the nodes created so far are destroyed
//! before the error is returned.

use log::{debug, warn};

use crate::config::ViewerConfig;
use crate::error::{PlacementError, SceneError};
use crate::gfx::scene::{EditConstraints, EditSession, ModelAsset, NodeId, SceneRenderer};
use crate::gfx::Pose;
use crate::tracking::AnchorHandle;

use super::anchor::{ModelPlacement, PlacementAnchor, PlacementTrigger};

pub struct AnchorNodeFactory<R: SceneRenderer> {
    renderer: R,
    target_size: f32,
    scale_range: (f32, f32),
    bounding_box_color: [f32; 4],
}

impl<R: SceneRenderer> AnchorNodeFactory<R> {
    pub fn new(renderer: R, config: &ViewerConfig) -> Self {
        Self {
            renderer,
            target_size: config.model.target_size,
            scale_range: config.scale_range(),
            bounding_box_color: config.model.bounding_box_color,
        }
    }

    /// Build the composite for `model_id` on an already derived anchor
    pub fn create_placement(
        &mut self,
        anchor: AnchorHandle,
        pose: Pose,
        trigger: PlacementTrigger,
        model_id: &str,
    ) -> Result<PlacementAnchor, PlacementError> {
        let asset = self
            .renderer
            .load_model(model_id)
            .map_err(PlacementError::Load)?;

        let mut created = Vec::with_capacity(3);
        match self.assemble(&asset, anchor, &mut created) {
            Ok((anchor_node, model_node, bounding_box_node, scale, constraints)) => {
                debug!(
                    target: "ar_placement",
                    "Built placement for '{}' ({:?}): anchor {}, model {}, box {}, scale {:.3}",
                    model_id, trigger, anchor_node, model_node, bounding_box_node, scale
                );
                let edit_session = EditSession::new([model_node, anchor_node]);
                Ok(PlacementAnchor {
                    anchor,
                    anchor_node,
                    pose,
                    trigger,
                    placement: ModelPlacement::new(
                        asset.model_id,
                        model_node,
                        bounding_box_node,
                        asset.bounds,
                        scale,
                        constraints,
                        edit_session,
                    ),
                })
            }
            Err(err) => {
                self.rollback(&created);
                Err(match err {
                    SceneError::ModelLoad { .. } | SceneError::Material(_) => {
                        PlacementError::Load(err)
                    }
                    other => PlacementError::Assembly(other),
                })
            }
        }
    }

    fn assemble(
        &mut self,
        asset: &ModelAsset,
        anchor: AnchorHandle,
        created: &mut Vec<NodeId>,
    ) -> Result<(NodeId, NodeId, NodeId, f32, EditConstraints), SceneError> {
        let anchor_node = self.renderer.create_anchor_node(anchor)?;
        created.push(anchor_node);

        let scale = asset.bounds.scale_to_units(self.target_size);
        let model_node = self.renderer.create_model_node(asset, scale)?;
        created.push(model_node);

        let constraints = EditConstraints {
            editable: true,
            scale_range: self.scale_range,
        };
        self.renderer.set_edit_constraints(model_node, constraints)?;

        // Box lives in model-local space, so it uses the native bounds
        let bounding_box_node = self
            .renderer
            .create_box_node(asset.bounds, self.bounding_box_color)?;
        created.push(bounding_box_node);
        self.renderer.set_visible(bounding_box_node, false)?;

        self.renderer.add_child(model_node, bounding_box_node)?;
        self.renderer.add_child(anchor_node, model_node)?;

        Ok((anchor_node, model_node, bounding_box_node, scale, constraints))
    }

    fn rollback(&mut self, created: &[NodeId]) {
        for node in created.iter().rev() {
            if let Err(err) = self.renderer.destroy_node(*node) {
                warn!(target: "ar_placement", "Rollback of node {} failed: {}", node, err);
            }
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
