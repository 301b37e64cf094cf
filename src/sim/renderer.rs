//! In-memory scene graph recording every call, with failure injection.

use std::collections::{BTreeMap, HashMap, HashSet};

use cgmath::{Vector3, Zero};

use crate::error::SceneError;
use crate::gfx::scene::{EditConstraints, ModelAsset, NodeId, NodeKind, SceneRenderer};
use crate::gfx::Bounds;
use crate::tracking::AnchorHandle;

/// A node as the simulated renderer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct SimNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub visible: bool,
    pub scale: f32,
    pub anchor: Option<AnchorHandle>,
    pub model_id: Option<String>,
    pub bounds: Option<Bounds>,
    pub color: Option<[f32; 4]>,
    pub constraints: Option<EditConstraints>,
}

impl SimNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            visible: true,
            scale: 1.0,
            anchor: None,
            model_id: None,
            bounds: None,
            color: None,
            constraints: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SimulatedRenderer {
    models: HashMap<String, Bounds>,
    nodes: BTreeMap<NodeId, SimNode>,
    next_id: u64,
    created: usize,
    destroy_attempts: Vec<NodeId>,
    failing_destroy: HashSet<NodeId>,
    panicking_destroy: HashSet<NodeId>,
    box_material_fails: bool,
}

impl SimulatedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that knows the bundled helmet model
    pub fn with_default_models() -> Self {
        let mut renderer = Self::new();
        renderer.add_model(
            crate::config::DEFAULT_MODEL,
            Bounds::from_center_extents(Vector3::zero(), Vector3::new(1.9, 1.8, 1.7)),
        );
        renderer
    }

    pub fn add_model(&mut self, model_id: &str, bounds: Bounds) {
        self.models.insert(model_id.to_string(), bounds);
    }

    pub fn node(&self, id: NodeId) -> Option<&SimNode> {
        self.nodes.get(&id)
    }

    /// Nodes created and not yet destroyed
    pub fn live_node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes ever created
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Every destroy call, in call order
    pub fn destroy_attempts(&self) -> &[NodeId] {
        &self.destroy_attempts
    }

    /// Make destroying `node` return an error
    pub fn fail_destroy(&mut self, node: NodeId) {
        self.failing_destroy.insert(node);
    }

    /// Make destroying `node` panic
    pub fn panic_on_destroy(&mut self, node: NodeId) {
        self.panicking_destroy.insert(node);
    }

    /// Make bounding box material creation fail
    pub fn fail_box_material(&mut self, fail: bool) {
        self.box_material_fails = fail;
    }

    fn insert(&mut self, node: SimNode) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(id, node);
        self.created += 1;
        id
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SimNode, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))
    }
}

impl SceneRenderer for SimulatedRenderer {
    fn load_model(&mut self, model_id: &str) -> Result<ModelAsset, SceneError> {
        let bounds = self
            .models
            .get(model_id)
            .copied()
            .ok_or_else(|| SceneError::ModelLoad {
                model: model_id.to_string(),
                reason: "asset not found".to_string(),
            })?;
        Ok(ModelAsset {
            model_id: model_id.to_string(),
            bounds,
        })
    }

    fn create_anchor_node(&mut self, anchor: AnchorHandle) -> Result<NodeId, SceneError> {
        let mut node = SimNode::new(NodeKind::Anchor);
        node.anchor = Some(anchor);
        Ok(self.insert(node))
    }

    fn create_model_node(&mut self, model: &ModelAsset, scale: f32) -> Result<NodeId, SceneError> {
        let mut node = SimNode::new(NodeKind::Model);
        node.model_id = Some(model.model_id.clone());
        node.bounds = Some(model.bounds);
        node.scale = scale;
        Ok(self.insert(node))
    }

    fn create_box_node(&mut self, bounds: Bounds, color: [f32; 4]) -> Result<NodeId, SceneError> {
        if self.box_material_fails {
            return Err(SceneError::Material("color material unavailable".to_string()));
        }
        let mut node = SimNode::new(NodeKind::BoundingBox);
        node.bounds = Some(bounds);
        node.color = Some(color);
        Ok(self.insert(node))
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<(), SceneError> {
        self.node_mut(node)?.visible = visible;
        Ok(())
    }

    fn set_edit_constraints(
        &mut self,
        node: NodeId,
        constraints: EditConstraints,
    ) -> Result<(), SceneError> {
        self.node_mut(node)?.constraints = Some(constraints);
        Ok(())
    }

    fn set_scale(&mut self, node: NodeId, scale: f32) -> Result<(), SceneError> {
        self.node_mut(node)?.scale = scale;
        Ok(())
    }

    fn destroy_node(&mut self, node: NodeId) -> Result<(), SceneError> {
        self.destroy_attempts.push(node);
        if self.panicking_destroy.contains(&node) {
            panic!("simulated renderer crashed destroying node {node}");
        }
        if self.failing_destroy.contains(&node) {
            return Err(SceneError::Destroy {
                node,
                reason: "simulated failure".to_string(),
            });
        }
        self.nodes
            .remove(&node)
            .map(|_| ())
            .ok_or(SceneError::UnknownNode(node))
    }
}
