//! Shared edit state for one placement.
//!
//! The model node and its anchor node both report which edit transforms are
//! active on them. Instead of each node toggling the selection box on its own,
//! both write into one [`EditSession`] and the box visibility is derived from
//! the union of their sets.

use std::collections::{BTreeMap, BTreeSet};

use super::node::{EditTransform, NodeId};

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    contributions: BTreeMap<NodeId, BTreeSet<EditTransform>>,
}

impl EditSession {
    /// Create a session accepting contributions from `nodes`
    pub fn new(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            contributions: nodes
                .into_iter()
                .map(|node| (node, BTreeSet::new()))
                .collect(),
        }
    }

    /// Whether `node` contributes to this session
    pub fn tracks(&self, node: NodeId) -> bool {
        self.contributions.contains_key(&node)
    }

    /// Replace the active transforms reported by `node`.
    ///
    /// Returns `Some(visible)` when the derived visibility changed, `None`
    /// otherwise or when `node` does not contribute to this session.
    pub fn update(
        &mut self,
        node: NodeId,
        transforms: impl IntoIterator<Item = EditTransform>,
    ) -> Option<bool> {
        let before = self.is_editing();
        let slot = self.contributions.get_mut(&node)?;
        *slot = transforms.into_iter().collect();
        let after = self.is_editing();
        (before != after).then_some(after)
    }

    /// True while any contributing node has an active edit transform
    pub fn is_editing(&self) -> bool {
        self.contributions.values().any(|set| !set.is_empty())
    }
}
