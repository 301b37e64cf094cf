//! Scene teardown for a finished AR session.

use log::{debug, error, info};

use crate::error::SceneError;
use crate::gfx::scene::{NodeId, SceneRenderer};
use crate::placement::PlacementAnchor;

use super::batch::{run_all, BatchReport};

/// Per-node outcome of a teardown
pub type TeardownReport = BatchReport<NodeId, SceneError>;

/// Destroys every node of a session exactly once
#[derive(Debug, Default)]
pub struct SceneLifecycleManager {
    torn_down: bool,
}

impl SceneLifecycleManager {
    pub fn new() -> Self {
        Self { torn_down: false }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Destroy all nodes of `anchors`.
    ///
    /// Anchors go newest first, each composite children first. A failing node
    /// is logged and recorded; the remaining nodes are still destroyed. Only
    /// the first call does anything; later calls return an empty report.
    pub fn teardown<R: SceneRenderer>(
        &mut self,
        anchors: Vec<PlacementAnchor>,
        renderer: &mut R,
    ) -> TeardownReport {
        if self.torn_down {
            debug!(target: "ar_cleanup", "Teardown already ran, ignoring");
            return TeardownReport::empty();
        }
        self.torn_down = true;

        let nodes: Vec<NodeId> = anchors
            .iter()
            .rev()
            .flat_map(|anchor| anchor.nodes())
            .collect();

        let report = run_all(nodes, |node| renderer.destroy_node(node));

        for (node, failure) in &report.failures {
            error!(target: "ar_cleanup", "Error destroying node {}: {}", node, failure);
        }
        info!(
            target: "ar_cleanup",
            "Teardown destroyed {} of {} nodes across {} anchors",
            report.succeeded.len(),
            report.attempted(),
            anchors.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::gfx::Pose;
    use crate::lifecycle::ItemFailure;
    use crate::placement::{AnchorNodeFactory, PlacementTrigger};
    use crate::sim::SimulatedRenderer;
    use crate::tracking::AnchorHandle;
    use proptest::prelude::*;

    fn place(factory: &mut AnchorNodeFactory<SimulatedRenderer>, n: usize) -> Vec<PlacementAnchor> {
        (0..n)
            .map(|i| {
                factory
                    .create_placement(
                        AnchorHandle(i as u64),
                        Pose::identity(),
                        PlacementTrigger::Tap,
                        "models/damaged_helmet.glb",
                    )
                    .unwrap()
            })
            .collect()
    }

    fn factory() -> AnchorNodeFactory<SimulatedRenderer> {
        AnchorNodeFactory::new(SimulatedRenderer::with_default_models(), &ViewerConfig::default())
    }

    #[test]
    fn test_teardown_destroys_everything_children_first() {
        let mut factory = factory();
        let anchors = place(&mut factory, 2);
        let expected_first = anchors[1].placement.bounding_box_node;

        let mut manager = SceneLifecycleManager::new();
        let report = manager.teardown(anchors, factory.renderer_mut());

        assert!(report.is_clean());
        assert_eq!(report.attempted(), 6);
        assert_eq!(factory.renderer().live_node_count(), 0);
        assert_eq!(factory.renderer().destroy_attempts()[0], expected_first);
    }

    #[test]
    fn test_teardown_runs_once() {
        let mut factory = factory();
        let anchors = place(&mut factory, 1);
        let again = anchors.clone();

        let mut manager = SceneLifecycleManager::new();
        assert_eq!(manager.teardown(anchors, factory.renderer_mut()).attempted(), 3);
        assert!(manager.is_torn_down());
        assert_eq!(manager.teardown(again, factory.renderer_mut()).attempted(), 0);
        assert_eq!(factory.renderer().destroy_attempts().len(), 3);
    }

    #[test]
    fn test_panicking_node_is_isolated() {
        let mut factory = factory();
        let anchors = place(&mut factory, 1);
        let model = anchors[0].placement.model_node;
        factory.renderer_mut().panic_on_destroy(model);

        let report = SceneLifecycleManager::new().teardown(anchors, factory.renderer_mut());

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.succeeded.len(), 2);
        assert!(matches!(report.failures[0], (node, ItemFailure::Panicked(_)) if node == model));
    }

    proptest! {
        #[test]
        fn prop_every_node_attempted_once(
            count in 0usize..6,
            failing in prop::collection::vec(any::<bool>(), 18),
        ) {
            let mut factory = factory();
            let anchors = place(&mut factory, count);
            let created: Vec<NodeId> = anchors.iter().flat_map(|a| a.nodes()).collect();
            for (node, fail) in created.iter().zip(failing.iter()) {
                if *fail {
                    factory.renderer_mut().fail_destroy(*node);
                }
            }

            let report = SceneLifecycleManager::new().teardown(anchors, factory.renderer_mut());

            let mut attempts = factory.renderer().destroy_attempts().to_vec();
            prop_assert_eq!(attempts.len(), created.len());
            prop_assert_eq!(report.attempted(), created.len());
            attempts.sort();
            attempts.dedup();
            prop_assert_eq!(attempts.len(), created.len());
            let expected_failures = failing.iter().take(created.len()).filter(|f| **f).count();
            prop_assert_eq!(report.failures.len(), expected_failures);
        }
    }
}
