//! # AR Viewer Screen
//!
//! One screen instance is one AR session. It owns the tracking adapter, the
//! placement controller, the node factory (and through it the renderer) and
//! the lifecycle manager, and forwards frames and gestures between them.
//!
//! Teardown happens exactly once: on [`ArViewerScreen::dismiss`], or in `Drop`
//! if the screen goes away without being dismissed.

use std::collections::HashMap;
use std::convert::Infallible;

use log::{error, info};

use crate::bridge::LaunchParams;
use crate::config::ViewerConfig;
use crate::gfx::scene::{EditTransform, NodeId, SceneRenderer};
use crate::lifecycle::{run_all, SceneLifecycleManager, TeardownReport};
use crate::placement::{
    AnchorNodeFactory, PlacementAnchor, PlacementController, PlacementEvent, PlacementState,
    Prompt, TapEvent, TapOutcome,
};
use crate::tracking::{
    AnchorHandle, Frame, SessionConfiguration, TrackingEngine, TrackingSessionAdapter,
};

pub struct ArViewerScreen<E: TrackingEngine, R: SceneRenderer> {
    tracking: TrackingSessionAdapter<E>,
    controller: PlacementController,
    factory: AnchorNodeFactory<R>,
    lifecycle: SceneLifecycleManager,
}

impl<E: TrackingEngine, R: SceneRenderer> ArViewerScreen<E, R> {
    /// Start a session for the launched model
    pub fn start(params: LaunchParams, engine: E, renderer: R, config: &ViewerConfig) -> Self {
        let mut tracking = TrackingSessionAdapter::new(engine, config);
        tracking.start();
        info!(target: "ar_model", "AR viewer started with model '{}'", params.model_file);

        Self {
            tracking,
            controller: PlacementController::new(params.model_file, config),
            factory: AnchorNodeFactory::new(renderer, config),
            lifecycle: SceneLifecycleManager::new(),
        }
    }

    /// Start from raw launch extras, falling back to the configured default model
    pub fn from_extras(
        extras: &HashMap<String, String>,
        engine: E,
        renderer: R,
        config: &ViewerConfig,
    ) -> Self {
        let params = LaunchParams::from_extras(extras, &config.model.default_model);
        Self::start(params, engine, renderer, config)
    }

    /// Feed one engine frame
    pub fn on_frame(&mut self, frame: Frame) {
        let tick = self.tracking.on_frame(frame);
        self.controller
            .on_tracking_tick(tick, &mut self.tracking, &mut self.factory);
    }

    /// Feed one confirmed single tap
    pub fn on_single_tap(&mut self, tap: TapEvent) -> TapOutcome {
        self.controller
            .on_single_tap(tap, &mut self.tracking, &mut self.factory)
    }

    /// Feed an "editing changed" report from a node
    pub fn on_editing_changed(
        &mut self,
        node: NodeId,
        transforms: impl IntoIterator<Item = EditTransform>,
    ) -> Option<bool> {
        self.controller
            .on_editing_changed(node, transforms, self.factory.renderer_mut())
    }

    /// Feed a scale gesture on a model node
    pub fn on_scale(&mut self, model_node: NodeId, requested: f32) -> Option<f32> {
        self.controller
            .apply_scale(model_node, requested, self.factory.renderer_mut())
    }

    pub fn drain_events(&mut self) -> Vec<PlacementEvent> {
        self.controller.drain_events()
    }

    pub fn state(&self) -> PlacementState {
        self.controller.state()
    }

    pub fn prompt(&self) -> Prompt {
        self.controller.prompt()
    }

    pub fn prompt_text(&self) -> String {
        self.controller.prompt_text()
    }

    pub fn plane_overlay_visible(&self) -> bool {
        self.controller.plane_overlay_visible()
    }

    pub fn anchors(&self) -> &[PlacementAnchor] {
        self.controller.anchors()
    }

    pub fn model_id(&self) -> &str {
        &self.controller.session().model_id
    }

    pub fn session_configuration(&self) -> Option<&SessionConfiguration> {
        self.tracking.configuration()
    }

    pub fn renderer(&self) -> &R {
        self.factory.renderer()
    }

    pub fn engine(&self) -> &E {
        self.tracking.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.tracking.engine_mut()
    }

    pub fn is_dismissed(&self) -> bool {
        self.lifecycle.is_torn_down()
    }

    /// Tear the session down: destroy every node, then release every engine
    /// anchor. Later calls return an empty report.
    pub fn dismiss(&mut self) -> TeardownReport {
        let anchors = self.controller.take_anchors();
        let handles: Vec<AnchorHandle> = anchors.iter().map(|a| a.anchor).collect();
        let report = self.lifecycle.teardown(anchors, self.factory.renderer_mut());

        let tracking = &mut self.tracking;
        let released = run_all(handles, |anchor| {
            tracking.release_anchor(anchor);
            Ok::<(), Infallible>(())
        });
        for (anchor, failure) in &released.failures {
            error!(target: "ar_cleanup", "Error releasing anchor {:?}: {}", anchor, failure);
        }
        report
    }
}

impl<E: TrackingEngine, R: SceneRenderer> Drop for ArViewerScreen<E, R> {
    fn drop(&mut self) {
        if !self.lifecycle.is_torn_down() {
            info!(target: "ar_cleanup", "AR viewer dropped without dismissal, tearing down");
            self.dismiss();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;
    use crate::gfx::Pose;
    use crate::placement::PlacementTrigger;
    use crate::sim::{SimulatedRenderer, SimulatedTrackingEngine};
    use crate::tracking::{HitKind, HitResult, PlaneId, TrackingFailureReason, TrackingState};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Screen = ArViewerScreen<SimulatedTrackingEngine, SimulatedRenderer>;

    fn screen() -> Screen {
        ArViewerScreen::start(
            LaunchParams {
                model_file: DEFAULT_MODEL.to_string(),
            },
            SimulatedTrackingEngine::new(),
            SimulatedRenderer::with_default_models(),
            &ViewerConfig::default(),
        )
    }

    fn floor_hit() -> HitResult {
        HitResult {
            pose: Pose::identity(),
            distance: 0.8,
            kind: HitKind::Plane { plane: PlaneId(1), in_polygon: true },
            tracking_state: TrackingState::Tracking,
        }
    }

    #[test]
    fn test_start_configures_engine() {
        let screen = screen();
        assert!(screen.engine().applied_configuration().is_some());
        assert_eq!(screen.session_configuration().copied(), screen.engine().applied_configuration());
        assert_eq!(screen.model_id(), DEFAULT_MODEL);
        assert_eq!(screen.prompt(), Prompt::ScanForSurface);
    }

    #[test]
    fn test_from_extras_defaults_model() {
        let screen = ArViewerScreen::from_extras(
            &HashMap::new(),
            SimulatedTrackingEngine::new(),
            SimulatedRenderer::with_default_models(),
            &ViewerConfig::default(),
        );
        assert_eq!(screen.model_id(), DEFAULT_MODEL);
    }

    #[test]
    fn test_full_session() {
        let mut screen = screen();

        screen.on_frame(SimulatedTrackingEngine::frame(
            1,
            Some(TrackingFailureReason::ExcessiveMotion),
            vec![],
        ));
        assert_eq!(screen.prompt_text(), "Moving too fast. Slow down.");

        screen.on_frame(SimulatedTrackingEngine::frame(
            2,
            None,
            vec![SimulatedTrackingEngine::upward_plane(1)],
        ));
        assert_eq!(screen.state(), PlacementState::HasPlacement);
        assert!(screen.plane_overlay_visible());

        screen.engine_mut().set_hits(vec![floor_hit()]);
        assert_eq!(
            screen.on_single_tap(TapEvent::on_empty_space(10.0, 20.0)),
            TapOutcome::Placed { index: 1 }
        );
        assert!(!screen.plane_overlay_visible());
        assert_eq!(screen.anchors()[1].trigger, PlacementTrigger::Tap);
        assert_eq!(screen.renderer().live_node_count(), 6);

        let model = screen.anchors()[1].placement.model_node;
        assert_eq!(screen.on_editing_changed(model, [EditTransform::Rotate]), Some(true));
        assert_eq!(screen.on_scale(model, 0.3), Some(0.3));

        let report = screen.dismiss();
        assert!(report.is_clean());
        assert_eq!(report.attempted(), 6);
        assert_eq!(screen.renderer().live_node_count(), 0);
        assert!(screen.anchors().is_empty());
        assert!(screen.engine().live_anchors().is_empty());
        assert_eq!(screen.engine().detached_anchors().len(), 2);

        // Dismissing again does nothing
        assert_eq!(screen.dismiss().attempted(), 0);
        assert_eq!(screen.renderer().destroy_attempts().len(), 6);
        assert_eq!(screen.engine().detached_anchors().len(), 2);
    }

    /// Renderer wrapper sharing its destroy log with the test after the screen is gone
    struct SharedLog {
        inner: SimulatedRenderer,
        destroyed: Rc<RefCell<Vec<NodeId>>>,
    }

    impl SceneRenderer for SharedLog {
        fn load_model(&mut self, model_id: &str) -> Result<crate::gfx::scene::ModelAsset, crate::error::SceneError> {
            self.inner.load_model(model_id)
        }
        fn create_anchor_node(&mut self, anchor: crate::tracking::AnchorHandle) -> Result<NodeId, crate::error::SceneError> {
            self.inner.create_anchor_node(anchor)
        }
        fn create_model_node(&mut self, model: &crate::gfx::scene::ModelAsset, scale: f32) -> Result<NodeId, crate::error::SceneError> {
            self.inner.create_model_node(model, scale)
        }
        fn create_box_node(&mut self, bounds: crate::gfx::Bounds, color: [f32; 4]) -> Result<NodeId, crate::error::SceneError> {
            self.inner.create_box_node(bounds, color)
        }
        fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), crate::error::SceneError> {
            self.inner.add_child(parent, child)
        }
        fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<(), crate::error::SceneError> {
            self.inner.set_visible(node, visible)
        }
        fn set_edit_constraints(&mut self, node: NodeId, constraints: crate::gfx::scene::EditConstraints) -> Result<(), crate::error::SceneError> {
            self.inner.set_edit_constraints(node, constraints)
        }
        fn set_scale(&mut self, node: NodeId, scale: f32) -> Result<(), crate::error::SceneError> {
            self.inner.set_scale(node, scale)
        }
        fn destroy_node(&mut self, node: NodeId) -> Result<(), crate::error::SceneError> {
            self.destroyed.borrow_mut().push(node);
            self.inner.destroy_node(node)
        }
    }

    #[test]
    fn test_drop_without_dismiss_tears_down_once() {
        let destroyed = Rc::new(RefCell::new(Vec::new()));
        {
            let mut screen = ArViewerScreen::start(
                LaunchParams {
                    model_file: DEFAULT_MODEL.to_string(),
                },
                SimulatedTrackingEngine::new(),
                SharedLog {
                    inner: SimulatedRenderer::with_default_models(),
                    destroyed: Rc::clone(&destroyed),
                },
                &ViewerConfig::default(),
            );
            screen.on_frame(SimulatedTrackingEngine::frame(
                1,
                None,
                vec![SimulatedTrackingEngine::upward_plane(1)],
            ));
            assert_eq!(screen.anchors().len(), 1);
        }
        assert_eq!(destroyed.borrow().len(), 3);
    }

    #[test]
    fn test_bridge_launch_reaches_screen() {
        use crate::bridge::{Availability, HostBridge};
        use crate::sim::{RecordingLauncher, ScriptedProbe};

        let config = ViewerConfig::default();
        let mut bridge = HostBridge::new(
            RecordingLauncher::default(),
            ScriptedProbe::answer(Availability::SupportedInstalled),
            &config,
        );
        bridge.handle_json(r#"{"method":"launchArViewer","arguments":{"modelPath":"models/chair.glb"}}"#);
        let params = bridge.launcher_mut().take_launched().remove(0);

        let mut renderer = SimulatedRenderer::with_default_models();
        renderer.add_model(
            "models/chair.glb",
            crate::gfx::Bounds::from_center_extents(
                cgmath::Vector3::new(0.0, 0.5, 0.0),
                cgmath::Vector3::new(0.5, 1.0, 0.5),
            ),
        );
        let extras = params.to_extras();
        let mut screen =
            ArViewerScreen::from_extras(&extras, SimulatedTrackingEngine::new(), renderer, &config);
        assert_eq!(screen.model_id(), "models/chair.glb");

        screen.on_frame(SimulatedTrackingEngine::frame(
            1,
            None,
            vec![SimulatedTrackingEngine::upward_plane(1)],
        ));
        let placement = &screen.anchors()[0].placement;
        assert_eq!(placement.model_id, "models/chair.glb");
        assert!((placement.scale() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_dismissed_screen_ignores_input() {
        let mut screen = screen();
        screen.dismiss();
        screen.on_frame(SimulatedTrackingEngine::frame(
            1,
            None,
            vec![SimulatedTrackingEngine::upward_plane(1)],
        ));
        assert!(screen.anchors().is_empty());
        assert_eq!(screen.renderer().created_count(), 0);
        assert!(screen.is_dismissed());
    }
}
