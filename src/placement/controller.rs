//! # Placement Controller
//!
//! The interaction state machine of the AR viewer.
//!
//! ```text
//! AwaitingFirstPlacement ──(upward plane anchored | tap anchored)──▶ HasPlacement
//!                                                  (tap anchored) ──┘ ◀──┐
//!                                                                    └───┘
//! ```
//!
//! - **Auto-placement** runs only while the anchor collection is empty, so at
//!   most one anchor per session is ever created from plane detection.
//! - **Tap placement** is unbounded; a tap that lands on an existing node
//!   belongs to editing and never places anything.
//! - The plane overlay starts visible and is hidden for good by the first
//!   successful tap placement.
//!
//! Anchor derivation failures are silent and retried on the next tick or tap.
//! Load failures are logged. Neither changes state. Nothing is ever removed
//! from the collection except by [`take_anchors`](PlacementController::take_anchors)
//! at teardown.

use log::{debug, info, warn};

use crate::config::{PromptSettings, ViewerConfig};
use crate::error::{AnchorError, PlacementError};
use crate::gfx::scene::{EditTransform, NodeId, SceneRenderer};
use crate::tracking::{
    Frame, TrackingEngine, TrackingFailureReason, TrackingSessionAdapter, TrackingTick,
};

use super::anchor::{PlacementAnchor, PlacementTrigger};
use super::events::{PlacementEvent, Prompt};
use super::factory::AnchorNodeFactory;

/// Coarse placement state, derived from the anchor collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    AwaitingFirstPlacement,
    HasPlacement,
}

/// Live state of one AR run
#[derive(Debug, Clone)]
pub struct Session {
    pub model_id: String,
    pub plane_overlay_visible: bool,
    pub tracking_failure: Option<TrackingFailureReason>,
    /// Most recent frame, replaced every tick
    pub frame: Option<Frame>,
}

/// A confirmed single tap on the camera view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    pub x: f32,
    pub y: f32,
    /// Node under the finger, as resolved by the renderer's collision system
    pub hit_node: Option<NodeId>,
}

impl TapEvent {
    pub fn on_empty_space(x: f32, y: f32) -> Self {
        Self { x, y, hit_node: None }
    }

    pub fn on_node(x: f32, y: f32, node: NodeId) -> Self {
        Self {
            x,
            y,
            hit_node: Some(node),
        }
    }
}

/// What a tap ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    Placed { index: usize },
    /// Tap landed on an existing node; left to editing
    HitExistingNode(NodeId),
    /// No frame has arrived yet
    NoFrame,
    NoQualifyingHit,
    AnchorRejected(AnchorError),
    LoadFailed(PlacementError),
    /// Session already torn down
    Terminated,
}

pub struct PlacementController {
    session: Session,
    anchors: Vec<PlacementAnchor>,
    events: Vec<PlacementEvent>,
    prompts: PromptSettings,
    prompt: Prompt,
    auto_placements: usize,
    terminated: bool,
}

impl PlacementController {
    pub fn new(model_id: impl Into<String>, config: &ViewerConfig) -> Self {
        Self {
            session: Session {
                model_id: model_id.into(),
                plane_overlay_visible: true,
                tracking_failure: None,
                frame: None,
            },
            anchors: Vec::new(),
            events: Vec::new(),
            prompts: config.prompts.clone(),
            prompt: Prompt::ScanForSurface,
            auto_placements: 0,
            terminated: false,
        }
    }

    pub fn state(&self) -> PlacementState {
        if self.anchors.is_empty() {
            PlacementState::AwaitingFirstPlacement
        } else {
            PlacementState::HasPlacement
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn anchors(&self) -> &[PlacementAnchor] {
        &self.anchors
    }

    pub fn plane_overlay_visible(&self) -> bool {
        self.session.plane_overlay_visible
    }

    /// Anchors created by plane auto-placement this session (0 or 1)
    pub fn auto_placement_count(&self) -> usize {
        self.auto_placements
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    /// Overlay text for the current state
    pub fn prompt_text(&self) -> String {
        self.prompt.text(&self.prompts)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Consume one tracking tick
    pub fn on_tracking_tick<E, R>(
        &mut self,
        tick: TrackingTick,
        tracking: &mut TrackingSessionAdapter<E>,
        factory: &mut AnchorNodeFactory<R>,
    ) where
        E: TrackingEngine,
        R: SceneRenderer,
    {
        if self.terminated {
            return;
        }

        let failure = tick.failure_reason();
        if failure != self.session.tracking_failure {
            match failure {
                Some(reason) => info!(target: "ar_placement", "Tracking degraded: {:?}", reason),
                None => info!(target: "ar_placement", "Tracking recovered"),
            }
            self.session.tracking_failure = failure;
            self.events.push(PlacementEvent::TrackingFailureChanged(failure));
        }

        if self.anchors.is_empty() {
            self.try_auto_place(&tick, tracking, factory);
        }

        self.session.frame = Some(tick.frame);
        self.refresh_prompt();
    }

    fn try_auto_place<E, R>(
        &mut self,
        tick: &TrackingTick,
        tracking: &mut TrackingSessionAdapter<E>,
        factory: &mut AnchorNodeFactory<R>,
    ) where
        E: TrackingEngine,
        R: SceneRenderer,
    {
        // First upward plane in engine order; no further ranking
        let Some(plane) = tick.updated_planes().iter().find(|p| p.is_horizontal_upward()) else {
            return;
        };

        let anchor = match tracking.anchor_on_plane(plane) {
            Ok(anchor) => anchor,
            Err(err) => {
                debug!(target: "ar_placement", "Plane {:?} not anchorable yet: {}", plane.id, err);
                return;
            }
        };

        match factory.create_placement(
            anchor,
            plane.center_pose,
            PlacementTrigger::PlaneAuto,
            &self.session.model_id,
        ) {
            Ok(placed) => {
                self.auto_placements += 1;
                self.push_anchor(placed);
            }
            Err(err) => {
                warn!(target: "ar_placement", "Auto-placement on plane {:?} failed: {}", plane.id, err);
                tracking.release_anchor(anchor);
            }
        }
    }

    /// Handle a confirmed single tap
    pub fn on_single_tap<E, R>(
        &mut self,
        tap: TapEvent,
        tracking: &mut TrackingSessionAdapter<E>,
        factory: &mut AnchorNodeFactory<R>,
    ) -> TapOutcome
    where
        E: TrackingEngine,
        R: SceneRenderer,
    {
        if self.terminated {
            return TapOutcome::Terminated;
        }
        if let Some(node) = tap.hit_node {
            return TapOutcome::HitExistingNode(node);
        }
        let Some(frame) = self.session.frame.as_ref() else {
            return TapOutcome::NoFrame;
        };

        let Some(hit) = tracking.hit_test(frame, tap.x, tap.y).into_iter().next() else {
            return TapOutcome::NoQualifyingHit;
        };

        let anchor = match tracking.anchor_at_hit(&hit) {
            Ok(anchor) => anchor,
            Err(err) => {
                debug!(target: "ar_placement", "Tap anchor rejected: {}", err);
                return TapOutcome::AnchorRejected(err);
            }
        };

        match factory.create_placement(anchor, hit.pose, PlacementTrigger::Tap, &self.session.model_id)
        {
            Ok(placed) => {
                if self.session.plane_overlay_visible {
                    self.session.plane_overlay_visible = false;
                    self.events.push(PlacementEvent::PlaneOverlayChanged(false));
                }
                let index = self.push_anchor(placed);
                self.refresh_prompt();
                TapOutcome::Placed { index }
            }
            Err(err) => {
                warn!(target: "ar_placement", "Tap placement failed: {}", err);
                tracking.release_anchor(anchor);
                TapOutcome::LoadFailed(err)
            }
        }
    }

    /// Route an "editing changed" report from a model or anchor node.
    ///
    /// Returns the new selection box visibility when it changed.
    pub fn on_editing_changed<R: SceneRenderer>(
        &mut self,
        node: NodeId,
        transforms: impl IntoIterator<Item = EditTransform>,
        renderer: &mut R,
    ) -> Option<bool> {
        if self.terminated {
            return None;
        }
        let anchor = self
            .anchors
            .iter_mut()
            .find(|a| a.placement.edit_session().tracks(node))?;

        let visible = anchor.placement.update_editing(node, transforms)?;
        let bounding_box = anchor.placement.bounding_box_node;
        if let Err(err) = renderer.set_visible(bounding_box, visible) {
            warn!(target: "ar_placement", "Could not toggle bounding box {}: {}", bounding_box, err);
        }
        self.events.push(PlacementEvent::BoundingBoxVisibilityChanged {
            anchor_node: anchor.anchor_node,
            visible,
        });
        Some(visible)
    }

    /// Apply a scale gesture to the model node, clamped to the editable range.
    ///
    /// Returns the applied scale, or `None` if `model_node` is unknown.
    pub fn apply_scale<R: SceneRenderer>(
        &mut self,
        model_node: NodeId,
        requested: f32,
        renderer: &mut R,
    ) -> Option<f32> {
        if self.terminated {
            return None;
        }
        let placement = self
            .anchors
            .iter_mut()
            .map(|a| &mut a.placement)
            .find(|p| p.model_node == model_node && p.is_editable())?;

        let scale = placement.rescale(requested);
        if let Err(err) = renderer.set_scale(model_node, scale) {
            warn!(target: "ar_placement", "Could not scale model {}: {}", model_node, err);
        }
        self.events.push(PlacementEvent::ModelScaled { model_node, scale });
        Some(scale)
    }

    /// Drain queued change events for the render step
    pub fn drain_events(&mut self) -> Vec<PlacementEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand every anchor over for teardown. The controller is terminal afterwards.
    pub fn take_anchors(&mut self) -> Vec<PlacementAnchor> {
        self.terminated = true;
        self.session.frame = None;
        std::mem::take(&mut self.anchors)
    }

    fn push_anchor(&mut self, placed: PlacementAnchor) -> usize {
        let index = self.anchors.len();
        info!(
            target: "ar_placement",
            "Placed '{}' via {:?} (anchor #{})",
            placed.placement.model_id, placed.trigger, index
        );
        self.events.push(PlacementEvent::AnchorPlaced {
            index,
            trigger: placed.trigger,
            anchor_node: placed.anchor_node,
        });
        self.anchors.push(placed);
        index
    }

    fn refresh_prompt(&mut self) {
        let prompt = Prompt::derive(self.session.tracking_failure, self.anchors.len());
        if prompt != self.prompt {
            self.prompt = prompt;
            self.events.push(PlacementEvent::PromptChanged(prompt));
        }
    }
}
