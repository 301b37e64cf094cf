//! Change notifications emitted by the placement controller.
//!
//! The controller owns all state; the render step drains these events each
//! frame and reacts. Nothing is bound implicitly.

use crate::config::PromptSettings;
use crate::gfx::scene::NodeId;
use crate::tracking::TrackingFailureReason;

use super::anchor::PlacementTrigger;

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    /// A new anchor joined the collection at `index`
    AnchorPlaced {
        index: usize,
        trigger: PlacementTrigger,
        anchor_node: NodeId,
    },
    /// The plane overlay should be shown or hidden
    PlaneOverlayChanged(bool),
    TrackingFailureChanged(Option<TrackingFailureReason>),
    /// The prompt shown over the camera feed changed
    PromptChanged(Prompt),
    BoundingBoxVisibilityChanged { anchor_node: NodeId, visible: bool },
    ModelScaled { model_node: NodeId, scale: f32 },
}

/// What the overlay text should say
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    TrackingFailure(TrackingFailureReason),
    ScanForSurface,
    TapToAddModel,
}

impl Prompt {
    /// Failure reasons win; otherwise it depends on whether anything is placed
    pub fn derive(failure: Option<TrackingFailureReason>, anchor_count: usize) -> Self {
        match failure {
            Some(reason) => Prompt::TrackingFailure(reason),
            None if anchor_count == 0 => Prompt::ScanForSurface,
            None => Prompt::TapToAddModel,
        }
    }

    pub fn text(&self, prompts: &PromptSettings) -> String {
        match self {
            Prompt::TrackingFailure(reason) => reason.description().to_string(),
            Prompt::ScanForSurface => prompts.scan_surface.clone(),
            Prompt::TapToAddModel => prompts.tap_to_add.clone(),
        }
    }
}
