//! # Placement Module
//!
//! Decides when and where models get anchored, and builds what gets anchored.
//!
//! ## Key Components
//!
//! - [`PlacementController`] - The interaction state machine (auto/tap placement, edit routing)
//! - [`AnchorNodeFactory`] - Builds the anchor → model → bounding box composite
//! - [`PlacementAnchor`] / [`ModelPlacement`] - The live anchors and their models
//! - [`PlacementEvent`] / [`Prompt`] - Change notifications for the render step

pub mod anchor;
pub mod controller;
pub mod events;
pub mod factory;

pub use anchor::{ModelPlacement, PlacementAnchor, PlacementTrigger};
pub use controller::{PlacementController, PlacementState, Session, TapEvent, TapOutcome};
pub use events::{PlacementEvent, Prompt};
pub use factory::AnchorNodeFactory;
