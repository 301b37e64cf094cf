//! # Scripted AR Session
//!
//! Drives one complete viewer session against the in-memory backends, the way
//! a host application and tracking engine would.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=info cargo run --example scripted_session
//! RUST_LOG=debug cargo run --example scripted_session -- viewer.json
//! ```
//!
//! ## What you'll see:
//! - The host asking for AR support and launching the viewer
//! - Prompts changing as tracking degrades, recovers and finds the floor
//! - A second model placed by tap, edited and rescaled
//! - The teardown report when the screen is dismissed

use std::env;

use anyhow::{bail, Context, Result};
use anchorview::prelude::*;
use anchorview::tracking::{HitKind, PlaneId, TrackingState};

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => ViewerConfig::load(&path)
            .with_context(|| format!("loading viewer config from {path}"))?,
        None => ViewerConfig::default(),
    };

    // Host side
    let mut bridge = HostBridge::new(
        RecordingLauncher::default(),
        ScriptedProbe::answer(Availability::SupportedInstalled),
        &config,
    );
    println!("checkArSupport -> {}", bridge.handle_json(r#"{"method":"checkArSupport"}"#));
    println!(
        "launchArViewer -> {}",
        bridge.handle_json(r#"{"method":"launchArViewer","arguments":{}}"#)
    );

    let Some(params) = bridge.launcher_mut().take_launched().pop() else {
        bail!("launch request did not reach the launcher");
    };

    // Viewer side
    let mut screen = ArViewerScreen::start(
        params,
        SimulatedTrackingEngine::new(),
        SimulatedRenderer::with_default_models(),
        &config,
    );
    println!("session configuration: {:?}", screen.session_configuration());
    println!("prompt: {}", screen.prompt_text());

    screen.on_frame(SimulatedTrackingEngine::frame(
        1,
        Some(TrackingFailureReason::InsufficientLight),
        vec![],
    ));
    println!("prompt: {}", screen.prompt_text());

    screen.on_frame(SimulatedTrackingEngine::frame(
        2,
        None,
        vec![
            SimulatedTrackingEngine::vertical_plane(1),
            SimulatedTrackingEngine::upward_plane(2),
        ],
    ));
    println!("prompt: {}", screen.prompt_text());

    screen.engine_mut().set_hits(vec![HitResult {
        pose: Pose::from_translation(Vector3::new(0.4, 0.0, -1.2)),
        distance: 1.3,
        kind: HitKind::Plane {
            plane: PlaneId(2),
            in_polygon: true,
        },
        tracking_state: TrackingState::Tracking,
    }]);
    let outcome = screen.on_single_tap(TapEvent::on_empty_space(540.0, 1200.0));
    println!("tap -> {outcome:?}");

    let Some(model) = screen.anchors().last().map(|a| a.placement.model_node) else {
        bail!("no model placed");
    };
    screen.on_editing_changed(model, [EditTransform::Move, EditTransform::Scale]);
    if let Some(scale) = screen.on_scale(model, 2.0) {
        println!("requested 2.0x, applied {scale}");
    }
    screen.on_editing_changed(model, []);

    for event in screen.drain_events() {
        println!("event: {event:?}");
    }

    let report = screen.dismiss();
    println!(
        "teardown: {} destroyed, {} failed",
        report.succeeded.len(),
        report.failures.len()
    );
    Ok(())
}
