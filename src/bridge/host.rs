//! # Host Bridge
//!
//! Answers the two requests the hosting UI layer can make: start the AR viewer
//! for a model, and ask whether the device supports AR at all. The bridge
//! never surfaces a fault for either; a broken capability check reads as
//! "not supported".

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};
use serde_json::json;

use crate::config::ViewerConfig;
use crate::error::CapabilityError;

use super::protocol::{
    BridgeResponse, MethodCall, ARG_MODEL_PATH, CHECK_AR_SUPPORT, LAUNCH_AR_VIEWER,
};

/// Status string returned for a launch request
pub const LAUNCHED: &str = "AR Viewer launched";

/// Parameters handed to a freshly started viewer screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    pub model_file: String,
}

impl LaunchParams {
    /// Extra key carrying the model id
    pub const EXTRA_MODEL_FILE: &'static str = "model_file";

    pub fn to_extras(&self) -> HashMap<String, String> {
        HashMap::from([(Self::EXTRA_MODEL_FILE.to_string(), self.model_file.clone())])
    }

    /// Read launch extras, substituting `default_model` when the model is absent
    pub fn from_extras(extras: &HashMap<String, String>, default_model: &str) -> Self {
        let model_file = extras
            .get(Self::EXTRA_MODEL_FILE)
            .cloned()
            .unwrap_or_else(|| default_model.to_string());
        Self { model_file }
    }
}

/// Starts the viewer screen
pub trait ScreenLauncher {
    fn launch(&mut self, params: LaunchParams);
}

/// Answer of the device AR capability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    SupportedInstalled,
    SupportedApkTooOld,
    SupportedNotInstalled,
    UnsupportedDeviceNotCapable,
    UnknownChecking,
    UnknownError,
    UnknownTimedOut,
}

impl Availability {
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            Availability::SupportedInstalled
                | Availability::SupportedApkTooOld
                | Availability::SupportedNotInstalled
        )
    }
}

/// Device capability query
pub trait CapabilityProbe {
    fn check_availability(&self) -> Result<Availability, CapabilityError>;
}

/// Substitute the default model for a missing or empty request
pub fn resolve_model_path(requested: Option<&str>, default_model: &str) -> String {
    match requested {
        Some(path) if !path.is_empty() => path.to_string(),
        _ => default_model.to_string(),
    }
}

/// Error body used when a response itself cannot be encoded
fn encode_failure(err: &dyn std::fmt::Display) -> String {
    json!({
        "status": "error",
        "code": "encode",
        "message": err.to_string(),
    })
    .to_string()
}

pub struct HostBridge<L: ScreenLauncher, C: CapabilityProbe> {
    launcher: L,
    probe: C,
    default_model: String,
}

impl<L: ScreenLauncher, C: CapabilityProbe> HostBridge<L, C> {
    pub fn new(launcher: L, probe: C, config: &ViewerConfig) -> Self {
        Self {
            launcher,
            probe,
            default_model: config.model.default_model.clone(),
        }
    }

    /// Dispatch one decoded request
    pub fn handle(&mut self, call: &MethodCall) -> BridgeResponse {
        match call.method.as_str() {
            LAUNCH_AR_VIEWER => {
                let requested = call.argument_str(ARG_MODEL_PATH);
                if requested.is_none() && call.arguments.contains_key(ARG_MODEL_PATH) {
                    warn!(target: "ar_model", "Ignoring non-string {} argument", ARG_MODEL_PATH);
                }
                BridgeResponse::success(self.launch_ar_viewer(requested))
            }
            CHECK_AR_SUPPORT => BridgeResponse::success(self.check_ar_support()),
            other => {
                debug!(target: "ar_model", "Unknown bridge method '{}'", other);
                BridgeResponse::NotImplemented
            }
        }
    }

    /// Decode a JSON request, dispatch it and encode the response
    pub fn handle_json(&mut self, request: &str) -> String {
        let response = match serde_json::from_str::<MethodCall>(request) {
            Ok(call) => self.handle(&call),
            Err(err) => BridgeResponse::error("bad_request", err.to_string()),
        };
        serde_json::to_string(&response).unwrap_or_else(|err| encode_failure(&err))
    }

    /// Start the viewer for `model_path` (or the default model)
    pub fn launch_ar_viewer(&mut self, model_path: Option<&str>) -> &'static str {
        debug!(target: "ar_model", "Received modelPath from host: {:?}", model_path);
        let model_file = resolve_model_path(model_path, &self.default_model);
        debug!(target: "ar_model", "launchArViewer called with modelPath: '{}'", model_file);
        self.launcher.launch(LaunchParams { model_file });
        LAUNCHED
    }

    /// True iff the device reports AR support. Errors and panics read as `false`.
    pub fn check_ar_support(&self) -> bool {
        let probe = &self.probe;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| probe.check_availability()))
            .unwrap_or(Err(CapabilityError::Panicked));
        match outcome {
            Ok(availability) => {
                debug!(target: "ar_model", "AR availability: {:?}", availability);
                availability.is_supported()
            }
            Err(err) => {
                warn!(target: "ar_model", "AR capability check failed: {}", err);
                false
            }
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn launcher_mut(&mut self) -> &mut L {
        &mut self.launcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;
    use crate::sim::{RecordingLauncher, ScriptedProbe};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn bridge(probe: ScriptedProbe) -> HostBridge<RecordingLauncher, ScriptedProbe> {
        HostBridge::new(RecordingLauncher::default(), probe, &ViewerConfig::default())
    }

    #[test]
    fn test_launch_without_model_uses_default() {
        let mut bridge = bridge(ScriptedProbe::answer(Availability::SupportedInstalled));

        let response = bridge.handle(&MethodCall::new(LAUNCH_AR_VIEWER));
        assert_eq!(response, BridgeResponse::success(LAUNCHED));

        let empty = MethodCall::new(LAUNCH_AR_VIEWER).with_argument(ARG_MODEL_PATH, "");
        bridge.handle(&empty);

        let launched = bridge.launcher().launched();
        assert_eq!(launched.len(), 2);
        assert!(launched.iter().all(|p| p.model_file == DEFAULT_MODEL));
    }

    #[test]
    fn test_launch_passes_model_through() {
        let mut bridge = bridge(ScriptedProbe::answer(Availability::SupportedInstalled));
        let call = MethodCall::new(LAUNCH_AR_VIEWER).with_argument(ARG_MODEL_PATH, "models/pump.glb");
        bridge.handle(&call);
        assert_eq!(bridge.launcher().launched()[0].model_file, "models/pump.glb");
    }

    #[test]
    fn test_check_support_maps_availability() {
        assert!(bridge(ScriptedProbe::answer(Availability::SupportedApkTooOld)).check_ar_support());
        assert!(!bridge(ScriptedProbe::answer(Availability::UnsupportedDeviceNotCapable))
            .check_ar_support());
        assert!(!bridge(ScriptedProbe::answer(Availability::UnknownTimedOut)).check_ar_support());
    }

    #[test]
    fn test_check_support_never_faults() {
        let failing = bridge(ScriptedProbe::fail("service bound to dead process"));
        assert!(!failing.check_ar_support());

        let mut panicking = bridge(ScriptedProbe::panicking());
        assert!(!panicking.check_ar_support());
        assert_eq!(
            panicking.handle(&MethodCall::new(CHECK_AR_SUPPORT)),
            BridgeResponse::success(false)
        );
    }

    #[test]
    fn test_unknown_method_not_implemented() {
        let mut bridge = bridge(ScriptedProbe::answer(Availability::SupportedInstalled));
        assert_eq!(bridge.handle(&MethodCall::new("openSettings")), BridgeResponse::NotImplemented);
        assert!(bridge.launcher().launched().is_empty());
    }

    #[test]
    fn test_handle_json_round_trip() {
        let mut bridge = bridge(ScriptedProbe::answer(Availability::SupportedInstalled));

        let reply: Value = serde_json::from_str(
            &bridge.handle_json(r#"{"method":"launchArViewer","arguments":{"modelPath":null}}"#),
        )
        .unwrap();
        assert_eq!(reply, json!({"status": "success", "result": LAUNCHED}));
        assert_eq!(bridge.launcher().launched()[0].model_file, DEFAULT_MODEL);

        let reply: Value = serde_json::from_str(&bridge.handle_json("not json")).unwrap();
        assert_eq!(reply["status"], "error");
        assert_eq!(reply["code"], "bad_request");
    }

    #[test]
    fn test_encode_failure_escapes_message() {
        let body = encode_failure(&r#"bad "value" \ here"#);
        let reply: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(reply["status"], "error");
        assert_eq!(reply["code"], "encode");
        assert_eq!(reply["message"], r#"bad "value" \ here"#);
    }

    #[test]
    fn test_launch_extras() {
        let params = LaunchParams {
            model_file: "models/valve.glb".to_string(),
        };
        assert_eq!(LaunchParams::from_extras(&params.to_extras(), DEFAULT_MODEL), params);
        assert_eq!(
            LaunchParams::from_extras(&HashMap::new(), DEFAULT_MODEL).model_file,
            DEFAULT_MODEL
        );
    }

    proptest! {
        #[test]
        fn prop_capability_failures_read_false(reason in ".*", panics in any::<bool>()) {
            let probe = if panics { ScriptedProbe::panicking() } else { ScriptedProbe::fail(&reason) };
            let mut bridge = bridge(probe);
            prop_assert_eq!(
                bridge.handle(&MethodCall::new(CHECK_AR_SUPPORT)),
                BridgeResponse::success(false)
            );
        }
    }
}
