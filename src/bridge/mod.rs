//! # Host Bridge Module
//!
//! The request/response surface exposed to the hosting application.
//!
//! | Request | Argument | Response |
//! |---|---|---|
//! | `launchArViewer` | `modelPath` (optional) | `"AR Viewer launched"` |
//! | `checkArSupport` | none | `bool` |
//! | anything else | | not implemented |

pub mod host;
pub mod protocol;

pub use host::{
    resolve_model_path, Availability, CapabilityProbe, HostBridge, LaunchParams, ScreenLauncher,
    LAUNCHED,
};
pub use protocol::{
    BridgeResponse, MethodCall, ARG_MODEL_PATH, CHANNEL, CHECK_AR_SUPPORT, LAUNCH_AR_VIEWER,
};
