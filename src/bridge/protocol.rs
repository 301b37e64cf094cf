//! Wire types of the host bridge.
//!
//! A request names a method and carries named arguments; a response is a
//! success value, a "not implemented" marker, or an error. On the wire both
//! are JSON:
//!
//! ```text
//! {"method": "launchArViewer", "arguments": {"modelPath": "models/chair.glb"}}
//! {"status": "success", "result": "AR Viewer launched"}
//! {"status": "not_implemented"}
//! {"status": "error", "code": "bad_request", "message": "..."}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Channel name the host registers the bridge under
pub const CHANNEL: &str = "anchorview/ar_viewer";

pub const LAUNCH_AR_VIEWER: &str = "launchArViewer";
pub const CHECK_AR_SUPPORT: &str = "checkArSupport";

/// Argument of [`LAUNCH_AR_VIEWER`] naming the model asset
pub const ARG_MODEL_PATH: &str = "modelPath";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// A string argument; `None` when missing or not a string
    pub fn argument_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BridgeResponse {
    Success { result: Value },
    NotImplemented,
    Error { code: String, message: String },
}

impl BridgeResponse {
    pub fn success(result: impl Into<Value>) -> Self {
        BridgeResponse::Success {
            result: result.into(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        BridgeResponse::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_without_arguments_decodes() {
        let call: MethodCall = serde_json::from_str(r#"{"method": "checkArSupport"}"#).unwrap();
        assert_eq!(call.method, CHECK_AR_SUPPORT);
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_non_string_argument_reads_as_missing() {
        let call = MethodCall::new(LAUNCH_AR_VIEWER).with_argument(ARG_MODEL_PATH, 42);
        assert_eq!(call.argument_str(ARG_MODEL_PATH), None);
    }

    #[test]
    fn test_response_wire_shape() {
        let value = serde_json::to_value(BridgeResponse::success(true)).unwrap();
        assert_eq!(value, json!({"status": "success", "result": true}));

        let value = serde_json::to_value(BridgeResponse::NotImplemented).unwrap();
        assert_eq!(value, json!({"status": "not_implemented"}));
    }
}
