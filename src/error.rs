//! # Error Types
//!
//! Every failure in the placement core is local to one frame, gesture or node.
//! None of these errors end a session: the controller swallows anchor failures,
//! logs load failures, and the lifecycle manager collects teardown failures into
//! a report.

use thiserror::Error;

use crate::gfx::scene::NodeId;

/// The tracking engine refused to create an anchor at the requested pose.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    #[error("trackable is not tracking")]
    NotTracking,
    #[error("pose is outside the trackable")]
    PoseRejected,
}

/// Errors reported by the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("model '{model}' could not be loaded: {reason}")]
    ModelLoad { model: String, reason: String },
    #[error("material could not be created: {0}")]
    Material(String),
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("node {node} could not be destroyed: {reason}")]
    Destroy { node: NodeId, reason: String },
}

/// A single placement attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Model or material failed to load. Nothing was attached to the scene.
    #[error("load failure: {0}")]
    Load(#[source] SceneError),
    /// Node assembly failed after loading. Every partially created node was
    /// destroyed again before this was returned.
    #[error("node assembly failed: {0}")]
    Assembly(#[source] SceneError),
}

/// The device capability probe could not answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("capability service unavailable: {0}")]
    Unavailable(String),
    #[error("capability probe panicked")]
    Panicked,
}

/// Configuration could not be read or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_error_messages_carry_source() {
        let err = PlacementError::Load(SceneError::ModelLoad {
            model: "models/missing.glb".to_string(),
            reason: "not found".to_string(),
        });
        let text = err.to_string();
        assert!(text.contains("load failure"));
        assert!(text.contains("models/missing.glb"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_destroy_error_names_node() {
        let err = SceneError::Destroy {
            node: NodeId(7),
            reason: "engine gone".to_string(),
        };
        assert_eq!(err.to_string(), "node #7 could not be destroyed: engine gone");
    }
}
