use std::fmt;

/// Handle to a node owned by the rendering engine.
///
/// Handles are never reused within a session; after teardown they are dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node in a placement composite is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Container following an engine anchor
    Anchor,
    /// The loaded 3-D model
    Model,
    /// Translucent selection box shown while editing
    BoundingBox,
}

/// An in-progress user manipulation of a placed model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditTransform {
    Move,
    Rotate,
    Scale,
}

/// Editing limits handed to the renderer's gesture handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditConstraints {
    pub editable: bool,
    /// Inclusive uniform scale range
    pub scale_range: (f32, f32),
}

impl EditConstraints {
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.scale_range.0, self.scale_range.1)
    }
}
