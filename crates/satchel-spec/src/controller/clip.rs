//! Motion clip documents.

use serde::{Deserialize, Serialize};

/// Property name that holds an object's active state.
pub const ACTIVE_PROPERTY: &str = "m_IsActive";

/// Component type whose active state a toggle curve drives.
pub const GAME_OBJECT_TYPE: &str = "GameObject";

/// A keyframe on a float curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in seconds.
    pub time: f32,
    /// Curve value.
    pub value: f32,
}

impl Keyframe {
    /// Creates a keyframe.
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// A curve bound to one property on the object at `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveBinding {
    /// `/`-joined path from the hierarchy root, root excluded.
    pub path: String,
    /// Animated property.
    pub property: String,
    /// Component type owning the property.
    pub target_type: String,
    /// Keyframes in time order.
    pub keyframes: Vec<Keyframe>,
}

impl CurveBinding {
    /// A single-key curve holding the object's active state at `value`.
    pub fn constant_active(path: impl Into<String>, active: bool) -> Self {
        Self {
            path: path.into(),
            property: ACTIVE_PROPERTY.to_string(),
            target_type: GAME_OBJECT_TYPE.to_string(),
            keyframes: vec![Keyframe::new(0.0, if active { 1.0 } else { 0.0 })],
        }
    }

    /// Value of the first keyframe, if any.
    pub fn initial_value(&self) -> Option<f32> {
        self.keyframes.first().map(|k| k.value)
    }
}

/// A named motion artifact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Clip name, unique within its controller.
    pub name: String,
    /// Bound curves.
    #[serde(default)]
    pub curves: Vec<CurveBinding>,
}

impl AnimationClip {
    /// Creates an empty clip.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curves: Vec::new(),
        }
    }

    /// Returns true if the clip animates nothing.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Paths of all bound curves, in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|c| c.path.as_str())
    }
}
