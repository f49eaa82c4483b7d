//! Animator controller documents.
//!
//! A controller owns its parameters, an ordered list of layers (each with its
//! own state machine), and the masks and clips those layers reference by name.

mod clip;
mod mask;
mod state_machine;

use serde::{Deserialize, Serialize};

use crate::params::ValueType;

pub use clip::{AnimationClip, CurveBinding, Keyframe, ACTIVE_PROPERTY, GAME_OBJECT_TYPE};
pub use mask::{AvatarMask, BodyPart};
pub use state_machine::{
    AnimatorState, ConditionMode, StateMachine, StateTransition, TransitionCondition,
    DEFAULT_ENTRY_POSITION,
};

/// Type of a controller parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerParameterType {
    Float,
    Int,
    Bool,
    Trigger,
}

impl From<ValueType> for ControllerParameterType {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::Int => ControllerParameterType::Int,
            ValueType::Float => ControllerParameterType::Float,
            ValueType::Bool => ControllerParameterType::Bool,
        }
    }
}

/// A parameter declared on the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    #[serde(rename = "type")]
    pub kind: ControllerParameterType,
}

/// One layer of a controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerLayer {
    /// Layer name.
    pub name: String,
    /// Blend weight applied to the layer.
    pub default_weight: f32,
    /// Name of the mask (in [`AnimatorController::masks`]) filtering this layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_mask: Option<String>,
    /// The layer's state machine.
    pub state_machine: StateMachine,
}

/// A controller document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimatorController {
    /// Controller name.
    #[serde(default)]
    pub name: String,
    /// Declared parameters.
    #[serde(default)]
    pub parameters: Vec<ControllerParameter>,
    /// Layers, evaluated in order.
    #[serde(default)]
    pub layers: Vec<ControllerLayer>,
    /// Masks referenced by layers.
    #[serde(default)]
    pub masks: Vec<AvatarMask>,
    /// Clips referenced by states.
    #[serde(default)]
    pub clips: Vec<AnimationClip>,
}

impl AnimatorController {
    /// Creates an empty controller.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declares a parameter. An existing parameter of the same name is retyped
    /// in place instead of being duplicated; returns true if one was replaced.
    pub fn upsert_parameter(
        &mut self,
        name: impl Into<String>,
        kind: ControllerParameterType,
    ) -> bool {
        let name = name.into();
        if let Some(existing) = self.parameters.iter_mut().find(|p| p.name == name) {
            existing.kind = kind;
            return true;
        }
        self.parameters.push(ControllerParameter { name, kind });
        false
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ControllerParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Looks up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&ControllerLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Looks up a mask by name.
    pub fn mask(&self, name: &str) -> Option<&AvatarMask> {
        self.masks.iter().find(|m| m.name == name)
    }

    /// Looks up a clip by name.
    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.iter().find(|c| c.name == name)
    }

    /// Names referenced by layers or states that have no backing mask or clip.
    pub fn dangling_references(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for layer in &self.layers {
            if let Some(mask) = &layer.avatar_mask {
                if self.mask(mask).is_none() {
                    missing.push(format!("{}: mask '{}'", layer.name, mask));
                }
            }
            for state in &layer.state_machine.states {
                if let Some(motion) = &state.motion {
                    if self.clip(motion).is_none() {
                        missing.push(format!("{}/{}: clip '{}'", layer.name, state.name, motion));
                    }
                }
            }
        }
        missing
    }
}
