//! Per-slot toggle layers.
//!
//! Every slot gets its own layer with a two-state machine:
//!
//! ```text
//!   Null State ──(param > 0)──▶ Toggle Triggered
//!        ▲                           │
//!        └──────(param == 0)─────────┘
//! ```
//!
//! Both transitions fire immediately with no blend. The triggered state plays
//! the slot's clip; the null state plays nothing, leaving targets at rest.

use log::debug;

use satchel_spec::{
    AvatarMask, ConditionMode, ControllerLayer, StateMachine, StateTransition,
    TransitionCondition,
};

/// Prefix of generated layer and state machine names.
pub const LAYER_PREFIX: &str = "GenToggleLayer";

/// Name of the full-body exclusion mask shared by all generated layers.
pub const EXCLUSION_MASK_NAME: &str = "maskEverythingMask";

/// Idle state name.
pub const IDLE_STATE: &str = "Null State";

/// Triggered state name.
pub const TRIGGERED_STATE: &str = "Toggle Triggered";

const IDLE_OFFSET: [f32; 2] = [200.0, 0.0];
const TRIGGERED_OFFSET: [f32; 2] = [500.0, 0.0];

/// Name of the layer generated for slot `index`.
pub fn layer_name(index: usize) -> String {
    format!("{}{}", LAYER_PREFIX, index)
}

/// A mask that disables every humanoid body region.
pub fn exclusion_mask() -> AvatarMask {
    AvatarMask::uniform(EXCLUSION_MASK_NAME, false)
}

/// Builds the toggle layer of slot `index`, gated by `parameter` and playing
/// `clip` while triggered.
pub fn build_toggle_layer(index: usize, parameter: &str, clip: &str) -> ControllerLayer {
    let name = layer_name(index);
    let mut machine = StateMachine::new(name.clone());

    machine.add_state(IDLE_STATE, IDLE_OFFSET);
    machine.add_state(TRIGGERED_STATE, TRIGGERED_OFFSET).motion = Some(clip.to_string());

    machine.add_transition(
        StateTransition::immediate(IDLE_STATE, TRIGGERED_STATE).with_condition(
            TransitionCondition::new(ConditionMode::Greater, 0.0, parameter),
        ),
    );
    machine.add_transition(
        StateTransition::immediate(TRIGGERED_STATE, IDLE_STATE).with_condition(
            TransitionCondition::new(ConditionMode::Equals, 0.0, parameter),
        ),
    );

    debug!("layer {}: gated by {}, plays {}", name, parameter, clip);

    ControllerLayer {
        name,
        default_weight: 1.0,
        avatar_mask: Some(EXCLUSION_MASK_NAME.to_string()),
        state_machine: machine,
    }
}
