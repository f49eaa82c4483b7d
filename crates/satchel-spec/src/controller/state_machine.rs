//! State machine documents: states, transitions, and conditions.

use serde::{Deserialize, Serialize};

/// Editor position of the entry node in a fresh state machine.
pub const DEFAULT_ENTRY_POSITION: [f32; 3] = [50.0, 120.0, 0.0];

/// Comparison applied by a transition condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionMode {
    /// Bool parameter is true.
    If,
    /// Bool parameter is false.
    IfNot,
    /// Numeric parameter is greater than the threshold.
    Greater,
    /// Numeric parameter is less than the threshold.
    Less,
    /// Int parameter equals the threshold.
    Equals,
    /// Int parameter differs from the threshold.
    NotEqual,
}

/// One condition gating a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionCondition {
    /// Comparison mode.
    pub mode: ConditionMode,
    /// Threshold compared against.
    pub threshold: f32,
    /// Controller parameter read.
    pub parameter: String,
}

impl TransitionCondition {
    /// Creates a condition.
    pub fn new(mode: ConditionMode, threshold: f32, parameter: impl Into<String>) -> Self {
        Self {
            mode,
            threshold,
            parameter: parameter.into(),
        }
    }
}

/// A state holding an optional motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorState {
    /// State name, unique within its machine.
    pub name: String,
    /// Editor graph position.
    pub position: [f32; 3],
    /// Name of the clip played in this state; `None` plays nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<String>,
}

/// A directed edge between two states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Source state name.
    pub source: String,
    /// Destination state name.
    pub destination: String,
    /// Whether the transition waits for `exit_time`.
    pub has_exit_time: bool,
    /// Normalized time after which the transition may fire.
    pub exit_time: f32,
    /// Whether `duration` is in seconds rather than normalized time.
    pub has_fixed_duration: bool,
    /// Blend duration.
    pub duration: f32,
    /// All conditions must hold for the transition to fire.
    #[serde(default)]
    pub conditions: Vec<TransitionCondition>,
}

impl StateTransition {
    /// A transition that fires as soon as its conditions hold, with no blend.
    pub fn immediate(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            has_exit_time: false,
            exit_time: 0.0,
            has_fixed_duration: true,
            duration: 0.0,
            conditions: Vec::new(),
        }
    }

    /// Appends a condition.
    pub fn with_condition(mut self, condition: TransitionCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Returns true if the transition neither waits nor blends.
    pub fn is_instant(&self) -> bool {
        !self.has_exit_time && self.exit_time == 0.0 && self.duration == 0.0
    }
}

/// A finite state machine. The default state is the single entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMachine {
    /// Machine name.
    pub name: String,
    /// Editor position of the entry node.
    #[serde(default = "default_entry_position")]
    pub entry_position: [f32; 3],
    /// State entered on start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_state: Option<String>,
    /// States in insertion order.
    #[serde(default)]
    pub states: Vec<AnimatorState>,
    /// Transitions in insertion order.
    #[serde(default)]
    pub transitions: Vec<StateTransition>,
}

fn default_entry_position() -> [f32; 3] {
    DEFAULT_ENTRY_POSITION
}

impl StateMachine {
    /// Creates an empty machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_position: DEFAULT_ENTRY_POSITION,
            default_state: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Adds a state offset from the entry node. The first state added becomes
    /// the default state.
    pub fn add_state(&mut self, name: impl Into<String>, offset: [f32; 2]) -> &mut AnimatorState {
        let name = name.into();
        if self.default_state.is_none() {
            self.default_state = Some(name.clone());
        }
        let [ex, ey, ez] = self.entry_position;
        self.states.push(AnimatorState {
            name,
            position: [ex + offset[0], ey + offset[1], ez],
            motion: None,
        });
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    /// Adds a transition.
    pub fn add_transition(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// Looks up a state by name.
    pub fn state(&self, name: &str) -> Option<&AnimatorState> {
        self.states.iter().find(|s| s.name == name)
    }

    /// Transitions leaving `source`.
    pub fn transitions_from<'a>(
        &'a self,
        source: &'a str,
    ) -> impl Iterator<Item = &'a StateTransition> + 'a {
        self.transitions.iter().filter(move |t| t.source == source)
    }
}
