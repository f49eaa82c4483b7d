//! Generator configuration.

use serde::{Deserialize, Serialize};

use satchel_spec::{DEFAULT_GENERATED_ROOT, PARAMETER_CAPACITY};

/// What to do when the host has no layer of the configured type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingLayerPolicy {
    /// Skip the replacement and report a warning.
    #[default]
    Ignore,
    /// Fail the run before anything is written.
    Error,
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Parameter slots the host supports.
    pub capacity: usize,
    /// Directory, relative to the asset root, that receives generated bundles.
    pub generated_root: String,
    /// Behaviour when the host layer slot is missing.
    pub missing_layer: MissingLayerPolicy,
    /// Set each live target's current active state to its slot's resting state.
    pub apply_resting_state: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            capacity: PARAMETER_CAPACITY,
            generated_root: DEFAULT_GENERATED_ROOT.to_string(),
            missing_layer: MissingLayerPolicy::Ignore,
            apply_resting_state: true,
        }
    }
}

impl GeneratorConfig {
    /// Sets the parameter capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the generated root directory.
    pub fn with_generated_root(mut self, root: impl Into<String>) -> Self {
        self.generated_root = root.into();
        self
    }

    /// Sets the missing-layer policy.
    pub fn with_missing_layer(mut self, policy: MissingLayerPolicy) -> Self {
        self.missing_layer = policy;
        self
    }

    /// Enables or disables the resting-state preview edit.
    pub fn with_resting_state(mut self, apply: bool) -> Self {
        self.apply_resting_state = apply;
        self
    }
}
