//! Expression parameter set documents.

use serde::{Deserialize, Serialize};

/// Fixed number of parameter slots the host configuration supports.
pub const PARAMETER_CAPACITY: usize = 16;

/// Prefix of the per-slot generated parameter names.
pub const SLOT_PARAMETER_PREFIX: &str = "GenInventorySlot";

/// Name of the parameter generated for slot `index`.
pub fn slot_parameter_name(index: usize) -> String {
    format!("{}{}", SLOT_PARAMETER_PREFIX, index)
}

/// Value type of an expression parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Integer value.
    Int,
    /// Floating-point value; also the placeholder type of unused slots.
    #[default]
    Float,
    /// Boolean value.
    Bool,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Bool => write!(f, "bool"),
        }
    }
}

/// A named, typed control value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name; empty for an unused placeholder.
    #[serde(default)]
    pub name: String,
    /// Value type.
    #[serde(default)]
    pub value_type: ValueType,
}

impl Parameter {
    /// Creates a named parameter.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }

    /// Creates an integer parameter.
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Int)
    }

    /// Creates an anonymous float placeholder.
    pub fn placeholder() -> Self {
        Self::new(String::new(), ValueType::Float)
    }

    /// Returns true if this is an anonymous slot.
    ///
    /// Only an empty name counts; a whitespace name is still a parameter.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }
}

/// The parameter set attached to the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpressionParameters {
    /// Parameters in slot order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl ExpressionParameters {
    /// Creates a parameter set from a list.
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }

    /// Named (non-blank) parameters in order.
    pub fn named(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| !p.is_blank())
    }

    /// Number of named parameters.
    pub fn named_count(&self) -> usize {
        self.named().count()
    }

    /// Finds a parameter by name.
    pub fn find(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Total number of slots, placeholders included.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if the set holds no slots.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
