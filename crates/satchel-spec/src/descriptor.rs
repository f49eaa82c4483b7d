//! Inventory descriptor types.

use serde::{Deserialize, Serialize};

use crate::avatar::AnimLayerType;
use crate::error::SpecError;
use crate::scene::ObjectId;

/// Current descriptor version.
pub const DESCRIPTOR_VERSION: u32 = 1;

/// Generates a fresh stable identifier (32 lowercase hex characters).
pub fn new_descriptor_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// One user-declared toggle group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventorySlot {
    /// Display name shown on the menu entry.
    pub name: String,
    /// Opaque icon reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Objects toggled by this slot; `null` marks a missing reference.
    #[serde(default)]
    pub targets: Vec<Option<ObjectId>>,
    /// Resting visibility of the targets when the slot is off.
    #[serde(default)]
    pub start_enabled: bool,
}

impl InventorySlot {
    /// Creates a slot with no targets that rests disabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            targets: Vec::new(),
            start_enabled: false,
        }
    }

    /// Sets the icon reference.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Appends a target.
    pub fn target(mut self, id: ObjectId) -> Self {
        self.targets.push(Some(id));
        self
    }

    /// Appends a missing target reference.
    pub fn missing_target(mut self) -> Self {
        self.targets.push(None);
        self
    }

    /// Sets the resting visibility.
    pub fn start_enabled(mut self, enabled: bool) -> Self {
        self.start_enabled = enabled;
        self
    }

    /// Non-null target references, in order.
    pub fn live_targets(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.targets.iter().flatten().copied()
    }
}

/// Optional template assets extended by a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasisRefs {
    /// Asset path of the basis parameter set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    /// Asset path of the basis menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
    /// Asset path of the basis controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
}

impl BasisRefs {
    /// Returns true if no template is referenced.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_none() && self.menu.is_none() && self.controller.is_none()
    }

    /// All referenced paths with their field names.
    pub fn paths(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("basis.parameters", self.parameters.as_deref()),
            ("basis.menu", self.menu.as_deref()),
            ("basis.controller", self.controller.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, path)| path.map(|p| (field, p)))
    }
}

/// Declarative description of an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryDescriptor {
    /// Schema version; must be 1.
    pub descriptor_version: u32,
    /// Stable identifier keying the output location.
    pub descriptor_id: String,
    /// Host layer slot the generated controller replaces.
    #[serde(default)]
    pub layer_type: AnimLayerType,
    /// Template assets.
    #[serde(default, skip_serializing_if = "BasisRefs::is_empty")]
    pub basis: BasisRefs,
    /// Slots in menu order.
    #[serde(default)]
    pub slots: Vec<InventorySlot>,
}

impl InventoryDescriptor {
    /// Creates a new descriptor builder.
    pub fn builder(descriptor_id: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder::new(descriptor_id)
    }

    /// Parses a descriptor from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a descriptor from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serializes the descriptor to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the descriptor to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Builder for constructing descriptors.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    descriptor_id: String,
    layer_type: AnimLayerType,
    basis: BasisRefs,
    slots: Vec<InventorySlot>,
}

impl DescriptorBuilder {
    /// Creates a new builder.
    pub fn new(descriptor_id: impl Into<String>) -> Self {
        Self {
            descriptor_id: descriptor_id.into(),
            layer_type: AnimLayerType::default(),
            basis: BasisRefs::default(),
            slots: Vec::new(),
        }
    }

    /// Sets the host layer slot to replace.
    pub fn layer_type(mut self, layer_type: AnimLayerType) -> Self {
        self.layer_type = layer_type;
        self
    }

    /// Sets the basis parameter set path.
    pub fn basis_parameters(mut self, path: impl Into<String>) -> Self {
        self.basis.parameters = Some(path.into());
        self
    }

    /// Sets the basis menu path.
    pub fn basis_menu(mut self, path: impl Into<String>) -> Self {
        self.basis.menu = Some(path.into());
        self
    }

    /// Sets the basis controller path.
    pub fn basis_controller(mut self, path: impl Into<String>) -> Self {
        self.basis.controller = Some(path.into());
        self
    }

    /// Appends a slot.
    pub fn slot(mut self, slot: InventorySlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Builds the descriptor.
    pub fn build(self) -> InventoryDescriptor {
        InventoryDescriptor {
            descriptor_version: DESCRIPTOR_VERSION,
            descriptor_id: self.descriptor_id,
            layer_type: self.layer_type,
            basis: self.basis,
            slots: self.slots,
        }
    }
}
