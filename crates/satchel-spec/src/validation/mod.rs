//! Descriptor validation logic.

mod path_safety;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::avatar::AnimLayerType;
use crate::descriptor::{InventoryDescriptor, DESCRIPTOR_VERSION};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::menu::{ExpressionsMenu, MENU_CONTROL_LIMIT};
use crate::params::{slot_parameter_name, ExpressionParameters, PARAMETER_CAPACITY};
use crate::scene::Scene;

pub use path_safety::is_safe_asset_path;

use path_safety::validate_basis_path;

/// Regex pattern for valid descriptor_id: a GUID without dashes, lowercase.
const DESCRIPTOR_ID_PATTERN: &str = r"^[0-9a-f]{32}$";

static DESCRIPTOR_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn descriptor_id_regex() -> &'static Regex {
    DESCRIPTOR_ID_REGEX
        .get_or_init(|| Regex::new(DESCRIPTOR_ID_PATTERN).expect("invalid regex pattern"))
}

/// Resolved inputs a generation run checks the descriptor against.
#[derive(Debug, Clone, Copy)]
pub struct GenerateContext<'a> {
    /// The scene holding targets and the host.
    pub scene: &'a Scene,
    /// Loaded basis parameter set, if the descriptor names one.
    pub basis_parameters: Option<&'a ExpressionParameters>,
    /// Loaded basis menu, if the descriptor names one.
    pub basis_menu: Option<&'a ExpressionsMenu>,
    /// Parameter capacity of the host.
    pub capacity: usize,
}

impl<'a> GenerateContext<'a> {
    /// Context with no basis documents and the default capacity.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            basis_parameters: None,
            basis_menu: None,
            capacity: PARAMETER_CAPACITY,
        }
    }
}

/// Validates a descriptor on its own and returns a validation result.
///
/// # Example
/// ```
/// use satchel_spec::{InventoryDescriptor, InventorySlot};
/// use satchel_spec::validation::validate_descriptor;
///
/// let descriptor = InventoryDescriptor::builder("0123456789abcdef0123456789abcdef")
///     .slot(InventorySlot::new("Hat"))
///     .build();
///
/// let result = validate_descriptor(&descriptor);
/// assert!(result.is_ok());
/// ```
pub fn validate_descriptor(descriptor: &InventoryDescriptor) -> ValidationResult {
    let mut result = ValidationResult::success();

    validate_descriptor_version(descriptor, &mut result);
    validate_descriptor_id(descriptor, &mut result);

    for (field, path) in descriptor.basis.paths() {
        validate_basis_path(field, path, &mut result);
    }

    check_slot_warnings(descriptor, &mut result);

    result
}

/// Validates that a descriptor can be generated against a scene and basis.
///
/// This performs [`validate_descriptor`] plus the scene, host and capacity
/// checks a generation run needs.
pub fn validate_for_generate(
    descriptor: &InventoryDescriptor,
    ctx: &GenerateContext<'_>,
) -> ValidationResult {
    let mut result = validate_descriptor(descriptor);

    if let Err(e) = ctx.scene.validate() {
        result.add_error(ValidationError::new(ErrorCode::InvalidScene, e.to_string()));
    }

    match &ctx.scene.avatar {
        None => result.add_error(ValidationError::new(
            ErrorCode::MissingHostComponent,
            "scene has no avatar descriptor to attach the inventory to",
        )),
        Some(avatar) => {
            if !avatar.has_layer(descriptor.layer_type) {
                result.add_warning(missing_layer_warning(descriptor.layer_type));
            }
        }
    }

    check_targets_in_scene(descriptor, ctx.scene, &mut result);
    check_capacity(descriptor, ctx, &mut result);

    let existing_controls = ctx.basis_menu.map(|m| m.controls.len()).unwrap_or(0);
    let total_controls = existing_controls + descriptor.slot_count();
    if total_controls > MENU_CONTROL_LIMIT {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MenuOverflow,
            format!(
                "menu will hold {} controls; a menu page shows {}",
                total_controls, MENU_CONTROL_LIMIT
            ),
            "slots",
        ));
    }

    result
}

/// Checks if a descriptor_id is valid.
pub fn is_valid_descriptor_id(descriptor_id: &str) -> bool {
    descriptor_id_regex().is_match(descriptor_id)
}

/// Warning reported when the host lacks the configured layer slot.
pub fn missing_layer_warning(layer_type: AnimLayerType) -> ValidationWarning {
    ValidationWarning::with_path(
        WarningCode::MissingHostLayer,
        format!(
            "host has no '{}' animation layer; the controller will not be attached",
            layer_type
        ),
        "layer_type",
    )
}

fn validate_descriptor_version(descriptor: &InventoryDescriptor, result: &mut ValidationResult) {
    if descriptor.descriptor_version != DESCRIPTOR_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedDescriptorVersion,
            format!(
                "descriptor_version must be {}, got {}",
                DESCRIPTOR_VERSION, descriptor.descriptor_version
            ),
            "descriptor_version",
        ));
    }
}

fn validate_descriptor_id(descriptor: &InventoryDescriptor, result: &mut ValidationResult) {
    if !is_valid_descriptor_id(&descriptor.descriptor_id) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidDescriptorId,
            format!(
                "descriptor_id must match pattern {}, got '{}'",
                DESCRIPTOR_ID_PATTERN, descriptor.descriptor_id
            ),
            "descriptor_id",
        ));
    }
}

fn check_slot_warnings(descriptor: &InventoryDescriptor, result: &mut ValidationResult) {
    let mut seen = HashSet::new();

    for (i, slot) in descriptor.slots.iter().enumerate() {
        let name = slot.name.trim();
        if name.is_empty() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::EmptySlotName,
                "slot has an empty name; its menu entry will be unlabeled",
                format!("slots[{}].name", i),
            ));
        } else if !seen.insert(name) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::DuplicateSlotName,
                format!("slot name '{}' is used more than once", name),
                format!("slots[{}].name", i),
            ));
        }

        if slot.live_targets().next().is_none() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::NoLiveTargets,
                format!("slot '{}' toggles nothing; its layer will be inert", slot.name),
                format!("slots[{}].targets", i),
            ));
        }
    }
}

fn check_targets_in_scene(
    descriptor: &InventoryDescriptor,
    scene: &Scene,
    result: &mut ValidationResult,
) {
    for (i, slot) in descriptor.slots.iter().enumerate() {
        for (j, target) in slot.targets.iter().enumerate() {
            if let Some(id) = target {
                if !scene.contains(*id) {
                    result.add_warning(ValidationWarning::with_path(
                        WarningCode::DanglingTarget,
                        format!("target {} is not an object of the scene and will be skipped", id),
                        format!("slots[{}].targets[{}]", i, j),
                    ));
                }
            }
        }
    }
}

fn check_capacity(
    descriptor: &InventoryDescriptor,
    ctx: &GenerateContext<'_>,
    result: &mut ValidationResult,
) {
    let carried = ctx.basis_parameters.map(|p| p.named_count()).unwrap_or(0);
    let requested = descriptor.slot_count();

    if carried + requested > ctx.capacity {
        result.add_error(ValidationError::with_path(
            ErrorCode::CapacityExceeded,
            format!(
                "Cannot have more than {} inventory slots ({} carried-over parameters, {} slots requested)",
                ctx.capacity.saturating_sub(carried),
                carried,
                requested
            ),
            "slots",
        ));
    }

    if let Some(basis) = ctx.basis_parameters {
        let generated: HashSet<String> = (0..requested).map(slot_parameter_name).collect();
        for (i, param) in basis.parameters.iter().enumerate() {
            if generated.contains(&param.name) {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::ParameterNameCollision,
                    format!(
                        "basis parameter '{}' shares its name with a generated slot parameter",
                        param.name
                    ),
                    format!("basis.parameters[{}]", i),
                ));
            }
        }
    }
}
