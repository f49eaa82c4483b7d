//! Validation tests.

use super::*;
use crate::avatar::AvatarDescriptor;
use crate::descriptor::InventorySlot;
use crate::menu::MenuControl;
use crate::params::Parameter;
use crate::scene::ObjectId;

const ID: &str = "0123456789abcdef0123456789abcdef";

fn make_scene() -> Scene {
    let mut scene = Scene::new().with_avatar(AvatarDescriptor::with_default_layers());
    let root = scene.add_object("Avatar", None);
    scene.add_object("Hat", Some(root));
    scene.add_object("Scarf", Some(root));
    scene
}

fn make_valid_descriptor() -> InventoryDescriptor {
    InventoryDescriptor::builder(ID)
        .slot(InventorySlot::new("Hat").target(ObjectId(1)))
        .slot(InventorySlot::new("Scarf").target(ObjectId(2)))
        .build()
}

fn named_parameters(count: usize) -> ExpressionParameters {
    ExpressionParameters::new((0..count).map(|i| Parameter::int(format!("Basis{}", i))).collect())
}

#[test]
fn test_valid_descriptor() {
    let result = validate_descriptor(&make_valid_descriptor());
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
}

#[test]
fn test_invalid_descriptor_version() {
    let mut descriptor = make_valid_descriptor();
    descriptor.descriptor_version = 2;
    let result = validate_descriptor(&descriptor);
    assert!(result.has_error(ErrorCode::UnsupportedDescriptorVersion));
}

#[test]
fn test_invalid_descriptor_id() {
    let test_cases = vec![
        ("", "empty"),
        ("0123456789ABCDEF0123456789ABCDEF", "uppercase"),
        ("01234567-89ab-cdef-0123-456789abcdef", "dashed guid"),
        ("0123456789abcdef", "too short"),
        ("0123456789abcdef0123456789abcdeg", "non-hex"),
    ];

    for (id, desc) in test_cases {
        let mut descriptor = make_valid_descriptor();
        descriptor.descriptor_id = id.to_string();
        let result = validate_descriptor(&descriptor);
        assert!(
            result.has_error(ErrorCode::InvalidDescriptorId),
            "expected invalid for {}: {}",
            desc,
            id
        );
    }
}

#[test]
fn test_fresh_descriptor_id_is_valid() {
    assert!(is_valid_descriptor_id(&crate::descriptor::new_descriptor_id()));
}

#[test]
fn test_unsafe_basis_paths() {
    let cases = ["/abs/params.json", "../params.json", "basis\\menu.json", "C:params.json", ""];
    for path in cases {
        let descriptor = InventoryDescriptor::builder(ID).basis_menu(path).build();
        let result = validate_descriptor(&descriptor);
        assert!(
            result.has_error(ErrorCode::UnsafeBasisPath),
            "expected unsafe: '{}'",
            path
        );
        assert_eq!(result.errors[0].path.as_deref(), Some("basis.menu"));
    }

    assert!(is_safe_asset_path("basis/menu.json"));
}

#[test]
fn test_slot_warnings() {
    let descriptor = InventoryDescriptor::builder(ID)
        .slot(InventorySlot::new("").target(ObjectId(1)))
        .slot(InventorySlot::new("Hat").target(ObjectId(1)))
        .slot(InventorySlot::new("Hat").missing_target())
        .build();
    let result = validate_descriptor(&descriptor);

    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::EmptySlotName));
    assert!(result.has_warning(WarningCode::DuplicateSlotName));
    assert!(result.has_warning(WarningCode::NoLiveTargets));
    assert!(!result.has_warning(WarningCode::DanglingTarget));

    let inert = result
        .warnings
        .iter()
        .find(|w| w.code == WarningCode::NoLiveTargets)
        .unwrap();
    assert_eq!(inert.path.as_deref(), Some("slots[2].targets"));
}

#[test]
fn test_null_target_is_silent_but_missing_id_warns() {
    let scene = make_scene();
    let descriptor = InventoryDescriptor::builder(ID)
        .slot(
            InventorySlot::new("Hat")
                .target(ObjectId(1))
                .missing_target()
                .target(ObjectId(40)),
        )
        .build();
    let result = validate_for_generate(&descriptor, &GenerateContext::new(&scene));

    assert!(result.is_ok());
    let dangling: Vec<Option<&str>> = result
        .warnings
        .iter()
        .filter(|w| w.code == WarningCode::DanglingTarget)
        .map(|w| w.path.as_deref())
        .collect();
    assert_eq!(dangling, vec![Some("slots[0].targets[2]")]);
}

#[test]
fn test_whitespace_basis_parameter_counts_toward_capacity() {
    let scene = make_scene();
    let mut basis = named_parameters(14);
    basis.parameters.push(Parameter::new(" ", crate::params::ValueType::Bool));
    let ctx = GenerateContext {
        basis_parameters: Some(&basis),
        ..GenerateContext::new(&scene)
    };
    let result = validate_for_generate(&make_valid_descriptor(), &ctx);
    assert!(result.has_error(ErrorCode::CapacityExceeded));
}

#[test]
fn test_generate_context_valid() {
    let scene = make_scene();
    let result = validate_for_generate(&make_valid_descriptor(), &GenerateContext::new(&scene));
    assert!(result.is_ok(), "errors: {:?}", result.errors);
}

#[test]
fn test_capacity_exceeded_names_usable_slots() {
    let scene = make_scene();
    let basis = named_parameters(15);
    let ctx = GenerateContext {
        basis_parameters: Some(&basis),
        ..GenerateContext::new(&scene)
    };
    let result = validate_for_generate(&make_valid_descriptor(), &ctx);

    assert!(result.has_error(ErrorCode::CapacityExceeded));
    let err = result
        .errors
        .iter()
        .find(|e| e.code == ErrorCode::CapacityExceeded)
        .unwrap();
    assert!(err.message.starts_with("Cannot have more than 1 inventory slots"));
}

#[test]
fn test_capacity_exactly_full_is_ok() {
    let scene = make_scene();
    let mut basis = named_parameters(14);
    basis.parameters.push(Parameter::placeholder());
    let ctx = GenerateContext {
        basis_parameters: Some(&basis),
        ..GenerateContext::new(&scene)
    };
    let result = validate_for_generate(&make_valid_descriptor(), &ctx);
    assert!(result.is_ok(), "errors: {:?}", result.errors);
}

#[test]
fn test_missing_host_component() {
    let mut scene = make_scene();
    scene.avatar = None;
    let result = validate_for_generate(&make_valid_descriptor(), &GenerateContext::new(&scene));
    assert!(result.has_error(ErrorCode::MissingHostComponent));
}

#[test]
fn test_missing_host_layer_is_warning() {
    let scene = make_scene();
    let mut descriptor = make_valid_descriptor();
    descriptor.layer_type = AnimLayerType::Sitting;
    let result = validate_for_generate(&descriptor, &GenerateContext::new(&scene));
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::MissingHostLayer));
}

#[test]
fn test_target_outside_scene_is_dangling() {
    let scene = make_scene();
    let descriptor = InventoryDescriptor::builder(ID)
        .slot(InventorySlot::new("Ghost").target(ObjectId(40)))
        .build();
    let result = validate_for_generate(&descriptor, &GenerateContext::new(&scene));
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::DanglingTarget));
}

#[test]
fn test_invalid_scene_is_error() {
    let mut scene = make_scene();
    scene.objects[0].parent = Some(ObjectId(1));
    let result = validate_for_generate(&make_valid_descriptor(), &GenerateContext::new(&scene));
    assert!(result.has_error(ErrorCode::InvalidScene));
}

#[test]
fn test_parameter_name_collision_and_menu_overflow() {
    let scene = make_scene();
    let basis = ExpressionParameters::new(vec![Parameter::int("GenInventorySlot1")]);
    let mut menu = ExpressionsMenu::new();
    for i in 0..7 {
        menu.controls
            .push(MenuControl::toggle(format!("Existing{}", i), None, "x"));
    }
    let ctx = GenerateContext {
        basis_parameters: Some(&basis),
        basis_menu: Some(&menu),
        ..GenerateContext::new(&scene)
    };
    let result = validate_for_generate(&make_valid_descriptor(), &ctx);

    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::ParameterNameCollision));
    assert!(result.has_warning(WarningCode::MenuOverflow));
}
