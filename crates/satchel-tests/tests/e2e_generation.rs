//! End-to-End Generation Tests for Satchel
//!
//! Tests verify the documents a generation pass produces and what a commit
//! changes, using the in-memory asset store.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p satchel-tests --test e2e_generation
//! ```

use pretty_assertions::assert_eq;
use satchel_gen::{
    commit, generate, BasisDocuments, GenError, GenerationPlan, GeneratorConfig,
    MemoryAssetStore,
};
use satchel_spec::{
    AnimLayerType, ConditionMode, ControllerParameterType, InventoryDescriptor, InventorySlot,
    Scene, ValueType, PARAMETER_CAPACITY,
};
use satchel_tests::{avatar_scene, descriptor, filler_parameters};

fn fresh(d: &InventoryDescriptor, scene: &Scene) -> GenerationPlan {
    generate(d, scene, &BasisDocuments::none(), &GeneratorConfig::default()).unwrap()
}

// ============================================================================
// Fresh generation
// ============================================================================

#[test]
fn test_three_slots_without_basis() {
    let (scene, rig) = avatar_scene();
    let d = descriptor()
        .slot(InventorySlot::new("Hat").target(rig.hat))
        .slot(InventorySlot::new("Body").target(rig.body).start_enabled(true))
        .slot(InventorySlot::new("Scarf").target(rig.scarf))
        .build();

    let plan = fresh(&d, &scene);
    let bundle = &plan.bundle;

    // Parameters: three named ints, then float placeholders up to capacity.
    assert_eq!(bundle.parameters.len(), PARAMETER_CAPACITY);
    let named: Vec<&str> = bundle.parameters.named().map(|p| p.name.as_str()).collect();
    assert_eq!(
        named,
        vec!["GenInventorySlot0", "GenInventorySlot1", "GenInventorySlot2"]
    );
    assert!(bundle.parameters.parameters[..3]
        .iter()
        .all(|p| p.value_type == ValueType::Int));
    assert!(bundle.parameters.parameters[3..]
        .iter()
        .all(|p| p.is_blank() && p.value_type == ValueType::Float));

    // Menu: one toggle per slot, bound to the matching parameter.
    let bindings: Vec<(&str, Option<&str>)> = bundle
        .menu
        .controls
        .iter()
        .map(|c| (c.name.as_str(), c.parameter.as_deref()))
        .collect();
    assert_eq!(
        bindings,
        vec![
            ("Hat", Some("GenInventorySlot0")),
            ("Body", Some("GenInventorySlot1")),
            ("Scarf", Some("GenInventorySlot2")),
        ]
    );

    // Controller: one layer per slot, int parameters, shared mask.
    let controller = &bundle.controller;
    assert_eq!(controller.name, "inventoryController");
    assert_eq!(controller.layers.len(), 3);
    assert_eq!(controller.clips.len(), 3);
    assert_eq!(controller.masks.len(), 1);
    assert!(controller.masks[0].excludes_all_body_parts());
    for i in 0..3 {
        let parameter = controller
            .parameter(&format!("GenInventorySlot{}", i))
            .unwrap();
        assert_eq!(parameter.kind, ControllerParameterType::Int);
    }
    assert!(controller.dangling_references().is_empty());

    // Resting states: Body rests on, so its clip switches it off.
    let body_clip = controller.clip("toggleAnim1").unwrap();
    assert_eq!(body_clip.curves[0].path, "Body");
    assert_eq!(body_clip.curves[0].initial_value(), Some(0.0));
    let hat_clip = controller.clip("toggleAnim0").unwrap();
    assert_eq!(hat_clip.curves[0].initial_value(), Some(1.0));

    assert_eq!(plan.slot_count, 3);
    assert_eq!(plan.preview.len(), 3);
    assert!(plan.warnings.is_empty());
}

#[test]
fn test_every_layer_is_a_two_state_toggle() {
    let (scene, rig) = avatar_scene();
    let d = descriptor()
        .slot(InventorySlot::new("Hat").target(rig.hat))
        .slot(InventorySlot::new("Scarf").target(rig.scarf))
        .build();

    let plan = fresh(&d, &scene);

    for (i, layer) in plan.bundle.controller.layers.iter().enumerate() {
        let parameter = format!("GenInventorySlot{}", i);
        let machine = &layer.state_machine;

        assert_eq!(layer.name, format!("GenToggleLayer{}", i));
        assert_eq!(machine.name, layer.name);
        assert_eq!(layer.default_weight, 1.0);
        assert_eq!(layer.avatar_mask.as_deref(), Some("maskEverythingMask"));
        assert_eq!(machine.states.len(), 2);
        assert_eq!(machine.transitions.len(), 2);
        assert_eq!(machine.default_state.as_deref(), Some("Null State"));

        let idle = machine.state("Null State").unwrap();
        let triggered = machine.state("Toggle Triggered").unwrap();
        assert_eq!(idle.motion, None);
        assert_eq!(triggered.motion, Some(format!("toggleAnim{}", i)));

        let on: Vec<_> = machine.transitions_from("Null State").collect();
        assert_eq!(on.len(), 1);
        assert_eq!(on[0].destination, "Toggle Triggered");
        assert_eq!(on[0].conditions.len(), 1);
        assert_eq!(on[0].conditions[0].mode, ConditionMode::Greater);
        assert_eq!(on[0].conditions[0].threshold, 0.0);
        assert_eq!(on[0].conditions[0].parameter, parameter);
        assert!(on[0].is_instant());

        let off: Vec<_> = machine.transitions_from("Toggle Triggered").collect();
        assert_eq!(off.len(), 1);
        assert_eq!(off[0].destination, "Null State");
        assert_eq!(off[0].conditions[0].mode, ConditionMode::Equals);
        assert_eq!(off[0].conditions[0].threshold, 0.0);
        assert_eq!(off[0].conditions[0].parameter, parameter);
        assert!(off[0].is_instant());
    }
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_capacity_overflow_leaves_everything_untouched() {
    let (scene, rig) = avatar_scene();
    let before = scene.clone();
    let d = descriptor()
        .slot(InventorySlot::new("Hat").target(rig.hat))
        .slot(InventorySlot::new("Scarf").target(rig.scarf))
        .build();
    let basis = BasisDocuments {
        parameters: Some(filler_parameters(15)),
        ..BasisDocuments::none()
    };

    let err = generate(&d, &scene, &basis, &GeneratorConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        GenError::CapacityExceeded {
            carried: 15,
            requested: 2,
            capacity: 16
        }
    ));
    assert_eq!(err.usable_slots(), Some(1));
    assert!(err
        .to_string()
        .starts_with("Cannot have more than 1 inventory slots"));

    // Generation is pure; nothing reached the scene.
    assert_eq!(scene, before);
}

#[test]
fn test_exactly_full_capacity_succeeds() {
    let (scene, rig) = avatar_scene();
    let d = descriptor()
        .slot(InventorySlot::new("Hat").target(rig.hat))
        .slot(InventorySlot::new("Scarf").target(rig.scarf))
        .build();
    let basis = BasisDocuments {
        parameters: Some(filler_parameters(14)),
        ..BasisDocuments::none()
    };

    let plan = generate(&d, &scene, &basis, &GeneratorConfig::default()).unwrap();
    assert_eq!(plan.bundle.parameters.named_count(), 16);
    assert_eq!(plan.bundle.parameters.parameters[14].name, "GenInventorySlot0");
}

#[test]
fn test_null_target_is_skipped() {
    let (scene, rig) = avatar_scene();
    let d = descriptor()
        .slot(
            InventorySlot::new("Outfit")
                .target(rig.hat)
                .missing_target()
                .target(rig.scarf),
        )
        .build();

    let plan = fresh(&d, &scene);
    let clip = plan.bundle.controller.clip("toggleAnim0").unwrap();

    let paths: Vec<&str> = clip.paths().collect();
    assert_eq!(paths, vec!["Armature/Hips/Spine/Hat", "Scarf"]);
    assert_eq!(plan.preview.len(), 2);
}

#[test]
fn test_deep_target_path_excludes_root() {
    let (scene, rig) = avatar_scene();
    let d = descriptor()
        .slot(InventorySlot::new("Hat").target(rig.hat))
        .build();

    let plan = fresh(&d, &scene);
    let curve = &plan.bundle.controller.clip("toggleAnim0").unwrap().curves[0];

    assert_eq!(curve.path, "Armature/Hips/Spine/Hat");
    assert_eq!(curve.property, "m_IsActive");
}

#[test]
fn test_slot_without_live_targets_is_inert() {
    let (scene, _) = avatar_scene();
    let d = descriptor()
        .slot(InventorySlot::new("Empty").missing_target())
        .build();

    let plan = fresh(&d, &scene);

    assert!(plan.bundle.controller.clip("toggleAnim0").unwrap().is_empty());
    assert_eq!(plan.bundle.controller.layers.len(), 1);
    assert_eq!(plan.bundle.menu.controls.len(), 1);
    assert!(plan.preview.is_empty());
}

#[test]
fn test_missing_host_fails() {
    let (scene, rig) = avatar_scene();
    let scene = Scene {
        avatar: None,
        ..scene
    };
    let d = descriptor()
        .slot(InventorySlot::new("Hat").target(rig.hat))
        .build();

    let err = generate(&d, &scene, &BasisDocuments::none(), &GeneratorConfig::default())
        .unwrap_err();
    assert!(matches!(err, GenError::MissingHostComponent));
}

// ============================================================================
// Commit
// ============================================================================

#[test]
fn test_commit_attaches_bundle_to_fx_layer() {
    let (mut scene, rig) = avatar_scene();
    let d = descriptor()
        .layer_type(AnimLayerType::Fx)
        .slot(InventorySlot::new("Hat").target(rig.hat).start_enabled(true))
        .slot(InventorySlot::new("Scarf").target(rig.scarf))
        .build();
    let config = GeneratorConfig::default();
    let plan = generate(&d, &scene, &BasisDocuments::none(), &config).unwrap();

    let mut store = MemoryAssetStore::new();
    let summary = commit(&plan, &mut scene, &mut store, &config).unwrap();

    assert!(summary.layer_replaced);
    assert_eq!(summary.preview_applied, 2);
    assert!(scene.objects[rig.hat.index()].active);
    assert!(!scene.objects[rig.scarf.index()].active);

    let paths: Vec<String> = store.paths().map(String::from).collect();
    let dir = format!("_generated/{}", d.descriptor_id);
    assert_eq!(
        paths,
        vec![
            format!("{}/customStageParams.json", dir),
            format!("{}/expressionMenu.json", dir),
            format!("{}/inventoryController.json", dir),
        ]
    );

    let avatar = scene.avatar.as_ref().unwrap();
    let fx = &avatar.base_animation_layers[4];
    assert_eq!(fx.layer_type, AnimLayerType::Fx);
    assert!(!fx.is_default);
    assert_eq!(
        fx.animator_controller.as_deref(),
        Some(format!("{}/inventoryController.json", dir).as_str())
    );
    assert!(avatar.base_animation_layers[2].is_default);
}

#[test]
fn test_missing_layer_is_a_warning_by_default() {
    let (mut scene, rig) = avatar_scene();
    let d = descriptor()
        .layer_type(AnimLayerType::Sitting)
        .slot(InventorySlot::new("Hat").target(rig.hat))
        .build();
    let config = GeneratorConfig::default();

    let plan = generate(&d, &scene, &BasisDocuments::none(), &config).unwrap();
    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.warnings[0].code.code(), "W007");

    let mut store = MemoryAssetStore::new();
    let summary = commit(&plan, &mut scene, &mut store, &config).unwrap();
    assert!(!summary.layer_replaced);
    assert_eq!(store.len(), 3);
    assert!(scene.avatar.unwrap().expressions_menu.is_some());
}

#[test]
fn test_regenerating_over_own_controller_is_stable() {
    let (scene, rig) = avatar_scene();
    let d = descriptor()
        .slot(InventorySlot::new("Hat").target(rig.hat))
        .slot(InventorySlot::new("Scarf").target(rig.scarf))
        .build();
    let config = GeneratorConfig::default();

    let first = generate(&d, &scene, &BasisDocuments::none(), &config).unwrap();
    let basis = BasisDocuments {
        controller: Some(first.bundle.controller.clone()),
        ..BasisDocuments::none()
    };
    let second = generate(&d, &scene, &basis, &config).unwrap();

    assert_eq!(second.bundle.controller, first.bundle.controller);
}
