//! The generation pass.
//!
//! [`generate`] computes every document in memory and touches nothing.
//! [`commit`](crate::integrate::commit) then writes and applies the plan in
//! one step, so a failed run leaves the store and scene untouched.

use log::{debug, info, warn};

use satchel_spec::validation::missing_layer_warning;
use satchel_spec::{
    slot_parameter_name, AnimationClip, AnimatorController, AvatarMask, ControllerLayer,
    ControllerParameterType, InventoryDescriptor, OutputLayout, Scene, ValidationWarning,
};

use crate::bundle::GeneratedBundle;
use crate::clip::{slot_clip, PreviewEdit};
use crate::config::{GeneratorConfig, MissingLayerPolicy};
use crate::error::{GenError, GenResult};
use crate::layer::{build_toggle_layer, exclusion_mask};
use crate::menu::synthesize_menu;
use crate::params::allocate_parameters;
use crate::template::{BasisDocuments, Template};

/// Name given to a controller generated without a basis.
pub const DEFAULT_CONTROLLER_NAME: &str = "inventoryController";

/// The result of a generation pass, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    /// Documents to write.
    pub bundle: GeneratedBundle,
    /// Resting-state edits to apply to live scene objects.
    pub preview: Vec<PreviewEdit>,
    /// Non-fatal conditions found while planning.
    pub warnings: Vec<ValidationWarning>,
    /// Number of slots generated.
    pub slot_count: usize,
}

/// Computes the bundle for `descriptor` without mutating anything.
///
/// Checks run in order: scene shape, host presence, host layer slot (per
/// `config.missing_layer`), then parameter capacity. Any failure returns before
/// a document is built.
pub fn generate(
    descriptor: &InventoryDescriptor,
    scene: &Scene,
    basis: &BasisDocuments,
    config: &GeneratorConfig,
) -> GenResult<GenerationPlan> {
    scene
        .validate()
        .map_err(|e| GenError::InvalidScene(e.to_string()))?;

    let avatar = scene.avatar.as_ref().ok_or(GenError::MissingHostComponent)?;

    let mut warnings = Vec::new();
    if !avatar.has_layer(descriptor.layer_type) {
        match config.missing_layer {
            MissingLayerPolicy::Error => {
                return Err(GenError::LayerSlotMissing {
                    layer_type: descriptor.layer_type,
                })
            }
            MissingLayerPolicy::Ignore => {
                warn!(
                    "host has no '{}' layer; the controller will not be attached",
                    descriptor.layer_type
                );
                warnings.push(missing_layer_warning(descriptor.layer_type));
            }
        }
    }

    let slot_count = descriptor.slot_count();
    let parameters = allocate_parameters(
        Template::resolve(basis.parameters.clone()),
        slot_count,
        config.capacity,
    )?;

    let menu = synthesize_menu(Template::resolve(basis.menu.clone()), &descriptor.slots);

    let mut controller = Template::resolve(basis.controller.clone()).into_document();
    if controller.name.is_empty() {
        controller.name = DEFAULT_CONTROLLER_NAME.to_string();
    }
    upsert_mask(&mut controller, exclusion_mask());

    let mut preview = Vec::new();
    for (i, slot) in descriptor.slots.iter().enumerate() {
        let (clip, edits) = slot_clip(i, slot, scene);
        let layer = build_toggle_layer(i, &slot_parameter_name(i), &clip.name);
        upsert_clip(&mut controller, clip);
        upsert_layer(&mut controller, layer);
        preview.extend(edits);
    }

    for i in 0..slot_count {
        let name = slot_parameter_name(i);
        if controller.upsert_parameter(name.clone(), ControllerParameterType::Int) {
            debug!("controller parameter {} already existed, retyped to int", name);
        }
    }

    let layout = OutputLayout::new(&config.generated_root, &descriptor.descriptor_id);
    info!(
        "planned {} slot(s) for {} into {}",
        slot_count, descriptor.descriptor_id, layout.bundle_dir
    );

    Ok(GenerationPlan {
        bundle: GeneratedBundle {
            descriptor_id: descriptor.descriptor_id.clone(),
            layer_type: descriptor.layer_type,
            layout,
            parameters,
            menu,
            controller,
        },
        preview,
        warnings,
        slot_count,
    })
}

fn upsert_mask(controller: &mut AnimatorController, mask: AvatarMask) {
    match controller.masks.iter_mut().find(|m| m.name == mask.name) {
        Some(existing) => *existing = mask,
        None => controller.masks.push(mask),
    }
}

fn upsert_clip(controller: &mut AnimatorController, clip: AnimationClip) {
    match controller.clips.iter_mut().find(|c| c.name == clip.name) {
        Some(existing) => *existing = clip,
        None => controller.clips.push(clip),
    }
}

// Layers left by an earlier run are replaced in place.
fn upsert_layer(controller: &mut AnimatorController, layer: ControllerLayer) {
    match controller.layers.iter_mut().find(|l| l.name == layer.name) {
        Some(existing) => *existing = layer,
        None => controller.layers.push(layer),
    }
}
