//! Committing a plan: writing the bundle and wiring it into the host.

use log::{debug, info};

use satchel_spec::{AvatarDescriptor, CustomAnimLayer, OutputKind, OutputResult, Scene};

use crate::bundle::GeneratedBundle;
use crate::clip::apply_preview;
use crate::config::GeneratorConfig;
use crate::error::{GenError, GenResult};
use crate::generate::GenerationPlan;
use crate::store::{AssetFile, AssetStore};

/// What a commit changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Documents written, with their hashes.
    pub outputs: Vec<OutputResult>,
    /// How many of them overwrote an existing asset.
    pub replaced_outputs: usize,
    /// Whether a host layer entry was replaced.
    pub layer_replaced: bool,
    /// Scene objects whose active state was set.
    pub preview_applied: usize,
}

/// Points the host at the bundle's parameter set and menu and replaces the
/// first layer entry of the bundle's layer type with the generated controller.
///
/// Returns false if the host has no entry of that type; nothing else is
/// skipped in that case.
pub fn attach_to_host(avatar: &mut AvatarDescriptor, bundle: &GeneratedBundle) -> bool {
    avatar.expression_parameters = Some(bundle.path(OutputKind::Parameters));
    avatar.expressions_menu = Some(bundle.path(OutputKind::Menu));

    match avatar.layer_index(bundle.layer_type) {
        Some(index) => {
            avatar.base_animation_layers[index] =
                CustomAnimLayer::custom(bundle.layer_type, bundle.path(OutputKind::Controller));
            debug!("replaced host layer {} ({})", index, bundle.layer_type);
            true
        }
        None => false,
    }
}

/// Writes the bundle through `store` in one batch, then applies the preview
/// edits (if enabled) and attaches the bundle to the scene's host.
pub fn commit(
    plan: &GenerationPlan,
    scene: &mut Scene,
    store: &mut dyn AssetStore,
    config: &GeneratorConfig,
) -> GenResult<CommitSummary> {
    if scene.avatar.is_none() {
        return Err(GenError::MissingHostComponent);
    }

    let encoded = plan.bundle.encode()?;
    let files: Vec<AssetFile> = encoded.iter().map(|(_, file)| file.clone()).collect();
    let replaced_outputs = files.iter().filter(|f| store.exists(&f.path)).count();
    if replaced_outputs > 0 {
        debug!("overwriting {} existing document(s)", replaced_outputs);
    }
    store.write_batch(&files)?;
    let outputs = GeneratedBundle::output_results(&encoded);

    let preview_applied = if config.apply_resting_state {
        apply_preview(scene, &plan.preview)
    } else {
        0
    };

    let layer_replaced = match scene.avatar.as_mut() {
        Some(avatar) => attach_to_host(avatar, &plan.bundle),
        None => return Err(GenError::MissingHostComponent),
    };

    info!(
        "committed {} to {} ({} file(s), layer replaced: {})",
        plan.bundle.descriptor_id,
        plan.bundle.layout.bundle_dir,
        outputs.len(),
        layer_replaced
    );

    Ok(CommitSummary {
        outputs,
        replaced_outputs,
        layer_replaced,
        preview_applied,
    })
}
