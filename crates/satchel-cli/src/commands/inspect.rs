//! Inspect command implementation
//!
//! Shows what a descriptor would generate: parameter names, resolved target
//! paths and the parameter budget left afterwards.

use anyhow::{Context, Result};
use colored::Colorize;
use satchel_gen::{load_document, resolve_anim_path, FsAssetStore};
use satchel_spec::{
    slot_parameter_name, ExpressionParameters, InventoryDescriptor, OutputLayout, Scene,
};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{print_json, InspectOutput, InspectSlot};
use crate::input::{load_descriptor, load_scene};

/// Arguments of one `inspect` run.
#[derive(Debug, Clone)]
pub struct InspectArgs<'a> {
    /// Descriptor file (JSON or YAML)
    pub descriptor: &'a str,
    /// Scene used to resolve target paths
    pub scene: Option<&'a str>,
    /// Directory basis asset paths are resolved against
    pub asset_root: &'a str,
    /// Host parameter capacity
    pub capacity: usize,
    /// Generated root the bundle would land in
    pub generated_root: &'a str,
}

/// Builds the inspect view of a descriptor.
///
/// Targets resolve to animation paths when a scene is given; without one
/// they are shown as object ids. Missing or unresolvable targets are `None`.
pub fn inspect(
    descriptor: &InventoryDescriptor,
    scene: Option<&Scene>,
    basis_parameters: Option<&ExpressionParameters>,
    capacity: usize,
    generated_root: &str,
) -> InspectOutput {
    let slots = descriptor
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| InspectSlot {
            name: slot.name.clone(),
            parameter: slot_parameter_name(i),
            start_enabled: slot.start_enabled,
            targets: slot
                .targets
                .iter()
                .map(|target| {
                    let id = (*target)?;
                    match scene {
                        Some(scene) => resolve_anim_path(scene, id),
                        None => Some(id.to_string()),
                    }
                })
                .collect(),
        })
        .collect();

    let carried = basis_parameters.map(|p| p.named_count()).unwrap_or(0);
    let remaining = capacity as i64 - carried as i64 - descriptor.slot_count() as i64;

    InspectOutput {
        descriptor_id: descriptor.descriptor_id.clone(),
        layer_type: descriptor.layer_type.to_string(),
        slots,
        carried_parameters: carried,
        remaining_capacity: remaining,
        bundle_dir: OutputLayout::new(generated_root, &descriptor.descriptor_id).bundle_dir,
    }
}

/// Run the inspect command
pub fn run(args: &InspectArgs<'_>, json_output: bool) -> Result<ExitCode> {
    let loaded = load_descriptor(Path::new(args.descriptor))
        .with_context(|| format!("Failed to load descriptor: {}", args.descriptor))?;
    let descriptor = loaded.descriptor;

    let scene = match args.scene {
        Some(path) => Some(
            load_scene(Path::new(path))
                .with_context(|| format!("Failed to load scene: {}", path))?,
        ),
        None => None,
    };

    let basis_parameters: Option<ExpressionParameters> = match &descriptor.basis.parameters {
        Some(path) => {
            let store = FsAssetStore::new(args.asset_root);
            Some(
                load_document(&store, path)
                    .with_context(|| format!("Failed to load basis parameters: {}", path))?,
            )
        }
        None => None,
    };

    let output = inspect(
        &descriptor,
        scene.as_ref(),
        basis_parameters.as_ref(),
        args.capacity,
        args.generated_root,
    );

    if json_output {
        print_json(&output)?;
    } else {
        print_human(&output);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_human(output: &InspectOutput) {
    println!("{} {}", "Descriptor:".cyan().bold(), output.descriptor_id);
    println!("{} {}", "Layer:".dimmed(), output.layer_type);
    println!("{} {}", "Bundle:".dimmed(), output.bundle_dir);

    println!("\n{}", "Slots:".bold());
    for slot in &output.slots {
        let resting = if slot.start_enabled { "on" } else { "off" };
        println!(
            "  {} {} {}",
            slot.parameter.cyan(),
            slot.name,
            format!("(rests {})", resting).dimmed()
        );
        for target in &slot.targets {
            match target {
                Some(path) => println!("    - {}", path),
                None => println!("    - {}", "missing".yellow()),
            }
        }
    }

    let budget = format!(
        "{} carried, {} remaining",
        output.carried_parameters, output.remaining_capacity
    );
    if output.remaining_capacity < 0 {
        println!("\n{} {}", "Parameters:".red().bold(), budget);
    } else {
        println!("\n{} {}", "Parameters:".green().bold(), budget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use satchel_spec::{InventorySlot, ObjectId, Parameter};

    const ID: &str = "0123456789abcdef0123456789abcdef";

    fn scene() -> Scene {
        let mut scene = Scene::new();
        let root = scene.add_object("Avatar", None);
        let armature = scene.add_object("Armature", Some(root));
        scene.add_object("Hat", Some(armature));
        scene
    }

    #[test]
    fn test_inspect_resolves_paths() {
        let descriptor = InventoryDescriptor::builder(ID)
            .slot(
                InventorySlot::new("Hat")
                    .target(ObjectId(2))
                    .missing_target()
                    .target(ObjectId(40)),
            )
            .build();

        let output = inspect(&descriptor, Some(&scene()), None, 16, "_generated");
        assert_eq!(output.slots[0].parameter, "GenInventorySlot0");
        assert_eq!(
            output.slots[0].targets,
            vec![Some("Armature/Hat".to_string()), None, None]
        );
        assert_eq!(output.remaining_capacity, 15);
        assert_eq!(output.bundle_dir, format!("_generated/{}", ID));
    }

    #[test]
    fn test_inspect_without_scene_shows_ids() {
        let descriptor = InventoryDescriptor::builder(ID)
            .slot(InventorySlot::new("Hat").target(ObjectId(2)))
            .build();

        let output = inspect(&descriptor, None, None, 16, "_generated");
        assert_eq!(output.slots[0].targets, vec![Some("#2".to_string())]);
    }

    #[test]
    fn test_inspect_reports_overflow() {
        let basis = ExpressionParameters::new(
            (0..15).map(|i| Parameter::int(format!("P{}", i))).collect(),
        );
        let descriptor = InventoryDescriptor::builder(ID)
            .slot(InventorySlot::new("A"))
            .slot(InventorySlot::new("B"))
            .build();

        let output = inspect(&descriptor, None, Some(&basis), 16, "_generated");
        assert_eq!(output.carried_parameters, 15);
        assert_eq!(output.remaining_capacity, -1);
    }
}
