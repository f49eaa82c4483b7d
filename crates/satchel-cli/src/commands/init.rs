//! Init command implementation
//!
//! Writes a descriptor skeleton with a fresh descriptor id.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use satchel_spec::{new_descriptor_id, AnimLayerType, InventoryDescriptor, InventorySlot};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::input::SourceKind;

/// Parses a layer type name as written in descriptors (`gesture`, `fx`, ...).
pub fn parse_layer_type(name: &str) -> Result<AnimLayerType> {
    let lowered = name.to_lowercase();
    AnimLayerType::all()
        .iter()
        .copied()
        .find(|t| t.as_str() == lowered)
        .ok_or_else(|| {
            let names: Vec<&str> = AnimLayerType::all().iter().map(|t| t.as_str()).collect();
            anyhow::anyhow!(
                "unknown layer type '{}' (expected one of: {})",
                name,
                names.join(", ")
            )
        })
}

/// Builds the skeleton descriptor written by `init`.
pub fn skeleton(layer_type: AnimLayerType) -> InventoryDescriptor {
    InventoryDescriptor::builder(new_descriptor_id())
        .layer_type(layer_type)
        .slot(InventorySlot::new("Item"))
        .build()
}

/// Run the init command
///
/// # Arguments
/// * `out` - Destination file; `.json`, `.yaml` or `.yml`
/// * `layer` - Host layer slot the inventory replaces
/// * `force` - Overwrite an existing file
pub fn run(out: &str, layer: &str, force: bool) -> Result<ExitCode> {
    let out_path = Path::new(out);
    let kind = SourceKind::from_path(out_path)?;
    let layer_type = parse_layer_type(layer)?;

    if out_path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", out);
    }

    let descriptor = skeleton(layer_type);
    let content = match kind {
        SourceKind::Json => {
            let mut json = descriptor
                .to_json_pretty()
                .context("Failed to serialize descriptor")?;
            json.push('\n');
            json
        }
        SourceKind::Yaml => {
            serde_yaml::to_string(&descriptor).context("Failed to serialize descriptor")?
        }
    };

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(out_path, content).with_context(|| format!("Failed to write: {}", out))?;

    println!(
        "{} {} ({}, layer {})",
        "Created:".green().bold(),
        out,
        descriptor.descriptor_id.dimmed(),
        layer_type
    );

    Ok(ExitCode::SUCCESS)
}
