//! Validate command implementation
//!
//! Validates a descriptor, optionally against a scene and its basis assets,
//! and writes a report.

use anyhow::{Context, Result};
use colored::Colorize;
use satchel_gen::{BasisDocuments, FsAssetStore, GenError};
use satchel_spec::{
    canonical_descriptor_hash, validate_descriptor, validate_for_generate, GenerateContext,
    InventoryDescriptor, ReportBuilder, Scene, ValidationResult,
};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    error_codes, input_error_to_json, print_json, validation_error_to_json,
    validation_warning_to_json, JsonError, ValidateOutput,
};
use super::reporting;
use crate::input::{load_descriptor, load_scene, LoadResult};

/// Inputs shared by `validate` and `generate`.
#[derive(Debug, Clone)]
pub struct ValidateArgs<'a> {
    /// Descriptor file (JSON or YAML)
    pub descriptor: &'a str,
    /// Scene file; without it only descriptor-level checks run
    pub scene: Option<&'a str>,
    /// Directory basis asset paths are resolved against
    pub asset_root: &'a str,
    /// Host parameter capacity
    pub capacity: usize,
}

/// Checks `descriptor` alone, or against `scene` with basis documents read
/// from `store` when a scene is given.
pub fn check_descriptor(
    descriptor: &InventoryDescriptor,
    scene: Option<&Scene>,
    store: &FsAssetStore,
    capacity: usize,
) -> Result<ValidationResult, GenError> {
    match scene {
        Some(scene) => check_against_scene(descriptor, scene, store, capacity).map(|(v, _)| v),
        None => Ok(validate_descriptor(descriptor)),
    }
}

/// Runs the full pre-generation checks and returns the loaded basis
/// documents alongside the result.
///
/// The basis is `None` when descriptor-level validation already failed;
/// unsafe basis paths are never read.
pub fn check_against_scene(
    descriptor: &InventoryDescriptor,
    scene: &Scene,
    store: &FsAssetStore,
    capacity: usize,
) -> Result<(ValidationResult, Option<BasisDocuments>), GenError> {
    let descriptor_only = validate_descriptor(descriptor);
    if !descriptor_only.is_ok() {
        return Ok((descriptor_only, None));
    }

    let basis = BasisDocuments::load(&descriptor.basis, store)?;
    let ctx = GenerateContext {
        scene,
        basis_parameters: basis.parameters.as_ref(),
        basis_menu: basis.menu.as_ref(),
        capacity,
    };
    let validation = validate_for_generate(descriptor, &ctx);
    Ok((validation, Some(basis)))
}

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(args: &ValidateArgs<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

fn run_human(args: &ValidateArgs<'_>) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Validating:".cyan().bold(), args.descriptor);

    let LoadResult {
        descriptor,
        source_kind,
        source_hash,
    } = load_descriptor(Path::new(args.descriptor))
        .with_context(|| format!("Failed to load descriptor: {}", args.descriptor))?;

    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        source_kind.as_str(),
        &source_hash[..16]
    );

    let scene = match args.scene {
        Some(path) => {
            println!("{} {}", "Scene:".dimmed(), path);
            let scene = load_scene(Path::new(path))
                .with_context(|| format!("Failed to load scene: {}", path))?;
            Some(scene)
        }
        None => None,
    };

    let store = FsAssetStore::new(args.asset_root);
    let validation = check_descriptor(&descriptor, scene.as_ref(), &store, args.capacity)
        .context("Failed to load basis assets")?;

    let duration_ms = start.elapsed().as_millis() as u64;
    let report_path =
        write_validation_report(args.descriptor, &descriptor, &validation, duration_ms)?;

    print_validation_results(&validation, &report_path);

    if validation.is_ok() {
        println!(
            "\n{} Descriptor is valid ({}ms)",
            "SUCCESS".green().bold(),
            duration_ms
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Descriptor has {} error(s) ({}ms)",
            "FAILED".red().bold(),
            validation.errors.len(),
            duration_ms
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(args: &ValidateArgs<'_>) -> Result<ExitCode> {
    let start = Instant::now();

    let descriptor = match load_descriptor(Path::new(args.descriptor)) {
        Ok(loaded) => loaded.descriptor,
        Err(e) => {
            let error = input_error_to_json(&e, Some(args.descriptor));
            print_json(&failure(vec![error], None))?;
            return Ok(ExitCode::from(1));
        }
    };

    let scene = match args.scene.map(|p| (p, load_scene(Path::new(p)))) {
        None => None,
        Some((_, Ok(scene))) => Some(scene),
        Some((path, Err(e))) => {
            let error = input_error_to_json(&e, Some(path));
            print_json(&failure(vec![error], Some(&descriptor)))?;
            return Ok(ExitCode::from(1));
        }
    };

    let store = FsAssetStore::new(args.asset_root);
    let validation = match check_descriptor(&descriptor, scene.as_ref(), &store, args.capacity) {
        Ok(v) => v,
        Err(e) => {
            let error = JsonError::new(error_codes::BASIS_LOAD, e.to_string());
            print_json(&failure(vec![error], Some(&descriptor)))?;
            return Ok(ExitCode::from(1));
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    write_validation_report(args.descriptor, &descriptor, &validation, duration_ms)?;

    let output = ValidateOutput {
        success: validation.is_ok(),
        errors: validation.errors.iter().map(validation_error_to_json).collect(),
        warnings: validation
            .warnings
            .iter()
            .map(validation_warning_to_json)
            .collect(),
        descriptor_id: Some(descriptor.descriptor_id.clone()),
        descriptor_hash: canonical_descriptor_hash(&descriptor).ok(),
    };
    print_json(&output)?;

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn failure(errors: Vec<JsonError>, descriptor: Option<&InventoryDescriptor>) -> ValidateOutput {
    ValidateOutput {
        success: false,
        errors,
        warnings: Vec::new(),
        descriptor_id: descriptor.map(|d| d.descriptor_id.clone()),
        descriptor_hash: descriptor.and_then(|d| canonical_descriptor_hash(d).ok()),
    }
}

pub(crate) fn write_validation_report(
    descriptor_path: &str,
    descriptor: &InventoryDescriptor,
    validation: &ValidationResult,
    duration_ms: u64,
) -> Result<String> {
    let descriptor_hash =
        canonical_descriptor_hash(descriptor).unwrap_or_else(|_| "unknown".to_string());
    let builder = ReportBuilder::new(descriptor_hash, reporting::tool_version())
        .descriptor_id(&descriptor.descriptor_id)
        .slot_count(descriptor.slot_count())
        .duration_ms(duration_ms);
    let report = reporting::apply_validation_messages(builder, validation)
        .ok(validation.is_ok())
        .build();

    let report_path = reporting::report_path(descriptor_path, &descriptor.descriptor_id);
    reporting::write_report(&report, &report_path)?;
    Ok(report_path)
}

/// Print validation results to the console
pub(crate) fn print_validation_results(result: &ValidationResult, report_path: &str) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }

    println!("\n{} {}", "Report:".dimmed(), report_path);
}
