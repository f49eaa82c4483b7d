//! Generate command implementation
//!
//! Validates a descriptor against its scene, runs the generation pass, writes
//! the bundle under the asset root and rewrites the scene with the attached
//! host.

use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use satchel_gen::{
    commit, generate, CodedError, CommitSummary, FsAssetStore, GenError, GeneratorConfig,
};
use satchel_spec::{
    canonical_descriptor_hash, InventoryDescriptor, ReportBuilder, ReportError, Scene,
    ValidationResult, ValidationWarning,
};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    gen_error_to_json, input_error_to_json, print_json, validation_error_to_json,
    validation_warning_to_json, GenerateOutput, GenerateResult, JsonWarning,
};
use super::reporting;
use super::validate::{check_against_scene, print_validation_results};
use crate::input::{load_descriptor, load_scene};

/// Arguments of one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateArgs<'a> {
    /// Descriptor file (JSON or YAML)
    pub descriptor: &'a str,
    /// Scene file; rewritten on success
    pub scene: &'a str,
    /// Directory receiving the generated bundle and holding basis assets
    pub asset_root: &'a str,
    /// Generator settings
    pub config: GeneratorConfig,
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Validation failed; nothing was written except the report.
    Invalid {
        validation: ValidationResult,
        report_path: String,
    },
    /// The generation pass or the store failed; nothing was committed.
    Failed {
        error: GenError,
        warnings: Vec<ValidationWarning>,
        report_path: String,
    },
    /// The bundle was written and the scene updated.
    Generated(Box<Generated>),
}

impl Outcome {
    /// Process exit code for this outcome: 0, 1 (invalid) or 2 (failed).
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Generated(_) => ExitCode::SUCCESS,
            Outcome::Invalid { .. } => ExitCode::from(1),
            Outcome::Failed { .. } => ExitCode::from(2),
        }
    }
}

/// Details of a committed run.
#[derive(Debug)]
pub struct Generated {
    pub descriptor_id: String,
    pub summary: CommitSummary,
    pub bundle_fingerprint: String,
    pub slot_count: usize,
    pub remaining_capacity: usize,
    pub warnings: Vec<ValidationWarning>,
    pub report_path: String,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 on success, 1 if validation fails, 2 if generation fails
pub fn run(args: &GenerateArgs<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Validates, generates and commits an already-loaded descriptor and scene.
///
/// On success `scene` holds the mutated host and preview states and has been
/// written back to `args.scene`. A report is written next to the descriptor
/// in every case.
pub fn execute(
    args: &GenerateArgs<'_>,
    descriptor: &InventoryDescriptor,
    scene: &mut Scene,
) -> Result<Outcome> {
    let start = Instant::now();
    let mut store = FsAssetStore::new(args.asset_root);
    let descriptor_hash =
        canonical_descriptor_hash(descriptor).unwrap_or_else(|_| "unknown".to_string());
    let report_path = reporting::report_path(args.descriptor, &descriptor.descriptor_id);
    let builder = ReportBuilder::new(descriptor_hash, reporting::tool_version())
        .descriptor_id(&descriptor.descriptor_id)
        .slot_count(descriptor.slot_count());

    let (validation, basis) =
        match check_against_scene(descriptor, scene, &store, args.config.capacity) {
            Ok(checked) => checked,
            Err(error) => {
                return fail(builder, error, Vec::new(), report_path, start);
            }
        };
    debug!(
        "pre-generation checks: {} error(s), {} warning(s)",
        validation.errors.len(),
        validation.warnings.len()
    );

    let basis = match basis {
        Some(basis) if validation.is_ok() => basis,
        _ => {
            let report = reporting::apply_validation_messages(builder, &validation)
                .ok(false)
                .duration_ms(start.elapsed().as_millis() as u64)
                .build();
            reporting::write_report(&report, &report_path)?;
            return Ok(Outcome::Invalid {
                validation,
                report_path,
            });
        }
    };

    let mut warnings = validation.warnings.clone();
    let plan = match generate(descriptor, scene, &basis, &args.config) {
        Ok(plan) => plan,
        Err(error) => return fail(builder, error, warnings, report_path, start),
    };
    for warning in &plan.warnings {
        if !warnings.contains(warning) {
            warnings.push(warning.clone());
        }
    }

    let bundle_fingerprint = match plan.bundle.fingerprint() {
        Ok(fingerprint) => fingerprint,
        Err(error) => return fail(builder, error, warnings, report_path, start),
    };

    let mut committed = scene.clone();
    let summary = match commit(&plan, &mut committed, &mut store, &args.config) {
        Ok(summary) => summary,
        Err(error) => return fail(builder, error, warnings, report_path, start),
    };
    *scene = committed;

    let mut scene_json = scene.to_json_pretty().context("Failed to serialize scene")?;
    scene_json.push('\n');
    fs::write(args.scene, scene_json)
        .with_context(|| format!("Failed to write scene: {}", args.scene))?;

    let remaining_capacity = args
        .config
        .capacity
        .saturating_sub(plan.bundle.parameters.named_count());

    let report = builder
        .ok(true)
        .validation_warnings(&warnings)
        .outputs(summary.outputs.clone())
        .bundle_fingerprint(&bundle_fingerprint)
        .remaining_capacity(remaining_capacity)
        .duration_ms(start.elapsed().as_millis() as u64)
        .build();
    reporting::write_report(&report, &report_path)?;

    Ok(Outcome::Generated(Box::new(Generated {
        descriptor_id: descriptor.descriptor_id.clone(),
        summary,
        bundle_fingerprint,
        slot_count: plan.slot_count,
        remaining_capacity,
        warnings,
        report_path,
    })))
}

fn fail(
    builder: ReportBuilder,
    error: GenError,
    warnings: Vec<ValidationWarning>,
    report_path: String,
    start: Instant,
) -> Result<Outcome> {
    let report = builder
        .ok(false)
        .error(ReportError::new(error.code(), error.message()))
        .validation_warnings(&warnings)
        .duration_ms(start.elapsed().as_millis() as u64)
        .build();
    reporting::write_report(&report, &report_path)?;
    Ok(Outcome::Failed {
        error,
        warnings,
        report_path,
    })
}

fn run_human(args: &GenerateArgs<'_>) -> Result<ExitCode> {
    println!("{} {}", "Generating:".cyan().bold(), args.descriptor);

    let loaded = load_descriptor(Path::new(args.descriptor))
        .with_context(|| format!("Failed to load descriptor: {}", args.descriptor))?;
    let mut scene = load_scene(Path::new(args.scene))
        .with_context(|| format!("Failed to load scene: {}", args.scene))?;

    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        loaded.source_kind.as_str(),
        &loaded.source_hash[..16]
    );
    println!("{} {}", "Asset root:".dimmed(), args.asset_root);

    let outcome = execute(args, &loaded.descriptor, &mut scene)?;
    match &outcome {
        Outcome::Invalid {
            validation,
            report_path,
        } => {
            print_validation_results(validation, report_path);
            println!(
                "\n{} Descriptor has {} error(s); nothing generated",
                "FAILED".red().bold(),
                validation.errors.len()
            );
        }
        Outcome::Failed {
            error,
            warnings,
            report_path,
        } => {
            print_warnings(warnings);
            println!(
                "\n{} [{}] {}",
                "FAILED".red().bold(),
                error.code().red(),
                error
            );
            println!("{} {}", "Report:".dimmed(), report_path);
        }
        Outcome::Generated(generated) => {
            print_warnings(&generated.warnings);
            println!("\n{}", "Outputs:".green().bold());
            for output in &generated.summary.outputs {
                println!(
                    "  {} {} {}",
                    "+".green(),
                    output.path,
                    format!("({})", &output.hash[..16]).dimmed()
                );
            }
            if generated.summary.replaced_outputs > 0 {
                println!(
                    "  {} {} existing document(s) overwritten",
                    "~".dimmed(),
                    generated.summary.replaced_outputs
                );
            }
            if !generated.summary.layer_replaced {
                println!(
                    "  {} host layer '{}' not replaced",
                    "!".yellow(),
                    loaded.descriptor.layer_type
                );
            }
            println!("{} {}", "Report:".dimmed(), generated.report_path);
            println!(
                "\n{} {} slot(s) generated, {} parameter slot(s) free",
                "SUCCESS".green().bold(),
                generated.slot_count,
                generated.remaining_capacity
            );
        }
    }

    Ok(outcome.exit_code())
}

fn run_json(args: &GenerateArgs<'_>) -> Result<ExitCode> {
    let descriptor = match load_descriptor(Path::new(args.descriptor)) {
        Ok(loaded) => loaded.descriptor,
        Err(e) => {
            let error = input_error_to_json(&e, Some(args.descriptor));
            print_json(&GenerateOutput::failure(vec![error], Vec::new()))?;
            return Ok(ExitCode::from(1));
        }
    };
    let mut scene = match load_scene(Path::new(args.scene)) {
        Ok(scene) => scene,
        Err(e) => {
            let error = input_error_to_json(&e, Some(args.scene));
            print_json(&GenerateOutput::failure(vec![error], Vec::new()))?;
            return Ok(ExitCode::from(1));
        }
    };

    let outcome = execute(args, &descriptor, &mut scene)?;
    let output = match &outcome {
        Outcome::Invalid { validation, .. } => GenerateOutput::failure(
            validation.errors.iter().map(validation_error_to_json).collect(),
            json_warnings(&validation.warnings),
        ),
        Outcome::Failed {
            error, warnings, ..
        } => GenerateOutput::failure(vec![gen_error_to_json(error)], json_warnings(warnings)),
        Outcome::Generated(generated) => GenerateOutput::success(
            GenerateResult {
                descriptor_id: generated.descriptor_id.clone(),
                outputs: generated.summary.outputs.clone(),
                bundle_fingerprint: generated.bundle_fingerprint.clone(),
                layer_replaced: generated.summary.layer_replaced,
                remaining_capacity: generated.remaining_capacity,
                report_path: generated.report_path.clone(),
            },
            json_warnings(&generated.warnings),
        ),
    };
    print_json(&output)?;

    Ok(outcome.exit_code())
}

fn json_warnings(warnings: &[ValidationWarning]) -> Vec<JsonWarning> {
    warnings.iter().map(validation_warning_to_json).collect()
}

fn print_warnings(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        println!(
            "  {} [{}]: {}",
            "!".yellow(),
            warning.code.to_string().yellow(),
            warning.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_spec::{
        AnimLayerType, AvatarDescriptor, ExpressionParameters, InventorySlot, ObjectId,
        Parameter, Report,
    };

    const ID: &str = "0123456789abcdef0123456789abcdef";

    struct Fixture {
        _tmp: tempfile::TempDir,
        descriptor_path: String,
        scene_path: String,
        asset_root: String,
    }

    fn fixture(descriptor: &InventoryDescriptor, scene: &Scene) -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let descriptor_path = tmp.path().join("inventory.json");
        let scene_path = tmp.path().join("scene.json");
        let asset_root = tmp.path().join("assets");
        fs::create_dir_all(&asset_root).unwrap();
        fs::write(&descriptor_path, descriptor.to_json_pretty().unwrap()).unwrap();
        fs::write(&scene_path, scene.to_json_pretty().unwrap()).unwrap();
        Fixture {
            descriptor_path: descriptor_path.to_string_lossy().to_string(),
            scene_path: scene_path.to_string_lossy().to_string(),
            asset_root: asset_root.to_string_lossy().to_string(),
            _tmp: tmp,
        }
    }

    impl Fixture {
        fn args(&self) -> GenerateArgs<'_> {
            GenerateArgs {
                descriptor: &self.descriptor_path,
                scene: &self.scene_path,
                asset_root: &self.asset_root,
                config: GeneratorConfig::default(),
            }
        }

        fn report(&self) -> Report {
            let path = reporting::report_path(&self.descriptor_path, ID);
            Report::from_json(&fs::read_to_string(path).unwrap()).unwrap()
        }
    }

    fn scene() -> Scene {
        let mut scene = Scene::new().with_avatar(AvatarDescriptor::with_default_layers());
        let root = scene.add_object("Avatar", None);
        scene.add_object("Hat", Some(root));
        scene
    }

    #[test]
    fn test_execute_commits_and_rewrites_scene() {
        let descriptor = InventoryDescriptor::builder(ID)
            .slot(InventorySlot::new("Hat").target(ObjectId(1)))
            .build();
        let f = fixture(&descriptor, &scene());
        let args = f.args();
        let mut scene = load_scene(Path::new(&f.scene_path)).unwrap();

        let outcome = execute(&args, &descriptor, &mut scene).unwrap();
        assert_eq!(outcome.exit_code(), ExitCode::SUCCESS);

        let written = load_scene(Path::new(&f.scene_path)).unwrap();
        assert_eq!(written, scene);
        assert!(!written.objects[1].active);
        let avatar = written.avatar.unwrap();
        assert!(!avatar.base_animation_layers[2].is_default);

        let bundle = Path::new(&f.asset_root).join("_generated").join(ID);
        assert!(bundle.join("customStageParams.json").exists());
        assert!(bundle.join("expressionMenu.json").exists());
        assert!(bundle.join("inventoryController.json").exists());

        let report = f.report();
        assert!(report.ok);
        assert_eq!(report.outputs.len(), 3);
        assert_eq!(report.remaining_capacity, Some(15));
    }

    #[test]
    fn test_execute_capacity_failure_writes_nothing() {
        let basis = ExpressionParameters::new(
            (0..15).map(|i| Parameter::int(format!("P{}", i))).collect(),
        );
        let descriptor = InventoryDescriptor::builder(ID)
            .basis_parameters("basis/params.json")
            .slot(InventorySlot::new("A"))
            .slot(InventorySlot::new("B"))
            .build();
        let original = scene();
        let f = fixture(&descriptor, &original);
        let basis_dir = Path::new(&f.asset_root).join("basis");
        fs::create_dir_all(&basis_dir).unwrap();
        fs::write(
            basis_dir.join("params.json"),
            serde_json::to_string(&basis).unwrap(),
        )
        .unwrap();

        let args = f.args();
        let mut scene = original.clone();
        let outcome = execute(&args, &descriptor, &mut scene).unwrap();

        assert_eq!(outcome.exit_code(), ExitCode::from(1));
        assert_eq!(scene, original);
        assert!(!Path::new(&f.asset_root).join("_generated").exists());
        let report = f.report();
        assert!(!report.ok);
        assert_eq!(report.errors[0].code, "E003");
    }

    #[test]
    fn test_execute_required_layer_missing_is_generation_failure() {
        let descriptor = InventoryDescriptor::builder(ID)
            .layer_type(AnimLayerType::Sitting)
            .slot(InventorySlot::new("Hat").target(ObjectId(1)))
            .build();
        let f = fixture(&descriptor, &scene());
        let mut args = f.args();
        args.config = GeneratorConfig::default()
            .with_missing_layer(satchel_gen::MissingLayerPolicy::Error);
        let mut scene = scene();

        let outcome = execute(&args, &descriptor, &mut scene).unwrap();
        assert_eq!(outcome.exit_code(), ExitCode::from(2));
        assert!(matches!(
            outcome,
            Outcome::Failed {
                error: GenError::LayerSlotMissing { .. },
                ..
            }
        ));
        assert_eq!(f.report().errors[0].code, "GEN_003");
    }

    #[test]
    fn test_run_json_reports_missing_descriptor() {
        let f = fixture(&InventoryDescriptor::builder(ID).build(), &scene());
        let mut args = f.args();
        let missing = format!("{}.missing.json", f.descriptor_path);
        args.descriptor = &missing;
        assert_eq!(run(&args, true).unwrap(), ExitCode::from(1));
    }
}
