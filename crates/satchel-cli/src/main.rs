//! Satchel CLI - Command-line interface for avatar inventory generation
//!
//! This binary provides commands for creating, validating, inspecting and
//! generating inventory descriptors.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use satchel_cli::commands;
use satchel_gen::{GeneratorConfig, MissingLayerPolicy};
use satchel_spec::{DEFAULT_GENERATED_ROOT, PARAMETER_CAPACITY};

/// Satchel - Avatar Inventory Generator
#[derive(Parser)]
#[command(name = "satchel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a descriptor skeleton with a fresh descriptor id
    Init {
        /// Output file (.json, .yaml or .yml)
        #[arg(short, long)]
        out: String,

        /// Host layer slot the generated controller replaces
        #[arg(long, default_value = "gesture")]
        layer: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a descriptor, optionally against a scene
    Validate {
        /// Path to the descriptor file
        #[arg(short, long)]
        descriptor: String,

        /// Path to the scene file (enables host, target and capacity checks)
        #[arg(short, long)]
        scene: Option<String>,

        /// Asset root basis paths are resolved against
        #[arg(long, default_value = ".")]
        asset_root: String,

        /// Host parameter capacity
        #[arg(long, default_value_t = PARAMETER_CAPACITY)]
        capacity: usize,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate the parameter set, menu and controller and attach them to the host
    Generate {
        /// Path to the descriptor file
        #[arg(short, long)]
        descriptor: String,

        /// Path to the scene file (rewritten on success)
        #[arg(short, long)]
        scene: String,

        /// Asset root receiving the generated bundle
        #[arg(short = 'o', long, default_value = ".")]
        asset_root: String,

        /// Host parameter capacity
        #[arg(long, default_value_t = PARAMETER_CAPACITY)]
        capacity: usize,

        /// Directory under the asset root holding generated bundles
        #[arg(long, default_value = DEFAULT_GENERATED_ROOT)]
        generated_root: String,

        /// Fail if the host has no layer of the descriptor's layer type
        #[arg(long)]
        require_layer: bool,

        /// Leave the scene objects' current active state untouched
        #[arg(long)]
        no_preview_state: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show slots, resolved target paths and the remaining parameter budget
    Inspect {
        /// Path to the descriptor file
        #[arg(short, long)]
        descriptor: String,

        /// Path to the scene file used to resolve target paths
        #[arg(short, long)]
        scene: Option<String>,

        /// Asset root basis paths are resolved against
        #[arg(long, default_value = ".")]
        asset_root: String,

        /// Host parameter capacity
        #[arg(long, default_value_t = PARAMETER_CAPACITY)]
        capacity: usize,

        /// Directory under the asset root holding generated bundles
        #[arg(long, default_value = DEFAULT_GENERATED_ROOT)]
        generated_root: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { out, layer, force } => commands::init::run(&out, &layer, force),
        Commands::Validate {
            descriptor,
            scene,
            asset_root,
            capacity,
            json,
        } => {
            let args = commands::validate::ValidateArgs {
                descriptor: &descriptor,
                scene: scene.as_deref(),
                asset_root: &asset_root,
                capacity,
            };
            commands::validate::run(&args, json)
        }
        Commands::Generate {
            descriptor,
            scene,
            asset_root,
            capacity,
            generated_root,
            require_layer,
            no_preview_state,
            json,
        } => {
            let missing_layer = if require_layer {
                MissingLayerPolicy::Error
            } else {
                MissingLayerPolicy::Ignore
            };
            let args = commands::generate::GenerateArgs {
                descriptor: &descriptor,
                scene: &scene,
                asset_root: &asset_root,
                config: GeneratorConfig::default()
                    .with_capacity(capacity)
                    .with_generated_root(generated_root)
                    .with_missing_layer(missing_layer)
                    .with_resting_state(!no_preview_state),
            };
            commands::generate::run(&args, json)
        }
        Commands::Inspect {
            descriptor,
            scene,
            asset_root,
            capacity,
            generated_root,
            json,
        } => {
            let args = commands::inspect::InspectArgs {
                descriptor: &descriptor,
                scene: scene.as_deref(),
                asset_root: &asset_root,
                capacity,
                generated_root: &generated_root,
            };
            commands::inspect::run(&args, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
