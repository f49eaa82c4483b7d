//! A temporary project directory for driving the CLI commands.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use satchel_cli::commands::generate::{execute, GenerateArgs, Outcome};
use satchel_cli::input::{load_descriptor, load_scene};
use satchel_gen::GeneratorConfig;
use satchel_spec::{InventoryDescriptor, OutputKind, OutputLayout, Report, Scene};

/// A project laid out as `inventory.json`, `scene.json` and `assets/`.
pub struct Workspace {
    dir: TempDir,
    descriptor_path: String,
    scene_path: String,
    asset_root: String,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create work dir");
        let asset_root = dir.path().join("assets");
        fs::create_dir_all(&asset_root).expect("Failed to create asset root");
        Self {
            descriptor_path: path_string(&dir.path().join("inventory.json")),
            scene_path: path_string(&dir.path().join("scene.json")),
            asset_root: path_string(&asset_root),
            dir,
        }
    }

    /// Workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Descriptor file path.
    pub fn descriptor_path(&self) -> &str {
        &self.descriptor_path
    }

    /// Scene file path.
    pub fn scene_path(&self) -> &str {
        &self.scene_path
    }

    /// Asset root path.
    pub fn asset_root(&self) -> &str {
        &self.asset_root
    }

    /// Writes the descriptor file.
    pub fn write_descriptor(&self, descriptor: &InventoryDescriptor) {
        let json = descriptor.to_json_pretty().expect("descriptor serializes");
        fs::write(&self.descriptor_path, json).expect("Failed to write descriptor");
    }

    /// Writes the scene file.
    pub fn write_scene(&self, scene: &Scene) {
        let json = scene.to_json_pretty().expect("scene serializes");
        fs::write(&self.scene_path, json).expect("Failed to write scene");
    }

    /// Writes a JSON document under the asset root.
    pub fn write_asset<T: Serialize>(&self, path: &str, document: &T) {
        let full = self.asset_path(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("Failed to create asset dir");
        }
        let json = serde_json::to_string_pretty(document).expect("document serializes");
        fs::write(full, json).expect("Failed to write asset");
    }

    /// Absolute path of an asset path.
    pub fn asset_path(&self, path: &str) -> PathBuf {
        Path::new(&self.asset_root).join(path)
    }

    /// Reads a JSON document from under the asset root.
    pub fn read_asset<T: DeserializeOwned>(&self, path: &str) -> T {
        let bytes = fs::read(self.asset_path(path)).expect("Failed to read asset");
        serde_json::from_slice(&bytes).expect("asset parses")
    }

    /// Raw bytes of an asset.
    pub fn read_asset_bytes(&self, path: &str) -> Vec<u8> {
        fs::read(self.asset_path(path)).expect("Failed to read asset")
    }

    /// Asset path of one bundle document under the default generated root.
    pub fn bundle_asset(&self, descriptor_id: &str, kind: OutputKind) -> String {
        OutputLayout::new(satchel_spec::DEFAULT_GENERATED_ROOT, descriptor_id).path(kind)
    }

    /// Reads the scene file back.
    pub fn read_scene(&self) -> Scene {
        load_scene(Path::new(&self.scene_path)).expect("scene loads")
    }

    /// Reads the report written next to the descriptor.
    pub fn read_report(&self, descriptor_id: &str) -> Report {
        let path = self.path().join(format!("{}.report.json", descriptor_id));
        let json = fs::read_to_string(path).expect("Failed to read report");
        Report::from_json(&json).expect("report parses")
    }

    /// Arguments for a generate run over this workspace.
    pub fn generate_args(&self, config: GeneratorConfig) -> GenerateArgs<'_> {
        GenerateArgs {
            descriptor: &self.descriptor_path,
            scene: &self.scene_path,
            asset_root: &self.asset_root,
            config,
        }
    }

    /// Loads the files and runs validation, generation and commit.
    pub fn generate(&self, config: GeneratorConfig) -> Outcome {
        let descriptor = load_descriptor(Path::new(&self.descriptor_path))
            .expect("descriptor loads")
            .descriptor;
        let mut scene = self.read_scene();
        execute(&self.generate_args(config), &descriptor, &mut scene).expect("generate runs")
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
