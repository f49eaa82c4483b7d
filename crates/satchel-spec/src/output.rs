//! Generated artifact kinds and their on-disk layout.

use serde::{Deserialize, Serialize};

/// Default directory, relative to the asset root, holding generated bundles.
pub const DEFAULT_GENERATED_ROOT: &str = "_generated";

/// The kinds of document a generation run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Expression parameter set.
    Parameters,
    /// Expressions menu.
    Menu,
    /// Animator controller (with embedded clips and mask).
    Controller,
}

impl OutputKind {
    /// All output kinds in write order.
    pub const ALL: [OutputKind; 3] = [
        OutputKind::Parameters,
        OutputKind::Menu,
        OutputKind::Controller,
    ];

    /// File name inside the bundle directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputKind::Parameters => "customStageParams.json",
            OutputKind::Menu => "expressionMenu.json",
            OutputKind::Controller => "inventoryController.json",
        }
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputKind::Parameters => write!(f, "parameters"),
            OutputKind::Menu => write!(f, "menu"),
            OutputKind::Controller => write!(f, "controller"),
        }
    }
}

/// Asset paths of one bundle: `{generated_root}/{descriptor_id}/{file}`.
///
/// The same descriptor id always maps to the same paths, so a re-run
/// overwrites its previous bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLayout {
    /// Bundle directory, relative to the asset root.
    pub bundle_dir: String,
}

impl OutputLayout {
    /// Layout for `descriptor_id` under `generated_root`.
    pub fn new(generated_root: &str, descriptor_id: &str) -> Self {
        let root = generated_root.trim_end_matches('/');
        let bundle_dir = if root.is_empty() {
            descriptor_id.to_string()
        } else {
            format!("{}/{}", root, descriptor_id)
        };
        Self { bundle_dir }
    }

    /// Asset path of one artifact.
    pub fn path(&self, kind: OutputKind) -> String {
        format!("{}/{}", self.bundle_dir, kind.file_name())
    }
}
