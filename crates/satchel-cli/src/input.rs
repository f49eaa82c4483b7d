//! Loading descriptors and scenes from disk.
//!
//! Descriptors may be JSON or YAML, chosen by file extension. Scenes are
//! always JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use satchel_spec::{InventoryDescriptor, Scene};

/// Recognized JSON extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Recognized YAML extensions.
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Identifies the source format of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// JSON descriptor.
    Json,
    /// YAML descriptor.
    Yaml,
}

impl SourceKind {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Json => "json",
            SourceKind::Yaml => "yaml",
        }
    }

    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some(ext) if JSON_EXTENSIONS.contains(&ext) => Ok(SourceKind::Json),
            Some(ext) if YAML_EXTENSIONS.contains(&ext) => Ok(SourceKind::Yaml),
            _ => Err(InputError::UnknownExtension { extension }),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loaded descriptor with its provenance.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed descriptor.
    pub descriptor: InventoryDescriptor,
    /// Source format.
    pub source_kind: SourceKind,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur while loading inputs.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// Descriptor could not be parsed.
    DescriptorParse { message: String },

    /// Scene could not be parsed or is malformed.
    SceneParse { message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(
                    f,
                    "unknown file extension '.{}' (expected .json, .yaml or .yml)",
                    ext
                ),
                None => write!(f, "file has no extension (expected .json, .yaml or .yml)"),
            },
            InputError::DescriptorParse { message } => {
                write!(f, "descriptor parse error: {}", message)
            }
            InputError::SceneParse { message } => write!(f, "scene error: {}", message),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Loads a descriptor, dispatching by extension.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use satchel_cli::input::load_descriptor;
///
/// let result = load_descriptor(Path::new("inventory.yaml")).unwrap();
/// println!("Loaded {} descriptor", result.source_kind);
/// ```
pub fn load_descriptor(path: &Path) -> Result<LoadResult, InputError> {
    let source_kind = SourceKind::from_path(path)?;
    let content = read_file(path)?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let parsed = match source_kind {
        SourceKind::Json => InventoryDescriptor::from_json(&content),
        SourceKind::Yaml => InventoryDescriptor::from_yaml(&content),
    };
    let descriptor = parsed.map_err(|e| InputError::DescriptorParse {
        message: e.to_string(),
    })?;

    Ok(LoadResult {
        descriptor,
        source_kind,
        source_hash,
    })
}

/// Loads and checks a scene file.
pub fn load_scene(path: &Path) -> Result<Scene, InputError> {
    let content = read_file(path)?;
    Scene::from_json(&content).map_err(|e| InputError::SceneParse {
        message: e.to_string(),
    })
}
