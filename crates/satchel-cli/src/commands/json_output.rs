//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `validate`, `generate` and `inspect`.

use serde::{Deserialize, Serialize};

use satchel_gen::{CodedError, GenError};
use satchel_spec::{OutputResult, ValidationError, ValidationWarning};

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// Format: CLI_XXX for CLI-level errors; validation and generation codes pass
/// through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// Descriptor parse error
    pub const DESCRIPTOR_PARSE: &str = "CLI_003";
    /// Scene parse error
    pub const SCENE_PARSE: &str = "CLI_004";
    /// Basis document could not be loaded
    pub const BASIS_LOAD: &str = "CLI_005";
    /// Scene file could not be written back
    pub const SCENE_WRITE: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E003", "GEN_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W002")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether the descriptor is valid
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
    /// Descriptor id, when the descriptor parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor_id: Option<String>,
    /// Canonical descriptor hash, when the descriptor parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor_hash: Option<String>,
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether generation succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Warnings encountered
    pub warnings: Vec<JsonWarning>,
    /// Result details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
}

/// Details of a successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    /// Descriptor id
    pub descriptor_id: String,
    /// Documents written
    pub outputs: Vec<OutputResult>,
    /// Canonical hash of the generated bundle
    pub bundle_fingerprint: String,
    /// Whether the host layer entry was replaced
    pub layer_replaced: bool,
    /// Parameter slots still free
    pub remaining_capacity: usize,
    /// Path of the written report
    pub report_path: String,
}

impl GenerateOutput {
    /// Creates a successful generate output.
    pub fn success(result: GenerateResult, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed generate output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Descriptor id
    pub descriptor_id: String,
    /// Host layer slot the inventory targets
    pub layer_type: String,
    /// Slots in menu order
    pub slots: Vec<InspectSlot>,
    /// Named basis parameters carried over
    pub carried_parameters: usize,
    /// Parameter slots free after generation (negative when over capacity)
    pub remaining_capacity: i64,
    /// Output directory of the bundle
    pub bundle_dir: String,
}

/// One slot in inspect output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectSlot {
    /// Display name
    pub name: String,
    /// Generated parameter name
    pub parameter: String,
    /// Whether the targets rest enabled
    pub start_enabled: bool,
    /// Resolved target paths; `null` for missing or unresolvable targets
    pub targets: Vec<Option<String>>,
}

/// Converts an input error to a JSON error.
pub fn input_error_to_json(err: &InputError, file: Option<&str>) -> JsonError {
    let code = match err {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
        InputError::DescriptorParse { .. } => error_codes::DESCRIPTOR_PARSE,
        InputError::SceneParse { .. } => error_codes::SCENE_PARSE,
    };
    let json = JsonError::new(code, err.to_string());
    match file {
        Some(f) => json.with_file(f),
        None => json,
    }
}

/// Converts a validation error to a JSON error.
pub fn validation_error_to_json(err: &ValidationError) -> JsonError {
    JsonError {
        code: err.code.code().to_string(),
        message: err.message.clone(),
        path: err.path.clone(),
        file: None,
    }
}

/// Converts a validation warning to a JSON warning.
pub fn validation_warning_to_json(warn: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warn.code.code().to_string(),
        message: warn.message.clone(),
        path: warn.path.clone(),
    }
}

/// Converts a generation error to a JSON error.
pub fn gen_error_to_json(err: &GenError) -> JsonError {
    JsonError::new(err.code(), err.message())
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
