//! Error types for descriptor validation and document processing.

use thiserror::Error;

/// Error codes for descriptor validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Unsupported descriptor_version
    UnsupportedDescriptorVersion,
    /// E002: Invalid descriptor_id format
    InvalidDescriptorId,
    /// E003: Carried-over plus generated parameters exceed capacity
    CapacityExceeded,
    /// E004: Scene carries no avatar descriptor to attach outputs to
    MissingHostComponent,
    /// E005: Scene hierarchy is malformed (bad parent, cycle)
    InvalidScene,
    /// E006: Basis template path is not a safe relative asset path
    UnsafeBasisPath,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedDescriptorVersion => "E001",
            ErrorCode::InvalidDescriptorId => "E002",
            ErrorCode::CapacityExceeded => "E003",
            ErrorCode::MissingHostComponent => "E004",
            ErrorCode::InvalidScene => "E005",
            ErrorCode::UnsafeBasisPath => "E006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for descriptor validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Slot has an empty display name
    EmptySlotName,
    /// W002: Slot target does not refer to a scene object
    DanglingTarget,
    /// W003: Slot has no live targets; its layer will be inert
    NoLiveTargets,
    /// W004: Two slots share a display name
    DuplicateSlotName,
    /// W005: Menu holds more controls than one host menu page shows
    MenuOverflow,
    /// W006: Basis parameter name collides with a generated slot parameter
    ParameterNameCollision,
    /// W007: Host has no animation layer of the configured type
    MissingHostLayer,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::EmptySlotName => "W001",
            WarningCode::DanglingTarget => "W002",
            WarningCode::NoLiveTargets => "W003",
            WarningCode::DuplicateSlotName => "W004",
            WarningCode::MenuOverflow => "W005",
            WarningCode::ParameterNameCollision => "W006",
            WarningCode::MissingHostLayer => "W007",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "slots\[0\].targets\[2\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for document operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Descriptor validation failed with one or more errors.
    #[error("descriptor validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parse error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Scene hierarchy is malformed.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of descriptor validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with warnings.
    pub fn failure_with_warnings(
        errors: Vec<ValidationError>,
        warnings: Vec<ValidationWarning>,
    ) -> Self {
        Self {
            ok: false,
            errors,
            warnings,
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if an error with the given code was recorded.
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorCode::UnsupportedDescriptorVersion.code(), "E001");
        assert_eq!(ErrorCode::CapacityExceeded.code(), "E003");
        assert_eq!(ErrorCode::UnsafeBasisPath.code(), "E006");
        assert_eq!(WarningCode::EmptySlotName.code(), "W001");
        assert_eq!(WarningCode::MissingHostLayer.code(), "W007");
    }

    #[test]
    fn test_validation_error_display_includes_path() {
        let err = ValidationError::with_path(
            ErrorCode::InvalidDescriptorId,
            "bad id",
            "descriptor_id",
        );
        assert_eq!(err.to_string(), "E002: bad id (at descriptor_id)");

        let err = ValidationError::new(ErrorCode::InvalidScene, "cycle");
        assert_eq!(err.to_string(), "E005: cycle");
    }

    #[test]
    fn test_add_error_flips_ok() {
        let mut result = ValidationResult::default();
        assert!(result.is_ok());

        result.add_warning(ValidationWarning::new(WarningCode::MenuOverflow, "many"));
        assert!(result.is_ok());
        assert!(result.has_warning(WarningCode::MenuOverflow));

        result.add_error(ValidationError::new(ErrorCode::CapacityExceeded, "full"));
        assert!(!result.is_ok());
        assert!(result.has_error(ErrorCode::CapacityExceeded));
        assert_eq!(result.into_result().unwrap_err().len(), 1);
    }
}
