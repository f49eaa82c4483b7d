//! Basis asset path safety validation.

use crate::error::{ErrorCode, ValidationError, ValidationResult};

/// Checks if an asset path is a safe relative path.
///
/// # Returns
/// * `true` if the path is safe, `false` otherwise.
pub fn is_safe_asset_path(path: &str) -> bool {
    asset_path_safety_errors(path).is_empty()
}

/// Validates one basis template path.
pub(super) fn validate_basis_path(field: &str, path: &str, result: &mut ValidationResult) {
    for message in asset_path_safety_errors(path) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsafeBasisPath,
            message,
            field,
        ));
    }
}

fn asset_path_safety_errors(path: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if path.is_empty() {
        errors.push("asset path cannot be empty".to_string());
        return errors;
    }

    if path.starts_with('/') || path.starts_with('\\') {
        errors.push(format!("asset path must be relative, not absolute: '{}'", path));
    }

    if path.len() >= 2 && path.chars().nth(1) == Some(':') {
        errors.push(format!("asset path must not contain drive letter: '{}'", path));
    }

    if path.contains('\\') {
        errors.push(format!("asset path must use forward slashes only: '{}'", path));
    }

    if path.split('/').any(|segment| segment == "..") {
        errors.push(format!("asset path must not contain '..': '{}'", path));
    }

    errors
}
