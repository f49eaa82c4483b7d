use anyhow::{Context, Result};
use satchel_spec::{Report, ReportBuilder, ReportError, ReportWarning, ValidationResult};
use std::fs;
use std::path::Path;

/// Tool version string recorded in reports.
pub(crate) fn tool_version() -> String {
    format!("satchel-cli v{}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn apply_validation_messages(
    mut builder: ReportBuilder,
    validation: &ValidationResult,
) -> ReportBuilder {
    for err in &validation.errors {
        builder = builder.error(ReportError::from_validation_error(err));
    }
    for warn in &validation.warnings {
        builder = builder.warning(ReportWarning::from_validation_warning(warn));
    }
    builder
}

pub(crate) fn report_path(descriptor_path: &str, descriptor_id: &str) -> String {
    let dir = Path::new(descriptor_path).parent().unwrap_or(Path::new("."));
    dir.join(format!("{}.report.json", descriptor_id))
        .to_string_lossy()
        .to_string()
}

pub(crate) fn write_report(report: &Report, path: &str) -> Result<()> {
    let json = report.to_json_pretty().context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report to: {}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_spec::{
        ErrorCode, OutputKind, OutputResult, ValidationError, ValidationWarning, WarningCode,
    };

    #[test]
    fn test_report_path_sibling_file() {
        let path = report_path("avatars/hats/inventory.yaml", "0123abcd");
        let path = Path::new(&path);
        let expected = Path::new("avatars").join("hats").join("0123abcd.report.json");
        assert_eq!(path, expected);
    }

    #[test]
    fn test_write_report_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let report_path = tmp.path().join("report.json");

        let report = ReportBuilder::new("hash".to_string(), tool_version())
            .ok(true)
            .output(OutputResult::new(
                OutputKind::Menu,
                "_generated/x/expressionMenu.json",
                "outhash",
            ))
            .build();

        write_report(&report, report_path.to_str().unwrap()).unwrap();

        let json = fs::read_to_string(&report_path).unwrap();
        let parsed = Report::from_json(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_apply_validation_messages() {
        let validation = ValidationResult::failure_with_warnings(
            vec![ValidationError::new(ErrorCode::CapacityExceeded, "full")],
            vec![ValidationWarning::new(WarningCode::MenuOverflow, "crowded")],
        );

        let report = apply_validation_messages(
            ReportBuilder::new("hash".to_string(), tool_version()),
            &validation,
        )
        .ok(validation.is_ok())
        .build();

        assert!(!report.ok);
        assert_eq!(report.errors[0].code, "E003");
        assert_eq!(report.warnings[0].code, "W005");
    }
}
