//! Builder pattern for creating reports.

use super::{OutputResult, Report, ReportError, ReportWarning, REPORT_VERSION};
use crate::error::{ValidationError, ValidationWarning};

/// Builder for creating reports ergonomically.
pub struct ReportBuilder {
    descriptor_hash: String,
    descriptor_id: Option<String>,
    slot_count: Option<usize>,
    remaining_capacity: Option<usize>,
    bundle_fingerprint: Option<String>,
    ok: bool,
    errors: Vec<ReportError>,
    warnings: Vec<ReportWarning>,
    outputs: Vec<OutputResult>,
    duration_ms: u64,
    tool_version: String,
}

impl ReportBuilder {
    /// Creates a new report builder.
    ///
    /// # Example
    ///
    /// ```
    /// use satchel_spec::report::ReportBuilder;
    ///
    /// let report = ReportBuilder::new(
    ///     "a1b2c3d4...".to_string(),
    ///     "satchel-cli v0.1.0".to_string()
    /// )
    /// .ok(true)
    /// .duration_ms(5)
    /// .build();
    /// assert!(report.ok);
    /// ```
    pub fn new(descriptor_hash: String, tool_version: String) -> Self {
        Self {
            descriptor_hash,
            descriptor_id: None,
            slot_count: None,
            remaining_capacity: None,
            bundle_fingerprint: None,
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            outputs: Vec::new(),
            duration_ms: 0,
            tool_version,
        }
    }

    /// Sets the ok status.
    pub fn ok(mut self, ok: bool) -> Self {
        self.ok = ok;
        self
    }

    /// Sets the descriptor id.
    pub fn descriptor_id(mut self, id: impl Into<String>) -> Self {
        self.descriptor_id = Some(id.into());
        self
    }

    /// Sets the slot count.
    pub fn slot_count(mut self, count: usize) -> Self {
        self.slot_count = Some(count);
        self
    }

    /// Sets the remaining parameter capacity.
    pub fn remaining_capacity(mut self, remaining: usize) -> Self {
        self.remaining_capacity = Some(remaining);
        self
    }

    /// Sets the bundle fingerprint.
    pub fn bundle_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.bundle_fingerprint = Some(fingerprint.into());
        self
    }

    /// Adds an error to the report.
    pub fn error(mut self, error: ReportError) -> Self {
        self.errors.push(error);
        self.ok = false;
        self
    }

    /// Adds errors from ValidationErrors.
    pub fn validation_errors(mut self, errors: &[ValidationError]) -> Self {
        if !errors.is_empty() {
            self.ok = false;
            self.errors
                .extend(errors.iter().map(ReportError::from_validation_error));
        }
        self
    }

    /// Adds a warning to the report.
    pub fn warning(mut self, warning: ReportWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Adds warnings from ValidationWarnings.
    pub fn validation_warnings(mut self, warnings: &[ValidationWarning]) -> Self {
        self.warnings
            .extend(warnings.iter().map(ReportWarning::from_validation_warning));
        self
    }

    /// Adds an output to the report.
    pub fn output(mut self, output: OutputResult) -> Self {
        self.outputs.push(output);
        self
    }

    /// Adds multiple outputs to the report.
    pub fn outputs(mut self, outputs: Vec<OutputResult>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    /// Sets the execution duration in milliseconds.
    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Builds the final report.
    pub fn build(self) -> Report {
        Report {
            report_version: REPORT_VERSION,
            descriptor_hash: self.descriptor_hash,
            descriptor_id: self.descriptor_id,
            slot_count: self.slot_count,
            remaining_capacity: self.remaining_capacity,
            bundle_fingerprint: self.bundle_fingerprint,
            ok: self.ok,
            errors: self.errors,
            warnings: self.warnings,
            outputs: self.outputs,
            duration_ms: self.duration_ms,
            tool_version: self.tool_version,
        }
    }
}
