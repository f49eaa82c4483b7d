//! Report types for generation and validation runs.
//!
//! A report records what a `satchel generate` or `satchel validate` run saw:
//! errors, warnings, the artifacts written and their hashes.

mod builder;
mod error;

pub use builder::ReportBuilder;
pub use error::{ReportError, ReportWarning};

use serde::{Deserialize, Serialize};

use crate::output::OutputKind;

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Result entry for a single written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputResult {
    /// The kind of document.
    pub kind: OutputKind,
    /// Asset path the document was written to.
    pub path: String,
    /// Hex-encoded BLAKE3 hash of the written bytes.
    pub hash: String,
}

impl OutputResult {
    /// Creates a new output result.
    pub fn new(kind: OutputKind, path: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            hash: hash.into(),
        }
    }
}

/// A complete report for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version.
    pub report_version: u32,
    /// Hex-encoded BLAKE3 hash of the canonicalized descriptor.
    pub descriptor_hash: String,
    /// Descriptor id (stable identifier).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor_id: Option<String>,
    /// Number of slots in the descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_count: Option<usize>,
    /// Parameter slots still free after this run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_capacity: Option<usize>,
    /// Canonical hash of the generated bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_fingerprint: Option<String>,
    /// Whether the run succeeded.
    pub ok: bool,
    /// Errors encountered.
    pub errors: Vec<ReportError>,
    /// Warnings encountered.
    pub warnings: Vec<ReportWarning>,
    /// Artifacts written.
    pub outputs: Vec<OutputResult>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Tool identifier and version.
    pub tool_version: String,
}

impl Report {
    /// Creates a new report builder.
    pub fn builder(descriptor_hash: String, tool_version: String) -> ReportBuilder {
        ReportBuilder::new(descriptor_hash, tool_version)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
