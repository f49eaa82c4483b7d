//! Error types for the generation pass.

use satchel_spec::AnimLayerType;
use thiserror::Error;

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Trait implemented by errors that carry a stable code for reports.
///
/// # Example
///
/// ```
/// use satchel_gen::{CodedError, GenError};
///
/// let err = GenError::MissingHostComponent;
/// assert_eq!(err.code(), "GEN_002");
/// assert_eq!(err.category(), "host");
/// ```
pub trait CodedError: std::error::Error {
    /// Stable error code such as "GEN_001".
    fn code(&self) -> &'static str;

    /// Human-readable message; the `Display` output by default.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Category grouping related errors ("capacity", "host", "store", ...).
    fn category(&self) -> &'static str;
}

/// Errors raised by the asset store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No asset exists at the path.
    #[error("asset not found: {path}")]
    NotFound { path: String },

    /// The path escapes the asset root or is otherwise malformed.
    #[error("unsafe asset path: '{path}'")]
    UnsafePath { path: String },

    /// Filesystem failure while reading or writing an asset.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Wraps an I/O error with the asset path it concerns.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur during a generation run.
#[derive(Debug, Error)]
pub enum GenError {
    /// Carried-over plus generated parameters do not fit.
    #[error("Cannot have more than {} inventory slots ({carried} carried-over parameters, {requested} slots requested, capacity {capacity})", capacity.saturating_sub(*carried))]
    CapacityExceeded {
        carried: usize,
        requested: usize,
        capacity: usize,
    },

    /// The scene has no avatar descriptor.
    #[error("scene has no avatar descriptor to attach the inventory to")]
    MissingHostComponent,

    /// The host has no layer entry of the configured type.
    #[error("host has no '{layer_type}' animation layer to replace")]
    LayerSlotMissing { layer_type: AnimLayerType },

    /// The scene hierarchy is malformed.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// The asset store failed.
    #[error("asset store error: {0}")]
    Store(#[from] StoreError),

    /// A stored document could not be decoded.
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A generated document could not be encoded.
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl GenError {
    /// Creates a capacity error.
    pub fn capacity_exceeded(carried: usize, requested: usize, capacity: usize) -> Self {
        Self::CapacityExceeded {
            carried,
            requested,
            capacity,
        }
    }

    /// Number of slots that would have fit, for capacity errors.
    pub fn usable_slots(&self) -> Option<usize> {
        match self {
            GenError::CapacityExceeded {
                carried, capacity, ..
            } => Some(capacity.saturating_sub(*carried)),
            _ => None,
        }
    }
}

impl CodedError for GenError {
    fn code(&self) -> &'static str {
        match self {
            GenError::CapacityExceeded { .. } => "GEN_001",
            GenError::MissingHostComponent => "GEN_002",
            GenError::LayerSlotMissing { .. } => "GEN_003",
            GenError::InvalidScene(_) => "GEN_004",
            GenError::Store(_) => "GEN_005",
            GenError::Decode { .. } => "GEN_006",
            GenError::Serialize(_) => "GEN_007",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            GenError::CapacityExceeded { .. } => "capacity",
            GenError::MissingHostComponent | GenError::LayerSlotMissing { .. } => "host",
            GenError::InvalidScene(_) => "scene",
            GenError::Store(_) | GenError::Decode { .. } | GenError::Serialize(_) => "store",
        }
    }
}
