//! The generated bundle.

use serde::{Deserialize, Serialize};

use satchel_spec::hash::{blake3_hash, canonical_value_hash};
use satchel_spec::{
    AnimLayerType, AnimatorController, ExpressionParameters, ExpressionsMenu, OutputKind,
    OutputLayout, OutputResult,
};

use crate::error::{GenError, GenResult};
use crate::store::{encode_document, AssetFile};

/// Everything one run produces, before anything is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedBundle {
    /// Stable identifier keying the output location.
    pub descriptor_id: String,
    /// Host layer slot the controller replaces.
    pub layer_type: AnimLayerType,
    /// Where each document is written.
    pub layout: OutputLayout,
    /// Full parameter set, exactly `capacity` entries.
    pub parameters: ExpressionParameters,
    /// Menu with one toggle per slot appended.
    pub menu: ExpressionsMenu,
    /// Controller with one toggle layer per slot.
    pub controller: AnimatorController,
}

impl GeneratedBundle {
    /// Canonical hash of the bundle; equal bundles hash equal.
    pub fn fingerprint(&self) -> GenResult<String> {
        let value = serde_json::to_value(self).map_err(GenError::Serialize)?;
        Ok(canonical_value_hash(&value))
    }

    /// Asset path of one document.
    pub fn path(&self, kind: OutputKind) -> String {
        self.layout.path(kind)
    }

    /// Encodes the three documents in write order.
    pub fn encode(&self) -> GenResult<Vec<(OutputKind, AssetFile)>> {
        OutputKind::ALL
            .iter()
            .map(|&kind| {
                let bytes = match kind {
                    OutputKind::Parameters => encode_document(&self.parameters)?,
                    OutputKind::Menu => encode_document(&self.menu)?,
                    OutputKind::Controller => encode_document(&self.controller)?,
                };
                Ok((
                    kind,
                    AssetFile {
                        path: self.path(kind),
                        bytes,
                    },
                ))
            })
            .collect()
    }

    /// Report entries for encoded documents.
    pub fn output_results(encoded: &[(OutputKind, AssetFile)]) -> Vec<OutputResult> {
        encoded
            .iter()
            .map(|(kind, file)| {
                OutputResult::new(*kind, file.path.clone(), blake3_hash(&file.bytes))
            })
            .collect()
    }
}
