//! Generation request and result

use crate::claim::{ClaimData, EnvelopeContext};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A generation request as submitted by a collaborator
///
/// ```json
/// { "variant": "837P", "data": { "1000A": { ... } }, "envelope": { "ISA06": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Variant identifier, resolved against the schema registry by the caller
    pub variant: String,
    /// Loop-keyed claim data
    pub data: ClaimData,
    /// Envelope overrides; win over any `_ISA`/`_BHT` sections inside `data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<EnvelopeContext>,
}

impl GenerationRequest {
    pub fn new(variant: impl Into<String>, data: ClaimData) -> Self {
        Self {
            variant: variant.into(),
            data,
            envelope: None,
        }
    }

    /// Parse a request from JSON
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] when the JSON does not match the
    /// request shape.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::invalid_data("request", e.to_string()))
    }

    /// Split into the variant identifier and claim data with the envelope
    /// overrides folded in
    #[must_use]
    pub fn into_parts(self) -> (String, ClaimData) {
        let mut data = self.data;
        if let Some(envelope) = &self.envelope {
            data.envelope_mut().overlay(envelope);
        }
        (self.variant, data)
    }
}

/// Result returned to collaborators: the document plus its deficiencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub document_text: String,
    pub deficiencies: Vec<String>,
}

impl GenerationResult {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.deficiencies.is_empty()
    }
}
