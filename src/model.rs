//! Briefing record consumed by the certificate generator.
//!
//! The record arrives fully resolved from the caller's data layer; it is read
//! once during generation and never mutated.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One safety briefing with everything needed to print its certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDetail {
    /// Opaque identifier, only used for file names
    pub id: String,
    /// When the briefing took place
    pub date: DateTime<FixedOffset>,
    /// Audience of the briefing
    #[serde(default)]
    pub department: Option<String>,
    /// Subject of the briefing
    #[serde(default)]
    pub reason: Option<String>,
    /// Display name of the person who conducted the briefing
    pub instructor: String,
    /// Topics discussed, in presentation order
    #[serde(default)]
    pub topics: Vec<Topic>,
    /// Collected signatures; index 0 belongs to the instructor
    #[serde(default)]
    pub signatures: Vec<SignatureEntry>,
}

/// A discussed topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Topic id, empty when the record omits it
    #[serde(default)]
    pub id: String,
    /// Display name listed on page 1
    pub name: String,
}

/// A captured signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureEntry {
    /// Signature id, empty when the record omits it
    #[serde(default)]
    pub id: String,
    /// Signer's full name
    pub name: String,
    /// Short code printed in the participant table
    #[serde(default)]
    pub kurz: String,
    /// When the signature was captured
    #[serde(default)]
    pub signed_at: Option<DateTime<FixedOffset>>,
    /// `data:image/png;base64,...` URL, or empty when nothing was drawn
    #[serde(default)]
    pub signature: String,
}

impl IncidentDetail {
    /// Parse a record from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a record from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The instructor's own signature (first entry by convention).
    pub fn instructor_signature(&self) -> Option<&SignatureEntry> {
        self.signatures.first()
    }

    /// Participant signatures, i.e. every entry after the instructor's.
    pub fn participants(&self) -> &[SignatureEntry] {
        self.signatures.get(1..).unwrap_or(&[])
    }

    /// Department name, empty when unset.
    pub fn department_name(&self) -> &str {
        self.department.as_deref().unwrap_or("")
    }

    /// Reason name, empty when unset.
    pub fn reason_name(&self) -> &str {
        self.reason.as_deref().unwrap_or("")
    }
}

impl Topic {
    /// Create a topic with the given id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl SignatureEntry {
    /// Create an entry with the given name, short code and data URL.
    pub fn new(
        name: impl Into<String>,
        kurz: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            kurz: kurz.into(),
            signed_at: None,
            signature: signature.into(),
        }
    }

    /// Whether a signature payload is present at all.
    pub fn has_signature(&self) -> bool {
        !self.signature.trim().is_empty()
    }
}
