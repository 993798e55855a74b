//! Response contract for serving a generated certificate.
//!
//! Routing and authentication live with the caller; this module only fixes
//! the content type and the attachment file name.

use std::path::Path;

use crate::certificate::generate;
use crate::config::BriefingConfig;
use crate::error::Result;
use crate::model::IncidentDetail;

/// MIME type of the generated document.
pub const CONTENT_TYPE: &str = "application/pdf";

/// Prefix of every download file name.
pub const FILENAME_PREFIX: &str = "unterweisung";

/// File name offered for the certificate of incident `id`.
pub fn attachment_filename(id: &str) -> String {
    format!("{}-{}.pdf", FILENAME_PREFIX, id)
}

/// `Content-Disposition` header value for the certificate of incident `id`.
pub fn content_disposition(id: &str) -> String {
    format!("attachment; filename={}", attachment_filename(id))
}

/// A rendered certificate together with its response headers.
#[derive(Debug, Clone)]
pub struct PdfDownload {
    /// Incident id the certificate was rendered for.
    pub id: String,
    /// Offered file name, `unterweisung-<id>.pdf`.
    pub filename: String,
    /// Complete PDF document.
    pub bytes: Vec<u8>,
}

impl PdfDownload {
    /// Generate the certificate for `incident`.
    pub fn render(incident: &IncidentDetail, config: &BriefingConfig) -> Result<Self> {
        let bytes = generate(incident, config)?;
        Ok(Self {
            id: incident.id.clone(),
            filename: attachment_filename(&incident.id),
            bytes,
        })
    }

    /// Value of the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    /// Value of the `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        content_disposition(&self.id)
    }

    /// Header name/value pairs for an HTTP response.
    pub fn headers(&self) -> [(&'static str, String); 2] {
        [
            ("Content-Type", CONTENT_TYPE.to_string()),
            ("Content-Disposition", self.content_disposition()),
        ]
    }

    /// Write the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        log::info!("Wrote {} ({} bytes)", path.as_ref().display(), self.bytes.len());
        Ok(())
    }
}
