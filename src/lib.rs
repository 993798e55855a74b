//! # briefing_pdf
//!
//! Two-page PDF certificates for safety briefings ("Sicherheitsunterweisung").
//!
//! A fully resolved [`IncidentDetail`] goes in, the bytes of a finished PDF
//! come out. Page 1 lists the briefing metadata, the instructor with their
//! signature and the discussed topics; page 2 holds the participant
//! signature table and a footer.
//!
//! ## Features
//! - Direct PDF writing: content streams, base-14 Helvetica fonts, image XObjects
//! - PNG signatures from `data:image/png;base64,` URLs with alpha soft masks
//! - Byte-for-byte reproducible output for identical input
//! - Broken signatures leave a blank slot instead of failing the document
//!
//! ## Quick Start
//!
//! ```
//! use briefing_pdf::{generate, BriefingConfig, IncidentDetail};
//!
//! let incident = IncidentDetail::from_json(r#"{
//!     "id": "7",
//!     "date": "2024-03-01T09:00:00+01:00",
//!     "reason": "Fire Safety",
//!     "department": "Warehouse",
//!     "instructor": "A. Muster",
//!     "topics": [{"id": "1", "name": "Evacuation routes"}]
//! }"#)?;
//!
//! let config = BriefingConfig::default().with_org_name("Muster GmbH");
//! let pdf = generate(&incident, &config)?;
//! assert!(pdf.starts_with(b"%PDF-1.7"));
//! # Ok::<(), briefing_pdf::Error>(())
//! ```

// Error handling
pub mod error;

// Configuration
pub mod config;

// Input record
pub mod model;

// PDF objects and writing
pub mod object;
pub mod writer;

// Signature payloads
pub mod signature;

// Certificate layout
pub mod certificate;

// Serving helpers
pub mod download;

pub use certificate::{generate, generate_with_report, RenderReport};
pub use config::BriefingConfig;
pub use download::{attachment_filename, content_disposition, PdfDownload, CONTENT_TYPE};
pub use error::{Error, Result};
pub use model::{IncidentDetail, SignatureEntry, Topic};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "briefing_pdf";
