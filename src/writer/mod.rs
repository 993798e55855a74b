//! PDF writing module for generating PDF files.
//!
//! ## Architecture
//!
//! ```text
//! drawing calls (text, rules, boxes, images)
//!     ↓
//! [PageBuilder] (per-page fluent API)
//!     ↓
//! [ContentStreamBuilder] (operations → content stream bytes)
//!     ↓
//! [PdfWriter] (assembles complete PDF structure)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use briefing_pdf::writer::{PdfWriter, StandardFont};
//!
//! let mut writer = PdfWriter::new();
//! {
//!     let mut page = writer.add_page(595.28, 841.89);
//!     page.text("Hello, World!", 72.0, 720.0, StandardFont::Helvetica, 12.0);
//!     page.finish();
//! }
//! let bytes = writer.finish()?;
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! # Ok::<(), briefing_pdf::Error>(())
//! ```

mod content_stream;
mod encoding;
mod font;
mod image_handler;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{Color, ContentStreamBuilder, ContentStreamOp};
pub use encoding::{encode_winansi, escape_literal, unicode_to_winansi, REPLACEMENT_BYTE};
pub use font::StandardFont;
pub use image_handler::{ColorSpace, ImageData, ImageError, ImagePlacement};
pub use object_serializer::{format_number, ObjectSerializer};
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig};
