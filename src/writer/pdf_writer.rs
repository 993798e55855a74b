//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! Object numbers are assigned in a fixed order (catalog, page tree, fonts,
//! images, pages, info) and fonts/images keep insertion order, so identical
//! drawing calls always produce identical bytes.

use super::content_stream::{Color, ContentStreamBuilder};
use super::font::StandardFont;
use super::image_handler::{ImageData, ImagePlacement};
use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress page content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            subject: None,
            creator: Some(concat!("briefing_pdf ", env!("CARGO_PKG_VERSION")).to_string()),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Enable or disable content stream compression (FlateDecode).
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Encode a document information text string.
///
/// ASCII is written as-is, anything else as UTF-16BE with a byte order mark.
fn text_string(s: &str) -> Object {
    if s.is_ascii() {
        return Object::String(s.as_bytes().to_vec());
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes)
}

/// A page being drawn.
///
/// All coordinates are PDF user space: origin bottom-left, y grows upwards.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    fn page(&mut self) -> &mut PageData {
        &mut self.writer.pages[self.page_index]
    }

    /// Draw text with its baseline starting at `(x, y)` in the current fill colour.
    pub fn text(&mut self, text: &str, x: f32, y: f32, font: StandardFont, size: f32) -> &mut Self {
        self.page()
            .content_builder
            .begin_text()
            .set_font(font.resource_name(), size)
            .text(text, x, y);
        self
    }

    /// Draw text in the given colour, then switch back to black.
    pub fn colored_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: StandardFont,
        size: f32,
        color: Color,
    ) -> &mut Self {
        self.page().content_builder.begin_text().fill_color(color);
        self.text(text, x, y, font, size);
        self.page().content_builder.fill_color(Color::black());
        self
    }

    /// Stroke a rectangle outline.
    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    ) -> &mut Self {
        self.page()
            .content_builder
            .end_text()
            .set_line_width(line_width)
            .rect(x, y, width, height)
            .stroke();
        self
    }

    /// Fill a rectangle with a solid colour.
    pub fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    ) -> &mut Self {
        self.page()
            .content_builder
            .end_text()
            .save_state()
            .fill_color(color)
            .rect(x, y, width, height)
            .fill()
            .restore_state();
        self
    }

    /// Fill a rectangle with a gray level (0 = black, 1 = white).
    pub fn fill_rect_gray(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
    ) -> &mut Self {
        self.page()
            .content_builder
            .end_text()
            .save_state()
            .fill_gray(gray)
            .rect(x, y, width, height)
            .fill()
            .restore_state();
        self
    }

    /// Stroke a straight line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32) -> &mut Self {
        self.page()
            .content_builder
            .end_text()
            .set_line_width(line_width)
            .move_to(x1, y1)
            .line_to(x2, y2)
            .stroke();
        self
    }

    /// Register an image with the document and return its resource ID.
    pub fn add_image(&mut self, image: ImageData) -> String {
        self.writer.add_image(image)
    }

    /// Paint a registered image into `placement`.
    pub fn draw_image(&mut self, resource_id: &str, placement: ImagePlacement) -> &mut Self {
        let page = self.page();
        if !page.xobjects.iter().any(|id| id == resource_id) {
            page.xobjects.push(resource_id.to_string());
        }
        page.content_builder.draw_image(
            resource_id,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
        );
        self
    }

    /// Finish drawing this page and return to the writer.
    pub fn finish(mut self) -> &'a mut PdfWriter {
        self.page().content_builder.end_text();
        self.writer
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
    /// Image resource IDs painted on this page, in first-use order
    xobjects: Vec<String>,
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, standard fonts and images.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    /// Registered images (resource ID -> image)
    images: IndexMap<String, ImageData>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            images: IndexMap::new(),
        }
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
            xobjects: Vec::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Register an image and return its resource ID (`Im1`, `Im2`, ...).
    pub fn add_image(&mut self, image: ImageData) -> String {
        let resource_id = format!("Im{}", self.images.len() + 1);
        self.images.insert(resource_id.clone(), image);
        resource_id
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        self.assemble()
            .map_err(|e| Error::Encoding(format!("failed to assemble PDF: {}", e)))
    }

    fn assemble(self) -> std::io::Result<Vec<u8>> {
        let serializer = ObjectSerializer;
        let mut output = Vec::new();

        // Object number layout
        let catalog_id: u32 = 1;
        let pages_id: u32 = 2;
        let mut next_id: u32 = 3;

        let mut font_ids: Vec<(StandardFont, u32)> = Vec::new();
        for font in StandardFont::ALL {
            font_ids.push((font, next_id));
            next_id += 1;
        }

        // (resource id, image object id, soft mask object id)
        let mut image_ids: Vec<(&str, u32, Option<u32>)> = Vec::new();
        for (resource_id, image) in &self.images {
            let image_id = next_id;
            next_id += 1;
            let mask_id = image.soft_mask.as_ref().map(|_| {
                let id = next_id;
                next_id += 1;
                id
            });
            image_ids.push((resource_id.as_str(), image_id, mask_id));
        }

        let mut page_ids: Vec<(u32, u32)> = Vec::with_capacity(self.pages.len());
        for _ in &self.pages {
            page_ids.push((next_id, next_id + 1));
            next_id += 2;
        }

        let info_id = next_id;
        next_id += 1;

        let mut objects: Vec<(u32, Object)> = Vec::new();

        objects.push((
            catalog_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages_id, 0)),
            ]),
        ));

        let kids: Vec<Object> = page_ids
            .iter()
            .map(|(page_id, _)| Object::Reference(ObjectRef::new(*page_id, 0)))
            .collect();
        objects.push((
            pages_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Kids", Object::Array(kids)),
                ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
            ]),
        ));

        let mut font_resources: HashMap<String, Object> = HashMap::new();
        for (font, font_id) in &font_ids {
            objects.push((
                *font_id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Font")),
                    ("Subtype", ObjectSerializer::name("Type1")),
                    ("BaseFont", ObjectSerializer::name(font.base_font())),
                    ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                ]),
            ));
            font_resources.insert(
                font.resource_name().to_string(),
                ObjectSerializer::reference(*font_id, 0),
            );
        }

        let mut image_refs: HashMap<&str, u32> = HashMap::new();
        for (resource_id, image_id, mask_id) in &image_ids {
            let Some(image) = self.images.get(*resource_id) else {
                continue;
            };
            let mut dict = image.build_xobject_dict();
            if let Some(mask_id) = mask_id {
                dict.insert("SMask".to_string(), ObjectSerializer::reference(*mask_id, 0));
            }
            objects.push((
                *image_id,
                Object::Stream {
                    dict,
                    data: bytes::Bytes::from(image.data.clone()),
                },
            ));
            if let (Some(mask_id), Some(mask_dict), Some(mask_data)) =
                (mask_id, image.build_soft_mask_dict(), image.soft_mask.as_ref())
            {
                objects.push((
                    *mask_id,
                    Object::Stream {
                        dict: mask_dict,
                        data: bytes::Bytes::from(mask_data.clone()),
                    },
                ));
            }
            image_refs.insert(*resource_id, *image_id);
        }

        for (page_data, (page_id, content_id)) in self.pages.iter().zip(&page_ids) {
            let mut raw_content = Vec::new();
            page_data.content_builder.write_to(&mut raw_content)?;

            let (content_bytes, is_compressed) = if self.config.compress {
                match compress_data(&raw_content) {
                    Ok(compressed) => (compressed, true),
                    Err(e) => {
                        log::warn!(
                            "Content stream compression failed, writing uncompressed: {}",
                            e
                        );
                        (raw_content, false)
                    },
                }
            } else {
                (raw_content, false)
            };

            let mut content_dict = HashMap::new();
            if is_compressed {
                content_dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
            }

            let mut resources = vec![("Font", Object::Dictionary(font_resources.clone()))];
            if !page_data.xobjects.is_empty() {
                let xobjects: HashMap<String, Object> = page_data
                    .xobjects
                    .iter()
                    .filter_map(|id| {
                        image_refs
                            .get(id.as_str())
                            .map(|obj_id| (id.clone(), ObjectSerializer::reference(*obj_id, 0)))
                    })
                    .collect();
                resources.push(("XObject", Object::Dictionary(xobjects)));
            }

            objects.push((
                *page_id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Page")),
                    ("Parent", ObjectSerializer::reference(pages_id, 0)),
                    (
                        "MediaBox",
                        ObjectSerializer::rect(
                            0.0,
                            0.0,
                            page_data.width as f64,
                            page_data.height as f64,
                        ),
                    ),
                    ("Contents", ObjectSerializer::reference(*content_id, 0)),
                    ("Resources", ObjectSerializer::dict(resources)),
                ]),
            ));
            objects.push((
                *content_id,
                Object::Stream {
                    dict: content_dict,
                    data: bytes::Bytes::from(content_bytes),
                },
            ));
        }

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", text_string(title)));
        }
        if let Some(author) = &self.config.author {
            info_entries.push(("Author", text_string(author)));
        }
        if let Some(subject) = &self.config.subject {
            info_entries.push(("Subject", text_string(subject)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", text_string(creator)));
        }
        objects.push((info_id, ObjectSerializer::dict(info_entries)));

        objects.sort_by_key(|(id, _)| *id);

        // PDF Header
        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut xref_offsets: Vec<usize> = Vec::with_capacity(objects.len());
        for (id, obj) in &objects {
            xref_offsets.push(output.len());
            serializer.write_indirect(&mut output, *id, 0, obj)?;
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", next_id)?;
        // Object 0 is always free
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(next_id as i64)),
            ("Root", ObjectSerializer::reference(catalog_id, 0)),
            ("Info", ObjectSerializer::reference(info_id, 0)),
        ]);

        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "Assembled PDF: {} pages, {} images, {} bytes",
            self.pages.len(),
            self.images.len(),
            output.len()
        );

        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([0, 0, 255, 128]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageOutputFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_create_empty_pdf() {
        let mut writer = PdfWriter::new();
        writer.add_page(595.28, 841.89).finish();
        let bytes = writer.finish().unwrap();

        let content = String::from_utf8_lossy(&bytes);
        assert!(content.starts_with("%PDF-1.7"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Type /Page "));
        assert!(content.contains("[0 0 595.28 841.89]"));
        assert!(content.ends_with("%%EOF"));
    }

    #[test]
    fn test_declares_both_standard_fonts() {
        let mut writer = PdfWriter::new();
        writer.add_page(595.28, 841.89).finish();
        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert_eq!(content.matches("/Type /Font").count(), 2);
        assert!(content.contains("/BaseFont /Helvetica "));
        assert!(content.contains("/BaseFont /Helvetica-Bold"));
        assert!(content.contains("/Encoding /WinAnsiEncoding"));
    }

    #[test]
    fn test_pdf_with_text() {
        let mut writer = PdfWriter::new();
        {
            let mut page = writer.add_page(595.28, 841.89);
            page.text("Hello, World!", 72.0, 720.0, StandardFont::HelveticaBold, 12.0);
            page.finish();
        }

        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/F2 12 Tf"));
        assert!(content.contains("(Hello, World!) Tj"));
        assert!(content.contains("ET"));
    }

    #[test]
    fn test_pdf_with_metadata() {
        let config = PdfWriterConfig::default()
            .with_title("Sicherheitsunterweisung")
            .with_author("A. Muster");

        let mut writer = PdfWriter::with_config(config);
        writer.add_page(595.28, 841.89).finish();

        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/Title (Sicherheitsunterweisung)"));
        assert!(content.contains("/Author (A. Muster)"));
    }

    #[test]
    fn test_image_resources_only_on_using_page() {
        let mut writer = PdfWriter::new();
        {
            let mut page = writer.add_page(595.28, 841.89);
            let id = page.add_image(ImageData::from_png(&tiny_png()).unwrap());
            page.draw_image(&id, ImagePlacement::new(100.0, 100.0, 40.0, 20.0));
            page.finish();
        }
        writer.add_page(595.28, 841.89).finish();

        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert_eq!(content.matches("/XObject <<").count(), 1);
        assert!(content.contains("/Im1 Do"));
        assert!(content.contains("/SMask"));
        assert_eq!(content.matches("/Subtype /Image").count(), 2);
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut writer = PdfWriter::new();
        {
            let mut page = writer.add_page(595.28, 841.89);
            page.stroke_rect(50.0, 50.0, 100.0, 40.0, 1.0);
            page.finish();
        }
        let bytes = writer.finish().unwrap();

        let xref_pos = bytes
            .windows(6)
            .position(|w| w == b"\nxref\n")
            .unwrap()
            + 1;
        let table = std::str::from_utf8(&bytes[xref_pos..]).unwrap();
        let entries: Vec<&str> = table
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with("n "))
            .collect();
        assert!(!entries.is_empty());
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn test_non_ascii_title_is_utf16() {
        let config = PdfWriterConfig::default().with_title("Unterweisung für Küche");
        let mut writer = PdfWriter::with_config(config);
        writer.add_page(595.28, 841.89).finish();
        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/Title <FEFF0055"));
    }

    #[test]
    fn test_compressed_content_stream() {
        let mut writer = PdfWriter::with_config(PdfWriterConfig::default().with_compress(true));
        {
            let mut page = writer.add_page(595.28, 841.89);
            page.text("compressed", 50.0, 50.0, StandardFont::Helvetica, 10.0);
            page.finish();
        }
        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("/Filter /FlateDecode"));
        assert!(!content.contains("(compressed) Tj"));
    }

    #[test]
    fn test_fills_are_isolated_in_saved_state() {
        let mut writer = PdfWriter::new();
        {
            let mut page = writer.add_page(595.28, 841.89);
            page.text("Kurz", 54.0, 640.0, StandardFont::Helvetica, 9.0);
            page.fill_rect_gray(50.0, 600.0, 495.0, 22.0, 0.94);
            page.fill_rect(50.0, 578.0, 495.0, 22.0, Color::rgb(0.2, 0.4, 0.6));
            page.finish();
        }
        let bytes = writer.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("Tj\nET\nq\n0.94 g\n50 600 495 22 re\nf\nQ\n"));
        assert!(content.contains("q\n0.2 0.4 0.6 rg\n50 578 495 22 re\nf\nQ\n"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut writer = PdfWriter::new();
            {
                let mut page = writer.add_page(595.28, 841.89);
                let id = page.add_image(ImageData::from_png(&tiny_png()).unwrap());
                page.draw_image(&id, ImagePlacement::new(10.0, 10.0, 2.0, 1.0));
                page.fill_rect(50.0, 50.0, 10.0, 10.0, Color::rgb(0.2, 0.3, 0.5));
                page.finish();
            }
            writer.finish().unwrap()
        };
        assert_eq!(build(), build());
    }
}
