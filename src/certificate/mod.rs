//! Two-page briefing certificate.
//!
//! Page 1 carries the briefing metadata, the instructor with their signature
//! and the list of discussed topics. Page 2 lists every participant with
//! their signature in a table, followed by a footer.
//!
//! Layout is plain arithmetic on a per-page `y` cursor. Content that would
//! run past the bottom boundary (topics, table rows) is dropped; there is no
//! continuation page.
//!
//! ```
//! use briefing_pdf::{generate, BriefingConfig, IncidentDetail};
//!
//! let incident = IncidentDetail::from_json(
//!     r#"{"id": "42", "date": "2024-03-01T09:00:00+01:00", "instructor": "A. Muster"}"#,
//! )?;
//! let bytes = generate(&incident, &BriefingConfig::default())?;
//! assert!(bytes.starts_with(b"%PDF-"));
//! # Ok::<(), briefing_pdf::Error>(())
//! ```

mod header;
pub mod layout;
mod participants;
mod summary;

use chrono::{DateTime, FixedOffset};

use crate::config::BriefingConfig;
use crate::error::Result;
use crate::model::{IncidentDetail, SignatureEntry};
use crate::signature::decode_data_url;
use crate::writer::{ImagePlacement, PageBuilder, PdfWriter, PdfWriterConfig};

pub use header::TITLE;

/// What ended up on the pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Topic lines drawn on page 1
    pub topics_drawn: usize,
    /// Participant rows drawn on page 2
    pub rows_drawn: usize,
    /// Signature images embedded on either page
    pub signatures_embedded: usize,
    /// Signatures left blank because the payload could not be decoded
    pub signatures_skipped: usize,
}

/// Generate the certificate for `incident`.
///
/// Fails only when the document itself cannot be encoded. Missing optional
/// text, empty collections and broken signature images are not errors.
pub fn generate(incident: &IncidentDetail, config: &BriefingConfig) -> Result<Vec<u8>> {
    generate_with_report(incident, config).map(|(bytes, _)| bytes)
}

/// Generate the certificate and report how much of the record was drawn.
pub fn generate_with_report(
    incident: &IncidentDetail,
    config: &BriefingConfig,
) -> Result<(Vec<u8>, RenderReport)> {
    let mut writer_config = PdfWriterConfig::default()
        .with_title(TITLE)
        .with_author(incident.instructor.clone())
        .with_compress(config.compress);
    if let Some(reason) = incident.reason.as_deref().filter(|r| !r.is_empty()) {
        writer_config = writer_config.with_subject(reason);
    }

    let mut writer = PdfWriter::with_config(writer_config);
    let mut report = RenderReport::default();

    {
        let mut page = writer.add_page(layout::PAGE_WIDTH, layout::PAGE_HEIGHT);
        let y = header::draw_header(&mut page, config);
        summary::draw_summary(&mut page, incident, y, &mut report);
        page.finish();
    }

    {
        let mut page = writer.add_page(layout::PAGE_WIDTH, layout::PAGE_HEIGHT);
        let y = header::draw_header(&mut page, config);
        participants::draw_participants(&mut page, incident, y, &mut report);
        page.finish();
    }

    let bytes = writer.finish()?;

    log::debug!(
        "Generated certificate for incident {}: {} topics, {} rows, \
         {} signatures ({} skipped), {} bytes",
        incident.id,
        report.topics_drawn,
        report.rows_drawn,
        report.signatures_embedded,
        report.signatures_skipped,
        bytes.len()
    );

    Ok((bytes, report))
}

/// Date and time as printed on page 1, in the record's own offset.
pub fn format_date_time(date: &DateTime<FixedOffset>) -> String {
    date.format("%d.%m.%Y, %H:%M Uhr").to_string()
}

/// Date as printed in the footer.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Area a signature image may occupy.
#[derive(Debug, Clone, Copy)]
struct SignatureBox {
    x: f32,
    y: f32,
    max_width: f32,
    max_height: f32,
    /// Align to the right edge instead of the left one
    right_align: bool,
}

/// Decode and draw one signature, leaving the box blank on failure.
fn place_signature(
    page: &mut PageBuilder<'_>,
    entry: &SignatureEntry,
    slot: SignatureBox,
    report: &mut RenderReport,
) {
    if !entry.has_signature() {
        log::debug!("No signature captured for {}", entry.name);
        return;
    }

    let image = match decode_data_url(&entry.signature) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("Skipping signature of {}: {}", entry.name, e);
            report.signatures_skipped += 1;
            return;
        },
    };

    let (width, height) = image.fit_within(slot.max_width, slot.max_height);
    let x = if slot.right_align {
        slot.x + slot.max_width - width
    } else {
        slot.x
    };
    let y = slot.y + (slot.max_height - height) / 2.0;

    let resource_id = page.add_image(image);
    page.draw_image(&resource_id, ImagePlacement::new(x, y, width, height));
    report.signatures_embedded += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Topic;
    use base64::Engine;

    fn incident(participants: usize) -> IncidentDetail {
        let mut signatures = vec![SignatureEntry::new("A. Muster", "MUS", "")];
        for i in 0..participants {
            signatures.push(SignatureEntry::new(
                format!("Person {:03}", i + 1),
                format!("P{:03}", i + 1),
                "",
            ));
        }
        IncidentDetail {
            id: "test".to_string(),
            date: DateTime::parse_from_rfc3339("2024-03-01T09:00:00+01:00").unwrap(),
            department: Some("Warehouse".to_string()),
            reason: Some("Fire Safety".to_string()),
            instructor: "A. Muster".to_string(),
            topics: vec![Topic::new("t1", "Evacuation routes")],
            signatures,
        }
    }

    fn png_url(width: u32, height: u32) -> String {
        let img = image::GrayImage::from_pixel(width, height, image::Luma([0]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut out, image::ImageOutputFormat::Png)
            .unwrap();
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(out.into_inner())
        )
    }

    #[test]
    fn test_date_formats() {
        let date = DateTime::parse_from_rfc3339("2024-03-01T09:00:00+01:00").unwrap();
        assert_eq!(format_date_time(&date), "01.03.2024, 09:00 Uhr");
        assert_eq!(format_date(&date), "01.03.2024");
    }

    #[test]
    fn test_date_uses_record_offset() {
        let date = DateTime::parse_from_rfc3339("2024-12-31T23:30:00-05:00").unwrap();
        assert_eq!(format_date_time(&date), "31.12.2024, 23:30 Uhr");
    }

    #[test]
    fn test_instructor_is_not_a_row() {
        let (_, report) = generate_with_report(&incident(3), &BriefingConfig::default()).unwrap();
        assert_eq!(report.rows_drawn, 3);
    }

    #[test]
    fn test_row_truncation_boundary() {
        let (_, report) = generate_with_report(&incident(200), &BriefingConfig::default()).unwrap();
        assert_eq!(report.rows_drawn, 23);

        let (_, report) = generate_with_report(&incident(23), &BriefingConfig::default()).unwrap();
        assert_eq!(report.rows_drawn, 23);
    }

    #[test]
    fn test_topic_truncation_boundary() {
        let mut record = incident(0);
        record.topics = (0..100)
            .map(|i| Topic::new(i.to_string(), format!("Topic {}", i)))
            .collect();
        let (_, report) = generate_with_report(&record, &BriefingConfig::default()).unwrap();
        assert_eq!(report.topics_drawn, 31);
    }

    #[test]
    fn test_signature_counts() {
        let mut record = incident(2);
        record.signatures[0].signature = png_url(300, 100);
        record.signatures[1].signature = "data:image/gif;base64,R0lGOD".to_string();
        record.signatures[2].signature = png_url(40, 40);

        let (_, report) = generate_with_report(&record, &BriefingConfig::default()).unwrap();
        assert_eq!(report.signatures_embedded, 2);
        assert_eq!(report.signatures_skipped, 1);
    }

    #[test]
    fn test_instructor_signature_placement() {
        let mut record = incident(0);
        record.signatures[0].signature = png_url(300, 100);

        let bytes = generate(&record, &BriefingConfig::default()).unwrap();
        let content = String::from_utf8_lossy(&bytes);
        // 300x100 scaled by 0.4 into the 120x50 box, centered vertically
        assert!(content.contains("120 0 0 40 270 575.89 cm"));
    }
}
