//! Page 1: briefing metadata, instructor and topic list.

use super::layout::*;
use super::{format_date_time, place_signature, RenderReport, SignatureBox};
use crate::model::IncidentDetail;
use crate::writer::{PageBuilder, StandardFont};

pub const SECTION_TITLE: &str = "Angaben zur Unterweisung";
pub const LABEL_REASON: &str = "Unterweisungsgrund:";
pub const LABEL_DATE: &str = "Datum / Uhrzeit:";
pub const LABEL_DEPARTMENT: &str = "Unterweisung für:";
pub const LABEL_CONDUCTED_BY: &str = "Durchgeführt von";
pub const LABEL_SIGNATURE: &str = "Unterschrift";
pub const TOPICS_HEADING: &str = "Besprochene Themen";

/// Draw everything below the header, starting at cursor `y`.
pub fn draw_summary(
    page: &mut PageBuilder<'_>,
    incident: &IncidentDetail,
    mut y: f32,
    report: &mut RenderReport,
) {
    page.text(SECTION_TITLE, MARGIN, y, StandardFont::HelveticaBold, 14.0);
    y -= 25.0;

    let date = format_date_time(&incident.date);
    let fields = [
        (LABEL_REASON, incident.reason_name()),
        (LABEL_DATE, date.as_str()),
        (LABEL_DEPARTMENT, incident.department_name()),
    ];
    for (label, value) in fields {
        page.text(label, MARGIN, y, StandardFont::HelveticaBold, 10.0);
        page.text(value, MARGIN + LABEL_COLUMN_WIDTH, y, StandardFont::Helvetica, 10.0);
        y -= FIELD_PITCH;
    }
    y -= 12.0;

    page.text(LABEL_CONDUCTED_BY, MARGIN, y, StandardFont::HelveticaBold, 10.0);
    page.text(LABEL_SIGNATURE, MARGIN + LABEL_COLUMN_WIDTH, y, StandardFont::HelveticaBold, 10.0);
    y -= 20.0;

    page.text(&incident.instructor, MARGIN, y, StandardFont::Helvetica, 10.0);
    let box_top = y + 10.0;
    if let Some(entry) = incident.instructor_signature() {
        let slot = SignatureBox {
            x: MARGIN + LABEL_COLUMN_WIDTH,
            y: box_top - INSTRUCTOR_SIGNATURE_MAX_HEIGHT,
            max_width: INSTRUCTOR_SIGNATURE_MAX_WIDTH,
            max_height: INSTRUCTOR_SIGNATURE_MAX_HEIGHT,
            right_align: false,
        };
        place_signature(page, entry, slot, report);
    }
    y = box_top - INSTRUCTOR_SIGNATURE_MAX_HEIGHT - 20.0;

    page.text(TOPICS_HEADING, MARGIN, y, StandardFont::HelveticaBold, 12.0);
    y -= 20.0;

    for topic in &incident.topics {
        // Overflowing topics are dropped, no continuation page
        if y < TOPIC_LIMIT_Y {
            break;
        }
        let line = format!("\u{2022} {}", topic.name);
        page.text(&line, MARGIN + 10.0, y, StandardFont::Helvetica, 10.0);
        report.topics_drawn += 1;
        y -= TOPIC_PITCH;
    }

    if report.topics_drawn < incident.topics.len() {
        log::warn!(
            "Topic list truncated: {} of {} topics fit on the page",
            report.topics_drawn,
            incident.topics.len()
        );
    }
}
