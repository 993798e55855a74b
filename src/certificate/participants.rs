//! Page 2: participant signature table and footer.

use super::layout::*;
use super::{format_date, place_signature, RenderReport, SignatureBox};
use crate::model::IncidentDetail;
use crate::writer::{Color, PageBuilder, StandardFont};

pub const SECTION_TITLE: &str = "Teilnehmer";
pub const DESCRIPTION: &str =
    "Die folgenden Personen haben an der Unterweisung teilgenommen:";
pub const COLUMN_LABELS: [&str; 4] = ["Nr.", "Kurz", "Name", "Unterschrift"];

/// Fixed footer contact placeholders.
pub const FOOTER_SENDER: &str = "Arbeitssicherheit";
pub const FOOTER_RECIPIENT: &str = "Personalabteilung";
pub const FOOTER_LABELS: [&str; 4] = ["Erstellt am:", "Absender:", "Empfänger:", "Datum:"];

/// Draw the participant table below the header, starting at cursor `y`.
pub fn draw_participants(
    page: &mut PageBuilder<'_>,
    incident: &IncidentDetail,
    mut y: f32,
    report: &mut RenderReport,
) {
    page.text(SECTION_TITLE, MARGIN, y, StandardFont::HelveticaBold, 14.0);
    y -= 20.0;
    page.text(DESCRIPTION, MARGIN, y, StandardFont::Helvetica, 10.0);
    y -= 25.0;

    let columns = column_starts();
    let width = table_width();
    let table_top = y;

    page.fill_rect(MARGIN, y - ROW_HEIGHT, width, ROW_HEIGHT, TABLE_HEADER_FILL);
    for (label, x) in COLUMN_LABELS.iter().zip(columns) {
        page.colored_text(
            label,
            x + 2.0 * CELL_PADDING,
            y - 15.0,
            StandardFont::HelveticaBold,
            9.0,
            Color::white(),
        );
    }
    y -= ROW_HEIGHT;

    let participants = incident.participants();
    for (index, entry) in participants.iter().enumerate() {
        // Rows past the boundary are dropped, no continuation page
        if y - ROW_HEIGHT < TABLE_LIMIT_Y {
            break;
        }
        let row_bottom = y - ROW_HEIGHT;

        if index % 2 == 0 {
            page.fill_rect_gray(MARGIN, row_bottom, width, ROW_HEIGHT, ROW_SHADE_GRAY);
        }

        let baseline = y - 15.0;
        let number = (index + 1).to_string();
        let cells = [number.as_str(), entry.kurz.as_str(), entry.name.as_str()];
        for (text, x) in cells.iter().zip(columns) {
            page.text(text, x + 2.0 * CELL_PADDING, baseline, StandardFont::Helvetica, 9.0);
        }

        let slot = SignatureBox {
            x: columns[3] + CELL_PADDING,
            y: row_bottom + CELL_PADDING,
            max_width: TABLE_COLUMNS[3] - 2.0 * CELL_PADDING,
            max_height: ROW_HEIGHT - 2.0 * CELL_PADDING,
            right_align: true,
        };
        place_signature(page, entry, slot, report);

        report.rows_drawn += 1;
        y = row_bottom;
    }

    if report.rows_drawn < participants.len() {
        log::warn!(
            "Participant table truncated: {} of {} rows fit on the page",
            report.rows_drawn,
            participants.len()
        );
    }

    draw_table_rules(page, table_top, y, report.rows_drawn);
    draw_footer(page, incident);
}

/// Outer border, column separators and row separators for the drawn rows.
fn draw_table_rules(page: &mut PageBuilder<'_>, top: f32, bottom: f32, rows: usize) {
    let width = table_width();
    page.stroke_rect(MARGIN, bottom, width, top - bottom, RULE_WIDTH);

    for x in column_starts().iter().skip(1) {
        page.line(*x, top, *x, bottom, RULE_WIDTH);
    }

    for k in 1..=rows {
        let row_y = top - ROW_HEIGHT * k as f32;
        page.line(MARGIN, row_y, MARGIN + width, row_y, RULE_WIDTH);
    }
}

fn draw_footer(page: &mut PageBuilder<'_>, incident: &IncidentDetail) {
    let date = format_date(&incident.date);
    let values = [date.as_str(), FOOTER_SENDER, FOOTER_RECIPIENT, date.as_str()];

    let label_y = MARGIN + 20.0;
    let value_y = MARGIN + 8.0;
    page.line(MARGIN, MARGIN + 35.0, MARGIN + CONTENT_WIDTH, MARGIN + 35.0, RULE_WIDTH);

    for ((label, value), offset) in FOOTER_LABELS.iter().zip(values).zip(FOOTER_COLUMNS) {
        page.text(label, MARGIN + offset, label_y, StandardFont::HelveticaBold, 8.0);
        page.text(value, MARGIN + offset, value_y, StandardFont::Helvetica, 8.0);
    }
}
