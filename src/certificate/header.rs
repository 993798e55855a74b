//! Header band drawn at the top of both pages.

use super::layout::*;
use crate::config::BriefingConfig;
use crate::writer::{PageBuilder, StandardFont};

/// Document title printed right of the separator.
pub const TITLE: &str = "Sicherheitsunterweisung";

/// Draw the header band and return the cursor for the first content line.
pub fn draw_header(page: &mut PageBuilder<'_>, config: &BriefingConfig) -> f32 {
    let top = PAGE_HEIGHT - MARGIN;
    let bottom = top - HEADER_HEIGHT;

    page.stroke_rect(MARGIN, bottom, CONTENT_WIDTH, HEADER_HEIGHT, RULE_WIDTH);
    page.stroke_rect(MARGIN, bottom, HEADER_ORG_BOX_WIDTH, HEADER_HEIGHT, RULE_WIDTH);

    page.text(&config.org_name, MARGIN + 5.0, top - 15.0, StandardFont::HelveticaBold, 11.0);
    page.text(&config.org_subtitle, MARGIN + 5.0, top - 30.0, StandardFont::Helvetica, 8.0);

    let separator_x = MARGIN + HEADER_SEPARATOR_OFFSET;
    page.line(separator_x, top, separator_x, bottom, RULE_WIDTH);

    page.text(TITLE, separator_x + 10.0, bottom + 14.0, StandardFont::HelveticaBold, 14.0);

    bottom - HEADER_GAP
}
