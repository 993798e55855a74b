//! Page geometry shared by both certificate pages.
//!
//! All positions are PDF user-space points with the origin at the bottom-left
//! corner. Every page keeps its own `y` cursor and moves it down by fixed
//! pitches; nothing reflows.

use crate::writer::Color;

/// A4 portrait width.
pub const PAGE_WIDTH: f32 = 595.28;
/// A4 portrait height.
pub const PAGE_HEIGHT: f32 = 841.89;
/// Uniform margin on all four sides.
pub const MARGIN: f32 = 50.0;
/// Horizontal drawing budget between the side margins.
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Height of the bordered header band.
pub const HEADER_HEIGHT: f32 = 40.0;
/// Width of the organization box inside the header.
pub const HEADER_ORG_BOX_WIDTH: f32 = 150.0;
/// Offset of the vertical separator from the left margin.
pub const HEADER_SEPARATOR_OFFSET: f32 = 155.0;
/// Gap between the header band and the first content line.
pub const HEADER_GAP: f32 = 30.0;

/// Pitch of label/value rows on the summary page.
pub const FIELD_PITCH: f32 = 18.0;
/// Width of the label column on the summary page.
pub const LABEL_COLUMN_WIDTH: f32 = 220.0;
/// Pitch of topic lines.
pub const TOPIC_PITCH: f32 = 14.0;
/// Topics stop once the cursor drops below this line.
pub const TOPIC_LIMIT_Y: f32 = MARGIN + 50.0;

/// Bounding box for the instructor signature.
pub const INSTRUCTOR_SIGNATURE_MAX_WIDTH: f32 = 120.0;
pub const INSTRUCTOR_SIGNATURE_MAX_HEIGHT: f32 = 50.0;

/// Participant table column widths: number, short code, name, signature.
pub const TABLE_COLUMNS: [f32; 4] = [30.0, 70.0, 170.0, 225.0];
/// Height of the header row and of every data row.
pub const ROW_HEIGHT: f32 = 22.0;
/// A row is only drawn if its bottom edge stays at or above this line.
pub const TABLE_LIMIT_Y: f32 = MARGIN + 80.0;
/// Inner padding of table cells.
pub const CELL_PADDING: f32 = 2.0;

/// Footer label/value column offsets from the left margin.
pub const FOOTER_COLUMNS: [f32; 4] = [0.0, 150.0, 300.0, 420.0];

/// Background of the table header row.
pub const TABLE_HEADER_FILL: Color = Color::rgb(0.18, 0.33, 0.55);
/// Gray level of shaded (even) table rows.
pub const ROW_SHADE_GRAY: f32 = 0.94;
/// Stroke width for borders and separators.
pub const RULE_WIDTH: f32 = 0.5;

/// Sum of all table column widths.
pub fn table_width() -> f32 {
    TABLE_COLUMNS.iter().sum()
}

/// Left edge of each table column.
pub fn column_starts() -> [f32; 4] {
    let mut starts = [MARGIN; 4];
    for i in 1..TABLE_COLUMNS.len() {
        starts[i] = starts[i - 1] + TABLE_COLUMNS[i - 1];
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_fits_content_width() {
        assert!(table_width() <= CONTENT_WIDTH);
        assert_eq!(table_width(), 495.0);
    }

    #[test]
    fn test_column_starts() {
        assert_eq!(column_starts(), [50.0, 80.0, 150.0, 320.0]);
    }
}
