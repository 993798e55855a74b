//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Section 8-9.

use super::encoding::{encode_winansi, escape_literal};
use super::object_serializer::format_number;
use std::io::Write;

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Create a colour from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White.
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj), already WinAnsi-encoded
    ShowText(Vec<u8>),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Set fill color gray (g)
    SetFillColorGray(f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Builder for PDF content streams.
///
/// Collects operations for one page and serializes them with [`write_to`](Self::write_to).
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    ///
    /// `resource_name` is the key under the page's `/Font` resources.
    pub fn set_font(&mut self, resource_name: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(resource_name) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(resource_name.to_string(), size));
            self.current_font = Some(resource_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Add text with its baseline starting at `(x, y)`.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(encode_winansi(text)))
    }

    /// Set fill color.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorRGB(color.r, color.g, color.b))
    }

    /// Set fill color to a gray level.
    pub fn fill_gray(&mut self, gray: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorGray(gray))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Move to a point (start a new subpath).
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Append a rectangle subpath.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Save the current graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore the previous graphics state.
    ///
    /// The font may have been changed inside the saved block, so the next
    /// `set_font` is always emitted.
    pub fn restore_state(&mut self) -> &mut Self {
        self.current_font = None;
        self.op(ContentStreamOp::RestoreState)
    }

    /// Apply a transformation matrix.
    pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> &mut Self {
        self.op(ContentStreamOp::Transform(a, b, c, d, e, f))
    }

    /// Draw an image XObject at the specified position and size.
    ///
    /// # Arguments
    /// * `resource_id` - The XObject resource ID (e.g., "Im1")
    /// * `x` - X position (left edge)
    /// * `y` - Y position (bottom edge)
    /// * `width` - Display width
    /// * `height` - Display height
    pub fn draw_image(
        &mut self,
        resource_id: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> &mut Self {
        self.end_text();
        self.save_state();
        self.transform(width, 0.0, 0.0, height, x, y);
        self.op(ContentStreamOp::PaintXObject(resource_id.to_string()));
        self.restore_state()
    }

    /// Serialize all operations into `w`, closing a dangling text object.
    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for op in &self.operations {
            self.write_op(w, op)?;
            writeln!(w)?;
        }
        if self.in_text_object {
            writeln!(w, "ET")?;
        }
        Ok(())
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        let n = |v: f32| format_number(v as f64);
        match op {
            ContentStreamOp::SaveState => write!(w, "q"),
            ContentStreamOp::RestoreState => write!(w, "Q"),
            ContentStreamOp::Transform(a, b, c, d, e, f) => {
                write!(w, "{} {} {} {} {} {} cm", n(*a), n(*b), n(*c), n(*d), n(*e), n(*f))
            },
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, n(*size)),
            ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
                write!(w, "{} {} {} {} {} {} Tm", n(*a), n(*b), n(*c), n(*d), n(*e), n(*f))
            },
            ContentStreamOp::ShowText(bytes) => write!(w, "({}) Tj", escape_literal(bytes)),
            ContentStreamOp::SetFillColorRGB(r, g, b) => {
                write!(w, "{} {} {} rg", n(*r), n(*g), n(*b))
            },
            ContentStreamOp::SetFillColorGray(g) => write!(w, "{} g", n(*g)),
            ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", n(*width)),
            ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", n(*x), n(*y)),
            ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", n(*x), n(*y)),
            ContentStreamOp::Rectangle(x, y, w_val, h) => {
                write!(w, "{} {} {} {} re", n(*x), n(*y), n(*w_val), n(*h))
            },
            ContentStreamOp::Stroke => write!(w, "S"),
            ContentStreamOp::Fill => write!(w, "f"),
            ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(builder: &ContentStreamBuilder) -> String {
        let mut buf = Vec::new();
        builder.write_to(&mut buf).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("F1", 12.0)
            .text("Hello, World!", 72.0, 720.0)
            .end_text();

        let content = render(&builder);
        assert!(content.contains("BT"));
        assert!(content.contains("/F1 12 Tf"));
        assert!(content.contains("1 0 0 1 72 720 Tm"));
        assert!(content.contains("(Hello, World!) Tj"));
        assert!(content.contains("ET"));
    }

    #[test]
    fn test_font_is_not_repeated() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 10.0).set_font("F1", 10.0).set_font("F2", 10.0);
        assert_eq!(render(&builder), "/F1 10 Tf\n/F2 10 Tf\n");
    }

    #[test]
    fn test_font_reemitted_after_restore() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 10.0).save_state().restore_state().set_font("F1", 10.0);
        assert_eq!(render(&builder).matches("/F1 10 Tf").count(), 2);
    }

    #[test]
    fn test_umlaut_text_is_octal_escaped() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 10.0).text("Durchgeführt von", 50.0, 600.0);
        assert!(render(&builder).contains("(Durchgef\\374hrt von) Tj"));
    }

    #[test]
    fn test_escaped_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("Text with (parens) and \\backslash", 72.0, 720.0);
        let content = render(&builder);
        assert!(content.contains("\\(parens\\)"));
        assert!(content.contains("\\\\backslash"));
    }

    #[test]
    fn test_unclosed_text_object_is_terminated() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("open", 0.0, 0.0);
        assert!(render(&builder).trim_end().ends_with("ET"));
    }

    #[test]
    fn test_path_operations() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_line_width(0.5)
            .move_to(205.0, 791.89)
            .line_to(205.0, 751.89)
            .stroke();

        let content = render(&builder);
        assert!(content.contains("0.5 w"));
        assert!(content.contains("205 791.89 m"));
        assert!(content.contains("205 751.89 l"));
        assert!(content.contains("\nS\n"));
    }

    #[test]
    fn test_filled_rectangle() {
        let mut builder = ContentStreamBuilder::new();
        builder.fill_gray(0.95).rect(50.0, 600.0, 495.0, 22.0).fill();
        let content = render(&builder);
        assert!(content.contains("0.95 g"));
        assert!(content.contains("50 600 495 22 re"));
        assert!(content.contains("\nf\n"));
    }

    #[test]
    fn test_draw_image_closes_text_and_wraps_state() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("Name", 50.0, 500.0).draw_image("Im1", 300.0, 480.0, 90.0, 30.0);

        let content = render(&builder);
        let et = content.find("ET").unwrap();
        let q = content.find("\nq\n").unwrap();
        assert!(et < q);
        assert!(content.contains("90 0 0 30 300 480 cm"));
        assert!(content.contains("/Im1 Do"));
        assert!(content.contains("\nQ\n"));
    }
}
