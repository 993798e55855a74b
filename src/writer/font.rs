//! Standard 14 fonts used by generated documents.
//!
//! The standard fonts ship with every conforming viewer, so nothing is
//! embedded; each font is a small `/Type1` dictionary with WinAnsi encoding.

/// A standard Type 1 font available without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    /// Helvetica regular
    Helvetica,
    /// Helvetica bold
    HelveticaBold,
}

impl StandardFont {
    /// Every font a document declares, in resource order.
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    /// PostScript name written as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Key under `/Resources /Font` and operand of `Tf`.
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_names() {
        assert_eq!(StandardFont::Helvetica.base_font(), "Helvetica");
        assert_eq!(StandardFont::HelveticaBold.base_font(), "Helvetica-Bold");
        assert_ne!(
            StandardFont::Helvetica.resource_name(),
            StandardFont::HelveticaBold.resource_name()
        );
    }
}
