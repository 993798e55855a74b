//! WinAnsi text encoding for the standard Type 1 fonts.
//!
//! Helvetica and Helvetica-Bold are declared with `/WinAnsiEncoding`, so
//! every string shown with `Tj` must be Windows-1252 bytes. German umlauts
//! and ß are in the Latin-1 range and map directly.

/// Byte emitted for characters that WinAnsi cannot represent.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Map a Unicode codepoint to its WinAnsi (Windows-1252) byte.
pub fn unicode_to_winansi(codepoint: u32) -> Option<u8> {
    if codepoint < 0x80 || (0xA0..=0xFF).contains(&codepoint) {
        return Some(codepoint as u8);
    }

    // 0x80-0x9F differs from Latin-1
    match codepoint {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation mark
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation mark
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// Encode text as WinAnsi bytes, replacing unmappable characters.
///
/// Control characters other than tab are dropped; they have no glyph in the
/// standard fonts and would only confuse viewers.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() && ch != '\t' {
            continue;
        }
        out.push(unicode_to_winansi(ch as u32).unwrap_or(REPLACEMENT_BYTE));
    }
    out
}

/// Escape bytes for the body of a PDF literal string `( ... )`.
///
/// Bytes outside printable ASCII are written as octal escapes so the
/// content stream itself stays 7-bit clean.
pub fn escape_literal(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() + 8);
    for &b in bytes {
        match b {
            b'(' => result.push_str("\\("),
            b')' => result.push_str("\\)"),
            b'\\' => result.push_str("\\\\"),
            0x09 => result.push_str("\\t"),
            b if (0x20..0x7F).contains(&b) => result.push(b as char),
            b => result.push_str(&format!("\\{:03o}", b)),
        }
    }
    result
}
