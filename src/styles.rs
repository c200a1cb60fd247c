//! Style identifiers and heading detection.

/// Style id for a heading paragraph at the given level.
pub fn heading_style_id(level: u8) -> String {
    format!("Heading{level}")
}

/// Style id for a TOC entry paragraph at the given level.
pub fn toc_style_id(level: u8) -> String {
    format!("TOC{level}")
}

/// Map a paragraph style id to a heading level 1–9.
///
/// Recognizes `Heading<N>` ids and the bare single-digit ids some
/// producers emit. Anything else is body text.
pub fn heading_level(style_id: &str) -> Option<u8> {
    if let Some(rest) = style_id.strip_prefix("Heading") {
        return match rest.parse::<u8>() {
            Ok(n) if (1..=9).contains(&n) => Some(n),
            _ => None,
        };
    }
    let mut chars = style_id.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() && c != '0' => Some(c as u8 - b'0'),
        _ => None,
    }
}
