//! Content height estimation.
//!
//! The estimate assumes every character occupies a full em: pessimistic for
//! Latin text, required for CJK-heavy documents where it is close to exact.
//! All heights are points.

use crate::geometry::twips_pt;
use crate::model::{Paragraph, TableRow};

/// Fallback when no run declares a size (10.5 pt body text).
const DEFAULT_FONT_SIZE_PT: f32 = 10.5;
/// Natural line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.3;
/// Height reserved for a paragraph with no runs at all.
const EMPTY_PARAGRAPH_PT: f32 = 12.0;
/// Spacing `line` value meaning single spacing.
const SINGLE_SPACING: f32 = 240.0;
/// Vertical padding added to every table cell.
const CELL_PADDING_PT: f32 = 4.0;

/// Estimate the vertical extent of a paragraph laid out in `content_width`
/// points.
pub fn paragraph_height(paragraph: &Paragraph, content_width: f32) -> f32 {
    if paragraph.runs.is_empty() {
        return EMPTY_PARAGRAPH_PT;
    }

    let mut total_chars = 0usize;
    let mut font_size = DEFAULT_FONT_SIZE_PT;
    for run in &paragraph.runs {
        total_chars += run.text.chars().count();
        let declared = run
            .properties
            .as_ref()
            .and_then(|p| p.size.as_deref())
            .and_then(|v| v.parse::<f32>().ok())
            .map(|half_pt| half_pt / 2.0);
        if let Some(size) = declared {
            if size > font_size {
                font_size = size;
            }
        }
    }

    if total_chars == 0 {
        // Blank line (runs without text, e.g. a lone page break).
        return font_size * 1.2;
    }

    let chars_per_line = ((content_width / font_size) as usize).max(1);
    let lines = total_chars.div_ceil(chars_per_line);

    let mut line_height = font_size * LINE_HEIGHT_FACTOR;
    let spacing = paragraph.properties.as_ref().and_then(|p| p.spacing.as_ref());
    if let Some(spacing) = spacing {
        if let Some(line) = spacing.line.as_deref().and_then(|v| v.parse::<f32>().ok()) {
            // 240 = single spacing, 360 = one-and-a-half, and so on.
            line_height = (line / SINGLE_SPACING) * font_size * LINE_HEIGHT_FACTOR;
        }
        let before = twips_pt(spacing.before.as_deref()).unwrap_or(0.0);
        let after = twips_pt(spacing.after.as_deref()).unwrap_or(0.0);
        return lines as f32 * line_height + before + after;
    }

    lines as f32 * line_height
}

/// Estimate the height of one table row laid out in `content_width` points.
///
/// An explicit row height wins. Otherwise the row is as tall as its
/// tallest cell, with the content width split evenly across cells;
/// declared column widths are not consulted.
pub fn row_height(row: &TableRow, content_width: f32) -> f32 {
    if let Some(height) = &row.height {
        if let Some(pt) = twips_pt(Some(height.value.as_str())) {
            return pt;
        }
    }

    if row.cells.is_empty() {
        return EMPTY_PARAGRAPH_PT;
    }

    let cell_width = content_width / row.cells.len() as f32;
    let mut tallest = 0.0f32;
    for cell in &row.cells {
        let stacked: f32 = cell
            .paragraphs
            .iter()
            .map(|p| paragraph_height(p, cell_width))
            .sum();
        tallest = tallest.max(stacked + CELL_PADDING_PT);
    }
    tallest
}
