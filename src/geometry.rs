//! Page geometry resolution.
//!
//! Section records carry their dimensions as raw twips strings. Resolution
//! is lenient: an absent or unparsable field falls back to A4 portrait with
//! one-inch margins. Stored width/height are trusted as-is; the orient
//! attribute is metadata and never swaps them.

use crate::model::SectionProperties;

// A4 portrait in points.
const A4_WIDTH_PT: f32 = 595.3;
const A4_HEIGHT_PT: f32 = 841.9;
const DEFAULT_MARGIN_PT: f32 = 72.0;

/// Resolved page dimensions of one section, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self {
            width: A4_WIDTH_PT,
            height: A4_HEIGHT_PT,
            margin_top: DEFAULT_MARGIN_PT,
            margin_bottom: DEFAULT_MARGIN_PT,
            margin_left: DEFAULT_MARGIN_PT,
            margin_right: DEFAULT_MARGIN_PT,
        }
    }
}

impl PageDimensions {
    /// Resolve a section record, substituting defaults for anything
    /// missing or malformed.
    pub fn from_section(section: Option<&SectionProperties>) -> Self {
        let mut dims = Self::default();
        let Some(section) = section else {
            return dims;
        };

        if let Some(size) = &section.page_size {
            if let Some(w) = twips_pt(size.width.as_deref()) {
                dims.width = w;
            }
            if let Some(h) = twips_pt(size.height.as_deref()) {
                dims.height = h;
            }
        }
        if let Some(margins) = &section.margins {
            if let Some(t) = twips_pt(margins.top.as_deref()) {
                dims.margin_top = t;
            }
            if let Some(b) = twips_pt(margins.bottom.as_deref()) {
                dims.margin_bottom = b;
            }
            if let Some(l) = twips_pt(margins.left.as_deref()) {
                dims.margin_left = l;
            }
            if let Some(r) = twips_pt(margins.right.as_deref()) {
                dims.margin_right = r;
            }
        }
        dims
    }

    /// Horizontal space available for content.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Vertical space available for content.
    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }
}

/// Parse a twips string into points. `None` on anything unparsable.
pub(crate) fn twips_pt(value: Option<&str>) -> Option<f32> {
    value.and_then(|v| v.parse::<f32>().ok()).map(|v| v / 20.0)
}
