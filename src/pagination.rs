//! Page-flow tracking over the body element stream.
//!
//! A single forward pass walks the ordered elements, accumulating estimated
//! content height per page and advancing two counters: the physical page
//! (every break) and the display page (what a reader would see, subject to
//! per-section numbering restarts). Headings encountered along the way are
//! captured as TOC entries with the display page of the page they start on.
//!
//! The pass never fails: malformed numeric fields fall back to default
//! geometry, and an empty document simply yields no entries.

use crate::estimate;
use crate::geometry::PageDimensions;
use crate::model::{BodyElement, Paragraph, SectionProperties};
use crate::styles;
use crate::toc::TocEntry;

/// Walk state: current section geometry plus the page cursor.
struct FlowState<'a> {
    sections: Vec<&'a SectionProperties>,
    section_index: usize,
    dims: PageDimensions,
    content_height: f32,
    physical_page: u32,
    display_page: i32,
    used: f32,
    /// Armed after a numbering restart so that an explicit break on the
    /// immediately following paragraph does not advance the display page a
    /// second time. Cleared by the next paragraph either way.
    suppress_next_break: bool,
}

impl<'a> FlowState<'a> {
    fn new(sections: Vec<&'a SectionProperties>, page_offset: i32) -> Self {
        let dims = PageDimensions::from_section(sections.first().copied());
        let mut display_page = 1;
        if page_offset > 0 {
            // Front matter outside the numbered scheme: headings on those
            // pages come out non-positive and the numbered content lands
            // on page 1.
            display_page = 1 - page_offset;
        }
        if let Some(start) = sections.first().and_then(|s| start_page(s)) {
            display_page = start;
        }
        Self {
            sections,
            section_index: 0,
            content_height: dims.content_height(),
            dims,
            physical_page: 1,
            display_page,
            used: 0.0,
            suppress_next_break: false,
        }
    }

    /// Place `height` points of content, advancing to a fresh page when the
    /// current one overflows (a soft break: both counters move).
    fn place(&mut self, height: f32) {
        if self.used + height > self.content_height {
            self.physical_page += 1;
            self.display_page += 1;
            self.used = height;
        } else {
            self.used += height;
        }
    }

    /// Hard page break: the physical counter always moves; the display
    /// counter moves unless a restart just set it.
    fn hard_break(&mut self) {
        self.physical_page += 1;
        self.used = 0.0;
        if self.suppress_next_break {
            self.suppress_next_break = false;
            log::debug!(
                "page break absorbed after numbering restart, display stays {}",
                self.display_page
            );
        } else {
            self.display_page += 1;
            log::debug!("explicit page break, display -> {}", self.display_page);
        }
    }

    /// Cross into the next section: new geometry, new page, and either a
    /// numbering restart or the natural +1 continuation.
    fn enter_next_section(&mut self) {
        self.section_index += 1;
        let Some(section) = self.sections.get(self.section_index).copied() else {
            return;
        };
        self.dims = PageDimensions::from_section(Some(section));
        self.content_height = self.dims.content_height();
        self.physical_page += 1;
        match start_page(section) {
            Some(start) => {
                log::debug!(
                    "section {}: display {} restarts at {}",
                    self.section_index,
                    self.display_page,
                    start
                );
                self.display_page = start;
                self.suppress_next_break = true;
            }
            None => {
                self.display_page += 1;
                log::debug!(
                    "section {}: numbering continues, display -> {}",
                    self.section_index,
                    self.display_page
                );
            }
        }
        self.used = 0.0;
    }
}

/// Collect TOC entries for all headings with level `<= max_level`.
///
/// `skip_index` excludes one element (the TOC's own placeholder) from the
/// walk; `page_offset` shifts the display numbering so front-matter pages
/// fall outside the numbered scheme.
pub(crate) fn collect_headings(
    elements: &[BodyElement],
    final_section: &SectionProperties,
    max_level: u8,
    skip_index: Option<usize>,
    page_offset: i32,
) -> Vec<TocEntry> {
    let sections = section_records(elements, final_section);
    let mut flow = FlowState::new(sections, page_offset);
    let mut entries = Vec::new();
    let mut pending_bookmark: Option<String> = None;

    for (index, element) in elements.iter().enumerate() {
        if Some(index) == skip_index {
            continue;
        }
        match element {
            BodyElement::BookmarkStart(start) => {
                pending_bookmark = Some(start.name.clone());
            }
            BodyElement::BookmarkEnd(_) => {
                pending_bookmark = None;
            }
            BodyElement::SectionBreak(_) => {
                flow.enter_next_section();
            }
            BodyElement::Table(table) => {
                let width = flow.dims.content_width();
                for row in &table.rows {
                    flow.place(estimate::row_height(row, width));
                }
            }
            BodyElement::Paragraph(paragraph) => {
                if paragraph.has_page_break() {
                    flow.hard_break();
                } else {
                    flow.suppress_next_break = false;
                }

                let height = estimate::paragraph_height(paragraph, flow.dims.content_width());
                log::trace!(
                    "element {}: height {:.2}, used {:.2}/{:.2}, page {}",
                    index,
                    height,
                    flow.used,
                    flow.content_height,
                    flow.display_page
                );
                flow.place(height);

                // A section-ending paragraph is still part of the outgoing
                // section, so capture the heading before switching.
                record_heading(paragraph, max_level, &flow, &mut pending_bookmark, &mut entries);

                if paragraph
                    .properties
                    .as_ref()
                    .is_some_and(|p| p.section.is_some())
                {
                    flow.enter_next_section();
                }
            }
            BodyElement::Sdt(_) => {}
        }
    }

    entries
}

fn record_heading(
    paragraph: &Paragraph,
    max_level: u8,
    flow: &FlowState,
    pending_bookmark: &mut Option<String>,
    entries: &mut Vec<TocEntry>,
) {
    let level = paragraph
        .properties
        .as_ref()
        .and_then(|p| p.style.as_deref())
        .and_then(styles::heading_level);
    let Some(level) = level else {
        return;
    };
    if level > max_level {
        return;
    }
    let text = paragraph.plain_text();
    if text.is_empty() {
        return;
    }
    let bookmark = pending_bookmark
        .take()
        .unwrap_or_else(|| fallback_bookmark(&text));
    entries.push(TocEntry {
        text,
        level,
        page: flow.display_page,
        bookmark,
    });
}

/// Deterministic anchor for a heading that was added without a bookmark.
/// A pure function of the text, so repeated collection runs agree;
/// identical heading text collides, which is accepted.
pub(crate) fn fallback_bookmark(text: &str) -> String {
    format!("_Toc_{}", text.replace(' ', "_"))
}

/// Section records in stream order. The record attached to a paragraph
/// describes the section that paragraph ends, so the first record governs
/// the document start; the trailing record always closes the list.
fn section_records<'a>(
    elements: &'a [BodyElement],
    final_section: &'a SectionProperties,
) -> Vec<&'a SectionProperties> {
    let mut records: Vec<&SectionProperties> = Vec::new();
    for element in elements {
        match element {
            BodyElement::Paragraph(p) => {
                if let Some(section) = p.properties.as_ref().and_then(|pp| pp.section.as_ref()) {
                    records.push(section);
                }
            }
            BodyElement::SectionBreak(section) => records.push(section),
            _ => {}
        }
    }
    records.push(final_section);
    records
}

fn start_page(section: &SectionProperties) -> Option<i32> {
    section
        .page_numbering
        .as_ref()
        .and_then(|n| n.start.as_deref())
        .and_then(|v| v.parse::<i32>().ok())
}
