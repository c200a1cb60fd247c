//! Document builder.
//!
//! A [`Document`] owns the ordered body element sequence plus the trailing
//! section record governing the final section. Builder calls append or
//! mutate elements; none of them fail. The only surfaced errors are TOC
//! generation without headings and XML serialization.

use crate::error::{Error, Result};
use crate::model::{
    BodyElement, BookmarkEnd, BookmarkStart, HeaderFooterKind, HeaderFooterReference, Orientation,
    PageMargins, PageNumbering, PageSize, Paragraph, SectionProperties, Table, TableCell, TableRow,
};
use crate::toc::{TocConfig, TocEntry};
use crate::{pagination, sdt, styles, xml};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paper {
    A4,
    Letter,
}

impl Paper {
    /// Page size in twips for the given orientation.
    fn twips(self, orientation: Orientation) -> (&'static str, &'static str) {
        let (w, h) = match self {
            Paper::A4 => ("11906", "16838"),
            Paper::Letter => ("12240", "15840"),
        };
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Document-level page setup. Margins and distances are millimetres; the
/// values are converted to twips when a section record is written.
#[derive(Clone, Copy, Debug)]
pub struct PageSettings {
    pub paper: Paper,
    pub orientation: Orientation,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub header_distance: f32,
    pub footer_distance: f32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            paper: Paper::A4,
            orientation: Orientation::Portrait,
            margin_top: 25.4,
            margin_bottom: 25.4,
            margin_left: 25.4,
            margin_right: 25.4,
            header_distance: 12.7,
            footer_distance: 12.7,
        }
    }
}

fn mm_twips(mm: f32) -> String {
    format!("{:.0}", mm * 1440.0 / 25.4)
}

/// Options for [`Document::end_section`].
#[derive(Clone, Copy, Debug)]
pub struct SectionBreakOptions {
    /// Orientation of the new section.
    pub orientation: Orientation,
    /// Display page the new section starts at; `None` continues the
    /// previous section's numbering.
    pub start_page: Option<u32>,
    /// Carry the previous section's header/footer references into the new
    /// section; when false the new section starts blank.
    pub inherit_header_footer: bool,
}

impl Default for SectionBreakOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            start_page: None,
            inherit_header_footer: true,
        }
    }
}

/// Shape of a new table: `col_widths` (twips) wins over an even split of
/// `width` across `cols`.
#[derive(Clone, Debug, Default)]
pub struct TableConfig {
    pub rows: usize,
    pub cols: usize,
    pub col_widths: Vec<u32>,
    pub width: Option<u32>,
}

pub struct Document {
    elements: Vec<BodyElement>,
    settings: PageSettings,
    final_section: SectionProperties,
    bookmark_seq: u32,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let settings = PageSettings::default();
        let final_section = section_from_settings(&settings, settings.orientation);
        Self {
            elements: Vec::new(),
            settings,
            final_section,
            bookmark_seq: 0,
        }
    }

    /// Replace the page setup. Rewrites the trailing section record's
    /// geometry; numbering and header/footer references are kept.
    pub fn set_page_settings(&mut self, settings: PageSettings) {
        self.settings = settings;
        let fresh = section_from_settings(&settings, settings.orientation);
        self.final_section.page_size = fresh.page_size;
        self.final_section.margins = fresh.margins;
    }

    pub fn page_settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn elements(&self) -> &[BodyElement] {
        &self.elements
    }

    /// Section record governing the final section of the document.
    pub fn final_section(&self) -> &SectionProperties {
        &self.final_section
    }

    /// Append an arbitrary body element.
    pub fn push(&mut self, element: BodyElement) {
        self.elements.push(element);
    }

    pub fn add_paragraph(&mut self, text: &str) -> &mut Paragraph {
        self.elements
            .push(BodyElement::Paragraph(Paragraph::text(text)));
        let Some(BodyElement::Paragraph(paragraph)) = self.elements.last_mut() else {
            unreachable!("paragraph just pushed");
        };
        paragraph
    }

    /// Append a heading paragraph. Levels clamp to 1–9.
    pub fn add_heading(&mut self, text: &str, level: u8) -> &mut Paragraph {
        let level = level.clamp(1, 9);
        let paragraph = self.add_paragraph(text);
        paragraph.set_style(&styles::heading_style_id(level));
        paragraph
    }

    /// Append a heading wrapped in a bookmark start/end pair so the TOC can
    /// link to it. Bookmark ids are assigned sequentially.
    pub fn add_heading_with_bookmark(
        &mut self,
        text: &str,
        level: u8,
        bookmark_name: &str,
    ) -> &mut Paragraph {
        let level = level.clamp(1, 9);
        let id = self.bookmark_seq.to_string();
        self.bookmark_seq += 1;

        self.elements.push(BodyElement::BookmarkStart(BookmarkStart {
            id: id.clone(),
            name: bookmark_name.to_string(),
        }));
        let mut paragraph = Paragraph::text(text);
        paragraph.set_style(&styles::heading_style_id(level));
        self.elements.push(BodyElement::Paragraph(paragraph));
        let index = self.elements.len() - 1;
        self.elements.push(BodyElement::BookmarkEnd(BookmarkEnd { id }));

        let BodyElement::Paragraph(paragraph) = &mut self.elements[index] else {
            unreachable!("paragraph just pushed");
        };
        paragraph
    }

    /// Append an empty paragraph carrying a hard page break.
    pub fn add_page_break(&mut self) {
        self.add_paragraph("").add_page_break();
    }

    pub fn add_table(&mut self, config: &TableConfig) -> &mut Table {
        let even_width = config
            .width
            .filter(|_| config.col_widths.is_empty())
            .map(|w| w / config.cols.max(1) as u32);
        let column_width = |col: usize| -> Option<String> {
            config
                .col_widths
                .get(col)
                .copied()
                .or(even_width)
                .map(|w| w.to_string())
        };

        let grid: Vec<String> = (0..config.cols).filter_map(&column_width).collect();
        let rows = (0..config.rows)
            .map(|_| TableRow {
                height: None,
                cells: (0..config.cols)
                    .map(|col| TableCell {
                        width: column_width(col),
                        v_merge: None,
                        paragraphs: vec![Paragraph::text("")],
                    })
                    .collect(),
            })
            .collect();

        self.elements.push(BodyElement::Table(Table {
            width: config.width.map(|w| w.to_string()),
            grid,
            rows,
        }));
        let Some(BodyElement::Table(table)) = self.elements.last_mut() else {
            unreachable!("table just pushed");
        };
        table
    }

    /// Close the current section and open a new one.
    ///
    /// Word stores a section's properties on its *last* paragraph, so the
    /// record currently governing the open section is attached there (an
    /// empty paragraph is appended when the body does not end in one), and
    /// the trailing record is rewritten for the new section: orientation,
    /// current margins, page numbering restart, header/footer inheritance.
    pub fn end_section(&mut self, options: SectionBreakOptions) {
        let outgoing = self.final_section.clone();

        let attach_to_last = matches!(
            self.elements.last(),
            Some(BodyElement::Paragraph(p))
                if p.properties.as_ref().is_none_or(|pp| pp.section.is_none())
        );
        if !attach_to_last {
            self.add_paragraph("");
        }
        let Some(BodyElement::Paragraph(last)) = self.elements.last_mut() else {
            unreachable!("body ends in a paragraph here");
        };
        last.properties_mut().section = Some(outgoing.clone());

        let fresh = section_from_settings(&self.settings, options.orientation);
        self.final_section.page_size = fresh.page_size;
        self.final_section.margins = fresh.margins;
        self.final_section.page_numbering = Some(PageNumbering {
            start: options.start_page.map(|n| n.to_string()),
            format: Some("decimal".to_string()),
        });
        if options.inherit_header_footer {
            if self.final_section.header_references.is_empty() {
                self.final_section.header_references = outgoing.header_references;
            }
            if self.final_section.footer_references.is_empty() {
                self.final_section.footer_references = outgoing.footer_references;
            }
        } else {
            self.final_section.header_references.clear();
            self.final_section.footer_references.clear();
        }
    }

    /// Reference a header part from the current (final) section.
    pub fn add_header_reference(&mut self, kind: HeaderFooterKind, relationship_id: &str) {
        self.final_section
            .header_references
            .push(HeaderFooterReference {
                kind,
                id: relationship_id.to_string(),
            });
    }

    /// Reference a footer part from the current (final) section.
    pub fn add_footer_reference(&mut self, kind: HeaderFooterKind, relationship_id: &str) {
        self.final_section
            .footer_references
            .push(HeaderFooterReference {
                kind,
                id: relationship_id.to_string(),
            });
    }

    /// Collect TOC entries for every heading with level `<= max_level`,
    /// with estimated display page numbers. Pure with respect to the body:
    /// calling it twice yields identical lists.
    pub fn collect_headings(
        &self,
        max_level: u8,
        skip_index: Option<usize>,
        page_offset: i32,
    ) -> Vec<TocEntry> {
        pagination::collect_headings(
            &self.elements,
            &self.final_section,
            max_level,
            skip_index,
            page_offset,
        )
    }

    /// Generate a TOC from the current body and append it.
    pub fn generate_toc(&mut self, config: &TocConfig) -> Result<()> {
        let entries = self.collect_headings(config.max_level, None, config.page_offset);
        if entries.is_empty() {
            return Err(Error::NoHeadings(config.max_level));
        }
        log::debug!("generated toc with {} entries", entries.len());
        self.elements
            .push(BodyElement::Sdt(sdt::build_toc(config, &entries)));
        Ok(())
    }

    /// Generate a TOC and place it at `insert_index`, replacing the
    /// placeholder element there (appends when the index is out of range).
    /// The placeholder is excluded from the page walk so the TOC cannot
    /// reference itself.
    pub fn generate_toc_at(&mut self, config: &TocConfig, insert_index: usize) -> Result<()> {
        let entries =
            self.collect_headings(config.max_level, Some(insert_index), config.page_offset);
        if entries.is_empty() {
            return Err(Error::NoHeadings(config.max_level));
        }
        log::debug!(
            "generated toc with {} entries at index {}",
            entries.len(),
            insert_index
        );
        let block = BodyElement::Sdt(sdt::build_toc(config, &entries));
        if insert_index < self.elements.len() {
            self.elements[insert_index] = block;
        } else {
            self.elements.push(block);
        }
        Ok(())
    }

    /// Serialize the body as a WordprocessingML `w:document` part.
    pub fn to_document_xml(&self) -> Result<String> {
        xml::document_xml(self)
    }
}

fn section_from_settings(settings: &PageSettings, orientation: Orientation) -> SectionProperties {
    let (width, height) = settings.paper.twips(orientation);
    SectionProperties {
        page_size: Some(PageSize {
            width: Some(width.to_string()),
            height: Some(height.to_string()),
            orient: Some(orientation),
        }),
        margins: Some(PageMargins {
            top: Some(mm_twips(settings.margin_top)),
            bottom: Some(mm_twips(settings.margin_bottom)),
            left: Some(mm_twips(settings.margin_left)),
            right: Some(mm_twips(settings.margin_right)),
            header: Some(mm_twips(settings.header_distance)),
            footer: Some(mm_twips(settings.footer_distance)),
        }),
        ..SectionProperties::default()
    }
}
