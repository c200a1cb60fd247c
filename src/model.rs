//! In-memory body element model, shaped after the WordprocessingML schema.
//!
//! Dimension-bearing attributes (`w:w`, `w:sz`, `w:spacing`, …) keep their
//! raw string form exactly as they would appear in the XML: twentieths of a
//! point for page geometry and spacing, half-points for font sizes. The
//! consumers that need numbers parse leniently and substitute defaults, so
//! a malformed value degrades the estimate instead of failing the document.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Justification {
    Left,
    Center,
    Right,
    Both,
}

impl Justification {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
            Justification::Both => "both",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TabAlignment {
    Left,
    Center,
    Right,
}

impl TabAlignment {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            TabAlignment::Left => "left",
            TabAlignment::Center => "center",
            TabAlignment::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TabLeader {
    Dot,
}

#[derive(Clone, Debug)]
pub struct TabStop {
    pub alignment: TabAlignment,
    pub leader: Option<TabLeader>,
    /// Position in twips.
    pub position: String,
}

/// `w:spacing` on paragraph properties. `before`/`after` are twips,
/// `line` is 240ths of a single line (240 = single spacing).
#[derive(Clone, Debug, Default)]
pub struct Spacing {
    pub before: Option<String>,
    pub after: Option<String>,
    pub line: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Indentation {
    pub left: Option<String>,
    pub right: Option<String>,
    pub first_line: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct RunFonts {
    pub ascii: Option<String>,
    pub hansi: Option<String>,
    pub east_asia: Option<String>,
    pub cs: Option<String>,
}

impl RunFonts {
    /// Same typeface for the ascii, high-ANSI and East Asian slots.
    pub fn uniform(name: &str) -> Self {
        Self {
            ascii: Some(name.to_string()),
            hansi: Some(name.to_string()),
            east_asia: Some(name.to_string()),
            cs: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunProperties {
    pub fonts: Option<RunFonts>,
    /// `w:sz` value, half-points.
    pub size: Option<String>,
    pub bold: bool,
    /// `w:color` value, RRGGBB hex.
    pub color: Option<String>,
}

impl RunProperties {
    /// Set the font size in points (stored as half-points).
    pub fn with_size_pt(mut self, pt: f32) -> Self {
        self.size = Some(format!("{:.0}", pt * 2.0));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldCharType {
    Begin,
    Separate,
    End,
}

impl FieldCharType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FieldCharType::Begin => "begin",
            FieldCharType::Separate => "separate",
            FieldCharType::End => "end",
        }
    }
}

/// A styled text fragment. At most one of the content slots is set per run;
/// builders emit separate runs for breaks, tabs and field characters the
/// way Word itself does.
#[derive(Clone, Debug, Default)]
pub struct Run {
    pub properties: Option<RunProperties>,
    pub text: String,
    /// `w:br w:type="page"`, a hard page break.
    pub page_break: bool,
    /// `w:tab` inside the run.
    pub tab: bool,
    pub field: Option<FieldCharType>,
    /// `w:instrText` content (field instruction).
    pub instr_text: Option<String>,
}

impl Run {
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn styled(text: &str, properties: RunProperties) -> Self {
        Self {
            properties: Some(properties),
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn page_break() -> Self {
        Self {
            page_break: true,
            ..Self::default()
        }
    }

    pub fn tab() -> Self {
        Self {
            tab: true,
            ..Self::default()
        }
    }

    pub fn field(kind: FieldCharType) -> Self {
        Self {
            field: Some(kind),
            ..Self::default()
        }
    }

    pub fn instr(instruction: &str) -> Self {
        Self {
            instr_text: Some(instruction.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParagraphProperties {
    /// `w:pStyle` value, e.g. `Heading1`.
    pub style: Option<String>,
    pub justification: Option<Justification>,
    pub spacing: Option<Spacing>,
    pub indentation: Option<Indentation>,
    pub tabs: Vec<TabStop>,
    pub page_break_before: bool,
    /// Outgoing section record: this paragraph is the last one of the
    /// section these properties describe.
    pub section: Option<SectionProperties>,
}

#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    pub properties: Option<ParagraphProperties>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn text(text: &str) -> Self {
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run::text(text)]
        };
        Self {
            properties: None,
            runs,
        }
    }

    pub fn properties_mut(&mut self) -> &mut ParagraphProperties {
        self.properties
            .get_or_insert_with(ParagraphProperties::default)
    }

    pub fn set_style(&mut self, style_id: &str) -> &mut Self {
        self.properties_mut().style = Some(style_id.to_string());
        self
    }

    pub fn set_alignment(&mut self, justification: Justification) -> &mut Self {
        self.properties_mut().justification = Some(justification);
        self
    }

    /// Before/after spacing in points, optional line-spacing multiple
    /// (1.0 = single). Stored in twips / 240ths as the schema requires.
    pub fn set_spacing(&mut self, before_pt: f32, after_pt: f32, line: Option<f32>) -> &mut Self {
        self.properties_mut().spacing = Some(Spacing {
            before: Some(format!("{:.0}", before_pt * 20.0)),
            after: Some(format!("{:.0}", after_pt * 20.0)),
            line: line.map(|m| format!("{:.0}", m * 240.0)),
        });
        self
    }

    /// Append a hard page break run.
    pub fn add_page_break(&mut self) -> &mut Self {
        self.runs.push(Run::page_break());
        self
    }

    /// Concatenated visible text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// True when any run carries a hard page break, or the paragraph is
    /// flagged to start on a new page.
    pub fn has_page_break(&self) -> bool {
        self.runs.iter().any(|r| r.page_break)
            || self
                .properties
                .as_ref()
                .is_some_and(|p| p.page_break_before)
    }
}

/// `w:pgSz`. Width/height are twips strings; stored values are trusted
/// as-is. `orient` is metadata and never swaps them.
#[derive(Clone, Debug, Default)]
pub struct PageSize {
    pub width: Option<String>,
    pub height: Option<String>,
    pub orient: Option<Orientation>,
}

/// `w:pgMar`, all twips.
#[derive(Clone, Debug, Default)]
pub struct PageMargins {
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
}

/// `w:pgNumType`. An absent `start` means the section continues the
/// previous section's numbering.
#[derive(Clone, Debug, Default)]
pub struct PageNumbering {
    pub start: Option<String>,
    pub format: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeaderFooterKind {
    Default,
    First,
    Even,
}

impl HeaderFooterKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            HeaderFooterKind::Default => "default",
            HeaderFooterKind::First => "first",
            HeaderFooterKind::Even => "even",
        }
    }
}

/// Relationship reference to a header or footer part. Content parts live
/// in the package, which is the assembly layer's concern.
#[derive(Clone, Debug)]
pub struct HeaderFooterReference {
    pub kind: HeaderFooterKind,
    pub id: String,
}

#[derive(Clone, Debug, Default)]
pub struct SectionProperties {
    pub page_size: Option<PageSize>,
    pub margins: Option<PageMargins>,
    pub page_numbering: Option<PageNumbering>,
    pub title_page: bool,
    pub header_references: Vec<HeaderFooterReference>,
    pub footer_references: Vec<HeaderFooterReference>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VMerge {
    Restart,
    Continue,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RowHeightRule {
    Minimum,
    Exact,
}

impl RowHeightRule {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            RowHeightRule::Minimum => "atLeast",
            RowHeightRule::Exact => "exact",
        }
    }
}

/// `w:trHeight`, value in twips.
#[derive(Clone, Debug)]
pub struct RowHeight {
    pub value: String,
    pub rule: RowHeightRule,
}

#[derive(Clone, Debug, Default)]
pub struct TableCell {
    /// `w:tcW` in twips.
    pub width: Option<String>,
    pub v_merge: Option<VMerge>,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Clone, Debug, Default)]
pub struct TableRow {
    pub height: Option<RowHeight>,
    pub cells: Vec<TableCell>,
}

#[derive(Clone, Debug, Default)]
pub struct Table {
    /// `w:tblW` in twips.
    pub width: Option<String>,
    /// `w:gridCol` widths in twips.
    pub grid: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Replace the cell's content with a single plain paragraph. Out of
    /// range addresses are ignored.
    pub fn set_cell_text(&mut self, row: usize, col: usize, text: &str) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col)) {
            cell.paragraphs = vec![Paragraph::text(text)];
        }
    }

    /// Fixed row height in points with a sizing rule. Out of range rows
    /// are ignored.
    pub fn set_row_height(&mut self, row: usize, height_pt: f32, rule: RowHeightRule) {
        if let Some(r) = self.rows.get_mut(row) {
            r.height = Some(RowHeight {
                value: format!("{:.0}", height_pt * 20.0),
                rule,
            });
        }
    }

    /// Merge a vertical span of cells in one column: the first cell gets
    /// `vMerge restart`, the rest `vMerge continue`. Invalid spans are
    /// ignored.
    pub fn merge_cells_vertical(&mut self, start_row: usize, end_row: usize, col: usize) {
        if start_row >= end_row || end_row >= self.rows.len() {
            return;
        }
        for row in start_row..=end_row {
            if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col)) {
                cell.v_merge = Some(if row == start_row {
                    VMerge::Restart
                } else {
                    VMerge::Continue
                });
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct BookmarkStart {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct BookmarkEnd {
    pub id: String,
}

/// One element of the document body. The set is closed on purpose: the
/// page-flow walk matches it exhaustively.
#[derive(Clone, Debug)]
pub enum BodyElement {
    Paragraph(Paragraph),
    Table(Table),
    /// Standalone section record in the element stream.
    SectionBreak(SectionProperties),
    BookmarkStart(BookmarkStart),
    BookmarkEnd(BookmarkEnd),
    /// Structured document tag (e.g. a realized TOC). Opaque to the
    /// estimator.
    Sdt(crate::sdt::Sdt),
}
