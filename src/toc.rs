//! Table of contents configuration and entries.

/// Options for TOC generation.
#[derive(Clone, Debug)]
pub struct TocConfig {
    /// Title paragraph text above the entries.
    pub title: String,
    /// Deepest heading level included (1–9).
    pub max_level: u8,
    /// Render estimated page numbers after each entry.
    pub show_page_numbers: bool,
    /// Push page numbers to a right-aligned tab stop.
    pub right_align_page_numbers: bool,
    /// Wrap entries in `HYPERLINK` fields targeting the heading bookmarks.
    pub use_hyperlinks: bool,
    /// Dotted leader between entry text and page number.
    pub dot_leader: bool,
    /// Number of leading pages excluded from the numbered scheme (cover,
    /// the TOC itself, …). The displayed numbering starts at 1 right after
    /// them.
    pub page_offset: i32,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            title: "Table of Contents".to_string(),
            max_level: 3,
            show_page_numbers: true,
            right_align_page_numbers: true,
            use_hyperlinks: true,
            dot_leader: true,
            page_offset: 0,
        }
    }
}

impl TocConfig {
    /// The `TOC` field instruction Word re-evaluates on update. `\u` keeps
    /// outline levels, `\n` suppresses field-generated page numbers since
    /// the entries carry literal estimates.
    pub(crate) fn field_instruction(&self) -> String {
        let mut instr = format!("TOC \\o \"1-{}\" \\u", self.max_level);
        if self.use_hyperlinks {
            instr.push_str(" \\h");
        }
        instr.push_str(" \\n");
        instr
    }
}

/// One heading summarized for TOC rendering. Derived data: produced by the
/// collection pass, with no identity beyond it.
#[derive(Clone, Debug, PartialEq)]
pub struct TocEntry {
    pub text: String,
    /// Heading level 1–9.
    pub level: u8,
    /// Estimated display page the heading starts on.
    pub page: i32,
    /// Bookmark anchor for `HYPERLINK`/`PAGEREF` fields.
    pub bookmark: String,
}
