//! WordprocessingML serialization of the document body.
//!
//! Produces the `word/document.xml` part content; packaging it into the
//! `.docx` container (zip, relationships, content types) is the assembly
//! layer's responsibility.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::model::{
    BodyElement, BookmarkEnd, BookmarkStart, Paragraph, ParagraphProperties, Run, RunProperties,
    SectionProperties, Table, TableCell, TableRow,
};
use crate::sdt::Sdt;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn xml_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Xml(e.to_string())
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn start(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.writer
            .write_event(Event::Start(element))
            .map_err(xml_err)
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.writer
            .write_event(Event::Empty(element))
            .map_err(xml_err)
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_err)
    }

    /// `<name w:val="value"/>`
    fn val(&mut self, name: &str, value: &str) -> Result<()> {
        let mut element = BytesStart::new(name);
        element.push_attribute(("w:val", value));
        self.empty(element)
    }
}

/// Render the whole document part.
pub(crate) fn document_xml(document: &Document) -> Result<String> {
    let mut out = XmlOut {
        writer: Writer::new(Vec::new()),
    };
    out.writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WML_NS));
    root.push_attribute(("xmlns:r", REL_NS));
    out.start(root)?;
    out.start(BytesStart::new("w:body"))?;

    for element in document.elements() {
        write_element(&mut out, element)?;
    }
    write_section_properties(&mut out, document.final_section())?;

    out.end("w:body")?;
    out.end("w:document")?;

    String::from_utf8(out.writer.into_inner()).map_err(xml_err)
}

fn write_element(out: &mut XmlOut, element: &BodyElement) -> Result<()> {
    match element {
        BodyElement::Paragraph(paragraph) => write_paragraph(out, paragraph),
        BodyElement::Table(table) => write_table(out, table),
        BodyElement::SectionBreak(section) => write_section_properties(out, section),
        BodyElement::BookmarkStart(bookmark) => write_bookmark_start(out, bookmark),
        BodyElement::BookmarkEnd(bookmark) => write_bookmark_end(out, bookmark),
        BodyElement::Sdt(sdt) => write_sdt(out, sdt),
    }
}

fn write_paragraph(out: &mut XmlOut, paragraph: &Paragraph) -> Result<()> {
    out.start(BytesStart::new("w:p"))?;
    if let Some(properties) = &paragraph.properties {
        write_paragraph_properties(out, properties)?;
    }
    for run in &paragraph.runs {
        write_run(out, run)?;
    }
    out.end("w:p")
}

fn write_paragraph_properties(out: &mut XmlOut, properties: &ParagraphProperties) -> Result<()> {
    out.start(BytesStart::new("w:pPr"))?;

    if let Some(style) = &properties.style {
        out.val("w:pStyle", style)?;
    }
    if properties.page_break_before {
        out.empty(BytesStart::new("w:pageBreakBefore"))?;
    }
    if !properties.tabs.is_empty() {
        out.start(BytesStart::new("w:tabs"))?;
        for tab in &properties.tabs {
            let mut element = BytesStart::new("w:tab");
            element.push_attribute(("w:val", tab.alignment.as_str()));
            if tab.leader.is_some() {
                element.push_attribute(("w:leader", "dot"));
            }
            element.push_attribute(("w:pos", tab.position.as_str()));
            out.empty(element)?;
        }
        out.end("w:tabs")?;
    }
    if let Some(spacing) = &properties.spacing {
        let mut element = BytesStart::new("w:spacing");
        if let Some(before) = &spacing.before {
            element.push_attribute(("w:before", before.as_str()));
        }
        if let Some(after) = &spacing.after {
            element.push_attribute(("w:after", after.as_str()));
        }
        if let Some(line) = &spacing.line {
            element.push_attribute(("w:line", line.as_str()));
            element.push_attribute(("w:lineRule", "auto"));
        }
        out.empty(element)?;
    }
    if let Some(indentation) = &properties.indentation {
        let mut element = BytesStart::new("w:ind");
        if let Some(left) = &indentation.left {
            element.push_attribute(("w:left", left.as_str()));
        }
        if let Some(right) = &indentation.right {
            element.push_attribute(("w:right", right.as_str()));
        }
        if let Some(first_line) = &indentation.first_line {
            element.push_attribute(("w:firstLine", first_line.as_str()));
        }
        out.empty(element)?;
    }
    if let Some(justification) = properties.justification {
        out.val("w:jc", justification.as_str())?;
    }
    if let Some(section) = &properties.section {
        write_section_properties(out, section)?;
    }

    out.end("w:pPr")
}

fn write_run(out: &mut XmlOut, run: &Run) -> Result<()> {
    out.start(BytesStart::new("w:r"))?;
    if let Some(properties) = &run.properties {
        write_run_properties(out, properties)?;
    }
    if run.page_break {
        let mut element = BytesStart::new("w:br");
        element.push_attribute(("w:type", "page"));
        out.empty(element)?;
    }
    if run.tab {
        out.empty(BytesStart::new("w:tab"))?;
    }
    if let Some(field) = run.field {
        let mut element = BytesStart::new("w:fldChar");
        element.push_attribute(("w:fldCharType", field.as_str()));
        out.empty(element)?;
    }
    if let Some(instruction) = &run.instr_text {
        let mut element = BytesStart::new("w:instrText");
        element.push_attribute(("xml:space", "preserve"));
        out.start(element)?;
        out.text(instruction)?;
        out.end("w:instrText")?;
    }
    if !run.text.is_empty() {
        let mut element = BytesStart::new("w:t");
        if run.text.starts_with(char::is_whitespace) || run.text.ends_with(char::is_whitespace) {
            element.push_attribute(("xml:space", "preserve"));
        }
        out.start(element)?;
        out.text(&run.text)?;
        out.end("w:t")?;
    }
    out.end("w:r")
}

fn write_run_properties(out: &mut XmlOut, properties: &RunProperties) -> Result<()> {
    out.start(BytesStart::new("w:rPr"))?;
    if let Some(fonts) = &properties.fonts {
        let mut element = BytesStart::new("w:rFonts");
        if let Some(ascii) = &fonts.ascii {
            element.push_attribute(("w:ascii", ascii.as_str()));
        }
        if let Some(hansi) = &fonts.hansi {
            element.push_attribute(("w:hAnsi", hansi.as_str()));
        }
        if let Some(east_asia) = &fonts.east_asia {
            element.push_attribute(("w:eastAsia", east_asia.as_str()));
        }
        if let Some(cs) = &fonts.cs {
            element.push_attribute(("w:cs", cs.as_str()));
        }
        out.empty(element)?;
    }
    if properties.bold {
        out.empty(BytesStart::new("w:b"))?;
    }
    if let Some(color) = &properties.color {
        out.val("w:color", color)?;
    }
    if let Some(size) = &properties.size {
        out.val("w:sz", size)?;
    }
    out.end("w:rPr")
}

fn write_table(out: &mut XmlOut, table: &Table) -> Result<()> {
    out.start(BytesStart::new("w:tbl"))?;

    out.start(BytesStart::new("w:tblPr"))?;
    if let Some(width) = &table.width {
        let mut element = BytesStart::new("w:tblW");
        element.push_attribute(("w:w", width.as_str()));
        element.push_attribute(("w:type", "dxa"));
        out.empty(element)?;
    }
    out.end("w:tblPr")?;

    if !table.grid.is_empty() {
        out.start(BytesStart::new("w:tblGrid"))?;
        for width in &table.grid {
            let mut element = BytesStart::new("w:gridCol");
            element.push_attribute(("w:w", width.as_str()));
            out.empty(element)?;
        }
        out.end("w:tblGrid")?;
    }

    for row in &table.rows {
        write_table_row(out, row)?;
    }
    out.end("w:tbl")
}

fn write_table_row(out: &mut XmlOut, row: &TableRow) -> Result<()> {
    out.start(BytesStart::new("w:tr"))?;
    if let Some(height) = &row.height {
        out.start(BytesStart::new("w:trPr"))?;
        let mut element = BytesStart::new("w:trHeight");
        element.push_attribute(("w:val", height.value.as_str()));
        element.push_attribute(("w:hRule", height.rule.as_str()));
        out.empty(element)?;
        out.end("w:trPr")?;
    }
    for cell in &row.cells {
        write_table_cell(out, cell)?;
    }
    out.end("w:tr")
}

fn write_table_cell(out: &mut XmlOut, cell: &TableCell) -> Result<()> {
    out.start(BytesStart::new("w:tc"))?;

    out.start(BytesStart::new("w:tcPr"))?;
    if let Some(width) = &cell.width {
        let mut element = BytesStart::new("w:tcW");
        element.push_attribute(("w:w", width.as_str()));
        element.push_attribute(("w:type", "dxa"));
        out.empty(element)?;
    }
    if let Some(merge) = cell.v_merge {
        let value = match merge {
            crate::model::VMerge::Restart => "restart",
            crate::model::VMerge::Continue => "continue",
        };
        out.val("w:vMerge", value)?;
    }
    out.end("w:tcPr")?;

    // A cell must contain at least one paragraph.
    if cell.paragraphs.is_empty() {
        out.start(BytesStart::new("w:p"))?;
        out.end("w:p")?;
    }
    for paragraph in &cell.paragraphs {
        write_paragraph(out, paragraph)?;
    }
    out.end("w:tc")
}

fn write_section_properties(out: &mut XmlOut, section: &SectionProperties) -> Result<()> {
    out.start(BytesStart::new("w:sectPr"))?;

    for reference in &section.header_references {
        let mut element = BytesStart::new("w:headerReference");
        element.push_attribute(("w:type", reference.kind.as_str()));
        element.push_attribute(("r:id", reference.id.as_str()));
        out.empty(element)?;
    }
    for reference in &section.footer_references {
        let mut element = BytesStart::new("w:footerReference");
        element.push_attribute(("w:type", reference.kind.as_str()));
        element.push_attribute(("r:id", reference.id.as_str()));
        out.empty(element)?;
    }

    if let Some(size) = &section.page_size {
        let mut element = BytesStart::new("w:pgSz");
        if let Some(width) = &size.width {
            element.push_attribute(("w:w", width.as_str()));
        }
        if let Some(height) = &size.height {
            element.push_attribute(("w:h", height.as_str()));
        }
        if let Some(orient) = size.orient {
            element.push_attribute(("w:orient", orient.as_str()));
        }
        out.empty(element)?;
    }
    if let Some(margins) = &section.margins {
        let mut element = BytesStart::new("w:pgMar");
        for (name, value) in [
            ("w:top", &margins.top),
            ("w:right", &margins.right),
            ("w:bottom", &margins.bottom),
            ("w:left", &margins.left),
            ("w:header", &margins.header),
            ("w:footer", &margins.footer),
        ] {
            if let Some(value) = value {
                element.push_attribute((name, value.as_str()));
            }
        }
        out.empty(element)?;
    }
    if let Some(numbering) = &section.page_numbering {
        let mut element = BytesStart::new("w:pgNumType");
        if let Some(start) = &numbering.start {
            element.push_attribute(("w:start", start.as_str()));
        }
        if let Some(format) = &numbering.format {
            element.push_attribute(("w:fmt", format.as_str()));
        }
        out.empty(element)?;
    }
    if section.title_page {
        out.empty(BytesStart::new("w:titlePg"))?;
    }

    out.end("w:sectPr")
}

fn write_bookmark_start(out: &mut XmlOut, bookmark: &BookmarkStart) -> Result<()> {
    let mut element = BytesStart::new("w:bookmarkStart");
    element.push_attribute(("w:id", bookmark.id.as_str()));
    element.push_attribute(("w:name", bookmark.name.as_str()));
    out.empty(element)
}

fn write_bookmark_end(out: &mut XmlOut, bookmark: &BookmarkEnd) -> Result<()> {
    let mut element = BytesStart::new("w:bookmarkEnd");
    element.push_attribute(("w:id", bookmark.id.as_str()));
    out.empty(element)
}

fn write_sdt(out: &mut XmlOut, sdt: &Sdt) -> Result<()> {
    out.start(BytesStart::new("w:sdt"))?;

    out.start(BytesStart::new("w:sdtPr"))?;
    out.val("w:id", &sdt.properties.id)?;
    if let Some(gallery) = &sdt.properties.gallery {
        out.start(BytesStart::new("w:docPartObj"))?;
        out.val("w:docPartGallery", gallery)?;
        out.empty(BytesStart::new("w:docPartUnique"))?;
        out.end("w:docPartObj")?;
    }
    out.end("w:sdtPr")?;

    out.start(BytesStart::new("w:sdtContent"))?;
    for element in &sdt.content {
        write_element(out, element)?;
    }
    out.end("w:sdtContent")?;

    out.end("w:sdt")
}
