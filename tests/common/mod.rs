use docweave::model::{RunFonts, RunProperties};
use docweave::{Document, Orientation, PageSettings, Paper, RowHeightRule, SectionBreakOptions, TableConfig};

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn cjk(n: usize) -> String {
    "页".repeat(n)
}

fn heading_props(size_pt: f32) -> RunProperties {
    RunProperties {
        fonts: Some(RunFonts::uniform("SimSun")),
        bold: true,
        color: Some("000000".to_string()),
        ..RunProperties::default()
    }
    .with_size_pt(size_pt)
}

fn styled_heading(doc: &mut Document, text: &str, level: u8, bookmark: &str, size_pt: f32) {
    let paragraph = doc.add_heading_with_bookmark(text, level, bookmark);
    if let Some(run) = paragraph.runs.first_mut() {
        run.properties = Some(heading_props(size_pt));
    }
}

/// A report document shaped like the production scenario: cover page, TOC
/// placeholder, a restarted portrait section with one heading per page, a
/// second restarted section with multi-level headings and page-number
/// footers, a landscape section holding a tall reference table, and a
/// final portrait section.
///
/// Returns the document and the element index of the TOC placeholder.
#[allow(dead_code)]
pub fn report_document() -> (Document, usize) {
    let mut doc = Document::new();
    doc.set_page_settings(PageSettings {
        paper: Paper::A4,
        orientation: Orientation::Portrait,
        margin_top: 25.0,
        margin_bottom: 25.0,
        margin_left: 20.0,
        margin_right: 20.0,
        header_distance: 12.7,
        footer_distance: 12.7,
    });

    // Cover page, outside the numbered scheme.
    doc.add_paragraph("环境检测报告")
        .set_alignment(docweave::Justification::Center);
    doc.add_paragraph("某某科技有限公司")
        .set_alignment(docweave::Justification::Center);
    doc.add_page_break();

    // TOC placeholder; replaced by the generated block later.
    doc.add_heading("目录", 1);
    let toc_index = doc.elements().len() - 1;

    // Numbered content restarts at 1 after the front matter.
    doc.add_paragraph("");
    doc.end_section(SectionBreakOptions {
        orientation: Orientation::Portrait,
        start_page: Some(1),
        inherit_header_footer: false,
    });

    for n in 1..=4 {
        styled_heading(
            &mut doc,
            &format!("第{n}页内容"),
            1,
            &format!("_Toc_第{n}页内容"),
            10.5,
        );
        doc.add_paragraph(&format!("这是第{n}页的详细内容，用于说明文档的背景和主要内容。"));
        doc.add_paragraph(&format!("第{n}页还可以包含更多的段落。"));
        doc.add_page_break();
    }

    // Second restart: the formal body begins at page 1 again, with
    // header/footer references active from here on.
    doc.add_paragraph("");
    doc.end_section(SectionBreakOptions {
        orientation: Orientation::Portrait,
        start_page: Some(1),
        inherit_header_footer: true,
    });
    doc.add_header_reference(docweave::model::HeaderFooterKind::Default, "rId6");
    doc.add_footer_reference(docweave::model::HeaderFooterKind::Default, "rId7");

    styled_heading(&mut doc, "第五页标题", 1, "_Toc_第五页标题", 14.0);
    styled_heading(&mut doc, "第五页二级标题1", 2, "_Toc_第五页二级标题1", 12.0);
    styled_heading(&mut doc, "第五页三级标题1", 3, "_Toc_第五页三级标题1", 12.0);
    styled_heading(&mut doc, "第五页二级标题2", 2, "_Toc_第五页二级标题2", 12.0);
    doc.add_paragraph("这是第五页标题页面的内容，包含二级标题和三级标题。");

    // Landscape section for the wide reference table, numbering continuous.
    doc.add_paragraph("");
    doc.end_section(SectionBreakOptions {
        orientation: Orientation::Landscape,
        start_page: None,
        inherit_header_footer: true,
    });

    let table = doc.add_table(&TableConfig {
        rows: 23,
        cols: 3,
        col_widths: vec![2000, 4000, 3000],
        width: Some(9000),
    });
    table.set_cell_text(0, 0, "适用范围");
    table.set_cell_text(0, 1, "文件名");
    table.set_cell_text(0, 2, "文件编号");
    table.set_cell_text(1, 1, "《泄漏和敞开液面排放的挥发性有机物检测技术导则》");
    table.set_cell_text(1, 2, "HJ 733-2014");
    table.merge_cells_vertical(1, 7, 0);
    for row in 0..table.row_count() {
        table.set_row_height(row, 33.0, RowHeightRule::Minimum);
    }

    // Back to portrait, numbering continuous.
    doc.add_paragraph("");
    doc.end_section(SectionBreakOptions {
        orientation: Orientation::Portrait,
        start_page: None,
        inherit_header_footer: true,
    });

    styled_heading(&mut doc, "第七页标题", 1, "_Toc_第七页标题", 14.0);
    styled_heading(&mut doc, "第七页二级标题1", 2, "_Toc_第七页二级标题1", 12.0);
    styled_heading(&mut doc, "第七页三级标题1", 3, "_Toc_第七页三级标题1", 12.0);
    styled_heading(&mut doc, "第七页三级标题2", 3, "_Toc_第七页三级标题2", 12.0);
    styled_heading(&mut doc, "第七页二级标题2", 2, "_Toc_第七页二级标题2", 12.0);
    doc.add_paragraph("这是第七页的内容，用于测试多级标题在目录中的显示效果。");

    (doc, toc_index)
}
