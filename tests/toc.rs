mod common;

use docweave::model::{BodyElement, BookmarkEnd, BookmarkStart};
use docweave::{Document, Error, TocConfig};

#[test]
fn empty_document_yields_no_entries_and_an_error() {
    let mut doc = Document::new();
    assert!(doc.collect_headings(9, None, 0).is_empty());

    let err = doc.generate_toc(&TocConfig::default()).unwrap_err();
    assert!(matches!(err, Error::NoHeadings(3)));
}

#[test]
fn body_text_only_is_not_a_heading() {
    let mut doc = Document::new();
    doc.add_paragraph("正文内容，没有标题样式。");
    assert!(doc.collect_headings(9, None, 0).is_empty());
    assert!(doc.generate_toc(&TocConfig::default()).is_err());
}

#[test]
fn report_scenario_pages_and_levels() {
    common::init_logging();
    let (doc, toc_index) = common::report_document();
    let entries = doc.collect_headings(3, Some(toc_index), 0);

    let expected: Vec<(&str, u8, i32)> = vec![
        ("第1页内容", 1, 1),
        ("第2页内容", 1, 2),
        ("第3页内容", 1, 3),
        ("第4页内容", 1, 4),
        ("第五页标题", 1, 1),
        ("第五页二级标题1", 2, 1),
        ("第五页三级标题1", 3, 1),
        ("第五页二级标题2", 2, 1),
        ("第七页标题", 1, 4),
        ("第七页二级标题1", 2, 4),
        ("第七页三级标题1", 3, 4),
        ("第七页三级标题2", 3, 4),
        ("第七页二级标题2", 2, 4),
    ];
    let actual: Vec<(&str, u8, i32)> = entries
        .iter()
        .map(|e| (e.text.as_str(), e.level, e.page))
        .collect();
    assert_eq!(actual, expected);

    // Every heading was added with an explicit bookmark.
    assert_eq!(entries[0].bookmark, "_Toc_第1页内容");
    assert_eq!(entries[8].bookmark, "_Toc_第七页标题");
}

#[test]
fn max_level_limits_collected_headings() {
    let (doc, toc_index) = common::report_document();
    let entries = doc.collect_headings(1, Some(toc_index), 0);
    assert_eq!(entries.len(), 6);
    assert!(entries.iter().all(|e| e.level == 1));
}

#[test]
fn skip_index_excludes_the_placeholder() {
    let (doc, toc_index) = common::report_document();
    let with_skip = doc.collect_headings(3, Some(toc_index), 0);
    assert!(with_skip.iter().all(|e| e.text != "目录"));

    let without_skip = doc.collect_headings(3, None, 0);
    assert!(without_skip.iter().any(|e| e.text == "目录"));
}

#[test]
fn toc_replaces_the_placeholder_element() {
    let (mut doc, toc_index) = common::report_document();
    let count_before = doc.elements().len();

    doc.generate_toc_at(&TocConfig::default(), toc_index).unwrap();

    assert_eq!(doc.elements().len(), count_before);
    let BodyElement::Sdt(sdt) = &doc.elements()[toc_index] else {
        panic!("placeholder was not replaced by an SDT");
    };
    // Title, field opening, 13 entries, field close.
    assert_eq!(sdt.content.len(), 16);

    // The realized TOC is opaque to the walk: collecting again still
    // produces the same entries.
    let entries = doc.collect_headings(3, Some(toc_index), 0);
    assert_eq!(entries.len(), 13);
}

#[test]
fn out_of_range_insert_index_appends() {
    let mut doc = Document::new();
    doc.add_heading("第一章", 1);
    doc.generate_toc_at(&TocConfig::default(), 999).unwrap();
    assert!(matches!(
        doc.elements().last(),
        Some(BodyElement::Sdt(_))
    ));
}

#[test]
fn entry_paragraphs_carry_hyperlink_and_pageref_fields() {
    let mut doc = Document::new();
    doc.add_heading_with_bookmark("概述", 1, "_Toc_overview");
    doc.generate_toc(&TocConfig::default()).unwrap();

    let Some(BodyElement::Sdt(sdt)) = doc.elements().last() else {
        panic!("toc block missing");
    };
    assert_eq!(sdt.content.len(), 4);

    let BodyElement::Paragraph(title) = &sdt.content[0] else {
        panic!("title paragraph missing");
    };
    assert_eq!(title.plain_text(), "Table of Contents");

    let BodyElement::Paragraph(entry) = &sdt.content[2] else {
        panic!("entry paragraph missing");
    };
    assert_eq!(
        entry.properties.as_ref().and_then(|p| p.style.as_deref()),
        Some("TOC1")
    );
    let instructions: Vec<&str> = entry
        .runs
        .iter()
        .filter_map(|r| r.instr_text.as_deref())
        .collect();
    assert!(instructions.iter().any(|i| i.contains("HYPERLINK")));
    assert!(instructions.iter().any(|i| i.contains("PAGEREF _Toc_overview")));
    // The literal field result is the estimated page.
    assert!(entry.runs.iter().any(|r| r.text == "1"));
}

#[test]
fn plain_toc_has_no_fields() {
    let mut doc = Document::new();
    doc.add_heading("概述", 1);
    let config = TocConfig {
        show_page_numbers: false,
        use_hyperlinks: false,
        ..TocConfig::default()
    };
    doc.generate_toc(&config).unwrap();

    let Some(BodyElement::Sdt(sdt)) = doc.elements().last() else {
        panic!("toc block missing");
    };
    let BodyElement::Paragraph(entry) = &sdt.content[2] else {
        panic!("entry paragraph missing");
    };
    assert!(entry.runs.iter().all(|r| r.field.is_none() && r.instr_text.is_none()));
    assert_eq!(entry.plain_text(), "概述");
}

#[test]
fn bookmark_fallback_is_a_stable_function_of_text() {
    let mut doc = Document::new();
    doc.add_heading("Hello World", 1);
    let entries = doc.collect_headings(3, None, 0);
    assert_eq!(entries[0].bookmark, "_Toc_Hello_World");

    let again = doc.collect_headings(3, None, 0);
    assert_eq!(entries, again);
}

#[test]
fn unmatched_bookmark_end_clears_the_pending_anchor() {
    let mut doc = Document::new();
    doc.push(BodyElement::BookmarkStart(BookmarkStart {
        id: "0".to_string(),
        name: "orphan_anchor".to_string(),
    }));
    doc.push(BodyElement::BookmarkEnd(BookmarkEnd {
        id: "0".to_string(),
    }));
    doc.add_heading("孤立标题", 1);

    let entries = doc.collect_headings(3, None, 0);
    assert_eq!(entries[0].bookmark, "_Toc_孤立标题");
}

#[test]
fn pending_bookmark_is_consumed_by_the_next_heading() {
    let mut doc = Document::new();
    doc.push(BodyElement::BookmarkStart(BookmarkStart {
        id: "0".to_string(),
        name: "section_anchor".to_string(),
    }));
    doc.add_heading("被标记标题", 1);
    doc.add_heading("后续标题", 1);

    let entries = doc.collect_headings(3, None, 0);
    assert_eq!(entries[0].bookmark, "section_anchor");
    // Consumed once, never reused.
    assert_eq!(entries[1].bookmark, "_Toc_后续标题");
}

#[test]
fn headings_with_empty_text_are_skipped() {
    let mut doc = Document::new();
    doc.add_heading("", 1);
    doc.add_heading("有内容", 1);
    let entries = doc.collect_headings(3, None, 0);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "有内容");
}

#[test]
fn document_xml_contains_expected_markup() {
    let (mut doc, toc_index) = common::report_document();
    doc.generate_toc_at(&TocConfig::default(), toc_index).unwrap();
    let xml = doc.to_document_xml().unwrap();

    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<w:document"));
    assert!(xml.contains("<w:sdt>"));
    assert!(xml.contains("w:bookmarkStart"));
    assert!(xml.contains("PAGEREF"));
    assert!(xml.contains("<w:sectPr>"));
    assert!(xml.contains("landscape"));
    assert!(xml.contains("w:vMerge"));
    assert!(xml.contains("w:trHeight"));
    assert!(xml.contains("w:headerReference"));
}

#[test]
fn document_xml_escapes_text_content() {
    let mut doc = Document::new();
    doc.add_paragraph("A<B&C");
    let xml = doc.to_document_xml().unwrap();
    assert!(xml.contains("A&lt;B&amp;C"));
}
