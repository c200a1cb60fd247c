//! Structured document tags and TOC materialization.
//!
//! A generated TOC is one SDT block: a title paragraph, a `TOC` field
//! opening, one entry paragraph per heading, and a closing field-end
//! paragraph. Entries are `HYPERLINK` fields around the heading text plus a
//! `PAGEREF` field whose literal result is the estimated page number, so
//! the document shows usable numbers immediately and a field update in
//! Word replaces them with exact ones.

use crate::model::{
    BodyElement, FieldCharType, Indentation, Justification, Paragraph, ParagraphProperties, Run,
    RunProperties, Spacing, TabAlignment, TabLeader, TabStop,
};
use crate::styles;
use crate::toc::{TocConfig, TocEntry};

/// Tab stop position for right-aligned page numbers, twips.
const PAGE_NUMBER_TAB_POS: &str = "8640";

#[derive(Clone, Debug)]
pub struct SdtProperties {
    pub id: String,
    /// `w:docPartGallery` value marking the block's role.
    pub gallery: Option<String>,
}

/// `w:sdt` block: properties plus nested body content.
#[derive(Clone, Debug)]
pub struct Sdt {
    pub properties: SdtProperties,
    pub content: Vec<BodyElement>,
}

/// Build the complete TOC block from collected entries.
pub(crate) fn build_toc(config: &TocConfig, entries: &[TocEntry]) -> Sdt {
    let mut content: Vec<BodyElement> = Vec::with_capacity(entries.len() + 3);

    content.push(BodyElement::Paragraph(title_paragraph(&config.title)));
    content.push(BodyElement::Paragraph(field_open_paragraph(config)));
    for entry in entries {
        content.push(BodyElement::Paragraph(entry_paragraph(entry, config)));
    }
    content.push(BodyElement::Paragraph(field_close_paragraph()));

    Sdt {
        properties: SdtProperties {
            id: "147476628".to_string(),
            gallery: Some("Table of Contents".to_string()),
        },
        content,
    }
}

fn title_paragraph(title: &str) -> Paragraph {
    let mut paragraph = Paragraph::text(title);
    let properties = paragraph
        .set_alignment(Justification::Center)
        .properties_mut();
    properties.spacing = Some(Spacing {
        before: Some("0".to_string()),
        after: Some("0".to_string()),
        line: Some("240".to_string()),
    });
    properties.indentation = Some(Indentation {
        left: Some("0".to_string()),
        right: Some("0".to_string()),
        first_line: Some("0".to_string()),
    });
    paragraph
}

/// Opening paragraph of the `TOC` field: begin, instruction, separate.
fn field_open_paragraph(config: &TocConfig) -> Paragraph {
    Paragraph {
        properties: None,
        runs: vec![
            Run::field(FieldCharType::Begin),
            Run::instr(&format!(" {} ", config.field_instruction())),
            Run::field(FieldCharType::Separate),
        ],
    }
}

fn field_close_paragraph() -> Paragraph {
    Paragraph {
        properties: None,
        runs: vec![Run::field(FieldCharType::End)],
    }
}

fn entry_paragraph(entry: &TocEntry, config: &TocConfig) -> Paragraph {
    let mut properties = ParagraphProperties {
        style: Some(styles::toc_style_id(entry.level)),
        ..ParagraphProperties::default()
    };
    if config.show_page_numbers && config.right_align_page_numbers {
        properties.tabs.push(TabStop {
            alignment: TabAlignment::Right,
            leader: if config.dot_leader {
                Some(TabLeader::Dot)
            } else {
                None
            },
            position: PAGE_NUMBER_TAB_POS.to_string(),
        });
    }

    let mut runs = Vec::new();
    if config.use_hyperlinks {
        runs.push(Run::field(FieldCharType::Begin));
        runs.push(Run::instr(&format!(
            " HYPERLINK \\l \"{}\" ",
            entry.bookmark
        )));
        runs.push(Run::field(FieldCharType::Separate));
    }

    runs.push(Run::styled(
        &entry.text,
        RunProperties::default().with_size_pt(11.0),
    ));

    if config.show_page_numbers {
        runs.push(Run::tab());
        runs.push(Run::field(FieldCharType::Begin));
        runs.push(Run::instr(&format!(" PAGEREF {} \\h ", entry.bookmark)));
        runs.push(Run::field(FieldCharType::Separate));
        // Literal result: the estimate shown until Word recalculates.
        runs.push(Run::text(&entry.page.to_string()));
        runs.push(Run::field(FieldCharType::End));
    }

    if config.use_hyperlinks {
        runs.push(Run::field(FieldCharType::End));
    }

    Paragraph {
        properties: Some(properties),
        runs,
    }
}
