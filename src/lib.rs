//! docweave composes WordprocessingML (DOCX) document bodies in memory:
//! paragraphs, runs, tables, sections, bookmarks, and an auto-generated
//! table of contents.
//!
//! The TOC page numbers are *estimated*: a single pass walks the body
//! elements, tracks page geometry across section breaks (orientation,
//! margins, numbering restarts) and accumulates estimated content heights,
//! so a generated document shows usable page numbers before Word
//! recalculates exact pagination. True layout fidelity is explicitly not
//! attempted.
//!
//! ```
//! use docweave::{Document, TocConfig};
//!
//! let mut doc = Document::new();
//! doc.add_paragraph("Contents"); // placeholder the TOC will replace
//! let toc_at = doc.elements().len() - 1;
//! doc.add_page_break();
//! doc.add_heading_with_bookmark("Introduction", 1, "_Toc_intro");
//! doc.add_paragraph("Body text.");
//! doc.generate_toc_at(&TocConfig::default(), toc_at).unwrap();
//! let xml = doc.to_document_xml().unwrap();
//! assert!(xml.contains("PAGEREF _Toc_intro"));
//! ```

pub mod document;
pub mod error;
pub mod estimate;
pub mod geometry;
pub mod model;
mod pagination;
pub mod sdt;
pub mod styles;
pub mod toc;
mod xml;

pub use document::{Document, PageSettings, Paper, SectionBreakOptions, TableConfig};
pub use error::{Error, Result};
pub use model::{BodyElement, Justification, Orientation, RowHeightRule};
pub use toc::{TocConfig, TocEntry};
