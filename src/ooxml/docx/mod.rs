/// Word (.docx) document generation.
///
/// Documents are described as a tree of typed content nodes and rendered to
/// a WordprocessingML package in one pass.
///
/// # Architecture
///
/// - [`Document`]: the root; owns the body, styles, list styles, fonts, page
///   geometry, the optional header, footer and theme
/// - [`ContentNode`]: everything a body, table cell, header or footer holds
///   ([`Paragraph`], [`Table`], [`List`], [`Image`], [`TableOfContents`],
///   [`IFrame`], rules, breaks, bookmarks and raw XML)
/// - [`StyleRegistry`] and [`ListStyles`]: named formatting
/// - [`RelationshipRegistry`]: one per package part, numbering the resources
///   the part references
/// - `writer`: the XML emitters, one module per part or node kind
///
/// # Example
///
/// ```rust,no_run
/// use longan::ooxml::docx::{Document, HorizontalAlign, List, PageNumbers, Paragraph, Table};
///
/// let mut doc = Document::new();
/// doc.push_header(Some(HorizontalAlign::Right), Paragraph::new("Internal"))?;
/// doc.set_page_numbers(PageNumbers::new().show(true).label("Page"))?;
///
/// doc.push(Paragraph::new("Release notes").style("Heading1"))?;
/// doc.push(List::unordered().item("Faster rendering").item("New table styles"))?;
/// doc.push(Table::from_rows([["Version", "Date"], ["1.2", "2025-03-01"]]))?;
///
/// doc.save("notes.docx")?;
/// # Ok::<(), longan::ooxml::error::OoxmlError>(())
/// ```
pub mod bookmark;
pub mod border;
pub mod content;
pub mod document;
pub mod enums;
pub mod fetch;
pub mod format;
pub mod header_footer;
pub mod iframe;
pub mod image;
pub mod layout;
pub mod list;
pub mod numbering;
pub(crate) mod package;
pub mod paragraph;
pub mod relationship;
pub mod run;
pub mod settings;
pub mod styles;
pub mod table;
pub mod theme;
pub mod toc;
pub(crate) mod writer;

pub use border::{Border, BorderSide, Borders, Margins, Shading, ThemeColor};
pub use content::{ContentNode, RawXml, Rule};
pub use document::Document;
pub use enums::{
    BgStyle, BorderLine, ConditionalFormatType, HorizontalAlign, LineRule, ListType, Orientation,
    RunVerticalAlign, StyleType, TabAlign, TabLeader, TableLayout, ThemeColorRef, VerticalAlign,
    Whitespace,
};
pub use fetch::{DefaultFetcher, ResourceFetcher};
pub use format::ImageFormat;
pub use header_footer::{Footer, Header};
pub use iframe::IFrame;
pub use image::{Image, ImageSource};
pub use list::{List, ListItem};
pub use numbering::{ListStyle, ListStyles};
pub use paragraph::{IndentSide, Paragraph, TabStop};
pub use relationship::{Relationship, RelationshipRegistry, RelationshipType};
pub use run::{Bookmark, FieldRun, LinkRun, Run, RunAttributes, TextRun};
pub use settings::{PageMargins, PageNumbers, PageSettings, RenderOptions};
pub use styles::{Style, StyleRegistry};
pub use table::{CellFormat, Table, TableCell, TableLook};
pub use theme::{Theme, ThemeSlot};
pub use toc::TableOfContents;
