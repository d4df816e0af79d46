//! The document under construction.
//!
//! A [`Document`] collects content nodes, styles, list styles, fonts, page
//! geometry, an optional header, footer and theme, and the custom
//! properties. Nodes are validated and their bookmarks numbered when they
//! are added; everything layout-dependent (table widths, conditional cell
//! formatting, heading bookmarks) is computed on a copy when the document is
//! rendered, so rendering twice produces the same package.

use super::bookmark::BookmarkIds;
use super::content::ContentNode;
use super::enums::HorizontalAlign;
use super::header_footer::{FOOTER_TARGET, Footer, HEADER_TARGET, Header};
use super::iframe::IFrame;
use super::numbering::ListStyles;
use super::package;
use super::relationship::{RelationshipRegistry, RelationshipType};
use super::settings::{PageNumbers, PageSettings, RenderOptions};
use super::styles::StyleRegistry;
use super::table::CellFormat;
use super::theme::Theme;
use crate::ooxml::custom_properties::{CustomProperties, PropertyValue};
use crate::ooxml::error::Result;
use std::path::Path;

/// Fonts listed in every font table.
const DEFAULT_FONTS: [&str; 2] = ["Arial", "Trebuchet MS"];

/// Parts every main document references.
const DEFAULT_RELATIONSHIPS: [(RelationshipType, &str); 4] = [
    (RelationshipType::Font, "fontTable.xml"),
    (RelationshipType::Numbering, "numbering.xml"),
    (RelationshipType::Settings, "settings.xml"),
    (RelationshipType::Style, "styles.xml"),
];

/// A Word document being built.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::ooxml::docx::{Document, Paragraph, Table};
///
/// let mut doc = Document::new();
/// doc.push(Paragraph::new("Quarterly report").style("Title"))?;
/// doc.push(Table::from_rows([["Region", "Sales"], ["North", "1200"]]))?;
/// doc.save("report.docx")?;
/// # Ok::<(), longan::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) contents: Vec<ContentNode>,
    pub(crate) styles: StyleRegistry,
    pub(crate) list_styles: ListStyles,
    fonts: Vec<String>,
    pub(crate) page: PageSettings,
    pub(crate) page_numbers: PageNumbers,
    pub(crate) header: Option<Header>,
    pub(crate) footer: Option<Footer>,
    pub(crate) theme: Option<Theme>,
    pub(crate) custom_properties: CustomProperties,
    pub(crate) namespaces: Vec<(String, String)>,
    pub(crate) ignorables: Vec<String>,
    pub(crate) relationships: RelationshipRegistry,
    pub(crate) bookmarks: BookmarkIds,
}

impl Default for Document {
    fn default() -> Self {
        let mut relationships = RelationshipRegistry::new();
        for (rel_type, target) in DEFAULT_RELATIONSHIPS {
            relationships.register(rel_type, target, None);
        }
        Self {
            contents: Vec::new(),
            styles: StyleRegistry::with_defaults(),
            list_styles: ListStyles::default(),
            fonts: DEFAULT_FONTS.map(str::to_string).to_vec(),
            page: PageSettings::default(),
            page_numbers: PageNumbers::default(),
            header: None,
            footer: None,
            theme: None,
            custom_properties: CustomProperties::new(),
            namespaces: Vec::new(),
            ignorables: Vec::new(),
            relationships,
            bookmarks: BookmarkIds::new(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the body.
    ///
    /// The node is validated, named cell styles are checked against the
    /// style registry and bookmark markers receive their ids.
    pub fn push(&mut self, node: impl Into<ContentNode>) -> Result<()> {
        let mut node = self.prepare(node.into())?;
        self.bookmarks.assign(&mut node)?;
        self.contents.push(node);
        Ok(())
    }

    /// Append a node to the page header, optionally pinned to the left,
    /// center or right of the page.
    pub fn push_header(
        &mut self,
        position: Option<HorizontalAlign>,
        node: impl Into<ContentNode>,
    ) -> Result<()> {
        let node = self.prepare(node.into())?;
        if self.header.is_none() {
            self.relationships
                .register(RelationshipType::Header, HEADER_TARGET, None);
        }
        self.header
            .get_or_insert_with(Header::new)
            .push(position, node)
    }

    /// Append a node to the page footer.
    pub fn push_footer(&mut self, node: impl Into<ContentNode>) -> Result<()> {
        let node = self.prepare(node.into())?;
        self.footer_mut().push(node)
    }

    fn footer_mut(&mut self) -> &mut Footer {
        if self.footer.is_none() {
            self.relationships
                .register(RelationshipType::Footer, FOOTER_TARGET, None);
        }
        self.footer.get_or_insert_with(Footer::new)
    }

    fn prepare(&mut self, node: ContentNode) -> Result<ContentNode> {
        node.validate()?;
        check_cell_styles(&self.styles, &node)?;
        if let ContentNode::IFrame(iframe) = &node {
            self.merge_namespaces(iframe);
        }
        Ok(node)
    }

    /// Declare the namespaces of an embedded document on the host roots.
    /// A prefix already declared keeps its first URI.
    fn merge_namespaces(&mut self, iframe: &IFrame) {
        for (prefix, uri) in iframe.namespaces() {
            if !self.namespaces.iter().any(|(p, _)| p == prefix) {
                self.namespaces.push((prefix.clone(), uri.clone()));
            }
        }
        for prefix in iframe.ignorables() {
            if !self.ignorables.contains(prefix) {
                self.ignorables.push(prefix.clone());
            }
        }
    }

    pub fn set_page(&mut self, page: PageSettings) -> Result<()> {
        page.validate()?;
        self.page = page;
        Ok(())
    }

    pub fn page(&self) -> &PageSettings {
        &self.page
    }

    /// Configure page numbers. Showing them adds a footer if the document
    /// has none.
    pub fn set_page_numbers(&mut self, numbers: PageNumbers) -> Result<()> {
        numbers.validate()?;
        if numbers.show {
            self.footer_mut();
        }
        self.page_numbers = numbers;
        Ok(())
    }

    pub fn page_numbers(&self) -> &PageNumbers {
        &self.page_numbers
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        theme.validate()?;
        self.relationships
            .register(RelationshipType::Theme, "theme", None);
        self.theme = Some(theme);
        Ok(())
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    pub fn list_styles_mut(&mut self) -> &mut ListStyles {
        &mut self.list_styles
    }

    /// Add a font to the font table; names are compared case-insensitively.
    pub fn add_font(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.fonts.iter().any(|f| f.eq_ignore_ascii_case(&name)) {
            self.fonts.push(name);
        }
    }

    /// Fonts of the font table: the declared fonts, then every font a style
    /// uses.
    pub fn fonts(&self) -> Vec<&str> {
        let mut fonts: Vec<&str> = self.fonts.iter().map(String::as_str).collect();
        for font in self.styles.fonts() {
            if !fonts.iter().any(|f| f.eq_ignore_ascii_case(font)) {
                fonts.push(font);
            }
        }
        fonts
    }

    pub fn add_custom_property(&mut self, name: impl Into<String>, value: PropertyValue) -> Result<()> {
        self.custom_properties.add_property(name, value)
    }

    pub fn custom_properties(&self) -> &CustomProperties {
        &self.custom_properties
    }

    pub fn contents(&self) -> &[ContentNode] {
        &self.contents
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }

    /// Relationships of the main document part.
    pub fn relationships(&self) -> &RelationshipRegistry {
        &self.relationships
    }

    /// Namespaces merged from embedded documents.
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    /// Render the package with the default fetcher and metadata.
    pub fn render(&self) -> Result<Vec<u8>> {
        self.render_with(&RenderOptions::default())
    }

    pub fn render_with(&self, options: &RenderOptions) -> Result<Vec<u8>> {
        package::render(self, options)
    }

    /// Render and write the package to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &RenderOptions::default())
    }

    pub fn save_with<P: AsRef<Path>>(&self, path: P, options: &RenderOptions) -> Result<()> {
        let bytes = self.render_with(options)?;
        std::fs::write(path.as_ref(), bytes)?;
        log::info!("saved {}", path.as_ref().display());
        Ok(())
    }
}

/// Every named cell style in `node` must be a registered table-kind style.
fn check_cell_styles(styles: &StyleRegistry, node: &ContentNode) -> Result<()> {
    let ContentNode::Table(table) = node else {
        return Ok(());
    };
    for cell in table.rows.iter().flatten() {
        if let Some(style) = &cell.style {
            CellFormat::new().style(style.clone()).resolve(styles)?;
        }
        for child in &cell.contents {
            check_cell_styles(styles, child)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::paragraph::Paragraph;
    use crate::ooxml::docx::run::Bookmark;
    use crate::ooxml::docx::table::{Table, TableCell};
    use crate::ooxml::error::OoxmlError;

    #[test]
    fn test_default_relationships() {
        let doc = Document::new();
        let targets: Vec<&str> = doc.relationships().iter().map(|r| r.target.as_str()).collect();
        assert_eq!(
            targets,
            vec!["fontTable.xml", "numbering.xml", "settings.xml", "styles.xml"]
        );
        assert!(doc.header().is_none());
        assert!(doc.theme().is_none());
    }

    #[test]
    fn test_margin_parts_register_once() {
        let mut doc = Document::new();
        doc.push_header(Some(HorizontalAlign::Left), Paragraph::new("Acme"))
            .unwrap();
        doc.push_header(None, Paragraph::new("Draft")).unwrap();
        doc.set_page_numbers(PageNumbers::new().show(true)).unwrap();
        doc.push_footer(Paragraph::new("Confidential")).unwrap();
        doc.set_theme(Theme::new()).unwrap();
        doc.set_theme(Theme::new().name("Orchard")).unwrap();

        let rels = doc.relationships();
        assert_eq!(rels.by_type(RelationshipType::Header).count(), 1);
        assert_eq!(rels.by_type(RelationshipType::Footer).count(), 1);
        assert_eq!(rels.by_type(RelationshipType::Theme).count(), 1);
        assert_eq!(rels.len(), 7);
        assert_eq!(doc.footer().unwrap().contents().len(), 1);
    }

    #[test]
    fn test_push_rejects_unknown_cell_style() {
        let mut doc = Document::new();
        let table = Table::new(vec![vec![TableCell::text("x").style("Missing")]]);
        assert!(matches!(
            doc.push(table).unwrap_err(),
            OoxmlError::StyleNotFound(id) if id == "Missing"
        ));

        let table = Table::new(vec![vec![TableCell::text("x").style("Heading1")]]);
        assert!(matches!(
            doc.push(table).unwrap_err(),
            OoxmlError::InvalidStyleType { .. }
        ));
        assert!(doc.contents().is_empty());
    }

    #[test]
    fn test_bookmarks_numbered_on_push() {
        let mut doc = Document::new();
        doc.push(ContentNode::Bookmark(Bookmark::start("top"))).unwrap();
        doc.push(Paragraph::new("text").bookmark_start("inner").bookmark_end())
            .unwrap();
        doc.push(ContentNode::Bookmark(Bookmark::end())).unwrap();

        let ids: Vec<Option<u32>> = doc
            .contents()
            .iter()
            .filter_map(|node| match node {
                ContentNode::Bookmark(b) => Some(b.id()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![Some(1), Some(1)]);
    }

    #[test]
    fn test_fonts_include_style_fonts() {
        let mut doc = Document::new();
        doc.add_font("arial");
        doc.add_font("Georgia");
        let fonts = doc.fonts();
        assert_eq!(&fonts[..3], &["Arial", "Trebuchet MS", "Georgia"]);
        assert!(doc.page_numbers().validate().is_ok());
    }

    #[test]
    fn test_invalid_page_rejected() {
        let mut doc = Document::new();
        assert!(doc.set_page(PageSettings::new().size(0, 0)).is_err());
        assert_eq!(doc.page(), &PageSettings::default());
        assert!(
            doc.set_page_numbers(PageNumbers::new().show(true).align(HorizontalAlign::Both))
                .is_err()
        );
        assert!(doc.footer().is_none());
    }

    #[test]
    fn test_registries_are_editable() {
        use crate::ooxml::docx::enums::ListType;
        use crate::ooxml::docx::numbering::ListStyle;
        use crate::ooxml::docx::styles::Style;

        let mut doc = Document::new();
        doc.styles_mut().register(Style::new("Quote", "Quote")).unwrap();
        assert!(doc.styles().find("Quote").is_some());

        doc.list_styles_mut()
            .register(ListStyle::new(ListType::Ordered, 0).format("upperRoman"))
            .unwrap();
        let first = doc.list_styles_mut().find(ListType::Ordered, 0).unwrap();
        assert_eq!(first.format, "upperRoman");
    }
}
