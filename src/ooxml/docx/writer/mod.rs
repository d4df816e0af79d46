//! XML emitters for the WordprocessingML parts.
//!
//! Body content (document, header and footer) is written by a [`PartWriter`],
//! which carries the per-part state the emitters share: the relationship
//! registry images and links register in, the list instances created so
//! far and the headings a table of contents points at. The emitters for
//! each node kind live in their own module as `impl PartWriter` blocks.
//!
//! Package-level parts (styles, settings, font table, relationships, theme)
//! have standalone writers.

pub(crate) mod body;
pub(crate) mod bookmark;
pub(crate) mod doc;
pub(crate) mod field;
pub(crate) mod hyperlink;
pub(crate) mod image;
pub(crate) mod paragraph;
pub(crate) mod relmap;
pub(crate) mod run;
pub(crate) mod section;
pub(crate) mod style;
pub(crate) mod table;
pub(crate) mod theme;
pub(crate) mod toc;

use crate::common::xml::escape_xml;
use crate::ooxml::docx::border::{Border, Shading, ThemeColor};
use crate::ooxml::docx::enums::{BgStyle, ListType};
use crate::ooxml::docx::numbering::ListStyles;
use crate::ooxml::docx::relationship::RelationshipRegistry;
use crate::ooxml::docx::styles::{DEFAULT_STYLE_BASE, StyleRegistry};
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;

pub(crate) use toc::Heading;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Shared state while writing the body of one part.
pub(crate) struct PartWriter<'a> {
    pub styles: &'a StyleRegistry,
    /// Registry of the part being written
    pub rels: &'a mut RelationshipRegistry,
    /// List kind of every numbering instance created so far, across parts
    pub lists: &'a mut Vec<ListType>,
    /// Indentation of list items; built-in levels when unset
    pub list_styles: Option<&'a ListStyles>,
    pub headings: &'a [Heading],
    /// Width available to body content in twips
    pub content_width: u32,
    /// Headers and footers drop page breaks
    pub page_breaks: bool,
    /// Style of paragraphs that name none
    pub paragraph_style: &'static str,
    /// Last `wp:docPr` id handed out in this part
    pub drawing_id: u32,
    /// Embedded documents written so far in this part
    pub iframes: u32,
}

impl<'a> PartWriter<'a> {
    pub fn new(
        styles: &'a StyleRegistry,
        rels: &'a mut RelationshipRegistry,
        lists: &'a mut Vec<ListType>,
        headings: &'a [Heading],
        content_width: u32,
    ) -> Self {
        Self {
            styles,
            rels,
            lists,
            list_styles: None,
            headings,
            content_width,
            page_breaks: true,
            paragraph_style: DEFAULT_STYLE_BASE,
            drawing_id: 0,
            iframes: 0,
        }
    }

    pub fn with_list_styles(mut self, list_styles: &'a ListStyles) -> Self {
        self.list_styles = Some(list_styles);
        self
    }

    /// Writer for a header or footer: page breaks are dropped and
    /// unstyled paragraphs use `paragraph_style`.
    pub fn for_margin_part(mut self, paragraph_style: &'static str) -> Self {
        self.page_breaks = false;
        self.paragraph_style = paragraph_style;
        self
    }
}

/// Open a part root element declaring the WordprocessingML namespaces plus
/// `extra`, and the `mc:Ignorable` list when non-empty.
pub(crate) fn open_root(
    xml: &mut String,
    tag: &str,
    extra: &[(String, String)],
    ignorables: &[String],
) -> Result<()> {
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    write!(xml, "<{tag}")?;
    for (prefix, uri) in namespace::WML_ROOT {
        write!(xml, r#" xmlns:{prefix}="{uri}""#)?;
    }
    for (prefix, uri) in extra {
        if namespace::WML_ROOT.iter().any(|(p, _)| p == prefix) {
            continue;
        }
        write!(xml, r#" xmlns:{prefix}="{}""#, escape_xml(uri))?;
    }
    if !ignorables.is_empty() {
        write!(xml, r#" mc:Ignorable="{}""#, ignorables.join(" "))?;
    }
    xml.push('>');
    Ok(())
}

/// Theme colour attributes; `prefix` selects `themeColor` or `themeFill`.
fn write_theme_attributes(xml: &mut String, theme: &ThemeColor, prefix: &str) -> Result<()> {
    write!(xml, r#" w:{prefix}="{}""#, theme.reference.as_str())?;
    if let Some(tint) = &theme.tint {
        write!(xml, r#" w:{prefix}Tint="{}""#, escape_xml(tint))?;
    }
    if let Some(shade) = &theme.shade {
        write!(xml, r#" w:{prefix}Shade="{}""#, escape_xml(shade))?;
    }
    Ok(())
}

/// `w:shd`. A `clear` pattern shows the fill, every other pattern is drawn in
/// the pattern colour over an automatic fill.
pub(crate) fn write_shading(xml: &mut String, shading: &Shading) -> Result<()> {
    if !shading.is_visible() {
        return Ok(());
    }
    let style = shading.style.unwrap_or(BgStyle::Solid);
    let clear = style == BgStyle::Clear;
    write!(xml, r#"<w:shd w:val="{style}""#)?;
    match (&shading.theme_color, &shading.color) {
        (Some(theme), _) if clear => {
            write!(xml, r#" w:color="auto" w:fill="{}""#, escape_xml(&theme.color))?;
            write_theme_attributes(xml, theme, "themeFill")?;
        },
        (Some(theme), _) => {
            write!(xml, r#" w:color="{}" w:fill="auto""#, escape_xml(&theme.color))?;
            write_theme_attributes(xml, theme, "themeColor")?;
        },
        (None, Some(color)) if clear => {
            write!(xml, r#" w:color="auto" w:fill="{}""#, escape_xml(color))?;
        },
        (None, Some(color)) => {
            write!(xml, r#" w:color="{}" w:fill="auto""#, escape_xml(color))?;
        },
        (None, None) => {},
    }
    xml.push_str("/>");
    Ok(())
}

/// One border element such as `<w:top .../>`.
pub(crate) fn write_border(xml: &mut String, element: &str, border: &Border) -> Result<()> {
    let line = border.line.map(|line| line.as_str()).unwrap_or("nil");
    write!(
        xml,
        r#"<w:{element} w:val="{line}" w:sz="{}" w:space="{}""#,
        border.size, border.spacing
    )?;
    match &border.theme_color {
        Some(theme) => {
            write!(xml, r#" w:color="{}""#, escape_xml(&theme.color))?;
            write_theme_attributes(xml, theme, "themeColor")?;
        },
        None => write!(xml, r#" w:color="{}""#, escape_xml(&border.color))?,
    }
    xml.push_str("/>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::{BorderLine, ThemeColorRef};

    #[test]
    fn test_shading_patterns() {
        let mut xml = String::new();
        write_shading(&mut xml, &Shading::color("FFEEAA")).unwrap();
        assert_eq!(xml, r#"<w:shd w:val="solid" w:color="FFEEAA" w:fill="auto"/>"#);

        xml.clear();
        write_shading(&mut xml, &Shading::color("FFEEAA").style(BgStyle::Clear)).unwrap();
        assert_eq!(xml, r#"<w:shd w:val="clear" w:color="auto" w:fill="FFEEAA"/>"#);

        xml.clear();
        let theme = ThemeColor::new(ThemeColorRef::Accent1).tint("99");
        write_shading(&mut xml, &Shading::theme(theme).style(BgStyle::Clear)).unwrap();
        assert!(xml.contains(r#"w:themeFill="accent1""#));
        assert!(xml.contains(r#"w:themeFillTint="99""#));

        xml.clear();
        write_shading(&mut xml, &Shading::color("none")).unwrap();
        assert!(xml.is_empty());
    }

    #[test]
    fn test_border_element() {
        let mut xml = String::new();
        let border = Border::new(BorderLine::Single).color("999999").size(4).spacing(1);
        write_border(&mut xml, "top", &border).unwrap();
        assert_eq!(
            xml,
            r#"<w:top w:val="single" w:sz="4" w:space="1" w:color="999999"/>"#
        );
    }

    #[test]
    fn test_root_merges_extra_namespaces() {
        let mut xml = String::new();
        let extra = vec![
            ("w14".to_string(), "http://schemas.microsoft.com/office/word/2010/wordml".to_string()),
            ("w".to_string(), namespace::WML_MAIN.to_string()),
        ];
        open_root(&mut xml, "w:document", &extra, &["w14".to_string()]).unwrap();
        xml.push_str("</w:document>");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert_eq!(root.lookup_namespace_uri(Some("w14")), Some(extra[0].1.as_str()));
        assert_eq!(xml.matches("xmlns:w=").count(), 1);
        assert!(xml.contains(r#"mc:Ignorable="w14""#));
    }
}
