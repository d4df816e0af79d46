/// Body parts: `word/document.xml`, `word/header1.xml` and
/// `word/footer1.xml`.
use super::field::write_simple_field;
use super::run::write_run_properties;
use super::section::write_section_properties;
use super::{PartWriter, open_root};
use crate::common::xml::escape_xml;
use crate::ooxml::docx::content::ContentNode;
use crate::ooxml::docx::enums::HorizontalAlign;
use crate::ooxml::docx::header_footer::{Footer, Header};
use crate::ooxml::docx::run::RunAttributes;
use crate::ooxml::docx::settings::{PageNumbers, PageSettings};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Columns of the header layout table, in order.
const HEADER_POSITIONS: [HorizontalAlign; 3] = [
    HorizontalAlign::Left,
    HorizontalAlign::Center,
    HorizontalAlign::Right,
];

/// Header cells reach slightly past the text margins.
const HEADER_OUTDENT: i32 = -115;

/// Extra root namespaces contributed by embedded documents.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RootNamespaces<'a> {
    pub namespaces: &'a [(String, String)],
    pub ignorables: &'a [String],
}

/// Relationship ids the section properties point at.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MarginParts<'a> {
    pub header: Option<&'a str>,
    pub footer: Option<&'a str>,
}

/// Stories must close with a paragraph.
fn ends_with_paragraph(xml: &str) -> bool {
    xml.trim_end().ends_with("</w:p>")
}

fn close_story(xml: &mut String, style: &str) -> Result<()> {
    if ends_with_paragraph(xml) {
        return Ok(());
    }
    write_empty_paragraph(xml, style)
}

fn write_empty_paragraph(xml: &mut String, style: &str) -> Result<()> {
    write!(
        xml,
        r#"<w:p><w:pPr><w:pStyle w:val="{style}"/><w:bidi w:val="0"/></w:pPr></w:p>"#
    )?;
    Ok(())
}

impl PartWriter<'_> {
    /// `word/document.xml`
    pub(crate) fn document_part(
        &mut self,
        contents: &[ContentNode],
        root: RootNamespaces<'_>,
        page: &PageSettings,
        margin_parts: MarginParts<'_>,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096 + contents.len() * 256);
        open_root(&mut xml, "w:document", root.namespaces, root.ignorables)?;
        xml.push_str("<w:body>");
        self.write_nodes(&mut xml, contents)?;
        write_section_properties(&mut xml, page, margin_parts.header, margin_parts.footer)?;
        xml.push_str("</w:body></w:document>");
        log::debug!(
            "document.xml: {} nodes, {} relationships",
            contents.len(),
            self.rels.len()
        );
        Ok(xml)
    }

    /// `word/header1.xml`: the positioned content in a three-column layout
    /// table, then the unpositioned content.
    pub(crate) fn header_part(&mut self, header: &Header, root: RootNamespaces<'_>) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        open_root(&mut xml, "w:hdr", root.namespaces, root.ignorables)?;

        let column = self.content_width / HEADER_POSITIONS.len() as u32;
        xml.push_str("<w:tbl><w:tblPr>");
        xml.push_str(r#"<w:tblStyle w:val="TableNormal"/><w:bidiVisual w:val="0"/>"#);
        xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/><w:tblLayout w:type="fixed"/>"#);
        xml.push_str(
            r#"<w:tblLook w:val="06A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="1" w:noVBand="1"/>"#,
        );
        xml.push_str("</w:tblPr><w:tblGrid>");
        for _ in HEADER_POSITIONS {
            write!(xml, r#"<w:gridCol w:w="{column}"/>"#)?;
        }
        xml.push_str("</w:tblGrid><w:tr>");
        for position in HEADER_POSITIONS {
            xml.push_str("<w:tc><w:tcPr>");
            write!(xml, r#"<w:tcW w:w="{column}" w:type="dxa"/><w:vAlign w:val="top"/>"#)?;
            xml.push_str("</w:tcPr>");
            for node in header.contents_for(Some(position)) {
                self.write_node(&mut xml, node)?;
            }
            xml.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Header"/><w:bidi w:val="0"/>"#);
            write!(xml, r#"<w:jc w:val="{}"/>"#, position.as_str())?;
            if position != HorizontalAlign::Center {
                write!(xml, r#"<w:ind w:{}="{HEADER_OUTDENT}"/>"#, position.as_str())?;
            }
            xml.push_str("</w:pPr></w:p></w:tc>");
        }
        xml.push_str("</w:tr></w:tbl>");

        for node in header.contents_for(None) {
            self.write_node(&mut xml, node)?;
        }
        close_story(&mut xml, "Header")?;
        xml.push_str("</w:hdr>");
        Ok(xml)
    }

    /// `word/footer1.xml`: the footer content followed by the page number
    /// paragraph when page numbers are shown.
    pub(crate) fn footer_part(
        &mut self,
        footer: &Footer,
        numbers: &PageNumbers,
        root: RootNamespaces<'_>,
    ) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        open_root(&mut xml, "w:ftr", root.namespaces, root.ignorables)?;
        self.write_nodes(&mut xml, footer.contents())?;
        if numbers.show {
            write_page_number(&mut xml, numbers)?;
        }
        close_story(&mut xml, "Footer")?;
        xml.push_str("</w:ftr>");
        Ok(xml)
    }
}

fn write_page_number(xml: &mut String, numbers: &PageNumbers) -> Result<()> {
    xml.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Footer"/><w:contextualSpacing w:val="0"/>"#);
    write!(xml, r#"<w:jc w:val="{}"/></w:pPr>"#, numbers.align.as_str())?;
    if let Some(label) = &numbers.label {
        let attrs = RunAttributes {
            size: numbers.label_size,
            ..RunAttributes::default()
        };
        xml.push_str("<w:r>");
        write_run_properties(xml, &attrs, true)?;
        write!(xml, r#"<w:t xml:space="preserve">{} </w:t></w:r>"#, escape_xml(label))?;
    }
    let attrs = RunAttributes {
        size: numbers.number_size,
        ..RunAttributes::default()
    };
    write_simple_field(xml, "PAGE", &attrs)?;
    xml.push_str("</w:p>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::image::Image;
    use crate::ooxml::docx::paragraph::Paragraph;
    use crate::ooxml::docx::relationship::RelationshipRegistry;
    use crate::ooxml::docx::styles::StyleRegistry;
    use crate::ooxml::opc::constants::namespace;

    fn children<'a>(node: roxmltree::Node<'a, 'a>) -> Vec<&'a str> {
        node.children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name())
            .collect()
    }

    #[test]
    fn test_document_part_ends_with_section() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut writer = PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360);
        let contents: Vec<ContentNode> = vec![
            Paragraph::new("Hello").into(),
            ContentNode::PageBreak,
            Paragraph::new("World").into(),
        ];
        let margin_parts = MarginParts {
            header: None,
            footer: Some("rId7"),
        };
        let xml = writer
            .document_part(&contents, RootNamespaces::default(), &PageSettings::default(), margin_parts)
            .unwrap();

        let doc = roxmltree::Document::parse(&xml).unwrap();
        let body = doc.root_element().first_element_child().unwrap();
        assert_eq!(children(body), vec!["p", "p", "p", "sectPr"]);
        assert!(xml.contains(r#"<w:footerReference r:id="rId7" w:type="default"/>"#));
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
    }

    #[test]
    fn test_header_layout_table() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut header = Header::new();
        header
            .push(Some(HorizontalAlign::Right), Paragraph::new("Confidential").into())
            .unwrap();
        header.push(None, ContentNode::PageBreak).unwrap();
        header
            .push(
                Some(HorizontalAlign::Left),
                Image::from_bytes("logo.png", vec![0x89, b'P', b'N', b'G']).into(),
            )
            .unwrap();

        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).for_margin_part("Header");
        let xml = writer.header_part(&header, RootNamespaces::default()).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "hdr");
        assert_eq!(children(root), vec!["tbl", "p"]);

        let cells: Vec<_> = root.descendants().filter(|n| n.tag_name().name() == "tc").collect();
        assert_eq!(cells.len(), 3);
        assert!(cells[0].descendants().any(|n| n.tag_name().name() == "drawing"));
        assert!(
            cells[2]
                .descendants()
                .any(|n| n.text() == Some("Confidential"))
        );
        assert!(xml.contains(r#"<w:gridCol w:w="3120"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="-115"/>"#));
        assert!(xml.contains(r#"<w:ind w:right="-115"/>"#));
        assert!(!xml.contains(r#"w:type="page""#));
        assert!(xml.contains(r#"<w:pStyle w:val="Header"/>"#));
    }

    #[test]
    fn test_footer_page_number_paragraph() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut footer = Footer::new();
        footer.push(Paragraph::new("Acme Corp").into()).unwrap();
        let numbers = PageNumbers::new()
            .show(true)
            .align(HorizontalAlign::Right)
            .label("Page")
            .label_size(18)
            .number_size(22);

        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).for_margin_part("Footer");
        let xml = writer
            .footer_part(&footer, &numbers, RootNamespaces::default())
            .unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let paragraphs: Vec<_> = doc
            .root_element()
            .children()
            .filter(|n| n.tag_name().name() == "p")
            .collect();
        assert_eq!(paragraphs.len(), 2);
        let number = paragraphs[1];
        let texts: Vec<&str> = number
            .descendants()
            .filter_map(|n| match n.tag_name().name() {
                "t" | "instrText" => n.text(),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Page ", "PAGE"]);
        assert!(xml.contains(r#"<w:jc w:val="right"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="18"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        assert_eq!(
            doc.root_element().lookup_namespace_uri(Some("w")),
            Some(namespace::WML_MAIN)
        );
    }

    #[test]
    fn test_empty_footer_gets_placeholder() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).for_margin_part("Footer");
        let xml = writer
            .footer_part(&Footer::new(), &PageNumbers::new(), RootNamespaces::default())
            .unwrap();
        assert!(xml.contains(r#"<w:p><w:pPr><w:pStyle w:val="Footer"/><w:bidi w:val="0"/></w:pPr></w:p>"#));
        assert!(!xml.contains("PAGE"));
    }

    #[test]
    fn test_dropped_page_breaks_still_close_the_story() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut header = Header::new();
        header.push(None, ContentNode::PageBreak).unwrap();
        let mut footer = Footer::new();
        footer.push(ContentNode::PageBreak).unwrap();

        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).for_margin_part("Header");
        let xml = writer.header_part(&header, RootNamespaces::default()).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        assert_eq!(children(doc.root_element()), vec!["tbl", "p"]);

        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).for_margin_part("Footer");
        let xml = writer
            .footer_part(&footer, &PageNumbers::new(), RootNamespaces::default())
            .unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        assert_eq!(children(doc.root_element()), vec!["p"]);
        assert!(!xml.contains(r#"w:type="page""#));
    }

    #[test]
    fn test_footer_ending_in_table_gets_paragraph() {
        use crate::ooxml::docx::table::Table;

        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut footer = Footer::new();
        footer.push(Table::from_rows([["a", "b"]]).into()).unwrap();

        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).for_margin_part("Footer");
        let xml = writer
            .footer_part(&footer, &PageNumbers::new(), RootNamespaces::default())
            .unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        assert_eq!(children(doc.root_element()), vec!["tbl", "p"]);
    }
}
