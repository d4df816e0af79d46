/// Block-level dispatch: every [`ContentNode`] kind, plus lists and
/// embedded documents.
use super::PartWriter;
use super::run::write_run_properties;
use crate::common::xml::escape_xml;
use crate::ooxml::docx::content::ContentNode;
use crate::ooxml::docx::enums::ListType;
use crate::ooxml::docx::iframe::IFrame;
use crate::ooxml::docx::list::List;
use crate::ooxml::docx::numbering::ListStyle;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::relationship::RelationshipType;
use crate::ooxml::error::Result;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

impl PartWriter<'_> {
    pub(crate) fn write_nodes(&mut self, xml: &mut String, nodes: &[ContentNode]) -> Result<()> {
        nodes.iter().try_for_each(|node| self.write_node(xml, node))
    }

    pub(crate) fn write_node(&mut self, xml: &mut String, node: &ContentNode) -> Result<()> {
        match node {
            ContentNode::Paragraph(para) => self.write_paragraph(xml, para),
            ContentNode::Image(image) => self.write_image(xml, image),
            ContentNode::Table(table) => self.write_table(xml, table),
            ContentNode::List(list) => self.write_list(xml, list),
            ContentNode::TableOfContents(toc) => self.write_toc(xml, toc),
            ContentNode::Rule(rule) => self.write_rule(xml, rule),
            ContentNode::PageBreak => {
                self.write_page_break(xml);
                Ok(())
            },
            ContentNode::IFrame(iframe) => self.write_iframe(xml, iframe),
            ContentNode::Bookmark(bookmark) => self.write_bookmark(xml, bookmark),
            ContentNode::RawXml(raw) => {
                xml.push_str(raw.as_str());
                Ok(())
            },
        }
    }

    /// Write every item of `list`, nested items included, as numbered
    /// paragraphs.
    ///
    /// A top-level list opens one numbering instance per list kind it
    /// contains; nested lists of the same kind continue that instance at
    /// their own level.
    pub(crate) fn write_list(&mut self, xml: &mut String, list: &List) -> Result<()> {
        let mut instances: Vec<(ListType, usize)> = Vec::with_capacity(2);
        for (list_type, level, item) in list.recursive_items() {
            let num_id = match instances.iter().find(|(kind, _)| *kind == list_type) {
                Some(&(_, id)) => id,
                None => {
                    self.lists.push(list_type);
                    let id = self.lists.len();
                    instances.push((list_type, id));
                    id
                },
            };
            self.write_list_item(xml, &item.paragraph, list_type, level, num_id)?;
        }
        Ok(())
    }

    fn write_list_item(
        &mut self,
        xml: &mut String,
        para: &Paragraph,
        list_type: ListType,
        level: u32,
        num_id: usize,
    ) -> Result<()> {
        let builtin;
        let style = match self.list_styles.and_then(|styles| styles.find(list_type, level)) {
            Some(style) => style,
            None => {
                builtin = ListStyle::new(list_type, level);
                &builtin
            },
        };

        xml.push_str("<w:p><w:pPr>");
        if let Some(id) = &para.style {
            write!(xml, r#"<w:pStyle w:val="{}"/>"#, escape_xml(id))?;
        }
        write!(
            xml,
            r#"<w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{num_id}"/></w:numPr>"#
        )?;
        write!(
            xml,
            r#"<w:ind w:left="{}" w:hanging="{}"/>"#,
            style.left, style.indent
        )?;
        xml.push_str(r#"<w:contextualSpacing w:val="1"/>"#);
        if let Some(align) = para.attributes.align {
            write!(xml, r#"<w:jc w:val="{}"/>"#, align.as_str())?;
        }
        write_run_properties(xml, &para.run_attributes, true)?;
        xml.push_str("</w:pPr>");
        for run in &para.runs {
            self.write_run(xml, run, &para.run_attributes)?;
        }
        xml.push_str("</w:p>");
        Ok(())
    }

    /// Register the embedded pictures in this part and splice the foreign
    /// body with its picture references pointing at them.
    pub(crate) fn write_iframe(&mut self, xml: &mut String, iframe: &IFrame) -> Result<()> {
        self.iframes += 1;
        let mut ids = HashMap::with_capacity(iframe.images().len());
        for image in iframe.images() {
            let target = format!("iframe{}/{}", self.iframes, image.target);
            let rel = self
                .rels
                .register(RelationshipType::Image, target, Some(image.data.clone()));
            ids.insert(image.r_id.clone(), rel.id);
        }
        log::debug!("splicing embedded document with {} pictures", ids.len());
        xml.push_str(&iframe.render_body(&ids)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ooxml::docx::content::{ContentNode, RawXml};
    use crate::ooxml::docx::iframe::IFrame;
    use crate::ooxml::docx::list::{List, ListItem};
    use crate::ooxml::docx::numbering::{ListStyle, ListStyles};
    use crate::ooxml::docx::enums::ListType;
    use crate::ooxml::docx::relationship::RelationshipRegistry;
    use crate::ooxml::docx::styles::StyleRegistry;
    use crate::ooxml::docx::writer::PartWriter;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_each_list_restarts_numbering() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut writer = PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360);

        let first = List::ordered()
            .item(ListItem::from("a").nested(List::ordered().item("a.1")))
            .item("b");
        let second = List::ordered().item("c");
        let mut xml = String::new();
        writer.write_node(&mut xml, &first.into()).unwrap();
        writer.write_node(&mut xml, &second.into()).unwrap();

        assert_eq!(xml.matches(r#"<w:numId w:val="1"/>"#).count(), 3);
        assert_eq!(xml.matches(r#"<w:numId w:val="2"/>"#).count(), 1);
        assert!(xml.contains(r#"<w:ilvl w:val="1"/><w:numId w:val="1"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="1440" w:hanging="360"/>"#));
        assert_eq!(lists, vec![ListType::Ordered, ListType::Ordered]);
    }

    #[test]
    fn test_mixed_nested_list_gets_own_instance() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut list_styles = ListStyles::new();
        list_styles
            .register(ListStyle::new(ListType::Unordered, 1).indents(900, 300))
            .unwrap();
        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).with_list_styles(&list_styles);

        let list = List::ordered().item(ListItem::from("steps").nested(List::unordered().item("note")));
        let mut xml = String::new();
        writer.write_list(&mut xml, &list).unwrap();

        assert!(xml.contains(r#"<w:ilvl w:val="1"/><w:numId w:val="2"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="900" w:hanging="300"/>"#));
        assert_eq!(lists, vec![ListType::Ordered, ListType::Unordered]);
    }

    #[test]
    fn test_raw_xml_and_page_break_in_margin_part() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).for_margin_part("Footer");

        let nodes = vec![
            ContentNode::RawXml(RawXml::new("<w:p><w:r><w:t>raw</w:t></w:r></w:p>")),
            ContentNode::PageBreak,
        ];
        let mut xml = String::new();
        writer.write_nodes(&mut xml, &nodes).unwrap();
        assert_eq!(xml, "<w:p><w:r><w:t>raw</w:t></w:r></w:p>");
    }

    fn embedded_package() -> Vec<u8> {
        let document = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body><w:p><w:r><w:drawing><pic:pic><pic:nvPicPr><pic:cNvPr id="3" name="logo.png"/></pic:nvPicPr><pic:blipFill><a:blip r:embed="rId5"/></pic:blipFill></pic:pic></w:drawing></w:r></w:p></w:body></w:document>"#;
        let rels = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/></Relationships>"#;
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(document.as_bytes()).unwrap();
        zip.start_file("word/_rels/document.xml.rels", options).unwrap();
        zip.write_all(rels.as_bytes()).unwrap();
        zip.start_file("word/media/image1.png", options).unwrap();
        zip.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_iframe_pictures_registered_per_embed() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let iframe = IFrame::from_bytes(&embedded_package()).unwrap();
        {
            let mut writer = PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360);
            let mut xml = String::new();
            writer.write_iframe(&mut xml, &iframe).unwrap();
            writer.write_iframe(&mut xml, &iframe).unwrap();
            assert!(xml.contains(r#"r:embed="rId1""#));
            assert!(xml.contains(r#"r:embed="rId2""#));
        }
        let targets: Vec<&str> = rels.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["iframe1/logo.png", "iframe2/logo.png"]);
        assert!(rels.iter().all(|r| r.data.is_some()));
    }
}
