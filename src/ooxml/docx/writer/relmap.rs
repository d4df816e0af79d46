/// Relationship part writers (`_rels/.rels` and the per-part `.rels`).
use super::XML_DECLARATION;
use crate::common::xml::escape_xml;
use crate::ooxml::docx::relationship::RelationshipRegistry;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{namespace, relationship_type as rt, target_mode};
use std::fmt::Write as FmtWrite;

/// Package-level relationships: the main document and the three property
/// parts, with fixed ids.
const PACKAGE_RELATIONSHIPS: [(&str, &str); 4] = [
    (rt::OFFICE_DOCUMENT, "word/document.xml"),
    (rt::CORE_PROPERTIES, "docProps/core.xml"),
    (rt::EXTENDED_PROPERTIES, "docProps/app.xml"),
    (rt::CUSTOM_PROPERTIES, "docProps/custom.xml"),
];

fn open_relationships(xml: &mut String) -> Result<()> {
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS)?;
    Ok(())
}

/// `_rels/.rels`
pub(crate) fn package_rels_xml() -> Result<String> {
    let mut xml = String::with_capacity(1024);
    open_relationships(&mut xml)?;
    for (id, (rel_type, target)) in (1..).zip(PACKAGE_RELATIONSHIPS) {
        write!(
            xml,
            r#"<Relationship Id="rId{id}" Type="{rel_type}" Target="{target}"/>"#
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

/// Relationships part for the registry of one part. Hyperlinks are marked
/// external.
pub(crate) fn part_rels_xml(registry: &RelationshipRegistry) -> Result<String> {
    let mut xml = String::with_capacity(256 + registry.len() * 160);
    open_relationships(&mut xml)?;
    for rel in registry.iter() {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="{}""#,
            rel.r_id(),
            rel.rel_type.uri(),
            escape_xml(&rel.formatted_target())
        )?;
        if rel.is_external() {
            write!(xml, r#" TargetMode="{}""#, target_mode::EXTERNAL)?;
        }
        xml.push_str("/>");
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::relationship::RelationshipType;

    #[test]
    fn test_package_relationships() {
        let xml = package_rels_xml().unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let rels: Vec<(&str, &str)> = doc
            .descendants()
            .filter(|n| n.tag_name().name() == "Relationship")
            .map(|n| (n.attribute("Id").unwrap(), n.attribute("Target").unwrap()))
            .collect();
        assert_eq!(
            rels,
            vec![
                ("rId1", "word/document.xml"),
                ("rId2", "docProps/core.xml"),
                ("rId3", "docProps/app.xml"),
                ("rId4", "docProps/custom.xml"),
            ]
        );
    }

    #[test]
    fn test_part_relationships_targets() {
        let mut registry = RelationshipRegistry::new();
        registry.register(RelationshipType::Style, "styles.xml", None);
        registry.register(RelationshipType::Link, "https://example.com/?a=1&b=2", None);
        registry.register(RelationshipType::Image, "photo.jpeg", None);

        let xml = part_rels_xml(&registry).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let nodes: Vec<_> = doc
            .descendants()
            .filter(|n| n.tag_name().name() == "Relationship")
            .collect();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].attribute("Target"), Some("https://example.com/?a=1&b=2"));
        assert_eq!(nodes[1].attribute("TargetMode"), Some("External"));
        assert_eq!(nodes[2].attribute("Target"), Some("media/image3.jpeg"));
        assert_eq!(nodes[2].attribute("TargetMode"), None);
    }
}
