/// Hyperlink emitter.
///
/// External links register a hyperlink relationship in the part being
/// written and point at it by `r:id`; internal links name a bookmark
/// through `w:anchor`.
use super::PartWriter;
use super::run::write_run_properties;
use crate::common::xml::escape_xml;
use crate::ooxml::docx::relationship::RelationshipType;
use crate::ooxml::docx::run::{LinkRun, RunAttributes};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

impl PartWriter<'_> {
    pub(crate) fn write_link(&mut self, xml: &mut String, link: &LinkRun, inherited: &RunAttributes) -> Result<()> {
        if link.is_external() {
            let r_id = self
                .rels
                .register(RelationshipType::Link, link.href.as_str(), None)
                .r_id();
            write!(xml, r#"<w:hyperlink r:id="{r_id}" w:history="1">"#)?;
        } else {
            write!(
                xml,
                r#"<w:hyperlink w:anchor="{}" w:history="1">"#,
                escape_xml(&link.href)
            )?;
        }
        let attrs = link.attributes.merged(inherited);
        xml.push_str("<w:r>");
        write_run_properties(xml, &attrs, true)?;
        write!(
            xml,
            r#"<w:t xml:space="preserve">{}</w:t>"#,
            escape_xml(&link.content)
        )?;
        xml.push_str("</w:r></w:hyperlink>");
        Ok(())
    }
}
