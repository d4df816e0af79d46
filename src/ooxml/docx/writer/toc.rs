/// Table of contents emitter and heading derivation.
///
/// Headings are the top-level paragraphs styled with an outline style
/// (`Heading1` .. `Heading6`) that carry text. Each heading needs a bookmark
/// for its entry to link to; headings without one receive a `_Toc{id}`
/// bookmark around their runs. A heading that already has a bookmark keeps
/// it, so deriving bookmarks twice changes nothing.
use super::PartWriter;
use super::field::{FieldChar, write_field_char, write_instruction};
use crate::common::xml::escape_xml;
use crate::ooxml::docx::bookmark::BookmarkIds;
use crate::ooxml::docx::content::ContentNode;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::run::{Bookmark, Run, RunAttributes};
use crate::ooxml::docx::styles::StyleRegistry;
use crate::ooxml::docx::toc::TableOfContents;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// A heading a table of contents entry points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Heading {
    pub bookmark: String,
    pub text: String,
    pub level: u32,
}

fn heading_level(para: &Paragraph, styles: &StyleRegistry) -> Option<u32> {
    let level = styles.outline_level(para.style.as_deref()?)?;
    (!para.is_empty()).then_some(level)
}

/// Wrap every heading without a bookmark in a fresh `_Toc{id}` bookmark.
/// Returns the number of bookmarks added.
pub(crate) fn ensure_heading_bookmarks(
    contents: &mut [ContentNode],
    styles: &StyleRegistry,
    ids: &mut BookmarkIds,
) -> usize {
    let mut added = 0;
    for node in contents {
        let ContentNode::Paragraph(para) = node else {
            continue;
        };
        if heading_level(para, styles).is_none() || para.first_bookmark().is_some() {
            continue;
        }
        let id = ids.allocate();
        para.runs.insert(
            0,
            Run::Bookmark(Bookmark::Start {
                id: Some(id),
                name: format!("_Toc{id}"),
            }),
        );
        para.runs.push(Run::Bookmark(Bookmark::End { id: Some(id) }));
        added += 1;
    }
    added
}

/// Headings of `contents` in document order.
pub(crate) fn collect_headings(contents: &[ContentNode], styles: &StyleRegistry) -> Vec<Heading> {
    contents
        .iter()
        .filter_map(|node| match node {
            ContentNode::Paragraph(para) => Some(para),
            _ => None,
        })
        .filter_map(|para| {
            let level = heading_level(para, styles)?;
            let Some(bookmark) = para.first_bookmark() else {
                log::warn!("heading {:?} has no bookmark", para.plain_text());
                return None;
            };
            Some(Heading {
                bookmark: bookmark.to_string(),
                text: para.plain_text(),
                level,
            })
        })
        .collect()
}

impl PartWriter<'_> {
    pub(crate) fn write_toc(&mut self, xml: &mut String, toc: &TableOfContents) -> Result<()> {
        let plain = RunAttributes::new();

        xml.push_str("<w:p>");
        write_field_char(xml, FieldChar::Begin, &plain)?;
        write_instruction(xml, &toc.instruction(), &plain)?;
        write_field_char(xml, FieldChar::Separate, &plain)?;
        xml.push_str("</w:p>");

        let headings = self.headings.iter().filter(|h| toc.includes(h.level));
        for heading in headings {
            let anchor = escape_xml(&heading.bookmark);
            xml.push_str("<w:p><w:pPr>");
            write!(xml, r#"<w:pStyle w:val="TOC{}"/>"#, heading.level)?;
            write!(
                xml,
                r#"<w:tabs><w:tab w:val="right" w:leader="dot" w:pos="{}"/></w:tabs>"#,
                self.content_width
            )?;
            xml.push_str("</w:pPr>");
            write!(xml, r#"<w:hyperlink w:anchor="{anchor}" w:history="1">"#)?;
            write!(
                xml,
                r#"<w:r><w:rPr><w:rStyle w:val="Hyperlink"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
                escape_xml(&heading.text)
            )?;
            xml.push_str("<w:r><w:tab/></w:r>");
            write_field_char(xml, FieldChar::Begin, &plain)?;
            write_instruction(xml, &format!(" PAGEREF {} \\h ", heading.bookmark), &plain)?;
            write_field_char(xml, FieldChar::Separate, &plain)?;
            write_field_char(xml, FieldChar::End, &plain)?;
            xml.push_str("</w:hyperlink></w:p>");
        }

        xml.push_str("<w:p>");
        write_field_char(xml, FieldChar::End, &plain)?;
        xml.push_str("</w:p>");
        Ok(())
    }
}
