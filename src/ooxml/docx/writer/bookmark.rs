/// Bookmark marker emitter.
use super::PartWriter;
use crate::common::xml::escape_xml;
use crate::ooxml::docx::run::Bookmark;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

impl PartWriter<'_> {
    pub(crate) fn write_bookmark(&mut self, xml: &mut String, bookmark: &Bookmark) -> Result<()> {
        let id = bookmark.id().ok_or_else(|| {
            OoxmlError::FormatInvariant("bookmark reached the writer without an id".to_string())
        })?;
        match bookmark {
            Bookmark::Start { name, .. } => write!(
                xml,
                r#"<w:bookmarkStart w:id="{id}" w:name="{}"/>"#,
                escape_xml(name)
            )?,
            Bookmark::End { .. } => write!(xml, r#"<w:bookmarkEnd w:id="{id}"/>"#)?,
        }
        Ok(())
    }
}
