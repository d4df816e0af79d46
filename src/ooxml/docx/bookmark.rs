/// Bookmark id allocation.
///
/// Bookmark ids are assigned when content is added to a document part so the
/// tree never holds an unnumbered marker at render time. Ids count up from 1
/// within one part; an end marker without an id closes the most recently
/// opened bookmark, which may have been opened by an earlier node.
use super::content::ContentNode;
use super::list::List;
use super::run::{Bookmark, Run};
use crate::ooxml::error::{OoxmlError, Result};

/// Per-part bookmark counter and the stack of open bookmarks.
#[derive(Debug, Clone, Default)]
pub struct BookmarkIds {
    next: u32,
    open: Vec<u32>,
}

impl BookmarkIds {
    pub fn new() -> Self {
        Self { next: 1, open: Vec::new() }
    }

    /// Reserve a fresh id.
    pub fn allocate(&mut self) -> u32 {
        let id = self.next.max(1);
        self.next = id + 1;
        id
    }

    /// Bookmarks opened but not yet closed.
    pub fn open(&self) -> &[u32] {
        &self.open
    }

    /// Number every bookmark marker inside `node`, in document order.
    pub fn assign(&mut self, node: &mut ContentNode) -> Result<()> {
        match node {
            ContentNode::Paragraph(para) => self.assign_runs(&mut para.runs),
            ContentNode::Bookmark(bookmark) => self.assign_marker(bookmark),
            ContentNode::List(list) => self.assign_list(list),
            ContentNode::Table(table) => {
                for cell in table.rows.iter_mut().flatten() {
                    for child in &mut cell.contents {
                        self.assign(child)?;
                    }
                }
                Ok(())
            },
            ContentNode::Image(_)
            | ContentNode::TableOfContents(_)
            | ContentNode::Rule(_)
            | ContentNode::PageBreak
            | ContentNode::IFrame(_)
            | ContentNode::RawXml(_) => Ok(()),
        }
    }

    fn assign_list(&mut self, list: &mut List) -> Result<()> {
        for item in &mut list.items {
            self.assign_runs(&mut item.paragraph.runs)?;
            if let Some(nested) = item.nested.as_mut() {
                self.assign_list(nested)?;
            }
        }
        Ok(())
    }

    fn assign_runs(&mut self, runs: &mut [Run]) -> Result<()> {
        for run in runs {
            if let Run::Bookmark(bookmark) = run {
                self.assign_marker(bookmark)?;
            }
        }
        Ok(())
    }

    fn assign_marker(&mut self, bookmark: &mut Bookmark) -> Result<()> {
        match bookmark {
            Bookmark::Start { id, .. } => {
                let value = match *id {
                    Some(value) => {
                        self.next = self.next.max(value + 1);
                        value
                    },
                    None => self.allocate(),
                };
                *id = Some(value);
                self.open.push(value);
            },
            Bookmark::End { id: Some(value) } => {
                let value = *value;
                self.open.retain(|open| *open != value);
            },
            Bookmark::End { id } => {
                let value = self.open.pop().ok_or_else(|| {
                    OoxmlError::InvalidContent("bookmark end without an open bookmark".to_string())
                })?;
                *id = Some(value);
            },
        }
        Ok(())
    }
}
