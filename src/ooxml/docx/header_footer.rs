//! Page header and footer parts.
//!
//! A document has at most one header (`word/header1.xml`) and one footer
//! (`word/footer1.xml`), both of type `default`. Each part keeps its own
//! relationship registry so an image in the header is numbered
//! independently of the body.
//!
//! Header content may be pinned to the left, center or right third of the
//! page; pinned content is laid out in a borderless three-column table
//! above the unpinned content.

use super::bookmark::BookmarkIds;
use super::content::ContentNode;
use super::enums::HorizontalAlign;
use super::relationship::RelationshipRegistry;
use crate::ooxml::error::{OoxmlError, Result};

/// Part name of the header relative to `word/`.
pub const HEADER_TARGET: &str = "header1.xml";
/// Part name of the footer relative to `word/`.
pub const FOOTER_TARGET: &str = "footer1.xml";

/// Media name prefix of header images.
const HEADER_MEDIA_PREFIX: &str = "header1_";
/// Media name prefix of footer images.
const FOOTER_MEDIA_PREFIX: &str = "footer1_";

/// The page header.
#[derive(Debug, Clone)]
pub struct Header {
    contents: Vec<(Option<HorizontalAlign>, ContentNode)>,
    pub(crate) relationships: RelationshipRegistry,
    pub(crate) bookmarks: BookmarkIds,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            contents: Vec::new(),
            relationships: RelationshipRegistry::scoped(HEADER_MEDIA_PREFIX),
            bookmarks: BookmarkIds::new(),
        }
    }
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add content, optionally pinned to a third of the page.
    ///
    /// `HorizontalAlign::Both` is not a position and is rejected.
    pub(crate) fn push(&mut self, position: Option<HorizontalAlign>, mut node: ContentNode) -> Result<()> {
        if position == Some(HorizontalAlign::Both) {
            return Err(OoxmlError::validation(
                "header",
                "position",
                "must be left, center or right",
            ));
        }
        node.validate()?;
        self.bookmarks.assign(&mut node)?;
        self.contents.push((position, node));
        Ok(())
    }

    /// Content pinned to `position`, or the unpinned content for `None`.
    pub fn contents_for(&self, position: Option<HorizontalAlign>) -> impl Iterator<Item = &ContentNode> {
        self.contents
            .iter()
            .filter(move |(pos, _)| *pos == position)
            .map(|(_, node)| node)
    }

    pub(crate) fn contents_mut(&mut self) -> impl Iterator<Item = &mut ContentNode> {
        self.contents.iter_mut().map(|(_, node)| node)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn relationships(&self) -> &RelationshipRegistry {
        &self.relationships
    }
}

/// The page footer. Page numbers are appended when enabled on the document.
#[derive(Debug, Clone)]
pub struct Footer {
    contents: Vec<ContentNode>,
    pub(crate) relationships: RelationshipRegistry,
    pub(crate) bookmarks: BookmarkIds,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            contents: Vec::new(),
            relationships: RelationshipRegistry::scoped(FOOTER_MEDIA_PREFIX),
            bookmarks: BookmarkIds::new(),
        }
    }
}

impl Footer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, mut node: ContentNode) -> Result<()> {
        node.validate()?;
        self.bookmarks.assign(&mut node)?;
        self.contents.push(node);
        Ok(())
    }

    pub fn contents(&self) -> &[ContentNode] {
        &self.contents
    }

    pub(crate) fn contents_mut(&mut self) -> impl Iterator<Item = &mut ContentNode> {
        self.contents.iter_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn relationships(&self) -> &RelationshipRegistry {
        &self.relationships
    }
}
