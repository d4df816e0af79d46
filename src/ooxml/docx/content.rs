//! Block-level content nodes.

use super::border::Border;
use super::enums::BorderLine;
use super::iframe::IFrame;
use super::image::Image;
use super::list::List;
use super::paragraph::{Paragraph, ParagraphAttributes};
use super::run::{Bookmark, Run, RunAttributes};
use super::table::Table;
use super::toc::TableOfContents;
use crate::ooxml::error::{OoxmlError, Result};

/// A horizontal rule: an empty paragraph with a top border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub border: Border,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            border: Border::new(BorderLine::Single).size(4).spacing(1),
        }
    }
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.border.color = color.into();
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.border.size = size;
        self
    }

    pub fn spacing(mut self, spacing: u32) -> Self {
        self.border.spacing = spacing;
        self
    }

    pub fn line(mut self, line: BorderLine) -> Self {
        self.border.line = Some(line);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.border.size == 0 {
            return Err(OoxmlError::validation(
                "rule",
                "size",
                "horizontal rules require a non-zero size",
            ));
        }
        self.border.validate()
    }
}

/// Pre-built WordprocessingML spliced into the body verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawXml(pub String);

impl RawXml {
    pub fn new(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything that can appear in a document body, a table cell, a header or
/// a footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Paragraph(Paragraph),
    Image(Image),
    Table(Table),
    List(List),
    TableOfContents(TableOfContents),
    Rule(Rule),
    PageBreak,
    IFrame(IFrame),
    Bookmark(Bookmark),
    RawXml(RawXml),
}

impl ContentNode {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Paragraph(para) => para.validate(),
            Self::Image(image) => image.validate(),
            Self::Table(table) => table.validate(),
            Self::List(list) => list.validate(),
            Self::Rule(rule) => rule.validate(),
            Self::Bookmark(bookmark) => bookmark.validate(),
            Self::TableOfContents(_) | Self::PageBreak | Self::IFrame(_) | Self::RawXml(_) => Ok(()),
        }
    }

    /// Fill unset paragraph and run formatting of the paragraphs in this
    /// node. Nested tables keep their own cell formatting.
    pub(crate) fn cascade_formatting(
        &mut self,
        paragraph: &ParagraphAttributes,
        run_attributes: &RunAttributes,
    ) {
        let mut apply = |para: &mut Paragraph| {
            para.apply_missing(paragraph);
            if run_attributes.is_empty() {
                return;
            }
            for run in &mut para.runs {
                match run {
                    Run::Text(run) => run.attributes.merge_missing(run_attributes),
                    Run::Field(run) => run.attributes.merge_missing(run_attributes),
                    Run::Link(run) => run.attributes.merge_missing(run_attributes),
                    Run::LineBreak | Run::PageBreak | Run::Bookmark(_) => {},
                }
            }
        };
        match self {
            Self::Paragraph(para) => apply(para),
            Self::List(list) => list.for_each_paragraph_mut(&mut apply),
            _ => {},
        }
    }
}

impl From<Paragraph> for ContentNode {
    fn from(para: Paragraph) -> Self {
        Self::Paragraph(para)
    }
}

impl From<Image> for ContentNode {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

impl From<Table> for ContentNode {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<List> for ContentNode {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl From<TableOfContents> for ContentNode {
    fn from(toc: TableOfContents) -> Self {
        Self::TableOfContents(toc)
    }
}

impl From<Rule> for ContentNode {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

impl From<IFrame> for ContentNode {
    fn from(iframe: IFrame) -> Self {
        Self::IFrame(iframe)
    }
}

impl From<Bookmark> for ContentNode {
    fn from(bookmark: Bookmark) -> Self {
        Self::Bookmark(bookmark)
    }
}

impl From<RawXml> for ContentNode {
    fn from(xml: RawXml) -> Self {
        Self::RawXml(xml)
    }
}

impl From<&str> for ContentNode {
    fn from(text: &str) -> Self {
        Self::Paragraph(Paragraph::new(text))
    }
}

impl From<String> for ContentNode {
    fn from(text: String) -> Self {
        Self::Paragraph(Paragraph::new(text))
    }
}
