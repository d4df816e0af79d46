//! Paragraph model.

use super::border::{Border, BorderSide, Borders, Shading};
use super::enums::{HorizontalAlign, TabAlign, TabLeader};
use super::run::{Bookmark, FieldRun, LinkRun, Run, RunAttributes, TextRun};
use crate::ooxml::error::{OoxmlError, Result};

/// A tab stop at `position` twips from the leading edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStop {
    pub position: u32,
    pub align: TabAlign,
    pub leader: TabLeader,
}

impl TabStop {
    pub fn new(position: u32) -> Self {
        Self {
            position,
            align: TabAlign::Start,
            leader: TabLeader::None,
        }
    }

    pub fn align(mut self, align: TabAlign) -> Self {
        self.align = align;
        self
    }

    pub fn leader(mut self, leader: TabLeader) -> Self {
        self.leader = leader;
        self
    }
}

/// Side of a one-sided paragraph indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentSide {
    Left,
    Right,
}

impl IndentSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Paragraph spacing in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub before: Option<u32>,
    pub after: Option<u32>,
    pub line: Option<u32>,
}

impl Spacing {
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none() && self.line.is_none()
    }
}

/// Paragraph-level formatting that table cells may cascade into paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParagraphAttributes {
    pub align: Option<HorizontalAlign>,
    pub line: Option<u32>,
    pub keep_next: Option<bool>,
    pub keep_lines: Option<bool>,
    pub widow_control: Option<bool>,
}

/// A paragraph: properties plus an ordered list of runs.
///
/// # Examples
///
/// ```rust,ignore
/// use longan::ooxml::docx::{Paragraph, RunAttributes};
///
/// let para = Paragraph::new("Quarterly report")
///     .style("Heading1")
///     .run_attributes(RunAttributes::new().bold(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    /// Paragraph style id; rendered as `Normal` when unset
    pub style: Option<String>,
    pub attributes: ParagraphAttributes,
    pub spacing: Spacing,
    pub indent: Option<(IndentSide, i32)>,
    pub tabs: Vec<TabStop>,
    pub borders: Borders,
    pub shading: Option<Shading>,
    /// Formatting applied to every run that leaves a field unset
    pub run_attributes: RunAttributes,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// A paragraph holding a single text run with `content`.
    ///
    /// The run is created even for empty content, so the paragraph is valid.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::text(content)],
            ..Self::default()
        }
    }

    /// A paragraph with no runs yet; add at least one before inserting it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.attributes.align = Some(align);
        self
    }

    pub fn keep_next(mut self, value: bool) -> Self {
        self.attributes.keep_next = Some(value);
        self
    }

    pub fn keep_lines(mut self, value: bool) -> Self {
        self.attributes.keep_lines = Some(value);
        self
    }

    pub fn widow_control(mut self, value: bool) -> Self {
        self.attributes.widow_control = Some(value);
        self
    }

    pub fn spacing(mut self, before: Option<u32>, after: Option<u32>) -> Self {
        self.spacing.before = before;
        self.spacing.after = after;
        self
    }

    pub fn line(mut self, line: u32) -> Self {
        self.spacing.line = Some(line);
        self.attributes.line = Some(line);
        self
    }

    pub fn indent(mut self, side: IndentSide, value: i32) -> Self {
        self.indent = Some((side, value));
        self
    }

    pub fn tab(mut self, tab: TabStop) -> Self {
        self.tabs.push(tab);
        self
    }

    pub fn border(mut self, side: BorderSide, border: Border) -> Self {
        self.borders.set_side(side, border);
        self
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    pub fn shading(mut self, shading: Shading) -> Self {
        self.shading = Some(shading);
        self
    }

    pub fn run_attributes(mut self, attributes: RunAttributes) -> Self {
        self.run_attributes = attributes;
        self
    }

    /// Append a run.
    pub fn run(mut self, run: impl Into<Run>) -> Self {
        self.runs.push(run.into());
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.run(TextRun::new(content))
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        self.run(FieldRun::new(name))
    }

    pub fn link(self, content: impl Into<String>, href: impl Into<String>) -> Self {
        self.run(LinkRun::new(content, href))
    }

    pub fn line_break(self) -> Self {
        self.run(Run::LineBreak)
    }

    pub fn page_break(self) -> Self {
        self.run(Run::PageBreak)
    }

    pub fn bookmark_start(self, name: impl Into<String>) -> Self {
        self.run(Bookmark::start(name))
    }

    pub fn bookmark_end(self) -> Self {
        self.run(Bookmark::end())
    }

    /// Text of the text and link runs joined by spaces, trimmed.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .filter_map(Run::plain_text)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// A paragraph with no runs or only blank text.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.plain_text().is_empty()
    }

    /// Style id used when rendering.
    pub fn style_id(&self) -> &str {
        self.style.as_deref().unwrap_or("Normal")
    }

    /// Name of the first bookmark opened in this paragraph.
    pub fn first_bookmark(&self) -> Option<&str> {
        self.runs.iter().find_map(|run| match run {
            Run::Bookmark(bookmark) => bookmark.name(),
            _ => None,
        })
    }

    /// Fill unset paragraph attributes from a cascading override.
    pub(crate) fn apply_missing(&mut self, attributes: &ParagraphAttributes) {
        let own = &mut self.attributes;
        own.align = own.align.or(attributes.align);
        own.keep_next = own.keep_next.or(attributes.keep_next);
        own.keep_lines = own.keep_lines.or(attributes.keep_lines);
        own.widow_control = own.widow_control.or(attributes.widow_control);
        if own.line.is_none() && self.spacing.line.is_none() {
            own.line = attributes.line;
            self.spacing.line = attributes.line;
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.runs.is_empty() {
            return Err(OoxmlError::validation(
                "paragraph",
                "runs",
                "must contain at least one run",
            ));
        }
        self.runs.iter().try_for_each(Run::validate)?;
        self.run_attributes.validate("paragraph")?;
        self.borders.validate()?;
        if let Some(shading) = &self.shading {
            shading.validate()?;
        }
        Ok(())
    }
}
