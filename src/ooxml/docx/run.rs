//! Runs: the inline pieces of a paragraph.
//!
//! Formatting is carried by [`RunAttributes`], an override record where every
//! field is optional. Unset fields are filled from the enclosing paragraph,
//! table cell or style when the run is rendered.

use super::border::{Shading, ThemeColor};
use super::enums::{RunVerticalAlign, Whitespace};
use crate::ooxml::error::{OoxmlError, Result};

/// Character formatting override.
///
/// Sizes are in half-points (`24` = 12pt).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunAttributes {
    /// Character style id (`w:rStyle`)
    pub style: Option<String>,
    pub font: Option<String>,
    pub size: Option<u32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub caps: Option<bool>,
    pub small_caps: Option<bool>,
    pub strike: Option<bool>,
    pub rtl: Option<bool>,
    pub color: Option<String>,
    pub theme_color: Option<ThemeColor>,
    pub background: Option<Shading>,
    pub vertical_align: Option<RunVerticalAlign>,
    pub whitespace: Option<Whitespace>,
}

macro_rules! run_setters {
    ($($(#[$doc:meta])* $name:ident: $ty:ty),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(mut self, value: $ty) -> Self {
                self.$name = Some(value);
                self
            }
        )*
    };
}

impl RunAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    run_setters! {
        size: u32,
        bold: bool,
        italic: bool,
        underline: bool,
        caps: bool,
        small_caps: bool,
        strike: bool,
        rtl: bool,
        theme_color: ThemeColor,
        background: Shading,
        vertical_align: RunVerticalAlign,
        whitespace: Whitespace,
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill every unset field from `other`; fields already set are kept.
    pub fn merge_missing(&mut self, other: &RunAttributes) {
        macro_rules! fill {
            ($($field:ident),*) => {
                $(
                    if self.$field.is_none() {
                        self.$field = other.$field.clone();
                    }
                )*
            };
        }
        fill!(
            style,
            font,
            size,
            bold,
            italic,
            underline,
            caps,
            small_caps,
            strike,
            rtl,
            vertical_align,
            whitespace
        );
        // A color and a theme color are alternatives; either one counts as set.
        if self.color.is_none() && self.theme_color.is_none() {
            self.color = other.color.clone();
            self.theme_color = other.theme_color.clone();
        }
        match (&mut self.background, &other.background) {
            (Some(own), Some(theirs)) => own.merge_missing(theirs),
            (None, Some(theirs)) => self.background = Some(theirs.clone()),
            _ => {},
        }
    }

    /// A copy of `self` with unset fields filled from `other`.
    pub fn merged(&self, other: &RunAttributes) -> RunAttributes {
        let mut merged = self.clone();
        merged.merge_missing(other);
        merged
    }

    pub(crate) fn validate(&self, model: &'static str) -> Result<()> {
        if self.caps == Some(true) && self.small_caps == Some(true) {
            return Err(OoxmlError::validation(
                model,
                "caps",
                "may have either caps or small caps but not both",
            ));
        }
        if let Some(theme_color) = &self.theme_color {
            theme_color.validate()?;
        }
        if let Some(background) = &self.background {
            background.validate()?;
        }
        Ok(())
    }
}

/// Plain text with optional trailing tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
    pub attributes: RunAttributes,
    pub end_tab: bool,
}

impl TextRun {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attributes: RunAttributes::default(),
            end_tab: false,
        }
    }

    pub fn attributes(mut self, attributes: RunAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn end_tab(mut self, end_tab: bool) -> Self {
        self.end_tab = end_tab;
        self
    }
}

/// A simple field such as `PAGE` or `NUMPAGES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRun {
    pub name: String,
    pub attributes: RunAttributes,
}

impl FieldRun {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: RunAttributes::default(),
        }
    }

    pub fn attributes(mut self, attributes: RunAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Default color of hyperlink text.
pub const DEFAULT_LINK_COLOR: &str = "1155cc";

/// A hyperlink to an external URL or to a bookmark in the same document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRun {
    pub content: String,
    pub href: String,
    pub internal: bool,
    pub attributes: RunAttributes,
}

impl LinkRun {
    /// An external link, underlined in the default link color.
    pub fn new(content: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            href: href.into(),
            internal: false,
            attributes: RunAttributes::new().color(DEFAULT_LINK_COLOR).underline(true),
        }
    }

    /// A link to the bookmark named `anchor`.
    pub fn internal(content: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            internal: true,
            ..Self::new(content, anchor)
        }
    }

    /// Replace the link's formatting, keeping link color and underline where unset.
    pub fn attributes(mut self, attributes: RunAttributes) -> Self {
        self.attributes = attributes.merged(&self.attributes);
        self
    }

    pub fn is_external(&self) -> bool {
        !self.internal
    }
}

/// A bookmark boundary.
///
/// Ids are assigned by the owning document when the node is added; an end
/// marker without an id closes the most recently opened bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bookmark {
    Start { id: Option<u32>, name: String },
    End { id: Option<u32> },
}

impl Bookmark {
    pub fn start(name: impl Into<String>) -> Self {
        Self::Start {
            id: None,
            name: name.into(),
        }
    }

    pub fn end() -> Self {
        Self::End { id: None }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            Self::Start { id, .. } | Self::End { id } => *id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Start { name, .. } => Some(name),
            Self::End { .. } => None,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Start { name, .. } if name.trim().is_empty() => {
                Err(OoxmlError::validation("bookmark", "name", "must not be empty"))
            },
            _ => Ok(()),
        }
    }
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    Text(TextRun),
    Field(FieldRun),
    Link(LinkRun),
    LineBreak,
    PageBreak,
    Bookmark(Bookmark),
}

impl Run {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(TextRun::new(content))
    }

    /// Text contributed to the paragraph's plain text, if any.
    pub fn plain_text(&self) -> Option<&str> {
        match self {
            Self::Text(run) => Some(&run.content),
            Self::Link(run) => Some(&run.content),
            _ => None,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Text(run) => run.attributes.validate("text"),
            Self::Field(run) => {
                if run.name.trim().is_empty() {
                    return Err(OoxmlError::validation("field", "name", "must not be empty"));
                }
                run.attributes.validate("field")
            },
            Self::Link(run) => {
                if run.content.is_empty() {
                    return Err(OoxmlError::validation("link", "content", "must not be empty"));
                }
                if run.href.trim().is_empty() {
                    return Err(OoxmlError::validation("link", "href", "must not be empty"));
                }
                run.attributes.validate("link")
            },
            Self::Bookmark(bookmark) => bookmark.validate(),
            Self::LineBreak | Self::PageBreak => Ok(()),
        }
    }
}

impl From<TextRun> for Run {
    fn from(run: TextRun) -> Self {
        Self::Text(run)
    }
}

impl From<FieldRun> for Run {
    fn from(run: FieldRun) -> Self {
        Self::Field(run)
    }
}

impl From<LinkRun> for Run {
    fn from(run: LinkRun) -> Self {
        Self::Link(run)
    }
}

impl From<Bookmark> for Run {
    fn from(bookmark: Bookmark) -> Self {
        Self::Bookmark(bookmark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::{BgStyle, ThemeColorRef};

    #[test]
    fn test_merge_missing_keeps_explicit_values() {
        let mut own = RunAttributes::new().bold(false).size(20);
        let cell = RunAttributes::new().bold(true).italic(true).font("Arial");
        own.merge_missing(&cell);
        assert_eq!(own.bold, Some(false));
        assert_eq!(own.italic, Some(true));
        assert_eq!(own.font.as_deref(), Some("Arial"));
        assert_eq!(own.size, Some(20));
    }

    #[test]
    fn test_theme_color_counts_as_color() {
        let mut own = RunAttributes::new().theme_color(ThemeColor::new(ThemeColorRef::Accent1));
        own.merge_missing(&RunAttributes::new().color("ff0000"));
        assert!(own.color.is_none());
        assert!(own.theme_color.is_some());
    }

    #[test]
    fn test_background_merges_fieldwise() {
        let mut own = RunAttributes::new().background(Shading::color("eeeeee"));
        own.merge_missing(
            &RunAttributes::new().background(Shading::color("000000").style(BgStyle::Solid)),
        );
        let background = own.background.unwrap();
        assert_eq!(background.color.as_deref(), Some("eeeeee"));
        assert_eq!(background.style, Some(BgStyle::Solid));
    }

    #[test]
    fn test_caps_and_small_caps_exclusive() {
        let attributes = RunAttributes::new().caps(true).small_caps(true);
        assert!(attributes.validate("text").is_err());
        assert!(RunAttributes::new().caps(true).small_caps(false).validate("text").is_ok());
    }

    #[test]
    fn test_link_defaults() {
        let link = LinkRun::new("Example", "https://example.com");
        assert!(link.is_external());
        assert_eq!(link.attributes.color.as_deref(), Some(DEFAULT_LINK_COLOR));
        assert_eq!(link.attributes.underline, Some(true));

        let styled = LinkRun::internal("Top", "_top").attributes(RunAttributes::new().bold(true));
        assert!(!styled.is_external());
        assert_eq!(styled.attributes.bold, Some(true));
        assert_eq!(styled.attributes.underline, Some(true));
    }

    #[test]
    fn test_run_validation() {
        assert!(Run::Field(FieldRun::new(" ")).validate().is_err());
        assert!(Run::Link(LinkRun::new("x", "")).validate().is_err());
        assert!(Run::Bookmark(Bookmark::start("")).validate().is_err());
        assert!(Run::Bookmark(Bookmark::end()).validate().is_ok());
        assert!(Run::text("").validate().is_ok());
    }
}
