//! Colors, borders and shading shared by runs, paragraphs, tables and cells.

use super::enums::{BgStyle, BorderLine, ThemeColorRef};
use crate::ooxml::error::{OoxmlError, Result};

/// A reference to a theme color slot with optional tint and shade.
///
/// `color` is the fallback value Word shows when the theme is missing;
/// it defaults to `auto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor {
    pub reference: ThemeColorRef,
    pub tint: Option<String>,
    pub shade: Option<String>,
    pub color: String,
}

impl ThemeColor {
    pub fn new(reference: ThemeColorRef) -> Self {
        Self {
            reference,
            tint: None,
            shade: None,
            color: "auto".to_string(),
        }
    }

    pub fn tint(mut self, tint: impl Into<String>) -> Self {
        self.tint = Some(tint.into());
        self
    }

    pub fn shade(mut self, shade: impl Into<String>) -> Self {
        self.shade = Some(shade.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.color.is_empty() {
            return Err(OoxmlError::validation("theme color", "color", "must not be empty"));
        }
        Ok(())
    }
}

/// Which edge of a box a border applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Top,
    Left,
    Bottom,
    Right,
    Horizontal,
    Vertical,
}

impl BorderSide {
    /// Emission order of the sides.
    pub const ALL: [BorderSide; 6] = [
        Self::Top,
        Self::Left,
        Self::Bottom,
        Self::Right,
        Self::Horizontal,
        Self::Vertical,
    ];

    /// Element name inside `w:pBdr`, `w:tblBorders` or `w:tcBorders`.
    pub fn element(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Bottom => "bottom",
            Self::Right => "right",
            Self::Horizontal => "insideH",
            Self::Vertical => "insideV",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Top => 0,
            Self::Left => 1,
            Self::Bottom => 2,
            Self::Right => 3,
            Self::Horizontal => 4,
            Self::Vertical => 5,
        }
    }
}

/// A single border line.
///
/// Sizes and spacing are in eighths of a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    pub color: String,
    pub theme_color: Option<ThemeColor>,
    pub line: Option<BorderLine>,
    pub size: u32,
    pub spacing: u32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: "auto".to_string(),
            theme_color: None,
            line: None,
            size: 0,
            spacing: 0,
        }
    }
}

impl Border {
    /// A border drawn with `line`.
    pub fn new(line: BorderLine) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn theme_color(mut self, theme_color: ThemeColor) -> Self {
        self.theme_color = Some(theme_color);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// A border without a line, or with `none`, draws nothing.
    pub fn is_undefined(&self) -> bool {
        matches!(self.line, None | Some(BorderLine::None))
    }

    /// Space the border occupies: `size + 2 * spacing`, or 0 when undefined.
    pub fn total_size(&self) -> u32 {
        if self.is_undefined() {
            0
        } else {
            self.size + 2 * self.spacing
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(theme_color) = &self.theme_color {
            theme_color.validate()?;
        }
        Ok(())
    }
}

/// A set of borders: one default applied to every side plus per-side overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Borders {
    pub all: Option<Border>,
    sides: [Option<Border>; 6],
}

impl Borders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border used for every side without an override.
    pub fn all(mut self, border: Border) -> Self {
        self.all = Some(border);
        self
    }

    /// Override a single side.
    pub fn side(mut self, side: BorderSide, border: Border) -> Self {
        self.sides[side.index()] = Some(border);
        self
    }

    pub fn set_side(&mut self, side: BorderSide, border: Border) {
        self.sides[side.index()] = Some(border);
    }

    /// The border in effect for `side`.
    pub fn get(&self, side: BorderSide) -> Option<&Border> {
        self.sides[side.index()].as_ref().or(self.all.as_ref())
    }

    /// Total size of the border in effect for `side`, 0 when none applies.
    pub fn total_size(&self, side: BorderSide) -> u32 {
        self.get(side).map(Border::total_size).unwrap_or(0)
    }

    /// Sides that will actually draw a line, in emission order.
    pub fn defined(&self) -> impl Iterator<Item = (BorderSide, &Border)> {
        BorderSide::ALL
            .into_iter()
            .filter_map(|side| self.get(side).map(|border| (side, border)))
            .filter(|(_, border)| !border.is_undefined())
    }

    pub fn is_empty(&self) -> bool {
        self.defined().next().is_none()
    }

    /// Fill sides left unset here from `other`.
    pub(crate) fn merge_missing(&mut self, other: &Borders) {
        if self.all.is_none() {
            self.all = other.all.clone();
        }
        for (mine, theirs) in self.sides.iter_mut().zip(other.sides.iter()) {
            if mine.is_none() {
                *mine = theirs.clone();
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.all.iter().chain(self.sides.iter().flatten()).try_for_each(Border::validate)
    }
}

/// Background shading: a pattern with a plain or theme color.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shading {
    pub color: Option<String>,
    pub theme_color: Option<ThemeColor>,
    pub style: Option<BgStyle>,
}

impl Shading {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn theme(theme_color: ThemeColor) -> Self {
        Self {
            theme_color: Some(theme_color),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: BgStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Whether anything would be emitted for this shading.
    pub fn is_visible(&self) -> bool {
        self.theme_color.is_some() || self.color.as_deref().is_some_and(|c| c != "none")
    }

    pub(crate) fn merge_missing(&mut self, other: &Shading) {
        if self.color.is_none() && self.theme_color.is_none() {
            self.color = other.color.clone();
            self.theme_color = other.theme_color.clone();
        }
        if self.style.is_none() {
            self.style = other.style;
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(style) = &self.style {
            style.validate()?;
        }
        if let Some(theme_color) = &self.theme_color {
            theme_color.validate()?;
        }
        Ok(())
    }
}

/// Box margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub top: Option<u32>,
    pub left: Option<u32>,
    pub bottom: Option<u32>,
    pub right: Option<u32>,
}

impl Margins {
    pub fn uniform(value: u32) -> Self {
        Self {
            top: Some(value),
            left: Some(value),
            bottom: Some(value),
            right: Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none() && self.right.is_none()
    }

    /// Defined margins in `tcMar` emission order.
    pub fn defined(&self) -> impl Iterator<Item = (&'static str, u32)> {
        [
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("right", self.right),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }

    pub(crate) fn merge_missing(&mut self, other: &Margins) {
        self.top = self.top.or(other.top);
        self.left = self.left.or(other.left);
        self.bottom = self.bottom.or(other.bottom);
        self.right = self.right.or(other.right);
    }
}
