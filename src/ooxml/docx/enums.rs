//! Enumerated attribute values for WordprocessingML generation.
//!
//! Each enum maps to the literal token written into the XML via `as_str`.

use crate::ooxml::error::{OoxmlError, Result};
use std::fmt;

/// Horizontal alignment for paragraphs, images and header/footer positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Both,
}

impl HorizontalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Both => "both",
        }
    }

    /// Token used by `w:tblPr/w:jc`, where the sides are logical.
    pub(crate) fn as_table_str(&self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Right => "end",
            Self::Center => "center",
            Self::Both => "both",
        }
    }
}

/// Vertical alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// Style kinds known to the style registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleType {
    #[default]
    Paragraph,
    Character,
    Table,
    TableRow,
    TableCell,
}

impl StyleType {
    /// Name used in messages and in `w:style/@w:type` for emitted kinds.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::TableRow => "table_row",
            Self::TableCell => "table_cell",
        }
    }

    /// Whether styles of this kind may be applied to table cells.
    pub fn is_table_kind(&self) -> bool {
        matches!(self, Self::Table | Self::TableRow | Self::TableCell)
    }

    /// Row and cell styles only feed the cell cascade and never reach `styles.xml`.
    pub(crate) fn is_emitted(&self) -> bool {
        !matches!(self, Self::TableRow | Self::TableCell)
    }
}

/// Interpretation of a paragraph's line spacing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineRule {
    Auto,
    #[default]
    Exact,
    AtLeast,
}

impl LineRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Exact => "exact",
            Self::AtLeast => "atLeast",
        }
    }
}

/// Border line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderLine {
    #[default]
    Single,
    Double,
    Dotted,
    Dashed,
    Thick,
    DotDash,
    DotDotDash,
    Wave,
    None,
}

impl BorderLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Dotted => "dotted",
            Self::Dashed => "dashed",
            Self::Thick => "thick",
            Self::DotDash => "dotDash",
            Self::DotDotDash => "dotDotDash",
            Self::Wave => "wave",
            Self::None => "none",
        }
    }
}

const SHADING_PERCENTAGES: [u8; 23] = [
    5, 10, 12, 15, 20, 25, 30, 35, 37, 40, 45, 50, 55, 60, 62, 65, 70, 75, 80, 85, 87, 90, 95,
];

/// Shading pattern for backgrounds (`w:shd/@w:val`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BgStyle {
    #[default]
    Clear,
    Solid,
    HorzStripe,
    VertStripe,
    ReverseDiagStripe,
    DiagStripe,
    HorzCross,
    DiagCross,
    ThinHorzStripe,
    ThinVertStripe,
    ThinReverseDiagStripe,
    ThinDiagStripe,
    ThinHorzCross,
    ThinDiagCross,
    /// Percentage fill; only the percentages Word defines are accepted.
    Pct(u8),
}

impl BgStyle {
    /// Build a percentage pattern, rejecting values Word has no token for.
    pub fn pct(value: u8) -> Result<Self> {
        if SHADING_PERCENTAGES.contains(&value) {
            Ok(Self::Pct(value))
        } else {
            Err(OoxmlError::validation(
                "background",
                "bgstyle",
                format!("pct{} is not a known shading pattern", value),
            ))
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Pct(value) => Self::pct(*value).map(|_| ()),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for BgStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Clear => "clear",
            Self::Solid => "solid",
            Self::HorzStripe => "horzStripe",
            Self::VertStripe => "vertStripe",
            Self::ReverseDiagStripe => "reverseDiagStripe",
            Self::DiagStripe => "diagStripe",
            Self::HorzCross => "horzCross",
            Self::DiagCross => "diagCross",
            Self::ThinHorzStripe => "thinHorzStripe",
            Self::ThinVertStripe => "thinVertStripe",
            Self::ThinReverseDiagStripe => "thinReverseDiagStripe",
            Self::ThinDiagStripe => "thinDiagStripe",
            Self::ThinHorzCross => "thinHorzCross",
            Self::ThinDiagCross => "thinDiagCross",
            Self::Pct(value) => return write!(f, "pct{}", value),
        };
        f.write_str(token)
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// List numbering kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListType {
    Ordered,
    #[default]
    Unordered,
}

impl ListType {
    /// Abstract numbering id used for this list kind in `numbering.xml`.
    pub(crate) fn abstract_id(&self) -> u32 {
        match self {
            Self::Ordered => 1,
            Self::Unordered => 2,
        }
    }
}

/// Whitespace handling for text runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Whitespace {
    /// Keep text as given and mark it `xml:space="preserve"`.
    Preserve,
    /// Replace tabs and line breaks with spaces.
    Replace,
    /// Replace, then collapse runs of spaces and trim the ends.
    Collapse,
}

impl Whitespace {
    /// Apply the normalization to `text`.
    pub fn apply<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        use std::borrow::Cow;
        match self {
            Self::Preserve => Cow::Borrowed(text),
            Self::Replace => {
                if text.contains(['\t', '\n', '\r']) {
                    Cow::Owned(text.replace(['\t', '\n', '\r'], " "))
                } else {
                    Cow::Borrowed(text)
                }
            },
            Self::Collapse => Cow::Owned(text.split_whitespace().collect::<Vec<_>>().join(" ")),
        }
    }
}

/// Run-level vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunVerticalAlign {
    Subscript,
    Superscript,
    Baseline,
}

impl RunVerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscript => "subscript",
            Self::Superscript => "superscript",
            Self::Baseline => "baseline",
        }
    }
}

/// Table layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableLayout {
    #[default]
    Auto,
    Fixed,
}

impl TableLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "autofit",
            Self::Fixed => "fixed",
        }
    }
}

/// Tab stop alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabAlign {
    #[default]
    Start,
    Center,
    End,
    Decimal,
    Bar,
}

impl TabAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Decimal => "decimal",
            Self::Bar => "bar",
        }
    }
}

/// Tab stop leader character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabLeader {
    #[default]
    None,
    Dot,
    Hyphen,
    Underscore,
    MiddleDot,
}

impl TabLeader {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dot => "dot",
            Self::Hyphen => "hyphen",
            Self::Underscore => "underscore",
            Self::MiddleDot => "middleDot",
        }
    }
}

/// Theme color slots that runs, borders and backgrounds can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColorRef {
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
    Background1,
    Text1,
    Background2,
    Text2,
    None,
}

impl ThemeColorRef {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark1 => "dark1",
            Self::Light1 => "light1",
            Self::Dark2 => "dark2",
            Self::Light2 => "light2",
            Self::Accent1 => "accent1",
            Self::Accent2 => "accent2",
            Self::Accent3 => "accent3",
            Self::Accent4 => "accent4",
            Self::Accent5 => "accent5",
            Self::Accent6 => "accent6",
            Self::Hyperlink => "hyperlink",
            Self::FollowedHyperlink => "followedHyperlink",
            Self::Background1 => "background1",
            Self::Text1 => "text1",
            Self::Background2 => "background2",
            Self::Text2 => "text2",
            Self::None => "none",
        }
    }
}

/// Structural positions a table style can format conditionally.
///
/// Declaration order is the merge order: later positions override earlier
/// ones when several apply to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConditionalFormatType {
    WholeTable,
    Band1Vert,
    Band2Vert,
    Band1Horz,
    Band2Horz,
    FirstRow,
    LastRow,
    FirstCol,
    LastCol,
    NeCell,
    NwCell,
    SeCell,
    SwCell,
}

impl ConditionalFormatType {
    pub const ALL: [ConditionalFormatType; 13] = [
        Self::WholeTable,
        Self::Band1Vert,
        Self::Band2Vert,
        Self::Band1Horz,
        Self::Band2Horz,
        Self::FirstRow,
        Self::LastRow,
        Self::FirstCol,
        Self::LastCol,
        Self::NeCell,
        Self::NwCell,
        Self::SeCell,
        Self::SwCell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WholeTable => "wholeTable",
            Self::Band1Vert => "band1Vert",
            Self::Band2Vert => "band2Vert",
            Self::Band1Horz => "band1Horz",
            Self::Band2Horz => "band2Horz",
            Self::FirstRow => "firstRow",
            Self::LastRow => "lastRow",
            Self::FirstCol => "firstCol",
            Self::LastCol => "lastCol",
            Self::NeCell => "neCell",
            Self::NwCell => "nwCell",
            Self::SeCell => "seCell",
            Self::SwCell => "swCell",
        }
    }
}
