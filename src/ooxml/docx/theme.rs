//! Document theme.
//!
//! A theme names the colour scheme Word uses for theme colour references
//! (`w:themeColor`) and the hyperlink colours. The font and format schemes
//! are fixed; only the name and the twelve scheme colours are configurable.

use crate::ooxml::error::{OoxmlError, Result};

/// Colour scheme slots in `a:clrScheme` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeSlot {
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
    Visited,
}

impl ThemeSlot {
    pub const ALL: [ThemeSlot; 12] = [
        ThemeSlot::Dark1,
        ThemeSlot::Light1,
        ThemeSlot::Dark2,
        ThemeSlot::Light2,
        ThemeSlot::Accent1,
        ThemeSlot::Accent2,
        ThemeSlot::Accent3,
        ThemeSlot::Accent4,
        ThemeSlot::Accent5,
        ThemeSlot::Accent6,
        ThemeSlot::Hyperlink,
        ThemeSlot::Visited,
    ];

    /// Element name inside `a:clrScheme`.
    pub fn element(&self) -> &'static str {
        match self {
            Self::Dark1 => "dk1",
            Self::Light1 => "lt1",
            Self::Dark2 => "dk2",
            Self::Light2 => "lt2",
            Self::Accent1 => "accent1",
            Self::Accent2 => "accent2",
            Self::Accent3 => "accent3",
            Self::Accent4 => "accent4",
            Self::Accent5 => "accent5",
            Self::Accent6 => "accent6",
            Self::Hyperlink => "hlink",
            Self::Visited => "folHlink",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

const DEFAULT_COLORS: [&str; 12] = [
    "000000", "FFFFFF", "707173", "FFFFFF", "00539B", "0096D6", "F1CB00", "C0311A", "00539B",
    "0096D6", "00539B", "00539B",
];

/// Theme name and colour scheme.
///
/// # Examples
///
/// ```rust,ignore
/// let theme = Theme::new()
///     .name("Orchard")
///     .color(ThemeSlot::Accent1, "2E7D32");
/// document.set_theme(theme)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    colors: [String; 12],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Longan".to_string(),
            colors: DEFAULT_COLORS.map(str::to_string),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set a scheme colour as six hex digits; a leading `#` is dropped.
    pub fn color(mut self, slot: ThemeSlot, color: impl Into<String>) -> Self {
        let color = color.into();
        self.colors[slot.index()] = color.trim_start_matches('#').to_ascii_uppercase();
        self
    }

    pub fn get(&self, slot: ThemeSlot) -> &str {
        &self.colors[slot.index()]
    }

    /// Slots and colours in scheme order.
    pub fn colors(&self) -> impl Iterator<Item = (ThemeSlot, &str)> {
        ThemeSlot::ALL.iter().map(|slot| (*slot, self.get(*slot)))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OoxmlError::validation("theme", "name", "must not be empty"));
        }
        for (slot, color) in self.colors() {
            if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(OoxmlError::validation(
                    "theme",
                    slot.element(),
                    format!("{color:?} is not a six digit hex colour"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Longan");
        assert_eq!(theme.get(ThemeSlot::Dark2), "707173");
        assert_eq!(theme.get(ThemeSlot::Accent4), "C0311A");
        assert_eq!(theme.colors().count(), 12);
        assert!(theme.validate().is_ok());
    }

    #[test]
    fn test_color_normalization_and_validation() {
        let theme = Theme::new().color(ThemeSlot::Accent1, "#2e7d32");
        assert_eq!(theme.get(ThemeSlot::Accent1), "2E7D32");
        assert!(theme.validate().is_ok());

        let bad = Theme::new().color(ThemeSlot::Hyperlink, "blue");
        assert!(bad.validate().is_err());
        assert!(Theme::new().name(" ").validate().is_err());
    }
}
