//! Table of contents marker.

use crate::ooxml::error::{OoxmlError, Result};

/// Highest heading level a table of contents can list.
pub const MAX_TOC_LEVEL: u32 = 6;

/// A `TOC` field listing the document headings between two outline levels.
///
/// The entries are derived from the heading paragraphs when the document is
/// rendered; Word refreshes page numbers when the field is updated.
///
/// # Examples
///
/// ```rust,ignore
/// let toc = TableOfContents::new(1, 2)?;
/// assert!(toc.includes(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOfContents {
    start_level: u32,
    end_level: u32,
}

impl Default for TableOfContents {
    fn default() -> Self {
        Self {
            start_level: 1,
            end_level: 3,
        }
    }
}

impl TableOfContents {
    /// Create a table of contents listing levels `start_level..=end_level`.
    ///
    /// Both levels must lie in `1..=6` and `start_level` must not exceed
    /// `end_level`.
    pub fn new(start_level: u32, end_level: u32) -> Result<Self> {
        for (field, value) in [("start_level", start_level), ("end_level", end_level)] {
            if value == 0 || value > MAX_TOC_LEVEL {
                return Err(OoxmlError::validation(
                    "table of contents",
                    field,
                    format!("must be between 1 and {}", MAX_TOC_LEVEL),
                ));
            }
        }
        if start_level > end_level {
            return Err(OoxmlError::validation(
                "table of contents",
                "start_level",
                "must not exceed end_level",
            ));
        }
        Ok(Self {
            start_level,
            end_level,
        })
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    pub fn end_level(&self) -> u32 {
        self.end_level
    }

    pub fn includes(&self, level: u32) -> bool {
        (self.start_level..=self.end_level).contains(&level)
    }

    /// Field instruction for the marker.
    pub(crate) fn instruction(&self) -> String {
        format!(
            " TOC \\o \"{}-{}\" \\h \\z \\u",
            self.start_level, self.end_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        assert!(TableOfContents::new(0, 3).is_err());
        assert!(TableOfContents::new(1, 7).is_err());
        assert!(TableOfContents::new(4, 2).is_err());
        assert!(TableOfContents::new(3, 3).is_ok());
        assert!(TableOfContents::new(1, 6).is_ok());
    }

    #[test]
    fn test_includes() {
        let toc = TableOfContents::default();
        assert!(toc.includes(1));
        assert!(toc.includes(3));
        assert!(!toc.includes(4));
        assert_eq!(toc.instruction(), " TOC \\o \"1-3\" \\h \\z \\u");
    }
}
