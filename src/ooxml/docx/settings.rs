/// Page geometry, page numbering and render configuration.
use super::enums::{HorizontalAlign, Orientation};
use super::fetch::{DefaultFetcher, ResourceFetcher};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::metadata::DocumentProperties;

/// Page margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMargins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(1440)
    }
}

impl PageMargins {
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// Page size, orientation and margins.
///
/// Defaults to US Letter portrait (12240 x 15840 twips) with one-inch
/// margins.
///
/// # Examples
///
/// ```rust,ignore
/// let a4 = PageSettings::new().size(11906, 16838).margins(PageMargins::uniform(1134));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub margins: PageMargins,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            width: 12_240,
            height: 15_840,
            orientation: Orientation::Portrait,
            margins: PageMargins::default(),
        }
    }
}

impl PageSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn margins(mut self, margins: PageMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Width available to body content: page width minus side margins.
    pub fn content_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margins.left)
            .saturating_sub(self.margins.right)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OoxmlError::validation(
                "page size",
                "width",
                "width and height must be greater than 0",
            ));
        }
        if self.content_width() == 0 {
            return Err(OoxmlError::validation(
                "page margins",
                "left",
                "side margins must leave room for content",
            ));
        }
        Ok(())
    }
}

/// Page number shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNumbers {
    pub show: bool,
    pub align: HorizontalAlign,
    pub label: Option<String>,
    /// Label size in half-points
    pub label_size: Option<u32>,
    /// Number size in half-points
    pub number_size: Option<u32>,
}

impl Default for PageNumbers {
    fn default() -> Self {
        Self {
            show: false,
            align: HorizontalAlign::Center,
            label: None,
            label_size: None,
            number_size: None,
        }
    }
}

impl PageNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }

    /// Text placed before the number; surrounding whitespace is dropped and
    /// a single separating space is added when rendered.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        let trimmed = label.trim();
        self.label = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// A size of 0 clears the value.
    pub fn label_size(mut self, size: u32) -> Self {
        self.label_size = (size != 0).then_some(size);
        self
    }

    /// A size of 0 clears the value.
    pub fn number_size(mut self, size: u32) -> Self {
        self.number_size = (size != 0).then_some(size);
        self
    }

    /// Set label and number size together.
    pub fn size(self, size: u32) -> Self {
        self.label_size(size).number_size(size)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.show && self.align == HorizontalAlign::Both {
            return Err(OoxmlError::validation(
                "page numbers",
                "align",
                "must be left, center or right",
            ));
        }
        Ok(())
    }
}

/// Collaborators and metadata used while rendering a package.
pub struct RenderOptions {
    /// Loads non-inline image sources
    pub fetcher: Box<dyn ResourceFetcher>,
    pub properties: DocumentProperties,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fetcher: Box::new(DefaultFetcher),
            properties: DocumentProperties::default(),
        }
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetcher(mut self, fetcher: impl ResourceFetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    pub fn properties(mut self, properties: DocumentProperties) -> Self {
        self.properties = properties;
        self
    }
}
