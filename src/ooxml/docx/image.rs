//! Image model.
//!
//! Geometry is given in pixels and converted to EMUs at render time; the
//! image's own `ppi` applies to width and height, while the surrounding
//! margins are always converted at 72 ppi.

use super::enums::HorizontalAlign;
use crate::common::unit::{MARGIN_PPI, px_to_emu};
use crate::ooxml::error::{OoxmlError, Result};
use std::sync::Arc;

/// Where the image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Filesystem path or URL, read when the package is written.
    Url(String),
    /// Inline bytes; `name` is the relationship target and supplies the extension.
    Data { name: String, bytes: Arc<[u8]> },
}

impl ImageSource {
    /// Relationship target for this source.
    pub fn target(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Data { name, .. } => name,
        }
    }

    pub fn data(&self) -> Option<&Arc<[u8]>> {
        match self {
            Self::Url(_) => None,
            Self::Data { bytes, .. } => Some(bytes),
        }
    }
}

/// A picture placed in its own paragraph.
///
/// # Examples
///
/// ```rust,ignore
/// let logo = Image::from_url("assets/logo.png").size(200, 80).align(HorizontalAlign::Center);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub source: ImageSource,
    pub ppi: u32,
    pub width: u32,
    pub height: u32,
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
    pub align: HorizontalAlign,
    /// Float the image relative to the page instead of placing it inline
    pub anchor: bool,
}

impl Image {
    fn with_source(source: ImageSource) -> Self {
        Self {
            source,
            ppi: 72,
            width: 0,
            height: 0,
            top: 8,
            bottom: 8,
            left: 8,
            right: 8,
            align: HorizontalAlign::Left,
            anchor: false,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::with_source(ImageSource::Url(url.into()))
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::with_source(ImageSource::Data {
            name: name.into(),
            bytes: bytes.into(),
        })
    }

    pub fn ppi(mut self, ppi: u32) -> Self {
        self.ppi = ppi;
        self
    }

    /// Width and height in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Margins around the image in pixels.
    pub fn margins(mut self, top: u32, bottom: u32, left: u32, right: u32) -> Self {
        self.top = top;
        self.bottom = bottom;
        self.left = left;
        self.right = right;
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }

    pub fn anchor(mut self, anchor: bool) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn emu_width(&self) -> i64 {
        px_to_emu(self.width, self.ppi)
    }

    pub fn emu_height(&self) -> i64 {
        px_to_emu(self.height, self.ppi)
    }

    /// Distances `(top, bottom, left, right)` in EMUs.
    pub fn emu_margins(&self) -> (i64, i64, i64, i64) {
        (
            px_to_emu(self.top, MARGIN_PPI),
            px_to_emu(self.bottom, MARGIN_PPI),
            px_to_emu(self.left, MARGIN_PPI),
            px_to_emu(self.right, MARGIN_PPI),
        )
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.source.target().trim().is_empty() {
            return Err(OoxmlError::validation("image", "url", "must not be empty"));
        }
        if self.ppi == 0 {
            return Err(OoxmlError::validation("image", "ppi", "must be greater than 0"));
        }
        if let ImageSource::Data { bytes, .. } = &self.source
            && bytes.is_empty()
        {
            return Err(OoxmlError::validation("image", "data", "must not be empty"));
        }
        Ok(())
    }
}
