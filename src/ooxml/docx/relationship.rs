//! Relationship registry.
//!
//! Every package part that references other resources owns one
//! [`RelationshipRegistry`]: the main document, each header and each footer.
//! Ids are sequential within a registry and targets are deduplicated
//! case-insensitively, so the first registration of a target wins.

use super::format::{ImageFormat, target_extension};
use crate::ooxml::opc::constants::relationship_type as rt;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed target of the theme part relative to `word/`.
pub const THEME_TARGET: &str = "theme/theme1.xml";

/// Kind of a document-level relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Font,
    Footer,
    Header,
    Image,
    Link,
    Numbering,
    Settings,
    Style,
    Theme,
}

impl RelationshipType {
    /// Relationship type URI.
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Font => rt::FONT_TABLE,
            Self::Footer => rt::FOOTER,
            Self::Header => rt::HEADER,
            Self::Image => rt::IMAGE,
            Self::Link => rt::HYPERLINK,
            Self::Numbering => rt::NUMBERING,
            Self::Settings => rt::SETTINGS,
            Self::Style => rt::STYLES,
            Self::Theme => rt::THEME,
        }
    }
}

/// A registered relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: u32,
    pub rel_type: RelationshipType,
    /// Target as registered: a part name, URL, path or picture name
    pub target: String,
    /// Inline bytes for image relationships
    pub data: Option<Arc<[u8]>>,
    /// Prefix of the media file name, distinguishing the media of headers
    /// and footers from the body's
    pub media_prefix: &'static str,
}

impl Relationship {
    /// `rId{id}`
    pub fn r_id(&self) -> String {
        format!("rId{}", self.id)
    }

    /// Target written to the relationships part.
    ///
    /// Images live at `media/{prefix}image{id}.{ext}`; the theme always
    /// lives at [`THEME_TARGET`].
    pub fn formatted_target(&self) -> String {
        match self.rel_type {
            RelationshipType::Image => format!(
                "media/{}image{}.{}",
                self.media_prefix,
                self.id,
                self.extension()
            ),
            RelationshipType::Theme => THEME_TARGET.to_string(),
            _ => self.target.clone(),
        }
    }

    /// Media extension: from the target, else sniffed from the inline bytes,
    /// else `png`.
    pub fn extension(&self) -> String {
        if let Some(ext) = target_extension(&self.target) {
            return ext.to_ascii_lowercase();
        }
        if let Some(format) = self
            .data
            .as_deref()
            .and_then(ImageFormat::detect_from_bytes)
        {
            return format.extension().to_string();
        }
        log::warn!("cannot determine image type of {}, assuming png", self.target);
        "png".to_string()
    }

    /// Hyperlinks point outside the package.
    pub fn is_external(&self) -> bool {
        self.rel_type == RelationshipType::Link
    }
}

/// Relationships of one package part, in registration order.
#[derive(Debug, Clone, Default)]
pub struct RelationshipRegistry {
    entries: Vec<Relationship>,
    keys: HashMap<String, usize>,
    media_prefix: &'static str,
}

impl RelationshipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose images are stored as `media/{media_prefix}image{id}`.
    pub fn scoped(media_prefix: &'static str) -> Self {
        Self {
            media_prefix,
            ..Self::default()
        }
    }

    /// Register `target`, or return the relationship already registered for
    /// it. The lookup ignores case and the existing entry is never updated.
    pub fn register(
        &mut self,
        rel_type: RelationshipType,
        target: impl Into<String>,
        data: Option<Arc<[u8]>>,
    ) -> &Relationship {
        let target = target.into();
        let key = target.to_lowercase();
        if let Some(&index) = self.keys.get(&key) {
            return &self.entries[index];
        }
        let id = self.entries.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        log::debug!("relationship rId{} {:?} -> {}", id, rel_type, target);
        self.entries.push(Relationship {
            id,
            rel_type,
            target,
            data,
            media_prefix: self.media_prefix,
        });
        self.keys.insert(key, self.entries.len() - 1);
        &self.entries[self.entries.len() - 1]
    }

    pub fn find(&self, target: &str) -> Option<&Relationship> {
        self.keys
            .get(&target.to_lowercase())
            .map(|&index| &self.entries[index])
    }

    /// Relationships of `rel_type` in registration order.
    pub fn by_type(&self, rel_type: RelationshipType) -> impl Iterator<Item = &Relationship> {
        self.entries.iter().filter(move |r| r.rel_type == rel_type)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relationship> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_target_returns_first() {
        let mut registry = RelationshipRegistry::new();
        let first = registry
            .register(RelationshipType::Image, "Logo.png", Some(Arc::from(vec![1u8])))
            .id;
        let again = registry
            .register(RelationshipType::Image, "logo.PNG", Some(Arc::from(vec![2u8])))
            .clone();
        assert_eq!(first, again.id);
        assert_eq!(again.target, "Logo.png");
        assert_eq!(again.data.as_deref(), Some(&[1u8][..]));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sequential_ids_and_type_order() {
        let mut registry = RelationshipRegistry::new();
        for target in ["fontTable.xml", "a.png", "numbering.xml", "b.gif"] {
            let kind = if target.ends_with(".xml") {
                RelationshipType::Numbering
            } else {
                RelationshipType::Image
            };
            registry.register(kind, target, None);
        }
        let ids: Vec<u32> = registry.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        let images: Vec<&str> = registry
            .by_type(RelationshipType::Image)
            .map(|r| r.target.as_str())
            .collect();
        assert_eq!(images, vec!["a.png", "b.gif"]);
        assert_eq!(registry.find("B.GIF").map(|r| r.id), Some(4));
    }

    #[test]
    fn test_formatted_targets() {
        let mut registry = RelationshipRegistry::new();
        registry.register(RelationshipType::Style, "styles.xml", None);
        let image = registry
            .register(RelationshipType::Image, "https://x.org/p/Photo.JPG?w=2", None)
            .clone();
        assert_eq!(image.formatted_target(), "media/image2.jpg");
        assert_eq!(image.r_id(), "rId2");

        let gif = Relationship {
            id: 5,
            rel_type: RelationshipType::Image,
            target: "chart".to_string(),
            data: Some(Arc::from(b"GIF89a..".to_vec())),
            media_prefix: "",
        };
        assert_eq!(gif.formatted_target(), "media/image5.gif");

        let mut header = RelationshipRegistry::scoped("header1_");
        let logo = header.register(RelationshipType::Image, "logo.png", None);
        assert_eq!(logo.formatted_target(), "media/header1_image1.png");

        let theme = registry.register(RelationshipType::Theme, "theme", None);
        assert_eq!(theme.formatted_target(), THEME_TARGET);
    }
}
