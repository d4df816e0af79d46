//! Package writer for OPC packages.
//!
//! This module assembles serialized parts into the ZIP container and builds
//! the `[Content_Types].xml` manifest that maps extensions and part names to
//! content types.

use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use phf::phf_map;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Path of the content types manifest inside the package.
pub const CONTENT_TYPES_URI: &str = "[Content_Types].xml";

/// Content types for media extensions that are registered as `Default` entries.
static MEDIA_CONTENT_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "bmp" => ct::BMP,
    "emf" => ct::EMF,
    "gif" => ct::GIF,
    "ico" => ct::ICO,
    "jpeg" => ct::JPEG,
    "jpg" => ct::JPEG,
    "png" => ct::PNG,
    "svg" => ct::SVG,
    "tif" => ct::TIFF,
    "tiff" => ct::TIFF,
    "webp" => ct::WEBP,
    "wmf" => ct::WMF,
};

/// Look up the content type for a media file extension.
pub fn media_content_type(ext: &str) -> Option<&'static str> {
    MEDIA_CONTENT_TYPES.get(ext.to_ascii_lowercase().as_str()).copied()
}

/// Streaming writer that places parts at their archive paths.
///
/// Parts are written in the order they are added; the archive is finalized
/// by [`PackageWriter::finish`].
pub struct PackageWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    part_names: Vec<String>,
}

impl PackageWriter {
    /// Create an empty in-memory package.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::with_capacity(64 * 1024))),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            part_names: Vec::with_capacity(24),
        }
    }

    /// Add a part at `name` (archive path without a leading slash).
    pub fn write_part(&mut self, name: &str, blob: &[u8]) -> Result<()> {
        log::debug!("writing part {} ({} bytes)", name, blob.len());
        self.archive.start_file(name, self.options)?;
        self.archive.write_all(blob)?;
        self.part_names.push(name.to_string());
        Ok(())
    }

    /// Names of the parts written so far, in write order.
    pub fn part_names(&self) -> &[String] {
        &self.part_names
    }

    /// Finish writing and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for building [Content_Types].xml content.
///
/// Manages Default and Override elements for content type mapping.
#[derive(Debug, Clone)]
pub struct ContentTypesItem {
    /// Default content types by extension
    defaults: HashMap<String, String>,

    /// Override content types by partname
    overrides: HashMap<String, String>,
}

impl ContentTypesItem {
    /// Create a manifest with the standard WordprocessingML defaults.
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        for ext in ["gif", "jpeg", "jpg", "png"] {
            if let Some(content_type) = media_content_type(ext) {
                defaults.insert(ext.to_string(), content_type.to_string());
            }
        }
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    /// Register a media extension so its parts resolve to a content type.
    ///
    /// Every part needs a content type, so an extension without a known
    /// mapping is an error.
    pub fn add_media_extension(&mut self, ext: &str) -> Result<()> {
        let ext = ext.to_ascii_lowercase();
        if self.defaults.contains_key(&ext) {
            return Ok(());
        }
        let content_type = media_content_type(&ext).ok_or_else(|| {
            OoxmlError::FormatInvariant(format!("no content type for media extension '{ext}'"))
        })?;
        self.defaults.insert(ext, content_type.to_string());
        Ok(())
    }

    /// Add an override for a specific part (archive path without leading slash).
    pub fn add_override(&mut self, partname: &str, content_type: &str) {
        let key = if partname.starts_with('/') {
            partname.to_string()
        } else {
            format!("/{}", partname)
        };
        self.overrides.insert(key, content_type.to_string());
    }

    /// Whether an override is registered for the given partname.
    pub fn has_override(&self, partname: &str) -> bool {
        let key = partname.trim_start_matches('/');
        self.overrides.keys().any(|k| k.trim_start_matches('/') == key)
    }

    /// Generate the XML for [Content_Types].xml.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns=""#);
        xml.push_str(namespace::OPC_CONTENT_TYPES);
        xml.push_str(r#"">"#);

        // Write Default elements (sorted by extension)
        let mut exts: Vec<_> = self.defaults.keys().collect();
        exts.sort();
        for ext in exts {
            xml.push_str(r#"<Default Extension=""#);
            xml.push_str(&escape_xml(ext));
            xml.push_str(r#"" ContentType=""#);
            xml.push_str(&escape_xml(&self.defaults[ext]));
            xml.push_str(r#""/>"#);
        }

        // Write Override elements (sorted by partname)
        let mut partnames: Vec<_> = self.overrides.keys().collect();
        partnames.sort();
        for partname in partnames {
            xml.push_str(r#"<Override PartName=""#);
            xml.push_str(&escape_xml(partname));
            xml.push_str(r#"" ContentType=""#);
            xml.push_str(&escape_xml(&self.overrides[partname]));
            xml.push_str(r#""/>"#);
        }

        xml.push_str("</Types>");
        xml
    }
}

impl Default for ContentTypesItem {
    fn default() -> Self {
        Self::new()
    }
}
