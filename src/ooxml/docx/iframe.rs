//! Embedded documents.
//!
//! An [`IFrame`] splices the body of another `.docx` package into the host
//! document. The foreign package is read once, when the node is built: its
//! root namespaces, its `mc:Ignorable` prefixes, its body XML and the bytes
//! of every picture it embeds. At render time the pictures are registered in
//! the host's relationship registry and the body is replayed with the
//! picture references rewritten to the host ids.

use super::fetch::ResourceFetcher;
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::sync::Arc;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

/// A picture carried by an embedded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Relationship id inside the foreign package
    pub r_id: String,
    /// Picture name, used as the host relationship target
    pub target: String,
    pub data: Arc<[u8]>,
    /// Index of the `pic:pic` element among all pictures of the body
    pic_index: usize,
}

/// The body of a foreign Word package, ready to be spliced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFrame {
    namespaces: Vec<(String, String)>,
    ignorables: Vec<String>,
    images: Vec<EmbeddedImage>,
    body: String,
}

impl IFrame {
    /// Read an embedded document from the bytes of a `.docx` package.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(OoxmlError::validation("iframe", "data", "must not be empty"));
        }
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| OoxmlError::InvalidPackage(format!("not a zip container: {}", e)))?;

        let media = match read_part(&mut archive, DOCUMENT_RELS_PART) {
            Ok(rels) => image_targets(&rels)?,
            Err(OoxmlError::InvalidPackage(_)) => HashMap::new(),
            Err(e) => return Err(e),
        };
        let document = read_part(&mut archive, DOCUMENT_PART)?;
        let mut iframe = parse_document(&document)?;

        let mut images = Vec::with_capacity(iframe.images.len());
        for mut image in iframe.images.drain(..) {
            let Some(path) = media.get(&image.r_id) else {
                log::warn!("embedded picture {} has no image relationship", image.r_id);
                continue;
            };
            let data = read_part_bytes(&mut archive, path)?;
            if image.target.is_empty() {
                image.target = path.rsplit('/').next().unwrap_or(path).to_string();
            }
            image.data = data.into();
            images.push(image);
        }
        iframe.images = images;
        log::debug!(
            "embedded document: {} namespaces, {} pictures",
            iframe.namespaces.len(),
            iframe.images.len()
        );
        Ok(iframe)
    }

    /// Fetch the package at `location` and read it.
    pub fn from_location(location: &str, fetcher: &dyn ResourceFetcher) -> Result<Self> {
        if location.trim().is_empty() {
            return Err(OoxmlError::validation("iframe", "url", "must not be empty"));
        }
        let bytes = fetcher.fetch(location)?;
        Self::from_bytes(&bytes)
    }

    /// `(prefix, uri)` pairs declared on the foreign document root.
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    /// Prefixes listed in the foreign `mc:Ignorable` attribute.
    pub fn ignorables(&self) -> &[String] {
        &self.ignorables
    }

    pub fn images(&self) -> &[EmbeddedImage] {
        &self.images
    }

    /// Body XML with picture references mapped through `ids`, which takes a
    /// foreign relationship id to the host relationship number.
    pub(crate) fn render_body(&self, ids: &HashMap<String, u32>) -> Result<String> {
        let by_pic: HashMap<usize, u32> = self
            .images
            .iter()
            .filter_map(|image| ids.get(&image.r_id).map(|id| (image.pic_index, *id)))
            .collect();

        let mut reader = Reader::from_str(&self.body);
        let mut writer = Writer::new(Vec::with_capacity(self.body.len()));
        let mut buf = Vec::new();
        let mut pic_count = 0usize;
        let mut current_pic: Option<usize> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Eof => break,
                Event::Start(e) => {
                    let local = e.local_name();
                    if local.as_ref() == b"pic" {
                        current_pic = Some(pic_count);
                        pic_count += 1;
                    }
                    let e = self.rewrite(&e, current_pic, &by_pic, ids)?;
                    writer.write_event(Event::Start(e))?;
                },
                Event::Empty(e) => {
                    let e = self.rewrite(&e, current_pic, &by_pic, ids)?;
                    writer.write_event(Event::Empty(e))?;
                },
                Event::End(e) => {
                    if e.local_name().as_ref() == b"pic" {
                        current_pic = None;
                    }
                    writer.write_event(Event::End(e))?;
                },
                other => writer.write_event(other)?,
            }
            buf.clear();
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| OoxmlError::Xml(format!("invalid UTF-8 in embedded body: {}", e)))
    }

    fn rewrite<'a>(
        &self,
        e: &BytesStart<'a>,
        current_pic: Option<usize>,
        by_pic: &HashMap<usize, u32>,
        ids: &HashMap<String, u32>,
    ) -> Result<BytesStart<'static>> {
        let local = e.local_name();
        let replacement = match local.as_ref() {
            b"blip" => Some((b"r:embed".as_slice(), None)),
            b"cNvPr" if current_pic.is_some() => Some((b"id".as_slice(), current_pic)),
            _ => None,
        };
        let Some((key, pic)) = replacement else {
            return Ok(e.clone().into_owned());
        };

        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut out = BytesStart::new(name);
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_ref() != key {
                out.push_attribute(attr);
                continue;
            }
            let value = match pic {
                Some(index) => by_pic.get(&index).map(|id| id.to_string()),
                None => {
                    let old = String::from_utf8_lossy(&attr.value);
                    ids.get(old.as_ref()).map(|id| format!("rId{}", id))
                },
            };
            match value {
                Some(value) => {
                    let key = String::from_utf8_lossy(key);
                    out.push_attribute((key.as_ref(), value.as_str()));
                },
                None => out.push_attribute(attr),
            }
        }
        Ok(out)
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let bytes = read_part_bytes(archive, name)?;
    String::from_utf8(bytes)
        .map_err(|e| OoxmlError::InvalidPackage(format!("{} is not UTF-8: {}", name, e)))
}

fn read_part_bytes<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = archive
        .by_name(name)
        .map_err(|_| OoxmlError::InvalidPackage(format!("missing part {}", name)))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Map image relationship ids to their archive paths.
fn image_targets(rels: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(rels);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let (mut id, mut kind, mut target) = (None, None, None);
                for attr in e.attributes() {
                    let attr = attr?;
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    match attr.key.as_ref() {
                        b"Id" => id = Some(value),
                        b"Type" => kind = Some(value),
                        b"Target" => target = Some(value),
                        _ => {},
                    }
                }
                if let (Some(id), Some(kind), Some(target)) = (id, kind, target)
                    && kind.ends_with("image")
                {
                    let path = match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("word/{}", target),
                    };
                    targets.insert(id, path);
                }
            },
            _ => {},
        }
        buf.clear();
    }
    Ok(targets)
}

/// Collect root namespaces, ignorables, picture references and the body XML
/// (without the trailing section properties).
fn parse_document(xml: &str) -> Result<IFrame> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());
    let mut buf = Vec::new();

    let mut namespaces = Vec::new();
    let mut ignorables = Vec::new();
    let mut images = Vec::new();
    let mut found_body = false;
    let mut in_body = false;
    // Depth below w:body; section properties sit at depth 0.
    let mut depth = 0usize;
    let mut skip_depth: Option<usize> = None;
    let mut pic_count = 0usize;
    let mut picture_name: Option<String> = None;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match &event {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"document" => {
                for attr in e.attributes() {
                    let attr = attr?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    if let Some(prefix) = key.strip_prefix("xmlns:") {
                        namespaces.push((prefix.to_string(), value));
                    } else if attr.key.local_name().as_ref() == b"Ignorable" {
                        ignorables.extend(value.split_whitespace().map(str::to_string));
                    }
                }
                buf.clear();
                continue;
            },
            Event::Start(e) if !in_body && e.local_name().as_ref() == b"body" => {
                in_body = true;
                found_body = true;
                buf.clear();
                continue;
            },
            Event::End(e) if in_body && depth == 0 && e.local_name().as_ref() == b"body" => {
                in_body = false;
                buf.clear();
                continue;
            },
            _ => {},
        }
        if !in_body {
            buf.clear();
            continue;
        }

        match &event {
            Event::Start(e) => {
                if depth == 0 && e.local_name().as_ref() == b"sectPr" && skip_depth.is_none() {
                    skip_depth = Some(depth);
                }
                if e.local_name().as_ref() == b"pic" {
                    picture_name = Some(String::new());
                    pic_count += 1;
                }
                if let Some(name) = picture_name.as_mut() {
                    note_picture(e, name, &mut images, pic_count)?;
                }
                depth += 1;
            },
            Event::Empty(e) => {
                if let Some(name) = picture_name.as_mut() {
                    note_picture(e, name, &mut images, pic_count)?;
                }
                if depth == 0 && e.local_name().as_ref() == b"sectPr" {
                    buf.clear();
                    continue;
                }
            },
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if e.local_name().as_ref() == b"pic" {
                    picture_name = None;
                }
            },
            _ => {},
        }

        let skipping = skip_depth.is_some();
        if let Event::End(_) = &event
            && skip_depth == Some(depth)
        {
            skip_depth = None;
            buf.clear();
            continue;
        }
        if !skipping {
            writer.write_event(event)?;
        }
        buf.clear();
    }

    if !found_body {
        return Err(OoxmlError::InvalidPackage(
            "document part has no w:body".to_string(),
        ));
    }
    let body = String::from_utf8(writer.into_inner())
        .map_err(|e| OoxmlError::InvalidPackage(format!("invalid UTF-8 in body: {}", e)))?;
    Ok(IFrame {
        namespaces,
        ignorables,
        images,
        body,
    })
}

/// Record the picture name from `pic:cNvPr` and the reference from `a:blip`.
fn note_picture(
    e: &BytesStart<'_>,
    name: &mut String,
    images: &mut Vec<EmbeddedImage>,
    pic_count: usize,
) -> Result<()> {
    match e.local_name().as_ref() {
        b"cNvPr" => {
            if let Some(attr) = e.try_get_attribute("name")? {
                *name = String::from_utf8_lossy(&attr.value).into_owned();
            }
        },
        b"blip" => {
            if let Some(attr) = e.try_get_attribute("r:embed")? {
                images.push(EmbeddedImage {
                    r_id: String::from_utf8_lossy(&attr.value).into_owned(),
                    target: name.clone(),
                    data: Arc::from(Vec::<u8>::new()),
                    pic_index: pic_count - 1,
                });
            }
        },
        _ => {},
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const BODY_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" mc:Ignorable="w14"><w:body><w:p><w:r><w:t>Embedded</w:t></w:r></w:p><w:p><w:r><w:drawing><pic:pic><pic:nvPicPr><pic:cNvPr id="7" name="chart.png"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="rId9"/></pic:blipFill></pic:pic></w:drawing></w:r></w:p><w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:body></w:document>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

    fn package() -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        zip.start_file(DOCUMENT_PART, options).unwrap();
        zip.write_all(BODY_DOC.as_bytes()).unwrap();
        zip.start_file(DOCUMENT_RELS_PART, options).unwrap();
        zip.write_all(RELS.as_bytes()).unwrap();
        zip.start_file("word/media/image1.png", options).unwrap();
        zip.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_reads_namespaces_and_pictures() {
        let iframe = IFrame::from_bytes(&package()).unwrap();
        assert!(iframe.namespaces().iter().any(|(p, _)| p == "w14"));
        assert_eq!(iframe.ignorables(), ["w14".to_string()]);
        assert_eq!(iframe.images().len(), 1);
        assert_eq!(iframe.images()[0].target, "chart.png");
        assert_eq!(&*iframe.images()[0].data, &[0x89, b'P', b'N', b'G']);
        assert!(!iframe.body.contains("sectPr"));
        assert!(iframe.body.contains("Embedded"));
    }

    struct PackageFetcher;

    impl ResourceFetcher for PackageFetcher {
        fn fetch(&self, location: &str) -> Result<Vec<u8>> {
            assert_eq!(location, "parts/chart.docx");
            Ok(package())
        }
    }

    #[test]
    fn test_loads_through_fetcher() {
        let iframe = IFrame::from_location("parts/chart.docx", &PackageFetcher).unwrap();
        assert_eq!(iframe.images().len(), 1);
        assert!(IFrame::from_location("  ", &PackageFetcher).is_err());
    }

    #[test]
    fn test_render_rewrites_ids() {
        let iframe = IFrame::from_bytes(&package()).unwrap();
        let ids = HashMap::from([("rId9".to_string(), 12u32)]);
        let body = iframe.render_body(&ids).unwrap();
        assert!(body.contains(r#"r:embed="rId12""#));
        assert!(body.contains(r#"id="12""#));
        assert!(!body.contains("rId9"));
    }

    #[test]
    fn test_rejects_non_package() {
        assert!(matches!(
            IFrame::from_bytes(b"plain text"),
            Err(OoxmlError::InvalidPackage(_))
        ));
        assert!(IFrame::from_bytes(&[]).is_err());
    }
}
