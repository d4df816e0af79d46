//! Package assembly.
//!
//! Rendering works on copies of the document's content and registries:
//! tables are laid out, headings receive bookmarks, every part is
//! serialized and the media behind the image relationships of the body,
//! header and footer is loaded. The parts are then written to the archive in
//! a fixed order.

use super::content::ContentNode;
use super::document::Document;
use super::header_footer::{FOOTER_TARGET, Footer, HEADER_TARGET};
use super::layout::{apply_cell_formats, distribute_widths};
use super::relationship::{RelationshipRegistry, RelationshipType};
use super::settings::RenderOptions;
use super::styles::StyleRegistry;
use super::writer::doc::{MarginParts, RootNamespaces};
use super::writer::relmap::{package_rels_xml, part_rels_xml};
use super::writer::section::settings_xml;
use super::writer::style::font_table_xml;
use super::writer::toc::{collect_headings, ensure_heading_bookmarks};
use super::writer::PartWriter;
use crate::ooxml::docx::fetch::ResourceFetcher;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::pkgwriter::{CONTENT_TYPES_URI, ContentTypesItem, PackageWriter};
use std::borrow::Cow;
use std::time::Instant;

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

/// A serialized margin part and its relationships.
struct MarginPart {
    name: String,
    xml: String,
    rels: RelationshipRegistry,
}

impl MarginPart {
    fn rels_name(&self) -> String {
        let file = self.name.trim_start_matches("word/");
        format!("word/_rels/{file}.rels")
    }
}

/// Widths and conditional formatting of every table in `nodes`.
fn lay_out<'a>(
    nodes: impl IntoIterator<Item = &'a mut ContentNode>,
    width: u32,
    styles: &StyleRegistry,
) -> Result<()> {
    for node in nodes {
        if let ContentNode::Table(table) = node {
            distribute_widths(table, width, styles);
            apply_cell_formats(table, styles)?;
        }
    }
    Ok(())
}

fn relationship_id(rels: &RelationshipRegistry, rel_type: RelationshipType) -> Option<String> {
    rels.by_type(rel_type).next().map(|rel| rel.r_id())
}

/// Render `document` to the bytes of a `.docx` package.
pub(crate) fn render(document: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    let started = Instant::now();
    let styles = &document.styles;
    let page = &document.page;
    page.validate()?;
    let width = page.content_width();
    let root = RootNamespaces {
        namespaces: &document.namespaces,
        ignorables: &document.ignorables,
    };

    let mut contents = document.contents.clone();
    lay_out(contents.iter_mut(), width, styles)?;
    let mut bookmarks = document.bookmarks.clone();
    let added = ensure_heading_bookmarks(&mut contents, styles, &mut bookmarks);
    let headings = collect_headings(&contents, styles);
    log::debug!("{} headings, {} bookmarks added", headings.len(), added);

    let mut rels = document.relationships.clone();
    let mut lists = Vec::new();

    let header_rid = relationship_id(&rels, RelationshipType::Header);
    let footer_rid = relationship_id(&rels, RelationshipType::Footer);
    let document_xml = PartWriter::new(styles, &mut rels, &mut lists, &headings, width)
        .with_list_styles(&document.list_styles)
        .document_part(
            &contents,
            root,
            page,
            MarginParts {
                header: header_rid.as_deref(),
                footer: footer_rid.as_deref(),
            },
        )?;

    let header = match &document.header {
        Some(header) if header_rid.is_some() => {
            let mut header = header.clone();
            lay_out(header.contents_mut(), width, styles)?;
            let mut header_rels = header.relationships.clone();
            let xml = PartWriter::new(styles, &mut header_rels, &mut lists, &[], width)
                .with_list_styles(&document.list_styles)
                .for_margin_part("Header")
                .header_part(&header, root)?;
            Some(MarginPart {
                name: format!("word/{HEADER_TARGET}"),
                xml,
                rels: header_rels,
            })
        },
        _ => None,
    };

    let footer = match footer_rid {
        Some(_) => {
            let mut footer = document.footer.clone().unwrap_or_else(Footer::new);
            lay_out(footer.contents_mut(), width, styles)?;
            let mut footer_rels = footer.relationships.clone();
            let xml = PartWriter::new(styles, &mut footer_rels, &mut lists, &[], width)
                .with_list_styles(&document.list_styles)
                .for_margin_part("Footer")
                .footer_part(&footer, &document.page_numbers, root)?;
            Some(MarginPart {
                name: format!("word/{FOOTER_TARGET}"),
                xml,
                rels: footer_rels,
            })
        },
        None => None,
    };

    let margin_parts: Vec<&MarginPart> = header.iter().chain(footer.iter()).collect();
    let media = load_media(&rels, &margin_parts, options.fetcher.as_ref())?;

    let mut content_types = ContentTypesItem::new();
    for (name, content_type) in [
        ("docProps/app.xml", ct::OFC_EXTENDED_PROPERTIES),
        ("docProps/core.xml", ct::OPC_CORE_PROPERTIES),
        ("docProps/custom.xml", ct::OFC_CUSTOM_PROPERTIES),
        (DOCUMENT_PART, ct::WML_DOCUMENT_MAIN),
        ("word/fontTable.xml", ct::WML_FONT_TABLE),
        ("word/numbering.xml", ct::WML_NUMBERING),
        ("word/settings.xml", ct::WML_SETTINGS),
        ("word/styles.xml", ct::WML_STYLES),
    ] {
        content_types.add_override(name, content_type);
    }
    if let Some(part) = &header {
        content_types.add_override(&part.name, ct::WML_HEADER);
    }
    if let Some(part) = &footer {
        content_types.add_override(&part.name, ct::WML_FOOTER);
    }
    let theme = match &document.theme {
        Some(theme) => {
            content_types.add_override("word/theme/theme1.xml", ct::OFC_THEME);
            Some(theme.to_xml()?)
        },
        None => None,
    };
    for (name, _) in &media {
        let ext = name.rsplit_once('.').map_or("", |(_, ext)| ext);
        content_types.add_media_extension(ext)?;
    }

    let mut package = PackageWriter::new();
    package.write_part("_rels/.rels", package_rels_xml()?.as_bytes())?;
    package.write_part(CONTENT_TYPES_URI, content_types.to_xml().as_bytes())?;
    package.write_part("docProps/app.xml", options.properties.app_xml()?.as_bytes())?;
    package.write_part("docProps/core.xml", options.properties.core_xml()?.as_bytes())?;
    package.write_part("docProps/custom.xml", document.custom_properties.to_xml()?.as_bytes())?;
    package.write_part("word/fontTable.xml", font_table_xml(&document.fonts())?.as_bytes())?;
    for part in &margin_parts {
        package.write_part(&part.name, part.xml.as_bytes())?;
    }
    package.write_part("word/settings.xml", settings_xml()?.as_bytes())?;
    package.write_part("word/styles.xml", styles.to_xml()?.as_bytes())?;
    package.write_part(DOCUMENT_PART, document_xml.as_bytes())?;
    package.write_part(DOCUMENT_RELS_PART, part_rels_xml(&rels)?.as_bytes())?;
    for part in margin_parts.iter().filter(|part| !part.rels.is_empty()) {
        package.write_part(&part.rels_name(), part_rels_xml(&part.rels)?.as_bytes())?;
    }
    for (name, bytes) in &media {
        package.write_part(name, bytes)?;
    }
    package.write_part(
        "word/numbering.xml",
        document.list_styles.to_xml(&lists)?.as_bytes(),
    )?;
    if let Some(theme) = theme {
        package.write_part("word/theme/theme1.xml", theme.as_bytes())?;
    }

    let parts = package.part_names().len();
    let bytes = package.finish()?;
    log::info!(
        "rendered package: {} parts, {} bytes in {:?}",
        parts,
        bytes.len(),
        started.elapsed()
    );
    Ok(bytes)
}

/// Archive path and bytes of every image of the body, the header and the
/// footer. Inline data is used as is; other sources go through `fetcher`
/// and a failure aborts the render.
fn load_media<'a>(
    rels: &'a RelationshipRegistry,
    margin_parts: &[&'a MarginPart],
    fetcher: &dyn ResourceFetcher,
) -> Result<Vec<(String, Cow<'a, [u8]>)>> {
    let images = rels
        .by_type(RelationshipType::Image)
        .chain(
            margin_parts
                .iter()
                .flat_map(|part| part.rels.by_type(RelationshipType::Image)),
        );
    let mut media = Vec::new();
    for rel in images {
        let bytes = match rel.data.as_deref() {
            Some(data) if !data.is_empty() => Cow::Borrowed(data),
            _ => Cow::Owned(fetcher.fetch(&rel.target)?),
        };
        media.push((format!("word/{}", rel.formatted_target()), bytes));
    }
    Ok(media)
}
