/// Picture emitter.
///
/// Every image sits in its own paragraph, either inline with the text flow
/// (`wp:inline`) or anchored to the page (`wp:anchor`) with top-and-bottom
/// wrapping. The picture bytes are referenced through an image relationship
/// registered in the part being written.
use super::PartWriter;
use crate::common::xml::escape_xml;
use crate::ooxml::docx::enums::HorizontalAlign;
use crate::ooxml::docx::image::Image;
use crate::ooxml::docx::relationship::RelationshipType;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;

/// Line height used when the default style sets none.
const DEFAULT_IMAGE_LINE: u32 = 240;

impl PartWriter<'_> {
    pub(crate) fn write_image(&mut self, xml: &mut String, image: &Image) -> Result<()> {
        let rel = self.rels.register(
            RelationshipType::Image,
            image.source.target(),
            image.source.data().cloned(),
        );
        let r_id = rel.r_id();
        let name = rel.formatted_target();
        self.drawing_id += 1;
        let drawing_id = self.drawing_id;

        let line = self
            .styles
            .default_style()
            .and_then(|style| style.line)
            .unwrap_or(DEFAULT_IMAGE_LINE);

        xml.push_str("<w:p><w:pPr>");
        write!(xml, r#"<w:spacing w:lineRule="auto" w:line="{line}"/>"#)?;
        xml.push_str(r#"<w:contextualSpacing w:val="0"/>"#);
        write!(xml, r#"<w:jc w:val="{}"/>"#, image.align.as_str())?;
        xml.push_str("<w:rPr/></w:pPr>");

        xml.push_str("<w:r><w:drawing>");
        let (top, bottom, left, right) = image.emu_margins();
        let distances = format!(r#"distT="{top}" distB="{bottom}" distL="{left}" distR="{right}""#);
        if image.anchor {
            let align = match image.align {
                HorizontalAlign::Both => HorizontalAlign::Left,
                other => other,
            };
            write!(
                xml,
                r#"<wp:anchor {distances} simplePos="0" relativeHeight="0" behindDoc="0" locked="1" layoutInCell="0" allowOverlap="0">"#
            )?;
            xml.push_str(r#"<wp:simplePos x="0" y="0"/>"#);
            write!(
                xml,
                r#"<wp:positionH relativeFrom="page"><wp:align>{}</wp:align></wp:positionH>"#,
                align.as_str()
            )?;
            xml.push_str(r#"<wp:positionV relativeFrom="page"><wp:align>top</wp:align></wp:positionV>"#);
            write_graphic(xml, image, &r_id, &name, drawing_id, true)?;
            xml.push_str("</wp:anchor>");
        } else {
            write!(xml, "<wp:inline {distances}>")?;
            write_graphic(xml, image, &r_id, &name, drawing_id, false)?;
            xml.push_str("</wp:inline>");
        }
        xml.push_str("</w:drawing></w:r>");
        xml.push_str("<w:r><w:rPr/></w:r>");
        xml.push_str("</w:p>");
        Ok(())
    }
}

/// Extent, frame properties and the `pic:pic` graphic shared by inline and
/// anchored pictures.
fn write_graphic(
    xml: &mut String,
    image: &Image,
    r_id: &str,
    name: &str,
    drawing_id: u32,
    anchored: bool,
) -> Result<()> {
    let (cx, cy) = (image.emu_width(), image.emu_height());
    let name = escape_xml(name);
    write!(xml, r#"<wp:extent cx="{cx}" cy="{cy}"/>"#)?;
    xml.push_str(r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#);
    if anchored {
        xml.push_str("<wp:wrapTopAndBottom/>");
    }
    write!(xml, r#"<wp:docPr id="{drawing_id}" name="{name}"/>"#)?;
    xml.push_str(r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#);
    write!(
        xml,
        r#"<a:graphic><a:graphicData uri="{}"><pic:pic>"#,
        namespace::DML_PICTURE
    )?;
    write!(
        xml,
        r#"<pic:nvPicPr><pic:cNvPr id="{drawing_id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#
    )?;
    write!(
        xml,
        r#"<pic:blipFill><a:blip r:embed="{r_id}"/><a:srcRect/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#
    )?;
    write!(
        xml,
        r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:ln/></pic:spPr>"#
    )?;
    xml.push_str("</pic:pic></a:graphicData></a:graphic>");
    Ok(())
}
