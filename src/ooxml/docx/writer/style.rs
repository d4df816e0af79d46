/// Style sheet and font table writers (`word/styles.xml`,
/// `word/fontTable.xml`).
///
/// The default paragraph style supplies the document defaults and is then
/// declared by name only. `TableNormal` is always written with zero paragraph
/// spacing and a line height derived from the default font size. Row and
/// cell styles only feed the cell cascade and are never written.
use super::run::write_run_properties;
use super::table::{write_borders, write_margins};
use super::{XML_DECLARATION, open_root, write_shading};
use crate::common::xml::escape_xml;
use crate::ooxml::docx::border::{Borders, Margins, Shading};
use crate::ooxml::docx::enums::{StyleType, VerticalAlign};
use crate::ooxml::docx::styles::{DEFAULT_TABLE_STYLE_BASE, Style, StyleRegistry};
use crate::ooxml::docx::table::CellFormat;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;

/// Font size in half-points assumed when the default style sets none.
const DEFAULT_FONT_SIZE: u32 = 20;

fn on_off(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

impl StyleRegistry {
    pub(crate) fn to_xml(&self) -> Result<String> {
        let default = self.require_default()?;
        let mut xml = String::with_capacity(8192);
        open_root(&mut xml, "w:styles", &[], &[])?;

        write_doc_defaults(&mut xml, default)?;
        write!(
            xml,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="{}"><w:name w:val="{}"/></w:style>"#,
            escape_xml(&default.id),
            escape_xml(&default.name)
        )?;

        let size = default.run_attributes.size.unwrap_or(DEFAULT_FONT_SIZE);
        write!(
            xml,
            r#"<w:style w:type="table" w:default="1" w:styleId="{DEFAULT_TABLE_STYLE_BASE}"><w:name w:val="Table Normal"/><w:pPr><w:spacing w:lineRule="auto" w:line="{}" w:before="0" w:after="0"/></w:pPr></w:style>"#,
            size * 23
        )?;

        let emitted = self.iter().filter(|style| {
            style.style_type.is_emitted()
                && !style.matches(&default.id)
                && !style.matches(DEFAULT_TABLE_STYLE_BASE)
        });
        for style in emitted {
            write_style(&mut xml, style)?;
        }

        xml.push_str("</w:styles>");
        Ok(xml)
    }
}

fn write_doc_defaults(xml: &mut String, style: &Style) -> Result<()> {
    let attrs = &style.run_attributes;
    xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
    if let Some(font) = &attrs.font {
        let font = escape_xml(font);
        write!(
            xml,
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#
        )?;
    }
    write!(xml, r#"<w:b w:val="{}"/>"#, on_off(attrs.bold.unwrap_or(false)))?;
    write!(xml, r#"<w:i w:val="{}"/>"#, on_off(attrs.italic.unwrap_or(false)))?;
    write!(xml, r#"<w:caps w:val="{}"/>"#, on_off(attrs.caps.unwrap_or(false)))?;
    xml.push_str(r#"<w:smallCaps w:val="0"/><w:strike w:val="0"/>"#);
    if let Some(color) = &attrs.color {
        write!(xml, r#"<w:color w:val="{}"/>"#, escape_xml(color))?;
    }
    let size = attrs.size.unwrap_or(DEFAULT_FONT_SIZE);
    write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)?;
    let underline = if attrs.underline.unwrap_or(false) { "single" } else { "none" };
    write!(xml, r#"<w:u w:val="{underline}"/>"#)?;
    xml.push_str(r#"<w:vertAlign w:val="baseline"/>"#);
    xml.push_str("</w:rPr></w:rPrDefault>");

    xml.push_str("<w:pPrDefault><w:pPr>");
    xml.push_str(r#"<w:keepNext w:val="0"/><w:keepLines w:val="0"/><w:widowControl w:val="1"/>"#);
    write!(
        xml,
        r#"<w:spacing w:lineRule="{}" w:before="{}" w:after="{}""#,
        style.line_rule.as_str(),
        style.margins.top.unwrap_or(0),
        style.margins.bottom.unwrap_or(0)
    )?;
    if let Some(line) = style.line {
        write!(xml, r#" w:line="{line}""#)?;
    }
    xml.push_str("/>");
    write!(
        xml,
        r#"<w:ind w:left="{}" w:right="{}" w:firstLine="{}"/>"#,
        style.indent_left.unwrap_or(0),
        style.indent_right.unwrap_or(0),
        style.indent_first.unwrap_or(0)
    )?;
    if let Some(align) = style.align {
        write!(xml, r#"<w:jc w:val="{}"/>"#, align.as_str())?;
    }
    xml.push_str("</w:pPr></w:pPrDefault></w:docDefaults>");
    Ok(())
}

fn write_style(xml: &mut String, style: &Style) -> Result<()> {
    write!(
        xml,
        r#"<w:style w:type="{}" w:styleId="{}">"#,
        style.style_type.as_str(),
        escape_xml(&style.id)
    )?;
    write!(xml, r#"<w:name w:val="{}"/>"#, escape_xml(&style.name))?;
    let base = match style.style_type {
        StyleType::Character => style.base.as_deref(),
        _ => style.base_id(),
    };
    if let Some(base) = base {
        write!(xml, r#"<w:basedOn w:val="{}"/>"#, escape_xml(base))?;
    }
    if style.style_type == StyleType::Paragraph {
        write!(xml, r#"<w:next w:val="{}"/>"#, escape_xml(&style.next))?;
    }
    if style.locked == Some(true) {
        xml.push_str("<w:locked/>");
    }

    match style.style_type {
        StyleType::Paragraph => write_paragraph_style_properties(xml, style)?,
        StyleType::Table => {
            if let Some(align) = style.align {
                write!(xml, r#"<w:pPr><w:jc w:val="{}"/></w:pPr>"#, align.as_str())?;
            }
        },
        _ => {},
    }
    write_run_properties(xml, &style.run_attributes, true)?;

    if style.style_type == StyleType::Table {
        write_table_style_properties(xml, style)?;
        for (position, format) in &style.conditional_formats {
            write!(xml, r#"<w:tblStylePr w:type="{}">"#, position.as_str())?;
            write_conditional_format(xml, format)?;
            xml.push_str("</w:tblStylePr>");
        }
    }
    xml.push_str("</w:style>");
    Ok(())
}

fn write_paragraph_style_properties(xml: &mut String, style: &Style) -> Result<()> {
    xml.push_str("<w:pPr>");
    write!(xml, r#"<w:keepNext w:val="{}"/>"#, on_off(style.keep_next.unwrap_or(false)))?;
    write!(xml, r#"<w:keepLines w:val="{}"/>"#, on_off(style.keep_lines.unwrap_or(false)))?;
    write!(
        xml,
        r#"<w:widowControl w:val="{}"/>"#,
        on_off(style.widow_control.unwrap_or(true))
    )?;
    if let Some(wrap) = style.word_wrap {
        write!(xml, r#"<w:wordWrap w:val="{}"/>"#, on_off(wrap))?;
    }

    let spacing = [
        ("before", style.margins.top),
        ("after", style.margins.bottom),
        ("line", style.line),
    ];
    if spacing.iter().any(|(_, value)| value.is_some()) {
        write!(xml, r#"<w:spacing w:lineRule="{}""#, style.line_rule.as_str())?;
        for (name, value) in spacing {
            if let Some(value) = value {
                write!(xml, r#" w:{name}="{value}""#)?;
            }
        }
        xml.push_str("/>");
    }

    let indents = [
        ("left", style.indent_left),
        ("right", style.indent_right),
        ("firstLine", style.indent_first),
    ];
    if indents.iter().any(|(_, value)| value.is_some()) {
        xml.push_str("<w:ind");
        for (name, value) in indents {
            if let Some(value) = value {
                write!(xml, r#" w:{name}="{value}""#)?;
            }
        }
        xml.push_str("/>");
    }

    xml.push_str(r#"<w:contextualSpacing w:val="1"/>"#);
    if let Some(align) = style.align {
        write!(xml, r#"<w:jc w:val="{}"/>"#, align.as_str())?;
    }
    if let Some(level) = style.outline_level() {
        write!(xml, r#"<w:outlineLvl w:val="{}"/>"#, level.saturating_sub(1))?;
    }
    xml.push_str("</w:pPr>");
    Ok(())
}

fn write_table_style_properties(xml: &mut String, style: &Style) -> Result<()> {
    xml.push_str("<w:tblPr>");
    write!(xml, r#"<w:tblStyleRowBandSize w:val="{}"/>"#, style.row_band_size)?;
    write!(xml, r#"<w:tblStyleColBandSize w:val="{}"/>"#, style.col_band_size)?;
    if let Some(spacing) = style.cell_spacing {
        write!(xml, r#"<w:tblCellSpacing w:w="{spacing}" w:type="dxa"/>"#)?;
    }
    write_borders(xml, "tblBorders", &style.borders)?;
    xml.push_str("</w:tblPr>");

    let margins = Margins {
        top: None,
        bottom: None,
        ..style.margins
    };
    write_cell_properties(
        xml,
        &Borders::default(),
        style.background.as_ref(),
        &margins,
        style.content_vertical_align,
    )
}

fn write_conditional_format(xml: &mut String, format: &CellFormat) -> Result<()> {
    if let Some(align) = format.paragraph.align {
        write!(xml, r#"<w:pPr><w:jc w:val="{}"/></w:pPr>"#, align.as_str())?;
    }
    write_run_properties(xml, &format.run_attributes, true)?;
    write_cell_properties(
        xml,
        &format.borders,
        format.background.as_ref(),
        &format.margins,
        format.vertical_align,
    )
}

/// `w:tcPr` of a table style or conditional format; nothing when empty.
fn write_cell_properties(
    xml: &mut String,
    borders: &Borders,
    background: Option<&Shading>,
    margins: &Margins,
    vertical_align: Option<VerticalAlign>,
) -> Result<()> {
    let mut props = String::new();
    write_borders(&mut props, "tcBorders", borders)?;
    if let Some(background) = background {
        write_shading(&mut props, background)?;
    }
    write_margins(&mut props, "tcMar", margins)?;
    if let Some(align) = vertical_align {
        write!(props, r#"<w:vAlign w:val="{}"/>"#, align.as_str())?;
    }
    if !props.is_empty() {
        xml.push_str("<w:tcPr>");
        xml.push_str(&props);
        xml.push_str("</w:tcPr>");
    }
    Ok(())
}

/// `word/fontTable.xml` declaring `fonts`.
pub(crate) fn font_table_xml<S: AsRef<str>>(fonts: &[S]) -> Result<String> {
    let mut xml = String::with_capacity(256 + fonts.len() * 160);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    write!(
        xml,
        r#"<w:fonts xmlns:r="{}" xmlns:w="{}">"#,
        namespace::OFC_RELATIONSHIPS,
        namespace::WML_MAIN
    )?;
    for font in fonts {
        write!(
            xml,
            r#"<w:font w:name="{}"><w:charset w:val="00"/><w:family w:val="auto"/><w:pitch w:val="default"/></w:font>"#,
            escape_xml(font.as_ref())
        )?;
    }
    xml.push_str("</w:fonts>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::border::Border;
    use crate::ooxml::docx::enums::{BorderLine, ConditionalFormatType, HorizontalAlign};
    use crate::ooxml::docx::run::RunAttributes;
    use crate::ooxml::error::OoxmlError;

    fn style_node<'a>(doc: &'a roxmltree::Document<'a>, id: &str) -> Option<roxmltree::Node<'a, 'a>> {
        doc.descendants().find(|n| {
            n.tag_name().name() == "style"
                && n.attribute((namespace::WML_MAIN, "styleId")) == Some(id)
        })
    }

    #[test]
    fn test_default_style_sheet() {
        let xml = StyleRegistry::with_defaults().to_xml().unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();

        let normal = style_node(&doc, "Normal").unwrap();
        assert_eq!(normal.children().filter(|n| n.is_element()).count(), 1);
        assert_eq!(xml.matches(r#"w:styleId="Normal""#).count(), 1);
        assert_eq!(xml.matches(r#"w:styleId="TableNormal""#).count(), 1);
        assert!(xml.contains(r#"w:line="460" w:before="0" w:after="0""#));
        assert!(xml.contains(r#"<w:rFonts w:ascii="Arial""#));
        assert!(xml.contains(r#"<w:color w:val="333333"/>"#));

        let heading = style_node(&doc, "Heading2").unwrap();
        let outline = heading
            .descendants()
            .find(|n| n.tag_name().name() == "outlineLvl")
            .unwrap();
        assert_eq!(outline.attribute((namespace::WML_MAIN, "val")), Some("1"));

        let hyperlink = style_node(&doc, "Hyperlink").unwrap();
        assert_eq!(hyperlink.attribute((namespace::WML_MAIN, "type")), Some("character"));
        assert!(!hyperlink.descendants().any(|n| n.tag_name().name() == "pPr"));
    }

    #[test]
    fn test_table_style_with_conditional_formats() {
        let mut styles = StyleRegistry::with_defaults();
        styles
            .register(
                Style::new("Grid", "grid")
                    .style_type(StyleType::Table)
                    .border(crate::ooxml::docx::border::BorderSide::Top, Border::new(BorderLine::Single))
                    .conditional_format(
                        ConditionalFormatType::FirstRow,
                        CellFormat::new()
                            .align(HorizontalAlign::Center)
                            .run_attributes(RunAttributes::new().bold(true))
                            .background(Shading::color("CCCCCC")),
                    ),
            )
            .unwrap();
        let xml = styles.to_xml().unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let grid = style_node(&doc, "Grid").unwrap();
        let children: Vec<&str> = grid
            .children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name())
            .collect();
        assert_eq!(children, vec!["name", "basedOn", "tblPr", "tblStylePr"]);

        let conditional = grid
            .children()
            .find(|n| n.tag_name().name() == "tblStylePr")
            .unwrap();
        assert_eq!(conditional.attribute((namespace::WML_MAIN, "type")), Some("firstRow"));
        let inner: Vec<&str> = conditional
            .children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name())
            .collect();
        assert_eq!(inner, vec!["pPr", "rPr", "tcPr"]);
    }

    #[test]
    fn test_row_and_cell_styles_are_not_written() {
        let mut styles = StyleRegistry::with_defaults();
        styles
            .register(Style::new("Shaded", "shaded").style_type(StyleType::TableCell))
            .unwrap();
        let xml = styles.to_xml().unwrap();
        assert!(!xml.contains("Shaded"));
    }

    #[test]
    fn test_missing_default_style() {
        let mut styles = StyleRegistry::with_defaults();
        styles.unregister("Normal");
        assert!(matches!(styles.to_xml(), Err(OoxmlError::MissingDefaultStyle)));
    }

    #[test]
    fn test_font_table() {
        let xml = font_table_xml(&["Arial", "Trebuchet MS"]).unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let names: Vec<&str> = doc
            .descendants()
            .filter(|n| n.tag_name().name() == "font")
            .filter_map(|n| n.attribute((namespace::WML_MAIN, "name")))
            .collect();
        assert_eq!(names, vec!["Arial", "Trebuchet MS"]);
    }
}
