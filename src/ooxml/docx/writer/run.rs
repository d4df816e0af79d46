/// Run emitters: run properties, text runs and breaks.
use super::{PartWriter, write_shading};
use crate::common::xml::{escape_xml, needs_space_preserve};
use crate::ooxml::docx::enums::Whitespace;
use crate::ooxml::docx::run::{Run, RunAttributes, TextRun};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

fn on_off(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Write `w:rPr` for `attrs`.
///
/// With `skip_empty` nothing is written when no property is set; otherwise
/// an empty `<w:rPr/>` is still emitted.
pub(crate) fn write_run_properties(
    xml: &mut String,
    attrs: &RunAttributes,
    skip_empty: bool,
) -> Result<()> {
    let mut props = String::new();

    if let Some(style) = &attrs.style {
        write!(props, r#"<w:rStyle w:val="{}"/>"#, escape_xml(style))?;
    }
    if let Some(font) = &attrs.font {
        let font = escape_xml(font);
        write!(
            props,
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#
        )?;
    }
    for (element, value) in [
        ("b", attrs.bold),
        ("i", attrs.italic),
        ("caps", attrs.caps),
        ("smallCaps", attrs.small_caps),
        ("strike", attrs.strike),
    ] {
        if let Some(value) = value {
            write!(props, r#"<w:{element} w:val="{}"/>"#, on_off(value))?;
        }
    }
    match (&attrs.theme_color, &attrs.color) {
        (Some(theme), _) => {
            write!(
                props,
                r#"<w:color w:val="{}" w:themeColor="{}""#,
                escape_xml(&theme.color),
                theme.reference.as_str()
            )?;
            if let Some(tint) = &theme.tint {
                write!(props, r#" w:themeTint="{}""#, escape_xml(tint))?;
            }
            if let Some(shade) = &theme.shade {
                write!(props, r#" w:themeShade="{}""#, escape_xml(shade))?;
            }
            props.push_str("/>");
        },
        (None, Some(color)) if color != "none" => {
            write!(props, r#"<w:color w:val="{}"/>"#, escape_xml(color))?;
        },
        _ => {},
    }
    if let Some(size) = attrs.size {
        write!(props, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)?;
    }
    if let Some(underline) = attrs.underline {
        let val = if underline { "single" } else { "none" };
        write!(props, r#"<w:u w:val="{val}"/>"#)?;
    }
    if let Some(background) = &attrs.background {
        write_shading(&mut props, background)?;
    }
    if let Some(align) = attrs.vertical_align {
        write!(props, r#"<w:vertAlign w:val="{}"/>"#, align.as_str())?;
    }
    if let Some(rtl) = attrs.rtl {
        write!(props, r#"<w:rtl w:val="{}"/>"#, on_off(rtl))?;
    }

    if props.is_empty() {
        if !skip_empty {
            xml.push_str("<w:rPr/>");
        }
        return Ok(());
    }
    xml.push_str("<w:rPr>");
    xml.push_str(&props);
    xml.push_str("</w:rPr>");
    Ok(())
}

/// `w:t` with the whitespace handling of `attrs` applied.
pub(crate) fn write_text(xml: &mut String, text: &str, whitespace: Option<Whitespace>) -> Result<()> {
    let text = match whitespace {
        Some(mode) => mode.apply(text),
        None => text.into(),
    };
    if whitespace == Some(Whitespace::Preserve) || needs_space_preserve(&text) {
        write!(xml, r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(&text))?;
    } else {
        write!(xml, "<w:t>{}</w:t>", escape_xml(&text))?;
    }
    Ok(())
}

impl PartWriter<'_> {
    /// Write one run; `inherited` fills run formatting left unset.
    pub(crate) fn write_run(&mut self, xml: &mut String, run: &Run, inherited: &RunAttributes) -> Result<()> {
        match run {
            Run::Text(text) => write_text_run(xml, text, inherited),
            Run::Field(field) => self.write_field(xml, field, inherited),
            Run::Link(link) => self.write_link(xml, link, inherited),
            Run::Bookmark(bookmark) => self.write_bookmark(xml, bookmark),
            Run::LineBreak => {
                xml.push_str("<w:r><w:br/></w:r>");
                Ok(())
            },
            Run::PageBreak => {
                if self.page_breaks {
                    xml.push_str(r#"<w:r><w:br w:type="page"/></w:r>"#);
                }
                Ok(())
            },
        }
    }
}

fn write_text_run(xml: &mut String, run: &TextRun, inherited: &RunAttributes) -> Result<()> {
    let attrs = run.attributes.merged(inherited);
    xml.push_str("<w:r>");
    write_run_properties(xml, &attrs, true)?;
    write_text(xml, &run.content, attrs.whitespace)?;
    if run.end_tab {
        xml.push_str("<w:tab/>");
    }
    xml.push_str("</w:r>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::border::{Shading, ThemeColor};
    use crate::ooxml::docx::enums::{RunVerticalAlign, ThemeColorRef};

    #[test]
    fn test_run_properties_order() {
        let attrs = RunAttributes::new()
            .font("Georgia")
            .bold(true)
            .italic(false)
            .color("FF0000")
            .size(28)
            .underline(true)
            .background(Shading::color("FFFF00"))
            .vertical_align(RunVerticalAlign::Superscript);
        let mut xml = String::new();
        write_run_properties(&mut xml, &attrs, true).unwrap();

        let tags: Vec<&str> = xml
            .split('<')
            .filter_map(|t| t.strip_prefix("w:"))
            .map(|t| t.split([' ', '/', '>']).next().unwrap_or(""))
            .collect();
        assert_eq!(
            tags,
            vec!["rPr", "rFonts", "b", "i", "color", "sz", "szCs", "u", "shd", "vertAlign"]
        );
        assert!(xml.contains(r#"<w:i w:val="0"/>"#));
        assert!(xml.contains(r#"<w:u w:val="single"/>"#));
    }

    #[test]
    fn test_empty_properties() {
        let mut xml = String::new();
        write_run_properties(&mut xml, &RunAttributes::new(), true).unwrap();
        assert!(xml.is_empty());
        write_run_properties(&mut xml, &RunAttributes::new(), false).unwrap();
        assert_eq!(xml, "<w:rPr/>");

        xml.clear();
        write_run_properties(&mut xml, &RunAttributes::new().color("none"), true).unwrap();
        assert!(xml.is_empty());
    }

    #[test]
    fn test_theme_color() {
        let theme = ThemeColor::new(ThemeColorRef::Accent2).shade("BF");
        let mut xml = String::new();
        write_run_properties(&mut xml, &RunAttributes::new().theme_color(theme), true).unwrap();
        assert_eq!(
            xml,
            r#"<w:rPr><w:color w:val="auto" w:themeColor="accent2" w:themeShade="BF"/></w:rPr>"#
        );
    }

    #[test]
    fn test_text_run_inherits_and_preserves_space() {
        let run = TextRun::new(" total ").end_tab(true);
        let mut xml = String::new();
        write_text_run(&mut xml, &run, &RunAttributes::new().bold(true)).unwrap();
        assert_eq!(
            xml,
            r#"<w:r><w:rPr><w:b w:val="1"/></w:rPr><w:t xml:space="preserve"> total </w:t><w:tab/></w:r>"#
        );

        xml.clear();
        write_text(&mut xml, "a & b", None).unwrap();
        assert_eq!(xml, "<w:t>a &amp; b</w:t>");
    }
}
