/// Section properties (`w:sectPr`) and the settings part.
use super::XML_DECLARATION;
use crate::ooxml::docx::settings::PageSettings;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;

const COMPAT_URI: &str = "http://schemas.microsoft.com/office/word";
const COMPATIBILITY_MODE: u32 = 14;
const DEFAULT_TAB_STOP: u32 = 720;

/// Theme colour slots as seen by the document.
const COLOR_MAPPING: &[(&str, &str)] = &[
    ("bg1", "light1"),
    ("t1", "dark1"),
    ("bg2", "light2"),
    ("t2", "dark2"),
    ("accent1", "accent1"),
    ("accent2", "accent2"),
    ("accent3", "accent3"),
    ("accent4", "accent4"),
    ("accent5", "accent5"),
    ("accent6", "accent6"),
    ("hyperlink", "hyperlink"),
    ("followedHyperlink", "followedHyperlink"),
];

/// Trailing `w:sectPr` of the body: margin part references, page size and
/// margins.
pub(crate) fn write_section_properties(
    xml: &mut String,
    page: &PageSettings,
    header: Option<&str>,
    footer: Option<&str>,
) -> Result<()> {
    xml.push_str("<w:sectPr>");
    if let Some(r_id) = header {
        write!(xml, r#"<w:headerReference r:id="{r_id}" w:type="default"/>"#)?;
    }
    if let Some(r_id) = footer {
        write!(xml, r#"<w:footerReference r:id="{r_id}" w:type="default"/>"#)?;
    }
    write!(
        xml,
        r#"<w:pgSz w:w="{}" w:h="{}" w:orient="{}"/>"#,
        page.width,
        page.height,
        page.orientation.as_str()
    )?;
    let margins = &page.margins;
    write!(
        xml,
        r#"<w:pgMar w:top="{}" w:bottom="{}" w:left="{}" w:right="{}"/>"#,
        margins.top, margins.bottom, margins.left, margins.right
    )?;
    xml.push_str("</w:sectPr>");
    Ok(())
}

/// `word/settings.xml`
pub(crate) fn settings_xml() -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str("<w:settings");
    for (prefix, uri) in namespace::WML_ROOT {
        write!(xml, r#" xmlns:{prefix}="{uri}""#)?;
    }
    xml.push('>');
    xml.push_str(r#"<w:displayBackgroundShape w:val="1"/>"#);
    write!(xml, r#"<w:defaultTabStop w:val="{DEFAULT_TAB_STOP}"/>"#)?;
    xml.push_str("<w:compat>");
    write!(
        xml,
        r#"<w:compatSetting w:name="compatibilityMode" w:uri="{COMPAT_URI}" w:val="{COMPATIBILITY_MODE}"/>"#
    )?;
    xml.push_str("</w:compat>");
    xml.push_str(r#"<w:autoHyphenation w:val="1"/>"#);
    xml.push_str(r#"<w:consecutiveHyphenLimit w:val="2"/>"#);
    xml.push_str("<w:clrSchemeMapping");
    for (slot, value) in COLOR_MAPPING {
        write!(xml, r#" w:{slot}="{value}""#)?;
    }
    xml.push_str("/>");
    xml.push_str("</w:settings>");
    Ok(xml)
}
