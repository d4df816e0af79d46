/// Theme part writer (`word/theme/theme1.xml`).
///
/// The colour scheme comes from the [`Theme`]; the font scheme and the
/// format scheme are fixed tables.
use crate::common::xml::escape_xml;
use crate::ooxml::docx::theme::Theme;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;

const SCHEME_NAME: &str = "Longan";
const LATIN_TYPEFACE: &str = "Times New Roman";

/// Script-specific typefaces of the major and minor fonts.
const SCRIPT_FONTS: &[(&str, &str)] = &[
    ("Jpan", "ＭＳ ゴシック"),
    ("Hang", "맑은 고딕"),
    ("Hans", "宋体"),
    ("Hant", "新細明體"),
    ("Arab", "Times New Roman"),
    ("Hebr", "Times New Roman"),
    ("Thai", "Angsana New"),
    ("Ethi", "Nyala"),
    ("Beng", "Vrinda"),
    ("Gujr", "Shruti"),
    ("Khmr", "MoolBoran"),
    ("Knda", "Tunga"),
    ("Guru", "Raavi"),
    ("Cans", "Euphemia"),
    ("Cher", "Plantagenet Cherokee"),
    ("Yiii", "Microsoft Yi Baiti"),
    ("Tibt", "Microsoft Himalaya"),
    ("Thaa", "MV Boli"),
    ("Deva", "Mangal"),
    ("Telu", "Gautami"),
    ("Taml", "Latha"),
    ("Syrc", "Estrangelo Edessa"),
    ("Orya", "Kalinga"),
    ("Mlym", "Kartika"),
    ("Laoo", "DokChampa"),
    ("Sinh", "Iskoola Pota"),
    ("Mong", "Mongolian Baiti"),
    ("Viet", "Times New Roman"),
    ("Uigh", "Microsoft Uighur"),
];

/// Gradient stop: position and `phClr` modifiers.
type Stop = (u32, &'static [(&'static str, u32)]);

const FILL_SUBTLE: &[Stop] = &[
    (0, &[("tint", 50_000), ("satMod", 300_000)]),
    (35_000, &[("tint", 37_000), ("satMod", 300_000)]),
    (100_000, &[("tint", 15_000), ("satMod", 350_000)]),
];

const FILL_INTENSE: &[Stop] = &[
    (0, &[("shade", 51_000), ("satMod", 130_000)]),
    (80_000, &[("shade", 93_000), ("satMod", 130_000)]),
    (100_000, &[("shade", 94_000), ("satMod", 135_000)]),
];

const BG_SUBTLE: &[Stop] = &[
    (0, &[("tint", 40_000), ("satMod", 350_000)]),
    (40_000, &[("tint", 45_000), ("shade", 99_000), ("satMod", 350_000)]),
    (100_000, &[("shade", 20_000), ("satMod", 255_000)]),
];

const BG_INTENSE: &[Stop] = &[
    (0, &[("tint", 80_000), ("satMod", 300_000)]),
    (100_000, &[("shade", 30_000), ("satMod", 200_000)]),
];

impl Theme {
    /// Serialize the theme part.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(8192);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<a:theme xmlns:a="{}" name="{}">"#,
            namespace::DML_MAIN,
            escape_xml(&self.name)
        )?;
        xml.push_str("<a:themeElements>");

        write!(xml, r#"<a:clrScheme name="{}">"#, escape_xml(&self.name))?;
        for (slot, color) in self.colors() {
            write!(
                xml,
                r#"<a:{0}><a:srgbClr val="{1}"/></a:{0}>"#,
                slot.element(),
                color
            )?;
        }
        xml.push_str("</a:clrScheme>");

        write_font_scheme(&mut xml)?;
        write_format_scheme(&mut xml)?;

        xml.push_str("</a:themeElements>");
        xml.push_str("<a:objectDefaults/>");
        xml.push_str("<a:extraClrSchemeLst/>");
        xml.push_str("</a:theme>");
        Ok(xml)
    }
}

fn write_font_scheme(xml: &mut String) -> Result<()> {
    write!(xml, r#"<a:fontScheme name="{SCHEME_NAME}">"#)?;
    for element in ["a:majorFont", "a:minorFont"] {
        write!(xml, r#"<{element}><a:latin typeface="{LATIN_TYPEFACE}"/>"#)?;
        xml.push_str(r#"<a:ea typeface=""/><a:cs typeface=""/>"#);
        for (script, typeface) in SCRIPT_FONTS {
            write!(xml, r#"<a:font script="{script}" typeface="{typeface}"/>"#)?;
        }
        write!(xml, "</{element}>")?;
    }
    xml.push_str("</a:fontScheme>");
    Ok(())
}

fn write_format_scheme(xml: &mut String) -> Result<()> {
    write!(xml, r#"<a:fmtScheme name="{SCHEME_NAME}">"#)?;

    xml.push_str("<a:fillStyleLst>");
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    write_gradient(xml, FILL_SUBTLE, r#"<a:lin ang="16200000" scaled="1"/>"#)?;
    write_gradient(xml, FILL_INTENSE, r#"<a:lin ang="16200000" scaled="0"/>"#)?;
    xml.push_str("</a:fillStyleLst>");

    xml.push_str("<a:lnStyleLst>");
    for (width, modifiers) in [
        (9525, r#"<a:shade val="95000"/><a:satMod val="105000"/>"#),
        (25_400, ""),
        (38_100, ""),
    ] {
        write!(
            xml,
            r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill>"#
        )?;
        if modifiers.is_empty() {
            xml.push_str(r#"<a:schemeClr val="phClr"/>"#);
        } else {
            write!(xml, r#"<a:schemeClr val="phClr">{modifiers}</a:schemeClr>"#)?;
        }
        xml.push_str(r#"</a:solidFill><a:prstDash val="solid"/></a:ln>"#);
    }
    xml.push_str("</a:lnStyleLst>");

    xml.push_str("<a:effectStyleLst>");
    for (index, (dist, alpha)) in [(20_000, 38_000), (23_000, 35_000), (23_000, 35_000)]
        .into_iter()
        .enumerate()
    {
        xml.push_str("<a:effectStyle><a:effectLst>");
        write!(
            xml,
            r#"<a:outerShdw blurRad="40000" dist="{dist}" dir="5400000" rotWithShape="0"><a:srgbClr val="000000"><a:alpha val="{alpha}"/></a:srgbClr></a:outerShdw>"#
        )?;
        xml.push_str("</a:effectLst>");
        if index == 2 {
            xml.push_str(r#"<a:scene3d><a:camera prst="orthographicFront"><a:rot lat="0" lon="0" rev="0"/></a:camera>"#);
            xml.push_str(r#"<a:lightRig rig="threePt" dir="t"><a:rot lat="0" lon="0" rev="1200000"/></a:lightRig></a:scene3d>"#);
            xml.push_str(r#"<a:sp3d><a:bevelT w="63500" h="25400"/></a:sp3d>"#);
        }
        xml.push_str("</a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst>");

    xml.push_str("<a:bgFillStyleLst>");
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    write_gradient(
        xml,
        BG_SUBTLE,
        r#"<a:path path="circle"><a:fillToRect l="50000" t="-80000" r="50000" b="180000"/></a:path>"#,
    )?;
    write_gradient(
        xml,
        BG_INTENSE,
        r#"<a:path path="circle"><a:fillToRect l="50000" t="50000" r="50000" b="50000"/></a:path>"#,
    )?;
    xml.push_str("</a:bgFillStyleLst>");

    xml.push_str("</a:fmtScheme>");
    Ok(())
}

fn write_gradient(xml: &mut String, stops: &[Stop], shade: &str) -> Result<()> {
    xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst>"#);
    for (position, modifiers) in stops {
        write!(xml, r#"<a:gs pos="{position}"><a:schemeClr val="phClr">"#)?;
        for (name, value) in modifiers.iter() {
            write!(xml, r#"<a:{name} val="{value}"/>"#)?;
        }
        xml.push_str("</a:schemeClr></a:gs>");
    }
    xml.push_str("</a:gsLst>");
    xml.push_str(shade);
    xml.push_str("</a:gradFill>");
    Ok(())
}
