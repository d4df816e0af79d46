/// Paragraph emitters: plain paragraphs, horizontal rules and block page
/// breaks.
use super::run::write_run_properties;
use super::{PartWriter, write_border, write_shading};
use crate::common::xml::escape_xml;
use crate::ooxml::docx::border::BorderSide;
use crate::ooxml::docx::content::Rule;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Element name of a border side inside `w:pBdr`.
fn paragraph_border_element(side: BorderSide) -> &'static str {
    match side {
        BorderSide::Horizontal => "between",
        BorderSide::Vertical => "bar",
        other => other.element(),
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Write `w:pPr` for `para`, naming `fallback_style` when it has no style.
pub(crate) fn write_paragraph_properties(
    xml: &mut String,
    para: &Paragraph,
    fallback_style: &str,
) -> Result<()> {
    let attrs = &para.attributes;
    xml.push_str("<w:pPr>");
    let style = para.style.as_deref().unwrap_or(fallback_style);
    write!(xml, r#"<w:pStyle w:val="{}"/>"#, escape_xml(style))?;

    for (element, value) in [
        ("keepNext", attrs.keep_next),
        ("keepLines", attrs.keep_lines),
        ("widowControl", attrs.widow_control),
    ] {
        if let Some(value) = value {
            write!(xml, r#"<w:{element} w:val="{}"/>"#, on_off(value))?;
        }
    }

    if !para.borders.is_empty() {
        xml.push_str("<w:pBdr>");
        for (side, border) in para.borders.defined() {
            write_border(xml, paragraph_border_element(side), border)?;
        }
        xml.push_str("</w:pBdr>");
    }
    if let Some(shading) = &para.shading {
        write_shading(xml, shading)?;
    }
    if !para.tabs.is_empty() {
        xml.push_str("<w:tabs>");
        for tab in &para.tabs {
            write!(
                xml,
                r#"<w:tab w:val="{}" w:pos="{}" w:leader="{}"/>"#,
                tab.align.as_str(),
                tab.position,
                tab.leader.as_str()
            )?;
        }
        xml.push_str("</w:tabs>");
    }

    let line = para.spacing.line.or(attrs.line);
    if para.spacing.before.is_some() || para.spacing.after.is_some() || line.is_some() {
        xml.push_str("<w:spacing");
        for (name, value) in [
            ("before", para.spacing.before),
            ("after", para.spacing.after),
            ("line", line),
        ] {
            if let Some(value) = value {
                write!(xml, r#" w:{name}="{value}""#)?;
            }
        }
        xml.push_str("/>");
    }
    if let Some((side, value)) = para.indent {
        write!(xml, r#"<w:ind w:{}="{value}"/>"#, side.as_str())?;
    }
    xml.push_str(r#"<w:contextualSpacing w:val="0"/>"#);
    if let Some(align) = attrs.align {
        write!(xml, r#"<w:jc w:val="{}"/>"#, align.as_str())?;
    }
    write_run_properties(xml, &para.run_attributes, false)?;
    xml.push_str("</w:pPr>");
    Ok(())
}

impl PartWriter<'_> {
    pub(crate) fn write_paragraph(&mut self, xml: &mut String, para: &Paragraph) -> Result<()> {
        xml.push_str("<w:p>");
        write_paragraph_properties(xml, para, self.paragraph_style)?;
        for run in &para.runs {
            self.write_run(xml, run, &para.run_attributes)?;
        }
        xml.push_str("</w:p>");
        Ok(())
    }

    /// A horizontal rule: an empty paragraph with a top border.
    pub(crate) fn write_rule(&mut self, xml: &mut String, rule: &Rule) -> Result<()> {
        xml.push_str("<w:p><w:pPr><w:pBdr>");
        write_border(xml, "top", &rule.border)?;
        xml.push_str("</w:pBdr></w:pPr></w:p>");
        Ok(())
    }

    pub(crate) fn write_page_break(&mut self, xml: &mut String) {
        if self.page_breaks {
            xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::border::{Border, Shading};
    use crate::ooxml::docx::enums::{BorderLine, HorizontalAlign, TabAlign, TabLeader};
    use crate::ooxml::docx::paragraph::{IndentSide, TabStop};
    use crate::ooxml::docx::relationship::RelationshipRegistry;
    use crate::ooxml::docx::run::RunAttributes;
    use crate::ooxml::docx::styles::StyleRegistry;

    fn element_order(xml: &str) -> Vec<&str> {
        let ppr = &xml[xml.find("<w:pPr>").unwrap()..xml.find("</w:pPr>").unwrap()];
        ppr.split('<')
            .filter_map(|t| t.strip_prefix("w:"))
            .map(|t| t.split([' ', '/', '>']).next().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_paragraph_properties_order() {
        let para = Paragraph::new("Total")
            .style("Heading2")
            .keep_next(true)
            .border(BorderSide::Bottom, Border::new(BorderLine::Single).size(6))
            .shading(Shading::color("EEEEEE"))
            .tab(TabStop::new(4320).align(TabAlign::End).leader(TabLeader::Dot))
            .spacing(Some(120), None)
            .line(276)
            .indent(IndentSide::Left, 360)
            .align(HorizontalAlign::Right);
        let mut xml = String::new();
        write_paragraph_properties(&mut xml, &para, "Normal").unwrap();

        assert_eq!(
            element_order(&xml),
            vec![
                "pPr",
                "pStyle",
                "keepNext",
                "pBdr",
                "bottom",
                "shd",
                "tabs",
                "tab",
                "spacing",
                "ind",
                "contextualSpacing",
                "jc",
                "rPr",
            ]
        );
        assert!(xml.contains(r#"<w:spacing w:before="120" w:line="276"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="360"/>"#));
    }

    #[test]
    fn test_paragraph_runs_inherit_paragraph_formatting() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut writer =
            PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360).for_margin_part("Header");

        let para = Paragraph::new("Draft")
            .run_attributes(RunAttributes::new().italic(true))
            .page_break();
        let mut xml = String::new();
        writer.write_paragraph(&mut xml, &para).unwrap();

        assert!(xml.contains(r#"<w:pStyle w:val="Header"/>"#));
        assert_eq!(xml.matches(r#"<w:i w:val="1"/>"#).count(), 2);
        assert!(!xml.contains(r#"w:type="page""#));
        assert!(roxmltree::Document::parse(&format!(
            r#"<root xmlns:w="urn:w">{xml}</root>"#
        ))
        .is_ok());
    }

    #[test]
    fn test_rule_and_page_break() {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut writer = PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360);

        let mut xml = String::new();
        writer.write_rule(&mut xml, &Rule::new().color("333333")).unwrap();
        assert!(xml.starts_with("<w:p><w:pPr><w:pBdr><w:top"));
        assert!(xml.contains(r#"w:color="333333""#));

        xml.clear();
        writer.write_page_break(&mut xml);
        assert_eq!(xml, r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
    }
}
