/// Complex field emitters.
///
/// A field is a run sequence: `begin` marker, instruction text, optional
/// `separate` marker followed by a cached result, `end` marker. Word fills
/// in the result when fields are updated.
use super::PartWriter;
use super::run::write_run_properties;
use crate::common::xml::escape_xml;
use crate::ooxml::docx::run::{FieldRun, RunAttributes};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Field character marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldChar {
    Begin,
    Separate,
    End,
}

impl FieldChar {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Separate => "separate",
            Self::End => "end",
        }
    }
}

/// `<w:r><w:fldChar .../></w:r>`
pub(crate) fn write_field_char(xml: &mut String, kind: FieldChar, attrs: &RunAttributes) -> Result<()> {
    xml.push_str("<w:r>");
    write_run_properties(xml, attrs, true)?;
    write!(xml, r#"<w:fldChar w:fldCharType="{}"/>"#, kind.as_str())?;
    xml.push_str("</w:r>");
    Ok(())
}

/// `<w:r><w:instrText>...</w:instrText></w:r>`, spaces preserved.
pub(crate) fn write_instruction(xml: &mut String, instruction: &str, attrs: &RunAttributes) -> Result<()> {
    xml.push_str("<w:r>");
    write_run_properties(xml, attrs, true)?;
    write!(
        xml,
        r#"<w:instrText xml:space="preserve">{}</w:instrText>"#,
        escape_xml(instruction)
    )?;
    xml.push_str("</w:r>");
    Ok(())
}

/// A complete field without a cached result.
pub(crate) fn write_simple_field(xml: &mut String, instruction: &str, attrs: &RunAttributes) -> Result<()> {
    write_field_char(xml, FieldChar::Begin, attrs)?;
    write_instruction(xml, instruction, attrs)?;
    write_field_char(xml, FieldChar::End, attrs)
}

impl PartWriter<'_> {
    pub(crate) fn write_field(&mut self, xml: &mut String, field: &FieldRun, inherited: &RunAttributes) -> Result<()> {
        let attrs = field.attributes.merged(inherited);
        write_simple_field(xml, &field.name, &attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_field_runs() {
        let mut xml = String::new();
        write_simple_field(&mut xml, "PAGE", &RunAttributes::new().size(18)).unwrap();
        assert_eq!(xml.matches("<w:r>").count(), 3);
        assert_eq!(xml.matches(r#"<w:sz w:val="18"/>"#).count(), 3);
        let begin = xml.find(r#"w:fldCharType="begin""#).unwrap();
        let instr = xml.find(">PAGE<").unwrap();
        let end = xml.find(r#"w:fldCharType="end""#).unwrap();
        assert!(begin < instr && instr < end);
    }

    #[test]
    fn test_instruction_is_escaped() {
        let mut xml = String::new();
        write_instruction(&mut xml, r#" TOC \o "1-3" "#, &RunAttributes::new()).unwrap();
        assert_eq!(
            xml,
            r#"<w:r><w:instrText xml:space="preserve"> TOC \o &quot;1-3&quot; </w:instrText></w:r>"#
        );
    }
}
