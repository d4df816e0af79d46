//! List numbering definitions (`word/numbering.xml`).
//!
//! Every list kind owns one abstract numbering definition with a level entry
//! per [`ListStyle`]. Each top-level list in the document gets its own
//! numbering instance that points at the abstract definition and restarts
//! the count, so two ordered lists both begin at 1.

use super::enums::{HorizontalAlign, ListType};
use super::list::MAX_LIST_LEVEL;
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use std::fmt::Write as FmtWrite;

const ORDERED_FORMATS: [&str; 3] = ["decimal", "lowerLetter", "lowerRoman"];
const BULLETS: [&str; 3] = ["\u{25CF}", "\u{25CB}", "\u{25A0}"];

/// Numbering format of one list level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStyle {
    pub list_type: ListType,
    pub level: u32,
    /// `w:numFmt` value such as `decimal` or `bullet`
    pub format: String,
    /// `w:lvlText` value such as `%1.` or a bullet glyph
    pub value: String,
    pub align: HorizontalAlign,
    /// Left indent in twips
    pub left: u32,
    /// Hanging indent in twips
    pub indent: u32,
    pub start: u32,
}

impl ListStyle {
    /// Built-in style for `list_type` at `level`.
    pub fn new(list_type: ListType, level: u32) -> Self {
        let cycle = (level % 3) as usize;
        let (format, value) = match list_type {
            ListType::Ordered => (ORDERED_FORMATS[cycle], format!("%{}.", level + 1)),
            ListType::Unordered => ("bullet", BULLETS[cycle].to_string()),
        };
        Self {
            list_type,
            level,
            format: format.to_string(),
            value,
            align: HorizontalAlign::Left,
            left: 720 * (level + 1),
            indent: 360,
            start: 1,
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }

    pub fn indents(mut self, left: u32, indent: u32) -> Self {
        self.left = left;
        self.indent = indent;
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.level > MAX_LIST_LEVEL {
            return Err(OoxmlError::validation(
                "list style",
                "level",
                format!("must be at most {MAX_LIST_LEVEL}"),
            ));
        }
        if self.format.trim().is_empty() {
            return Err(OoxmlError::validation("list style", "format", "must not be empty"));
        }
        if self.value.is_empty() {
            return Err(OoxmlError::validation("list style", "value", "must not be empty"));
        }
        Ok(())
    }
}

/// List styles keyed by `(type, level)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStyles {
    styles: Vec<ListStyle>,
}

impl Default for ListStyles {
    fn default() -> Self {
        let styles = [ListType::Ordered, ListType::Unordered]
            .into_iter()
            .flat_map(|kind| (0..=MAX_LIST_LEVEL).map(move |level| ListStyle::new(kind, level)))
            .collect();
        Self { styles }
    }
}

impl ListStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the style for its `(type, level)`.
    pub fn register(&mut self, style: ListStyle) -> Result<()> {
        style.validate()?;
        match self
            .styles
            .iter_mut()
            .find(|s| s.list_type == style.list_type && s.level == style.level)
        {
            Some(existing) => *existing = style,
            None => self.styles.push(style),
        }
        Ok(())
    }

    pub fn find(&self, list_type: ListType, level: u32) -> Option<&ListStyle> {
        self.styles
            .iter()
            .find(|s| s.list_type == list_type && s.level == level)
    }

    /// Styles of `list_type` ordered by level.
    fn levels(&self, list_type: ListType) -> Vec<&ListStyle> {
        let mut levels: Vec<&ListStyle> = self
            .styles
            .iter()
            .filter(|s| s.list_type == list_type)
            .collect();
        levels.sort_by_key(|s| s.level);
        levels
    }

    /// Serialize `numbering.xml` with one numbering instance per entry of
    /// `lists`; instance `n` (1-based) belongs to `lists[n - 1]`.
    pub(crate) fn to_xml(&self, lists: &[ListType]) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str("<w:numbering");
        for (prefix, uri) in namespace::WML_ROOT {
            write!(xml, r#" xmlns:{prefix}="{uri}""#)?;
        }
        xml.push('>');

        for kind in [ListType::Ordered, ListType::Unordered] {
            write!(xml, r#"<w:abstractNum w:abstractNumId="{}">"#, kind.abstract_id())?;
            xml.push_str(r#"<w:multiLevelType w:val="hybridMultilevel"/>"#);
            for style in self.levels(kind) {
                write!(xml, r#"<w:lvl w:ilvl="{}">"#, style.level)?;
                write!(xml, r#"<w:start w:val="{}"/>"#, style.start)?;
                write!(xml, r#"<w:numFmt w:val="{}"/>"#, escape_xml(&style.format))?;
                write!(xml, r#"<w:lvlText w:val="{}"/>"#, escape_xml(&style.value))?;
                write!(xml, r#"<w:lvlJc w:val="{}"/>"#, style.align.as_str())?;
                write!(
                    xml,
                    r#"<w:pPr><w:ind w:left="{}" w:hanging="{}"/></w:pPr>"#,
                    style.left, style.indent
                )?;
                xml.push_str(r#"<w:rPr><w:u w:val="none"/></w:rPr>"#);
                xml.push_str("</w:lvl>");
            }
            xml.push_str("</w:abstractNum>");
        }

        for (num_id, kind) in (1..).zip(lists) {
            write!(
                xml,
                r#"<w:num w:numId="{num_id}"><w:abstractNumId w:val="{}"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>"#,
                kind.abstract_id()
            )?;
        }

        xml.push_str("</w:numbering>");
        log::debug!("numbering.xml: {} list instance(s)", lists.len());
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels() {
        let styles = ListStyles::default();
        let third = styles.find(ListType::Ordered, 2).unwrap();
        assert_eq!(third.format, "lowerRoman");
        assert_eq!(third.value, "%3.");
        assert_eq!(third.left, 2160);
        assert_eq!(third.indent, 360);

        let fourth = styles.find(ListType::Unordered, 3).unwrap();
        assert_eq!(fourth.format, "bullet");
        assert_eq!(fourth.value, "\u{25CF}");
        assert!(styles.find(ListType::Ordered, 9).is_none());
    }

    #[test]
    fn test_register_replaces_level() {
        let mut styles = ListStyles::new();
        styles
            .register(ListStyle::new(ListType::Ordered, 0).format("upperRoman").start(3))
            .unwrap();
        let first = styles.find(ListType::Ordered, 0).unwrap();
        assert_eq!(first.format, "upperRoman");
        assert_eq!(first.start, 3);
        assert!(styles.register(ListStyle::new(ListType::Ordered, 9)).is_err());
    }

    #[test]
    fn test_numbering_part_instances() {
        let styles = ListStyles::default();
        let xml = styles
            .to_xml(&[ListType::Ordered, ListType::Unordered, ListType::Ordered])
            .unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();

        let abstracts = doc
            .descendants()
            .filter(|n| n.tag_name().name() == "abstractNum")
            .count();
        assert_eq!(abstracts, 2);

        let nums: Vec<(String, String)> = doc
            .descendants()
            .filter(|n| n.tag_name().name() == "num")
            .map(|n| {
                let id = n.attribute((namespace::WML_MAIN, "numId")).unwrap().to_string();
                let target = n
                    .first_element_child()
                    .and_then(|c| c.attribute((namespace::WML_MAIN, "val")))
                    .unwrap()
                    .to_string();
                (id, target)
            })
            .collect();
        assert_eq!(
            nums,
            vec![
                ("1".to_string(), "1".to_string()),
                ("2".to_string(), "2".to_string()),
                ("3".to_string(), "1".to_string()),
            ]
        );
    }
}
