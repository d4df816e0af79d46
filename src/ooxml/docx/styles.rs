//! Style definitions and the per-document style registry.
//!
//! Styles are looked up by id without regard to case. Registering a style
//! whose id is already present replaces the earlier definition. Table styles
//! carry conditional formats keyed by structural position; the registry
//! resolves those, together with base-style inheritance, into the
//! [`CellFormat`] a given cell receives.

use super::border::{Border, BorderSide, Borders, Margins, Shading};
use super::enums::{
    BgStyle, ConditionalFormatType, HorizontalAlign, LineRule, StyleType, VerticalAlign,
};
use super::layout::CnfFlags;
use super::paragraph::ParagraphAttributes;
use super::run::RunAttributes;
use super::table::CellFormat;
use crate::ooxml::error::{OoxmlError, Result};
use std::collections::BTreeMap;

/// Id of the root paragraph style every other style falls back to.
pub const DEFAULT_STYLE_BASE: &str = "Normal";
/// Id of the root table style.
pub const DEFAULT_TABLE_STYLE_BASE: &str = "TableNormal";

/// A named style.
///
/// # Examples
///
/// ```rust,ignore
/// let quote = Style::new("Quote", "quote")
///     .run_attributes(RunAttributes::new().italic(true).color("666666"))
///     .indent(Some(720), None, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub id: String,
    pub name: String,
    pub style_type: StyleType,
    /// Base style id; `None` falls back to the root style for the type
    pub base: Option<String>,
    pub next: String,
    pub default: bool,
    pub line: Option<u32>,
    pub line_rule: LineRule,
    pub align: Option<HorizontalAlign>,
    pub indent_left: Option<i32>,
    pub indent_right: Option<i32>,
    pub indent_first: Option<i32>,
    pub keep_next: Option<bool>,
    pub keep_lines: Option<bool>,
    pub widow_control: Option<bool>,
    pub word_wrap: Option<bool>,
    pub locked: Option<bool>,
    /// Spacing before (`top`) and after (`bottom`); left and right apply to table cells
    pub margins: Margins,
    pub run_attributes: RunAttributes,
    /// Cell shading for table kinds
    pub background: Option<Shading>,
    pub borders: Borders,
    pub row_band_size: u32,
    pub col_band_size: u32,
    pub cell_spacing: Option<u32>,
    pub content_vertical_align: Option<VerticalAlign>,
    pub conditional_formats: BTreeMap<ConditionalFormatType, CellFormat>,
}

impl Style {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let default = id == DEFAULT_STYLE_BASE;
        Self {
            id,
            name: name.into(),
            style_type: StyleType::Paragraph,
            base: None,
            next: DEFAULT_STYLE_BASE.to_string(),
            default,
            line: Some(360),
            line_rule: LineRule::Exact,
            align: Some(HorizontalAlign::Left),
            indent_left: None,
            indent_right: None,
            indent_first: None,
            keep_next: None,
            keep_lines: None,
            widow_control: None,
            word_wrap: None,
            locked: None,
            margins: Margins::default(),
            run_attributes: RunAttributes::default(),
            background: None,
            borders: Borders::default(),
            row_band_size: 1,
            col_band_size: 1,
            cell_spacing: None,
            content_vertical_align: None,
            conditional_formats: BTreeMap::new(),
        }
    }

    /// Set the style kind. Table kinds drop the paragraph line and
    /// alignment defaults so they do not cascade into every cell.
    pub fn style_type(mut self, style_type: StyleType) -> Self {
        if style_type.is_table_kind() && !self.style_type.is_table_kind() {
            self.line = None;
            self.align = None;
        }
        self.style_type = style_type;
        self
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn line_rule(mut self, rule: LineRule) -> Self {
        self.line_rule = rule;
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn indent(mut self, left: Option<i32>, right: Option<i32>, first: Option<i32>) -> Self {
        self.indent_left = left;
        self.indent_right = right;
        self.indent_first = first;
        self
    }

    pub fn keep_next(mut self, value: bool) -> Self {
        self.keep_next = Some(value);
        self
    }

    pub fn keep_lines(mut self, value: bool) -> Self {
        self.keep_lines = Some(value);
        self
    }

    pub fn widow_control(mut self, value: bool) -> Self {
        self.widow_control = Some(value);
        self
    }

    /// Spacing before and after in twips.
    pub fn spacing(mut self, top: Option<u32>, bottom: Option<u32>) -> Self {
        self.margins.top = top;
        self.margins.bottom = bottom;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn run_attributes(mut self, attributes: RunAttributes) -> Self {
        self.run_attributes = attributes;
        self
    }

    pub fn background(mut self, background: Shading) -> Self {
        self.background = Some(background);
        self
    }

    pub fn border(mut self, side: BorderSide, border: Border) -> Self {
        self.borders.set_side(side, border);
        self
    }

    pub fn band_sizes(mut self, rows: u32, cols: u32) -> Self {
        self.row_band_size = rows;
        self.col_band_size = cols;
        self
    }

    pub fn cell_spacing(mut self, spacing: u32) -> Self {
        self.cell_spacing = Some(spacing);
        self
    }

    pub fn content_vertical_align(mut self, align: VerticalAlign) -> Self {
        self.content_vertical_align = Some(align);
        self
    }

    /// Add or replace the conditional format for `position`.
    pub fn conditional_format(mut self, position: ConditionalFormatType, format: CellFormat) -> Self {
        self.conditional_formats.insert(position, format);
        self
    }

    pub fn matches(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }

    /// Outline level for ids ending in `Heading<digit>`.
    pub fn outline_level(&self) -> Option<u32> {
        let digit = self.id.chars().last()?.to_digit(10)?;
        let stem = &self.id[..self.id.len() - 1];
        stem.ends_with("Heading").then_some(digit)
    }

    /// Base style id in effect, `None` for the roots.
    pub fn base_id(&self) -> Option<&str> {
        if let Some(base) = &self.base {
            return Some(base);
        }
        if self.style_type.is_table_kind() {
            (self.id != DEFAULT_TABLE_STYLE_BASE).then_some(DEFAULT_TABLE_STYLE_BASE)
        } else {
            (self.id != DEFAULT_STYLE_BASE).then_some(DEFAULT_STYLE_BASE)
        }
    }

    /// Formatting this style contributes to table cells, without inheritance.
    pub fn cell_format(&self) -> CellFormat {
        CellFormat {
            style: None,
            width: None,
            margins: self.margins,
            vertical_align: self.content_vertical_align,
            background: self.background.clone(),
            borders: self.borders.clone(),
            paragraph: ParagraphAttributes {
                align: self.align,
                line: self.line,
                keep_next: self.keep_next,
                keep_lines: self.keep_lines,
                widow_control: None,
            },
            run_attributes: self.run_attributes.clone(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(OoxmlError::validation("style", "id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(OoxmlError::validation("style", "name", "must not be empty"));
        }
        if self.row_band_size == 0 || self.col_band_size == 0 {
            return Err(OoxmlError::validation("style", "band_size", "must be at least 1"));
        }
        if !self.conditional_formats.is_empty() && self.style_type != StyleType::Table {
            return Err(OoxmlError::validation(
                "style",
                "conditional_formats",
                "only table styles hold conditional formats",
            ));
        }
        self.run_attributes.validate("style")?;
        self.borders.validate()?;
        if let Some(background) = &self.background {
            background.validate()?;
        }
        for format in self.conditional_formats.values() {
            format.run_attributes.validate("conditional format")?;
            format.borders.validate()?;
        }
        Ok(())
    }
}

/// Styles registered with a document, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRegistry {
    styles: Vec<Style>,
}

impl StyleRegistry {
    /// An empty registry. Rendering needs a default paragraph style.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in styles.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for style in default_styles() {
            registry.styles.push(style);
        }
        registry
    }

    /// Register `style`, replacing any style with the same id.
    pub fn register(&mut self, style: Style) -> Result<()> {
        style.validate()?;
        if self.unregister(&style.id).is_some() {
            log::debug!("replacing style {}", style.id);
        }
        self.styles.push(style);
        Ok(())
    }

    pub fn unregister(&mut self, id: &str) -> Option<Style> {
        let index = self.styles.iter().position(|s| s.matches(id))?;
        Some(self.styles.remove(index))
    }

    pub fn find(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.matches(id))
    }

    /// The paragraph style flagged as default.
    pub fn default_style(&self) -> Option<&Style> {
        self.styles
            .iter()
            .find(|s| s.default && s.style_type == StyleType::Paragraph)
    }

    pub(crate) fn require_default(&self) -> Result<&Style> {
        self.default_style().ok_or(OoxmlError::MissingDefaultStyle)
    }

    /// Styles with an outline level, i.e. the heading styles.
    pub fn outline_styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter().filter(|s| s.outline_level().is_some())
    }

    /// Outline level of the style `id`, if it is a heading style.
    pub fn outline_level(&self, id: &str) -> Option<u32> {
        self.outline_styles().find(|s| s.matches(id))?.outline_level()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Distinct font names referenced by the styles, in first-use order.
    pub fn fonts(&self) -> Vec<&str> {
        let mut fonts: Vec<&str> = Vec::new();
        for font in self.styles.iter().filter_map(|s| s.run_attributes.font.as_deref()) {
            if !fonts.iter().any(|f| f.eq_ignore_ascii_case(font)) {
                fonts.push(font);
            }
        }
        fonts
    }

    /// The base chain of `id`, starting with the style itself.
    ///
    /// Unknown bases end the chain with a warning; cycles are cut at the
    /// first repeated id.
    fn chain(&self, id: &str) -> Vec<&Style> {
        let mut chain: Vec<&Style> = Vec::new();
        let mut next = self.find(id);
        while let Some(style) = next {
            if chain.iter().any(|s| s.matches(&style.id)) {
                log::warn!("style {} has a cyclic base chain", id);
                break;
            }
            chain.push(style);
            next = match style.base_id() {
                Some(base) => {
                    let found = self.find(base);
                    if found.is_none() {
                        log::warn!("style {} is based on unknown style {}", style.id, base);
                    }
                    found
                },
                None => None,
            };
        }
        chain
    }

    /// Cell formatting of `id` with its base styles filled in underneath.
    pub fn resolved_cell_format(&self, id: &str) -> CellFormat {
        let mut format = CellFormat::default();
        for style in self.chain(id) {
            format.merge_missing(&style.cell_format());
        }
        format
    }

    /// Run formatting of `id` with its base styles filled in underneath.
    pub fn resolved_run_attributes(&self, id: &str) -> RunAttributes {
        let mut attributes = RunAttributes::default();
        for style in self.chain(id) {
            attributes.merge_missing(&style.run_attributes);
        }
        attributes
    }

    /// Formatting a cell at a position described by `flags` receives from
    /// the table style `table_style`.
    ///
    /// Later positions in [`ConditionalFormatType::ALL`] override earlier
    /// ones, all of which override the table style's own cell formatting.
    pub fn conditional_cell_format(&self, table_style: &str, flags: CnfFlags) -> CellFormat {
        let mut format = CellFormat::default();
        let chain = self.chain(table_style);
        for position in ConditionalFormatType::ALL.iter().rev() {
            if *position != ConditionalFormatType::WholeTable && !flags.contains_type(*position) {
                continue;
            }
            // The nearest style in the base chain defining the position wins.
            if let Some(conditional) = chain
                .iter()
                .find_map(|style| style.conditional_formats.get(position))
            {
                format.merge_missing(conditional);
            }
        }
        for style in chain {
            format.merge_missing(&style.cell_format());
        }
        format
    }
}

fn paragraph_style(id: &str, name: &str, font: &str, size: u32) -> Style {
    Style::new(id, name).run_attributes(RunAttributes::new().font(font).size(size))
}

/// The built-in style set.
pub fn default_styles() -> Vec<Style> {
    let mut styles = vec![
        paragraph_style("Normal", "normal", "Arial", 20)
            .line(320)
            .default(true)
            .run_attributes(RunAttributes::new().font("Arial").size(20).color("333333")),
        paragraph_style("Header", "header", "Arial", 20).spacing(None, Some(120)),
        paragraph_style("Footer", "footer", "Arial", 20).spacing(None, Some(120)),
        paragraph_style("Heading1", "heading 1", "Palatino", 36).spacing(None, Some(120)),
        paragraph_style("Heading2", "heading 2", "Arial", 26)
            .spacing(Some(120), Some(120))
            .run_attributes(RunAttributes::new().font("Arial").size(26).bold(true)),
        paragraph_style("Heading3", "heading 3", "Arial", 24)
            .spacing(Some(120), Some(120))
            .run_attributes(
                RunAttributes::new()
                    .font("Arial")
                    .size(24)
                    .bold(true)
                    .italic(true)
                    .color("666666"),
            ),
        paragraph_style("Heading4", "heading 4", "Palatino", 24)
            .spacing(Some(120), Some(120))
            .run_attributes(RunAttributes::new().font("Palatino").size(24).bold(true)),
        paragraph_style("Heading5", "heading 5", "Arial", 22)
            .spacing(Some(120), Some(120))
            .run_attributes(RunAttributes::new().font("Arial").size(22).bold(true)),
        paragraph_style("Heading6", "heading 6", "Arial", 22)
            .spacing(Some(120), Some(120))
            .run_attributes(
                RunAttributes::new()
                    .font("Arial")
                    .size(22)
                    .underline(true)
                    .italic(true)
                    .color("666666"),
            ),
    ];

    let toc = [
        ("Palatino", 0, RunAttributes::new().bold(true)),
        ("Arial", 60, RunAttributes::new()),
        ("Arial", 120, RunAttributes::new()),
        ("Palatino", 180, RunAttributes::new().italic(true).color("666666")),
        ("Arial", 240, RunAttributes::new().italic(true).color("666666")),
        ("Arial", 320, RunAttributes::new().italic(true).color("666666")),
    ];
    for (level, (font, indent, attributes)) in toc.into_iter().enumerate() {
        let level = level + 1;
        styles.push(
            Style::new(format!("TOC{}", level), format!("TOC {}", level))
                .spacing(Some(120), Some(120))
                .indent(Some(indent), None, None)
                .run_attributes(attributes.font(font).size(22)),
        );
    }

    styles.push(
        Style::new(DEFAULT_TABLE_STYLE_BASE, "Table Normal")
            .style_type(StyleType::Table)
            .default(true),
    );
    styles.push(
        Style::new("DefaultTable", "Default Table")
            .style_type(StyleType::Table)
            .background(Shading::color("eeeeee").style(BgStyle::Clear))
            .content_vertical_align(VerticalAlign::Top),
    );
    styles.push(paragraph_style("Title", "title", "Palatino", 60));
    styles.push(paragraph_style("Subtitle", "subtitle", "Arial", 28).spacing(Some(60), None));
    styles.push(
        Style::new("Hyperlink", "hyperlink")
            .style_type(StyleType::Character)
            .run_attributes(RunAttributes::new().underline(true).color("0000ff")),
    );
    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let registry = StyleRegistry::with_defaults();
        assert_eq!(registry.len(), 20);
        assert_eq!(registry.default_style().unwrap().id, "Normal");
        assert!(registry.find("defaulttable").unwrap().style_type.is_table_kind());
        assert_eq!(registry.outline_styles().count(), 6);
        assert_eq!(registry.outline_level("heading2"), Some(2));
        assert_eq!(registry.outline_level("TOC2"), None);
        assert_eq!(registry.fonts(), vec!["Arial", "Palatino"]);
    }

    #[test]
    fn test_register_replaces_case_insensitively() {
        let mut registry = StyleRegistry::with_defaults();
        registry
            .register(Style::new("heading1", "big").run_attributes(RunAttributes::new().size(48)))
            .unwrap();
        assert_eq!(registry.len(), 20);
        assert_eq!(registry.find("HEADING1").unwrap().name, "big");
    }

    #[test]
    fn test_missing_default_is_fatal() {
        let mut registry = StyleRegistry::with_defaults();
        registry.unregister("Normal");
        assert!(matches!(
            registry.require_default(),
            Err(OoxmlError::MissingDefaultStyle)
        ));
    }

    #[test]
    fn test_base_ids() {
        assert_eq!(Style::new("Normal", "normal").base_id(), None);
        assert_eq!(Style::new("Quote", "quote").base_id(), Some("Normal"));
        let table = Style::new("Grid", "grid").style_type(StyleType::Table);
        assert_eq!(table.base_id(), Some("TableNormal"));
        assert_eq!(Style::new("A", "a").base("B").base_id(), Some("B"));
        assert!(Style::new("Normal", "normal").default);
    }

    #[test]
    fn test_cell_style_inherits_base_background() {
        let mut registry = StyleRegistry::with_defaults();
        registry
            .register(
                Style::new("Banded", "banded")
                    .style_type(StyleType::Table)
                    .background(Shading::color("dddddd").style(BgStyle::Clear)),
            )
            .unwrap();
        registry
            .register(
                Style::new("Plain", "plain")
                    .style_type(StyleType::TableCell)
                    .base("Banded"),
            )
            .unwrap();
        let format = registry.resolved_cell_format("Plain");
        assert_eq!(format.background.unwrap().color.as_deref(), Some("dddddd"));
    }

    #[test]
    fn test_unknown_base_degrades() {
        let mut registry = StyleRegistry::with_defaults();
        registry
            .register(
                Style::new("Orphan", "orphan")
                    .base("Missing")
                    .run_attributes(RunAttributes::new().bold(true)),
            )
            .unwrap();
        let attributes = registry.resolved_run_attributes("Orphan");
        assert_eq!(attributes.bold, Some(true));
        assert!(attributes.font.is_none());
    }

    #[test]
    fn test_conditional_priority() {
        let mut registry = StyleRegistry::with_defaults();
        registry
            .register(
                Style::new("Grid", "grid")
                    .style_type(StyleType::Table)
                    .background(Shading::color("ffffff"))
                    .conditional_format(
                        ConditionalFormatType::Band1Horz,
                        CellFormat::new().background(Shading::color("eeeeee")),
                    )
                    .conditional_format(
                        ConditionalFormatType::NwCell,
                        CellFormat::new().background(Shading::color("000000")),
                    )
                    .conditional_format(
                        ConditionalFormatType::FirstRow,
                        CellFormat::new()
                            .background(Shading::color("333333"))
                            .run_attributes(RunAttributes::new().bold(true)),
                    ),
            )
            .unwrap();

        let corner = registry.conditional_cell_format(
            "Grid",
            CnfFlags::FIRST_ROW | CnfFlags::NW_CELL | CnfFlags::ODD_HBAND,
        );
        assert_eq!(corner.background.unwrap().color.as_deref(), Some("000000"));
        assert_eq!(corner.run_attributes.bold, Some(true));

        let band = registry.conditional_cell_format("Grid", CnfFlags::ODD_HBAND);
        assert_eq!(band.background.unwrap().color.as_deref(), Some("eeeeee"));

        let plain = registry.conditional_cell_format("Grid", CnfFlags::empty());
        assert_eq!(plain.background.unwrap().color.as_deref(), Some("ffffff"));
    }

    #[test]
    fn test_conditional_formats_only_on_tables() {
        let style = Style::new("P", "p")
            .conditional_format(ConditionalFormatType::FirstRow, CellFormat::new());
        assert!(style.validate().is_err());
    }
}
