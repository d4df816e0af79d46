//! Table model: tables, cells, look flags and cell formatting overrides.

use super::border::{Border, BorderSide, Borders, Margins, Shading};
use super::content::ContentNode;
use super::enums::{HorizontalAlign, TableLayout, VerticalAlign};
use super::layout::CnfFlags;
use super::paragraph::{Paragraph, ParagraphAttributes};
use super::run::RunAttributes;
use super::styles::StyleRegistry;
use crate::ooxml::error::{OoxmlError, Result};

/// Which structural positions of a table are displayed with their
/// conditional formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLook {
    pub first_row: bool,
    pub last_row: bool,
    pub first_col: bool,
    pub last_col: bool,
    pub hband: bool,
    pub vband: bool,
}

impl Default for TableLook {
    fn default() -> Self {
        Self {
            first_row: false,
            last_row: false,
            first_col: false,
            last_col: false,
            hband: true,
            vband: true,
        }
    }
}

/// A typed formatting override applied to table cells.
///
/// Every field is optional; applying an override never clears a value. When
/// `style` names a table, table row or table cell style, the style's cell
/// formatting is merged underneath the explicit fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellFormat {
    pub style: Option<String>,
    pub width: Option<u32>,
    pub margins: Margins,
    pub vertical_align: Option<VerticalAlign>,
    pub background: Option<Shading>,
    pub borders: Borders,
    pub paragraph: ParagraphAttributes,
    pub run_attributes: RunAttributes,
}

impl CellFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.paragraph.align = Some(align);
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
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

    pub fn run_attributes(mut self, attributes: RunAttributes) -> Self {
        self.run_attributes = attributes;
        self
    }

    /// Fill every unset field from `other`.
    pub fn merge_missing(&mut self, other: &CellFormat) {
        self.width = self.width.or(other.width);
        self.margins.merge_missing(&other.margins);
        self.vertical_align = self.vertical_align.or(other.vertical_align);
        match (&mut self.background, &other.background) {
            (Some(own), Some(theirs)) => own.merge_missing(theirs),
            (None, Some(theirs)) => self.background = Some(theirs.clone()),
            _ => {},
        }
        self.borders.merge_missing(&other.borders);
        let paragraph = &mut self.paragraph;
        paragraph.align = paragraph.align.or(other.paragraph.align);
        paragraph.line = paragraph.line.or(other.paragraph.line);
        paragraph.keep_next = paragraph.keep_next.or(other.paragraph.keep_next);
        paragraph.keep_lines = paragraph.keep_lines.or(other.paragraph.keep_lines);
        paragraph.widow_control = paragraph.widow_control.or(other.paragraph.widow_control);
        self.run_attributes.merge_missing(&other.run_attributes);
    }

    /// Expand `style` into the full override, explicit fields first.
    ///
    /// Fails when the named style is unknown or not a table-kind style.
    pub(crate) fn resolve(&self, styles: &StyleRegistry) -> Result<CellFormat> {
        let Some(id) = &self.style else {
            return Ok(self.clone());
        };
        let style = styles
            .find(id)
            .ok_or_else(|| OoxmlError::StyleNotFound(id.clone()))?;
        if !style.style_type.is_table_kind() {
            return Err(OoxmlError::InvalidStyleType {
                id: id.clone(),
                got: style.style_type.as_str(),
            });
        }
        let mut resolved = self.clone();
        resolved.merge_missing(&styles.resolved_cell_format(id));
        Ok(resolved)
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Named table, table row or table cell style
    pub style: Option<String>,
    pub width: Option<u32>,
    pub margins: Margins,
    /// Alignment of the paragraphs in the cell
    pub align: Option<HorizontalAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub colspan: u32,
    pub rowspan: u32,
    pub background: Option<Shading>,
    pub borders: Borders,
    pub run_attributes: RunAttributes,
    pub contents: Vec<ContentNode>,
    /// Structural position flags, filled in when the document is laid out
    pub(crate) cnf: CnfFlags,
}

impl TableCell {
    /// A cell holding `contents`, followed by an empty paragraph unless the
    /// last node already is one.
    pub fn new(contents: Vec<ContentNode>) -> Self {
        let mut cell = Self {
            style: None,
            width: None,
            margins: Margins {
                top: Some(40),
                left: Some(40),
                right: Some(40),
                bottom: Some(0),
            },
            align: None,
            vertical_align: None,
            colspan: 1,
            rowspan: 1,
            background: None,
            borders: Borders::default(),
            run_attributes: RunAttributes::default(),
            contents,
            cnf: CnfFlags::empty(),
        };
        cell.ensure_trailing_paragraph();
        cell
    }

    /// A cell holding one paragraph with `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![ContentNode::Paragraph(Paragraph::new(text))])
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }

    pub fn colspan(mut self, colspan: u32) -> Self {
        self.colspan = colspan;
        self
    }

    pub fn rowspan(mut self, rowspan: u32) -> Self {
        self.rowspan = rowspan;
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

    pub fn run_attributes(mut self, attributes: RunAttributes) -> Self {
        self.run_attributes = attributes;
        self
    }

    pub(crate) fn ensure_trailing_paragraph(&mut self) {
        if !matches!(self.contents.last(), Some(ContentNode::Paragraph(_))) {
            let para = Paragraph::new("");
            self.contents.push(ContentNode::Paragraph(para));
        }
    }

    /// Apply a resolved override.
    ///
    /// With `reverse` set, only fields the cell leaves unset are written;
    /// otherwise the override replaces cell values. Paragraph and run
    /// attributes cascade into the contents only where those are unset.
    pub fn apply_format(&mut self, format: &CellFormat, reverse: bool) {
        macro_rules! assign {
            ($field:ident, $value:expr) => {
                if let Some(value) = $value
                    && (!reverse || self.$field.is_none())
                {
                    self.$field = Some(value);
                }
            };
        }
        assign!(width, format.width);
        assign!(vertical_align, format.vertical_align);
        assign!(align, format.paragraph.align);
        assign!(background, format.background.clone());

        let margins = &mut self.margins;
        for (own, value) in [
            (&mut margins.top, format.margins.top),
            (&mut margins.left, format.margins.left),
            (&mut margins.bottom, format.margins.bottom),
            (&mut margins.right, format.margins.right),
        ] {
            if let Some(value) = value
                && (!reverse || own.is_none())
            {
                *own = Some(value);
            }
        }

        if reverse {
            self.borders.merge_missing(&format.borders);
            self.run_attributes.merge_missing(&format.run_attributes);
        } else {
            let mut borders = format.borders.clone();
            borders.merge_missing(&self.borders);
            self.borders = borders;
            self.run_attributes = format.run_attributes.merged(&self.run_attributes);
        }

        let mut paragraph = format.paragraph;
        paragraph.align = self.align.or(paragraph.align);
        self.cascade(&paragraph, &format.run_attributes);
    }

    /// Push cell paragraph and run formatting into the contents.
    pub(crate) fn cascade_own(&mut self) {
        let paragraph = ParagraphAttributes {
            align: self.align,
            ..ParagraphAttributes::default()
        };
        let run_attributes = self.run_attributes.clone();
        self.cascade(&paragraph, &run_attributes);
    }

    fn cascade(&mut self, paragraph: &ParagraphAttributes, run_attributes: &RunAttributes) {
        for node in &mut self.contents {
            node.cascade_formatting(paragraph, run_attributes);
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.contents.is_empty() {
            return Err(OoxmlError::validation(
                "table cell",
                "contents",
                "must at least contain one content element",
            ));
        }
        if self.colspan == 0 || self.rowspan == 0 {
            return Err(OoxmlError::validation(
                "table cell",
                "span",
                "colspan and rowspan must be at least 1",
            ));
        }
        self.run_attributes.validate("table cell")?;
        self.borders.validate()?;
        if let Some(background) = &self.background {
            background.validate()?;
        }
        self.contents.iter().try_for_each(ContentNode::validate)
    }
}

impl From<&str> for TableCell {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for TableCell {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

/// A table.
///
/// # Examples
///
/// ```rust,ignore
/// let table = Table::from_rows([["Name", "Qty"], ["Apples", "3"]])
///     .style("DefaultTable")
///     .look(TableLook { first_row: true, ..TableLook::default() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<TableCell>>,
    pub style: String,
    pub width: Option<u32>,
    pub align: HorizontalAlign,
    pub indent: Option<u32>,
    pub layout: TableLayout,
    pub caption: Option<String>,
    pub background: Option<Shading>,
    pub borders: Borders,
    /// Cell spacing in twips
    pub border_spacing: u32,
    /// Number of leading rows repeated on every page
    pub repeat_header: u32,
    pub row_band_size: u32,
    pub col_band_size: u32,
    pub column_widths: Option<Vec<u32>>,
    pub look: TableLook,
}

impl Table {
    pub fn new(rows: Vec<Vec<TableCell>>) -> Self {
        Self {
            rows,
            style: "TableNormal".to_string(),
            width: None,
            align: HorizontalAlign::Center,
            indent: None,
            layout: TableLayout::Auto,
            caption: None,
            background: None,
            borders: Borders::default(),
            border_spacing: 0,
            repeat_header: 0,
            row_band_size: 1,
            col_band_size: 1,
            column_widths: None,
            look: TableLook::default(),
        }
    }

    /// Build a table from anything convertible into cells.
    pub fn from_rows<R, C>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<TableCell>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }

    pub fn indent(mut self, indent: u32) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn background(mut self, background: Shading) -> Self {
        self.background = Some(background);
        self
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    pub fn border_spacing(mut self, spacing: u32) -> Self {
        self.border_spacing = spacing;
        self
    }

    pub fn repeat_header(mut self, rows: u32) -> Self {
        self.repeat_header = rows;
        self
    }

    pub fn band_sizes(mut self, rows: u32, cols: u32) -> Self {
        self.row_band_size = rows;
        self.col_band_size = cols;
        self
    }

    pub fn column_widths(mut self, widths: Vec<u32>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    pub fn look(mut self, look: TableLook) -> Self {
        self.look = look;
        self
    }

    /// Number of columns: the length of the longest row.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row)?.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Every cell position in row-major order.
    pub fn positions(&self) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| (0..row.len()).map(move |c| (r, c)))
            .collect()
    }

    pub fn row_positions(&self, row: usize) -> Vec<(usize, usize)> {
        let len = self.rows.get(row).map(Vec::len).unwrap_or(0);
        (0..len).map(|c| (row, c)).collect()
    }

    pub fn column_positions(&self, col: usize) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| col < row.len())
            .map(|(r, _)| (r, col))
            .collect()
    }

    /// Apply `format` to the cells at `positions`.
    ///
    /// A named style in the override must exist in `styles` and be a table,
    /// table row or table cell style.
    pub fn cell_style(
        &mut self,
        styles: &StyleRegistry,
        positions: &[(usize, usize)],
        format: &CellFormat,
    ) -> Result<()> {
        let resolved = format.resolve(styles)?;
        for &(row, col) in positions {
            let cell = self.cell_mut(row, col).ok_or_else(|| {
                OoxmlError::InvalidContent(format!("no table cell at row {} column {}", row, col))
            })?;
            cell.apply_format(&resolved, false);
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.rows.first().is_none_or(Vec::is_empty) {
            return Err(OoxmlError::validation(
                "table",
                "data",
                "must contain at least one row with one cell",
            ));
        }
        if self.row_band_size == 0 || self.col_band_size == 0 {
            return Err(OoxmlError::validation(
                "table",
                "band_size",
                "must be at least 1",
            ));
        }
        self.borders.validate()?;
        if let Some(background) = &self.background {
            background.validate()?;
        }
        self.rows.iter().flatten().try_for_each(TableCell::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::StyleType;
    use crate::ooxml::docx::run::Run;
    use crate::ooxml::docx::styles::Style;

    fn first_run_attributes(cell: &TableCell) -> &RunAttributes {
        match &cell.contents[0] {
            ContentNode::Paragraph(para) => match &para.runs[0] {
                Run::Text(run) => &run.attributes,
                other => panic!("unexpected run {:?}", other),
            },
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_cell_gets_trailing_paragraph() {
        let cell = TableCell::new(vec![ContentNode::PageBreak]);
        assert_eq!(cell.contents.len(), 2);
        assert!(matches!(cell.contents[1], ContentNode::Paragraph(_)));
        assert_eq!(TableCell::text("a").contents.len(), 1);
        assert_eq!(cell.margins.bottom, Some(0));
    }

    #[test]
    fn test_table_shape() {
        let table = Table::from_rows(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(table.col_count(), 3);
        assert_eq!(table.positions().len(), 4);
        assert_eq!(table.column_positions(1), vec![(0, 1)]);
        assert!(table.validate().is_ok());
        assert!(Table::new(vec![]).validate().is_err());
        assert!(Table::new(vec![vec![]]).validate().is_err());
    }

    #[test]
    fn test_cell_style_cascades_where_unset() {
        let styles = StyleRegistry::with_defaults();
        let mut table = Table::from_rows(vec![vec!["a", "b"]]);
        table.rows[0][1].run_attributes = RunAttributes::new().bold(false);
        table.rows[0][1].cascade_own();

        let format = CellFormat::new()
            .align(HorizontalAlign::Center)
            .run_attributes(RunAttributes::new().bold(true));
        table.cell_style(&styles, &table.row_positions(0), &format).unwrap();

        assert_eq!(table.rows[0][0].align, Some(HorizontalAlign::Center));
        assert_eq!(first_run_attributes(&table.rows[0][0]).bold, Some(true));
        assert_eq!(first_run_attributes(&table.rows[0][1]).bold, Some(false));
    }

    #[test]
    fn test_cell_style_requires_table_kind() {
        let mut styles = StyleRegistry::with_defaults();
        styles
            .register(Style::new("Shaded", "Shaded").style_type(StyleType::TableCell))
            .unwrap();
        let mut table = Table::from_rows(vec![vec!["a"]]);
        let positions = table.positions();

        let missing = table.cell_style(&styles, &positions, &CellFormat::new().style("Nope"));
        assert!(matches!(missing, Err(OoxmlError::StyleNotFound(_))));

        let wrong = table.cell_style(&styles, &positions, &CellFormat::new().style("Heading1"));
        assert!(matches!(wrong, Err(OoxmlError::InvalidStyleType { .. })));

        assert!(
            table
                .cell_style(&styles, &positions, &CellFormat::new().style("Shaded"))
                .is_ok()
        );
    }

    #[test]
    fn test_reverse_apply_keeps_cell_values() {
        let mut cell = TableCell::text("x").background(Shading::color("ff0000"));
        let format = CellFormat::new()
            .background(Shading::color("00ff00"))
            .vertical_align(VerticalAlign::Bottom);
        cell.apply_format(&format, true);
        assert_eq!(cell.background.as_ref().unwrap().color.as_deref(), Some("ff0000"));
        assert_eq!(cell.vertical_align, Some(VerticalAlign::Bottom));

        cell.apply_format(&CellFormat::new().background(Shading::color("0000ff")), false);
        assert_eq!(cell.background.as_ref().unwrap().color.as_deref(), Some("0000ff"));
    }
}
