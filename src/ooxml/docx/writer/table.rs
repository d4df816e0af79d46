/// Table emitter.
///
/// Widths and conditional-format flags are filled in by the layout pre-pass
/// before a table reaches the writer; the emitter only reads them. Cells
/// covered by a row span are expected in the rows that follow the spanning
/// cell and receive a `w:vMerge` continuation marker.
use super::{PartWriter, write_border, write_shading};
use crate::common::xml::escape_xml;
use crate::ooxml::docx::border::{Borders, Margins};
use crate::ooxml::docx::content::ContentNode;
use crate::ooxml::docx::layout::{RowspanTracker, VMerge, grid_widths};
use crate::ooxml::docx::table::{Table, TableCell};
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// `w:tblBorders` / `w:tcBorders`; nothing when no side is defined.
pub(crate) fn write_borders(xml: &mut String, element: &str, borders: &Borders) -> Result<()> {
    if borders.is_empty() {
        return Ok(());
    }
    write!(xml, "<w:{element}>")?;
    for (side, border) in borders.defined() {
        write_border(xml, side.element(), border)?;
    }
    write!(xml, "</w:{element}>")?;
    Ok(())
}

/// Cell margins in twips (`w:tcMar`, `w:tblCellMar`).
pub(crate) fn write_margins(xml: &mut String, element: &str, margins: &Margins) -> Result<()> {
    if margins.is_empty() {
        return Ok(());
    }
    write!(xml, "<w:{element}>")?;
    for (side, value) in [
        ("top", margins.top),
        ("left", margins.left),
        ("bottom", margins.bottom),
        ("right", margins.right),
    ] {
        if let Some(value) = value {
            write!(xml, r#"<w:{side} w:w="{value}" w:type="dxa"/>"#)?;
        }
    }
    write!(xml, "</w:{element}>")?;
    Ok(())
}

impl PartWriter<'_> {
    pub(crate) fn write_table(&mut self, xml: &mut String, table: &Table) -> Result<()> {
        xml.push_str("<w:tbl>");
        write_table_properties(xml, table)?;

        xml.push_str("<w:tblGrid>");
        for width in grid_widths(table) {
            match width {
                Some(width) => write!(xml, r#"<w:gridCol w:w="{width}"/>"#)?,
                None => xml.push_str("<w:gridCol/>"),
            }
        }
        xml.push_str("</w:tblGrid>");

        let mut tracker = RowspanTracker::new();
        for (index, row) in table.rows.iter().enumerate() {
            xml.push_str("<w:tr>");
            if (index as u32) < table.repeat_header {
                xml.push_str("<w:trPr><w:tblHeader/></w:trPr>");
            }
            let mut col = 0usize;
            for cell in row {
                let merge = tracker.next(col, cell.rowspan);
                self.write_cell(xml, cell, merge)?;
                col += cell.colspan.max(1) as usize;
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        Ok(())
    }

    fn write_cell(&mut self, xml: &mut String, cell: &TableCell, merge: Option<VMerge>) -> Result<()> {
        if !matches!(cell.contents.last(), Some(ContentNode::Paragraph(_))) {
            return Err(OoxmlError::FormatInvariant(
                "table cell must end with a paragraph".to_string(),
            ));
        }

        xml.push_str("<w:tc><w:tcPr>");
        if !cell.cnf.is_empty() {
            write!(xml, r#"<w:cnfStyle w:val="{}"/>"#, cell.cnf.to_cnf_string())?;
        }
        if let Some(width) = cell.width {
            write!(xml, r#"<w:tcW w:w="{width}" w:type="dxa"/>"#)?;
        }
        if cell.colspan > 1 {
            write!(xml, r#"<w:gridSpan w:val="{}"/>"#, cell.colspan)?;
        }
        match merge {
            Some(VMerge::Restart) => xml.push_str(r#"<w:vMerge w:val="restart"/>"#),
            Some(VMerge::Continue) => xml.push_str(r#"<w:vMerge w:val="continue"/>"#),
            Some(VMerge::End) => xml.push_str("<w:vMerge/>"),
            None => {},
        }
        write_borders(xml, "tcBorders", &cell.borders)?;
        if let Some(background) = &cell.background {
            write_shading(xml, background)?;
        }
        write_margins(xml, "tcMar", &cell.margins)?;
        if let Some(align) = cell.vertical_align {
            write!(xml, r#"<w:vAlign w:val="{}"/>"#, align.as_str())?;
        }
        xml.push_str("</w:tcPr>");

        self.write_nodes(xml, &cell.contents)?;
        xml.push_str("</w:tc>");
        Ok(())
    }
}

fn write_table_properties(xml: &mut String, table: &Table) -> Result<()> {
    xml.push_str("<w:tblPr>");
    write!(xml, r#"<w:tblStyle w:val="{}"/>"#, escape_xml(&table.style))?;
    if table.row_band_size > 1 {
        write!(xml, r#"<w:tblStyleRowBandSize w:val="{}"/>"#, table.row_band_size)?;
    }
    if table.col_band_size > 1 {
        write!(xml, r#"<w:tblStyleColBandSize w:val="{}"/>"#, table.col_band_size)?;
    }
    match table.width {
        Some(width) => write!(xml, r#"<w:tblW w:w="{width}" w:type="dxa"/>"#)?,
        None => xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#),
    }
    write!(xml, r#"<w:jc w:val="{}"/>"#, table.align.as_table_str())?;
    if table.border_spacing > 0 {
        write!(
            xml,
            r#"<w:tblCellSpacing w:w="{}" w:type="dxa"/>"#,
            table.border_spacing
        )?;
    }
    if let Some(indent) = table.indent {
        write!(xml, r#"<w:tblInd w:w="{indent}" w:type="dxa"/>"#)?;
    }
    write_borders(xml, "tblBorders", &table.borders)?;
    if let Some(background) = &table.background {
        write_shading(xml, background)?;
    }
    write!(xml, r#"<w:tblLayout w:type="{}"/>"#, table.layout.as_str())?;
    let look = &table.look;
    write!(
        xml,
        r#"<w:tblLook w:firstRow="{}" w:lastRow="{}" w:firstColumn="{}" w:lastColumn="{}" w:noHBand="{}" w:noVBand="{}"/>"#,
        flag(look.first_row),
        flag(look.last_row),
        flag(look.first_col),
        flag(look.last_col),
        flag(!look.hband),
        flag(!look.vband)
    )?;
    if let Some(caption) = &table.caption {
        write!(xml, r#"<w:tblCaption w:val="{}"/>"#, escape_xml(caption))?;
    }
    xml.push_str("</w:tblPr>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::border::{Border, BorderSide, Shading};
    use crate::ooxml::docx::enums::{BorderLine, HorizontalAlign, TableLayout, VerticalAlign};
    use crate::ooxml::docx::layout::{apply_cell_formats, distribute_widths};
    use crate::ooxml::docx::relationship::RelationshipRegistry;
    use crate::ooxml::docx::styles::StyleRegistry;
    use crate::ooxml::docx::table::TableLook;

    fn render(table: &Table) -> String {
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut writer = PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360);
        let mut xml = String::new();
        writer.write_table(&mut xml, table).unwrap();
        xml
    }

    fn parse(xml: &str) -> String {
        format!(r#"<root xmlns:w="urn:w">{xml}</root>"#)
    }

    #[test]
    fn test_table_properties() {
        let table = Table::from_rows(vec![vec!["a", "b"]])
            .align(HorizontalAlign::Left)
            .indent(120)
            .layout(TableLayout::Fixed)
            .caption("Totals & sums")
            .border_spacing(20)
            .band_sizes(2, 1)
            .borders(Borders::new().all(Border::new(BorderLine::Single)))
            .look(TableLook {
                first_row: true,
                ..TableLook::default()
            });
        let xml = render(&table);
        assert!(xml.contains(r#"<w:tblStyle w:val="TableNormal"/>"#));
        assert!(xml.contains(r#"<w:tblStyleRowBandSize w:val="2"/>"#));
        assert!(!xml.contains("tblStyleColBandSize"));
        assert!(xml.contains(r#"<w:tblW w:w="0" w:type="auto"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="start"/>"#));
        assert!(xml.contains(r#"<w:tblInd w:w="120" w:type="dxa"/>"#));
        assert!(xml.contains(r#"<w:tblLayout w:type="fixed"/>"#));
        assert!(xml.contains(r#"w:firstRow="1" w:lastRow="0""#));
        assert!(xml.contains(r#"w:noHBand="0" w:noVBand="0""#));
        assert!(xml.contains("<w:insideV "));
        assert!(xml.contains("Totals &amp; sums"));
        assert!(roxmltree::Document::parse(&parse(&xml)).is_ok());
    }

    #[test]
    fn test_grid_and_cell_widths_after_layout() {
        let styles = StyleRegistry::with_defaults();
        let mut table = Table::from_rows(vec![vec!["a", "b", "c"]]);
        distribute_widths(&mut table, 9360, &styles);
        let xml = render(&table);
        assert_eq!(xml.matches(r#"<w:gridCol w:w="3120"/>"#).count(), 3);
        assert_eq!(xml.matches(r#"<w:tcW w:w="3120" w:type="dxa"/>"#).count(), 3);
        assert!(xml.contains(r#"<w:tblW w:w="9360" w:type="dxa"/>"#));
    }

    #[test]
    fn test_grid_spans_ragged_rows() {
        let xml = render(&Table::from_rows(vec![vec!["a"], vec!["b", "c", "d"]]));
        let grid = &xml[xml.find("<w:tblGrid>").unwrap()..xml.find("</w:tblGrid>").unwrap()];
        assert_eq!(grid.matches("<w:gridCol").count(), 3);
        assert_eq!(xml.matches("<w:tc>").count(), 4);
    }

    #[test]
    fn test_vertical_merge_markers() {
        let rows = vec![
            vec![TableCell::text("span").rowspan(3), TableCell::text("1")],
            vec![TableCell::text(""), TableCell::text("2")],
            vec![TableCell::text(""), TableCell::text("3")],
            vec![TableCell::text("after"), TableCell::text("4")],
        ];
        let xml = render(&Table::new(rows));
        let restart = xml.find(r#"<w:vMerge w:val="restart"/>"#).unwrap();
        let cont = xml.find(r#"<w:vMerge w:val="continue"/>"#).unwrap();
        let end = xml.find("<w:vMerge/>").unwrap();
        assert!(restart < cont && cont < end);
        assert_eq!(xml.matches("<w:vMerge").count(), 3);
    }

    #[test]
    fn test_cell_properties_order() {
        let cell = TableCell::text("x")
            .width(2000)
            .colspan(2)
            .border(BorderSide::Bottom, Border::new(BorderLine::Double))
            .background(Shading::color("DDDDDD"))
            .vertical_align(VerticalAlign::Center);
        let xml = render(&Table::new(vec![vec![cell]]));
        let tc_pr = &xml[xml.find("<w:tcPr>").unwrap()..xml.find("</w:tcPr>").unwrap()];
        let order: Vec<&str> = ["<w:tcW", "<w:gridSpan", "<w:tcBorders", "<w:shd", "<w:tcMar", "<w:vAlign"]
            .into_iter()
            .map(|tag| {
                assert!(tc_pr.contains(tag), "missing {tag}");
                tag
            })
            .collect();
        let positions: Vec<usize> = order.iter().map(|tag| tc_pr.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(tc_pr.contains(r#"<w:bottom w:w="0" w:type="dxa"/>"#));
    }

    #[test]
    fn test_header_rows_and_cnf_style() {
        let styles = StyleRegistry::with_defaults();
        let mut table = Table::from_rows(vec![vec!["h"], vec!["a"], vec!["b"]])
            .repeat_header(1)
            .look(TableLook {
                first_row: true,
                vband: false,
                ..TableLook::default()
            });
        apply_cell_formats(&mut table, &styles).unwrap();
        let xml = render(&table);
        assert_eq!(xml.matches("<w:tblHeader/>").count(), 1);
        assert!(xml.contains(r#"<w:cnfStyle w:val="100000000000"/>"#));
        assert!(xml.contains(r#"<w:cnfStyle w:val="000000100000"/>"#));
        assert!(xml.contains(r#"<w:cnfStyle w:val="000000010000"/>"#));
    }

    #[test]
    fn test_cell_without_trailing_paragraph_is_rejected() {
        let mut cell = TableCell::text("x");
        cell.contents.push(ContentNode::PageBreak);
        let styles = StyleRegistry::with_defaults();
        let mut rels = RelationshipRegistry::new();
        let mut lists = Vec::new();
        let mut writer = PartWriter::new(&styles, &mut rels, &mut lists, &[], 9360);
        let mut xml = String::new();
        let result = writer.write_table(&mut xml, &Table::new(vec![vec![cell]]));
        assert!(matches!(result, Err(OoxmlError::FormatInvariant(_))));
    }
}
