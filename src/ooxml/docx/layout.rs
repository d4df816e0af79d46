//! Table layout: column widths, conditional-format positions and vertical
//! merge bookkeeping.
//!
//! Layout runs as a pre-pass over the document before serialization. It only
//! fills values the caller left unset, so running it twice changes nothing.

use super::content::ContentNode;
use super::enums::ConditionalFormatType;
use super::styles::StyleRegistry;
use super::table::{CellFormat, Table, TableCell, TableLook};
use crate::ooxml::error::Result;
use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Structural positions of a table cell (`w:cnfStyle`).
    ///
    /// Bit order follows the character order of the `w:val` string.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CnfFlags: u16 {
        const FIRST_ROW = 1 << 0;
        const LAST_ROW = 1 << 1;
        const FIRST_COL = 1 << 2;
        const LAST_COL = 1 << 3;
        /// `band1Vert`
        const ODD_VBAND = 1 << 4;
        /// `band2Vert`
        const EVEN_VBAND = 1 << 5;
        /// `band1Horz`
        const ODD_HBAND = 1 << 6;
        /// `band2Horz`
        const EVEN_HBAND = 1 << 7;
        const NW_CELL = 1 << 8;
        const NE_CELL = 1 << 9;
        const SW_CELL = 1 << 10;
        const SE_CELL = 1 << 11;
    }
}

/// Grid position and extent of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    /// First grid column covered by the cell
    pub col: usize,
    pub colspan: usize,
    pub rows: usize,
    pub cols: usize,
}

impl CnfFlags {
    /// Flags for a cell, gated by the table's look and band sizes.
    ///
    /// Horizontal bands count from the first non-header row; cells on a
    /// displayed first or last row are not banded horizontally, and the
    /// same holds for columns.
    pub fn for_cell(pos: CellPosition, look: &TableLook, row_band: u32, col_band: u32) -> Self {
        let mut flags = CnfFlags::empty();
        if pos.rows == 0 || pos.cols == 0 {
            return flags;
        }
        let last_col = pos.col + pos.colspan.max(1) - 1;
        flags.set(CnfFlags::FIRST_ROW, look.first_row && pos.row == 0);
        flags.set(CnfFlags::LAST_ROW, look.last_row && pos.row == pos.rows - 1);
        flags.set(CnfFlags::FIRST_COL, look.first_col && pos.col == 0);
        flags.set(CnfFlags::LAST_COL, look.last_col && last_col >= pos.cols - 1);

        let first_row = flags.contains(CnfFlags::FIRST_ROW);
        let last_row = flags.contains(CnfFlags::LAST_ROW);
        let first_col = flags.contains(CnfFlags::FIRST_COL);
        let last_col = flags.contains(CnfFlags::LAST_COL);
        flags.set(CnfFlags::NW_CELL, first_row && first_col);
        flags.set(CnfFlags::NE_CELL, first_row && last_col);
        flags.set(CnfFlags::SW_CELL, last_row && first_col);
        flags.set(CnfFlags::SE_CELL, last_row && last_col);

        if look.hband && !first_row && !last_row {
            let band_row = pos.row - usize::from(look.first_row);
            let odd = (band_row / row_band.max(1) as usize) % 2 == 0;
            flags.insert(if odd { CnfFlags::ODD_HBAND } else { CnfFlags::EVEN_HBAND });
        }
        if look.vband && !first_col && !last_col {
            let band_col = pos.col - usize::from(look.first_col);
            let odd = (band_col / col_band.max(1) as usize) % 2 == 0;
            flags.insert(if odd { CnfFlags::ODD_VBAND } else { CnfFlags::EVEN_VBAND });
        }
        flags
    }

    /// Whether the conditional format `position` applies. `wholeTable`
    /// applies everywhere.
    pub fn contains_type(&self, position: ConditionalFormatType) -> bool {
        let flag = match position {
            ConditionalFormatType::WholeTable => return true,
            ConditionalFormatType::Band1Vert => CnfFlags::ODD_VBAND,
            ConditionalFormatType::Band2Vert => CnfFlags::EVEN_VBAND,
            ConditionalFormatType::Band1Horz => CnfFlags::ODD_HBAND,
            ConditionalFormatType::Band2Horz => CnfFlags::EVEN_HBAND,
            ConditionalFormatType::FirstRow => CnfFlags::FIRST_ROW,
            ConditionalFormatType::LastRow => CnfFlags::LAST_ROW,
            ConditionalFormatType::FirstCol => CnfFlags::FIRST_COL,
            ConditionalFormatType::LastCol => CnfFlags::LAST_COL,
            ConditionalFormatType::NeCell => CnfFlags::NE_CELL,
            ConditionalFormatType::NwCell => CnfFlags::NW_CELL,
            ConditionalFormatType::SeCell => CnfFlags::SE_CELL,
            ConditionalFormatType::SwCell => CnfFlags::SW_CELL,
        };
        self.contains(flag)
    }

    /// The twelve-character `w:cnfStyle/@w:val` string.
    pub fn to_cnf_string(self) -> String {
        (0..12)
            .map(|bit| if self.bits() & (1 << bit) != 0 { '1' } else { '0' })
            .collect()
    }
}

/// Number of grid columns: the widest row once column spans are counted.
pub fn grid_columns(table: &Table) -> usize {
    table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.colspan.max(1) as usize).sum::<usize>())
        .max()
        .unwrap_or(0)
}

/// Widths of the `w:tblGrid` columns: explicit column widths, else the
/// first-row cell widths repeated across each cell's span. Columns past
/// those are unsized up to [`grid_columns`].
pub fn grid_widths(table: &Table) -> Vec<Option<u32>> {
    let mut widths: Vec<Option<u32>> = match &table.column_widths {
        Some(widths) => widths.iter().copied().map(Some).collect(),
        None => table
            .rows
            .first()
            .map(|row| {
                row.iter()
                    .flat_map(|cell| std::iter::repeat_n(cell.width, cell.colspan.max(1) as usize))
                    .collect()
            })
            .unwrap_or_default(),
    };
    let columns = grid_columns(table);
    if widths.len() < columns {
        widths.resize(columns, None);
    }
    widths
}

/// Assign widths to `table` and every table nested in its cells.
///
/// A table without a width takes `container_width`. Cells without a width
/// share what the explicitly sized first-row cells leave over. Nested tables
/// get their cell's width minus the cell's left and right margins.
pub fn distribute_widths(table: &mut Table, container_width: u32, styles: &StyleRegistry) {
    let table_width = *table.width.get_or_insert(container_width);

    let (fixed_sum, fixed_count) = table
        .rows
        .first()
        .map(|row| {
            row.iter().fold((0u32, 0usize), |(sum, count), cell| match cell.width {
                Some(w) if w > 0 => (sum + w, count + 1),
                _ => (sum, count),
            })
        })
        .unwrap_or((0, 0));
    let remaining = table.col_count().saturating_sub(fixed_count);
    let default_width = if remaining > 0 {
        table_width.saturating_sub(fixed_sum) / remaining as u32
    } else {
        0
    };

    let table_style = table.style.clone();
    for cell in table.rows.iter_mut().flatten() {
        let width = *cell.width.get_or_insert(default_width);
        let inner = inner_width(cell, width, &table_style, styles);
        for node in &mut cell.contents {
            if let ContentNode::Table(nested) = node {
                distribute_widths(nested, inner, styles);
            }
        }
    }
}

fn inner_width(cell: &TableCell, width: u32, table_style: &str, styles: &StyleRegistry) -> u32 {
    let style_id = cell.style.as_deref().unwrap_or(table_style);
    let style_margins = styles.find(style_id).map(|s| s.margins).unwrap_or_default();
    let left = cell.margins.left.or(style_margins.left).unwrap_or(0);
    let right = cell.margins.right.or(style_margins.right).unwrap_or(0);
    width.saturating_sub(left).saturating_sub(right)
}

/// Compute conditional-format flags and apply named cell styles and the
/// table style's conditional formats to every cell, recursing into nested
/// tables. Values set on a cell always win.
pub fn apply_cell_formats(table: &mut Table, styles: &StyleRegistry) -> Result<()> {
    let rows = table.rows.len();
    let cols = grid_columns(table);
    let look = table.look;
    let (row_band, col_band) = (table.row_band_size, table.col_band_size);
    let table_style = table.style.clone();
    if styles.find(&table_style).is_none() {
        log::warn!("table style {} is not registered, skipping conditional formats", table_style);
    }

    for (r, row) in table.rows.iter_mut().enumerate() {
        let mut col = 0usize;
        for cell in row.iter_mut() {
            let colspan = cell.colspan.max(1) as usize;
            let pos = CellPosition {
                row: r,
                col,
                colspan,
                rows,
                cols,
            };
            cell.cnf = CnfFlags::for_cell(pos, &look, row_band, col_band);

            if let Some(style) = cell.style.clone() {
                let format = CellFormat::new().style(style).resolve(styles)?;
                cell.apply_format(&format, true);
            }
            if styles.find(&table_style).is_some() {
                let format = styles.conditional_cell_format(&table_style, cell.cnf);
                cell.apply_format(&format, true);
            }
            cell.cascade_own();

            for node in &mut cell.contents {
                if let ContentNode::Table(nested) = node {
                    apply_cell_formats(nested, styles)?;
                }
            }
            col += colspan;
        }
    }
    Ok(())
}

/// `w:vMerge` marker for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMerge {
    Restart,
    Continue,
    /// Bare `w:vMerge` on the last covered row
    End,
}

/// Per-column count of rows still covered by a vertical merge.
#[derive(Debug, Default)]
pub struct RowspanTracker {
    remaining: SmallVec<[u32; 8]>,
}

impl RowspanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker for the cell starting at grid column `col` with `rowspan`.
    pub fn next(&mut self, col: usize, rowspan: u32) -> Option<VMerge> {
        if self.remaining.len() <= col {
            self.remaining.resize(col + 1, 0);
        }
        let remaining = &mut self.remaining[col];
        if rowspan > 1 {
            *remaining = rowspan - 1;
            return Some(VMerge::Restart);
        }
        if *remaining == 0 {
            return None;
        }
        *remaining -= 1;
        if *remaining == 0 {
            Some(VMerge::End)
        } else {
            Some(VMerge::Continue)
        }
    }
}
