//! Table page layout.
//!
//! The table fills the drawable width of the page with equal-width columns,
//! anchored to the top margin. The header row is shaded light grey, every
//! cell gets a border, and cell text is centered both ways.

use lopdf::Object;
use lopdf::content::Operation;

use super::text::{CAP_HEIGHT, encode_win_ansi, fit_text, text_width};
use crate::domain::config::PageSetup;
use crate::domain::table::FinancialTable;

/// `#D3D3D3`, matplotlib's `lightgrey`.
pub const HEADER_FILL: [f32; 3] = [0.827, 0.827, 0.827];
pub const MAX_ROW_HEIGHT: f32 = 24.0;
pub const MAX_FONT_SIZE: f32 = 10.0;
const FONT_TO_ROW: f32 = 0.7;
const CELL_PADDING: f32 = 2.0;
const BORDER_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLayout {
    pub left: f32,
    pub top: f32,
    pub column_width: f32,
    pub row_height: f32,
    pub font_size: f32,
    pub columns: usize,
    /// Header included.
    pub rows: usize,
}

impl TableLayout {
    pub fn compute(table: &FinancialTable, page: &PageSetup) -> Self {
        let columns = table.column_count().max(1);
        let rows = table.row_count() + 1;
        let row_height = (page.drawable_height() / rows as f32).min(MAX_ROW_HEIGHT);
        Self {
            left: page.margin,
            top: page.height - page.margin,
            column_width: page.drawable_width() / columns as f32,
            row_height,
            font_size: (row_height * FONT_TO_ROW).min(MAX_FONT_SIZE),
            columns,
            rows,
        }
    }

    /// Lower-left corner of a cell; row 0 is the header.
    pub fn cell_origin(&self, row: usize, col: usize) -> (f32, f32) {
        (
            self.left + col as f32 * self.column_width,
            self.top - (row + 1) as f32 * self.row_height,
        )
    }

    pub fn width(&self) -> f32 {
        self.column_width * self.columns as f32
    }

    pub fn height(&self) -> f32 {
        self.row_height * self.rows as f32
    }
}

/// One piece of cell text, positioned at its baseline start.
#[derive(Debug, Clone, PartialEq)]
pub struct CellText {
    pub row: usize,
    pub col: usize,
    pub header: bool,
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Header cells first, then data rows, left to right.
pub fn layout_cells(table: &FinancialTable, layout: &TableLayout) -> Vec<CellText> {
    let header = std::iter::once(table.columns());
    let body = table.rows().iter().map(|r| r.as_slice());

    header
        .chain(body)
        .enumerate()
        .flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(col, raw)| {
                let max_width = layout.column_width - 2.0 * CELL_PADDING;
                let text = fit_text(raw, max_width, layout.font_size);
                let (x0, y0) = layout.cell_origin(row, col);
                let width = text_width(&text, layout.font_size);
                CellText {
                    row,
                    col,
                    header: row == 0,
                    x: x0 + (layout.column_width - width) / 2.0,
                    y: y0 + (layout.row_height - CAP_HEIGHT * layout.font_size) / 2.0,
                    text,
                }
            })
        })
        .collect()
}

/// Content-stream operations drawing `table`, using `font` as the resource
/// name of the Helvetica font.
pub fn table_operations(table: &FinancialTable, page: &PageSetup, font: &str) -> Vec<Operation> {
    let layout = TableLayout::compute(table, page);
    let mut ops = Vec::new();

    // Header shading
    let (hx, hy) = layout.cell_origin(0, 0);
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "rg",
        HEADER_FILL.iter().map(|&c| c.into()).collect(),
    ));
    ops.push(Operation::new(
        "re",
        vec![hx.into(), hy.into(), layout.width().into(), layout.row_height.into()],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));

    // Cell borders
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("w", vec![BORDER_WIDTH.into()]));
    ops.push(Operation::new("G", vec![0.0f32.into()]));
    for row in 0..layout.rows {
        for col in 0..layout.columns {
            let (x, y) = layout.cell_origin(row, col);
            ops.push(Operation::new(
                "re",
                vec![
                    x.into(),
                    y.into(),
                    layout.column_width.into(),
                    layout.row_height.into(),
                ],
            ));
        }
    }
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));

    // Cell text
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("g", vec![0.0f32.into()]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), layout.font_size.into()],
    ));
    for cell in layout_cells(table, &layout) {
        ops.push(Operation::new(
            "Tm",
            vec![
                1.0f32.into(),
                0.0f32.into(),
                0.0f32.into(),
                1.0f32.into(),
                cell.x.into(),
                cell.y.into(),
            ],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&cell.text))],
        ));
    }
    ops.push(Operation::new("ET", vec![]));

    ops
}
