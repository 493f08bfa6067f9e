use std::fmt::Write;

use crate::data::filter::FilteredView;
use crate::data::model::{CellValue, Column};
use crate::ui::html::escape;

/// Rows shown at most.
pub const MAX_ROWS: usize = 80;

// ---------------------------------------------------------------------------
// Table view: header + body cells
// ---------------------------------------------------------------------------

/// Markup-independent table: column names plus cells in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<CellValue<'a>>>,
}

/// Lay out the first `max_rows` rows of `view` in display column order.
pub fn build_table<'a>(view: &FilteredView<'a>, max_rows: usize) -> TableView<'a> {
    let header = Column::DISPLAY_ORDER.iter().map(|c| c.header()).collect();
    let rows = view
        .records()
        .take(max_rows)
        .map(|record| {
            Column::DISPLAY_ORDER
                .iter()
                .map(|c| c.cell(record))
                .collect()
        })
        .collect();

    TableView { header, rows }
}

/// `<table>` markup with a `<thead>` row and a `<tbody>` of data rows.
pub fn render_html(table: &TableView<'_>) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for name in &table.header {
        let _ = write!(out, "<th>{}</th>", escape(name));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(&cell.to_string()));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}
