use crate::block::{Table, TableRow};
use crate::sanitize;

/// Build a table from raw `| a | b |` rows. Separator rows must already be filtered out.
///
/// Each row keeps its own width; ragged input is passed through unchanged.
pub fn build<S: AsRef<str>>(rows: &[S]) -> Table {
    Table {
        rows: rows.iter().map(|row| split_row(row.as_ref())).collect(),
    }
}

fn split_row(row: &str) -> TableRow {
    let cells = row
        .split('|')
        .filter(|fragment| !fragment.trim().is_empty())
        .map(clean_cell)
        .collect();
    TableRow { cells }
}

fn clean_cell(fragment: &str) -> String {
    let unmarked = fragment.trim().replace("**", "").replace('`', "");
    sanitize::strict(&unmarked)
}
