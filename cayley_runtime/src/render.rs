//! Plain-text grid dump used by the CLI.
//!
//! Empty cells print as `.`, duplicate-flagged cells get a trailing `!`,
//! the selected cell is bracketed.

use cayley_engine::{Coordinate, OperationTable};

pub fn render_table(table: &OperationTable) -> String {
    let order = table.order();
    let codec = table.codec().borrow();

    let mut width = 1;
    for y in 0..order {
        for x in 0..order {
            if let Some(s) = table.value_at(Coordinate::new(x, y)) {
                width = width.max(s.chars().count());
            }
        }
    }
    for label in codec.labels() {
        width = width.max(label.chars().count());
    }
    let width = width + 3;

    let mut out = String::new();
    out.push_str(&format!("{:>w$}", table.kind().op_symbol(), w = width));
    for x in 0..order {
        out.push_str(&format!("{:>w$}", codec.label_of(x), w = width));
    }
    out.push('\n');

    for y in 0..order {
        out.push_str(&format!("{:>w$}", codec.label_of(y), w = width));
        for x in 0..order {
            let at = Coordinate::new(x, y);
            let mut cell = table.value_at(at).unwrap_or(".").to_string();
            if table.is_in_error(at) {
                cell.push('!');
            }
            if table.selected() == Some(at) {
                cell = format!("[{}]", cell);
            }
            out.push_str(&format!("{:>w$}", cell, w = width));
        }
        out.push('\n');
    }
    out
}
