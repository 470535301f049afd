//! Operation table — a symmetric `order x order` grid of optional indices.
//!
//! Two variants share all logic and differ in three facets only: the
//! selectable region, the pre-filled border and the operator symbol.
//!
//! | Variant        | Selectable                   | Pre-filled                       |
//! |----------------|------------------------------|----------------------------------|
//! | Addition       | 1 <= x,y < order, y <= x     | row/col 0 hold the axis labels   |
//! | Multiplication | 2 <= x,y < order, y <= x     | row/col 0 hold 0, row/col 1 axis |
//!
//! Every write lands on both `(x, y)` and `(y, x)`, then the grid minus
//! row/column 0 is rescanned for Latin-square collisions, then the change
//! listener runs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TableError;
use crate::labels::SharedCodec;
use crate::laws;
use crate::notify::{ChangeEvent, ListenerSlot};
use crate::selection::{Coordinate, Selection};

/// First row/column that takes part in the duplicate scan. Row/column 0
/// is the axis border in both variants and is never scanned.
const SCAN_START: usize = 1;

// ── Variants ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Addition,
    Multiplication,
}

impl TableKind {
    pub fn op_symbol(self) -> char {
        match self {
            TableKind::Addition => '+',
            TableKind::Multiplication => '×',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TableKind::Addition => "addition",
            TableKind::Multiplication => "multiplication",
        }
    }

    /// The other table of the pair.
    pub fn sibling(self) -> Self {
        match self {
            TableKind::Addition => TableKind::Multiplication,
            TableKind::Multiplication => TableKind::Addition,
        }
    }

    /// First row/column a user may write.
    fn first_free(self) -> usize {
        match self {
            TableKind::Addition => 1,
            TableKind::Multiplication => 2,
        }
    }

    /// Only the diagonal and the half above it are directly editable;
    /// the other half is reached through mirroring.
    pub fn is_selectable(self, order: usize, at: Coordinate) -> bool {
        let lo = self.first_free();
        (lo..order).contains(&at.x) && (lo..order).contains(&at.y) && at.y <= at.x
    }

    /// Fixed value of a border cell, `None` for user cells and for
    /// coordinates outside the grid.
    pub fn prefilled(self, order: usize, at: Coordinate) -> Option<usize> {
        if at.x >= order || at.y >= order {
            return None;
        }
        match self {
            TableKind::Addition => match (at.x, at.y) {
                (x, 0) => Some(x),
                (0, y) => Some(y),
                _ => None,
            },
            TableKind::Multiplication => match (at.x, at.y) {
                (0, _) | (_, 0) => Some(0),
                (x, 1) => Some(x),
                (1, y) => Some(y),
                _ => None,
            },
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Cells ──────────────────────────────────────────────────────────

/// Stored index plus the display symbol derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    value: Option<usize>,
    symbol: String,
    prefilled: bool,
}

impl Cell {
    pub fn value(&self) -> Option<usize> {
        self.value
    }

    /// Empty string for an empty cell.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_prefilled(&self) -> bool {
        self.prefilled
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

// ── Table ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct OperationTable {
    kind: TableKind,
    order: usize,
    codec: SharedCodec,
    cells: Vec<Cell>,
    selection: Selection,
    errors: BTreeSet<Coordinate>,
    listener: ListenerSlot,
}

impl OperationTable {
    /// Build a table with its whole border populated and every user
    /// cell empty. The order is taken from the codec.
    pub fn new(kind: TableKind, codec: SharedCodec) -> Self {
        let order = codec.borrow().order();
        let mut cells = Vec::with_capacity(order * order);
        {
            let labels = codec.borrow();
            for y in 0..order {
                for x in 0..order {
                    let cell = match kind.prefilled(order, Coordinate::new(x, y)) {
                        Some(v) => Cell {
                            value: Some(v),
                            symbol: labels.label_of(v).to_string(),
                            prefilled: true,
                        },
                        None => Cell::default(),
                    };
                    cells.push(cell);
                }
            }
        }
        info!(%kind, order, "table created");

        let mut table = Self {
            kind,
            order,
            codec,
            cells,
            selection: Selection::Unselected,
            errors: BTreeSet::new(),
            listener: ListenerSlot::default(),
        };
        table.errors = table.detect_duplicates();
        table
    }

    pub fn addition(codec: SharedCodec) -> Self {
        Self::new(TableKind::Addition, codec)
    }

    pub fn multiplication(codec: SharedCodec) -> Self {
        Self::new(TableKind::Multiplication, codec)
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn codec(&self) -> &SharedCodec {
        &self.codec
    }

    fn slot(&self, at: Coordinate) -> Option<usize> {
        (at.x < self.order && at.y < self.order).then(|| at.y * self.order + at.x)
    }

    pub fn cell(&self, at: Coordinate) -> Option<&Cell> {
        self.slot(at).map(|i| &self.cells[i])
    }

    /// Stored index at `at`; `None` when empty or off the grid.
    pub fn index_at(&self, at: Coordinate) -> Option<usize> {
        self.cell(at).and_then(Cell::value)
    }

    /// Displayed symbol at `at`; `None` when empty or off the grid.
    pub fn value_at(&self, at: Coordinate) -> Option<&str> {
        self.cell(at)
            .filter(|c| !c.is_empty())
            .map(Cell::symbol)
    }

    /// `i ∘ j` read straight from the grid.
    pub fn apply(&self, i: usize, j: usize) -> Option<usize> {
        self.index_at(Coordinate::new(i, j))
    }

    pub fn is_selectable(&self, at: Coordinate) -> bool {
        self.kind.is_selectable(self.order, at)
    }

    pub fn is_prefilled(&self, at: Coordinate) -> bool {
        self.cell(at).is_some_and(Cell::is_prefilled)
    }

    // -- selection ------------------------------------------------------

    pub fn selected(&self) -> Option<Coordinate> {
        self.selection.current()
    }

    pub fn select(&mut self, at: Coordinate) -> Result<(), TableError> {
        let (kind, order) = (self.kind, self.order);
        self.selection
            .select(at, |c| kind.is_selectable(order, c))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Move the selection by a signed delta. A target off the grid, or
    /// one the delta cannot even reach without overflow, is rejected and
    /// the selection stays where it was.
    pub fn move_selection(&mut self, dx: i64, dy: i64) -> Result<Coordinate, TableError> {
        let (kind, order) = (self.kind, self.order);
        self.selection
            .move_by(dx, dy, |c| kind.is_selectable(order, c))
    }

    // -- mutation -------------------------------------------------------

    /// Write `value` at the current selection.
    pub fn write(&mut self, value: Option<usize>) -> Result<(), TableError> {
        self.write_at(self.selected(), value)
    }

    /// Write a typed default-scheme symbol ("0", "1", "a", ...) at the
    /// current selection.
    pub fn write_symbol(&mut self, symbol: &str) -> Result<(), TableError> {
        let index = self.codec.borrow().index_of(symbol)?;
        self.write(Some(index))
    }

    /// Set `at` and its mirror to `value`, rescan for duplicates, then
    /// notify. Every check happens before the first mutation.
    pub fn write_at(
        &mut self,
        at: Option<Coordinate>,
        value: Option<usize>,
    ) -> Result<(), TableError> {
        let at = at.ok_or(TableError::NoSelection)?;
        if !self.is_selectable(at) {
            return Err(TableError::InvalidSelection {
                x: at.x as i64,
                y: at.y as i64,
            });
        }
        let symbol = match value {
            Some(v) => self.codec.borrow().try_label_of(v)?.to_string(),
            None => String::new(),
        };

        for target in [at, at.mirror()] {
            if let Some(i) = self.slot(target) {
                self.cells[i].value = value;
                self.cells[i].symbol.clone_from(&symbol);
            }
        }
        debug!(kind = %self.kind, %at, ?value, "cell written");

        self.errors = self.detect_duplicates();
        self.listener.notify(&ChangeEvent {
            kind: self.kind,
            at,
            value,
        });
        Ok(())
    }

    /// Refresh every displayed symbol from its stored index. Stored
    /// indices are untouched; duplicate flags are recomputed from the
    /// refreshed symbols.
    pub fn relabel_all(&mut self) {
        {
            let codec = self.codec.borrow();
            for cell in &mut self.cells {
                if let Some(v) = cell.value {
                    cell.symbol = codec.label_of(v).to_string();
                }
            }
        }
        self.errors = self.detect_duplicates();
    }

    pub fn register_change_listener(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listener.register(listener);
    }

    // -- diagnostics ----------------------------------------------------

    /// Cells flagged by the last scan.
    pub fn errors(&self) -> &BTreeSet<Coordinate> {
        &self.errors
    }

    pub fn is_in_error(&self, at: Coordinate) -> bool {
        self.errors.contains(&at)
    }

    /// Union of a row-wise and a column-wise scan for repeated symbols.
    /// Empty cells never collide. Pre-filled cells inside the scanned
    /// region (the multiplication axis row/column 1) count as collision
    /// sources but are never flagged themselves.
    pub fn detect_duplicates(&self) -> BTreeSet<Coordinate> {
        let mut flagged = BTreeSet::new();
        for line in SCAN_START..self.order {
            let row: Vec<Coordinate> = (SCAN_START..self.order)
                .map(|x| Coordinate::new(x, line))
                .collect();
            let column: Vec<Coordinate> = (SCAN_START..self.order)
                .map(|y| Coordinate::new(line, y))
                .collect();
            self.flag_repeats(&row, &mut flagged);
            self.flag_repeats(&column, &mut flagged);
        }
        flagged
    }

    fn flag_repeats(&self, line: &[Coordinate], flagged: &mut BTreeSet<Coordinate>) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &at in line {
            if let Some(symbol) = self.value_at(at) {
                *counts.entry(symbol).or_default() += 1;
            }
        }
        for &at in line {
            let repeated = self
                .value_at(at)
                .is_some_and(|s| counts.get(s).copied().unwrap_or(0) > 1);
            if repeated && !self.is_prefilled(at) {
                flagged.insert(at);
            }
        }
    }

    /// Counter-examples to associativity over the filled cells.
    pub fn associative_law_errors(&self) -> Vec<String> {
        laws::associative_law_errors(self)
    }
}
