//! Workbench — the addition/multiplication pair of one session.
//!
//! Orchestration rules:
//!   1. Both tables share one label codec
//!   2. Selecting a cell in one table clears the other table's selection
//!   3. Each table's change listener queues the edit; after every write
//!      the queue is drained and the laws are re-verified in full
//!   4. A rebind relabels both tables
//!   5. A new order discards both tables and builds fresh ones

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use cayley_engine::hashing::{build_canonical_value, canonical_hash, hex_digest};
use cayley_engine::laws::LawReport;
use cayley_engine::notify::ChangeEvent;
use cayley_engine::{Coordinate, OperationTable, SharedCodec, TableError, TableKind};

use crate::config::WorkbenchConfig;
use crate::error::WorkbenchError;

pub struct Workbench {
    config: WorkbenchConfig,
    codec: SharedCodec,
    addition: OperationTable,
    multiplication: OperationTable,
    pending: Rc<RefCell<Vec<ChangeEvent>>>,
    report: LawReport,
    edits: u64,
}

impl Workbench {
    pub fn new(config: WorkbenchConfig) -> Result<Self, WorkbenchError> {
        let codec = config.build_codec()?.shared();
        let pending: Rc<RefCell<Vec<ChangeEvent>>> = Rc::default();

        let mut addition = OperationTable::addition(Rc::clone(&codec));
        let mut multiplication = OperationTable::multiplication(Rc::clone(&codec));
        for table in [&mut addition, &mut multiplication] {
            let queue = Rc::clone(&pending);
            table.register_change_listener(move |event| queue.borrow_mut().push(*event));
        }

        let report = LawReport::verify(&addition, &multiplication);
        info!(order = config.order, "workbench ready");

        Ok(Self {
            config,
            codec,
            addition,
            multiplication,
            pending,
            report,
            edits: 0,
        })
    }

    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    pub fn order(&self) -> usize {
        self.config.order
    }

    pub fn codec(&self) -> &SharedCodec {
        &self.codec
    }

    pub fn table(&self, kind: TableKind) -> &OperationTable {
        match kind {
            TableKind::Addition => &self.addition,
            TableKind::Multiplication => &self.multiplication,
        }
    }

    fn table_mut(&mut self, kind: TableKind) -> &mut OperationTable {
        match kind {
            TableKind::Addition => &mut self.addition,
            TableKind::Multiplication => &mut self.multiplication,
        }
    }

    pub fn addition(&self) -> &OperationTable {
        &self.addition
    }

    pub fn multiplication(&self) -> &OperationTable {
        &self.multiplication
    }

    /// Latest verification result.
    pub fn report(&self) -> &LawReport {
        &self.report
    }

    /// Number of successful writes since the workbench was built.
    pub fn edits(&self) -> u64 {
        self.edits
    }

    /// The table holding the selection, if any.
    pub fn active(&self) -> Option<TableKind> {
        [TableKind::Addition, TableKind::Multiplication]
            .into_iter()
            .find(|kind| self.table(*kind).selected().is_some())
    }

    pub fn selection(&self) -> Option<(TableKind, Coordinate)> {
        let kind = self.active()?;
        self.table(kind).selected().map(|at| (kind, at))
    }

    // -- selection ------------------------------------------------------

    /// Select in `kind`; on success the sibling loses its selection.
    pub fn select(&mut self, kind: TableKind, at: Coordinate) -> Result<(), TableError> {
        self.table_mut(kind).select(at)?;
        self.table_mut(kind.sibling()).clear_selection();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.addition.clear_selection();
        self.multiplication.clear_selection();
    }

    pub fn move_selection(&mut self, dx: i64, dy: i64) -> Result<Coordinate, TableError> {
        let kind = self.active().ok_or(TableError::NoSelection)?;
        self.table_mut(kind).move_selection(dx, dy)
    }

    // -- edits ----------------------------------------------------------

    /// Write at the current selection of whichever table holds it.
    pub fn write(&mut self, value: Option<usize>) -> Result<(), TableError> {
        let kind = self.active().ok_or(TableError::NoSelection)?;
        self.table_mut(kind).write(value)?;
        self.sync();
        Ok(())
    }

    /// Write a typed default-scheme symbol at the current selection.
    pub fn write_symbol(&mut self, symbol: &str) -> Result<(), TableError> {
        let index = self.codec.borrow().index_of(symbol)?;
        self.write(Some(index))
    }

    /// Rebind one label and refresh everything that displays it.
    pub fn rebind(&mut self, index: usize, symbol: &str) -> Result<(), TableError> {
        self.codec.borrow_mut().rebind(index, symbol)?;
        self.config.labels.insert(index, symbol.to_string());
        self.addition.relabel_all();
        self.multiplication.relabel_all();
        self.report = LawReport::verify(&self.addition, &self.multiplication);
        info!(index, symbol, "label rebound");
        Ok(())
    }

    /// Replace both tables with empty ones of the new order.
    pub fn resize(&mut self, order: usize) -> Result<(), WorkbenchError> {
        let fresh = Workbench::new(self.config.resized(order))?;
        info!(from = self.config.order, to = order, "workbench resized");
        *self = fresh;
        Ok(())
    }

    /// Drain queued change events and re-run the verifier if any arrived.
    fn sync(&mut self) {
        let changes: Vec<ChangeEvent> = self.pending.borrow_mut().drain(..).collect();
        if changes.is_empty() {
            return;
        }
        self.edits += changes.len() as u64;
        self.report = LawReport::verify(&self.addition, &self.multiplication);
        debug!(
            changes = changes.len(),
            counter_examples = self.report.total(),
            "laws re-verified"
        );
    }

    // -- identity -------------------------------------------------------

    /// SHA-256 over both table hashes, addition first.
    pub fn fingerprint(&self) -> String {
        let combined = format!(
            "{}{}",
            canonical_hash(&self.addition),
            canonical_hash(&self.multiplication)
        );
        hex_digest(combined.as_bytes())
    }

    pub fn snapshot(&self) -> WorkbenchSnapshot {
        WorkbenchSnapshot {
            order: self.order(),
            addition: TableSnapshot::of(&self.addition),
            multiplication: TableSnapshot::of(&self.multiplication),
            report: self.report.clone(),
            fingerprint: self.fingerprint(),
        }
    }
}

/// Serializable view of one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub canonical: Value,
    pub duplicates: Vec<Coordinate>,
    pub selected: Option<Coordinate>,
}

impl TableSnapshot {
    fn of(table: &OperationTable) -> Self {
        Self {
            canonical: build_canonical_value(table),
            duplicates: table.errors().iter().copied().collect(),
            selected: table.selected(),
        }
    }
}

/// Serializable view of the whole workbench.
#[derive(Debug, Clone, Serialize)]
pub struct WorkbenchSnapshot {
    pub order: usize,
    pub addition: TableSnapshot,
    pub multiplication: TableSnapshot,
    pub report: LawReport,
    pub fingerprint: String,
}
