//! Kernel error taxonomy.
//!
//! `NoSelection` and `InvalidSelection` are recoverable no-ops for the
//! caller. `OutOfRange` on a label lookup is a contract violation and is
//! only returned by the `try_` accessors; the plain accessors panic.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("no active selection")]
    NoSelection,

    #[error("coordinate ({x}, {y}) is not selectable")]
    InvalidSelection { x: i64, y: i64 },

    #[error("index {index} is outside [0, {order})")]
    OutOfRange { index: usize, order: usize },

    #[error("label symbol must not be empty")]
    EmptySymbol,

    #[error("table order {order} is outside 1..={max}", max = crate::MAX_ORDER)]
    InvalidOrder { order: usize },

    #[error("symbol {0:?} does not name a default label")]
    UnknownSymbol(String),
}
