//! Commands — user intent as pure data, plus the dispatcher that applies
//! it to a workbench.
//!
//! Selection and write rejections the kernel reports as no-ops come
//! back as `Outcome::Ignored`; only real failures (bad rebind, bad
//! order) are errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use cayley_engine::{Coordinate, TableError, TableKind};

use crate::error::WorkbenchError;
use crate::workbench::Workbench;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Select { table: TableKind, x: usize, y: usize },
    Clear,
    Move { dx: i64, dy: i64 },
    /// Write a default-scheme symbol ("0", "1", "a", ...).
    Write { symbol: String },
    Erase,
    Rebind { index: usize, symbol: String },
    Resize { order: usize },
    /// A raw key name, translated with `Command::from_key`.
    Key { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(TableError),
}

impl Command {
    /// Map a key name to a command for a table of the given order.
    ///
    /// Escape clears, Backspace/Delete erase, arrows move one cell,
    /// "0"/"1" and the letters naming an index below `order` write.
    /// Everything else maps to nothing.
    pub fn from_key(key: &str, order: usize) -> Option<Command> {
        let step = |dx, dy| Some(Command::Move { dx, dy });
        match key {
            "Escape" => Some(Command::Clear),
            "Backspace" | "Delete" => Some(Command::Erase),
            "ArrowDown" => step(0, 1),
            "ArrowUp" => step(0, -1),
            "ArrowLeft" => step(-1, 0),
            "ArrowRight" => step(1, 0),
            "0" | "1" => Some(Command::Write {
                symbol: key.to_string(),
            }),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch @ 'a'..='z'), None) if 2 + (ch as usize - 'a' as usize) < order => {
                        Some(Command::Write {
                            symbol: key.to_string(),
                        })
                    }
                    _ => None,
                }
            }
        }
    }
}

/// Apply one command.
pub fn apply_command(
    workbench: &mut Workbench,
    command: &Command,
) -> Result<Outcome, WorkbenchError> {
    let result = match command {
        Command::Select { table, x, y } => workbench.select(*table, Coordinate::new(*x, *y)),
        Command::Clear => {
            workbench.clear_selection();
            Ok(())
        }
        Command::Move { dx, dy } => workbench.move_selection(*dx, *dy).map(|_| ()),
        Command::Write { symbol } => workbench.write_symbol(symbol),
        Command::Erase => workbench.write(None),
        Command::Rebind { index, symbol } => workbench.rebind(*index, symbol),
        Command::Resize { order } => {
            workbench.resize(*order)?;
            Ok(())
        }
        Command::Key { key } => return apply_key(workbench, key),
    };

    match result {
        Ok(()) => Ok(Outcome::Applied),
        Err(e) if is_no_op(&e) => {
            debug!(?command, error = %e, "command ignored");
            Ok(Outcome::Ignored(e))
        }
        Err(e) => Err(e.into()),
    }
}

/// Apply an ordered list of commands, stopping at the first real error.
pub fn apply_sequence(
    workbench: &mut Workbench,
    commands: &[Command],
) -> Result<Vec<Outcome>, WorkbenchError> {
    commands
        .iter()
        .map(|command| apply_command(workbench, command))
        .collect()
}

fn apply_key(workbench: &mut Workbench, key: &str) -> Result<Outcome, WorkbenchError> {
    match Command::from_key(key, workbench.order()) {
        Some(command) => apply_command(workbench, &command),
        None => {
            warn!(key, "unmapped key");
            Ok(Outcome::Ignored(TableError::UnknownSymbol(key.to_string())))
        }
    }
}

fn is_no_op(e: &TableError) -> bool {
    matches!(
        e,
        TableError::NoSelection | TableError::InvalidSelection { .. } | TableError::UnknownSymbol(_)
    )
}
