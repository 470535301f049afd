//! Selection state machine — Unselected | Selected(coordinate).
//!
//! The selectable-region predicate is supplied by the owning table, so
//! a selection held here always satisfies it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TableError;

/// Grid position. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The cell across the diagonal.
    pub const fn mirror(self) -> Self {
        Self { x: self.y, y: self.x }
    }

    /// `self + (dx, dy)`, or the signed target when it leaves the
    /// non-negative quadrant. A target past the `i64` range is reported
    /// saturated.
    pub fn offset(self, dx: i64, dy: i64) -> Result<Self, (i64, i64)> {
        let step = |from: usize, d: i64| {
            i64::try_from(from)
                .ok()
                .and_then(|f| f.checked_add(d))
                .and_then(|t| usize::try_from(t).ok())
        };
        let saturated = |from: usize, d: i64| {
            i64::try_from(from).unwrap_or(i64::MAX).saturating_add(d)
        };
        match (step(self.x, dx), step(self.y, dy)) {
            (Some(x), Some(y)) => Ok(Self::new(x, y)),
            _ => Err((saturated(self.x, dx), saturated(self.y, dy))),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(Coordinate),
}

impl Selection {
    pub fn current(&self) -> Option<Coordinate> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(c) => Some(*c),
        }
    }

    /// Select `at` if the predicate admits it; otherwise leave the
    /// selection untouched.
    pub fn select(
        &mut self,
        at: Coordinate,
        is_selectable: impl Fn(Coordinate) -> bool,
    ) -> Result<(), TableError> {
        if !is_selectable(at) {
            debug!(%at, "selection rejected");
            return Err(TableError::InvalidSelection {
                x: at.x as i64,
                y: at.y as i64,
            });
        }
        *self = Selection::Selected(at);
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Selection::Unselected;
    }

    /// Step the selection by `(dx, dy)`. Rejected moves are not clamped:
    /// the selection stays where it was.
    pub fn move_by(
        &mut self,
        dx: i64,
        dy: i64,
        is_selectable: impl Fn(Coordinate) -> bool,
    ) -> Result<Coordinate, TableError> {
        let Selection::Selected(from) = *self else {
            return Err(TableError::NoSelection);
        };
        match from.offset(dx, dy) {
            Ok(to) if is_selectable(to) => {
                *self = Selection::Selected(to);
                Ok(to)
            }
            Ok(to) => {
                debug!(%from, %to, "move rejected");
                Err(TableError::InvalidSelection {
                    x: to.x as i64,
                    y: to.y as i64,
                })
            }
            Err((x, y)) => {
                debug!(%from, x, y, "move rejected");
                Err(TableError::InvalidSelection { x, y })
            }
        }
    }
}
