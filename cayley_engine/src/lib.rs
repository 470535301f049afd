#![forbid(unsafe_code)]

//! Cayley table kernel.
//!
//! Square operation tables over a small alphabet of symbols, kept
//! symmetric by mirrored writes, checked for Latin-square collisions
//! and verified against the associative and distributive laws.
//!
//! Single-threaded and synchronous. Nothing here persists.

/// Largest table order the default alphabet can label: "0", "1", a..z.
pub const MAX_ORDER: usize = 28;

pub mod error;
pub mod labels;
pub mod selection;
pub mod notify;
pub mod table;
pub mod laws;
pub mod hashing;

pub use error::TableError;
pub use labels::{LabelCodec, SharedCodec};
pub use selection::{Coordinate, Selection};
pub use table::{OperationTable, TableKind};
