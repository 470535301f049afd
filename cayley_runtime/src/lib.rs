#![forbid(unsafe_code)]

//! Cayley runtime.
//!
//! Pairs an addition and a multiplication table over one shared label
//! codec, keeps selection mutually exclusive between them, re-verifies
//! the laws after every edit, and replays command scripts.
//!
//! No table logic lives here; it is all delegated to the kernel.

pub mod error;
pub mod config;
pub mod workbench;
pub mod commands;
pub mod replay;
pub mod render;

pub use commands::{apply_command, Command, Outcome};
pub use config::WorkbenchConfig;
pub use error::WorkbenchError;
pub use workbench::Workbench;
