//! Runtime errors. Kernel rejections that are mere no-ops never reach
//! this type; see `commands::Outcome::Ignored`.

use thiserror::Error;

use cayley_engine::TableError;

#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
