//! Workbench configuration — table order and custom labels.
//!
//! ```json
//! { "order": 5, "labels": { "2": "i" } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cayley_engine::{LabelCodec, MAX_ORDER};

use crate::error::WorkbenchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WorkbenchConfig {
    /// Side length of both tables.
    pub order: usize,
    /// Index -> symbol overrides applied on top of the default alphabet.
    pub labels: BTreeMap<usize, String>,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            order: 5,
            labels: BTreeMap::new(),
        }
    }
}

impl WorkbenchConfig {
    pub fn with_order(order: usize) -> Self {
        Self {
            order,
            ..Default::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, WorkbenchError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, WorkbenchError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), WorkbenchError> {
        if self.order == 0 || self.order > MAX_ORDER {
            return Err(WorkbenchError::Config(format!(
                "order {} is outside 1..={}",
                self.order, MAX_ORDER
            )));
        }
        for (index, symbol) in &self.labels {
            if *index >= self.order {
                return Err(WorkbenchError::Config(format!(
                    "label index {} is outside [0, {})",
                    index, self.order
                )));
            }
            if symbol.is_empty() {
                return Err(WorkbenchError::Config(format!(
                    "label for index {} is empty",
                    index
                )));
            }
        }
        Ok(())
    }

    /// Default codec of `order` with the overrides applied.
    pub fn build_codec(&self) -> Result<LabelCodec, WorkbenchError> {
        self.validate()?;
        let mut codec = LabelCodec::new(self.order)?;
        for (index, symbol) in &self.labels {
            codec.rebind(*index, symbol)?;
        }
        Ok(codec)
    }

    /// Same labels, new order. Overrides beyond the new order are dropped.
    pub fn resized(&self, order: usize) -> Self {
        Self {
            order,
            labels: self
                .labels
                .iter()
                .filter(|(index, _)| **index < order)
                .map(|(index, symbol)| (*index, symbol.clone()))
                .collect(),
        }
    }
}
