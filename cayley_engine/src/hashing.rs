//! Canonical table serialization + SHA-256 fingerprint.
//!
//! Rules:
//!   - Field order: kind, order, labels, cells
//!   - Cells row-major, stored index or null; display symbols are not
//!     part of the identity, labels are listed once
//!   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::selection::Coordinate;
use crate::table::OperationTable;

/// Canonical serialization of a table to UTF-8 JSON bytes.
pub fn canonical_serialize(table: &OperationTable) -> Vec<u8> {
    let obj = build_canonical_value(table);
    serde_json::to_string(&obj)
        .expect("canonical_serialize: JSON serialization failed")
        .into_bytes()
}

/// SHA-256 of the canonical serialization. Lowercase hex string.
pub fn canonical_hash(table: &OperationTable) -> String {
    hex_digest(&canonical_serialize(table))
}

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn hex_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Build the canonical value in strict field order.
pub fn build_canonical_value(table: &OperationTable) -> Value {
    let order = table.order();

    let labels: Vec<Value> = table
        .codec()
        .borrow()
        .labels()
        .map(|s| Value::String(s.to_string()))
        .collect();

    let mut rows = Vec::with_capacity(order);
    for y in 0..order {
        let row: Vec<Value> = (0..order)
            .map(|x| match table.index_at(Coordinate::new(x, y)) {
                Some(v) => Value::Number((v as u64).into()),
                None => Value::Null,
            })
            .collect();
        rows.push(Value::Array(row));
    }

    let mut root = Map::new();
    root.insert(
        "kind".to_string(),
        Value::String(table.kind().name().to_string()),
    );
    root.insert("order".to_string(), Value::Number((order as u64).into()));
    root.insert("labels".to_string(), Value::Array(labels));
    root.insert("cells".to_string(), Value::Array(rows));
    Value::Object(root)
}
