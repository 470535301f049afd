//! Label codec — index <-> display symbol.
//!
//! Indices 0 and 1 default to "0" and "1"; index n >= 2 defaults to the
//! letter 'a' + (n - 2). Any index may be rebound to a non-empty custom
//! symbol. Rebinding is not checked for uniqueness.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::error::TableError;
use crate::MAX_ORDER;

/// Codec shared by both tables of a session.
pub type SharedCodec = Rc<RefCell<LabelCodec>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCodec {
    labels: Vec<String>,
}

impl LabelCodec {
    /// Codec of the given order with every index on its default symbol.
    pub fn new(order: usize) -> Result<Self, TableError> {
        if order == 0 || order > MAX_ORDER {
            return Err(TableError::InvalidOrder { order });
        }
        Ok(Self {
            labels: (0..order).map(default_label).collect(),
        })
    }

    /// Wrap into the shared handle the tables hold.
    pub fn shared(self) -> SharedCodec {
        Rc::new(RefCell::new(self))
    }

    pub fn order(&self) -> usize {
        self.labels.len()
    }

    /// Display symbol for `index`. Panics when `index >= order`.
    pub fn label_of(&self, index: usize) -> &str {
        match self.try_label_of(index) {
            Ok(label) => label,
            Err(e) => panic!("Label lookup failed: {}", e),
        }
    }

    /// Non-panicking variant of `label_of`.
    pub fn try_label_of(&self, index: usize) -> Result<&str, TableError> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(TableError::OutOfRange {
                index,
                order: self.order(),
            })
    }

    /// Inverse of the default scheme. Custom symbols are never parsed
    /// back; stored indices are the source of truth for those.
    pub fn index_of(&self, symbol: &str) -> Result<usize, TableError> {
        let unknown = || TableError::UnknownSymbol(symbol.to_string());
        let mut chars = symbol.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(unknown());
        };
        let index = match ch {
            '0' => 0,
            '1' => 1,
            'a'..='z' => 2 + (ch as usize - 'a' as usize),
            _ => return Err(unknown()),
        };
        if index < self.order() {
            Ok(index)
        } else {
            Err(unknown())
        }
    }

    /// Replace the symbol for one index. Tables sharing this codec keep
    /// showing the old symbol until they are relabelled.
    pub fn rebind(&mut self, index: usize, symbol: &str) -> Result<(), TableError> {
        if symbol.is_empty() {
            return Err(TableError::EmptySymbol);
        }
        let order = self.order();
        let slot = self
            .labels
            .get_mut(index)
            .ok_or(TableError::OutOfRange { index, order })?;
        debug!(index, from = %slot, to = symbol, "rebinding label");
        *slot = symbol.to_string();
        Ok(())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Default symbol for `index`: "0", "1", then 'a' through 'z'. Callers
/// stay below `MAX_ORDER`; past the alphabet the decimal index is used.
fn default_label(index: usize) -> String {
    match index {
        0 | 1 => index.to_string(),
        n => ('a'..='z')
            .nth(n - 2)
            .map_or_else(|| n.to_string(), String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let codec = LabelCodec::new(5).unwrap();
        let labels: Vec<&str> = codec.labels().collect();
        assert_eq!(labels, vec!["0", "1", "a", "b", "c"]);
    }

    #[test]
    fn test_full_alphabet_order() {
        let codec = LabelCodec::new(MAX_ORDER).unwrap();
        assert_eq!(codec.label_of(MAX_ORDER - 1), "z");
    }

    #[test]
    fn test_invalid_order() {
        assert_eq!(LabelCodec::new(0), Err(TableError::InvalidOrder { order: 0 }));
        assert_eq!(
            LabelCodec::new(MAX_ORDER + 1),
            Err(TableError::InvalidOrder { order: MAX_ORDER + 1 })
        );
    }

    #[test]
    #[should_panic(expected = "Label lookup failed")]
    fn test_label_of_out_of_range_panics() {
        let codec = LabelCodec::new(3).unwrap();
        codec.label_of(3);
    }

    #[test]
    fn test_try_label_of_out_of_range() {
        let codec = LabelCodec::new(3).unwrap();
        assert_eq!(
            codec.try_label_of(7),
            Err(TableError::OutOfRange { index: 7, order: 3 })
        );
    }

    #[test]
    fn test_index_of_default_scheme() {
        let codec = LabelCodec::new(5).unwrap();
        assert_eq!(codec.index_of("0"), Ok(0));
        assert_eq!(codec.index_of("1"), Ok(1));
        assert_eq!(codec.index_of("c"), Ok(4));
        assert!(codec.index_of("d").is_err());
        assert!(codec.index_of("ab").is_err());
        assert!(codec.index_of("").is_err());
        assert!(codec.index_of("Z").is_err());
    }

    #[test]
    fn test_rebind() {
        let mut codec = LabelCodec::new(4).unwrap();
        codec.rebind(2, "x").unwrap();
        assert_eq!(codec.label_of(2), "x");
        // Custom symbols are not parsed back.
        assert!(codec.index_of("x").is_err());
        codec.rebind(2, "a").unwrap();
        assert_eq!(codec.index_of("a"), Ok(2));
    }

    #[test]
    fn test_default_label_past_alphabet() {
        assert_eq!(default_label(MAX_ORDER - 1), "z");
        assert_eq!(default_label(MAX_ORDER), MAX_ORDER.to_string());
        assert_eq!(default_label(300), "300");
        assert_eq!(default_label(usize::MAX), usize::MAX.to_string());
    }

    #[test]
    fn test_rebind_rejects_empty_and_out_of_range() {
        let mut codec = LabelCodec::new(4).unwrap();
        assert_eq!(codec.rebind(1, ""), Err(TableError::EmptySymbol));
        assert_eq!(
            codec.rebind(4, "q"),
            Err(TableError::OutOfRange { index: 4, order: 4 })
        );
        assert_eq!(codec.label_of(1), "1");
    }

    #[test]
    fn test_rebind_allows_non_unique_symbols() {
        let mut codec = LabelCodec::new(4).unwrap();
        codec.rebind(3, "a").unwrap();
        assert_eq!(codec.label_of(2), codec.label_of(3));
    }
}
