//! Law verifier — exhaustive associativity and distributivity scans.
//!
//! Pure functions over the tables; nothing is cached and nothing is
//! mutated. Tables are commutative by construction, so only triples with
//! `k >= j` are visited.
//!
//! Any empty cell along a chain makes that triple uncheckable and it is
//! skipped. An empty report therefore means "no violation observed over
//! the filled cells", not "the law holds".

use std::fmt;

use serde::Serialize;

use crate::labels::LabelCodec;
use crate::table::OperationTable;

/// A concrete triple that breaks a law, kept as indices so it can be
/// rendered with whatever labels are current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum CounterExample {
    /// `(i∘j)∘k = left` but `i∘(j∘k) = right`.
    Associative {
        op: char,
        i: usize,
        j: usize,
        k: usize,
        left: usize,
        right: usize,
    },
    /// `i×(j+k) = left` but `(i×j)+(i×k) = right`.
    Distributive {
        add: char,
        mul: char,
        i: usize,
        j: usize,
        k: usize,
        left: usize,
        right: usize,
    },
}

impl CounterExample {
    pub fn render(&self, codec: &LabelCodec) -> String {
        let l = move |index: usize| codec.label_of(index);
        match *self {
            CounterExample::Associative { op, i, j, k, left, right } => format!(
                "({i}{op}{j}){op}{k} = {b} does not equal {i}{op}({j}{op}{k}) = {d}",
                i = l(i),
                j = l(j),
                k = l(k),
                b = l(left),
                d = l(right),
            ),
            CounterExample::Distributive { add, mul, i, j, k, left, right } => format!(
                "{i}{mul}({j}{add}{k}) = {lhs} does not equal ({i}{mul}{j}){add}({i}{mul}{k}) = {rhs}",
                i = l(i),
                j = l(j),
                k = l(k),
                lhs = l(left),
                rhs = l(right),
            ),
        }
    }
}

/// Associativity counter-examples for one table, in `(i, j, k)` order.
pub fn associative_counter_examples(table: &OperationTable) -> Vec<CounterExample> {
    let n = table.order();
    let op = table.kind().op_symbol();
    let mut found = Vec::new();
    for i in 0..n {
        for j in 0..n {
            for k in j..n {
                let Some(a) = table.apply(i, j) else { continue };
                let Some(b) = table.apply(a, k) else { continue };
                let Some(c) = table.apply(j, k) else { continue };
                let Some(d) = table.apply(i, c) else { continue };
                if b != d {
                    found.push(CounterExample::Associative {
                        op,
                        i,
                        j,
                        k,
                        left: b,
                        right: d,
                    });
                }
            }
        }
    }
    found
}

/// Distributivity of `mul` over `add`, in `(i, j, k)` order.
pub fn distributive_counter_examples(
    add: &OperationTable,
    mul: &OperationTable,
) -> Vec<CounterExample> {
    let n = add.order().min(mul.order());
    let (plus, times) = (add.kind().op_symbol(), mul.kind().op_symbol());
    let mut found = Vec::new();
    for i in 0..n {
        for j in 0..n {
            for k in j..n {
                let Some(sum) = add.apply(j, k) else { continue };
                let Some(left) = mul.apply(i, sum) else { continue };
                let (Some(ij), Some(ik)) = (mul.apply(i, j), mul.apply(i, k)) else {
                    continue;
                };
                let Some(right) = add.apply(ij, ik) else { continue };
                if left != right {
                    found.push(CounterExample::Distributive {
                        add: plus,
                        mul: times,
                        i,
                        j,
                        k,
                        left,
                        right,
                    });
                }
            }
        }
    }
    found
}

pub fn associative_law_errors(table: &OperationTable) -> Vec<String> {
    let codec = table.codec().borrow();
    associative_counter_examples(table)
        .iter()
        .map(|ce| ce.render(&codec))
        .collect()
}

pub fn distributive_law_errors(add: &OperationTable, mul: &OperationTable) -> Vec<String> {
    let codec = add.codec().borrow();
    distributive_counter_examples(add, mul)
        .iter()
        .map(|ce| ce.render(&codec))
        .collect()
}

/// Full verification of an addition/multiplication pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LawReport {
    pub addition_associative: Vec<String>,
    pub multiplication_associative: Vec<String>,
    pub distributive: Vec<String>,
}

impl LawReport {
    pub fn verify(add: &OperationTable, mul: &OperationTable) -> Self {
        Self {
            addition_associative: associative_law_errors(add),
            multiplication_associative: associative_law_errors(mul),
            distributive: distributive_law_errors(add, mul),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.addition_associative.len()
            + self.multiplication_associative.len()
            + self.distributive.len()
    }
}

impl fmt::Display for LawReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            ("addition associativity", &self.addition_associative),
            ("multiplication associativity", &self.multiplication_associative),
            ("distributivity", &self.distributive),
        ];
        for (title, errors) in sections {
            if errors.is_empty() {
                writeln!(f, "{}: no counter-examples", title)?;
                continue;
            }
            writeln!(f, "{}: {} counter-example(s)", title, errors.len())?;
            for e in errors {
                writeln!(f, "  {}", e)?;
            }
        }
        Ok(())
    }
}
