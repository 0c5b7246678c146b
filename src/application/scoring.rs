//! Composite indicator scores.
//!
//! A score is the number of [`Predicate`]s a row satisfies. Predicates whose
//! columns are missing from the table are dropped for the whole table, so a
//! partial screener export degrades to a coarser score instead of an error.

use tracing::debug;

use crate::domain::entities::stock_table::StockTable;
use crate::domain::values::labels;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Gt,
    Lt,
}

impl Cmp {
    fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Cmp::Gt => left > right,
            Cmp::Lt => left < right,
        }
    }
}

/// A boolean test over one or two columns of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column <cmp> value`
    Threshold {
        column: &'static str,
        cmp: Cmp,
        value: f64,
    },
    /// `left <cmp> right`, both columns of the same row
    Cross {
        left: &'static str,
        cmp: Cmp,
        right: &'static str,
    },
}

impl Predicate {
    pub const fn gt(column: &'static str, value: f64) -> Self {
        Predicate::Threshold {
            column,
            cmp: Cmp::Gt,
            value,
        }
    }

    pub const fn lt(column: &'static str, value: f64) -> Self {
        Predicate::Threshold {
            column,
            cmp: Cmp::Lt,
            value,
        }
    }

    pub const fn cross(left: &'static str, cmp: Cmp, right: &'static str) -> Self {
        Predicate::Cross { left, cmp, right }
    }

    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            Predicate::Threshold { column, .. } => vec![*column],
            Predicate::Cross { left, right, .. } => vec![*left, *right],
        }
    }

    /// Per-row truth values, or `None` when a referenced column is absent.
    /// Missing or non-finite cells evaluate to `false`.
    pub(crate) fn evaluate(&self, table: &StockTable) -> Option<Vec<bool>> {
        match self {
            Predicate::Threshold { column, cmp, value } => {
                let values = table.numeric(column)?;
                Some(
                    values
                        .into_iter()
                        .map(|v| v.is_some_and(|v| cmp.holds(v, *value)))
                        .collect(),
                )
            }
            Predicate::Cross { left, cmp, right } => {
                let l = table.numeric(left)?;
                let r = table.numeric(right)?;
                Some(
                    l.into_iter()
                        .zip(r)
                        .map(|pair| match pair {
                            (Some(a), Some(b)) => cmp.holds(a, b),
                            _ => false,
                        })
                        .collect(),
                )
            }
        }
    }
}

/// Count of satisfied predicates per row, in table order.
///
/// Every score lies in `[0, predicates.len()]`.
pub fn score(table: &StockTable, predicates: &[Predicate]) -> Vec<u32> {
    let mut scores = vec![0u32; table.len()];

    for predicate in predicates {
        match predicate.evaluate(table) {
            Some(hits) => {
                for (s, hit) in scores.iter_mut().zip(hits) {
                    *s += hit as u32;
                }
            }
            None => debug!(columns = ?predicate.columns(), "skipping predicate, column missing"),
        }
    }

    scores
}

/// RSI(14) > 50, MACD above signal, positive change, positive rating.
pub fn bullish() -> Vec<Predicate> {
    vec![
        Predicate::gt(labels::RSI_14, 50.0),
        Predicate::cross(labels::MACD_LEVEL, Cmp::Gt, labels::MACD_SIGNAL),
        Predicate::gt(labels::CHANGE_PCT, 0.0),
        Predicate::gt(labels::TECHNICAL_RATING, 0.0),
    ]
}

/// Strict complements of [`bullish`]; a row may score zero on both.
pub fn bearish() -> Vec<Predicate> {
    vec![
        Predicate::lt(labels::RSI_14, 50.0),
        Predicate::cross(labels::MACD_LEVEL, Cmp::Lt, labels::MACD_SIGNAL),
        Predicate::lt(labels::CHANGE_PCT, 0.0),
        Predicate::lt(labels::TECHNICAL_RATING, 0.0),
    ]
}

pub fn long_term() -> Vec<Predicate> {
    vec![
        Predicate::gt(labels::ROE_TTM, 15.0),
        Predicate::gt(labels::EPS_DILUTED_TTM_YOY, 0.0),
        Predicate::gt(labels::REVENUE_TTM_YOY, 0.0),
        Predicate::gt(labels::YEARLY_PERFORMANCE, 0.0),
    ]
}

pub fn growth() -> Vec<Predicate> {
    vec![
        Predicate::gt(labels::REVENUE_TTM_YOY, 10.0),
        Predicate::gt(labels::EPS_DILUTED_TTM_YOY, 10.0),
        Predicate::gt(labels::EBITDA_TTM_YOY, 10.0),
    ]
}
