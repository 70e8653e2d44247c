//! Income tax tariff model.
//!
//! A [`Tariff`] is an ordered list of [`TaxBracket`]s whose upper bounds are
//! strictly increasing and whose last bracket is open-ended. The invariants
//! are checked once, when the tariff is built, so the bracket engine can walk
//! it without re-validating.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The upper bound of a tax bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketBound {
    /// The bracket covers cumulative income up to and including this amount.
    UpTo(Decimal),
    /// The final bracket, with no upper limit.
    Unbounded,
}

/// A single bracket of the income tax tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Upper bound of the bracket.
    pub bound: BracketBound,
    /// Marginal rate applied inside the bracket, in [0, 1].
    pub rate: Decimal,
}

/// File and wire representation of a bracket; `up_to: null` is the open bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffEntry {
    /// Upper bound, or `None` for the unbounded bracket.
    pub up_to: Option<Decimal>,
    /// Marginal rate.
    pub rate: Decimal,
}

/// Reasons a list of brackets is not a valid tariff.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TariffError {
    /// The tariff has no brackets.
    #[error("tariff has no brackets")]
    Empty,
    /// A bracket rate lies outside [0, 1].
    #[error("bracket {index} rate {rate} is outside [0, 1]")]
    RateOutOfRange {
        /// Zero-based bracket index.
        index: usize,
        /// The offending rate.
        rate: Decimal,
    },
    /// A bound is not positive.
    #[error("bracket {index} upper bound {bound} must be positive")]
    NonPositiveBound {
        /// Zero-based bracket index.
        index: usize,
        /// The offending bound.
        bound: Decimal,
    },
    /// A bound does not exceed the previous one.
    #[error("bracket {index} upper bound {bound} does not exceed the previous bound {previous}")]
    NonIncreasingBound {
        /// Zero-based bracket index.
        index: usize,
        /// The offending bound.
        bound: Decimal,
        /// The bound of the preceding bracket.
        previous: Decimal,
    },
    /// An unbounded bracket appears before the end.
    #[error("only the last bracket may be unbounded (found one at {index})")]
    UnboundedNotLast {
        /// Zero-based bracket index.
        index: usize,
    },
    /// The last bracket has an upper bound.
    #[error("the last bracket must be unbounded")]
    MissingUnbounded,
}

/// An ordered, validated progressive tariff.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{BracketBound, TaxBracket, Tariff};
/// use rust_decimal::Decimal;
///
/// let tariff = Tariff::new(vec![
///     TaxBracket { bound: BracketBound::UpTo(Decimal::from(150_000)), rate: Decimal::new(15, 2) },
///     TaxBracket { bound: BracketBound::Unbounded, rate: Decimal::new(20, 2) },
/// ])
/// .unwrap();
/// assert_eq!(tariff.brackets().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<TariffEntry>")]
pub struct Tariff {
    brackets: Vec<TaxBracket>,
}

impl Tariff {
    /// Builds a tariff, checking bracket ordering, bounds and rates.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TariffError> {
        if brackets.is_empty() {
            return Err(TariffError::Empty);
        }

        let last = brackets.len() - 1;
        let mut previous: Option<Decimal> = None;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(TariffError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.bound {
                BracketBound::UpTo(bound) => {
                    if index == last {
                        return Err(TariffError::MissingUnbounded);
                    }
                    if bound <= Decimal::ZERO {
                        return Err(TariffError::NonPositiveBound { index, bound });
                    }
                    if let Some(previous) = previous {
                        if bound <= previous {
                            return Err(TariffError::NonIncreasingBound {
                                index,
                                bound,
                                previous,
                            });
                        }
                    }
                    previous = Some(bound);
                }
                BracketBound::Unbounded => {
                    if index != last {
                        return Err(TariffError::UnboundedNotLast { index });
                    }
                }
            }
        }

        Ok(Self { brackets })
    }

    /// Builds a tariff from its file representation.
    pub fn from_entries(entries: &[TariffEntry]) -> Result<Self, TariffError> {
        let brackets = entries
            .iter()
            .map(|entry| TaxBracket {
                bound: match entry.up_to {
                    Some(limit) => BracketBound::UpTo(limit),
                    None => BracketBound::Unbounded,
                },
                rate: entry.rate,
            })
            .collect();
        Self::new(brackets)
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl From<Tariff> for Vec<TariffEntry> {
    fn from(tariff: Tariff) -> Self {
        tariff
            .brackets
            .into_iter()
            .map(|bracket| TariffEntry {
                up_to: match bracket.bound {
                    BracketBound::UpTo(limit) => Some(limit),
                    BracketBound::Unbounded => None,
                },
                rate: bracket.rate,
            })
            .collect()
    }
}
