//! Progressive income tax over a cumulative base.
//!
//! Turkish payroll taxes each month's income against the running annual
//! total: the tax for a period is the liability on the new cumulative base
//! minus the liability on the previous one. [`period_tax`] is the only
//! place that math lives; the payslip pipeline calls it for both the gross
//! tax and the minimum-wage exemption.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BracketBound, Tariff};

/// Where a cumulative base sits inside the tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPosition {
    /// Zero-based index of the bracket the next unit of income falls into.
    pub index: usize,
    /// Marginal rate of that bracket.
    pub rate: Decimal,
    /// Base left before the next boundary; `None` in the unbounded bracket.
    pub remaining_in_bracket: Option<Decimal>,
}

/// Total tax owed on a base accumulated from zero.
///
/// Each bracket is taxed for its full width until the remaining base no
/// longer fills it; the remainder is taxed at that bracket's rate. The
/// unbounded bracket absorbs whatever is left. Non-positive bases owe
/// nothing.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::total_liability;
/// use payroll_engine::models::{BracketBound, TaxBracket, Tariff};
/// use rust_decimal::Decimal;
///
/// let tariff = Tariff::new(vec![
///     TaxBracket { bound: BracketBound::UpTo(Decimal::from(150_000)), rate: Decimal::new(15, 2) },
///     TaxBracket { bound: BracketBound::Unbounded, rate: Decimal::new(20, 2) },
/// ])
/// .unwrap();
///
/// assert_eq!(total_liability(Decimal::from(200_000), &tariff), Decimal::from(32_500));
/// ```
pub fn total_liability(cumulative_base: Decimal, tariff: &Tariff) -> Decimal {
    if cumulative_base <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut total = Decimal::ZERO;
    let mut remaining = cumulative_base;
    let mut floor = Decimal::ZERO;

    for bracket in tariff.brackets() {
        match bracket.bound {
            BracketBound::UpTo(limit) => {
                let width = limit - floor;
                if remaining > width {
                    total += width * bracket.rate;
                    remaining -= width;
                    floor = limit;
                } else {
                    total += remaining * bracket.rate;
                    return total;
                }
            }
            BracketBound::Unbounded => {
                total += remaining * bracket.rate;
                return total;
            }
        }
    }

    total
}

/// Tax attributable to one period under the cumulative method.
///
/// Equal to `total_liability(prev + period) - total_liability(prev)`, so a
/// period straddling a bracket boundary is taxed at the blended rate. A
/// negative `period_base` yields a non-positive amount.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::period_tax;
/// use payroll_engine::models::{BracketBound, TaxBracket, Tariff};
/// use rust_decimal::Decimal;
///
/// let tariff = Tariff::new(vec![
///     TaxBracket { bound: BracketBound::UpTo(Decimal::from(150_000)), rate: Decimal::new(15, 2) },
///     TaxBracket { bound: BracketBound::Unbounded, rate: Decimal::new(20, 2) },
/// ])
/// .unwrap();
///
/// // 10,000 left at 15% plus 24,000 at 20%.
/// let tax = period_tax(Decimal::from(140_000), Decimal::from(34_000), &tariff);
/// assert_eq!(tax, Decimal::from(6_300));
/// ```
pub fn period_tax(cum_base_prev: Decimal, period_base: Decimal, tariff: &Tariff) -> Decimal {
    total_liability(cum_base_prev + period_base, tariff) - total_liability(cum_base_prev, tariff)
}

/// Returns the bracket the next unit of income would be taxed in.
///
/// A base sitting exactly on a boundary belongs to the following bracket.
pub fn bracket_position(cumulative_base: Decimal, tariff: &Tariff) -> BracketPosition {
    let base = cumulative_base.max(Decimal::ZERO);
    let brackets = tariff.brackets();

    for (index, bracket) in brackets.iter().enumerate() {
        match bracket.bound {
            BracketBound::UpTo(limit) if base < limit => {
                return BracketPosition {
                    index,
                    rate: bracket.rate,
                    remaining_in_bracket: Some(limit - base),
                };
            }
            BracketBound::UpTo(_) => continue,
            BracketBound::Unbounded => break,
        }
    }

    // Tariff construction guarantees a trailing unbounded bracket.
    let index = brackets.len() - 1;
    BracketPosition {
        index,
        rate: brackets[index].rate,
        remaining_in_bracket: None,
    }
}

/// Marginal rate at a cumulative base.
pub fn marginal_rate(cumulative_base: Decimal, tariff: &Tariff) -> Decimal {
    bracket_position(cumulative_base, tariff).rate
}
