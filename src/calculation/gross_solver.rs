//! Net-to-gross inversion.
//!
//! Net salary is a monotone non-decreasing, piecewise-linear function of
//! gross with kinks at the social-security ceiling and at every tax bracket
//! boundary. The solver bisects over gross in whole cents and returns the
//! best candidate it has seen if it runs out of iterations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::YearParameters;
use crate::error::EngineResult;
use crate::models::EmployeeClass;

use super::payslip::{MAX_AMOUNT, calculate_payslip, ensure_within};
use super::rounding::round_half_up;

/// Default acceptable distance between the achieved and the target net.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum number of bisection steps.
pub const MAX_ITERATIONS: u32 = 50;

/// Outcome of a net-to-gross search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossSolution {
    /// The gross salary found.
    pub gross: Decimal,
    /// The net that gross produces.
    pub net: Decimal,
    /// Number of payslip evaluations performed.
    pub iterations: u32,
    /// Whether `net` is within tolerance of the target.
    pub converged: bool,
}

/// Finds the gross salary whose net is within `tolerance` of `target_net`.
///
/// Never fails on non-convergence: after [`MAX_ITERATIONS`] steps the
/// closest candidate is returned. Callers needing a hard guarantee should
/// check the resulting net, or use [`solve_gross`].
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::{DEFAULT_TOLERANCE, find_gross};
/// use payroll_engine::config::ParameterStore;
/// use payroll_engine::models::EmployeeClass;
/// use rust_decimal::Decimal;
///
/// let store = ParameterStore::open("./config/params")?;
/// let gross = find_gross(
///     Decimal::from(50_000),
///     Decimal::ZERO,
///     EmployeeClass::Normal,
///     store.year(2026)?,
///     DEFAULT_TOLERANCE,
/// )?;
/// println!("Required gross: {}", gross);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn find_gross(
    target_net: Decimal,
    cum_tax_base_prev: Decimal,
    employee_class: EmployeeClass,
    params: &YearParameters,
    tolerance: Decimal,
) -> EngineResult<Decimal> {
    solve_gross(target_net, cum_tax_base_prev, employee_class, params, tolerance)
        .map(|solution| solution.gross)
}

/// Runs the net-to-gross search and reports how it went.
///
/// Errors with `InvalidInput` when `target_net` exceeds
/// [`MAX_AMOUNT`](super::MAX_AMOUNT), or when the payslip calculation
/// itself fails (for example a missing rate for the employee class).
pub fn solve_gross(
    target_net: Decimal,
    cum_tax_base_prev: Decimal,
    employee_class: EmployeeClass,
    params: &YearParameters,
    tolerance: Decimal,
) -> EngineResult<GrossSolution> {
    ensure_within("target_net", target_net, MAX_AMOUNT)?;

    let min_wage = params.min_wage_gross();
    let mut low = target_net.max(min_wage);
    // Gross never exceeds MAX_AMOUNT, so targets needing more stop at the cap.
    let mut high = (target_net * Decimal::from(3))
        .max(min_wage * Decimal::TWO)
        .min(MAX_AMOUNT);

    let mut best = GrossSolution {
        gross: low,
        net: Decimal::ZERO,
        iterations: MAX_ITERATIONS,
        converged: false,
    };
    let mut best_diff: Option<Decimal> = None;

    for iteration in 1..=MAX_ITERATIONS {
        // Candidates are whole cents: the net function is flat between cents.
        let mid = round_half_up((low + high) / Decimal::TWO);
        let net = calculate_payslip(mid, cum_tax_base_prev, employee_class, params)?.net;
        let diff = (net - target_net).abs();

        if diff <= tolerance {
            debug!(
                target_net = %target_net,
                gross = %mid,
                iterations = iteration,
                "Net-to-gross search converged"
            );
            return Ok(GrossSolution {
                gross: mid,
                net,
                iterations: iteration,
                converged: true,
            });
        }

        if best_diff.is_none_or(|d| diff < d) {
            best_diff = Some(diff);
            best.gross = mid;
            best.net = net;
        }

        if net < target_net {
            low = mid;
        } else {
            high = mid;
        }
    }

    warn!(
        target_net = %target_net,
        gross = %best.gross,
        net = %best.net,
        iterations = MAX_ITERATIONS,
        "Net-to-gross search hit the iteration cap; returning closest candidate"
    );

    Ok(best)
}
