//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions that turn fiscal-year
//! parameters into payslips: cumulative progressive income tax over the
//! tariff, the per-period gross-to-net pipeline, the net-to-gross
//! bisection solver, and annual schedules chaining twelve periods.

mod gross_solver;
mod payslip;
mod rounding;
mod schedule;
mod tax_brackets;

pub use gross_solver::{DEFAULT_TOLERANCE, GrossSolution, MAX_ITERATIONS, find_gross, solve_gross};
pub use payslip::{
    MAX_AMOUNT, MAX_CUMULATIVE_BASE, MIN_WAGE_SGK_RATE, MIN_WAGE_UNEMPLOYMENT_RATE,
    calculate_payslip,
};
pub use rounding::round_half_up;
pub use schedule::{MONTHS_PER_YEAR, calculate_annual_schedule, calculate_constant_schedule};
pub use tax_brackets::{
    BracketPosition, bracket_position, marginal_rate, period_tax, total_liability,
};
