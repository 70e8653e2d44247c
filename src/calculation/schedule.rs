//! Annual payroll schedules.
//!
//! Months are computed strictly in order: each month's rounded
//! `cum_tax_base_new` is the next month's `cum_tax_base_prev`.

use rust_decimal::Decimal;

use crate::config::YearParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::{AnnualSchedule, EmployeeClass, MonthlyPayslip, ScheduleTotals};

use super::payslip::calculate_payslip;

/// Number of payroll periods in a fiscal year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Calculates consecutive monthly payslips starting from January.
///
/// `monthly_gross` holds one gross salary per month, January first, and
/// must contain between 1 and 12 entries.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_annual_schedule;
/// use payroll_engine::config::ParameterStore;
/// use payroll_engine::models::EmployeeClass;
/// use rust_decimal::Decimal;
///
/// let store = ParameterStore::open("./config/params")?;
/// let months = vec![Decimal::from(60_000); 12];
/// let schedule = calculate_annual_schedule(&months, EmployeeClass::Normal, store.year(2026)?)?;
/// println!("Annual net: {}", schedule.totals.net);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate_annual_schedule(
    monthly_gross: &[Decimal],
    employee_class: EmployeeClass,
    params: &YearParameters,
) -> EngineResult<AnnualSchedule> {
    if monthly_gross.is_empty() || monthly_gross.len() > MONTHS_PER_YEAR {
        return Err(EngineError::InvalidInput {
            field: "monthly_gross".to_string(),
            message: format!(
                "expected 1 to {} months, got {}",
                MONTHS_PER_YEAR,
                monthly_gross.len()
            ),
        });
    }

    let mut months = Vec::with_capacity(monthly_gross.len());
    let mut totals = ScheduleTotals::default();
    let mut cum_tax_base = Decimal::ZERO;

    for (month, gross) in (1u32..).zip(monthly_gross) {
        let payslip = calculate_payslip(*gross, cum_tax_base, employee_class, params)?;
        cum_tax_base = payslip.cum_tax_base_new;
        totals.add(&payslip);
        months.push(MonthlyPayslip { month, payslip });
    }

    Ok(AnnualSchedule { months, totals })
}

/// Calculates twelve months at the same gross salary.
pub fn calculate_constant_schedule(
    gross: Decimal,
    employee_class: EmployeeClass,
    params: &YearParameters,
) -> EngineResult<AnnualSchedule> {
    calculate_annual_schedule(&[gross; MONTHS_PER_YEAR], employee_class, params)
}
