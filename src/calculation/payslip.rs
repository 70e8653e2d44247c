//! Gross-to-net payslip calculation.
//!
//! This module runs the per-period deduction pipeline: capped
//! social-security base, employee contributions, cumulative income tax with
//! the minimum-wage exemption, and stamp tax with its flat exemption.

use rust_decimal::Decimal;

use crate::config::YearParameters;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeClass, PayslipResult, RateName};

use super::rounding::round_half_up;
use super::tax_brackets::period_tax;

/// Standard-worker SGK share used to derive the minimum-wage tax base.
pub const MIN_WAGE_SGK_RATE: Decimal = Decimal::from_parts(14, 0, 0, false, 2);

/// Standard-worker unemployment share used to derive the minimum-wage tax base.
pub const MIN_WAGE_UNEMPLOYMENT_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest gross or net amount accepted for one period (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Largest cumulative income tax base accepted (10^18).
pub const MAX_CUMULATIVE_BASE: Decimal =
    Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// Rejects values whose magnitude exceeds `limit`.
///
/// Keeps every later product and sum far inside `Decimal`'s range.
pub(crate) fn ensure_within(field: &str, value: Decimal, limit: Decimal) -> EngineResult<()> {
    if value.abs() > limit {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("magnitude must not exceed {}, got {}", limit, value),
        });
    }
    Ok(())
}

/// Calculates the full payslip for one period.
///
/// All intermediate amounts are kept at full precision; every field is
/// rounded to two decimals (half-up) only when the result is assembled.
///
/// # Arguments
///
/// * `gross` - Gross salary for the period
/// * `cum_tax_base_prev` - Cumulative income tax base before this period
/// * `employee_class` - The employee's contribution class
/// * `params` - The fiscal year's parameters
///
/// # Returns
///
/// Returns the payslip, `InvalidInput` if `gross` exceeds [`MAX_AMOUNT`]
/// or `cum_tax_base_prev` exceeds [`MAX_CUMULATIVE_BASE`], or
/// `UnknownRate` if the parameters lack a rate the class needs.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_payslip;
/// use payroll_engine::config::ParameterStore;
/// use payroll_engine::models::EmployeeClass;
/// use rust_decimal::Decimal;
///
/// let store = ParameterStore::open("./config/params")?;
/// let params = store.year(2026)?;
/// let payslip = calculate_payslip(Decimal::from(50_000), Decimal::ZERO, EmployeeClass::Normal, params)?;
/// println!("Net: {}", payslip.net);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate_payslip(
    gross: Decimal,
    cum_tax_base_prev: Decimal,
    employee_class: EmployeeClass,
    params: &YearParameters,
) -> EngineResult<PayslipResult> {
    ensure_within("gross", gross, MAX_AMOUNT)?;
    ensure_within("cum_tax_base_prev", cum_tax_base_prev, MAX_CUMULATIVE_BASE)?;

    let tariff = params.tariff();
    let min_wage_gross = params.min_wage_gross();

    let pek = gross.min(params.sgk_ceiling_monthly());

    let sgk_rate = params.rate_of(employee_class, employee_class.contribution_rate())?;
    let unemployment_rate = if employee_class.pays_unemployment() {
        params.rate_of(employee_class, RateName::UnemploymentEmployee)?
    } else {
        Decimal::ZERO
    };

    let sgk_employee = pek * sgk_rate;
    let unemployment_employee = pek * unemployment_rate;

    // Stamp tax is not deductible from the income tax base.
    let income_tax_base_month = gross - sgk_employee - unemployment_employee;
    let cum_tax_base_new = cum_tax_base_prev + income_tax_base_month;

    let income_tax_gross = period_tax(cum_tax_base_prev, income_tax_base_month, tariff);

    // The exemption is the tax a standard-rate minimum-wage earner would owe
    // at the same cumulative position, whatever this employee's class.
    let min_wage_tax_base =
        min_wage_gross * (Decimal::ONE - MIN_WAGE_SGK_RATE - MIN_WAGE_UNEMPLOYMENT_RATE);
    let income_tax_exemption = period_tax(cum_tax_base_prev, min_wage_tax_base, tariff);
    let income_tax_net = (income_tax_gross - income_tax_exemption).max(Decimal::ZERO);

    let stamp_tax_gross = gross * params.stamp_rate();
    let stamp_tax_exemption = min_wage_gross * params.stamp_rate();
    let stamp_tax_net = (stamp_tax_gross - stamp_tax_exemption).max(Decimal::ZERO);

    let net = gross - sgk_employee - unemployment_employee - income_tax_net - stamp_tax_net;

    Ok(PayslipResult {
        gross: round_half_up(gross),
        pek: round_half_up(pek),
        sgk_employee: round_half_up(sgk_employee),
        unemployment_employee: round_half_up(unemployment_employee),
        income_tax_base_month: round_half_up(income_tax_base_month),
        cum_tax_base_prev: round_half_up(cum_tax_base_prev),
        cum_tax_base_new: round_half_up(cum_tax_base_new),
        income_tax_gross: round_half_up(income_tax_gross),
        income_tax_exemption: round_half_up(income_tax_exemption),
        income_tax_net: round_half_up(income_tax_net),
        stamp_tax_gross: round_half_up(stamp_tax_gross),
        stamp_tax_exemption: round_half_up(stamp_tax_exemption),
        stamp_tax_net: round_half_up(stamp_tax_net),
        net: round_half_up(net),
    })
}
