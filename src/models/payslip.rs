//! Payslip result models.
//!
//! This module contains [`PayslipResult`], the full breakdown of a single
//! payroll period, and the [`AnnualSchedule`] built by chaining twelve of
//! them together.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The complete breakdown of one payroll period.
///
/// Every monetary field is rounded to two decimals (half-up) when the
/// result is assembled. Intermediate values are never rounded.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayslipResult;
/// use rust_decimal::Decimal;
///
/// let payslip = PayslipResult {
///     gross: Decimal::new(5_000_000, 2),
///     pek: Decimal::new(5_000_000, 2),
///     sgk_employee: Decimal::new(700_000, 2),
///     unemployment_employee: Decimal::new(50_000, 2),
///     income_tax_base_month: Decimal::new(4_250_000, 2),
///     cum_tax_base_prev: Decimal::ZERO,
///     cum_tax_base_new: Decimal::new(4_250_000, 2),
///     income_tax_gross: Decimal::new(637_500, 2),
///     income_tax_exemption: Decimal::new(421_133, 2),
///     income_tax_net: Decimal::new(216_368, 2),
///     stamp_tax_gross: Decimal::new(37_950, 2),
///     stamp_tax_exemption: Decimal::new(25_070, 2),
///     stamp_tax_net: Decimal::new(12_880, 2),
///     net: Decimal::new(4_020_752, 2),
/// };
/// assert_eq!(payslip.total_taxes(), Decimal::new(229_248, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipResult {
    /// Gross salary for the period.
    pub gross: Decimal,
    /// Social-security contribution base (gross capped at the monthly ceiling).
    pub pek: Decimal,
    /// Employee social-security share (SGK or SGDP).
    pub sgk_employee: Decimal,
    /// Employee unemployment insurance share.
    pub unemployment_employee: Decimal,
    /// Income tax base for this period.
    pub income_tax_base_month: Decimal,
    /// Cumulative income tax base before this period.
    pub cum_tax_base_prev: Decimal,
    /// Cumulative income tax base after this period.
    pub cum_tax_base_new: Decimal,
    /// Income tax before the minimum-wage exemption.
    pub income_tax_gross: Decimal,
    /// Minimum-wage income tax exemption.
    pub income_tax_exemption: Decimal,
    /// Income tax payable.
    pub income_tax_net: Decimal,
    /// Stamp tax before the exemption.
    pub stamp_tax_gross: Decimal,
    /// Minimum-wage stamp tax exemption.
    pub stamp_tax_exemption: Decimal,
    /// Stamp tax payable.
    pub stamp_tax_net: Decimal,
    /// Net salary paid to the employee.
    pub net: Decimal,
}

impl PayslipResult {
    /// Income tax plus stamp tax actually withheld.
    pub fn total_taxes(&self) -> Decimal {
        self.income_tax_net + self.stamp_tax_net
    }

    /// Social-security plus unemployment contributions withheld.
    pub fn total_contributions(&self) -> Decimal {
        self.sgk_employee + self.unemployment_employee
    }
}

/// One month of an annual schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayslip {
    /// Month number, 1 to 12.
    pub month: u32,
    /// The payslip for that month.
    #[serde(flatten)]
    pub payslip: PayslipResult,
}

/// Sums over every month of an annual schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    /// Total gross salary.
    pub gross: Decimal,
    /// Total social-security employee share.
    pub sgk_employee: Decimal,
    /// Total unemployment insurance employee share.
    pub unemployment_employee: Decimal,
    /// Total income tax payable.
    pub income_tax_net: Decimal,
    /// Total stamp tax payable.
    pub stamp_tax_net: Decimal,
    /// Total net salary.
    pub net: Decimal,
}

impl ScheduleTotals {
    /// Adds one payslip to the running totals.
    pub fn add(&mut self, payslip: &PayslipResult) {
        self.gross += payslip.gross;
        self.sgk_employee += payslip.sgk_employee;
        self.unemployment_employee += payslip.unemployment_employee;
        self.income_tax_net += payslip.income_tax_net;
        self.stamp_tax_net += payslip.stamp_tax_net;
        self.net += payslip.net;
    }
}

/// A sequence of monthly payslips linked through the cumulative tax base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualSchedule {
    /// Monthly payslips in calendar order.
    pub months: Vec<MonthlyPayslip>,
    /// Totals over all months.
    pub totals: ScheduleTotals,
}
