//! Core data models for the payroll engine.
//!
//! This module contains the domain models shared by the calculation,
//! configuration and API layers.

mod employee_class;
mod payslip;
mod tariff;

pub use employee_class::{EmployeeClass, RateName};
pub use payslip::{AnnualSchedule, MonthlyPayslip, PayslipResult, ScheduleTotals};
pub use tariff::{BracketBound, Tariff, TariffEntry, TariffError, TaxBracket};
