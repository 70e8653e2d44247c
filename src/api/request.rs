//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! and `/schedule` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{MAX_AMOUNT, MAX_CUMULATIVE_BASE};
use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeClass;

/// Fiscal year used when a request does not name one.
pub const DEFAULT_YEAR: i32 = 2026;

/// Direction of a single-period calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// `amount` is the gross salary.
    GrossToNet,
    /// `amount` is the target net salary.
    NetToGross,
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Which way to calculate.
    pub mode: CalculationMode,
    /// Gross salary or target net, depending on `mode`.
    pub amount: Decimal,
    /// Cumulative income tax base before this period.
    #[serde(default)]
    pub cum_base: Decimal,
    /// Employee class name, e.g. `normal_4a`.
    #[serde(default = "default_employee_type")]
    pub employee_type: String,
    /// Fiscal year.
    #[serde(default = "default_year")]
    pub year: i32,
}

impl CalculationRequest {
    /// Checks amounts and parses the employee class.
    pub fn validate(&self) -> EngineResult<EmployeeClass> {
        in_range("amount", self.amount, MAX_AMOUNT)?;
        in_range("cum_base", self.cum_base, MAX_CUMULATIVE_BASE)?;
        self.employee_type.parse()
    }
}

/// Request body for the `/schedule` endpoint.
///
/// Either `monthly_gross` (1 to 12 entries) or a single `gross` repeated
/// over twelve months must be given. `monthly_gross` wins if both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Gross salary per month, January first.
    #[serde(default)]
    pub monthly_gross: Option<Vec<Decimal>>,
    /// Constant monthly gross salary.
    #[serde(default)]
    pub gross: Option<Decimal>,
    /// Employee class name, e.g. `emekli_sgdp`.
    #[serde(default = "default_employee_type")]
    pub employee_type: String,
    /// Fiscal year.
    #[serde(default = "default_year")]
    pub year: i32,
}

impl ScheduleRequest {
    /// Checks amounts and parses the employee class.
    pub fn validate(&self) -> EngineResult<EmployeeClass> {
        match (&self.monthly_gross, self.gross) {
            (Some(months), _) => {
                for gross in months {
                    in_range("monthly_gross", *gross, MAX_AMOUNT)?;
                }
            }
            (None, Some(gross)) => in_range("gross", gross, MAX_AMOUNT)?,
            (None, None) => {
                return Err(EngineError::InvalidInput {
                    field: "monthly_gross".to_string(),
                    message: "either monthly_gross or gross is required".to_string(),
                });
            }
        }
        self.employee_type.parse()
    }
}

fn in_range(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    if value > max {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", max, value),
        });
    }
    Ok(())
}

fn default_employee_type() -> String {
    EmployeeClass::Normal.as_str().to_string()
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}
