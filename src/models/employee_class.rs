//! Employee class model and rate names.
//!
//! This module defines the closed set of employee classes the engine
//! supports and the names of the per-class rates read from the year
//! parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The contribution class of an employee.
///
/// The class selects which social-security rate applies and whether the
/// employee pays unemployment insurance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmployeeClass {
    /// Standard worker (4/a): SGK employee share plus unemployment insurance.
    #[serde(rename = "normal_4a")]
    Normal,
    /// Retiree who keeps working (SGDP): reduced contribution, no unemployment insurance.
    #[serde(rename = "emekli_sgdp")]
    RetireeWithContinuedWork,
}

impl EmployeeClass {
    /// All supported classes, in declaration order.
    pub const ALL: [EmployeeClass; 2] = [
        EmployeeClass::Normal,
        EmployeeClass::RetireeWithContinuedWork,
    ];

    /// Returns the wire/config name of the class.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::EmployeeClass;
    ///
    /// assert_eq!(EmployeeClass::Normal.as_str(), "normal_4a");
    /// assert_eq!(EmployeeClass::RetireeWithContinuedWork.as_str(), "emekli_sgdp");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeClass::Normal => "normal_4a",
            EmployeeClass::RetireeWithContinuedWork => "emekli_sgdp",
        }
    }

    /// The rate field holding this class's social-security employee share.
    pub fn contribution_rate(&self) -> RateName {
        match self {
            EmployeeClass::Normal => RateName::SgkEmployee,
            EmployeeClass::RetireeWithContinuedWork => RateName::SgdpEmployee,
        }
    }

    /// Returns true if the class pays unemployment insurance.
    pub fn pays_unemployment(&self) -> bool {
        match self {
            EmployeeClass::Normal => true,
            EmployeeClass::RetireeWithContinuedWork => false,
        }
    }
}

impl fmt::Display for EmployeeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal_4a" => Ok(EmployeeClass::Normal),
            "emekli_sgdp" => Ok(EmployeeClass::RetireeWithContinuedWork),
            other => Err(EngineError::InvalidEmployeeClass {
                value: other.to_string(),
            }),
        }
    }
}

/// Names of the per-class rates stored in the year parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateName {
    /// Standard worker social-security employee share.
    SgkEmployee,
    /// Retiree (SGDP) social-security employee share.
    SgdpEmployee,
    /// Unemployment insurance employee share.
    UnemploymentEmployee,
}

impl RateName {
    /// Returns the config name of the rate.
    pub fn as_str(&self) -> &'static str {
        match self {
            RateName::SgkEmployee => "sgk_employee",
            RateName::SgdpEmployee => "sgdp_employee",
            RateName::UnemploymentEmployee => "unemployment_employee",
        }
    }
}

impl fmt::Display for RateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
