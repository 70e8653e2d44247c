//! Configuration types for payroll parameters.
//!
//! [`YearParametersFile`] mirrors the on-disk YAML shape. It is converted
//! into a validated, immutable [`YearParameters`] before any calculation
//! sees it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeClass, RateName, Tariff, TariffEntry};

/// Named rates for one employee class.
pub type ClassRates = BTreeMap<RateName, Decimal>;

/// Raw parameter file structure, as deserialized from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct YearParametersFile {
    /// The fiscal year these parameters apply to.
    pub year: i32,
    /// Gross monthly minimum wage.
    pub min_wage_gross: Decimal,
    /// Monthly ceiling on the social-security contribution base.
    pub sgk_ceiling_monthly: Decimal,
    /// Flat stamp tax rate.
    pub stamp_rate: Decimal,
    /// Named rates per employee class.
    pub rates: BTreeMap<EmployeeClass, ClassRates>,
    /// Income tax brackets in ascending order.
    pub income_tax_tariff: Vec<TariffEntry>,
}

/// One fiscal year's validated payroll parameters.
///
/// Instances are immutable once built and safe to share between threads.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use payroll_engine::config::YearParameters;
/// use payroll_engine::models::{EmployeeClass, RateName, TariffEntry};
/// use rust_decimal::Decimal;
///
/// let mut normal = BTreeMap::new();
/// normal.insert(RateName::SgkEmployee, Decimal::new(14, 2));
/// normal.insert(RateName::UnemploymentEmployee, Decimal::new(1, 2));
/// let mut rates = BTreeMap::new();
/// rates.insert(EmployeeClass::Normal, normal);
///
/// let params = YearParameters::new(
///     2026,
///     Decimal::from(33_030),
///     Decimal::from(297_270),
///     Decimal::new(759, 5),
///     rates,
///     &[TariffEntry { up_to: None, rate: Decimal::new(15, 2) }],
/// )
/// .unwrap();
/// assert_eq!(params.year(), 2026);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearParameters {
    year: i32,
    min_wage_gross: Decimal,
    sgk_ceiling_monthly: Decimal,
    stamp_rate: Decimal,
    rates: BTreeMap<EmployeeClass, ClassRates>,
    income_tax_tariff: Tariff,
}

impl YearParameters {
    /// Builds and validates a set of year parameters.
    ///
    /// Fails with `ParameterValidation` if the tariff invariants do not hold,
    /// if a scalar is negative, or if any rate lies outside [0, 1].
    pub fn new(
        year: i32,
        min_wage_gross: Decimal,
        sgk_ceiling_monthly: Decimal,
        stamp_rate: Decimal,
        rates: BTreeMap<EmployeeClass, ClassRates>,
        tariff: &[TariffEntry],
    ) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::ParameterValidation { year, message };

        let income_tax_tariff =
            Tariff::from_entries(tariff).map_err(|e| invalid(e.to_string()))?;

        if min_wage_gross <= Decimal::ZERO {
            return Err(invalid(format!(
                "min_wage_gross must be positive, got {}",
                min_wage_gross
            )));
        }
        if sgk_ceiling_monthly < min_wage_gross {
            return Err(invalid(format!(
                "sgk_ceiling_monthly {} is below min_wage_gross {}",
                sgk_ceiling_monthly, min_wage_gross
            )));
        }
        if !is_fraction(stamp_rate) {
            return Err(invalid(format!(
                "stamp_rate {} is outside [0, 1]",
                stamp_rate
            )));
        }
        for (class, class_rates) in &rates {
            for (name, rate) in class_rates {
                if !is_fraction(*rate) {
                    return Err(invalid(format!(
                        "rate {}.{} = {} is outside [0, 1]",
                        class, name, rate
                    )));
                }
            }
        }

        Ok(Self {
            year,
            min_wage_gross,
            sgk_ceiling_monthly,
            stamp_rate,
            rates,
            income_tax_tariff,
        })
    }

    /// Validates a raw parameter file.
    pub fn from_file(file: YearParametersFile) -> EngineResult<Self> {
        Self::new(
            file.year,
            file.min_wage_gross,
            file.sgk_ceiling_monthly,
            file.stamp_rate,
            file.rates,
            &file.income_tax_tariff,
        )
    }

    /// The fiscal year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Gross monthly minimum wage.
    pub fn min_wage_gross(&self) -> Decimal {
        self.min_wage_gross
    }

    /// Monthly social-security base ceiling.
    pub fn sgk_ceiling_monthly(&self) -> Decimal {
        self.sgk_ceiling_monthly
    }

    /// Flat stamp tax rate.
    pub fn stamp_rate(&self) -> Decimal {
        self.stamp_rate
    }

    /// The income tax tariff.
    pub fn tariff(&self) -> &Tariff {
        &self.income_tax_tariff
    }

    /// Looks up a named rate for an employee class.
    ///
    /// Fails with `UnknownRate` if the class has no such rate configured.
    pub fn rate_of(&self, class: EmployeeClass, name: RateName) -> EngineResult<Decimal> {
        self.rates
            .get(&class)
            .and_then(|class_rates| class_rates.get(&name))
            .copied()
            .ok_or_else(|| EngineError::UnknownRate {
                employee_class: class.to_string(),
                rate: name.to_string(),
            })
    }
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}
