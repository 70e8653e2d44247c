//! Parameter loading and management for the payroll engine.
//!
//! This module loads fiscal-year payroll parameters (minimum wage,
//! social-security ceiling, contribution rates, stamp tax rate and the
//! income tax tariff) from YAML files and validates them.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ParameterStore;
//!
//! let store = ParameterStore::open("./config/params").unwrap();
//! println!("Loaded years: {:?}", store.years());
//! ```

mod loader;
mod types;

pub use loader::{DEFAULT_PARAMS_DIR, ParameterStore};
pub use types::{ClassRates, YearParameters, YearParametersFile};
