//! Parameter loading functionality.
//!
//! This module provides the [`ParameterStore`] type, which reads one YAML
//! parameter file per fiscal year and keeps the validated results.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{YearParameters, YearParametersFile};

/// Default directory searched for parameter files.
pub const DEFAULT_PARAMS_DIR: &str = "./config/params";

/// Loads and provides access to fiscal-year payroll parameters.
///
/// The store reads every parameter file once when it is opened and is
/// immutable afterwards, so a single instance can be shared across
/// concurrent calculations.
///
/// # Directory Structure
///
/// ```text
/// config/params/
/// ├── params_2025.yaml
/// └── params_2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ParameterStore;
///
/// let store = ParameterStore::open("./config/params")?;
/// let params = store.year(2026)?;
/// println!("Minimum wage: {}", params.min_wage_gross());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ParameterStore {
    dir: PathBuf,
    years: BTreeMap<i32, YearParameters>,
}

impl ParameterStore {
    /// Loads every `params_{year}.yaml` file from the directory.
    ///
    /// # Returns
    ///
    /// Returns a `ParameterStore` on success, or an error if:
    /// - The directory does not exist or holds no parameter files
    /// - Any file contains invalid YAML
    /// - Any file violates a tariff or rate invariant
    pub fn open<P: AsRef<Path>>(dir: P) -> EngineResult<Self> {
        let dir = dir.as_ref();
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ParameterFileMissing {
            year: 0,
            path: dir_str.clone(),
        })?;

        let mut years = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ParameterFileMissing {
                year: 0,
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if let Some(year) = year_from_file_name(&path) {
                let params = Self::load_file(&path, year)?;
                years.insert(year, params);
            }
        }

        if years.is_empty() {
            return Err(EngineError::ParameterFileMissing {
                year: 0,
                path: format!("{} (no parameter files found)", dir_str),
            });
        }

        info!(
            dir = %dir_str,
            years = ?years.keys().collect::<Vec<_>>(),
            "Loaded payroll parameters"
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            years,
        })
    }

    /// Loads the parameters for a single year from the directory.
    pub fn load_year<P: AsRef<Path>>(dir: P, year: i32) -> EngineResult<YearParameters> {
        let path = dir.as_ref().join(file_name_for(year));
        Self::load_file(&path, year)
    }

    /// Builds a store from parameters constructed in code.
    pub fn from_parameters<I>(params: I) -> Self
    where
        I: IntoIterator<Item = YearParameters>,
    {
        Self {
            dir: PathBuf::new(),
            years: params.into_iter().map(|p| (p.year(), p)).collect(),
        }
    }

    /// Returns the parameters for a fiscal year.
    ///
    /// Fails with `ParameterFileMissing` if no file was loaded for that year.
    pub fn year(&self, year: i32) -> EngineResult<&YearParameters> {
        self.years
            .get(&year)
            .ok_or_else(|| EngineError::ParameterFileMissing {
                year,
                path: self.dir.join(file_name_for(year)).display().to_string(),
            })
    }

    /// Returns the loaded fiscal years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    fn load_file(path: &Path, year: i32) -> EngineResult<YearParameters> {
        let path_str = path.display().to_string();

        let content =
            fs::read_to_string(path).map_err(|_| EngineError::ParameterFileMissing {
                year,
                path: path_str.clone(),
            })?;

        let file: YearParametersFile =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ParameterParse {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        if file.year != year {
            return Err(EngineError::ParameterValidation {
                year,
                message: format!("{} declares year {}", path_str, file.year),
            });
        }

        let params = YearParameters::from_file(file)?;
        debug!(year, path = %path_str, "Parameter file validated");
        Ok(params)
    }
}

fn file_name_for(year: i32) -> String {
    format!("params_{}.yaml", year)
}

fn year_from_file_name(path: &Path) -> Option<i32> {
    path.file_name()?
        .to_str()?
        .strip_prefix("params_")?
        .strip_suffix(".yaml")?
        .parse()
        .ok()
}
