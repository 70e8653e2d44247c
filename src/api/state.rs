//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ParameterStore;

/// Shared application state.
///
/// Holds the parameter store loaded at startup. The store is immutable,
/// so handlers read it concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded fiscal-year parameters.
    params: Arc<ParameterStore>,
}

impl AppState {
    /// Creates a new application state with the given parameter store.
    pub fn new(params: ParameterStore) -> Self {
        Self {
            params: Arc::new(params),
        }
    }

    /// Returns a reference to the parameter store.
    pub fn params(&self) -> &ParameterStore {
        &self.params
    }
}
