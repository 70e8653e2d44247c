//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for gross-to-net and
//! net-to-gross calculations, annual schedules, and parameter inspection.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationMode, CalculationRequest, DEFAULT_YEAR, ScheduleRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse, PayslipSummary};
pub use state::AppState;
