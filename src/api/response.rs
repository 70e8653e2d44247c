//! Response types for the payroll engine API.
//!
//! This module defines the success bodies and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::BracketPosition;
use crate::error::EngineError;
use crate::models::{EmployeeClass, PayslipResult};

use super::request::CalculationMode;

/// Headline amounts of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipSummary {
    /// Net salary.
    pub net: Decimal,
    /// Income tax plus stamp tax.
    pub taxes: Decimal,
    /// Social-security plus unemployment contributions.
    pub contributions: Decimal,
}

impl From<&PayslipResult> for PayslipSummary {
    fn from(payslip: &PayslipResult) -> Self {
        Self {
            net: payslip.net,
            taxes: payslip.total_taxes(),
            contributions: payslip.total_contributions(),
        }
    }
}

/// Response body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Fiscal year used.
    pub year: i32,
    /// Direction of the calculation.
    pub mode: CalculationMode,
    /// Employee class used.
    pub employee_type: EmployeeClass,
    /// The amount from the request.
    pub input_amount: Decimal,
    /// Gross salary found by the solver, net-to-gross only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_gross: Option<Decimal>,
    /// Full payslip breakdown.
    pub payslip: PayslipResult,
    /// Headline amounts.
    pub summary: PayslipSummary,
    /// Bracket the next unit of income falls into, after this period.
    pub bracket: BracketPosition,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ParameterFileMissing { year, .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "PARAMETERS_NOT_FOUND",
                    format!("No parameters loaded for year {}", year),
                    message,
                ),
            },
            EngineError::ParameterParse { .. } | EngineError::ParameterValidation { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidEmployeeClass { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_EMPLOYEE_CLASS",
                    message,
                    format!(
                        "'{}' is not one of: {}",
                        value,
                        EmployeeClass::ALL
                            .iter()
                            .map(EmployeeClass::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                ),
            },
            EngineError::UnknownRate { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("UNKNOWN_RATE", message),
            },
            EngineError::InvalidInput { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_INPUT", message),
            },
        }
    }
}
