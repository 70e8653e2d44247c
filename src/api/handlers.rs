//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DEFAULT_TOLERANCE, bracket_position, calculate_annual_schedule, calculate_constant_schedule,
    calculate_payslip, solve_gross,
};
use crate::config::ParameterStore;
use crate::error::{EngineError, EngineResult};
use crate::models::AnnualSchedule;

use super::request::{CalculationMode, CalculationRequest, ScheduleRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, PayslipSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/schedule", post(schedule_handler))
        .route("/parameters/:year", get(parameters_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Runs a gross-to-net calculation, or a net-to-gross search followed by
/// the payslip for the gross it found.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_calculation(&request, state.params()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                mode = ?request.mode,
                year = request.year,
                employee_type = %result.employee_type,
                net = %result.payslip.net,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /schedule endpoint.
async fn schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing schedule request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_schedule(&request, state.params()) {
        Ok(schedule) => {
            info!(
                correlation_id = %correlation_id,
                year = request.year,
                months = schedule.months.len(),
                annual_net = %schedule.totals.net,
                duration_us = start_time.elapsed().as_micros(),
                "Schedule completed successfully"
            );
            json_response(StatusCode::OK, &schedule)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /parameters/{year} endpoint.
async fn parameters_handler(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let year = match year {
        Ok(Path(year)) => year,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid path parameter"
            );
            let error = ApiError::with_details(
                "INVALID_INPUT",
                "Invalid input 'year': expected an integer fiscal year",
                rejection.body_text(),
            );
            return json_response(StatusCode::BAD_REQUEST, &error);
        }
    };

    match state.params().year(year) {
        Ok(params) => {
            info!(correlation_id = %correlation_id, year, "Serving parameters");
            json_response(StatusCode::OK, params)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn perform_calculation(
    request: &CalculationRequest,
    store: &ParameterStore,
) -> EngineResult<CalculationResponse> {
    let employee_class = request.validate()?;
    let params = store.year(request.year)?;

    let (found_gross, payslip) = match request.mode {
        CalculationMode::GrossToNet => (
            None,
            calculate_payslip(request.amount, request.cum_base, employee_class, params)?,
        ),
        CalculationMode::NetToGross => {
            let solution = solve_gross(
                request.amount,
                request.cum_base,
                employee_class,
                params,
                DEFAULT_TOLERANCE,
            )?;
            let payslip =
                calculate_payslip(solution.gross, request.cum_base, employee_class, params)?;
            (Some(solution.gross), payslip)
        }
    };

    Ok(CalculationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        year: request.year,
        mode: request.mode,
        employee_type: employee_class,
        input_amount: request.amount,
        found_gross,
        summary: PayslipSummary::from(&payslip),
        bracket: bracket_position(payslip.cum_tax_base_new, params.tariff()),
        payslip,
    })
}

fn perform_schedule(
    request: &ScheduleRequest,
    store: &ParameterStore,
) -> EngineResult<AnnualSchedule> {
    let employee_class = request.validate()?;
    let params = store.year(request.year)?;

    match (&request.monthly_gross, request.gross) {
        (Some(months), _) => calculate_annual_schedule(months, employee_class, params),
        (None, Some(gross)) => calculate_constant_schedule(gross, employee_class, params),
        (None, None) => Err(EngineError::InvalidInput {
            field: "monthly_gross".to_string(),
            message: "either monthly_gross or gross is required".to_string(),
        }),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field name.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}
