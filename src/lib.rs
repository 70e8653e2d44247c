//! Payroll engine for Turkish monthly salaries
//!
//! This crate computes gross-to-net payslips under the cumulative income
//! tax method, inverts them to find the gross for a target net, and builds
//! annual schedules. Fiscal-year parameters are loaded from YAML files.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
