use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use payroll_engine::api::{AppState, DEFAULT_YEAR, create_router};
use payroll_engine::calculation::{
    DEFAULT_TOLERANCE, GrossSolution, calculate_constant_schedule, calculate_payslip, solve_gross,
};
use payroll_engine::config::{DEFAULT_PARAMS_DIR, ParameterStore, YearParameters};
use payroll_engine::models::{EmployeeClass, PayslipResult};

/// Turkish monthly payroll calculator.
#[derive(Parser, Debug)]
#[command(name = "payroll-engine")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the payslip for a gross salary
    GrossToNet(PeriodArgs),
    /// Find the gross salary that pays a target net
    NetToGross(PeriodArgs),
    /// Calculate twelve months at a constant gross salary
    Annual(AnnualArgs),
    /// Run the HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ParamsArgs {
    /// Directory holding params_{year}.yaml files
    #[arg(long, env = "PAYROLL_PARAMS_DIR", default_value = DEFAULT_PARAMS_DIR)]
    params_dir: PathBuf,

    /// Fiscal year
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    year: i32,

    /// Employee class (normal_4a or emekli_sgdp)
    #[arg(long = "type", default_value = "normal_4a")]
    employee_type: EmployeeClass,
}

#[derive(Args, Debug)]
struct PeriodArgs {
    /// Gross salary, or target net for net-to-gross
    #[arg(long)]
    amount: Decimal,

    /// Cumulative income tax base before this month
    #[arg(long, default_value_t = Decimal::ZERO)]
    cum_base: Decimal,

    #[command(flatten)]
    params: ParamsArgs,
}

#[derive(Args, Debug)]
struct AnnualArgs {
    /// Monthly gross salary
    #[arg(long)]
    amount: Decimal,

    #[command(flatten)]
    params: ParamsArgs,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Directory holding params_{year}.yaml files
    #[arg(long, env = "PAYROLL_PARAMS_DIR", default_value = DEFAULT_PARAMS_DIR)]
    params_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::GrossToNet(args) => gross_to_net(args),
        Command::NetToGross(args) => net_to_gross(args),
        Command::Annual(args) => annual(args),
        Command::Serve(args) => serve(args).await,
    }
}

fn gross_to_net(args: PeriodArgs) -> Result<()> {
    let params = load_year(&args.params)?;
    let payslip = calculate_payslip(
        args.amount,
        args.cum_base,
        args.params.employee_type,
        &params,
    )
    .context("Failed to calculate payslip")?;
    print_json(&payslip)
}

/// Solver outcome plus a payslip recomputed from the gross it found.
#[derive(Serialize)]
struct NetToGrossOutput {
    solution: GrossSolution,
    payslip: PayslipResult,
    /// Recomputed net minus the target.
    difference: Decimal,
}

fn net_to_gross(args: PeriodArgs) -> Result<()> {
    let params = load_year(&args.params)?;
    let output = solve_and_verify(
        args.amount,
        args.cum_base,
        args.params.employee_type,
        &params,
    )?;
    print_json(&output)
}

fn solve_and_verify(
    target_net: Decimal,
    cum_base: Decimal,
    class: EmployeeClass,
    params: &YearParameters,
) -> Result<NetToGrossOutput> {
    let solution = solve_gross(target_net, cum_base, class, params, DEFAULT_TOLERANCE)
        .context("Failed to solve for gross salary")?;

    // Recompute from the gross alone so the payslip stands on its own.
    let payslip = calculate_payslip(solution.gross, cum_base, class, params)
        .context("Failed to verify gross salary")?;
    let difference = payslip.net - target_net;
    info!(
        gross = %solution.gross,
        net = %payslip.net,
        target = %target_net,
        %difference,
        converged = solution.converged,
        "Verified net-to-gross solution"
    );

    Ok(NetToGrossOutput {
        solution,
        payslip,
        difference,
    })
}

fn annual(args: AnnualArgs) -> Result<()> {
    let params = load_year(&args.params)?;
    let schedule = calculate_constant_schedule(args.amount, args.params.employee_type, &params)
        .context("Failed to calculate annual schedule")?;
    print_json(&schedule)
}

async fn serve(args: ServeArgs) -> Result<()> {
    let store = ParameterStore::open(&args.params_dir).with_context(|| {
        format!(
            "Failed to load parameters from: {}",
            args.params_dir.display()
        )
    })?;

    let app = create_router(AppState::new(store));
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "Payroll engine listening");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn load_year(args: &ParamsArgs) -> Result<YearParameters> {
    ParameterStore::load_year(&args.params_dir, args.year).with_context(|| {
        format!(
            "Failed to load {} parameters from: {}",
            args.year,
            args.params_dir.display()
        )
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
