//! Finance Projection CLI
//!
//! Command-line interface for scoring cash-flow snapshots and projecting
//! retirement plans. Results are printed as JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use finance_projection::cashflow::{health_score_breakdown, CashFlowSnapshot};
use finance_projection::loader::{load_plans, load_snapshots};
use finance_projection::retirement::{RetirementPlan, RetirementProjection};
use finance_projection::{calculate_metrics, ProjectionConfig, ProjectionError, ScenarioRunner};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "finance-projection", version, about = "Cash-flow health and retirement projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a monthly cash-flow snapshot
    Cashflow(CashflowArgs),
    /// Project retirement wealth through to life expectancy
    Retirement(RetirementArgs),
}

#[derive(Debug, Args)]
struct CashflowArgs {
    /// CSV of snapshots to score instead of the single-snapshot flags
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    income: f64,

    #[arg(long, default_value_t = 0.0)]
    expenses: f64,

    #[arg(long, default_value_t = 0.0)]
    debt: f64,

    #[arg(long, default_value_t = 0.0)]
    investments: f64,

    /// Include the per-component score breakdown
    #[arg(long)]
    breakdown: bool,
}

#[derive(Debug, Args)]
struct RetirementArgs {
    /// CSV of plans to project instead of the single-plan flags
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value_t = 30)]
    current_age: u32,

    #[arg(long, default_value_t = 60)]
    retirement_age: u32,

    #[arg(long, default_value_t = 85)]
    life_expectancy: u32,

    #[arg(long, default_value_t = 0.0)]
    monthly_savings: f64,

    #[arg(long, default_value_t = 0.0)]
    monthly_expenses: f64,

    /// Expected annual return in percent
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    return_rate: f64,

    #[arg(long)]
    inflation_adjusted: bool,

    #[arg(long, default_value_t = 0.0)]
    stocks: f64,

    #[arg(long, default_value_t = 0.0)]
    funds: f64,

    #[arg(long, default_value_t = 0.0)]
    cash: f64,

    /// Calendar year of the current age (defaults to this year)
    #[arg(long)]
    year: Option<i32>,

    /// Write every plan's wealth timeline to this CSV file
    #[arg(long)]
    timeline_csv: Option<PathBuf>,

    /// Include timeline summary and required monthly savings
    #[arg(long)]
    summary: bool,
}

/// One timeline row in the CSV export
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineCsvRow<'a> {
    plan_id: &'a str,
    age: u32,
    year: i32,
    wealth: f64,
    phase: &'static str,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let output = match cli.command {
        Command::Cashflow(args) => run_cashflow(args)?,
        Command::Retirement(args) => run_retirement(args)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_cashflow(args: CashflowArgs) -> Result<serde_json::Value> {
    let snapshots = match &args.input {
        Some(path) => {
            log::info!("Loading snapshots from {}", path.display());
            load_snapshots(path)
                .with_context(|| format!("failed to load snapshots from {}", path.display()))?
        }
        None => vec![CashFlowSnapshot::new(
            "cli",
            args.income,
            args.expenses,
            args.debt,
            args.investments,
        )],
    };

    let results = snapshots
        .iter()
        .map(|snapshot| {
            let metrics = calculate_metrics(snapshot);
            if args.breakdown {
                Ok(json!({
                    "metrics": metrics,
                    "breakdown": health_score_breakdown(snapshot),
                }))
            } else {
                serde_json::to_value(metrics)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(single_or_list(results, args.input.is_none()))
}

fn run_retirement(args: RetirementArgs) -> Result<serde_json::Value> {
    let plans = match &args.input {
        Some(path) => {
            log::info!("Loading plans from {}", path.display());
            load_plans(path)
                .with_context(|| format!("failed to load plans from {}", path.display()))?
        }
        None => vec![RetirementPlan::new(
            "cli",
            "cli",
            args.current_age,
            args.retirement_age,
            args.life_expectancy,
            args.monthly_savings,
            args.monthly_expenses,
            args.return_rate,
            args.inflation_adjusted,
        )
        .with_allocation(args.stocks, args.funds, args.cash)],
    };

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        calendar_year: args.year,
    });

    let outcomes = runner.run_batch(&plans);
    if args.input.is_none() {
        if let Some(Err(e)) = outcomes.first() {
            anyhow::bail!("plan cli could not be projected: {}", e);
        }
    }

    let projections: Vec<&RetirementProjection> =
        outcomes.iter().filter_map(|outcome| outcome.as_ref().ok()).collect();
    log::info!("Projected {} of {} plans", projections.len(), plans.len());

    if let Some(path) = &args.timeline_csv {
        write_timelines(path, &projections)?;
        log::info!("Timeline written to {}", path.display());
    }

    let results = retirement_results(&plans, &outcomes, args.summary)?;

    Ok(single_or_list(results, args.input.is_none()))
}

fn write_timelines(path: &Path, projections: &[&RetirementProjection]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;

    for projection in projections {
        for point in &projection.wealth_timeline {
            writer.serialize(TimelineCsvRow {
                plan_id: &projection.plan.id,
                age: point.age,
                year: point.year,
                wealth: point.wealth,
                phase: point.phase.as_str(),
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// One JSON record per plan, in input order
fn retirement_results(
    plans: &[RetirementPlan],
    outcomes: &[Result<RetirementProjection, ProjectionError>],
    summary: bool,
) -> serde_json::Result<Vec<serde_json::Value>> {
    plans
        .iter()
        .zip(outcomes)
        .map(|(plan, outcome)| match outcome {
            Ok(projection) if summary => Ok(json!({
                "projection": projection,
                "summary": projection.summary(),
                "requiredMonthlySavings": projection.required_monthly_savings(),
            })),
            Ok(projection) => serde_json::to_value(projection),
            Err(e) => {
                log::warn!("plan {} could not be projected: {}", plan.id, e);
                Ok(rejected_plan(&plan.id, e))
            }
        })
        .collect()
}

/// Error record standing in for a plan that failed validation
fn rejected_plan(plan_id: &str, error: &ProjectionError) -> serde_json::Value {
    json!({ "planId": plan_id, "error": error.to_string() })
}

/// A single flag-built record prints as an object, a CSV batch as an array
fn single_or_list(mut results: Vec<serde_json::Value>, single: bool) -> serde_json::Value {
    if single && results.len() == 1 {
        results.remove(0)
    } else {
        serde_json::Value::Array(results)
    }
}
