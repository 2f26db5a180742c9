//! Load cash-flow snapshots and retirement plans from CSV
//!
//! Column headers use the record field names (`monthlyIncome`, `currentAge`, ...).
//! Timestamp columns are optional; blank or missing timestamps are stamped
//! with the load time.

use chrono::{DateTime, Utc};
use csv::Reader;
use std::path::Path;

use crate::cashflow::CashFlowSnapshot;
use crate::error::LoadError;
use crate::retirement::RetirementPlan;

/// Raw CSV row for a cash-flow snapshot
#[derive(Debug, serde::Deserialize)]
struct SnapshotRow {
    #[serde(rename = "id")]
    id: String,
    #[serde(rename = "monthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "expenses")]
    expenses: f64,
    #[serde(rename = "debt")]
    debt: f64,
    #[serde(rename = "investments")]
    investments: f64,
    #[serde(rename = "createdAt", default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<DateTime<Utc>>,
}

impl SnapshotRow {
    fn into_snapshot(self, loaded_at: DateTime<Utc>) -> CashFlowSnapshot {
        let created_at = self.created_at.unwrap_or(loaded_at);
        CashFlowSnapshot {
            id: self.id,
            monthly_income: self.monthly_income,
            expenses: self.expenses,
            debt: self.debt,
            investments: self.investments,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

/// Raw CSV row for a retirement plan
#[derive(Debug, serde::Deserialize)]
struct PlanRow {
    #[serde(rename = "id")]
    id: String,
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(rename = "currentAge")]
    current_age: u32,
    #[serde(rename = "retirementAge")]
    retirement_age: u32,
    #[serde(rename = "lifeExpectancy")]
    life_expectancy: u32,
    #[serde(rename = "monthlySavings")]
    monthly_savings: f64,
    #[serde(rename = "monthlyExpenses")]
    monthly_expenses: f64,
    #[serde(rename = "expectedReturnRate")]
    expected_return_rate: f64,
    #[serde(rename = "inflationAdjusted")]
    inflation_adjusted: bool,
    #[serde(rename = "stocks", default)]
    stocks: f64,
    #[serde(rename = "funds", default)]
    funds: f64,
    #[serde(rename = "cash", default)]
    cash: f64,
    #[serde(rename = "createdAt", default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<DateTime<Utc>>,
}

impl PlanRow {
    fn into_plan(self, loaded_at: DateTime<Utc>) -> RetirementPlan {
        let created_at = self.created_at.unwrap_or(loaded_at);
        RetirementPlan {
            id: self.id,
            user_id: self.user_id,
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            life_expectancy: self.life_expectancy,
            monthly_savings: self.monthly_savings,
            monthly_expenses: self.monthly_expenses,
            expected_return_rate: self.expected_return_rate,
            inflation_adjusted: self.inflation_adjusted,
            stocks: self.stocks,
            funds: self.funds,
            cash: self.cash,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

/// Load all snapshots from a CSV file
pub fn load_snapshots<P: AsRef<Path>>(path: P) -> Result<Vec<CashFlowSnapshot>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_snapshots_from_reader(file)
}

/// Load snapshots from any reader (e.g., string buffer, request body)
pub fn load_snapshots_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<CashFlowSnapshot>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let loaded_at = Utc::now();
    let mut snapshots = Vec::new();

    for result in csv_reader.deserialize() {
        let row: SnapshotRow = result?;
        snapshots.push(row.into_snapshot(loaded_at));
    }

    log::debug!("loaded {} cash-flow snapshots", snapshots.len());
    Ok(snapshots)
}

/// Load all retirement plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<RetirementPlan>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_plans_from_reader(file)
}

/// Load retirement plans from any reader
pub fn load_plans_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<RetirementPlan>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let loaded_at = Utc::now();
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: PlanRow = result?;
        plans.push(row.into_plan(loaded_at));
    }

    log::debug!("loaded {} retirement plans", plans.len());
    Ok(plans)
}
