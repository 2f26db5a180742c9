//! Retirement plan input record and portfolio allocation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's retirement plan as stored by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlan {
    /// Record identifier
    pub id: String,

    /// Owner of the plan
    pub user_id: String,

    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,

    /// Contribution made at the start of every month until retirement
    pub monthly_savings: f64,

    /// Expected monthly spending in retirement, in today's money
    pub monthly_expenses: f64,

    /// Expected annual return in percent (7.0 = 7%/year), may be negative
    pub expected_return_rate: f64,

    /// Grow retirement expenses with inflation
    pub inflation_adjusted: bool,

    // Portfolio split of the monthly contribution
    pub stocks: f64,
    pub funds: f64,
    pub cash: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RetirementPlan {
    /// Create a plan with an empty portfolio split, stamped with the current time
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        current_age: u32,
        retirement_age: u32,
        life_expectancy: u32,
        monthly_savings: f64,
        monthly_expenses: f64,
        expected_return_rate: f64,
        inflation_adjusted: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            current_age,
            retirement_age,
            life_expectancy,
            monthly_savings,
            monthly_expenses,
            expected_return_rate,
            inflation_adjusted,
            stocks: 0.0,
            funds: 0.0,
            cash: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the portfolio split
    pub fn with_allocation(mut self, stocks: f64, funds: f64, cash: f64) -> Self {
        self.stocks = stocks;
        self.funds = funds;
        self.cash = cash;
        self
    }

    /// Annual spending in retirement before any inflation growth
    pub fn annual_expenses(&self) -> f64 {
        self.monthly_expenses * 12.0
    }

    /// Percentages of the portfolio split
    pub fn allocation(&self) -> PortfolioAllocation {
        PortfolioAllocation::from_amounts(self.stocks, self.funds, self.cash)
    }
}

/// Portfolio split expressed as percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAllocation {
    pub stock_percentage: f64,
    pub fund_percentage: f64,
    pub cash_percentage: f64,
}

impl PortfolioAllocation {
    /// Shares of the total, unrounded. An empty portfolio is all zeros.
    pub fn from_amounts(stocks: f64, funds: f64, cash: f64) -> Self {
        let total = stocks + funds + cash;
        if total > 0.0 {
            Self {
                stock_percentage: stocks / total * 100.0,
                fund_percentage: funds / total * 100.0,
                cash_percentage: cash / total * 100.0,
            }
        } else {
            Self {
                stock_percentage: 0.0,
                fund_percentage: 0.0,
                cash_percentage: 0.0,
            }
        }
    }

    pub fn total(&self) -> f64 {
        self.stock_percentage + self.fund_percentage + self.cash_percentage
    }
}
