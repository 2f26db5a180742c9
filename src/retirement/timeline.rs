//! Year-by-year wealth timeline across accumulation and withdrawal

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::annuity::{
    expenses_in_retirement_year, future_value_annuity_due, monthly_rate, months_in_years,
};
use super::plan::RetirementPlan;
use crate::rounding::round_currency;

/// Which side of retirement a timeline point falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Contributing, up to and including the retirement age
    Accumulation,
    /// Drawing down expenses after retirement
    Withdrawal,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Accumulation => "accumulation",
            Phase::Withdrawal => "withdrawal",
        }
    }
}

/// Wealth at one integer age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WealthDataPoint {
    pub age: u32,

    /// Calendar year the age falls in
    pub year: i32,

    /// Rounded to whole currency units, never negative
    pub wealth: f64,

    pub phase: Phase,
}

/// Parameters driving the timeline walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub monthly_savings: f64,
    /// Monthly decimal rate (0.01 = 1%/month)
    pub monthly_rate: f64,
    pub monthly_expenses: f64,
    pub inflation_adjusted: bool,
}

impl TimelineInputs {
    pub fn from_plan(plan: &RetirementPlan) -> Self {
        Self {
            current_age: plan.current_age,
            retirement_age: plan.retirement_age,
            life_expectancy: plan.life_expectancy,
            monthly_savings: plan.monthly_savings,
            monthly_rate: monthly_rate(plan.expected_return_rate),
            monthly_expenses: plan.monthly_expenses,
            inflation_adjusted: plan.inflation_adjusted,
        }
    }

    /// Number of points the walk emits
    pub fn point_count(&self) -> usize {
        self.life_expectancy.saturating_sub(self.current_age) as usize + 1
    }
}

/// Walk from the current age to life expectancy, one point per year.
///
/// Accumulation points come straight from the annuity-due future value at the
/// elapsed number of months, so the retirement-age point equals the projected
/// wealth. Withdrawal points grow the running balance by one year at the
/// annualized rate, subtract that year's expenses and floor at zero. The
/// floored balance carries into the next year; rounding only applies to the
/// emitted value.
///
/// Inputs whose ages are not in non-decreasing order produce an empty timeline.
pub fn generate_timeline(inputs: &TimelineInputs, calendar_year: i32) -> Vec<WealthDataPoint> {
    if inputs.current_age > inputs.retirement_age || inputs.retirement_age > inputs.life_expectancy {
        warn!(
            "ages out of order (current {}, retirement {}, life expectancy {}); no timeline generated",
            inputs.current_age, inputs.retirement_age, inputs.life_expectancy
        );
        return Vec::new();
    }

    let mut timeline = Vec::with_capacity(inputs.point_count());
    let year_of = |age: u32| {
        let offset = i32::try_from(age - inputs.current_age).unwrap_or(i32::MAX);
        calendar_year.saturating_add(offset)
    };

    let mut wealth = 0.0;
    for age in inputs.current_age..=inputs.retirement_age {
        let months_elapsed = months_in_years(age - inputs.current_age);
        wealth = future_value_annuity_due(inputs.monthly_savings, inputs.monthly_rate, months_elapsed);

        timeline.push(WealthDataPoint {
            age,
            year: year_of(age),
            wealth: round_currency(wealth),
            phase: Phase::Accumulation,
        });
    }

    let annual_rate = inputs.monthly_rate * 12.0;
    let annual_expenses = inputs.monthly_expenses * 12.0;

    for age in (inputs.retirement_age + 1)..=inputs.life_expectancy {
        let yearly_expenses = expenses_in_retirement_year(
            annual_expenses,
            age - inputs.retirement_age,
            inputs.inflation_adjusted,
        );
        wealth = (wealth * (1.0 + annual_rate) - yearly_expenses).max(0.0);

        timeline.push(WealthDataPoint {
            age,
            year: year_of(age),
            wealth: round_currency(wealth),
            phase: Phase::Withdrawal,
        });
    }

    debug!(
        "generated {} timeline points (ages {}-{}), final wealth {:.0}",
        timeline.len(),
        inputs.current_age,
        inputs.life_expectancy,
        wealth
    );

    timeline
}
