//! Retirement projection output structures

use serde::{Deserialize, Serialize};

use super::annuity::{monthly_rate, months_in_years, required_monthly_savings};
use super::plan::RetirementPlan;
use super::timeline::{Phase, WealthDataPoint};

/// Whether projected wealth covers the retirement requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapStatus {
    Surplus,
    Shortfall,
}

impl GapStatus {
    /// A gap of exactly zero counts as a surplus
    pub fn from_gap(gap: f64) -> Self {
        if gap >= 0.0 {
            GapStatus::Surplus
        } else {
            GapStatus::Shortfall
        }
    }
}

/// Plan plus everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementProjection {
    #[serde(flatten)]
    pub plan: RetirementPlan,

    pub years_to_retirement: u32,
    pub retirement_years: u32,

    /// Undiscounted sum of contributions
    pub total_invested: f64,

    /// Future value of contributions at the retirement age
    pub projected_wealth: f64,

    /// Nest egg required to fund retirement expenses
    pub target_wealth: f64,

    /// projected_wealth - target_wealth
    pub gap: f64,
    pub gap_status: GapStatus,

    pub stock_percentage: f64,
    pub fund_percentage: f64,
    pub cash_percentage: f64,

    pub wealth_timeline: Vec<WealthDataPoint>,
}

impl RetirementProjection {
    /// Summary statistics over the wealth timeline
    pub fn summary(&self) -> TimelineSummary {
        let peak = self
            .wealth_timeline
            .iter()
            .fold(None::<&WealthDataPoint>, |best, point| match best {
                Some(b) if b.wealth >= point.wealth => Some(b),
                _ => Some(point),
            });

        let wealth_at_retirement = self
            .wealth_timeline
            .iter()
            .find(|p| p.age == self.plan.retirement_age)
            .map(|p| p.wealth)
            .unwrap_or(0.0);

        let depletion_age = self
            .wealth_timeline
            .iter()
            .find(|p| p.phase == Phase::Withdrawal && p.wealth <= 0.0)
            .map(|p| p.age);

        let accumulation_points = self
            .wealth_timeline
            .iter()
            .filter(|p| p.phase == Phase::Accumulation)
            .count();

        TimelineSummary {
            peak_wealth: peak.map(|p| p.wealth).unwrap_or(0.0),
            peak_age: peak.map(|p| p.age).unwrap_or(self.plan.current_age),
            wealth_at_retirement,
            final_wealth: self.wealth_timeline.last().map(|p| p.wealth).unwrap_or(0.0),
            depletion_age,
            accumulation_points,
            withdrawal_points: self.wealth_timeline.len() - accumulation_points,
        }
    }

    /// Monthly contribution that would close the gap exactly.
    ///
    /// `None` when the expected return makes the target unreachable.
    pub fn required_monthly_savings(&self) -> Option<f64> {
        required_monthly_savings(
            self.target_wealth,
            monthly_rate(self.plan.expected_return_rate),
            months_in_years(self.years_to_retirement),
        )
    }
}

/// Summary statistics for a wealth timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSummary {
    pub peak_wealth: f64,
    /// First age at which the peak is reached
    pub peak_age: u32,
    pub wealth_at_retirement: f64,
    pub final_wealth: f64,
    /// First withdrawal age with nothing left, if savings run out
    pub depletion_age: Option<u32>,
    pub accumulation_points: usize,
    pub withdrawal_points: usize,
}
