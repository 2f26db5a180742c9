//! Retirement projection calculator

use chrono::{Datelike, Local};
use log::debug;

use super::annuity::{future_value_annuity_due, monthly_rate, months_in_years, target_wealth};
use super::plan::RetirementPlan;
use super::projection::{GapStatus, RetirementProjection};
use super::timeline::{generate_timeline, TimelineInputs};
use crate::error::ProjectionError;

/// Configuration for a projection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Calendar year of the current age. `None` reads the local clock once
    /// per projection.
    pub calendar_year: Option<i32>,
}

impl ProjectionConfig {
    /// Pin the timeline to a fixed calendar year
    pub fn for_year(calendar_year: i32) -> Self {
        Self {
            calendar_year: Some(calendar_year),
        }
    }

    /// Calendar year used for the timeline's `year` field
    pub fn resolve_calendar_year(&self) -> i32 {
        self.calendar_year.unwrap_or_else(|| Local::now().year())
    }
}

/// Check the age ordering current < retirement < life expectancy
pub fn validate_plan(plan: &RetirementPlan) -> Result<(), ProjectionError> {
    if plan.current_age >= plan.retirement_age {
        return Err(ProjectionError::RetirementBeforeCurrentAge {
            current_age: plan.current_age,
            retirement_age: plan.retirement_age,
        });
    }
    if plan.retirement_age >= plan.life_expectancy {
        return Err(ProjectionError::LifeExpectancyBeforeRetirement {
            retirement_age: plan.retirement_age,
            life_expectancy: plan.life_expectancy,
        });
    }
    Ok(())
}

/// Retirement projection calculator
#[derive(Debug, Clone, Default)]
pub struct RetirementCalculator {
    config: ProjectionConfig,
}

impl RetirementCalculator {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project a plan to retirement and through to life expectancy.
    ///
    /// Fails only on invalid age ordering. Every other input, including
    /// negative return rates and zero savings or expenses, is projected.
    pub fn calculate_projection(
        &self,
        plan: &RetirementPlan,
    ) -> Result<RetirementProjection, ProjectionError> {
        validate_plan(plan)?;

        let years_to_retirement = plan.retirement_age - plan.current_age;
        let retirement_years = plan.life_expectancy - plan.retirement_age;
        let months_to_retirement = months_in_years(years_to_retirement);

        let total_invested = plan.monthly_savings * months_to_retirement as f64;

        let rate = monthly_rate(plan.expected_return_rate);
        let projected_wealth = if rate == 0.0 {
            total_invested
        } else {
            future_value_annuity_due(plan.monthly_savings, rate, months_to_retirement)
        };

        let target_wealth = target_wealth(
            plan.annual_expenses(),
            retirement_years,
            plan.inflation_adjusted,
        );

        let gap = projected_wealth - target_wealth;
        let allocation = plan.allocation();

        let wealth_timeline = generate_timeline(
            &TimelineInputs::from_plan(plan),
            self.config.resolve_calendar_year(),
        );

        debug!(
            "plan {}: projected={:.0} target={:.0} gap={:.0} over {} years",
            plan.id, projected_wealth, target_wealth, gap, years_to_retirement
        );

        Ok(RetirementProjection {
            plan: plan.clone(),
            years_to_retirement,
            retirement_years,
            total_invested,
            projected_wealth,
            target_wealth,
            gap,
            gap_status: GapStatus::from_gap(gap),
            stock_percentage: allocation.stock_percentage,
            fund_percentage: allocation.fund_percentage,
            cash_percentage: allocation.cash_percentage,
            wealth_timeline,
        })
    }
}

/// Project a plan using the current calendar year
pub fn calculate_projection(plan: &RetirementPlan) -> Result<RetirementProjection, ProjectionError> {
    RetirementCalculator::default().calculate_projection(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retirement::timeline::Phase;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const YEAR: i32 = 2025;

    fn calculator() -> RetirementCalculator {
        RetirementCalculator::new(ProjectionConfig::for_year(YEAR))
    }

    fn reference_plan() -> RetirementPlan {
        RetirementPlan::new("plan-1", "user-1", 30, 60, 85, 10000.0, 30000.0, 0.0, false)
    }

    #[test]
    fn test_zero_return_reference_plan() {
        let projection = calculator().calculate_projection(&reference_plan()).unwrap();

        assert_eq!(projection.years_to_retirement, 30);
        assert_eq!(projection.retirement_years, 25);
        assert_eq!(projection.total_invested, 3_600_000.0);
        assert_eq!(projection.projected_wealth, 3_600_000.0);
        assert_eq!(projection.target_wealth, 9_000_000.0);
        assert_eq!(projection.gap, -5_400_000.0);
        assert_eq!(projection.gap_status, GapStatus::Shortfall);
    }

    #[test]
    fn test_rejects_retirement_not_after_current_age() {
        let mut plan = reference_plan();
        plan.retirement_age = 30;
        let err = calculator().calculate_projection(&plan).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::RetirementBeforeCurrentAge {
                current_age: 30,
                retirement_age: 30
            }
        );
        assert_eq!(err.to_string(), "retirement age must exceed current age");

        plan.current_age = 45;
        assert!(calculator().calculate_projection(&plan).is_err());
    }

    #[test]
    fn test_rejects_life_expectancy_not_after_retirement() {
        let mut plan = reference_plan();
        plan.life_expectancy = 60;
        let err = calculator().calculate_projection(&plan).unwrap_err();
        assert_eq!(err.to_string(), "life expectancy must exceed retirement age");

        plan.life_expectancy = 55;
        assert!(matches!(
            calculator().calculate_projection(&plan),
            Err(ProjectionError::LifeExpectancyBeforeRetirement { .. })
        ));
    }

    #[test]
    fn test_age_errors_ignore_other_fields() {
        let mut plan = RetirementPlan::new("p", "u", 70, 65, 90, -1.0, -1.0, 500.0, true)
            .with_allocation(-5.0, 0.0, 0.0);
        assert!(calculator().calculate_projection(&plan).is_err());

        plan.current_age = 60;
        plan.life_expectancy = 65;
        assert!(calculator().calculate_projection(&plan).is_err());
    }

    #[test]
    fn test_annuity_due_projection() {
        let mut plan = reference_plan();
        plan.expected_return_rate = 7.0;
        let projection = calculator().calculate_projection(&plan).unwrap();

        assert_relative_eq!(projection.projected_wealth, 12270874.932513045, max_relative = 1e-9);
        assert!(projection.projected_wealth > projection.total_invested);
        assert_eq!(projection.gap_status, GapStatus::Surplus);
    }

    #[test]
    fn test_negative_return_stays_finite() {
        let mut plan = reference_plan();
        plan.expected_return_rate = -10.0;
        let projection = calculator().calculate_projection(&plan).unwrap();

        assert!(projection.projected_wealth.is_finite());
        assert!(projection.projected_wealth < projection.total_invested);
        assert!(projection.wealth_timeline.iter().all(|p| p.wealth >= 0.0));
    }

    #[test]
    fn test_inflation_adjusted_target_exceeds_flat() {
        let flat = calculator().calculate_projection(&reference_plan()).unwrap();

        let mut plan = reference_plan();
        plan.inflation_adjusted = true;
        let adjusted = calculator().calculate_projection(&plan).unwrap();

        assert!(adjusted.target_wealth > flat.target_wealth);
        assert_relative_eq!(
            adjusted.target_wealth,
            360_000.0 * ((1.04_f64.powi(25) - 1.0) / 0.04),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_portfolio_percentages() {
        let plan = reference_plan().with_allocation(6000.0, 3000.0, 1000.0);
        let projection = calculator().calculate_projection(&plan).unwrap();

        assert_abs_diff_eq!(projection.stock_percentage, 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(projection.fund_percentage, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(projection.cash_percentage, 10.0, epsilon = 1e-9);

        let empty = calculator().calculate_projection(&reference_plan()).unwrap();
        assert_eq!(empty.stock_percentage, 0.0);
        assert_eq!(empty.fund_percentage, 0.0);
        assert_eq!(empty.cash_percentage, 0.0);
    }

    #[test]
    fn test_timeline_attached() {
        let plan = RetirementPlan::new("p", "u", 30, 35, 40, 5000.0, 20000.0, 6.0, false);
        let projection = calculator().calculate_projection(&plan).unwrap();
        let timeline = &projection.wealth_timeline;

        assert_eq!(timeline.len(), 11);
        assert_eq!(timeline[0].age, 30);
        assert_eq!(timeline[0].year, YEAR);
        assert_eq!(timeline[0].wealth, 0.0);
        assert_eq!(timeline[0].phase, Phase::Accumulation);
        assert_eq!(timeline[6].age, 36);
        assert_eq!(timeline[6].phase, Phase::Withdrawal);
        assert_eq!(timeline[5].phase, Phase::Accumulation);
        assert_eq!(timeline[10].year, YEAR + 10);
    }

    #[test]
    fn test_timeline_meets_projected_wealth_at_retirement() {
        let mut plan = reference_plan();
        plan.expected_return_rate = 5.5;
        let projection = calculator().calculate_projection(&plan).unwrap();

        let at_retirement = projection
            .wealth_timeline
            .iter()
            .find(|p| p.age == plan.retirement_age)
            .unwrap();
        assert_eq!(at_retirement.wealth, projection.projected_wealth.round());
        assert_eq!(
            projection.wealth_timeline.len(),
            (plan.life_expectancy - plan.current_age + 1) as usize
        );
    }

    #[test]
    fn test_idempotent() {
        let mut plan = reference_plan();
        plan.expected_return_rate = 6.0;
        plan.inflation_adjusted = true;
        let first = calculator().calculate_projection(&plan).unwrap();
        let second = calculator().calculate_projection(&plan).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_config_uses_current_year() {
        let projection = calculate_projection(&reference_plan()).unwrap();
        assert_eq!(projection.wealth_timeline[0].year, Local::now().year());
    }

    #[test]
    fn test_serialized_record_merges_fields() {
        let plan = reference_plan().with_allocation(1.0, 1.0, 1.0);
        let projection = calculator().calculate_projection(&plan).unwrap();
        let value = serde_json::to_value(&projection).unwrap();
        let object = value.as_object().unwrap();

        // 14 plan fields + 11 derived fields, no collisions
        assert_eq!(object.len(), 25);
        assert_eq!(object["currentAge"], 30);
        assert_eq!(object["gapStatus"], "shortfall");
        assert_eq!(object["wealthTimeline"][0]["phase"], "accumulation");

        let parsed: RetirementProjection = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, projection);
    }

    #[test]
    fn test_summary() {
        let plan = RetirementPlan::new("p", "u", 30, 35, 40, 5000.0, 20000.0, 6.0, false);
        let summary = calculator().calculate_projection(&plan).unwrap().summary();

        assert_eq!(summary.peak_wealth, 350594.0);
        assert_eq!(summary.peak_age, 35);
        assert_eq!(summary.wealth_at_retirement, 350594.0);
        assert_eq!(summary.final_wealth, 0.0);
        assert_eq!(summary.depletion_age, Some(37));
        assert_eq!(summary.accumulation_points, 6);
        assert_eq!(summary.withdrawal_points, 5);
    }

    #[test]
    fn test_summary_without_depletion() {
        let plan = RetirementPlan::new("p", "u", 30, 60, 85, 20000.0, 1000.0, 5.0, true);
        let summary = calculator().calculate_projection(&plan).unwrap().summary();
        assert_eq!(summary.depletion_age, None);
        assert!(summary.final_wealth > 0.0);
    }

    #[test]
    fn test_required_monthly_savings_closes_gap() {
        let plan = reference_plan();
        let projection = calculator().calculate_projection(&plan).unwrap();
        let required = projection.required_monthly_savings().unwrap();
        assert_relative_eq!(required, 25_000.0, max_relative = 1e-12);

        let mut funded = plan.clone();
        funded.monthly_savings = required;
        let rerun = calculator().calculate_projection(&funded).unwrap();
        assert_abs_diff_eq!(rerun.gap, 0.0, epsilon = 1e-6);
    }
}
