//! Scenario runner for batch and what-if projections
//!
//! Holds one projection config and reuses it across many plans or across
//! alternative return assumptions for a single plan.

use crate::error::ProjectionError;
use crate::retirement::{ProjectionConfig, RetirementCalculator, RetirementPlan, RetirementProjection};

/// Runs retirement projections under a shared config
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::for_year(2025);
///
/// // Same plan under pessimistic, base and optimistic returns
/// let projections = runner.run_return_scenarios(&plan, &[2.0, 5.0, 8.0])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    calculator: RetirementCalculator,
}

impl ScenarioRunner {
    /// Runner reading the calendar year from the local clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner with an explicit config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            calculator: RetirementCalculator::new(config),
        }
    }

    /// Runner pinned to a calendar year
    pub fn for_year(calendar_year: i32) -> Self {
        Self::with_config(ProjectionConfig::for_year(calendar_year))
    }

    /// Project a single plan
    pub fn run(&self, plan: &RetirementPlan) -> Result<RetirementProjection, ProjectionError> {
        self.calculator.calculate_projection(plan)
    }

    /// Project several plans; each result stands on its own
    pub fn run_batch(
        &self,
        plans: &[RetirementPlan],
    ) -> Vec<Result<RetirementProjection, ProjectionError>> {
        plans.iter().map(|plan| self.run(plan)).collect()
    }

    /// Project one plan under each alternative annual return (percent).
    ///
    /// All scenarios share the plan's ages, so an invalid plan fails once for
    /// the whole set.
    pub fn run_return_scenarios(
        &self,
        plan: &RetirementPlan,
        return_rates: &[f64],
    ) -> Result<Vec<RetirementProjection>, ProjectionError> {
        return_rates
            .iter()
            .map(|&rate| {
                let mut scenario = plan.clone();
                scenario.expected_return_rate = rate;
                self.run(&scenario)
            })
            .collect()
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.calculator.config()
    }
}
