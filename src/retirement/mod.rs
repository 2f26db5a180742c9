//! Retirement wealth projection

mod annuity;
mod plan;
mod projection;
mod timeline;
mod calculator;

pub use annuity::{
    INFLATION_RATE, monthly_rate, future_value_annuity_due, target_wealth,
    expenses_in_retirement_year, required_monthly_savings, months_in_years,
};
pub use plan::{RetirementPlan, PortfolioAllocation};
pub use projection::{RetirementProjection, GapStatus, TimelineSummary};
pub use timeline::{WealthDataPoint, Phase, TimelineInputs, generate_timeline};
pub use calculator::{RetirementCalculator, ProjectionConfig, calculate_projection, validate_plan};
