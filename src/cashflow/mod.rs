//! Cash-flow health scoring

mod snapshot;
mod health;
mod calculator;

pub use snapshot::{CashFlowSnapshot, CashFlowMetrics, HealthCategory, unbounded_ratio};
pub use health::{
    HealthScoreBreakdown, health_score_breakdown,
    TARGET_SAVING_RATIO, SAVING_WEIGHT, CASH_WEIGHT, DEBT_WEIGHT,
};
pub use calculator::calculate_metrics;
