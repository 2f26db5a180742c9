//! Cash-flow metrics calculation

use log::{debug, warn};

use super::health::{CashFlowRatios, HealthScoreBreakdown};
use super::snapshot::{CashFlowMetrics, CashFlowSnapshot, HealthCategory};
use crate::rounding::round_to;

/// Derive remaining cash, ratios, health score and category from a snapshot.
///
/// Never fails. Zero or negative income yields a zero score and a "Poor"
/// category rather than dividing by zero.
pub fn calculate_metrics(snapshot: &CashFlowSnapshot) -> CashFlowMetrics {
    let Some(ratios) = CashFlowRatios::from_snapshot(snapshot) else {
        warn!(
            "snapshot {} has non-positive monthly income ({}); using default metrics",
            snapshot.id, snapshot.monthly_income
        );
        return CashFlowMetrics {
            snapshot: snapshot.clone(),
            remaining_cash: -snapshot.total_allocated(),
            financial_health_score: 0,
            debt_to_equity_ratio: 0.0,
            saving_ratio: 0.0,
            health_category: HealthCategory::Poor,
        };
    };

    let score = HealthScoreBreakdown::from_ratios(
        ratios.saving_ratio,
        ratios.remaining_cash_ratio,
        ratios.debt_to_equity_ratio,
    )
    .total;

    let metrics = CashFlowMetrics {
        snapshot: snapshot.clone(),
        remaining_cash: ratios.remaining_cash,
        financial_health_score: score,
        debt_to_equity_ratio: round_to(ratios.debt_to_equity_ratio, 2),
        saving_ratio: round_to(ratios.saving_ratio, 2),
        health_category: HealthCategory::from_score(score),
    };

    debug!(
        "cash flow {}: remaining={:.2} score={} category={}",
        snapshot.id,
        metrics.remaining_cash,
        metrics.financial_health_score,
        metrics.health_category.as_str()
    );

    metrics
}
