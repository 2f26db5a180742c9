//! Weighted financial health score
//!
//! The score is out of 100 and built from three components:
//! - savings (40 points): full marks at a 20% savings rate
//! - remaining cash (±35 points): rewards slack, penalizes over-allocation
//! - leverage (25 points): full marks with no debt, decaying as debt/equity grows

use serde::{Deserialize, Serialize};

use super::snapshot::CashFlowSnapshot;

/// Savings rate that earns the full savings component
pub const TARGET_SAVING_RATIO: f64 = 0.2;

/// Maximum points for the savings component
pub const SAVING_WEIGHT: f64 = 40.0;

/// Maximum points (and penalty) for the remaining-cash component
pub const CASH_WEIGHT: f64 = 35.0;

/// Maximum points for the leverage component
pub const DEBT_WEIGHT: f64 = 25.0;

/// Per-component contributions to the health score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScoreBreakdown {
    pub saving_score: f64,
    pub cash_score: f64,
    pub debt_score: f64,
    /// Clamped to 0-100 and rounded
    pub total: u8,
}

impl HealthScoreBreakdown {
    /// Breakdown used when income is zero or negative
    pub fn zero() -> Self {
        Self {
            saving_score: 0.0,
            cash_score: 0.0,
            debt_score: 0.0,
            total: 0,
        }
    }

    /// Score from unrounded ratios
    pub fn from_ratios(saving_ratio: f64, remaining_cash_ratio: f64, debt_to_equity_ratio: f64) -> Self {
        let saving_score = (saving_ratio / TARGET_SAVING_RATIO * SAVING_WEIGHT).min(SAVING_WEIGHT);

        let cash_score =
            (remaining_cash_ratio * 100.0 * (CASH_WEIGHT / 100.0)).clamp(-CASH_WEIGHT, CASH_WEIGHT);

        // 1/(1+inf) is 0, so exhausted equity earns nothing here
        let de_ratio = if debt_to_equity_ratio > 0.0 {
            1.0 / (1.0 + debt_to_equity_ratio)
        } else {
            1.0
        };
        let debt_score = (de_ratio * DEBT_WEIGHT).min(DEBT_WEIGHT);

        let raw = (saving_score + cash_score + debt_score).clamp(0.0, 100.0);

        Self {
            saving_score,
            cash_score,
            debt_score,
            total: raw.round() as u8,
        }
    }
}

/// Unrounded ratios derived from a snapshot with positive income
#[derive(Debug, Clone, Copy)]
pub(crate) struct CashFlowRatios {
    pub remaining_cash: f64,
    pub debt_to_equity_ratio: f64,
    pub saving_ratio: f64,
    pub remaining_cash_ratio: f64,
}

impl CashFlowRatios {
    /// None when income is not positive
    pub(crate) fn from_snapshot(snapshot: &CashFlowSnapshot) -> Option<Self> {
        let income = snapshot.monthly_income;
        // Negated comparison also rejects NaN income
        if !(income > 0.0) {
            return None;
        }

        let remaining_cash = income - snapshot.total_allocated();

        // "Equity" here is income left after debt service
        let equity = income - snapshot.debt;
        let debt_to_equity_ratio = if equity > 0.0 {
            snapshot.debt / equity
        } else if snapshot.debt > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        Some(Self {
            remaining_cash,
            debt_to_equity_ratio,
            saving_ratio: snapshot.investments / income,
            remaining_cash_ratio: remaining_cash / income,
        })
    }
}

/// Explain a snapshot's health score component by component
pub fn health_score_breakdown(snapshot: &CashFlowSnapshot) -> HealthScoreBreakdown {
    match CashFlowRatios::from_snapshot(snapshot) {
        Some(ratios) => HealthScoreBreakdown::from_ratios(
            ratios.saving_ratio,
            ratios.remaining_cash_ratio,
            ratios.debt_to_equity_ratio,
        ),
        None => HealthScoreBreakdown::zero(),
    }
}
