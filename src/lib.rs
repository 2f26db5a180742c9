//! Finance Projection - calculation engine for personal-finance dashboards
//!
//! This library provides:
//! - Cash-flow health scoring (remaining cash, debt-to-equity, savings ratio, health tier)
//! - Retirement projections (annuity-due accumulation, target wealth, surplus/shortfall gap)
//! - Year-by-year wealth timelines through accumulation and withdrawal
//! - CSV loading of snapshot and plan records, and a what-if scenario runner
//!
//! All amounts are plain `f64` values in a single implicit currency.

pub mod error;
pub mod cashflow;
pub mod retirement;
pub mod loader;
pub mod scenario;
mod rounding;

// Re-export commonly used types
pub use error::{ProjectionError, LoadError};
pub use cashflow::{CashFlowSnapshot, CashFlowMetrics, HealthCategory, calculate_metrics};
pub use retirement::{
    RetirementPlan, RetirementProjection, RetirementCalculator, ProjectionConfig,
    WealthDataPoint, Phase, GapStatus, calculate_projection,
};
pub use scenario::ScenarioRunner;
