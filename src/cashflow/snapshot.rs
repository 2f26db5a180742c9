//! Cash-flow snapshot input and derived metrics output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health tier derived from the rounded financial health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthCategory {
    /// Classify a score. Thresholds are contiguous, so every score maps to a tier.
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            HealthCategory::Excellent
        } else if score >= 60 {
            HealthCategory::Good
        } else if score >= 40 {
            HealthCategory::Fair
        } else {
            HealthCategory::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthCategory::Excellent => "Excellent",
            HealthCategory::Good => "Good",
            HealthCategory::Fair => "Fair",
            HealthCategory::Poor => "Poor",
        }
    }
}

/// One point-in-time cash-flow record as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSnapshot {
    /// Record identifier assigned by the store
    pub id: String,

    /// Monthly income
    pub monthly_income: f64,

    /// Monthly living expenses
    pub expenses: f64,

    /// Monthly debt repayments
    pub debt: f64,

    /// Monthly amount invested
    pub investments: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CashFlowSnapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(
        id: impl Into<String>,
        monthly_income: f64,
        expenses: f64,
        debt: f64,
        investments: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            monthly_income,
            expenses,
            debt,
            investments,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of the three allocation buckets
    pub fn total_allocated(&self) -> f64 {
        self.expenses + self.debt + self.investments
    }
}

/// Snapshot plus derived cash-flow metrics
///
/// The snapshot is flattened on serialization so the record reads as a single
/// object carrying both the input and the derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowMetrics {
    #[serde(flatten)]
    pub snapshot: CashFlowSnapshot,

    /// Income left after all allocations (negative when over-allocated)
    pub remaining_cash: f64,

    /// Weighted health score, 0-100
    pub financial_health_score: u8,

    /// Debt over (income - debt), 2 decimals; `f64::INFINITY` when equity is exhausted
    #[serde(with = "unbounded_ratio")]
    pub debt_to_equity_ratio: f64,

    /// Investments over income, 2 decimals
    pub saving_ratio: f64,

    pub health_category: HealthCategory,
}

/// Serde adapter for ratios that may be positive infinity.
///
/// JSON has no infinity literal, so the value travels as the string `"Infinity"`.
pub mod unbounded_ratio {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    const INFINITY_TEXT: &str = "Infinity";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() && value.is_sign_positive() {
            serializer.serialize_str(INFINITY_TEXT)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(value),
            Raw::Text(text) if text == INFINITY_TEXT => Ok(f64::INFINITY),
            Raw::Text(text) => Err(de::Error::invalid_value(
                Unexpected::Str(&text),
                &"a number or \"Infinity\"",
            )),
        }
    }
}
