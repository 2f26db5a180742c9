//! Time-value-of-money formulas used by the retirement projection
//!
//! Contributions are modelled as an annuity-due: each monthly deposit is made
//! at the start of the month and compounds for one extra period compared to an
//! ordinary annuity.

/// Fixed annual inflation assumption for retirement expenses
pub const INFLATION_RATE: f64 = 0.04;

/// Convert an annual percentage (7.0 = 7%/year) to a monthly decimal rate
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / 12.0
}

/// Months in `years` whole years, saturating at `u32::MAX`
pub fn months_in_years(years: u32) -> u32 {
    years.saturating_mul(12)
}

fn exponent(periods: u32) -> i32 {
    i32::try_from(periods).unwrap_or(i32::MAX)
}

/// Future value of `months` start-of-month deposits of `payment`.
///
/// A zero rate falls back to the undiscounted sum of deposits.
pub fn future_value_annuity_due(payment: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return payment * months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(exponent(months));
    payment * (growth - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

/// Nest egg needed to fund `years` of `annual_expenses`.
///
/// When inflation adjusted, expenses grow at [`INFLATION_RATE`] per year and
/// the requirement is the sum of that growing series.
pub fn target_wealth(annual_expenses: f64, years: u32, inflation_adjusted: bool) -> f64 {
    if inflation_adjusted {
        annual_expenses * (((1.0 + INFLATION_RATE).powi(exponent(years)) - 1.0) / INFLATION_RATE)
    } else {
        annual_expenses * years as f64
    }
}

/// Annual expenses in a given year of retirement (1 = first year drawn)
pub fn expenses_in_retirement_year(
    annual_expenses: f64,
    years_into_retirement: u32,
    inflation_adjusted: bool,
) -> f64 {
    if inflation_adjusted {
        annual_expenses * (1.0 + INFLATION_RATE).powi(exponent(years_into_retirement))
    } else {
        annual_expenses
    }
}

/// Monthly deposit whose annuity-due future value reaches `target`.
///
/// Returns `Some(0.0)` when nothing is needed, and `None` when no finite
/// deposit can reach a positive target (no months left, or a rate that wipes
/// out every deposit).
pub fn required_monthly_savings(target: f64, monthly_rate: f64, months: u32) -> Option<f64> {
    if target <= 0.0 {
        return Some(0.0);
    }
    let factor = future_value_annuity_due(1.0, monthly_rate, months);
    if factor > 0.0 {
        Some(target / factor)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_rate() {
        assert_relative_eq!(monthly_rate(12.0), 0.01, max_relative = 1e-12);
        assert_eq!(monthly_rate(0.0), 0.0);
        assert!(monthly_rate(-6.0) < 0.0);
    }

    #[test]
    fn test_annuity_due_one_year() {
        let fv = future_value_annuity_due(1000.0, 0.01, 12);
        assert_relative_eq!(fv, 12809.328043328946, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_rate_is_plain_sum() {
        assert_eq!(future_value_annuity_due(10000.0, 0.0, 360), 3_600_000.0);
    }

    #[test]
    fn test_zero_months() {
        assert_eq!(future_value_annuity_due(10000.0, 0.01, 0), 0.0);
    }

    #[test]
    fn test_finite_across_rate_domain() {
        let mut annual = -10.0;
        while annual <= 20.0 {
            let fv = future_value_annuity_due(10000.0, monthly_rate(annual), 480);
            assert!(fv.is_finite(), "rate {} gave {}", annual, fv);
            assert!(fv >= 0.0);
            annual += 0.5;
        }
    }

    #[test]
    fn test_negative_rate_loses_value() {
        let fv = future_value_annuity_due(10000.0, monthly_rate(-10.0), 360);
        assert!(fv < 3_600_000.0);
        assert_relative_eq!(fv, 1131493.4505302135, max_relative = 1e-9);
    }

    #[test]
    fn test_target_wealth_flat() {
        assert_eq!(target_wealth(360_000.0, 25, false), 9_000_000.0);
    }

    #[test]
    fn test_target_wealth_inflation_adjusted() {
        assert_relative_eq!(target_wealth(12000.0, 2, true), 24480.0, max_relative = 1e-12);
        for years in 1..=50 {
            assert!(target_wealth(12000.0, years, true) >= target_wealth(12000.0, years, false));
        }
    }

    #[test]
    fn test_expenses_in_retirement_year() {
        assert_eq!(expenses_in_retirement_year(1200.0, 3, false), 1200.0);
        assert_relative_eq!(expenses_in_retirement_year(1200.0, 1, true), 1248.0, max_relative = 1e-12);
    }

    #[test]
    fn test_required_savings_inverts_future_value() {
        let required = required_monthly_savings(1_000_000.0, 0.005, 240).unwrap();
        let fv = future_value_annuity_due(required, 0.005, 240);
        assert_relative_eq!(fv, 1_000_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_required_savings_edges() {
        assert_eq!(required_monthly_savings(0.0, 0.01, 12), Some(0.0));
        assert_eq!(required_monthly_savings(1200.0, 0.0, 12), Some(100.0));
        assert_eq!(required_monthly_savings(1200.0, 0.01, 0), None);
    }

    #[test]
    fn test_months_saturate_for_long_horizons() {
        assert_eq!(months_in_years(30), 360);
        assert_eq!(months_in_years(400_000_000), u32::MAX);
        assert_eq!(months_in_years(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_long_horizon_stays_non_negative() {
        // More months than fit in an i32 exponent must not wrap to a negative power
        let months = months_in_years(400_000_000);
        let shrinking = future_value_annuity_due(100.0, -0.01, months);
        assert!(shrinking.is_finite() && shrinking > 0.0);
        assert_eq!(future_value_annuity_due(100.0, 0.0, months), 100.0 * u32::MAX as f64);
    }
}
