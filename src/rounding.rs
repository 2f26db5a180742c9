//! Small numeric helpers shared by the calculators

/// Round to a fixed number of decimal places. Non-finite values pass through.
pub fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(digits);
    (value * factor).round() / factor
}

/// Round a currency amount to the nearest whole unit
pub fn round_currency(value: f64) -> f64 {
    round_to(value, 0)
}
