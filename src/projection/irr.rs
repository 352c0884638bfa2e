//! Net present value and internal rate of return over monthly cash flows

/// Initial IRR guess (10%)
pub const IRR_INITIAL_GUESS: f64 = 0.10;
/// Newton-Raphson iteration limit
pub const MAX_IRR_ITERATIONS: usize = 100;
/// Converged once the rate step falls below this
pub const IRR_TOLERANCE: f64 = 1e-4;
/// Derivative magnitude below which the search gives up
pub const MIN_IRR_DERIVATIVE: f64 = 1e-4;

/// Discount monthly cash flows at an annual rate
///
/// Period `i` is discounted by `(1 + rate)^(i / 12)`.
pub fn npv(annual_rate: f64, cashflows: &[f64]) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(i, &cf)| cf / (1.0 + annual_rate).powf(i as f64 / 12.0))
        .sum()
}

/// Internal rate of return of a cash-flow series using Newton-Raphson.
///
/// Exponents are the raw period indices, so the rate is per period.
///
/// # Returns
/// * `None` when the series never changes sign, the derivative vanishes,
///   the iterate leaves `(-1, inf)`, or the search does not converge.
///   An unavailable IRR is an ordinary outcome, not an error.
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    let has_positive = cashflows.iter().any(|&cf| cf > 0.0);
    let has_negative = cashflows.iter().any(|&cf| cf < 0.0);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = IRR_INITIAL_GUESS;

    for _ in 0..MAX_IRR_ITERATIONS {
        let (value, derivative) = npv_and_derivative(cashflows, rate);

        if derivative.abs() < MIN_IRR_DERIVATIVE {
            return None;
        }

        let next = rate - value / derivative;
        if !next.is_finite() || next <= -1.0 {
            return None;
        }

        if (next - rate).abs() < IRR_TOLERANCE {
            return Some(next);
        }

        rate = next;
    }

    None
}

/// NPV at a per-period rate and its derivative with respect to the rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut derivative = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        value += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            derivative -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (value, derivative)
}
