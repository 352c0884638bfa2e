//! Currency conversion through a USD base table
//!
//! Unconfigured currencies resolve to a neutral rate of 1 with a warning
//! rather than an error; callers that need strictness should check
//! [`FxResolver::is_known`] first.

use crate::config::{CurrencyTable, BASE_CURRENCY};
use log::warn;

/// Resolves conversion multipliers between configured currencies
#[derive(Debug, Clone, Copy)]
pub struct FxResolver<'a> {
    table: &'a CurrencyTable,
}

impl<'a> FxResolver<'a> {
    pub fn new(table: &'a CurrencyTable) -> Self {
        Self { table }
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.table.per_usd(code).is_some()
    }

    fn per_usd(&self, code: &str) -> f64 {
        self.table.per_usd(code).unwrap_or_else(|| {
            warn!("Currency '{}' not configured, using neutral rate 1.0", code);
            1.0
        })
    }

    /// Multiplier converting one unit of `from` into `to`
    pub fn rate(&self, from: &str, to: &str) -> f64 {
        if from.eq_ignore_ascii_case(to) {
            return 1.0;
        }
        if from.eq_ignore_ascii_case(BASE_CURRENCY) {
            return self.per_usd(to);
        }
        if to.eq_ignore_ascii_case(BASE_CURRENCY) {
            return 1.0 / self.per_usd(from);
        }
        // Cross rate via USD
        (1.0 / self.per_usd(from)) * self.per_usd(to)
    }

    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        amount * self.rate(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> CurrencyTable {
        CurrencyTable::new()
            .with_rate("CAD", 1.35)
            .with_rate("EUR", 0.92)
            .with_rate("AUD", 1.50)
    }

    #[test]
    fn test_same_currency_is_one() {
        let t = table();
        let fx = FxResolver::new(&t);
        assert_eq!(fx.rate("CAD", "cad"), 1.0);
        assert_eq!(fx.rate("XYZ", "XYZ"), 1.0);
    }

    #[test]
    fn test_direct_and_reciprocal() {
        let t = table();
        let fx = FxResolver::new(&t);
        assert_relative_eq!(fx.rate("USD", "CAD"), 1.35);
        assert_relative_eq!(fx.rate("CAD", "USD"), 1.0 / 1.35);
        assert_relative_eq!(fx.convert(1_350.0, "CAD", "USD"), 1_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cross_rate_via_usd() {
        let t = table();
        let fx = FxResolver::new(&t);
        assert_relative_eq!(fx.rate("EUR", "CAD"), 1.35 / 0.92, epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip_all_pairs() {
        let t = table();
        let fx = FxResolver::new(&t);
        let codes: Vec<&str> = std::iter::once("USD").chain(t.codes()).collect();
        for a in &codes {
            for b in &codes {
                let product = fx.rate(a, b) * fx.rate(b, a);
                assert_relative_eq!(product, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_unknown_currency_is_neutral() {
        let t = table();
        let fx = FxResolver::new(&t);
        assert!(!fx.is_known("JPY"));
        assert_eq!(fx.rate("USD", "JPY"), 1.0);
        assert_relative_eq!(fx.rate("JPY", "CAD"), 1.35);
    }
}
