//! Fuel unit rates with a discrete price-scenario distribution
//!
//! Scenarios feed what-if evaluation only; deterministic unit costing never
//! reads fuel rates.

use crate::config::{FuelItem, FuelScenario};
use crate::fx::FxResolver;
use serde::{Deserialize, Serialize};

/// Low/base/high distribution used when an item configures none
pub fn default_fuel_scenarios() -> Vec<FuelScenario> {
    [("low", 0.85, 0.25), ("base", 1.0, 0.5), ("high", 1.25, 0.25)]
        .into_iter()
        .map(|(name, multiplier, probability)| FuelScenario {
            name: name.to_string(),
            multiplier,
            probability,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelRate {
    pub fuel_id: String,
    pub name: String,
    pub unit: String,

    /// Base price per unit in project currency
    pub unit_cost: f64,

    pub scenarios: Vec<FuelScenario>,
}

impl FuelRate {
    pub fn derive(item: &FuelItem, fx: &FxResolver<'_>, project_currency: &str) -> Self {
        let scenarios = if item.scenarios.is_empty() {
            default_fuel_scenarios()
        } else {
            item.scenarios.clone()
        };

        Self {
            fuel_id: item.id.clone(),
            name: item.name.clone(),
            unit: item.unit.clone(),
            unit_cost: fx.convert(item.unit_cost, &item.currency, project_currency),
            scenarios,
        }
    }

    /// Probability-weighted unit cost across all scenarios
    pub fn expected_unit_cost(&self) -> f64 {
        self.scenarios
            .iter()
            .map(|s| self.unit_cost * s.multiplier * s.probability)
            .sum()
    }

    /// Unit cost under a single named scenario
    pub fn scenario_unit_cost(&self, scenario: &str) -> Option<f64> {
        self.scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(scenario))
            .map(|s| self.unit_cost * s.multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurrencyTable;
    use approx::assert_relative_eq;

    fn diesel(scenarios: Vec<FuelScenario>) -> FuelItem {
        FuelItem {
            id: "DSL".to_string(),
            name: "Diesel".to_string(),
            unit_cost: 1.35,
            currency: "CAD".to_string(),
            unit: "litre".to_string(),
            scenarios,
        }
    }

    #[test]
    fn test_default_distribution() {
        let table = CurrencyTable::new().with_rate("CAD", 1.35);
        let rate = FuelRate::derive(&diesel(Vec::new()), &FxResolver::new(&table), "USD");

        assert_relative_eq!(rate.unit_cost, 1.0, epsilon = 1e-12);
        assert_eq!(rate.scenarios.len(), 3);
        let total_probability: f64 = rate.scenarios.iter().map(|s| s.probability).sum();
        assert_relative_eq!(total_probability, 1.0);
        // 0.25*0.85 + 0.5*1.0 + 0.25*1.25
        assert_relative_eq!(rate.expected_unit_cost(), 1.025, epsilon = 1e-12);
        assert_relative_eq!(rate.scenario_unit_cost("HIGH").unwrap(), 1.25, epsilon = 1e-12);
        assert!(rate.scenario_unit_cost("shock").is_none());
    }

    #[test]
    fn test_configured_scenarios_replace_default() {
        let table = CurrencyTable::new();
        let item = diesel(vec![FuelScenario {
            name: "spike".to_string(),
            multiplier: 2.0,
            probability: 1.0,
        }]);
        let rate = FuelRate::derive(&item, &FxResolver::new(&table), "CAD");
        assert_eq!(rate.scenarios.len(), 1);
        assert_relative_eq!(rate.expected_unit_cost(), 2.7);
    }
}
