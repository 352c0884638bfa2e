//! Equipment ownership rates: straight-line depreciation plus maintenance and insurance

use super::{
    ANNUAL_INSURANCE_RATE, ANNUAL_MAINTENANCE_RATE, OPERATING_DAYS_PER_MONTH,
    OPERATING_DAYS_PER_YEAR, OPERATING_HOURS_PER_DAY,
};
use crate::config::EquipmentItem;
use crate::fx::FxResolver;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentRate {
    pub equipment_id: String,
    pub name: String,

    /// Purchase cost in project currency
    pub capital_cost: f64,

    pub annual_depreciation: f64,
    pub annual_maintenance: f64,
    pub annual_insurance: f64,

    pub cost_per_year: f64,
    pub cost_per_month: f64,
    pub cost_per_day: f64,
    pub cost_per_hour: f64,

    /// Maintenance component alone, per operating hour
    pub maintenance_per_hour: f64,

    pub power_kw: f64,
}

impl EquipmentRate {
    pub fn derive(item: &EquipmentItem, fx: &FxResolver<'_>, project_currency: &str) -> Self {
        let capital_cost = fx.convert(item.base_cost, &item.currency, project_currency);

        let depreciable_value = capital_cost * (1.0 - item.salvage_rate);
        let annual_depreciation = if item.useful_life_years > 0.0 {
            depreciable_value / item.useful_life_years
        } else {
            0.0
        };
        let annual_maintenance = capital_cost * ANNUAL_MAINTENANCE_RATE;
        let annual_insurance = capital_cost * ANNUAL_INSURANCE_RATE;
        let total_annual_cost = annual_depreciation + annual_maintenance + annual_insurance;

        let hours_per_year = OPERATING_DAYS_PER_YEAR * OPERATING_HOURS_PER_DAY;
        let cost_per_day = total_annual_cost / OPERATING_DAYS_PER_YEAR;

        Self {
            equipment_id: item.id.clone(),
            name: item.name.clone(),
            capital_cost,
            annual_depreciation,
            annual_maintenance,
            annual_insurance,
            cost_per_year: total_annual_cost,
            cost_per_month: cost_per_day * OPERATING_DAYS_PER_MONTH,
            cost_per_day,
            cost_per_hour: cost_per_day / OPERATING_HOURS_PER_DAY,
            maintenance_per_hour: annual_maintenance / hours_per_year,
            power_kw: item.power_kw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurrencyTable;
    use approx::assert_relative_eq;

    fn item(base_cost: f64, currency: &str) -> EquipmentItem {
        EquipmentItem {
            id: "DRL-01".to_string(),
            name: "Jumbo".to_string(),
            category: "drilling".to_string(),
            base_cost,
            currency: currency.to_string(),
            salvage_rate: 0.10,
            useful_life_years: 10.0,
            power_kw: 110.0,
        }
    }

    #[test]
    fn test_reference_equipment_rate() {
        let table = CurrencyTable::new();
        let fx = FxResolver::new(&table);
        let rate = EquipmentRate::derive(&item(1_000_000.0, "USD"), &fx, "USD");

        assert_relative_eq!(rate.annual_depreciation, 90_000.0, epsilon = 1e-6);
        assert_relative_eq!(rate.annual_maintenance, 50_000.0, epsilon = 1e-6);
        assert_relative_eq!(rate.annual_insurance, 20_000.0, epsilon = 1e-6);
        assert_relative_eq!(rate.cost_per_year, 160_000.0, epsilon = 1e-6);
        assert!((rate.cost_per_hour - 26.67).abs() < 0.01);
    }

    #[test]
    fn test_period_identities() {
        let table = CurrencyTable::new().with_rate("CAD", 1.35);
        let fx = FxResolver::new(&table);
        for (cost, currency) in [(1_000_000.0, "USD"), (2_700_000.0, "CAD"), (12_345.0, "USD")] {
            let r = EquipmentRate::derive(&item(cost, currency), &fx, "USD");
            assert_relative_eq!(r.cost_per_year, r.cost_per_month * 12.0, max_relative = 1e-12);
            assert_relative_eq!(r.cost_per_year, r.cost_per_day * 300.0, max_relative = 1e-12);
            assert_relative_eq!(r.cost_per_year, r.cost_per_hour * 300.0 * 20.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_converts_to_project_currency() {
        let table = CurrencyTable::new().with_rate("CAD", 1.35);
        let fx = FxResolver::new(&table);
        let rate = EquipmentRate::derive(&item(1_350_000.0, "CAD"), &fx, "USD");
        assert_relative_eq!(rate.capital_cost, 1_000_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_life_does_not_depreciate() {
        let table = CurrencyTable::new();
        let fx = FxResolver::new(&table);
        let mut it = item(100_000.0, "USD");
        it.useful_life_years = 0.0;
        let rate = EquipmentRate::derive(&it, &fx, "USD");
        assert_eq!(rate.annual_depreciation, 0.0);
        assert!(rate.cost_per_hour.is_finite());
    }
}
