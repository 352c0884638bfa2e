//! Derived per-unit rates for every catalog item
//!
//! [`RatesCalculator::calculate`] produces an immutable [`RateTables`] value
//! that consumers borrow. Tables are never updated in place.

mod consumables;
mod equipment;
mod fuel;
mod labor;

pub use consumables::{default_wear_curve, ConsumableRate};
pub use equipment::EquipmentRate;
pub use fuel::{default_fuel_scenarios, FuelRate};
pub use labor::LaborRate;

use crate::config::EngineConfig;
use crate::fx::FxResolver;
use log::debug;
use serde::{Deserialize, Serialize};

// Operating assumptions shared by every equipment item
pub const OPERATING_HOURS_PER_DAY: f64 = 20.0;
pub const OPERATING_DAYS_PER_YEAR: f64 = 300.0;
pub const OPERATING_DAYS_PER_MONTH: f64 = 25.0;

/// Paid hours per labor year
pub const STANDARD_LABOR_HOURS_PER_YEAR: f64 = 2080.0;

/// Annual maintenance as a fraction of equipment cost
pub const ANNUAL_MAINTENANCE_RATE: f64 = 0.05;
/// Annual insurance as a fraction of equipment cost
pub const ANNUAL_INSURANCE_RATE: f64 = 0.02;

/// All derived rates for one configuration snapshot, in project currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTables {
    pub currency: String,
    pub equipment: Vec<EquipmentRate>,
    pub labor: Vec<LaborRate>,
    pub consumables: Vec<ConsumableRate>,
    pub fuels: Vec<FuelRate>,
}

impl RateTables {
    /// Sum of converted equipment purchase costs
    pub fn total_equipment_capital(&self) -> f64 {
        self.equipment.iter().map(|e| e.capital_cost).sum()
    }

    /// Sum of equipment nameplate power
    pub fn total_power_kw(&self) -> f64 {
        self.equipment.iter().map(|e| e.power_kw).sum()
    }

    pub fn equipment_by_id(&self, id: &str) -> Option<&EquipmentRate> {
        self.equipment.iter().find(|e| e.equipment_id == id)
    }

    pub fn labor_by_code(&self, code: &str) -> Option<&LaborRate> {
        self.labor.iter().find(|l| l.code == code)
    }

    pub fn consumable_by_id(&self, id: &str) -> Option<&ConsumableRate> {
        self.consumables.iter().find(|c| c.consumable_id == id)
    }

    pub fn fuel_by_id(&self, id: &str) -> Option<&FuelRate> {
        self.fuels.iter().find(|f| f.fuel_id == id)
    }
}

/// Derives rate tables from a configuration snapshot
pub struct RatesCalculator<'a> {
    config: &'a EngineConfig,
    fx: FxResolver<'a>,
}

impl<'a> RatesCalculator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            fx: FxResolver::new(&config.currencies),
        }
    }

    pub fn calculate(&self) -> RateTables {
        let currency = self.config.project.currency.as_str();

        let tables = RateTables {
            currency: currency.to_string(),
            equipment: self
                .config
                .equipment
                .iter()
                .map(|item| EquipmentRate::derive(item, &self.fx, currency))
                .collect(),
            labor: self
                .config
                .labor
                .iter()
                .map(|role| LaborRate::derive(role, &self.fx, currency))
                .collect(),
            consumables: self
                .config
                .consumables
                .iter()
                .map(|item| ConsumableRate::derive(item, &self.fx, currency))
                .collect(),
            fuels: self
                .config
                .fuels
                .iter()
                .map(|item| FuelRate::derive(item, &self.fx, currency))
                .collect(),
        };

        debug!(
            "Derived rates in {}: {} equipment, {} labor, {} consumables, {} fuels",
            currency,
            tables.equipment.len(),
            tables.labor.len(),
            tables.consumables.len(),
            tables.fuels.len()
        );

        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_tables() {
        let config = EngineConfig::sample();
        let tables = RatesCalculator::new(&config).calculate();

        assert_eq!(tables.currency, "USD");
        assert_eq!(tables.equipment.len(), config.equipment.len());
        assert_eq!(tables.labor.len(), config.labor.len());
        assert_eq!(tables.consumables.len(), 1);
        assert_eq!(tables.fuels.len(), 1);

        // LHD is priced in CAD at 1.35 per USD
        let lhd = tables.equipment_by_id("LHD-01").unwrap();
        assert_relative_eq!(lhd.capital_cost, 1_200_000.0, epsilon = 1e-6);
        assert_relative_eq!(tables.total_equipment_capital(), 2_200_000.0, epsilon = 1e-6);
        assert_relative_eq!(tables.total_power_kw(), 360.0);

        assert!(tables.labor_by_code("DIR-OPR").unwrap().is_direct);
        assert!(!tables.labor_by_code("IND-SUP").unwrap().is_direct);
        assert!(tables.consumable_by_id("BIT-45").is_some());
        assert!(tables.fuel_by_id("DSL").is_some());
    }

    #[test]
    fn test_tables_follow_project_currency() {
        let mut config = EngineConfig::sample();
        config.project.currency = "CAD".to_string();
        let tables = RatesCalculator::new(&config).calculate();

        let drill = tables.equipment_by_id("DRL-01").unwrap();
        assert_relative_eq!(drill.capital_cost, 1_350_000.0, epsilon = 1e-6);
    }
}
