//! Catalog records owned by configuration: equipment, labor, consumables, fuel,
//! penetration rates and availability factors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) fn default_currency() -> String {
    "USD".to_string()
}

fn default_one() -> f64 {
    1.0
}

fn default_fuel_unit() -> String {
    "litre".to_string()
}

/// A piece of capital equipment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub category: String,

    /// Purchase cost in `currency`
    pub base_cost: f64,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Residual value at end of life as a fraction of cost (0.10 = 10%)
    #[serde(default)]
    pub salvage_rate: f64,

    pub useful_life_years: f64,

    /// Nameplate power draw
    #[serde(default)]
    pub power_kw: f64,
}

/// A labor role in the workforce catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborRole {
    /// Role code; codes starting with `DIR` are direct labor
    pub code: String,
    pub title: String,

    /// Base annual compensation in `currency`
    pub annual_salary: f64,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Benefits + overhead multiplier on base compensation (1.45 = 45% burden)
    #[serde(default = "default_one")]
    pub burden_multiplier: f64,

    /// Fraction of paid hours that are productive
    #[serde(default = "default_one")]
    pub utilization: f64,
}

/// Unit a consumable's life is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumableUnit {
    Meter,
    Tonne,
    Cycle,
}

/// One point on a depth-indexed wear curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WearPoint {
    pub depth_m: f64,
    pub multiplier: f64,
}

/// A consumable (bits, steel, explosives, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableItem {
    pub id: String,
    pub name: String,

    /// Purchase cost of one item in `currency`
    pub unit_cost: f64,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// How many `life_unit`s one item lasts
    #[serde(default = "default_one")]
    pub life_quantity: f64,

    pub life_unit: ConsumableUnit,

    #[serde(default)]
    pub wear_curve: Option<Vec<WearPoint>>,

    /// Consumption multiplier keyed by rock type
    #[serde(default)]
    pub rock_multipliers: BTreeMap<String, f64>,
}

/// A named price scenario for fuel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelScenario {
    pub name: String,
    pub multiplier: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelItem {
    pub id: String,
    pub name: String,
    pub unit_cost: f64,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_fuel_unit")]
    pub unit: String,

    /// Empty means use the default low/base/high distribution
    #[serde(default)]
    pub scenarios: Vec<FuelScenario>,
}

/// Advance rate for a rock type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenetrationRate {
    pub rock_type: String,
    pub meters_per_hour: f64,
}

/// Availability factors; their product is the OEE
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Availability {
    pub planned: f64,
    pub mechanical: f64,
    pub operational: f64,
}

impl Availability {
    /// Overall equipment effectiveness
    pub fn oee(&self) -> f64 {
        self.planned * self.mechanical * self.operational
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            planned: 0.90,
            mechanical: 0.85,
            operational: 0.90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oee_is_product() {
        let a = Availability {
            planned: 0.9,
            mechanical: 0.8,
            operational: 0.5,
        };
        assert!((a.oee() - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_equipment_defaults_from_json() {
        let item: EquipmentItem = serde_json::from_str(
            r#"{"id": "LHD-01", "name": "Loader", "base_cost": 500000, "useful_life_years": 8}"#,
        )
        .unwrap();
        assert_eq!(item.currency, "USD");
        assert_eq!(item.salvage_rate, 0.0);
        assert_eq!(item.power_kw, 0.0);
    }

    #[test]
    fn test_consumable_unit_snake_case() {
        let unit: ConsumableUnit = serde_json::from_str("\"cycle\"").unwrap();
        assert_eq!(unit, ConsumableUnit::Cycle);
    }
}
