//! Configuration snapshot consumed by the engine
//!
//! A snapshot is supplied once at engine construction. Any change means
//! building a new engine.

pub mod catalog;

pub use catalog::{
    Availability, ConsumableItem, ConsumableUnit, EquipmentItem, FuelItem, FuelScenario,
    LaborRole, PenetrationRate, WearPoint,
};

use crate::error::EngineResult;
use crate::policies::{
    AllocationMethod, AllocationRule, CompareOp, Condition, MarginRule, PolicySet, RiskAttribute,
    RiskPremiumRule, VolumeDiscountRule,
};
use crate::rates::RateTables;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default path to the configuration snapshot
pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";

/// Base currency of the rate table
pub const BASE_CURRENCY: &str = "USD";

/// Units of each currency per 1 USD
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    rates: BTreeMap<String, f64>,
}

impl CurrencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_rate(mut self, code: &str, per_usd: f64) -> Self {
        self.rates.insert(code.to_ascii_uppercase(), per_usd);
        self
    }

    /// Units of `code` per 1 USD; USD is always 1
    pub fn per_usd(&self, code: &str) -> Option<f64> {
        if code.eq_ignore_ascii_case(BASE_CURRENCY) {
            return Some(1.0);
        }
        self.rates
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(code))
            .map(|(_, v)| *v)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}

fn default_valuation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Project-level parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectParameters {
    pub name: String,

    /// Currency every cost is reported in
    #[serde(default = "catalog::default_currency")]
    pub currency: String,

    pub start_year: i32,

    pub life_of_mine_years: u32,

    /// Annual discount rate for NPV (0.08 = 8%)
    pub discount_rate: f64,

    /// Contingency on the cost subtotal (0.10 = 10%)
    #[serde(default)]
    pub contingency_rate: f64,

    /// Date margin rules are evaluated at
    #[serde(default = "default_valuation_date")]
    pub valuation_date: NaiveDate,
}

/// Tunable constants of the unit cost formula
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Consumables cost per tonne before depth and hardness factors
    pub consumable_base_rate_per_tonne: f64,
    /// Electricity price per kWh
    pub electricity_rate_per_kwh: f64,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            consumable_base_rate_per_tonne: 2.50,
            electricity_rate_per_kwh: 0.12,
        }
    }
}

/// Complete configuration snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub project: ProjectParameters,

    #[serde(default)]
    pub currencies: CurrencyTable,

    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,

    #[serde(default)]
    pub labor: Vec<LaborRole>,

    #[serde(default)]
    pub consumables: Vec<ConsumableItem>,

    #[serde(default)]
    pub fuels: Vec<FuelItem>,

    /// Order matters: the second entry is the fallback for unknown rock types
    #[serde(default)]
    pub penetration_rates: Vec<PenetrationRate>,

    #[serde(default)]
    pub availability: Availability,

    #[serde(default)]
    pub policies: PolicySet,

    #[serde(default)]
    pub calculator: CalculatorSettings,

    /// Populated by `CostEngine::recalculate_rates`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_rates: Option<RateTables>,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load from the default location (data/config.json)
    pub fn load_default() -> EngineResult<Self> {
        Self::from_json_path(DEFAULT_CONFIG_PATH)
    }

    /// In-memory demo configuration for a small underground operation
    pub fn sample() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        Self {
            project: ProjectParameters {
                name: "Sample Underground Project".to_string(),
                currency: "USD".to_string(),
                start_year: 2025,
                life_of_mine_years: 2,
                discount_rate: 0.08,
                contingency_rate: 0.10,
                valuation_date: date(2025, 1, 1),
            },
            currencies: CurrencyTable::new()
                .with_rate("CAD", 1.35)
                .with_rate("AUD", 1.50)
                .with_rate("EUR", 0.92),
            equipment: vec![
                EquipmentItem {
                    id: "DRL-01".to_string(),
                    name: "Twin-boom development jumbo".to_string(),
                    category: "drilling".to_string(),
                    base_cost: 1_000_000.0,
                    currency: "USD".to_string(),
                    salvage_rate: 0.10,
                    useful_life_years: 10.0,
                    power_kw: 110.0,
                },
                EquipmentItem {
                    id: "LHD-01".to_string(),
                    name: "14t loader".to_string(),
                    category: "loading".to_string(),
                    base_cost: 1_620_000.0,
                    currency: "CAD".to_string(),
                    salvage_rate: 0.15,
                    useful_life_years: 8.0,
                    power_kw: 250.0,
                },
            ],
            labor: vec![
                LaborRole {
                    code: "DIR-OPR".to_string(),
                    title: "Jumbo operator".to_string(),
                    annual_salary: 95_000.0,
                    currency: "USD".to_string(),
                    burden_multiplier: 1.45,
                    utilization: 0.85,
                },
                LaborRole {
                    code: "IND-SUP".to_string(),
                    title: "Shift supervisor".to_string(),
                    annual_salary: 120_000.0,
                    currency: "USD".to_string(),
                    burden_multiplier: 1.40,
                    utilization: 0.90,
                },
            ],
            consumables: vec![ConsumableItem {
                id: "BIT-45".to_string(),
                name: "45mm button bit".to_string(),
                unit_cost: 180.0,
                currency: "USD".to_string(),
                life_quantity: 300.0,
                life_unit: ConsumableUnit::Meter,
                wear_curve: None,
                rock_multipliers: BTreeMap::from([
                    ("granite".to_string(), 1.4),
                    ("basalt".to_string(), 1.2),
                ]),
            }],
            fuels: vec![FuelItem {
                id: "DSL".to_string(),
                name: "Diesel".to_string(),
                unit_cost: 1.10,
                currency: "USD".to_string(),
                unit: "litre".to_string(),
                scenarios: Vec::new(),
            }],
            penetration_rates: vec![
                PenetrationRate { rock_type: "Granite".to_string(), meters_per_hour: 1.2 },
                PenetrationRate { rock_type: "Basalt".to_string(), meters_per_hour: 1.8 },
                PenetrationRate { rock_type: "Sandstone".to_string(), meters_per_hour: 2.6 },
            ],
            availability: Availability::default(),
            policies: PolicySet {
                margins: vec![MarginRule {
                    category: "ore".to_string(),
                    margin_rate: 0.12,
                    valid_from: date(2024, 1, 1),
                    valid_to: date(2030, 1, 1),
                }],
                risk_premiums: vec![
                    RiskPremiumRule {
                        name: "Deep mining".to_string(),
                        attribute: RiskAttribute::Depth,
                        condition: Condition::new(CompareOp::Gt, 500.0),
                        premium_rate: 0.05,
                    },
                    RiskPremiumRule {
                        name: "Hard rock".to_string(),
                        attribute: RiskAttribute::RockHardness,
                        condition: Condition::new(CompareOp::Ge, 7.0),
                        premium_rate: 0.03,
                    },
                ],
                volume_discounts: vec![VolumeDiscountRule {
                    category: "ore".to_string(),
                    min_tonnage: 50_000.0,
                    max_tonnage: None,
                    discount_rate: 0.02,
                }],
                allocations: vec![AllocationRule {
                    cost_type: "capex".to_string(),
                    method: AllocationMethod::PerTonne,
                }],
            },
            calculator: CalculatorSettings::default(),
            derived_rates: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_currency_lookup_case_insensitive() {
        let table = CurrencyTable::new().with_rate("cad", 1.35);
        assert_eq!(table.per_usd("CAD"), Some(1.35));
        assert_eq!(table.per_usd("Cad"), Some(1.35));
        assert_eq!(table.per_usd("usd"), Some(1.0));
        assert_eq!(table.per_usd("JPY"), None);
    }

    #[test]
    fn test_sample_round_trips_through_json() {
        let sample = EngineConfig::sample();
        let json = serde_json::to_string(&sample).unwrap();
        assert!(!json.contains("derived_rates"));

        let parsed = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.equipment.len(), sample.equipment.len());
        assert_eq!(parsed.policies.risk_premiums[0].condition, Condition::new(CompareOp::Gt, 500.0));
        assert_eq!(parsed.currencies.per_usd("EUR"), Some(0.92));
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{"project": {"name": "Tiny", "start_year": 2026,
                       "life_of_mine_years": 1, "discount_rate": 0.1}}"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.project.currency, "USD");
        assert_eq!(config.project.contingency_rate, 0.0);
        assert_eq!(config.calculator.consumable_base_rate_per_tonne, 2.50);
        assert!(config.equipment.is_empty());
        assert!(config.derived_rates.is_none());
    }

    #[test]
    fn test_load_fixture_config() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = EngineConfig::from_json_path(path).expect("Failed to load config");
        assert!(!config.equipment.is_empty());
        assert!(config.penetration_rates.len() >= 2);
    }

    #[test]
    fn test_load_default_reads_data_dir() {
        // cargo runs unit tests from the package root
        let config = EngineConfig::load_default().expect("Failed to load default config");
        assert_eq!(config.project.currency, "USD");
        assert_eq!(config.penetration_rates[1].rock_type, "Basalt");
    }
}
