//! Sensitivity analysis: rerun the full projection with one input scaled
//!
//! Each variation clones the base configuration and builds its own engine,
//! so variations run in parallel with no shared state.

use crate::block::{Block, ScheduleEntry};
use crate::config::EngineConfig;
use crate::engine::CostEngine;
use crate::error::EngineResult;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Inputs that can be varied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityVariable {
    DiscountRate,
    EquipmentCost,
    LaborCost,
}

impl SensitivityVariable {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "discount_rate" => Some(Self::DiscountRate),
            "equipment_cost" => Some(Self::EquipmentCost),
            "labor_cost" => Some(Self::LaborCost),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DiscountRate => "discount_rate",
            Self::EquipmentCost => "equipment_cost",
            Self::LaborCost => "labor_cost",
        }
    }

    /// Scale this variable in place by `factor`
    pub fn scale(&self, config: &mut EngineConfig, factor: f64) {
        match self {
            Self::DiscountRate => config.project.discount_rate *= factor,
            Self::EquipmentCost => config
                .equipment
                .iter_mut()
                .for_each(|item| item.base_cost *= factor),
            Self::LaborCost => config
                .labor
                .iter_mut()
                .for_each(|role| role.annual_salary *= factor),
        }
    }
}

/// Projection result under one variation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Percent change applied (10.0 = +10%)
    pub variation: f64,
    pub npv: f64,
    pub irr: Option<f64>,
}

/// Clone `config` with `variable` scaled by `1 + variation / 100`
///
/// An unrecognized variable name returns the configuration unchanged.
pub fn apply_variation(config: &EngineConfig, variable: &str, variation: f64) -> EngineConfig {
    let mut varied = config.clone();
    match SensitivityVariable::from_name(variable) {
        Some(var) => var.scale(&mut varied, 1.0 + variation / 100.0),
        None => warn!(
            "Unknown sensitivity variable '{}', configuration left unchanged",
            variable
        ),
    }
    varied
}

/// Run one projection per variation, in parallel, preserving input order
pub fn run(
    base: &EngineConfig,
    blocks: &[Block],
    schedule: &[ScheduleEntry],
    variable: &str,
    variations: &[f64],
) -> EngineResult<Vec<SensitivityPoint>> {
    info!(
        "Sensitivity on '{}' over {} variations",
        variable,
        variations.len()
    );

    variations
        .par_iter()
        .map(|&variation| -> EngineResult<SensitivityPoint> {
            let engine = CostEngine::new(apply_variation(base, variable, variation))?;
            let projection = engine.project(blocks, schedule)?;
            Ok(SensitivityPoint {
                variation,
                npv: projection.summary.npv,
                irr: projection.summary.irr,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Period;
    use approx::assert_relative_eq;

    fn blocks() -> Vec<Block> {
        vec![
            Block::new("B1", 420.0, 15_000.0, "Granite", 7.0, 60.0, 5.0),
            Block::new("B2", 300.0, 9_000.0, "Sandstone", 4.0, 35.0, 4.0),
        ]
    }

    fn schedule() -> Vec<ScheduleEntry> {
        vec![
            ScheduleEntry::new("B1", Period::new(2025, 3).unwrap(), 1),
            ScheduleEntry::new("B2", Period::new(2025, 9).unwrap(), 1),
        ]
    }

    #[test]
    fn test_equipment_cost_scales_catalog() {
        let base = EngineConfig::sample();
        let varied = apply_variation(&base, "equipment_cost", 10.0);

        for (b, v) in base.equipment.iter().zip(&varied.equipment) {
            assert_relative_eq!(v.base_cost, b.base_cost * 1.10, max_relative = 1e-12);
        }
        assert_relative_eq!(varied.labor[0].annual_salary, base.labor[0].annual_salary);
    }

    #[test]
    fn test_equipment_cost_increase_lowers_npv() {
        let base = EngineConfig::sample();
        let points = run(&base, &blocks(), &schedule(), "equipment_cost", &[0.0, 10.0]).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].variation, 0.0);
        assert!(points[1].npv < points[0].npv);
    }

    #[test]
    fn test_labor_and_discount_variations() {
        let base = EngineConfig::sample();

        let labor = apply_variation(&base, "labor_cost", -20.0);
        assert_relative_eq!(labor.labor[1].annual_salary, base.labor[1].annual_salary * 0.8, max_relative = 1e-12);

        let discount = apply_variation(&base, "DISCOUNT_RATE", 50.0);
        assert_relative_eq!(discount.project.discount_rate, 0.12, epsilon = 1e-12);

        // Higher discounting shrinks the (negative) NPV
        let points = run(&base, &blocks(), &schedule(), "discount_rate", &[0.0, 50.0]).unwrap();
        assert!(points[1].npv > points[0].npv);
    }

    #[test]
    fn test_unknown_variable_leaves_config_unchanged() {
        let base = EngineConfig::sample();
        let varied = apply_variation(&base, "ore_price", 25.0);
        assert_eq!(varied.project.discount_rate, base.project.discount_rate);
        assert_eq!(varied.equipment[0].base_cost, base.equipment[0].base_cost);

        let points = run(&base, &blocks(), &schedule(), "ore_price", &[0.0, 25.0]).unwrap();
        assert_eq!(points[0].npv, points[1].npv);
    }

    #[test]
    fn test_variable_names() {
        for var in [
            SensitivityVariable::DiscountRate,
            SensitivityVariable::EquipmentCost,
            SensitivityVariable::LaborCost,
        ] {
            assert_eq!(SensitivityVariable::from_name(var.name()), Some(var));
        }
        assert!(SensitivityVariable::from_name("fuel_cost").is_none());
    }
}
