//! Engine facade: one configuration snapshot, its rate tables, and the
//! operations that run against them

use crate::block::{Block, ScheduleEntry};
use crate::config::EngineConfig;
use crate::costing::{UnitCostCalculator, UnitCostResult};
use crate::error::EngineResult;
use crate::fx::FxResolver;
use crate::projection::{CashflowPeriod, ProjectAggregator, ProjectSummary};
use crate::rates::{RateTables, RatesCalculator};
use crate::sensitivity::{self, SensitivityPoint};
use log::warn;
use serde::{Deserialize, Serialize};

/// Output of a full project run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProjection {
    pub unit_costs: Vec<UnitCostResult>,
    pub periods: Vec<CashflowPeriod>,
    pub summary: ProjectSummary,
}

/// Owns a configuration snapshot and the rate tables derived from it
///
/// Rate tables are built once in [`CostEngine::new`]. A changed
/// configuration needs a new engine.
#[derive(Debug, Clone)]
pub struct CostEngine {
    config: EngineConfig,
    rates: RateTables,
}

impl CostEngine {
    /// An unconfigured project currency is accepted at a neutral rate of 1
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let currency = config.project.currency.as_str();
        if !FxResolver::new(&config.currencies).is_known(currency) {
            warn!(
                "Project currency '{}' has no exchange rate, amounts convert at 1.0",
                currency
            );
        }

        let rates = RatesCalculator::new(&config).calculate();
        Ok(Self { config, rates })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    /// Copy of `config` with `derived_rates` filled in; the input is untouched
    pub fn recalculate_rates(config: &EngineConfig) -> EngineConfig {
        let mut updated = config.clone();
        updated.derived_rates = Some(RatesCalculator::new(config).calculate());
        updated
    }

    pub fn calculate_unit_cost(&self, block: &Block) -> EngineResult<UnitCostResult> {
        self.calculator().calculate(block)
    }

    pub fn calculate_batch(&self, blocks: &[Block]) -> EngineResult<Vec<UnitCostResult>> {
        self.calculator().calculate_batch(blocks)
    }

    /// Cost every block, roll the schedule into periods and summarize
    pub fn project(
        &self,
        blocks: &[Block],
        schedule: &[ScheduleEntry],
    ) -> EngineResult<ProjectProjection> {
        let unit_costs = self.calculate_batch(blocks)?;
        let (periods, summary) =
            ProjectAggregator::new(&self.config.project).run(&unit_costs, schedule);

        Ok(ProjectProjection {
            unit_costs,
            periods,
            summary,
        })
    }

    /// Rerun the projection with one variable scaled by each variation (percent)
    pub fn sensitivity(
        &self,
        blocks: &[Block],
        schedule: &[ScheduleEntry],
        variable: &str,
        variations: &[f64],
    ) -> EngineResult<Vec<SensitivityPoint>> {
        sensitivity::run(&self.config, blocks, schedule, variable, variations)
    }

    fn calculator(&self) -> UnitCostCalculator<'_> {
        UnitCostCalculator::new(&self.config, &self.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Period;
    use crate::error::EngineError;
    use approx::assert_relative_eq;

    fn blocks() -> Vec<Block> {
        vec![
            Block::new("B1", 350.0, 12_000.0, "Granite", 6.5, 30.0, 4.5),
            Block::new("B2", 620.0, 60_000.0, "Basalt", 7.5, 45.0, 5.0),
        ]
    }

    fn schedule() -> Vec<ScheduleEntry> {
        vec![
            ScheduleEntry::new("B1", Period::new(2025, 1).unwrap(), 1),
            ScheduleEntry::new("B2", Period::new(2025, 2).unwrap(), 1),
        ]
    }

    #[test]
    fn test_unknown_project_currency_is_neutral() {
        let mut config = EngineConfig::sample();
        config.project.currency = "ZAR".to_string();
        let engine = CostEngine::new(config).unwrap();

        assert_eq!(engine.rates().currency, "ZAR");
        // USD -> ZAR resolves to 1.0, CAD -> ZAR to 1 / 1.35
        let drill = engine.rates().equipment_by_id("DRL-01").unwrap();
        assert_relative_eq!(drill.capital_cost, 1_000_000.0, epsilon = 1e-6);
        let lhd = engine.rates().equipment_by_id("LHD-01").unwrap();
        assert_relative_eq!(lhd.capital_cost, 1_200_000.0, epsilon = 1e-6);

        let projection = engine.project(&blocks(), &schedule()).unwrap();
        assert!(projection.summary.npv.is_finite());
        assert!(projection.summary.npv < 0.0);
    }

    #[test]
    fn test_recalculate_rates_is_pure() {
        let config = EngineConfig::sample();
        let updated = CostEngine::recalculate_rates(&config);

        assert!(config.derived_rates.is_none());
        let tables = updated.derived_rates.as_ref().unwrap();
        assert_eq!(tables.equipment.len(), config.equipment.len());
        assert_relative_eq!(tables.total_equipment_capital(), 2_200_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_project_composes_pipeline() {
        let engine = CostEngine::new(EngineConfig::sample()).unwrap();
        let projection = engine.project(&blocks(), &schedule()).unwrap();

        assert_eq!(projection.unit_costs.len(), 2);
        assert_eq!(projection.periods.len(), 36);
        assert_eq!(projection.summary.units_scheduled, 2);

        let direct: f64 = projection
            .unit_costs
            .iter()
            .map(|r| r.opex.total + r.capex.total)
            .sum();
        assert_relative_eq!(projection.summary.total_cost, direct, max_relative = 1e-12);
    }

    #[test]
    fn test_project_propagates_block_rejection() {
        let engine = CostEngine::new(EngineConfig::sample()).unwrap();
        let mut bad = blocks();
        bad[1].tonnage = 0.0;
        assert!(matches!(
            engine.project(&bad, &schedule()),
            Err(EngineError::InvalidBlock { .. })
        ));
    }

    #[test]
    fn test_fixture_projection() {
        let data = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        let config = EngineConfig::from_json_path(data.join("config.json")).unwrap();
        let blocks = crate::block::load_blocks(data.join("blocks.csv")).unwrap();
        let schedule = crate::block::load_schedule(data.join("schedule.csv")).unwrap();

        let engine = CostEngine::new(config).unwrap();
        let projection = engine.project(&blocks, &schedule).unwrap();

        assert_eq!(projection.summary.units_scheduled, schedule.len());
        assert!(projection
            .unit_costs
            .iter()
            .all(|r| r.grand_total.is_finite() && r.grand_total > 0.0));

        // Schist is not in the catalog and falls back to Basalt
        let schist = projection.unit_costs.iter().find(|r| r.block_id == "ND-301").unwrap();
        assert_eq!(schist.resolved_rock_type, "Basalt");
    }

    #[test]
    fn test_single_and_batch_agree() {
        let engine = CostEngine::new(EngineConfig::sample()).unwrap();
        let blocks = blocks();
        let single = engine.calculate_unit_cost(&blocks[0]).unwrap();
        let batch = engine.calculate_batch(&blocks).unwrap();
        assert_eq!(batch[0].grand_total, single.grand_total);
    }
}
