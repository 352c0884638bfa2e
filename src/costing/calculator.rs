//! Marginal cost of a single block
//!
//! Combines derived rates and policy decisions with the block's physical
//! characteristics. The assembly order below fixes the totals:
//!
//! ```text
//! subtotal    = opex + capex
//! risk        = subtotal * sum(risk premiums)
//! margin      = subtotal * margin
//! discount    = -subtotal * sum(volume discounts)
//! contingency = subtotal * contingency rate
//! grand total = subtotal + risk + margin + discount + contingency
//! ```

use super::result::{
    CapexAllocation, CostShare, OpexBreakdown, PolicyAdjustments, UnitCostResult,
};
use crate::block::Block;
use crate::config::{EngineConfig, PenetrationRate};
use crate::error::{EngineError, EngineResult};
use crate::policies::{AllocationMethod, PoliciesEngine};
use crate::rates::RateTables;
use log::debug;

/// Weight of roles whose code does not mark them direct
pub const INDIRECT_LABOR_WEIGHT: f64 = 0.3;
/// Overhead as a fraction of labor + equipment
pub const OVERHEAD_RATE: f64 = 0.15;
/// Flat infrastructure allocation per tonne
pub const INFRASTRUCTURE_COST_PER_TONNE: f64 = 1.0;
/// Placeholder: total production is estimated as the block's driver quantity times this
pub const PRODUCTION_PROXY_MULTIPLIER: f64 = 1000.0;

/// Cost type looked up in the allocation rules for CAPEX
const CAPEX_COST_TYPE: &str = "capex";

/// Consumables step factor by depth
pub fn depth_factor(depth_m: f64) -> f64 {
    if depth_m > 1000.0 {
        1.5
    } else if depth_m > 500.0 {
        1.25
    } else {
        1.0
    }
}

/// Consumables step factor by rock hardness
pub fn hardness_factor(hardness: f64) -> f64 {
    if hardness > 8.0 {
        1.6
    } else if hardness > 6.0 {
        1.3
    } else {
        1.0
    }
}

/// Computes [`UnitCostResult`]s against one snapshot and its rate tables
pub struct UnitCostCalculator<'a> {
    config: &'a EngineConfig,
    rates: &'a RateTables,
    policies: PoliciesEngine<'a>,
}

impl<'a> UnitCostCalculator<'a> {
    pub fn new(config: &'a EngineConfig, rates: &'a RateTables) -> Self {
        Self {
            config,
            rates,
            policies: PoliciesEngine::new(&config.policies),
        }
    }

    /// Cost one block, rejecting inputs that would produce non-finite values
    pub fn calculate(&self, block: &Block) -> EngineResult<UnitCostResult> {
        self.validate(block)?;

        let penetration = self.resolve_penetration(block)?;
        let mining_hours = self.mining_hours(block, penetration.meters_per_hour);

        let mut opex = OpexBreakdown {
            labor: self.labor_cost(mining_hours),
            equipment: self.equipment_cost(mining_hours),
            consumables: self.consumables_cost(block),
            energy: self.energy_cost(mining_hours),
            maintenance: self.maintenance_cost(mining_hours),
            overhead: 0.0,
            total: 0.0,
        };
        opex.overhead = OVERHEAD_RATE * (opex.labor + opex.equipment);
        opex.compute_total();

        let capex = self.capex_allocation(block, mining_hours);

        let subtotal = opex.total + capex.total;

        // Each adjustment is taken against the same subtotal; nothing compounds
        let premiums = self.policies.risk_premium_for(block);
        let margin_rate = self
            .policies
            .margin_for(&block.category, self.config.project.valuation_date);
        let discount_rate = self
            .policies
            .volume_discount_for(&block.category, block.tonnage);

        let adjustments = PolicyAdjustments {
            risk_premium_rate: premiums.total_rate,
            risk_adjustment: subtotal * premiums.total_rate,
            applied_premiums: premiums.applied,
            margin_rate,
            margin_adjustment: subtotal * margin_rate,
            discount_rate,
            discount_adjustment: -subtotal * discount_rate,
        };
        let contingency = subtotal * self.config.project.contingency_rate;

        let grand_total = subtotal
            + adjustments.risk_adjustment
            + adjustments.margin_adjustment
            + adjustments.discount_adjustment
            + contingency;

        let cost_per_tonne = grand_total / block.tonnage;
        let cost_per_meter = grand_total / block.meter_divisor();

        for (field, value) in [
            ("grand_total", grand_total),
            ("cost_per_tonne", cost_per_tonne),
            ("cost_per_meter", cost_per_meter),
        ] {
            if !value.is_finite() {
                return Err(EngineError::NonFiniteResult {
                    block_id: block.id.clone(),
                    field: field.to_string(),
                });
            }
        }

        let breakdown = breakdown_shares(&opex, &capex, grand_total);

        Ok(UnitCostResult {
            block_id: block.id.clone(),
            currency: self.rates.currency.clone(),
            resolved_rock_type: penetration.rock_type.clone(),
            penetration_rate: penetration.meters_per_hour,
            mining_hours,
            opex,
            capex,
            adjustments,
            subtotal,
            contingency,
            grand_total,
            cost_per_tonne,
            cost_per_meter,
            breakdown,
        })
    }

    /// Cost several blocks, stopping at the first rejection
    pub fn calculate_batch(&self, blocks: &[Block]) -> EngineResult<Vec<UnitCostResult>> {
        blocks.iter().map(|b| self.calculate(b)).collect()
    }

    fn validate(&self, block: &Block) -> EngineResult<()> {
        if !(block.tonnage.is_finite() && block.tonnage > 0.0) {
            return Err(EngineError::invalid_block(
                &block.id,
                format!("tonnage must be positive, got {}", block.tonnage),
            ));
        }
        if block.strike_length_m == 0.0 && block.width_m == 0.0 {
            return Err(EngineError::invalid_block(
                &block.id,
                "strike length and width are both zero",
            ));
        }
        if !(block.strike_length_m.is_finite() && block.width_m.is_finite()) {
            return Err(EngineError::invalid_block(&block.id, "geometry must be finite"));
        }
        let oee = self.config.availability.oee();
        if !(oee > 0.0) {
            return Err(EngineError::invalid_block(
                &block.id,
                format!("availability product must be positive, got {}", oee),
            ));
        }
        Ok(())
    }

    /// Case-insensitive rock type match; unknown types use the second catalog entry
    fn resolve_penetration(&self, block: &Block) -> EngineResult<&'a PenetrationRate> {
        let config: &'a EngineConfig = self.config;
        let catalog = &config.penetration_rates;

        let entry = match catalog
            .iter()
            .find(|p| p.rock_type.eq_ignore_ascii_case(block.rock_type.trim()))
        {
            Some(entry) => entry,
            None => {
                let fallback = catalog.get(1).ok_or_else(|| EngineError::UnresolvedRockType {
                    block_id: block.id.clone(),
                    rock_type: block.rock_type.clone(),
                })?;
                debug!(
                    "Block {}: rock type '{}' not in catalog, using '{}'",
                    block.id, block.rock_type, fallback.rock_type
                );
                fallback
            }
        };

        if !(entry.meters_per_hour > 0.0) {
            return Err(EngineError::invalid_block(
                &block.id,
                format!(
                    "penetration rate for '{}' must be positive, got {}",
                    entry.rock_type, entry.meters_per_hour
                ),
            ));
        }
        Ok(entry)
    }

    /// Face area over penetration rate, inflated by OEE
    fn mining_hours(&self, block: &Block, penetration_rate: f64) -> f64 {
        block.face_area() / penetration_rate / self.config.availability.oee()
    }

    fn labor_cost(&self, mining_hours: f64) -> f64 {
        self.rates
            .labor
            .iter()
            .map(|l| {
                let weight = if l.is_direct { 1.0 } else { INDIRECT_LABOR_WEIGHT };
                l.effective_hourly_rate * mining_hours * weight
            })
            .sum()
    }

    fn equipment_cost(&self, mining_hours: f64) -> f64 {
        self.rates
            .equipment
            .iter()
            .map(|e| e.cost_per_hour * mining_hours)
            .sum()
    }

    fn consumables_cost(&self, block: &Block) -> f64 {
        self.config.calculator.consumable_base_rate_per_tonne
            * block.tonnage
            * depth_factor(block.depth_m)
            * hardness_factor(block.hardness)
    }

    fn energy_cost(&self, mining_hours: f64) -> f64 {
        self.rates.total_power_kw() * mining_hours * self.config.calculator.electricity_rate_per_kwh
    }

    fn maintenance_cost(&self, mining_hours: f64) -> f64 {
        self.rates
            .equipment
            .iter()
            .map(|e| e.maintenance_per_hour * mining_hours)
            .sum()
    }

    fn capex_allocation(&self, block: &Block, mining_hours: f64) -> CapexAllocation {
        let method = self.policies.allocation_method_for(CAPEX_COST_TYPE);
        let driver = match method {
            AllocationMethod::PerTonne => block.tonnage,
            AllocationMethod::PerMeter => block.strike_length_m,
            AllocationMethod::PerHour => mining_hours,
        };

        let equipment_depreciation = if driver > 0.0 {
            let estimated_total = driver * PRODUCTION_PROXY_MULTIPLIER;
            self.rates.total_equipment_capital() / estimated_total * driver
        } else {
            0.0
        };
        let infrastructure = INFRASTRUCTURE_COST_PER_TONNE * block.tonnage;

        CapexAllocation {
            method,
            equipment_depreciation,
            infrastructure,
            total: equipment_depreciation + infrastructure,
        }
    }
}

fn breakdown_shares(opex: &OpexBreakdown, capex: &CapexAllocation, grand_total: f64) -> Vec<CostShare> {
    [
        ("labor", opex.labor),
        ("equipment", opex.equipment),
        ("consumables", opex.consumables),
        ("energy", opex.energy),
        ("maintenance", opex.maintenance),
        ("overhead", opex.overhead),
        ("capex", capex.total),
    ]
    .into_iter()
    .map(|(category, amount)| CostShare {
        category: category.to_string(),
        amount,
        percent_of_total: if grand_total != 0.0 {
            amount / grand_total * 100.0
        } else {
            0.0
        },
    })
    .collect()
}
