//! Unit cost output records

use crate::policies::AllocationMethod;
use serde::{Deserialize, Serialize};

/// Operating cost components for one block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpexBreakdown {
    pub labor: f64,
    pub equipment: f64,
    pub consumables: f64,
    pub energy: f64,
    pub maintenance: f64,
    pub overhead: f64,
    pub total: f64,
}

impl OpexBreakdown {
    pub fn compute_total(&mut self) {
        self.total = self.labor
            + self.equipment
            + self.consumables
            + self.energy
            + self.maintenance
            + self.overhead;
    }
}

/// Capital cost allocated to one block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapexAllocation {
    pub method: AllocationMethod,
    pub equipment_depreciation: f64,
    pub infrastructure: f64,
    pub total: f64,
}

/// Policy effects applied on top of the subtotal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyAdjustments {
    pub risk_premium_rate: f64,
    pub applied_premiums: Vec<String>,
    pub risk_adjustment: f64,

    pub margin_rate: f64,
    pub margin_adjustment: f64,

    pub discount_rate: f64,
    /// Negative or zero
    pub discount_adjustment: f64,
}

impl PolicyAdjustments {
    pub fn total(&self) -> f64 {
        self.risk_adjustment + self.margin_adjustment + self.discount_adjustment
    }
}

/// One line of the percentage breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostShare {
    pub category: String,
    pub amount: f64,
    /// Pre-adjustment amount as a percent of grand total
    pub percent_of_total: f64,
}

/// Marginal cost of one block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCostResult {
    pub block_id: String,
    pub currency: String,

    /// Penetration catalog entry actually used
    pub resolved_rock_type: String,
    pub penetration_rate: f64,
    pub mining_hours: f64,

    pub opex: OpexBreakdown,
    pub capex: CapexAllocation,
    pub adjustments: PolicyAdjustments,

    pub subtotal: f64,
    pub contingency: f64,
    pub grand_total: f64,

    pub cost_per_tonne: f64,
    pub cost_per_meter: f64,

    /// Does not sum to 100 once adjustments are non-zero
    pub breakdown: Vec<CostShare>,
}

impl UnitCostResult {
    /// Recompute the grand total from its parts
    pub fn assembled_total(&self) -> f64 {
        self.subtotal + self.adjustments.total() + self.contingency
    }
}
