//! Per-block marginal cost calculation

mod calculator;
mod result;

pub use calculator::{
    depth_factor, hardness_factor, UnitCostCalculator, INDIRECT_LABOR_WEIGHT,
    INFRASTRUCTURE_COST_PER_TONNE, OVERHEAD_RATE, PRODUCTION_PROXY_MULTIPLIER,
};
pub use result::{CapexAllocation, CostShare, OpexBreakdown, PolicyAdjustments, UnitCostResult};
