//! Cash-flow output structures for project projections

use crate::block::Period;
use serde::{Deserialize, Serialize};

// Fixed CAPEX sub-split
pub const CAPEX_EQUIPMENT_SHARE: f64 = 0.70;
pub const CAPEX_INFRASTRUCTURE_SHARE: f64 = 0.20;
pub const CAPEX_DEVELOPMENT_SHARE: f64 = 0.10;

// Fixed OPEX sub-split
pub const OPEX_MINING_SHARE: f64 = 0.40;
pub const OPEX_PROCESSING_SHARE: f64 = 0.20;
pub const OPEX_MAINTENANCE_SHARE: f64 = 0.15;
pub const OPEX_LABOR_SHARE: f64 = 0.15;
pub const OPEX_ENERGY_SHARE: f64 = 0.05;
pub const OPEX_GENERAL_ADMIN_SHARE: f64 = 0.05;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapexSplit {
    pub equipment: f64,
    pub infrastructure: f64,
    pub development: f64,
    pub total: f64,
}

impl CapexSplit {
    pub fn from_total(total: f64) -> Self {
        Self {
            equipment: total * CAPEX_EQUIPMENT_SHARE,
            infrastructure: total * CAPEX_INFRASTRUCTURE_SHARE,
            development: total * CAPEX_DEVELOPMENT_SHARE,
            total,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpexSplit {
    pub mining: f64,
    pub processing: f64,
    pub maintenance: f64,
    pub labor: f64,
    pub energy: f64,
    pub general_admin: f64,
    pub total: f64,
}

impl OpexSplit {
    pub fn from_total(total: f64) -> Self {
        Self {
            mining: total * OPEX_MINING_SHARE,
            processing: total * OPEX_PROCESSING_SHARE,
            maintenance: total * OPEX_MAINTENANCE_SHARE,
            labor: total * OPEX_LABOR_SHARE,
            energy: total * OPEX_ENERGY_SHARE,
            general_admin: total * OPEX_GENERAL_ADMIN_SHARE,
            total,
        }
    }
}

/// One calendar month of project cash flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowPeriod {
    /// Zero-based month index from the project start
    pub index: usize,
    pub period: Period,

    pub capex: CapexSplit,
    pub opex: OpexSplit,

    /// No revenue is modeled, so this is never positive
    pub net_cashflow: f64,
    pub cumulative_cashflow: f64,

    /// Blocks mined in this period, in sequence order
    pub blocks: Vec<String>,
}

impl CashflowPeriod {
    pub fn new(index: usize, period: Period) -> Self {
        Self {
            index,
            period,
            capex: CapexSplit::default(),
            opex: OpexSplit::default(),
            net_cashflow: 0.0,
            cumulative_cashflow: 0.0,
            blocks: Vec::new(),
        }
    }
}

/// Flat row for CSV export
#[derive(Debug, Clone, Serialize)]
pub struct CashflowCsvRow {
    pub index: usize,
    pub period: String,
    pub capex_equipment: f64,
    pub capex_infrastructure: f64,
    pub capex_development: f64,
    pub capex_total: f64,
    pub opex_mining: f64,
    pub opex_processing: f64,
    pub opex_maintenance: f64,
    pub opex_labor: f64,
    pub opex_energy: f64,
    pub opex_general_admin: f64,
    pub opex_total: f64,
    pub net_cashflow: f64,
    pub cumulative_cashflow: f64,
    pub blocks: String,
}

impl From<&CashflowPeriod> for CashflowCsvRow {
    fn from(p: &CashflowPeriod) -> Self {
        Self {
            index: p.index,
            period: p.period.to_string(),
            capex_equipment: p.capex.equipment,
            capex_infrastructure: p.capex.infrastructure,
            capex_development: p.capex.development,
            capex_total: p.capex.total,
            opex_mining: p.opex.mining,
            opex_processing: p.opex.processing,
            opex_maintenance: p.opex.maintenance,
            opex_labor: p.opex.labor,
            opex_energy: p.opex.energy,
            opex_general_admin: p.opex.general_admin,
            opex_total: p.opex.total,
            net_cashflow: p.net_cashflow,
            cumulative_cashflow: p.cumulative_cashflow,
            blocks: p.blocks.join(";"),
        }
    }
}

/// Summary metrics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub npv: f64,
    /// Per-period rate; `None` when no IRR could be found
    pub irr: Option<f64>,
    pub payback_period_months: usize,

    pub total_capex: f64,
    pub total_opex: f64,
    pub total_cost: f64,

    pub cost_per_tonne: f64,
    pub cost_per_meter: f64,

    /// Most negative cumulative cash flow (0 if never negative)
    pub peak_funding: f64,
    /// Schedule entries that landed in a period
    pub units_scheduled: usize,
    pub periods: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_splits_sum_to_total() {
        let capex = CapexSplit::from_total(1_000.0);
        assert_relative_eq!(
            capex.equipment + capex.infrastructure + capex.development,
            1_000.0,
            epsilon = 1e-9
        );

        let opex = OpexSplit::from_total(2_000.0);
        assert_relative_eq!(opex.mining, 800.0);
        assert_relative_eq!(opex.general_admin, 100.0);
        assert_relative_eq!(
            opex.mining + opex.processing + opex.maintenance + opex.labor + opex.energy + opex.general_admin,
            2_000.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_csv_row_flattens_period() {
        let mut period = CashflowPeriod::new(3, Period::new(2025, 4).unwrap());
        period.capex = CapexSplit::from_total(10.0);
        period.blocks = vec!["B1".to_string(), "B2".to_string()];

        let row = CashflowCsvRow::from(&period);
        assert_eq!(row.period, "2025-04");
        assert_eq!(row.blocks, "B1;B2");
        assert_relative_eq!(row.capex_equipment, 7.0);
    }
}
