//! Monthly cash-flow rollup and summary metrics

use super::cashflows::{CapexSplit, CashflowPeriod, OpexSplit, ProjectSummary};
use super::irr::{calculate_irr, npv};
use crate::block::{Period, ScheduleEntry};
use crate::config::ProjectParameters;
use crate::costing::UnitCostResult;
use log::{info, warn};
use std::collections::HashMap;

/// Placeholder total production used for summary cost ratios
pub const PLACEHOLDER_TOTAL_TONNAGE: f64 = 1_000_000.0;
pub const PLACEHOLDER_TOTAL_METERS: f64 = 10_000.0;

/// Rolls unit cost results into monthly periods for one project
pub struct ProjectAggregator<'a> {
    project: &'a ProjectParameters,
}

impl<'a> ProjectAggregator<'a> {
    pub fn new(project: &'a ProjectParameters) -> Self {
        Self { project }
    }

    /// Every month from the start year through `start_year + life` inclusive
    pub fn generate_periods(&self) -> Vec<CashflowPeriod> {
        let first = self.project.start_year;
        let last = first + self.project.life_of_mine_years as i32;

        (first..=last)
            .flat_map(|year| (1..=12).filter_map(move |month| Period::new(year, month)))
            .enumerate()
            .map(|(index, period)| CashflowPeriod::new(index, period))
            .collect()
    }

    /// Build the cash-flow series
    ///
    /// Returns the periods and how many schedule entries were applied.
    pub fn aggregate(
        &self,
        unit_costs: &[UnitCostResult],
        schedule: &[ScheduleEntry],
    ) -> (Vec<CashflowPeriod>, usize) {
        let mut periods = self.generate_periods();

        let costs_by_block: HashMap<&str, &UnitCostResult> = unit_costs
            .iter()
            .map(|r| (r.block_id.as_str(), r))
            .collect();
        let index_by_period: HashMap<Period, usize> =
            periods.iter().map(|p| (p.period, p.index)).collect();

        let mut ordered: Vec<&ScheduleEntry> = schedule.iter().collect();
        ordered.sort_by_key(|e| (e.period, e.sequence));

        let mut capex_totals = vec![0.0; periods.len()];
        let mut opex_totals = vec![0.0; periods.len()];
        let mut applied = 0;

        for entry in ordered {
            let Some(result) = costs_by_block.get(entry.block_id.as_str()) else {
                warn!(
                    "Schedule entry for unknown block '{}' in {} skipped",
                    entry.block_id, entry.period
                );
                continue;
            };
            let Some(&idx) = index_by_period.get(&entry.period) else {
                warn!(
                    "Block '{}' scheduled in {} outside the project horizon, skipped",
                    entry.block_id, entry.period
                );
                continue;
            };

            capex_totals[idx] += result.capex.total;
            opex_totals[idx] += result.opex.total;
            periods[idx].blocks.push(entry.block_id.clone());
            applied += 1;
        }

        for (period, (capex, opex)) in periods
            .iter_mut()
            .zip(capex_totals.into_iter().zip(opex_totals))
        {
            period.capex = CapexSplit::from_total(capex);
            period.opex = OpexSplit::from_total(opex);
            period.net_cashflow = -(capex + opex);
        }

        // Second pass: running sum
        let mut cumulative = 0.0;
        for period in periods.iter_mut() {
            cumulative += period.net_cashflow;
            period.cumulative_cashflow = cumulative;
        }

        (periods, applied)
    }

    /// Summary metrics over an aggregated series
    pub fn summarize(&self, periods: &[CashflowPeriod], units_scheduled: usize) -> ProjectSummary {
        let net: Vec<f64> = periods.iter().map(|p| p.net_cashflow).collect();

        let total_capex: f64 = periods.iter().map(|p| p.capex.total).sum();
        let total_opex: f64 = periods.iter().map(|p| p.opex.total).sum();
        let total_cost = total_capex + total_opex;

        let payback_period_months = periods
            .iter()
            .position(|p| p.cumulative_cashflow >= 0.0)
            .unwrap_or(periods.len());

        let peak_funding = periods
            .iter()
            .map(|p| p.cumulative_cashflow)
            .fold(0.0, f64::min);

        let summary = ProjectSummary {
            npv: npv(self.project.discount_rate, &net),
            irr: calculate_irr(&net),
            payback_period_months,
            total_capex,
            total_opex,
            total_cost,
            cost_per_tonne: total_cost / PLACEHOLDER_TOTAL_TONNAGE,
            cost_per_meter: total_cost / PLACEHOLDER_TOTAL_METERS,
            peak_funding,
            units_scheduled,
            periods: periods.len(),
        };

        info!(
            "Projection '{}': {} periods, {} units, NPV {:.2}, IRR {}",
            self.project.name,
            summary.periods,
            summary.units_scheduled,
            summary.npv,
            summary
                .irr
                .map(|r| format!("{:.4}", r))
                .unwrap_or_else(|| "unavailable".to_string())
        );

        summary
    }

    /// Aggregate and summarize in one step
    pub fn run(
        &self,
        unit_costs: &[UnitCostResult],
        schedule: &[ScheduleEntry],
    ) -> (Vec<CashflowPeriod>, ProjectSummary) {
        let (periods, applied) = self.aggregate(unit_costs, schedule);
        let summary = self.summarize(&periods, applied);
        (periods, summary)
    }
}
