//! Project rollup: monthly cash flows, NPV, IRR and payback

mod aggregator;
mod cashflows;
mod irr;

pub use aggregator::{ProjectAggregator, PLACEHOLDER_TOTAL_METERS, PLACEHOLDER_TOTAL_TONNAGE};
pub use cashflows::{CapexSplit, CashflowCsvRow, CashflowPeriod, OpexSplit, ProjectSummary};
pub use irr::{calculate_irr, npv, IRR_INITIAL_GUESS, IRR_TOLERANCE, MAX_IRR_ITERATIONS, MIN_IRR_DERIVATIVE};
