//! Marginal Cost Engine - per-block production costing and project cash flows
//!
//! This library provides:
//! - Derived equipment, labor, consumable and fuel rates with FX conversion
//! - Business policies: margins, risk premiums, volume discounts, allocation
//! - Marginal cost of a single production block
//! - Monthly cash-flow rollup with NPV, IRR and payback
//! - Sensitivity analysis over discount rate, equipment and labor cost

pub mod block;
pub mod config;
pub mod costing;
pub mod engine;
pub mod error;
pub mod fx;
pub mod policies;
pub mod projection;
pub mod rates;
pub mod sensitivity;

// Re-export commonly used types
pub use block::{Block, Period, ScheduleEntry};
pub use config::EngineConfig;
pub use costing::{UnitCostCalculator, UnitCostResult};
pub use engine::{CostEngine, ProjectProjection};
pub use error::{EngineError, EngineResult};
pub use projection::{CashflowPeriod, ProjectSummary};
pub use rates::RateTables;
pub use sensitivity::{SensitivityPoint, SensitivityVariable};
