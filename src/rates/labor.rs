//! Loaded and effective labor rates

use super::STANDARD_LABOR_HOURS_PER_YEAR;
use crate::config::LaborRole;
use crate::fx::FxResolver;
use serde::{Deserialize, Serialize};

/// Role codes with this prefix are direct labor
const DIRECT_CODE_PREFIX: &str = "DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborRate {
    pub code: String,
    pub title: String,

    /// Base compensation in project currency
    pub annual_salary: f64,
    pub loaded_annual_cost: f64,
    pub loaded_hourly_rate: f64,

    /// Loaded hourly rate divided by utilization; used in costing
    pub effective_hourly_rate: f64,

    pub is_direct: bool,
}

impl LaborRate {
    pub fn derive(role: &LaborRole, fx: &FxResolver<'_>, project_currency: &str) -> Self {
        let annual_salary = fx.convert(role.annual_salary, &role.currency, project_currency);
        let loaded_annual_cost = annual_salary * role.burden_multiplier;
        let loaded_hourly_rate = loaded_annual_cost / STANDARD_LABOR_HOURS_PER_YEAR;

        let utilization = if role.utilization > 0.0 { role.utilization } else { 1.0 };

        Self {
            code: role.code.clone(),
            title: role.title.clone(),
            annual_salary,
            loaded_annual_cost,
            loaded_hourly_rate,
            effective_hourly_rate: loaded_hourly_rate / utilization,
            is_direct: is_direct_code(&role.code),
        }
    }
}

fn is_direct_code(code: &str) -> bool {
    code.get(..DIRECT_CODE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DIRECT_CODE_PREFIX))
}
