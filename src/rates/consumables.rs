//! Consumable unit rates with depth wear curves and rock-type multipliers

use crate::config::{ConsumableItem, ConsumableUnit, WearPoint};
use crate::fx::FxResolver;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wear curve used when an item configures none: 1.0/1.1/1.25/1.5 at 0/200/500/1000 m
pub fn default_wear_curve() -> Vec<WearPoint> {
    [(0.0, 1.0), (200.0, 1.1), (500.0, 1.25), (1000.0, 1.5)]
        .into_iter()
        .map(|(depth_m, multiplier)| WearPoint { depth_m, multiplier })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumableRate {
    pub consumable_id: String,
    pub name: String,
    pub unit: ConsumableUnit,

    // Exactly one of these is set, matching `unit`
    pub cost_per_meter: Option<f64>,
    pub cost_per_tonne: Option<f64>,
    pub cost_per_cycle: Option<f64>,

    /// Sorted by depth
    pub wear_curve: Vec<WearPoint>,
    pub rock_multipliers: BTreeMap<String, f64>,
}

impl ConsumableRate {
    pub fn derive(item: &ConsumableItem, fx: &FxResolver<'_>, project_currency: &str) -> Self {
        let unit_cost = fx.convert(item.unit_cost, &item.currency, project_currency);
        let life = if item.life_quantity > 0.0 { item.life_quantity } else { 1.0 };
        let normalized = unit_cost / life;

        let (cost_per_meter, cost_per_tonne, cost_per_cycle) = match item.life_unit {
            ConsumableUnit::Meter => (Some(normalized), None, None),
            ConsumableUnit::Tonne => (None, Some(normalized), None),
            ConsumableUnit::Cycle => (None, None, Some(normalized)),
        };

        let mut wear_curve = match &item.wear_curve {
            Some(curve) if !curve.is_empty() => curve.clone(),
            _ => default_wear_curve(),
        };
        wear_curve.sort_by(|a, b| a.depth_m.total_cmp(&b.depth_m));

        Self {
            consumable_id: item.id.clone(),
            name: item.name.clone(),
            unit: item.life_unit,
            cost_per_meter,
            cost_per_tonne,
            cost_per_cycle,
            wear_curve,
            rock_multipliers: item.rock_multipliers.clone(),
        }
    }

    /// Normalized cost per life unit, whichever unit that is
    pub fn cost_per_unit(&self) -> f64 {
        self.cost_per_meter
            .or(self.cost_per_tonne)
            .or(self.cost_per_cycle)
            .unwrap_or(0.0)
    }

    /// Wear multiplier at a depth, linearly interpolated and clamped to the curve ends
    pub fn wear_multiplier_at(&self, depth_m: f64) -> f64 {
        let (first, last) = match (self.wear_curve.first(), self.wear_curve.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 1.0,
        };
        if depth_m <= first.depth_m {
            return first.multiplier;
        }
        if depth_m >= last.depth_m {
            return last.multiplier;
        }

        self.wear_curve
            .windows(2)
            .find(|w| depth_m >= w[0].depth_m && depth_m <= w[1].depth_m)
            .map(|w| {
                let span = w[1].depth_m - w[0].depth_m;
                if span <= 0.0 {
                    return w[1].multiplier;
                }
                let t = (depth_m - w[0].depth_m) / span;
                w[0].multiplier + t * (w[1].multiplier - w[0].multiplier)
            })
            .unwrap_or(last.multiplier)
    }

    /// Consumption multiplier for a rock type (case-insensitive), 1.0 if unlisted
    pub fn rock_multiplier(&self, rock_type: &str) -> f64 {
        self.rock_multipliers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(rock_type))
            .map(|(_, m)| *m)
            .unwrap_or(1.0)
    }

    /// Unit cost adjusted for depth wear and rock type
    pub fn adjusted_cost_per_unit(&self, depth_m: f64, rock_type: &str) -> f64 {
        self.cost_per_unit() * self.wear_multiplier_at(depth_m) * self.rock_multiplier(rock_type)
    }
}
