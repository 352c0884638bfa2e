//! Rule evaluation against blocks, categories and dates

use super::rules::{AllocationMethod, PolicySet};
use crate::block::Block;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Premiums that fired for a block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskPremiumOutcome {
    /// Sum of the matching premium rates
    pub total_rate: f64,
    /// Names of the matching rules, in configuration order
    pub applied: Vec<String>,
}

/// Evaluates a borrowed [`PolicySet`]
#[derive(Debug, Clone, Copy)]
pub struct PoliciesEngine<'a> {
    policies: &'a PolicySet,
}

impl<'a> PoliciesEngine<'a> {
    pub fn new(policies: &'a PolicySet) -> Self {
        Self { policies }
    }

    /// Margin rate for a category on a date; first matching rule wins, 0 if none
    pub fn margin_for(&self, category: &str, date: NaiveDate) -> f64 {
        self.policies
            .margins
            .iter()
            .find(|rule| rule.applies(category, date))
            .map(|rule| rule.margin_rate)
            .unwrap_or(0.0)
    }

    /// Every matching premium is applied; rates stack additively
    pub fn risk_premium_for(&self, block: &Block) -> RiskPremiumOutcome {
        self.policies
            .risk_premiums
            .iter()
            .filter(|rule| rule.matches(block))
            .fold(RiskPremiumOutcome::default(), |mut outcome, rule| {
                outcome.total_rate += rule.premium_rate;
                outcome.applied.push(rule.name.clone());
                outcome
            })
    }

    /// Sum of all volume tiers the tonnage falls into
    pub fn volume_discount_for(&self, category: &str, tonnage: f64) -> f64 {
        self.policies
            .volume_discounts
            .iter()
            .filter(|rule| rule.applies(category, tonnage))
            .map(|rule| rule.discount_rate)
            .sum()
    }

    /// Allocation method for a cost type, per-tonne when unconfigured
    pub fn allocation_method_for(&self, cost_type: &str) -> AllocationMethod {
        self.policies
            .allocations
            .iter()
            .find(|rule| rule.cost_type.eq_ignore_ascii_case(cost_type))
            .map(|rule| rule.method)
            .unwrap_or_default()
    }
}
