//! Declarative business rules

use super::condition::Condition;
use crate::block::Block;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Margin applied to a cost category during a validity window `[valid_from, valid_to)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginRule {
    pub category: String,
    pub margin_rate: f64,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

impl MarginRule {
    pub fn applies(&self, category: &str, date: NaiveDate) -> bool {
        self.category.eq_ignore_ascii_case(category)
            && date >= self.valid_from
            && date < self.valid_to
    }
}

/// Block attribute a risk premium condition is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAttribute {
    Depth,
    RockHardness,
    Grade,
    Abrasivity,
}

impl RiskAttribute {
    pub fn value_of(&self, block: &Block) -> f64 {
        match self {
            RiskAttribute::Depth => block.depth_m,
            RiskAttribute::RockHardness => block.hardness,
            RiskAttribute::Grade => block.grade,
            RiskAttribute::Abrasivity => block.abrasivity,
        }
    }
}

/// Premium added when a block attribute satisfies a condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPremiumRule {
    pub name: String,
    pub attribute: RiskAttribute,
    pub condition: Condition,
    pub premium_rate: f64,
}

impl RiskPremiumRule {
    pub fn matches(&self, block: &Block) -> bool {
        self.condition.matches(self.attribute.value_of(block))
    }
}

/// Volume tier: discount when `min_tonnage <= tonnage < max_tonnage`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeDiscountRule {
    pub category: String,
    #[serde(default)]
    pub min_tonnage: f64,
    /// `None` = unbounded
    #[serde(default)]
    pub max_tonnage: Option<f64>,
    pub discount_rate: f64,
}

impl VolumeDiscountRule {
    pub fn applies(&self, category: &str, tonnage: f64) -> bool {
        self.category.eq_ignore_ascii_case(category)
            && tonnage >= self.min_tonnage
            && self.max_tonnage.map_or(true, |max| tonnage < max)
    }
}

/// Driver used to spread fixed costs over a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    #[default]
    PerTonne,
    PerMeter,
    PerHour,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRule {
    pub cost_type: String,
    pub method: AllocationMethod,
}

/// All rule sets of a configuration snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicySet {
    #[serde(default)]
    pub margins: Vec<MarginRule>,
    #[serde(default)]
    pub risk_premiums: Vec<RiskPremiumRule>,
    #[serde(default)]
    pub volume_discounts: Vec<VolumeDiscountRule>,
    #[serde(default)]
    pub allocations: Vec<AllocationRule>,
}
