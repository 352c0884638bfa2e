//! Business rules: margins, risk premiums, volume discounts, cost allocation

mod condition;
mod engine;
mod rules;

pub use condition::{CompareOp, Condition};
pub use engine::{PoliciesEngine, RiskPremiumOutcome};
pub use rules::{
    AllocationMethod, AllocationRule, MarginRule, PolicySet, RiskAttribute, RiskPremiumRule,
    VolumeDiscountRule,
};
