//! Maximum-bid (profitability ceiling) calculation.
//!
//! Solves `roi = (mv - (bid + costs)) / (bid + costs)` for the bid that
//! exactly meets the target ROI, then discounts it for title, condition,
//! environmental and occupancy risk and for the investor's posture.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use super::rules::{fold_adjustments, Adjustment, Predicate};
use crate::types::{InvestorPosture, OccupancyRisk, RiskProfile};

// ---------------------------------------------------------------------------
// Risk predicates
// ---------------------------------------------------------------------------

/// Risk condition that triggers a ceiling discount.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskCondition {
    TitleScoreBelow(Decimal),
    ConditionBelow(Decimal),
    EnvironmentalRiskAbove(Decimal),
    Occupancy(OccupancyRisk),
    Posture(InvestorPosture),
}

impl Predicate<RiskProfile> for RiskCondition {
    fn holds(&self, risk: &RiskProfile) -> bool {
        match self {
            RiskCondition::TitleScoreBelow(t) => risk.title_risk_score < *t,
            RiskCondition::ConditionBelow(t) => risk.condition_score < *t,
            RiskCondition::EnvironmentalRiskAbove(t) => risk.environmental_risk_score > *t,
            RiskCondition::Occupancy(o) => risk.occupancy_risk == *o,
            RiskCondition::Posture(p) => risk.investor_posture == *p,
        }
    }

    fn label(&self) -> String {
        match self {
            RiskCondition::TitleScoreBelow(t) => format!("title<{t}"),
            RiskCondition::ConditionBelow(t) => format!("condition<{t}"),
            RiskCondition::EnvironmentalRiskAbove(t) => format!("environmental>{t}"),
            RiskCondition::Occupancy(o) => format!("occupancy={o}"),
            RiskCondition::Posture(p) => format!("posture={p}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MaxBidConfig {
    /// Applied in order to the formula ceiling.
    pub risk_chain: Vec<Adjustment<RiskCondition>>,
    /// Decimal places kept on the ceiling (truncated toward zero).
    pub money_dp: u32,
}

impl MaxBidConfig {
    /// Default chain with a custom environmental "high risk" threshold.
    pub fn with_environmental_threshold(high_environmental_risk: Decimal) -> Self {
        Self {
            risk_chain: vec![
                Adjustment { when: RiskCondition::TitleScoreBelow(dec!(70)), factor: dec!(0.90) },
                Adjustment { when: RiskCondition::ConditionBelow(dec!(5)), factor: dec!(0.95) },
                Adjustment {
                    when: RiskCondition::EnvironmentalRiskAbove(high_environmental_risk),
                    factor: dec!(0.90),
                },
                Adjustment { when: RiskCondition::Occupancy(OccupancyRisk::High), factor: dec!(0.95) },
                Adjustment {
                    when: RiskCondition::Posture(InvestorPosture::Conservative),
                    factor: dec!(0.85),
                },
                Adjustment {
                    when: RiskCondition::Posture(InvestorPosture::Aggressive),
                    factor: dec!(1.05),
                },
            ],
            money_dp: 2,
        }
    }
}

impl Default for MaxBidConfig {
    fn default() -> Self {
        Self::with_environmental_threshold(dec!(7))
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MaxBid {
    /// Formula ceiling before risk adjustments (may be negative).
    pub base: Decimal,
    /// Risk-adjusted ceiling, truncated to cents and floored at zero.
    pub amount: Decimal,
    pub applied: Vec<String>,
    /// No bid clears the target ROI.
    pub do_not_bid: bool,
}

pub struct MaxBidCalculator {
    config: MaxBidConfig,
}

impl MaxBidCalculator {
    pub fn new(config: MaxBidConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MaxBidConfig {
        &self.config
    }

    /// Ceiling from the ROI formula alone.
    ///
    /// `target_roi` is a fraction (0.50 = 50%) and must be non-negative.
    pub fn base_max_bid(market_value: Decimal, total_costs: Decimal, target_roi: Decimal) -> Decimal {
        let growth = Decimal::ONE + target_roi;
        (market_value - total_costs * growth) / growth
    }

    pub fn compute_max_bid(
        &self,
        market_value: Decimal,
        total_costs: Decimal,
        target_roi: Decimal,
        risk: &RiskProfile,
    ) -> MaxBid {
        let base = Self::base_max_bid(market_value, total_costs, target_roi);
        let folded = fold_adjustments(base, risk, &self.config.risk_chain);
        let amount = folded
            .value
            .round_dp_with_strategy(self.config.money_dp, RoundingStrategy::ToZero)
            .max(Decimal::ZERO);
        let do_not_bid = amount <= Decimal::ZERO;

        if do_not_bid {
            warn!(
                base = %base,
                total_costs = %total_costs,
                target_roi = %target_roi,
                "No profitable bid at target ROI"
            );
        } else {
            debug!(
                base = %base,
                max_bid = %amount,
                adjustments = ?folded.applied,
                "Max bid computed"
            );
        }

        MaxBid {
            base,
            amount,
            applied: folded.applied,
            do_not_bid,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
