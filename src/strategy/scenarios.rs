//! Bid scenario construction.
//!
//! Prices five bid levels between the platform minimum and the ceiling,
//! with profit, ROI, win probability and expected value for each. All
//! five are always returned; a POOR scenario is still part of the table.

use rust_decimal::prelude::*;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use tracing::debug;

use super::win_probability::WinProbabilityEstimator;
use crate::types::{BidScenario, HistoricalAuctionStats, ScenarioLabel, ScenarioTier};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Minimum ROI (percent) and win probability for a tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRule {
    pub tier: ScenarioTier,
    pub min_roi_pct: Decimal,
    pub min_win_probability: Decimal,
}

#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub conservative_fraction: Decimal,
    pub aggressive_fraction: Decimal,
    /// Checked in order; the first satisfied rule sets the tier.
    pub tiers: Vec<TierRule>,
    pub fallback_tier: ScenarioTier,
    pub money_dp: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            conservative_fraction: dec!(0.60),
            aggressive_fraction: dec!(0.85),
            tiers: vec![
                TierRule {
                    tier: ScenarioTier::Excellent,
                    min_roi_pct: dec!(80),
                    min_win_probability: dec!(0.60),
                },
                TierRule {
                    tier: ScenarioTier::Good,
                    min_roi_pct: dec!(50),
                    min_win_probability: dec!(0.50),
                },
                TierRule {
                    tier: ScenarioTier::Acceptable,
                    min_roi_pct: dec!(30),
                    min_win_probability: Decimal::ZERO,
                },
            ],
            fallback_tier: ScenarioTier::Poor,
            money_dp: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Everything a scenario needs besides its bid amount.
#[derive(Debug, Clone)]
pub struct ScenarioContext<'a> {
    pub max_bid: Decimal,
    pub minimum_bid: Decimal,
    pub policy_fraction: Decimal,
    pub market_value: Decimal,
    pub total_costs: Decimal,
    pub holding_months: Decimal,
    pub stats: &'a HistoricalAuctionStats,
    pub expected_bidders: u32,
}

pub struct ScenarioEngine {
    config: ScenarioConfig,
}

impl ScenarioEngine {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Bid for `fraction` of the ceiling, truncated to cents, never above it.
    pub fn fraction_of_max(&self, fraction: Decimal, max_bid: Decimal) -> Decimal {
        (fraction * max_bid)
            .round_dp_with_strategy(self.config.money_dp, RoundingStrategy::ToZero)
            .clamp(Decimal::ZERO, max_bid.max(Decimal::ZERO))
    }

    /// The five scenarios in `ScenarioLabel::ALL` order.
    pub fn build(&self, ctx: &ScenarioContext<'_>, estimator: &WinProbabilityEstimator) -> [BidScenario; 5] {
        ScenarioLabel::ALL.map(|label| {
            let bid = self.bid_for(label, ctx);
            self.price(label, bid, ctx, estimator)
        })
    }

    fn bid_for(&self, label: ScenarioLabel, ctx: &ScenarioContext<'_>) -> Decimal {
        let c = &self.config;
        match label {
            ScenarioLabel::Minimum => ctx.minimum_bid.min(ctx.max_bid).max(Decimal::ZERO),
            ScenarioLabel::Conservative => self.fraction_of_max(c.conservative_fraction, ctx.max_bid),
            ScenarioLabel::Recommended => self.fraction_of_max(ctx.policy_fraction, ctx.max_bid),
            ScenarioLabel::Aggressive => self.fraction_of_max(c.aggressive_fraction, ctx.max_bid),
            ScenarioLabel::Maximum => ctx.max_bid.max(Decimal::ZERO),
        }
    }

    /// Price a single bid level.
    pub fn price(
        &self,
        label: ScenarioLabel,
        bid: Decimal,
        ctx: &ScenarioContext<'_>,
        estimator: &WinProbabilityEstimator,
    ) -> BidScenario {
        let total_investment = bid + ctx.total_costs;
        let profit = ctx.market_value - total_investment;
        let roi_pct = roi_pct(profit, total_investment);
        let annualized_roi_pct = roi_pct.and_then(|r| annualize(r, ctx.holding_months));
        let win_probability = estimator.estimate(bid, ctx.market_value, ctx.stats, ctx.expected_bidders);
        let expected_value = profit * win_probability;
        let tier = self.tier(roi_pct, win_probability);

        debug!(
            label = %label,
            bid = %bid,
            roi = ?roi_pct,
            win_probability = %win_probability,
            tier = %tier,
            "Scenario priced"
        );

        BidScenario {
            label,
            bid_amount: bid,
            total_investment,
            profit,
            roi_pct,
            annualized_roi_pct,
            win_probability,
            expected_value,
            tier,
        }
    }

    pub fn tier(&self, roi_pct: Option<Decimal>, win_probability: Decimal) -> ScenarioTier {
        let Some(roi) = roi_pct else {
            return self.config.fallback_tier;
        };
        self.config
            .tiers
            .iter()
            .find(|r| roi >= r.min_roi_pct && win_probability >= r.min_win_probability)
            .map(|r| r.tier)
            .unwrap_or(self.config.fallback_tier)
    }
}

/// `profit / investment × 100`, undefined for a zero investment.
pub fn roi_pct(profit: Decimal, total_investment: Decimal) -> Option<Decimal> {
    if total_investment.is_zero() {
        None
    } else {
        Some(profit / total_investment * Decimal::ONE_HUNDRED)
    }
}

/// Compound annual growth rate over the holding period, in percent:
/// `((1 + roi)^(12 / months) − 1) × 100`.
///
/// `None` for a zero holding period or when the growth overflows.
pub fn annualize(roi_pct: Decimal, holding_months: Decimal) -> Option<Decimal> {
    if holding_months <= Decimal::ZERO {
        return None;
    }
    let growth = Decimal::ONE + roi_pct / Decimal::ONE_HUNDRED;
    let years_inverse = dec!(12) / holding_months;
    let compounded = growth.checked_powd(years_inverse)?;
    (compounded - Decimal::ONE).checked_mul(Decimal::ONE_HUNDRED)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
