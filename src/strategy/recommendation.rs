//! Recommendation selection.
//!
//! Picks the policy bid from the competition tier and the investor's
//! recent win rate, flags the scenario with the best expected value, and
//! attaches the bidding tactic for the auction format.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::debug;

use super::rules::{Bound, CategoryTable, ThresholdTable};
use crate::types::{BidScenario, InvestorPosture, PlatformTactic, PlatformType, ScenarioLabel};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Fixed parameters of the per-platform tactics.
#[derive(Debug, Clone)]
pub struct TacticConfig {
    pub first_bid_secs_before_close: u32,
    pub rebid_secs_before_close: u32,
    pub soft_close_extension_secs: u32,
    /// Jump bid as a fraction of the ceiling.
    pub jump_fraction: Decimal,
    pub min_increments_skipped: u32,
    pub max_increments_skipped: u32,
    /// Sealed-bid multiplier per posture (must-win / speculative).
    pub sealed_posture: CategoryTable<InvestorPosture, Decimal>,
}

impl Default for TacticConfig {
    fn default() -> Self {
        Self {
            first_bid_secs_before_close: 120,
            rebid_secs_before_close: 30,
            soft_close_extension_secs: 300,
            jump_fraction: dec!(0.70),
            min_increments_skipped: 3,
            max_increments_skipped: 5,
            sealed_posture: CategoryTable::new(
                vec![
                    (InvestorPosture::Aggressive, dec!(1.20)),
                    (InvestorPosture::Neutral, dec!(1.00)),
                    (InvestorPosture::Conservative, dec!(0.85)),
                ],
                dec!(1.00),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// Expected bidders → fraction of the ceiling.
    pub policy: ThresholdTable<Decimal>,
    /// Trailing win rate → multiplier on the policy fraction.
    pub win_rate_feedback: ThresholdTable<Decimal>,
    pub tactics: TacticConfig,
    pub money_dp: u32,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            policy: ThresholdTable::new(
                vec![
                    (Bound::AtLeast(dec!(7)), dec!(0.90)),
                    (Bound::AtLeast(dec!(5)), dec!(0.85)),
                    (Bound::AtLeast(dec!(3)), dec!(0.75)),
                    (Bound::AtLeast(dec!(1)), dec!(0.60)),
                ],
                dec!(0.55),
            ),
            win_rate_feedback: ThresholdTable::new(
                vec![
                    (Bound::Below(dec!(0.20)), dec!(1.10)),
                    (Bound::Above(dec!(0.50)), dec!(0.95)),
                ],
                dec!(1.00),
            ),
            tactics: TacticConfig::default(),
            money_dp: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Inputs the tactic lookup needs.
#[derive(Debug, Clone, Copy)]
pub struct TacticInputs {
    pub platform: PlatformType,
    pub posture: InvestorPosture,
    pub market_value: Decimal,
    pub expected_bidders: u32,
    pub max_bid: Decimal,
    pub minimum_bid: Decimal,
    pub recommended_bid: Decimal,
}

pub struct RecommendationSelector {
    config: RecommendationConfig,
}

impl RecommendationSelector {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Fraction of the ceiling to bid, capped at 1.
    pub fn policy_fraction(&self, expected_bidders: u32, trailing_win_rate: Option<Decimal>) -> Decimal {
        let base = self.config.policy.lookup(Decimal::from(expected_bidders));
        let feedback = trailing_win_rate
            .map(|r| self.config.win_rate_feedback.lookup(r))
            .unwrap_or(Decimal::ONE);
        (base * feedback).min(Decimal::ONE)
    }

    /// Scenario with the highest expected value; earliest wins a tie.
    pub fn expected_value_optimal<'a>(&self, scenarios: &'a [BidScenario]) -> Option<&'a BidScenario> {
        scenarios.iter().fold(None, |best: Option<&BidScenario>, s| match best {
            Some(b) if b.expected_value >= s.expected_value => Some(b),
            _ => Some(s),
        })
    }

    pub fn tactic(&self, t: &TacticInputs) -> PlatformTactic {
        let c = &self.config.tactics;
        let ceiling = t.max_bid.max(Decimal::ZERO);
        let tactic = match t.platform {
            PlatformType::TimedSoftClose => PlatformTactic::WaitAndSnipe {
                first_bid_secs_before_close: c.first_bid_secs_before_close,
                rebid_secs_before_close: c.rebid_secs_before_close,
                soft_close_extension_secs: c.soft_close_extension_secs,
                opening_bid: t.recommended_bid.min(ceiling),
                ceiling,
            },
            PlatformType::LiveAuctioneer => PlatformTactic::JumpBid {
                jump_bid: self.to_money(c.jump_fraction * ceiling).min(ceiling),
                min_increments_skipped: c.min_increments_skipped,
                max_increments_skipped: c.max_increments_skipped,
                ceiling,
            },
            PlatformType::SealedBid => {
                let base_bid = self.to_money(sealed_base(t.market_value, t.expected_bidders));
                let posture_factor = c.sealed_posture.lookup(&t.posture);
                let mut sealed_bid = self.to_money(base_bid * posture_factor).min(ceiling);
                if sealed_bid < t.minimum_bid && t.minimum_bid <= ceiling {
                    sealed_bid = t.minimum_bid;
                }
                PlatformTactic::SealedBid {
                    base_bid,
                    posture_factor,
                    sealed_bid,
                    ceiling,
                }
            }
        };
        debug!(tactic = tactic.name(), bid = %tactic.proposed_bid(), "Tactic selected");
        tactic
    }

    fn to_money(&self, x: Decimal) -> Decimal {
        x.round_dp_with_strategy(self.config.money_dp, RoundingStrategy::ToZero)
    }
}

/// `market_value × (1 − 1/n)`, the symmetric first-price equilibrium
/// fraction for `n` bidders. Zero bidders is treated as one.
pub fn sealed_base(market_value: Decimal, expected_bidders: u32) -> Decimal {
    let n = Decimal::from(expected_bidders.max(1));
    market_value * (Decimal::ONE - Decimal::ONE / n)
}

/// Label of the EV-optimal scenario, defaulting to the minimum.
pub fn optimal_label(best: Option<&BidScenario>) -> ScenarioLabel {
    best.map(|s| s.label).unwrap_or(ScenarioLabel::Minimum)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
