//! Win-probability estimation for a candidate bid.
//!
//! Compares the bid's ratio to market value against the historical
//! winning ratio, maps that relative position through a probability
//! ladder, then adjusts for the expected number of competing bidders.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::rules::{Bound, ThresholdTable};
use crate::types::HistoricalAuctionStats;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct WinProbabilityConfig {
    /// `bid ratio / historical win ratio` → base probability.
    pub ladder: ThresholdTable<Decimal>,
    /// Expected bidders → multiplier.
    pub competition: ThresholdTable<Decimal>,
    pub min_probability: Decimal,
    pub max_probability: Decimal,
}

impl Default for WinProbabilityConfig {
    fn default() -> Self {
        Self {
            ladder: ThresholdTable::new(
                vec![
                    (Bound::AtLeast(dec!(1.15)), dec!(0.95)),
                    (Bound::AtLeast(dec!(1.10)), dec!(0.85)),
                    (Bound::AtLeast(dec!(1.05)), dec!(0.75)),
                    (Bound::AtLeast(dec!(1.00)), dec!(0.65)),
                    (Bound::AtLeast(dec!(0.95)), dec!(0.50)),
                    (Bound::AtLeast(dec!(0.90)), dec!(0.35)),
                    (Bound::AtLeast(dec!(0.85)), dec!(0.20)),
                ],
                dec!(0.10),
            ),
            competition: ThresholdTable::new(
                vec![
                    (Bound::AtLeast(dec!(7)), dec!(0.75)),
                    (Bound::AtLeast(dec!(5)), dec!(0.85)),
                    (Bound::AtMost(dec!(1)), dec!(1.40)),
                ],
                dec!(1.00),
            ),
            min_probability: dec!(0.05),
            max_probability: dec!(0.95),
        }
    }
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

pub struct WinProbabilityEstimator {
    config: WinProbabilityConfig,
}

impl WinProbabilityEstimator {
    pub fn new(config: WinProbabilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WinProbabilityConfig {
        &self.config
    }

    /// Bid position relative to the historical winning ratio.
    ///
    /// Falls back to `1.0` (exactly at the historical norm) when there is
    /// no history, no usable win ratio, or no market value to compare to.
    pub fn relative_position(bid: Decimal, market_value: Decimal, stats: &HistoricalAuctionStats) -> Decimal {
        if !stats.has_history() || stats.avg_win_ratio <= Decimal::ZERO || market_value <= Decimal::ZERO {
            return Decimal::ONE;
        }
        let bid_ratio = bid / market_value;
        bid_ratio.checked_div(stats.avg_win_ratio).unwrap_or(Decimal::MAX)
    }

    /// Ladder probability before any competition adjustment.
    pub fn base_probability(&self, bid: Decimal, market_value: Decimal, stats: &HistoricalAuctionStats) -> Decimal {
        let diff = Self::relative_position(bid, market_value, stats);
        self.config.ladder.lookup(diff)
    }

    /// Final probability in `[min_probability, max_probability]`.
    pub fn estimate(
        &self,
        bid: Decimal,
        market_value: Decimal,
        stats: &HistoricalAuctionStats,
        expected_bidders: u32,
    ) -> Decimal {
        let base = self.base_probability(bid, market_value, stats);
        let factor = self.config.competition.lookup(Decimal::from(expected_bidders));
        (base * factor)
            .max(self.config.min_probability)
            .min(self.config.max_probability)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
