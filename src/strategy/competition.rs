//! Bidder-count prediction.
//!
//! Scales the historical bidder average by attractiveness, market
//! temperature, seasonality and the tax-due entry barrier. The steps run
//! in a fixed order with rounding in between, so the order is part of the
//! configuration rather than the control flow.

use chrono::Month;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::debug;

use super::rules::{Bound, CategoryTable, ThresholdTable};
use crate::types::{CompetitionLevel, HistoricalAuctionStats, MarketConditions, MarketTemperature};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// One stage of the bidder-count pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetitionStep {
    /// Multiply by `score / neutral_score`.
    Attractiveness,
    /// Round half away from zero to a whole bidder count.
    Round,
    MarketTemperature,
    Seasonality,
    TaxDueBarrier,
}

#[derive(Debug, Clone)]
pub struct CompetitionConfig {
    /// Bidder count assumed when there is no auction history.
    pub default_bidders: Decimal,
    /// Attractiveness score that leaves the bidder count unchanged.
    pub neutral_score: Decimal,
    pub steps: Vec<CompetitionStep>,
    pub temperature: CategoryTable<MarketTemperature, Decimal>,
    pub seasonality: CategoryTable<Month, Decimal>,
    pub tax_due_barrier: ThresholdTable<Decimal>,
    pub levels: ThresholdTable<CompetitionLevel>,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        let winter = dec!(0.85);
        let busy = dec!(1.10);
        Self {
            default_bidders: dec!(3),
            neutral_score: dec!(5.0),
            steps: vec![
                CompetitionStep::Attractiveness,
                CompetitionStep::Round,
                CompetitionStep::MarketTemperature,
                CompetitionStep::Seasonality,
                CompetitionStep::TaxDueBarrier,
                CompetitionStep::Round,
            ],
            temperature: CategoryTable::new(
                vec![
                    (MarketTemperature::Hot, dec!(1.40)),
                    (MarketTemperature::Neutral, dec!(1.00)),
                    (MarketTemperature::Cold, dec!(0.60)),
                ],
                dec!(1.00),
            ),
            seasonality: CategoryTable::new(
                vec![
                    (Month::November, winter),
                    (Month::December, winter),
                    (Month::January, winter),
                    (Month::February, winter),
                    (Month::March, busy),
                    (Month::April, busy),
                    (Month::May, busy),
                    (Month::June, busy),
                    (Month::July, busy),
                    (Month::August, busy),
                    (Month::September, busy),
                    (Month::October, dec!(1.00)),
                ],
                dec!(1.00),
            ),
            tax_due_barrier: ThresholdTable::new(
                vec![
                    (Bound::Below(dec!(10000)), dec!(1.20)),
                    (Bound::Above(dec!(30000)), dec!(0.70)),
                ],
                dec!(1.00),
            ),
            levels: ThresholdTable::new(
                vec![
                    (Bound::AtLeast(dec!(7)), CompetitionLevel::VeryHigh),
                    (Bound::AtLeast(dec!(5)), CompetitionLevel::High),
                    (Bound::AtLeast(dec!(3)), CompetitionLevel::Moderate),
                    (Bound::AtLeast(dec!(1)), CompetitionLevel::Low),
                ],
                CompetitionLevel::VeryLow,
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Predictor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionForecast {
    pub expected_bidders: u32,
    pub level: CompetitionLevel,
    /// Starting bidder count (history or default).
    pub base: Decimal,
    /// Value after the last step, before the final floor at zero.
    pub raw: Decimal,
}

pub struct CompetitionPredictor {
    config: CompetitionConfig,
}

impl CompetitionPredictor {
    pub fn new(config: CompetitionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompetitionConfig {
        &self.config
    }

    pub fn predict(
        &self,
        score: Decimal,
        stats: &HistoricalAuctionStats,
        market: &MarketConditions,
        tax_due: Decimal,
    ) -> CompetitionForecast {
        let c = &self.config;
        let base = if stats.has_history() {
            stats.avg_bidders
        } else {
            c.default_bidders
        };

        let raw = c.steps.iter().fold(base, |acc, step| match step {
            CompetitionStep::Attractiveness => acc * (score / c.neutral_score),
            CompetitionStep::Round => round_bidders(acc),
            CompetitionStep::MarketTemperature => acc * c.temperature.lookup(&market.temperature),
            CompetitionStep::Seasonality => acc * c.seasonality.lookup(&market.sale_month),
            CompetitionStep::TaxDueBarrier => acc * c.tax_due_barrier.lookup(tax_due),
        });

        let expected_bidders = round_bidders(raw)
            .max(Decimal::ZERO)
            .to_u32()
            .unwrap_or(u32::MAX);
        let level = self.classify(expected_bidders);

        debug!(
            base = %base,
            raw = %raw,
            expected_bidders,
            level = %level,
            "Competition predicted"
        );

        CompetitionForecast {
            expected_bidders,
            level,
            base,
            raw,
        }
    }

    pub fn classify(&self, bidders: u32) -> CompetitionLevel {
        self.config.levels.lookup(Decimal::from(bidders))
    }
}

fn round_bidders(x: Decimal) -> Decimal {
    x.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
