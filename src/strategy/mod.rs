//! Strategy engine: ceiling, competition, scenarios and recommendation.

pub mod attractiveness;
pub mod competition;
pub mod max_bid;
pub mod recommendation;
pub mod rules;
pub mod scenarios;
pub mod win_probability;

use rust_decimal::prelude::*;
use tracing::{debug, info, warn};

use crate::aggregator::{AggregatorConfig, InputAggregator};
use crate::config::EngineSettings;
use crate::types::{
    BidInputs, BidStrategyResult, CostBreakdown, EvaluateBidRequest, MinimumBid, ScenarioLabel,
    ValidationError,
};
use attractiveness::{AttractivenessConfig, AttractivenessScorer};
use competition::{CompetitionConfig, CompetitionPredictor};
use max_bid::{MaxBidCalculator, MaxBidConfig};
use recommendation::{optimal_label, RecommendationConfig, RecommendationSelector, TacticInputs};
use scenarios::{ScenarioConfig, ScenarioContext, ScenarioEngine};
use win_probability::{WinProbabilityConfig, WinProbabilityEstimator};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for every pipeline stage.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub aggregator: AggregatorConfig,
    pub attractiveness: AttractivenessConfig,
    pub competition: CompetitionConfig,
    pub max_bid: MaxBidConfig,
    pub win_probability: WinProbabilityConfig,
    pub scenarios: ScenarioConfig,
    pub recommendation: RecommendationConfig,
}

impl EngineConfig {
    /// Default tables with the scalar tunables from `config.toml` applied.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let defaults = Self::default();
        Self {
            aggregator: AggregatorConfig {
                default_target_roi: settings.default_target_roi,
                ..defaults.aggregator
            },
            competition: CompetitionConfig {
                default_bidders: settings.default_bidders,
                ..defaults.competition
            },
            max_bid: MaxBidConfig::with_environmental_threshold(settings.environmental_high_risk),
            win_probability: WinProbabilityConfig {
                min_probability: settings.min_win_probability,
                max_probability: settings.max_win_probability,
                ..defaults.win_probability
            },
            ..defaults
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Pipelines input aggregation → attractiveness → competition → ceiling →
/// scenarios → recommendation.
///
/// Holds no mutable state: build once and share freely across threads.
pub struct BidStrategyEngine {
    aggregator: InputAggregator,
    attractiveness: AttractivenessScorer,
    competition: CompetitionPredictor,
    max_bid: MaxBidCalculator,
    win_probability: WinProbabilityEstimator,
    scenarios: ScenarioEngine,
    recommendation: RecommendationSelector,
}

impl BidStrategyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            aggregator: InputAggregator::new(config.aggregator),
            attractiveness: AttractivenessScorer::new(config.attractiveness),
            competition: CompetitionPredictor::new(config.competition),
            max_bid: MaxBidCalculator::new(config.max_bid),
            win_probability: WinProbabilityEstimator::new(config.win_probability),
            scenarios: ScenarioEngine::new(config.scenarios),
            recommendation: RecommendationSelector::new(config.recommendation),
        }
    }

    /// Validate a raw request and evaluate it.
    ///
    /// The only error is a `ValidationError`; an unprofitable property is a
    /// successful result with `do_not_bid` set.
    pub fn evaluate(&self, request: &EvaluateBidRequest) -> Result<BidStrategyResult, ValidationError> {
        let inputs = self.aggregator.aggregate(request)?;
        Ok(self.evaluate_inputs(&inputs))
    }

    /// Evaluate an already validated snapshot.
    pub fn evaluate_inputs(&self, inputs: &BidInputs) -> BidStrategyResult {
        let f = &inputs.financials;

        // Step 1 – cost basis and ceiling
        let cost_breakdown = CostBreakdown::from_financials(f);
        let total_costs = cost_breakdown.total();
        let max_bid = self
            .max_bid
            .compute_max_bid(f.market_value, total_costs, inputs.target_roi, &inputs.risk);

        // Step 2 – attractiveness and competition
        let attractiveness = self.attractiveness.breakdown(&inputs.attributes);
        let forecast = self.competition.predict(
            attractiveness.score,
            &inputs.history,
            &inputs.market,
            inputs.attributes.tax_due_amount,
        );

        // Step 3 – platform minimum
        let minimum_bid = self.platform_minimum(inputs);
        let minimum_exceeds_max_bid = minimum_bid > max_bid.amount;
        if minimum_exceeds_max_bid && !max_bid.do_not_bid {
            warn!(
                minimum_bid = %minimum_bid,
                max_bid = %max_bid.amount,
                "Platform minimum exceeds the ceiling"
            );
        }

        // Step 4 – scenarios
        let policy_fraction = self
            .recommendation
            .policy_fraction(forecast.expected_bidders, inputs.history.user_trailing_win_rate);
        let ctx = ScenarioContext {
            max_bid: max_bid.amount,
            minimum_bid,
            policy_fraction,
            market_value: f.market_value,
            total_costs,
            holding_months: f.holding_months,
            stats: &inputs.history,
            expected_bidders: forecast.expected_bidders,
        };
        let scenarios = self.scenarios.build(&ctx, &self.win_probability);

        // Step 5 – recommendation
        let best = self.recommendation.expected_value_optimal(&scenarios);
        let expected_value_optimal_label = optimal_label(best);
        let expected_value_optimal_bid = best.map(|s| s.bid_amount).unwrap_or(Decimal::ZERO);
        let recommended_bid = scenarios
            .iter()
            .find(|s| s.label == ScenarioLabel::Recommended)
            .map(|s| s.bid_amount)
            .unwrap_or(Decimal::ZERO);
        let platform_tactic = self.recommendation.tactic(&TacticInputs {
            platform: inputs.platform.platform_type,
            posture: inputs.risk.investor_posture,
            market_value: f.market_value,
            expected_bidders: forecast.expected_bidders,
            max_bid: max_bid.amount,
            minimum_bid,
            recommended_bid,
        });

        let break_even_bid = (f.market_value - total_costs).max(Decimal::ZERO);

        debug!(
            base_max_bid = %max_bid.base,
            adjustments = ?max_bid.applied,
            policy_fraction = %policy_fraction,
            "Pipeline complete"
        );
        info!(
            max_bid = %max_bid.amount,
            recommended = %recommended_bid,
            ev_optimal = %expected_value_optimal_bid,
            ev_label = %expected_value_optimal_label,
            bidders = forecast.expected_bidders,
            competition = %forecast.level,
            score = %attractiveness.score,
            tactic = platform_tactic.name(),
            do_not_bid = max_bid.do_not_bid,
            "Bid strategy evaluated"
        );

        BidStrategyResult {
            max_bid: max_bid.amount,
            base_max_bid: max_bid.base,
            risk_adjustments: max_bid.applied,
            recommended_bid,
            policy_fraction,
            expected_value_optimal_bid,
            expected_value_optimal_label,
            minimum_bid,
            minimum_exceeds_max_bid,
            break_even_bid,
            total_costs,
            cost_breakdown,
            attractiveness_score: attractiveness.score,
            attractiveness,
            expected_bidders: forecast.expected_bidders,
            competition_level: forecast.level,
            scenarios,
            platform_tactic,
            do_not_bid: max_bid.do_not_bid,
        }
    }

    /// Opening bid required by the platform, rounded up to whole cents.
    fn platform_minimum(&self, inputs: &BidInputs) -> Decimal {
        let amount = match inputs.platform.minimum_bid {
            MinimumBid::TaxDue => inputs.attributes.tax_due_amount,
            MinimumBid::Fixed(v) => v,
            MinimumBid::PercentOfMarketValue(p) => p * inputs.financials.market_value,
        };
        amount.round_dp_with_strategy(self.scenarios.config().money_dp, RoundingStrategy::AwayFromZero)
    }
}

impl Default for BidStrategyEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
