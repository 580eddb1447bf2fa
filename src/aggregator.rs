//! Input aggregation and validation.
//!
//! Turns a raw `EvaluateBidRequest` into a typed `BidInputs` snapshot.
//! Every field is checked before anything is rejected, so the caller gets
//! the complete list of problems in one `ValidationError`.

use chrono::Month;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::types::{
    BidInputs, Choice, EvaluateBidRequest, FieldIssue, FieldProblem, HistoricalAuctionStats,
    InvestorPosture, LocationRating, MarketConditions, MarketTemperature, MinimumBid,
    MinimumBidRule, OccupancyRisk, PlatformRules, PlatformType, PropertyAttributes,
    PropertyFinancials, PropertyType, RiskProfile, ValidationError,
};

/// Defaults applied to optional request fields.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub default_target_roi: Decimal,
    /// Added to the 1–10 environmental risk score to derive the 1–10
    /// environmental (cleanliness) score used for attractiveness.
    pub environmental_score_pivot: Decimal,
    /// Upper limit for every money amount.
    pub max_amount: Decimal,
    pub max_holding_months: Decimal,
    /// Upper limit for the target ROI fraction.
    pub max_target_roi: Decimal,
    pub max_avg_bidders: Decimal,
    /// Upper limit for a winning-bid to market-value ratio.
    pub max_win_ratio: Decimal,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            default_target_roi: dec!(0.50),
            environmental_score_pivot: dec!(11),
            max_amount: dec!(1000000000000),
            max_holding_months: dec!(1200),
            max_target_roi: dec!(100),
            max_avg_bidders: dec!(10000),
            max_win_ratio: dec!(10),
        }
    }
}

pub struct InputAggregator {
    config: AggregatorConfig,
}

impl InputAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Validate and normalize a request.
    pub fn aggregate(&self, req: &EvaluateBidRequest) -> Result<BidInputs, ValidationError> {
        let mut v = Checker::default();
        let c = &self.config;
        let cap = c.max_amount;

        let financials = PropertyFinancials {
            market_value: v.capped("marketValue", req.market_value, cap),
            repair_cost: v.capped("repairCost", req.repair_cost, cap),
            environmental_cost: v.capped("environmentalCost", req.environmental_cost, cap),
            occupancy_cost: v.capped("occupancyCost", req.occupancy_cost, cap),
            title_insurance_cost: v.capped("titleInsuranceCost", req.title_insurance_cost, cap),
            transaction_cost_pct: v.ranged("transactionCostPct", req.transaction_cost_pct, Decimal::ZERO, Decimal::ONE),
            holding_cost_per_month: v.capped("holdingCostPerMonth", req.holding_cost_per_month, cap),
            holding_months: v.capped("holdingMonths", req.holding_months, c.max_holding_months),
        };

        let target_roi = v
            .optional_capped("targetRoiPct", req.target_roi_pct, c.max_target_roi)
            .unwrap_or(c.default_target_roi);

        let risk = RiskProfile {
            title_risk_score: v.ranged("titleRiskScore", req.title_risk_score, dec!(0), dec!(100)),
            condition_score: v.ranged("conditionScore", req.condition_score, dec!(1), dec!(10)),
            environmental_risk_score: v.ranged(
                "environmentalRiskScore",
                req.environmental_risk_score,
                dec!(1),
                dec!(10),
            ),
            occupancy_risk: v.choice::<OccupancyRisk>("occupancyRisk", &req.occupancy_risk),
            investor_posture: v.choice::<InvestorPosture>("investorPosture", &req.investor_posture),
        };

        let attributes = PropertyAttributes {
            value_tier: v.capped("valueTier", req.value_tier, cap),
            property_type: v.choice::<PropertyType>("propertyType", &req.property_type),
            condition_score: risk.condition_score,
            title_status_score: risk.title_risk_score,
            location_rating: v.choice::<LocationRating>("locationRating", &req.location_rating),
            tax_due_amount: v.capped("taxDueAmount", req.tax_due_amount, cap),
            environmental_score: self.config.environmental_score_pivot - risk.environmental_risk_score,
        };

        let history = self.history(&mut v, req);

        let market = MarketConditions {
            temperature: v.choice::<MarketTemperature>("marketTemperature", &req.market_temperature),
            sale_month: v.month("saleMonth", req.sale_month),
        };

        let platform_type = v.choice::<PlatformType>("platformType", &req.platform_type);
        let rule = v.choice::<MinimumBidRule>("platformMinimumBidRule", &req.platform_minimum_bid_rule);
        let minimum_bid = match rule {
            MinimumBidRule::TaxDue => MinimumBid::TaxDue,
            MinimumBidRule::Fixed => {
                MinimumBid::Fixed(v.capped("platformMinimumBidValue", req.platform_minimum_bid_value, cap))
            }
            MinimumBidRule::PercentOfMarketValue => MinimumBid::PercentOfMarketValue(v.ranged(
                "platformMinimumBidValue",
                req.platform_minimum_bid_value,
                Decimal::ZERO,
                Decimal::ONE,
            )),
        };

        if !v.issues.is_empty() {
            debug!(issues = v.issues.len(), "Request rejected");
            return Err(ValidationError { issues: v.issues });
        }

        Ok(BidInputs {
            financials,
            risk,
            attributes,
            history,
            market,
            platform: PlatformRules {
                platform_type,
                minimum_bid,
            },
            target_roi,
        })
    }

    fn history(&self, v: &mut Checker, req: &EvaluateBidRequest) -> HistoricalAuctionStats {
        let sample_size = match req.historical_sample_size {
            Some(_) => v.whole("historicalSampleSize", req.historical_sample_size, 0, u32::MAX),
            None => 0,
        };
        let c = &self.config;
        let (avg_bidders, avg_win_ratio) = if sample_size > 0 {
            (
                v.capped("historicalAvgBidders", req.historical_avg_bidders, c.max_avg_bidders),
                v.capped("historicalAvgWinRatio", req.historical_avg_win_ratio, c.max_win_ratio),
            )
        } else {
            (
                v.optional_capped("historicalAvgBidders", req.historical_avg_bidders, c.max_avg_bidders)
                    .unwrap_or(Decimal::ZERO),
                v.optional_capped("historicalAvgWinRatio", req.historical_avg_win_ratio, c.max_win_ratio)
                    .unwrap_or(Decimal::ZERO),
            )
        };

        HistoricalAuctionStats {
            avg_bidders,
            stddev_bidders: v
                .optional_non_negative("historicalStddevBidders", req.historical_stddev_bidders)
                .unwrap_or(Decimal::ZERO),
            sample_size,
            avg_win_ratio,
            stddev_win_ratio: v
                .optional_non_negative("historicalStddevWinRatio", req.historical_stddev_win_ratio)
                .unwrap_or(Decimal::ZERO),
            user_trailing_win_rate: req
                .user_trailing_win_rate
                .map(|r| v.ranged("userTrailingWinRate", Some(r), Decimal::ZERO, Decimal::ONE)),
        }
    }
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new(AggregatorConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Field checker
// ---------------------------------------------------------------------------

/// Accumulates issues. Checks return a placeholder for bad fields; the
/// placeholder never escapes because any issue fails the whole request.
#[derive(Default)]
struct Checker {
    issues: Vec<FieldIssue>,
}

impl Checker {
    fn flag(&mut self, field: &'static str, problem: FieldProblem) {
        self.issues.push(FieldIssue { field, problem });
    }

    fn non_negative(&mut self, field: &'static str, value: Option<Decimal>) -> Decimal {
        match value {
            None => {
                self.flag(field, FieldProblem::Missing);
                Decimal::ZERO
            }
            Some(x) if x.is_sign_negative() && !x.is_zero() => {
                self.flag(field, FieldProblem::Negative);
                Decimal::ZERO
            }
            Some(x) => x,
        }
    }

    fn optional_non_negative(&mut self, field: &'static str, value: Option<Decimal>) -> Option<Decimal> {
        value.map(|x| self.non_negative(field, Some(x)))
    }

    /// Non-negative and at most `max`.
    fn capped(&mut self, field: &'static str, value: Option<Decimal>, max: Decimal) -> Decimal {
        let x = self.non_negative(field, value);
        if x > max {
            self.flag(
                field,
                FieldProblem::OutOfRange {
                    min: Decimal::ZERO.to_string(),
                    max: max.to_string(),
                },
            );
            return Decimal::ZERO;
        }
        x
    }

    fn optional_capped(&mut self, field: &'static str, value: Option<Decimal>, max: Decimal) -> Option<Decimal> {
        value.map(|x| self.capped(field, Some(x), max))
    }

    fn ranged(&mut self, field: &'static str, value: Option<Decimal>, min: Decimal, max: Decimal) -> Decimal {
        match value {
            None => {
                self.flag(field, FieldProblem::Missing);
                min
            }
            Some(x) if x < min || x > max => {
                self.flag(
                    field,
                    FieldProblem::OutOfRange {
                        min: min.to_string(),
                        max: max.to_string(),
                    },
                );
                min
            }
            Some(x) => x,
        }
    }

    fn whole(&mut self, field: &'static str, value: Option<Decimal>, min: u32, max: u32) -> u32 {
        let x = self.ranged(field, value, Decimal::from(min), Decimal::from(max));
        if !x.fract().is_zero() {
            self.flag(field, FieldProblem::NotInteger);
            return min;
        }
        x.to_u32().unwrap_or(min)
    }

    fn month(&mut self, field: &'static str, value: Option<Decimal>) -> Month {
        let m = self.whole(field, value, 1, 12);
        u8::try_from(m)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .unwrap_or(Month::January)
    }

    fn choice<T: Choice>(&mut self, field: &'static str, value: &Option<String>) -> T {
        match value.as_deref().map(|raw| (raw, T::parse_choice(raw))) {
            None => {
                self.flag(field, FieldProblem::Missing);
                T::ALL[0]
            }
            Some((raw, None)) => {
                self.flag(
                    field,
                    FieldProblem::UnknownVariant {
                        value: raw.to_string(),
                        allowed: T::allowed(),
                    },
                );
                T::ALL[0]
            }
            Some((_, Some(choice))) => choice,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
