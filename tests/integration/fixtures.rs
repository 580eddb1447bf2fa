//! Request builders shared by the integration tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bidstrat::strategy::BidStrategyEngine;
use bidstrat::types::{BidStrategyResult, EvaluateBidRequest};

/// Reference lot: costs 62,700, ceiling 57,300 at the default 50% target,
/// 25 comparable sales averaging 4 bidders at 35% of market value.
pub fn make_request() -> EvaluateBidRequest {
    EvaluateBidRequest {
        market_value: Some(dec!(180000)),
        repair_cost: Some(dec!(40000)),
        environmental_cost: Some(dec!(5000)),
        occupancy_cost: Some(dec!(4500)),
        transaction_cost_pct: Some(dec!(0.05)),
        holding_cost_per_month: Some(dec!(500)),
        holding_months: Some(dec!(6)),
        title_insurance_cost: Some(dec!(1200)),
        target_roi_pct: None,
        title_risk_score: Some(dec!(85)),
        condition_score: Some(dec!(6)),
        environmental_risk_score: Some(dec!(3)),
        occupancy_risk: Some("low".into()),
        investor_posture: Some("neutral".into()),
        value_tier: Some(dec!(180000)),
        property_type: Some("single-family".into()),
        location_rating: Some("good".into()),
        tax_due_amount: Some(dec!(12000)),
        historical_avg_bidders: Some(dec!(4)),
        historical_stddev_bidders: Some(dec!(1.2)),
        historical_sample_size: Some(dec!(25)),
        historical_avg_win_ratio: Some(dec!(0.35)),
        historical_stddev_win_ratio: Some(dec!(0.05)),
        user_trailing_win_rate: None,
        market_temperature: Some("neutral".into()),
        sale_month: Some(dec!(10)),
        platform_type: Some("timedSoftClose".into()),
        platform_minimum_bid_rule: Some("taxDue".into()),
        platform_minimum_bid_value: None,
    }
}

/// Lot with no auction history and an attractiveness score of exactly 5.
pub fn make_unknown_county_request() -> EvaluateBidRequest {
    EvaluateBidRequest {
        value_tier: Some(dec!(75000)),
        property_type: Some("commercial".into()),
        condition_score: Some(dec!(6)),
        title_risk_score: Some(dec!(60)),
        location_rating: Some("fair".into()),
        tax_due_amount: Some(dec!(15000)),
        historical_avg_bidders: None,
        historical_stddev_bidders: None,
        historical_sample_size: Some(dec!(0)),
        historical_avg_win_ratio: None,
        historical_stddev_win_ratio: None,
        ..make_request()
    }
}

pub fn evaluate(req: &EvaluateBidRequest) -> BidStrategyResult {
    BidStrategyEngine::default()
        .evaluate(req)
        .expect("request should validate")
}

pub fn with_target_roi(roi: Decimal) -> EvaluateBidRequest {
    EvaluateBidRequest {
        target_roi_pct: Some(roi),
        ..make_request()
    }
}
