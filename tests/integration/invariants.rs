//! Whole-result invariants, sweeps and degenerate inputs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use bidstrat::strategy::win_probability::WinProbabilityEstimator;
use bidstrat::strategy::BidStrategyEngine;
use bidstrat::types::{BidStrategyResult, EvaluateBidRequest, FieldProblem, HistoricalAuctionStats, ScenarioTier};

use crate::fixtures::{evaluate, make_request, make_unknown_county_request, with_target_roi};

/// A spread of lots across postures, risks, markets and platforms.
fn make_grid() -> Vec<EvaluateBidRequest> {
    let mut grid = Vec::new();
    for posture in ["conservative", "neutral", "aggressive"] {
        for title in [dec!(40), dec!(69), dec!(95)] {
            for market in ["hot", "neutral", "cold"] {
                for platform in ["timedSoftClose", "liveAuctioneer", "sealedBid"] {
                    grid.push(EvaluateBidRequest {
                        investor_posture: Some(posture.into()),
                        title_risk_score: Some(title),
                        market_temperature: Some(market.into()),
                        platform_type: Some(platform.into()),
                        occupancy_risk: Some("high".into()),
                        ..make_request()
                    });
                }
            }
        }
    }
    grid.push(make_unknown_county_request());
    grid.push(EvaluateBidRequest {
        platform_minimum_bid_rule: Some("fixed".into()),
        platform_minimum_bid_value: Some(dec!(90000)),
        ..make_request()
    });
    grid
}

fn assert_invariants(r: &BidStrategyResult) {
    assert!(r.attractiveness_score >= dec!(1) && r.attractiveness_score <= dec!(10));
    assert!(r.max_bid >= Decimal::ZERO);
    assert!(r.recommended_bid <= r.max_bid);
    assert!(r.expected_value_optimal_bid <= r.max_bid);
    assert!(r.platform_tactic.proposed_bid() <= r.max_bid);
    for s in &r.scenarios {
        assert!(s.bid_amount <= r.max_bid, "{} above ceiling", s.label);
        assert!(s.win_probability >= dec!(0.05) && s.win_probability <= dec!(0.95));
        assert_eq!(s.total_investment, s.bid_amount + r.total_costs);
        assert_eq!(s.profit, dec!(180000) - s.total_investment);
        assert_eq!(s.expected_value, s.profit * s.win_probability);
        if !s.total_investment.is_zero() {
            assert_eq!(s.roi_pct, Some(s.profit / s.total_investment * dec!(100)));
        }
    }
}

#[test]
fn test_invariants_hold_across_grid() {
    for req in make_grid() {
        assert_invariants(&evaluate(&req));
    }
}

#[test]
fn test_identical_inputs_identical_outputs() {
    let engine = BidStrategyEngine::default();
    for req in make_grid() {
        let a = engine.evaluate(&req).unwrap();
        let b = engine.evaluate(&req).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }
}

#[test]
fn test_concurrent_evaluation_matches_sequential() {
    let engine = Arc::new(BidStrategyEngine::default());
    let req = make_request();
    let expected = engine.evaluate(&req).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let req = req.clone();
            std::thread::spawn(move || engine.evaluate(&req).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}

#[test]
fn test_higher_target_roi_strictly_lowers_ceiling() {
    let mut prev: Option<Decimal> = None;
    for step in 1..=15 {
        let roi = Decimal::from(step) / dec!(10);
        let r = evaluate(&with_target_roi(roi));
        if let Some(p) = prev {
            assert!(r.max_bid < p, "ceiling did not fall at roi {roi}");
        }
        prev = Some(r.max_bid);
    }
}

#[test]
fn test_win_probability_never_falls_as_bid_rises() {
    let r = evaluate(&make_request());
    let mut scenarios = r.scenarios.to_vec();
    scenarios.sort_by(|a, b| a.bid_amount.cmp(&b.bid_amount));
    for pair in scenarios.windows(2) {
        assert!(pair[1].win_probability >= pair[0].win_probability);
    }
}

#[test]
fn test_scenarios_always_in_fixed_order() {
    let r = evaluate(&make_request());
    let labels: Vec<String> = r.scenarios.iter().map(|s| s.label.to_string()).collect();
    assert_eq!(labels, ["minimum", "conservative", "recommended", "aggressive", "maximum"]);
}

#[test]
fn test_zero_market_value_falls_back_safely() {
    let req = EvaluateBidRequest {
        market_value: Some(Decimal::ZERO),
        value_tier: Some(Decimal::ZERO),
        repair_cost: Some(Decimal::ZERO),
        environmental_cost: Some(Decimal::ZERO),
        occupancy_cost: Some(Decimal::ZERO),
        title_insurance_cost: Some(Decimal::ZERO),
        holding_cost_per_month: Some(Decimal::ZERO),
        tax_due_amount: Some(Decimal::ZERO),
        ..make_request()
    };
    let r = evaluate(&req);
    assert!(r.do_not_bid);
    assert_eq!(r.total_costs, Decimal::ZERO);
    let stats = HistoricalAuctionStats {
        sample_size: 25,
        avg_win_ratio: dec!(0.35),
        ..HistoricalAuctionStats::empty()
    };
    assert_eq!(WinProbabilityEstimator::relative_position(dec!(1000), Decimal::ZERO, &stats), Decimal::ONE);
    for s in &r.scenarios {
        assert_eq!(s.total_investment, Decimal::ZERO);
        assert_eq!(s.roi_pct, None);
        assert_eq!(s.tier, ScenarioTier::Poor);
    }

    // Undefined ROI serializes as null rather than failing.
    let json = serde_json::to_value(&r).unwrap();
    assert!(json["scenarios"][0]["roiPct"].is_null());
    assert!(json["scenarios"][0]["annualizedRoiPct"].is_null());
}

#[test]
fn test_zero_sample_uses_default_bidders() {
    let r = evaluate(&make_unknown_county_request());
    assert_eq!(r.expected_bidders, 3);
    assert!(!r.do_not_bid);
}

#[test]
fn test_zero_win_ratio_with_sample_is_neutral() {
    let r = evaluate(&EvaluateBidRequest {
        historical_avg_win_ratio: Some(Decimal::ZERO),
        ..make_request()
    });
    // diff 1.00 → 0.65, × 0.75 for 8 bidders
    assert!(r.scenarios.iter().all(|s| s.win_probability == dec!(0.4875)));
}

#[test]
fn test_validation_lists_every_offending_field() {
    let req = EvaluateBidRequest {
        market_value: Some(dec!(-5)),
        holding_months: None,
        title_risk_score: Some(dec!(101)),
        property_type: Some("castle".into()),
        sale_month: Some(dec!(0)),
        historical_sample_size: Some(dec!(3.5)),
        ..make_request()
    };
    let err = BidStrategyEngine::default().evaluate(&req).unwrap_err();
    for field in [
        "marketValue",
        "holdingMonths",
        "titleRiskScore",
        "propertyType",
        "saleMonth",
        "historicalSampleSize",
    ] {
        assert!(err.mentions(field), "{field} not reported");
    }
    assert_eq!(err.issues.len(), 6);
    assert!(err
        .issues
        .iter()
        .any(|i| matches!(i.problem, FieldProblem::UnknownVariant { .. })));
    assert!(err.to_string().contains("6 issue(s)"));
}

#[test]
fn test_oversized_costs_rejected_not_overflowed() {
    let huge = Decimal::MAX / dec!(2);
    let req = EvaluateBidRequest {
        repair_cost: Some(huge),
        occupancy_cost: Some(huge),
        ..make_request()
    };
    let err = BidStrategyEngine::default().evaluate(&req).unwrap_err();
    assert_eq!(err.issues.len(), 2);
    assert!(err.mentions("repairCost"));
    assert!(err.mentions("occupancyCost"));
    assert!(err
        .issues
        .iter()
        .all(|i| matches!(i.problem, FieldProblem::OutOfRange { .. })));
}

#[test]
fn test_largest_accepted_lot_evaluates() {
    let cap = dec!(1000000000000);
    let req = EvaluateBidRequest {
        market_value: Some(cap),
        value_tier: Some(cap),
        repair_cost: Some(cap),
        environmental_cost: Some(cap),
        occupancy_cost: Some(cap),
        title_insurance_cost: Some(cap),
        holding_cost_per_month: Some(cap),
        holding_months: Some(dec!(1200)),
        tax_due_amount: Some(cap),
        target_roi_pct: Some(dec!(100)),
        ..make_request()
    };
    let r = evaluate(&req);
    assert!(r.do_not_bid);
    assert_eq!(r.scenarios.len(), 5);
}

#[test]
fn test_request_round_trips_from_json() {
    let json = serde_json::to_string(&make_request()).unwrap();
    let req: EvaluateBidRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(evaluate(&req), evaluate(&make_request()));
}
