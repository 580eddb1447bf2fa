//! Reference lots and decision boundaries.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bidstrat::history::{trailing_win_rate, AuctionRecord, UserBidRecord};
use bidstrat::strategy::max_bid::MaxBidCalculator;
use bidstrat::types::{
    CompetitionLevel, EvaluateBidRequest, HistoricalAuctionStats, PlatformTactic, ScenarioLabel, ScenarioTier,
};
use chrono::NaiveDate;

use crate::fixtures::{evaluate, make_request, make_unknown_county_request};

#[test]
fn test_scenario_a_ceiling_and_verification() {
    // Transaction costs of 8,000 carried as a flat amount inside repairs.
    let req = EvaluateBidRequest {
        repair_cost: Some(dec!(48000)),
        transaction_cost_pct: Some(Decimal::ZERO),
        target_roi_pct: Some(dec!(0.50)),
        ..make_request()
    };
    let r = evaluate(&req);
    assert_eq!(r.total_costs, dec!(61700));
    assert_eq!(r.max_bid, dec!(58300));
    assert_eq!(MaxBidCalculator::base_max_bid(dec!(180000), dec!(61700), dec!(0.50)), dec!(58300));

    let max = r.scenario(ScenarioLabel::Maximum);
    assert_eq!(max.bid_amount, dec!(58300));
    assert_eq!(max.total_investment, dec!(120000));
    assert_eq!(max.profit, dec!(60000));
    assert_eq!(max.roi_pct, Some(dec!(50)));
}

#[test]
fn test_scenario_b_competition_rounds_after_attractiveness() {
    // Score 8.0: 5 + value 1 + single-family 1.5 + title 0.5.
    let req = EvaluateBidRequest {
        condition_score: Some(dec!(5)),
        title_risk_score: Some(dec!(80)),
        location_rating: Some("fair".into()),
        tax_due_amount: Some(dec!(15000)),
        ..make_request()
    };
    let r = evaluate(&req);
    assert_eq!(r.attractiveness_score, dec!(8.0));
    // 4 × 8 / 5 = 6.4 → 6
    assert_eq!(r.expected_bidders, 6);
    assert_eq!(r.competition_level, CompetitionLevel::High);
    assert_eq!(r.policy_fraction, dec!(0.85));

    // Hot market applies to the rounded 6, not to 6.4.
    let hot = evaluate(&EvaluateBidRequest {
        market_temperature: Some("hot".into()),
        ..req
    });
    // 6 × 1.4 = 8.4 → 8
    assert_eq!(hot.expected_bidders, 8);
    assert_eq!(hot.competition_level, CompetitionLevel::VeryHigh);
}

#[test]
fn test_scenario_c_neutral_position_with_three_bidders() {
    let r = evaluate(&make_unknown_county_request());
    assert_eq!(r.attractiveness_score, dec!(5.0));
    assert_eq!(r.expected_bidders, 3);
    for s in &r.scenarios {
        assert_eq!(s.win_probability, dec!(0.65), "{}", s.label);
    }
}

#[test]
fn test_title_boundary() {
    let at = |score| {
        evaluate(&EvaluateBidRequest {
            title_risk_score: Some(score),
            ..make_request()
        })
    };
    let discounted = at(dec!(69));
    assert_eq!(discounted.max_bid, dec!(51570));
    assert_eq!(discounted.risk_adjustments, vec!["title<70 x0.90"]);

    let clean = at(dec!(70));
    assert_eq!(clean.max_bid, dec!(57300));
    assert!(clean.risk_adjustments.is_empty());
}

#[test]
fn test_competition_level_boundary() {
    let moderate = evaluate(&make_unknown_county_request());
    assert_eq!(moderate.expected_bidders, 3);
    assert_eq!(moderate.competition_level, CompetitionLevel::Moderate);

    // 3 × 0.6 = 1.8 → 2
    let low = evaluate(&EvaluateBidRequest {
        market_temperature: Some("cold".into()),
        ..make_unknown_county_request()
    });
    assert_eq!(low.expected_bidders, 2);
    assert_eq!(low.competition_level, CompetitionLevel::Low);
    assert_eq!(low.policy_fraction, dec!(0.60));
}

#[test]
fn test_winter_sale_and_tax_barrier_thin_the_field() {
    let r = evaluate(&EvaluateBidRequest {
        sale_month: Some(dec!(12)),
        tax_due_amount: Some(dec!(35000)),
        ..make_request()
    });
    // High tax due also costs a point of attractiveness: 9.5 → 8.5.
    assert_eq!(r.attractiveness_score, dec!(8.5));
    // 4 × 8.5 / 5 = 6.8 → 7, then 7 × 0.85 × 0.70 = 4.165 → 4
    assert_eq!(r.expected_bidders, 4);
    assert_eq!(r.competition_level, CompetitionLevel::Moderate);
    assert_eq!(r.minimum_bid, dec!(35000));
}

#[test]
fn test_losing_streak_raises_policy_bid() {
    let r = evaluate(&EvaluateBidRequest {
        user_trailing_win_rate: Some(dec!(0.10)),
        ..make_request()
    });
    // 0.90 × 1.10
    assert_eq!(r.policy_fraction, dec!(0.99));
    assert_eq!(r.recommended_bid, dec!(56727));
    assert!(r.recommended_bid <= r.max_bid);
}

#[test]
fn test_posture_moves_the_ceiling() {
    let at = |posture: &str| {
        evaluate(&EvaluateBidRequest {
            investor_posture: Some(posture.into()),
            ..make_request()
        })
        .max_bid
    };
    assert_eq!(at("conservative"), dec!(48705));
    assert_eq!(at("neutral"), dec!(57300));
    assert_eq!(at("aggressive"), dec!(60165));
}

#[test]
fn test_live_auction_jump_bid() {
    let r = evaluate(&EvaluateBidRequest {
        platform_type: Some("liveAuctioneer".into()),
        ..make_request()
    });
    match r.platform_tactic {
        PlatformTactic::JumpBid {
            jump_bid,
            min_increments_skipped,
            max_increments_skipped,
            ceiling,
        } => {
            assert_eq!(jump_bid, dec!(40110));
            assert_eq!((min_increments_skipped, max_increments_skipped), (3, 5));
            assert_eq!(ceiling, dec!(57300));
        }
        other => panic!("unexpected tactic {other:?}"),
    }
}

#[test]
fn test_sealed_bid_must_win_capped_at_ceiling() {
    let r = evaluate(&EvaluateBidRequest {
        platform_type: Some("sealedBid".into()),
        investor_posture: Some("aggressive".into()),
        ..make_request()
    });
    match r.platform_tactic {
        PlatformTactic::SealedBid {
            base_bid,
            posture_factor,
            sealed_bid,
            ceiling,
        } => {
            // 180000 × (1 − 1/8)
            assert_eq!(base_bid, dec!(157500));
            assert_eq!(posture_factor, dec!(1.20));
            assert_eq!(sealed_bid, ceiling);
        }
        other => panic!("unexpected tactic {other:?}"),
    }
}

#[test]
fn test_unprofitable_lot_still_reports_all_scenarios() {
    let r = evaluate(&EvaluateBidRequest {
        market_value: Some(dec!(60000)),
        value_tier: Some(dec!(60000)),
        ..make_request()
    });
    assert!(r.do_not_bid);
    assert_eq!(r.max_bid, Decimal::ZERO);
    assert_eq!(r.scenarios.len(), 5);
    for s in &r.scenarios {
        assert_eq!(s.bid_amount, Decimal::ZERO);
        assert_eq!(s.tier, ScenarioTier::Poor);
    }
    assert!(r.to_string().starts_with("DO NOT BID"));
}

#[test]
fn test_history_helpers_feed_the_request() {
    let records: Vec<AuctionRecord> = (0..25)
        .map(|i| AuctionRecord {
            sale_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            bidders: if i % 2 == 0 { 3 } else { 5 },
            market_value: dec!(100000),
            winning_bid: Some(dec!(35000)),
        })
        .collect();
    let stats = HistoricalAuctionStats::from_records(&records);
    let bids = vec![
        UserBidRecord {
            bid_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            won: false,
        },
        UserBidRecord {
            bid_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            won: false,
        },
    ];
    let rate = trailing_win_rate(&bids, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(), 6);

    let req = EvaluateBidRequest {
        historical_avg_bidders: Some(stats.avg_bidders),
        historical_stddev_bidders: Some(stats.stddev_bidders),
        historical_sample_size: Some(Decimal::from(stats.sample_size)),
        historical_avg_win_ratio: Some(stats.avg_win_ratio),
        historical_stddev_win_ratio: Some(stats.stddev_win_ratio),
        user_trailing_win_rate: rate,
        ..make_request()
    };
    let r = evaluate(&req);
    // 13 × 3 + 12 × 5 = 99 → 3.96 average bidders
    assert_eq!(stats.avg_bidders, dec!(3.96));
    assert_eq!(stats.avg_win_ratio, dec!(0.35));
    assert_eq!(rate, Some(Decimal::ZERO));
    // 3.96 × 9.5 / 5 = 7.524 → 8
    assert_eq!(r.expected_bidders, 8);
    // 0.90 × 1.10 for a cold streak
    assert_eq!(r.policy_fraction, dec!(0.99));
}
