//! Historical auction statistics.
//!
//! Builds the `HistoricalAuctionStats` snapshot from raw past-auction
//! records, and the investor's trailing win rate from their own bid log.
//! Callers run these before evaluation; the engine itself only ever sees
//! the aggregated numbers.

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::HistoricalAuctionStats;

/// Decimal places kept on averages and standard deviations.
const STAT_DP: u32 = 4;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One past auction on the same platform / county.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionRecord {
    pub sale_date: NaiveDate,
    pub bidders: u32,
    pub market_value: Decimal,
    /// `None` when the lot went unsold.
    pub winning_bid: Option<Decimal>,
}

impl AuctionRecord {
    /// Winning bid as a fraction of market value, for sold lots only.
    pub fn win_ratio(&self) -> Option<Decimal> {
        match self.winning_bid {
            Some(bid) if self.market_value > Decimal::ZERO => Some(bid / self.market_value),
            _ => None,
        }
    }
}

/// One bid the investor placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBidRecord {
    pub bid_date: NaiveDate,
    pub won: bool,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

impl HistoricalAuctionStats {
    /// Aggregate raw records. Bidder statistics cover every record; win
    /// ratios only cover sold lots with a positive market value.
    pub fn from_records(records: &[AuctionRecord]) -> Self {
        if records.is_empty() {
            return Self::empty();
        }
        let bidders: Vec<Decimal> = records.iter().map(|r| Decimal::from(r.bidders)).collect();
        let ratios: Vec<Decimal> = records.iter().filter_map(AuctionRecord::win_ratio).collect();

        Self {
            avg_bidders: mean(&bidders),
            stddev_bidders: sample_stddev(&bidders),
            sample_size: u32::try_from(records.len()).unwrap_or(u32::MAX),
            avg_win_ratio: mean(&ratios),
            stddev_win_ratio: sample_stddev(&ratios),
            user_trailing_win_rate: None,
        }
    }
}

/// Fraction of bids won in the `months` calendar months up to and
/// including `as_of`. `None` when no bid falls in the window.
pub fn trailing_win_rate(bids: &[UserBidRecord], as_of: NaiveDate, months: u32) -> Option<Decimal> {
    let start = as_of.checked_sub_months(Months::new(months))?;
    let (total, won) = bids
        .iter()
        .filter(|b| b.bid_date >= start && b.bid_date <= as_of)
        .fold((0u32, 0u32), |(total, won), b| (total + 1, won + u32::from(b.won)));
    if total == 0 {
        return None;
    }
    Some((Decimal::from(won) / Decimal::from(total)).round_dp(STAT_DP))
}

fn mean(xs: &[Decimal]) -> Decimal {
    if xs.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = xs.iter().sum();
    (sum / Decimal::from(xs.len())).round_dp(STAT_DP)
}

/// Sample (n − 1) standard deviation; zero below two observations.
fn sample_stddev(xs: &[Decimal]) -> Decimal {
    if xs.len() < 2 {
        return Decimal::ZERO;
    }
    let sum: Decimal = xs.iter().sum();
    let m = sum / Decimal::from(xs.len());
    let ss: Decimal = xs.iter().map(|x| (*x - m) * (*x - m)).sum();
    let variance = ss / Decimal::from(xs.len() - 1);
    variance.sqrt().unwrap_or(Decimal::ZERO).round_dp(STAT_DP)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
