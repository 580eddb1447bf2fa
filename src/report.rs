//! Result report files.
//!
//! Saves and loads a `BidStrategyResult` as pretty JSON so a recommendation
//! can be archived next to the lot it was computed for.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::types::BidStrategyResult;

/// Write a result as pretty JSON, creating parent directories as needed.
pub fn save_result(result: &BidStrategyResult, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(result).context("Failed to serialise bid strategy result")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }
    std::fs::write(path, &json).with_context(|| format!("Failed to write report to {}", path.display()))?;

    debug!(path = %path.display(), max_bid = %result.max_bid, "Report saved");
    Ok(())
}

/// Load a previously saved result.
pub fn load_result(path: impl AsRef<Path>) -> Result<BidStrategyResult> {
    let path = path.as_ref();
    let json =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read report from {}", path.display()))?;
    let result: BidStrategyResult =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse report from {}", path.display()))?;

    info!(
        path = %path.display(),
        max_bid = %result.max_bid,
        do_not_bid = result.do_not_bid,
        "Report loaded"
    );
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::BidStrategyEngine;
    use crate::types::EvaluateBidRequest;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("bidstrat_test_{}", uuid::Uuid::new_v4()))
            .join("report.json")
    }

    fn make_result() -> BidStrategyResult {
        let req = EvaluateBidRequest {
            market_value: Some(dec!(180000)),
            repair_cost: Some(dec!(40000)),
            environmental_cost: Some(dec!(5000)),
            occupancy_cost: Some(dec!(4500)),
            transaction_cost_pct: Some(dec!(0.05)),
            holding_cost_per_month: Some(dec!(500)),
            holding_months: Some(dec!(6)),
            title_insurance_cost: Some(dec!(1200)),
            title_risk_score: Some(dec!(85)),
            condition_score: Some(dec!(6)),
            environmental_risk_score: Some(dec!(3)),
            occupancy_risk: Some("low".into()),
            investor_posture: Some("neutral".into()),
            value_tier: Some(dec!(180000)),
            property_type: Some("singleFamily".into()),
            location_rating: Some("good".into()),
            tax_due_amount: Some(dec!(12000)),
            market_temperature: Some("neutral".into()),
            sale_month: Some(dec!(10)),
            platform_type: Some("liveAuctioneer".into()),
            platform_minimum_bid_rule: Some("taxDue".into()),
            ..EvaluateBidRequest::default()
        };
        BidStrategyEngine::default().evaluate(&req).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path();
        let result = make_result();
        save_result(&result, &path).unwrap();

        let loaded = load_result(&path).unwrap();
        assert_eq!(loaded.max_bid, result.max_bid);
        assert_eq!(loaded.scenarios.len(), 5);
        assert_eq!(loaded.platform_tactic.name(), "jump bid");
        assert_eq!(loaded.competition_level, result.competition_level);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_report_is_pretty_camel_case_json() {
        let path = temp_path();
        save_result(&make_result(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"maxBid\""));
        assert!(text.contains("\"expectedValueOptimalBid\""));
        assert!(text.contains("\"tactic\": \"jumpBid\""));
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_load_nonexistent() {
        assert!(load_result(temp_path()).is_err());
    }
}
