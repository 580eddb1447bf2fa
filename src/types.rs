//! Shared types for the BIDSTRAT engine.
//!
//! The raw request, the validated input snapshot, the enums used across
//! every pipeline stage, and the serializable result. Strategy modules
//! depend on these types and never on each other's internals.

use chrono::Month;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::strategy::attractiveness::AttractivenessBreakdown;

// ---------------------------------------------------------------------------
// Choice enums
// ---------------------------------------------------------------------------

/// A closed set of string-valued options accepted on the request.
///
/// Parsing ignores case and separators, so `single-family`,
/// `single_family` and `singleFamily` all resolve to the same variant.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Canonical wire name.
    fn as_str(self) -> &'static str;

    fn parse_choice(raw: &str) -> Option<Self> {
        let wanted = normalize(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|c| normalize(c.as_str()) == wanted)
    }

    /// Canonical names of every variant, for error messages.
    fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Occupancy risk as assessed by the occupancy-cost collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OccupancyRisk {
    Low,
    Moderate,
    High,
}

impl Choice for OccupancyRisk {
    const ALL: &'static [Self] = &[Self::Low, Self::Moderate, Self::High];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// How hard the investor is willing to push toward the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvestorPosture {
    Conservative,
    Neutral,
    Aggressive,
}

impl Choice for InvestorPosture {
    const ALL: &'static [Self] = &[Self::Conservative, Self::Neutral, Self::Aggressive];

    fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Neutral => "neutral",
            Self::Aggressive => "aggressive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    SingleFamily,
    MultiFamily,
    Condo,
    Commercial,
    Land,
}

impl Choice for PropertyType {
    const ALL: &'static [Self] = &[
        Self::SingleFamily,
        Self::MultiFamily,
        Self::Condo,
        Self::Commercial,
        Self::Land,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::SingleFamily => "singleFamily",
            Self::MultiFamily => "multiFamily",
            Self::Condo => "condo",
            Self::Commercial => "commercial",
            Self::Land => "land",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Choice for LocationRating {
    const ALL: &'static [Self] = &[Self::Excellent, Self::Good, Self::Fair, Self::Poor];

    fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// Local real-estate market temperature from the market feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarketTemperature {
    Hot,
    Neutral,
    Cold,
}

impl Choice for MarketTemperature {
    const ALL: &'static [Self] = &[Self::Hot, Self::Neutral, Self::Cold];

    fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Neutral => "neutral",
            Self::Cold => "cold",
        }
    }
}

/// Auction format of the sale platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformType {
    TimedSoftClose,
    LiveAuctioneer,
    SealedBid,
}

impl Choice for PlatformType {
    const ALL: &'static [Self] = &[Self::TimedSoftClose, Self::LiveAuctioneer, Self::SealedBid];

    fn as_str(self) -> &'static str {
        match self {
            Self::TimedSoftClose => "timedSoftClose",
            Self::LiveAuctioneer => "liveAuctioneer",
            Self::SealedBid => "sealedBid",
        }
    }
}

/// How the platform sets its opening (minimum) bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MinimumBidRule {
    /// Opening bid equals the delinquent taxes due.
    TaxDue,
    /// A flat dollar amount.
    Fixed,
    /// A fraction of market value.
    PercentOfMarketValue,
}

impl Choice for MinimumBidRule {
    const ALL: &'static [Self] = &[Self::TaxDue, Self::Fixed, Self::PercentOfMarketValue];

    fn as_str(self) -> &'static str {
        match self {
            Self::TaxDue => "taxDue",
            Self::Fixed => "fixed",
            Self::PercentOfMarketValue => "percentOfMarketValue",
        }
    }
}

impl MinimumBidRule {
    /// Whether the rule needs `platformMinimumBidValue`.
    pub fn needs_value(self) -> bool {
        !matches!(self, Self::TaxDue)
    }
}

macro_rules! display_via_choice {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_via_choice!(
    OccupancyRisk,
    InvestorPosture,
    PropertyType,
    LocationRating,
    MarketTemperature,
    PlatformType,
    MinimumBidRule,
);

/// Predicted competition tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompetitionLevel::VeryLow => write!(f, "Very Low"),
            CompetitionLevel::Low => write!(f, "Low"),
            CompetitionLevel::Moderate => write!(f, "Moderate"),
            CompetitionLevel::High => write!(f, "High"),
            CompetitionLevel::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Quality rating of a bid scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioTier {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl fmt::Display for ScenarioTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioTier::Excellent => write!(f, "EXCELLENT"),
            ScenarioTier::Good => write!(f, "GOOD"),
            ScenarioTier::Acceptable => write!(f, "ACCEPTABLE"),
            ScenarioTier::Poor => write!(f, "POOR"),
        }
    }
}

/// The five bid levels, in the order they are always reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioLabel {
    Minimum,
    Conservative,
    Recommended,
    Aggressive,
    Maximum,
}

impl ScenarioLabel {
    pub const ALL: [ScenarioLabel; 5] = [
        ScenarioLabel::Minimum,
        ScenarioLabel::Conservative,
        ScenarioLabel::Recommended,
        ScenarioLabel::Aggressive,
        ScenarioLabel::Maximum,
    ];
}

impl fmt::Display for ScenarioLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioLabel::Minimum => write!(f, "minimum"),
            ScenarioLabel::Conservative => write!(f, "conservative"),
            ScenarioLabel::Recommended => write!(f, "recommended"),
            ScenarioLabel::Aggressive => write!(f, "aggressive"),
            ScenarioLabel::Maximum => write!(f, "maximum"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Raw evaluation request as supplied by the caller.
///
/// Every field is optional at this layer so that the input aggregator can
/// report all missing fields at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluateBidRequest {
    pub market_value: Option<Decimal>,
    pub repair_cost: Option<Decimal>,
    pub environmental_cost: Option<Decimal>,
    pub occupancy_cost: Option<Decimal>,
    /// Resale closing costs as a fraction of market value.
    pub transaction_cost_pct: Option<Decimal>,
    pub holding_cost_per_month: Option<Decimal>,
    pub holding_months: Option<Decimal>,
    pub title_insurance_cost: Option<Decimal>,
    /// Target ROI as a fraction (0.50 = 50%). Defaults from config.
    pub target_roi_pct: Option<Decimal>,

    pub title_risk_score: Option<Decimal>,
    pub condition_score: Option<Decimal>,
    pub environmental_risk_score: Option<Decimal>,
    pub occupancy_risk: Option<String>,
    pub investor_posture: Option<String>,

    /// Dollar value used for value-tier bucketing.
    pub value_tier: Option<Decimal>,
    pub property_type: Option<String>,
    pub location_rating: Option<String>,
    pub tax_due_amount: Option<Decimal>,

    pub historical_avg_bidders: Option<Decimal>,
    pub historical_stddev_bidders: Option<Decimal>,
    pub historical_sample_size: Option<Decimal>,
    pub historical_avg_win_ratio: Option<Decimal>,
    pub historical_stddev_win_ratio: Option<Decimal>,
    pub user_trailing_win_rate: Option<Decimal>,

    pub market_temperature: Option<String>,
    pub sale_month: Option<Decimal>,
    pub platform_type: Option<String>,
    pub platform_minimum_bid_rule: Option<String>,
    pub platform_minimum_bid_value: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Validated inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFinancials {
    pub market_value: Decimal,
    pub repair_cost: Decimal,
    pub environmental_cost: Decimal,
    pub occupancy_cost: Decimal,
    pub title_insurance_cost: Decimal,
    pub transaction_cost_pct: Decimal,
    pub holding_cost_per_month: Decimal,
    pub holding_months: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskProfile {
    /// 0–100, higher means a cleaner title.
    pub title_risk_score: Decimal,
    /// 1–10, higher means better condition.
    pub condition_score: Decimal,
    /// 1–10, higher means more environmental risk.
    pub environmental_risk_score: Decimal,
    pub occupancy_risk: OccupancyRisk,
    pub investor_posture: InvestorPosture,
}

/// Attributes consumed by the attractiveness scorer only.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAttributes {
    pub value_tier: Decimal,
    pub property_type: PropertyType,
    pub condition_score: Decimal,
    pub title_status_score: Decimal,
    pub location_rating: LocationRating,
    pub tax_due_amount: Decimal,
    /// 1–10, higher means a cleaner site.
    pub environmental_score: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalAuctionStats {
    pub avg_bidders: Decimal,
    pub stddev_bidders: Decimal,
    pub sample_size: u32,
    /// Mean of winning bid / market value.
    pub avg_win_ratio: Decimal,
    pub stddev_win_ratio: Decimal,
    /// The investor's own win rate over the trailing six months.
    pub user_trailing_win_rate: Option<Decimal>,
}

impl HistoricalAuctionStats {
    /// Stats for a county or platform with no auction history.
    pub fn empty() -> Self {
        Self {
            avg_bidders: Decimal::ZERO,
            stddev_bidders: Decimal::ZERO,
            sample_size: 0,
            avg_win_ratio: Decimal::ZERO,
            stddev_win_ratio: Decimal::ZERO,
            user_trailing_win_rate: None,
        }
    }

    pub fn has_history(&self) -> bool {
        self.sample_size > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketConditions {
    pub temperature: MarketTemperature,
    pub sale_month: Month,
}

/// Opening-bid rule with its parameter resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinimumBid {
    TaxDue,
    Fixed(Decimal),
    PercentOfMarketValue(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformRules {
    pub platform_type: PlatformType,
    pub minimum_bid: MinimumBid,
}

/// A validated, normalized snapshot of one evaluation request.
#[derive(Debug, Clone, PartialEq)]
pub struct BidInputs {
    pub financials: PropertyFinancials,
    pub risk: RiskProfile,
    pub attributes: PropertyAttributes,
    pub history: HistoricalAuctionStats,
    pub market: MarketConditions,
    pub platform: PlatformRules,
    /// Target ROI as a fraction.
    pub target_roi: Decimal,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Itemised cost basis (everything except the bid itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub repair: Decimal,
    pub environmental: Decimal,
    pub occupancy: Decimal,
    pub title_insurance: Decimal,
    pub transaction: Decimal,
    pub holding: Decimal,
}

impl CostBreakdown {
    pub fn from_financials(f: &PropertyFinancials) -> Self {
        Self {
            repair: f.repair_cost,
            environmental: f.environmental_cost,
            occupancy: f.occupancy_cost,
            title_insurance: f.title_insurance_cost,
            transaction: f.transaction_cost_pct * f.market_value,
            holding: f.holding_cost_per_month * f.holding_months,
        }
    }

    pub fn total(&self) -> Decimal {
        self.repair
            + self.environmental
            + self.occupancy
            + self.title_insurance
            + self.transaction
            + self.holding
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "repair=${} env=${} occupancy=${} title=${} transaction=${} holding=${} (total=${})",
            self.repair,
            self.environmental,
            self.occupancy,
            self.title_insurance,
            self.transaction,
            self.holding,
            self.total(),
        )
    }
}

/// One point on the bid / return trade-off curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidScenario {
    pub label: ScenarioLabel,
    pub bid_amount: Decimal,
    pub total_investment: Decimal,
    pub profit: Decimal,
    /// `None` when total investment is zero.
    pub roi_pct: Option<Decimal>,
    pub annualized_roi_pct: Option<Decimal>,
    pub win_probability: Decimal,
    pub expected_value: Decimal,
    pub tier: ScenarioTier,
}

impl fmt::Display for BidScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roi = match self.roi_pct {
            Some(r) => format!("{}%", r.round_dp(1)),
            None => "n/a".to_string(),
        };
        write!(
            f,
            "{:<12} bid=${} profit=${} roi={} win={}% ev=${} [{}]",
            self.label.to_string(),
            self.bid_amount,
            self.profit,
            roi,
            (self.win_probability * Decimal::ONE_HUNDRED).round_dp(0),
            self.expected_value.round_dp(2),
            self.tier,
        )
    }
}

/// Platform-specific bidding tactic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tactic", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PlatformTactic {
    /// Timed online auction with a soft close.
    WaitAndSnipe {
        first_bid_secs_before_close: u32,
        rebid_secs_before_close: u32,
        soft_close_extension_secs: u32,
        opening_bid: Decimal,
        ceiling: Decimal,
    },
    /// Live auctioneer: open with a large jump to discourage the room.
    JumpBid {
        jump_bid: Decimal,
        min_increments_skipped: u32,
        max_increments_skipped: u32,
        ceiling: Decimal,
    },
    /// One private bid; game-theory base adjusted for posture.
    SealedBid {
        base_bid: Decimal,
        posture_factor: Decimal,
        sealed_bid: Decimal,
        ceiling: Decimal,
    },
}

impl PlatformTactic {
    pub fn name(&self) -> &'static str {
        match self {
            PlatformTactic::WaitAndSnipe { .. } => "wait-and-snipe",
            PlatformTactic::JumpBid { .. } => "jump bid",
            PlatformTactic::SealedBid { .. } => "sealed bid",
        }
    }

    /// The amount the tactic itself proposes to put on the table.
    pub fn proposed_bid(&self) -> Decimal {
        match self {
            PlatformTactic::WaitAndSnipe { opening_bid, .. } => *opening_bid,
            PlatformTactic::JumpBid { jump_bid, .. } => *jump_bid,
            PlatformTactic::SealedBid { sealed_bid, .. } => *sealed_bid,
        }
    }

    pub fn ceiling(&self) -> Decimal {
        match self {
            PlatformTactic::WaitAndSnipe { ceiling, .. }
            | PlatformTactic::JumpBid { ceiling, .. }
            | PlatformTactic::SealedBid { ceiling, .. } => *ceiling,
        }
    }
}

impl fmt::Display for PlatformTactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformTactic::WaitAndSnipe {
                first_bid_secs_before_close,
                rebid_secs_before_close,
                soft_close_extension_secs,
                opening_bid,
                ceiling,
            } => write!(
                f,
                "wait-and-snipe: bid ${opening_bid} at T-{}:{:02}, rebid at T-{}:{:02} if outbid; \
                 each bid extends the close by ~{} min; never exceed ${ceiling}",
                first_bid_secs_before_close / 60,
                first_bid_secs_before_close % 60,
                rebid_secs_before_close / 60,
                rebid_secs_before_close % 60,
                soft_close_extension_secs / 60,
            ),
            PlatformTactic::JumpBid {
                jump_bid,
                min_increments_skipped,
                max_increments_skipped,
                ceiling,
            } => write!(
                f,
                "jump bid: open at ${jump_bid}, skipping {min_increments_skipped}-{max_increments_skipped} \
                 increments to discourage further bidding; never exceed ${ceiling}",
            ),
            PlatformTactic::SealedBid {
                base_bid,
                posture_factor,
                sealed_bid,
                ceiling,
            } => write!(
                f,
                "sealed bid: submit ${sealed_bid} (base ${base_bid} x {posture_factor}, ceiling ${ceiling})",
            ),
        }
    }
}

/// Complete output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidStrategyResult {
    /// Hard ceiling after risk and posture adjustments.
    pub max_bid: Decimal,
    /// Ceiling from the ROI formula before risk adjustments.
    pub base_max_bid: Decimal,
    /// Labels of the risk adjustments that fired, in application order.
    pub risk_adjustments: Vec<String>,
    /// Competition-tier policy bid.
    pub recommended_bid: Decimal,
    pub policy_fraction: Decimal,
    /// Bid of the scenario with the highest expected value.
    pub expected_value_optimal_bid: Decimal,
    pub expected_value_optimal_label: ScenarioLabel,
    pub minimum_bid: Decimal,
    pub minimum_exceeds_max_bid: bool,
    pub break_even_bid: Decimal,
    pub total_costs: Decimal,
    pub cost_breakdown: CostBreakdown,
    pub attractiveness_score: Decimal,
    pub attractiveness: AttractivenessBreakdown,
    pub expected_bidders: u32,
    pub competition_level: CompetitionLevel,
    pub scenarios: [BidScenario; 5],
    pub platform_tactic: PlatformTactic,
    pub do_not_bid: bool,
}

impl BidStrategyResult {
    pub fn scenario(&self, label: ScenarioLabel) -> &BidScenario {
        // Scenarios are always stored in ScenarioLabel::ALL order.
        let idx = ScenarioLabel::ALL
            .iter()
            .position(|l| *l == label)
            .unwrap_or(0);
        &self.scenarios[idx]
    }
}

impl fmt::Display for BidStrategyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.do_not_bid {
            return write!(
                f,
                "DO NOT BID: no profitable bid (break-even ${}, costs ${})",
                self.break_even_bid, self.total_costs,
            );
        }
        write!(
            f,
            "max=${} recommended=${} ev-optimal=${} ({}) | bidders={} ({}) | score={} | {}",
            self.max_bid,
            self.recommended_bid,
            self.expected_value_optimal_bid,
            self.expected_value_optimal_label,
            self.expected_bidders,
            self.competition_level,
            self.attractiveness_score,
            self.platform_tactic.name(),
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// What is wrong with a single request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", rename_all = "camelCase")]
pub enum FieldProblem {
    Missing,
    Negative,
    NotInteger,
    OutOfRange { min: String, max: String },
    UnknownVariant { value: String, allowed: Vec<&'static str> },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "is required"),
            FieldProblem::Negative => write!(f, "must be non-negative"),
            FieldProblem::NotInteger => write!(f, "must be a whole number"),
            FieldProblem::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
            FieldProblem::UnknownVariant { value, allowed } => {
                write!(f, "'{value}' is not one of [{}]", allowed.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Request field name as it appears on the wire.
    pub field: &'static str,
    #[serde(flatten)]
    pub problem: FieldProblem,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// The only error the engine returns: the request cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bid request ({} issue(s)): {}", .issues.len(), join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Whether a given field was flagged.
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
