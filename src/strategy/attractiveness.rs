//! Property attractiveness scoring.
//!
//! Starts from a neutral baseline and adds one independent delta per
//! factor, each read from its own ordered table. The sum is clamped to
//! the 1–10 scale used by the competition predictor.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{Bound, CategoryTable, ThresholdTable};
use crate::types::{LocationRating, PropertyAttributes, PropertyType};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AttractivenessConfig {
    pub baseline: Decimal,
    pub min_score: Decimal,
    pub max_score: Decimal,
    pub value_tier: ThresholdTable<Decimal>,
    pub property_type: CategoryTable<PropertyType, Decimal>,
    pub condition: ThresholdTable<Decimal>,
    pub title_status: ThresholdTable<Decimal>,
    pub location: CategoryTable<LocationRating, Decimal>,
    pub tax_due: ThresholdTable<Decimal>,
    pub environmental: ThresholdTable<Decimal>,
}

impl Default for AttractivenessConfig {
    fn default() -> Self {
        Self {
            baseline: dec!(5.0),
            min_score: dec!(1),
            max_score: dec!(10),
            value_tier: ThresholdTable::new(
                vec![
                    (Bound::AtLeast(dec!(200000)), dec!(2.0)),
                    (Bound::AtLeast(dec!(100000)), dec!(1.0)),
                    (Bound::AtLeast(dec!(30000)), dec!(0)),
                ],
                dec!(-1.0),
            ),
            property_type: CategoryTable::new(
                vec![
                    (PropertyType::SingleFamily, dec!(1.5)),
                    (PropertyType::MultiFamily, dec!(0.5)),
                    (PropertyType::Condo, dec!(-1.0)),
                    (PropertyType::Commercial, dec!(-0.5)),
                    (PropertyType::Land, dec!(-1.0)),
                ],
                dec!(0),
            ),
            condition: ThresholdTable::new(
                vec![
                    (Bound::AtLeast(dec!(8)), dec!(2.0)),
                    (Bound::AtLeast(dec!(6)), dec!(1.0)),
                    (Bound::AtLeast(dec!(4)), dec!(0)),
                ],
                dec!(-2.0),
            ),
            title_status: ThresholdTable::new(
                vec![
                    (Bound::AtLeast(dec!(90)), dec!(1.5)),
                    (Bound::AtLeast(dec!(70)), dec!(0.5)),
                    (Bound::AtLeast(dec!(50)), dec!(-0.5)),
                ],
                dec!(-2.0),
            ),
            location: CategoryTable::new(
                vec![
                    (LocationRating::Excellent, dec!(1.0)),
                    (LocationRating::Good, dec!(0.5)),
                    (LocationRating::Fair, dec!(0)),
                    (LocationRating::Poor, dec!(-1.0)),
                ],
                dec!(0),
            ),
            // High tax due is an entry barrier; very low tax due usually
            // signals a low-value parcel.
            tax_due: ThresholdTable::new(
                vec![
                    (Bound::Below(dec!(10000)), dec!(-0.5)),
                    (Bound::Above(dec!(30000)), dec!(-1.0)),
                ],
                dec!(0),
            ),
            environmental: ThresholdTable::new(
                vec![
                    (Bound::AtLeast(dec!(8)), dec!(0)),
                    (Bound::AtLeast(dec!(6)), dec!(-0.5)),
                ],
                dec!(-1.5),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Per-factor deltas behind a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractivenessBreakdown {
    pub value_tier: Decimal,
    pub property_type: Decimal,
    pub condition: Decimal,
    pub title_status: Decimal,
    pub location: Decimal,
    pub tax_due: Decimal,
    pub environmental: Decimal,
    /// Baseline plus all deltas, before clamping.
    pub raw: Decimal,
    pub score: Decimal,
}

pub struct AttractivenessScorer {
    config: AttractivenessConfig,
}

impl AttractivenessScorer {
    pub fn new(config: AttractivenessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AttractivenessConfig {
        &self.config
    }

    /// Score in `[min_score, max_score]`.
    pub fn score(&self, attrs: &PropertyAttributes) -> Decimal {
        self.breakdown(attrs).score
    }

    pub fn breakdown(&self, attrs: &PropertyAttributes) -> AttractivenessBreakdown {
        let c = &self.config;
        let value_tier = c.value_tier.lookup(attrs.value_tier);
        let property_type = c.property_type.lookup(&attrs.property_type);
        let condition = c.condition.lookup(attrs.condition_score);
        let title_status = c.title_status.lookup(attrs.title_status_score);
        let location = c.location.lookup(&attrs.location_rating);
        let tax_due = c.tax_due.lookup(attrs.tax_due_amount);
        let environmental = c.environmental.lookup(attrs.environmental_score);

        let raw = c.baseline
            + value_tier
            + property_type
            + condition
            + title_status
            + location
            + tax_due
            + environmental;
        let score = raw.clamp(c.min_score, c.max_score);

        debug!(
            raw = %raw,
            score = %score,
            property_type = %attrs.property_type,
            "Attractiveness scored"
        );

        AttractivenessBreakdown {
            value_tier,
            property_type,
            condition,
            title_status,
            location,
            tax_due,
            environmental,
            raw,
            score,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
