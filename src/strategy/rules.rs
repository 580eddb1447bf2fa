//! Ordered lookup tables and multiplicative adjustment chains.
//!
//! Every threshold in the engine is data held by one of these two types.
//! Tables are scanned top to bottom and the first matching row wins;
//! adjustment chains are folded left to right.

use rust_decimal::Decimal;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Threshold tables
// ---------------------------------------------------------------------------

/// Comparison applied to the looked-up value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bound {
    AtLeast(Decimal),
    Above(Decimal),
    AtMost(Decimal),
    Below(Decimal),
}

impl Bound {
    pub fn matches(&self, x: Decimal) -> bool {
        match *self {
            Bound::AtLeast(t) => x >= t,
            Bound::Above(t) => x > t,
            Bound::AtMost(t) => x <= t,
            Bound::Below(t) => x < t,
        }
    }
}

/// Ordered `(bound, value)` rows with a fallback for values no row matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable<V> {
    rows: Vec<(Bound, V)>,
    fallback: V,
}

impl<V: Copy> ThresholdTable<V> {
    pub fn new(rows: Vec<(Bound, V)>, fallback: V) -> Self {
        Self { rows, fallback }
    }

    /// Value of the first row whose bound matches `x`, else the fallback.
    pub fn lookup(&self, x: Decimal) -> V {
        self.rows
            .iter()
            .find(|(bound, _)| bound.matches(x))
            .map(|(_, v)| *v)
            .unwrap_or(self.fallback)
    }

    pub fn rows(&self) -> &[(Bound, V)] {
        &self.rows
    }
}

/// Exact-match table keyed by an enum.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable<K, V> {
    rows: Vec<(K, V)>,
    fallback: V,
}

impl<K: PartialEq, V: Copy> CategoryTable<K, V> {
    pub fn new(rows: Vec<(K, V)>, fallback: V) -> Self {
        Self { rows, fallback }
    }

    pub fn lookup(&self, key: &K) -> V {
        self.rows
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
            .unwrap_or(self.fallback)
    }
}

// ---------------------------------------------------------------------------
// Adjustment chains
// ---------------------------------------------------------------------------

/// A condition evaluated against some context.
pub trait Predicate<C> {
    fn holds(&self, ctx: &C) -> bool;

    /// Short label for audit trails and logs.
    fn label(&self) -> String;
}

/// Multiply by `factor` when `when` holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment<P> {
    pub when: P,
    pub factor: Decimal,
}

/// Result of folding an adjustment chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Folded {
    pub value: Decimal,
    /// Labels of the adjustments that fired, in order.
    pub applied: Vec<String>,
}

/// Fold `chain` over `base` left to right, multiplying by every factor
/// whose predicate holds for `ctx`.
pub fn fold_adjustments<C, P: Predicate<C>>(
    base: Decimal,
    ctx: &C,
    chain: &[Adjustment<P>],
) -> Folded {
    let mut applied = Vec::new();
    let value = chain.iter().fold(base, |acc, adj| {
        if adj.when.holds(ctx) {
            applied.push(format!("{} x{}", adj.when.label(), adj.factor));
            acc * adj.factor
        } else {
            acc
        }
    });
    Folded { value, applied }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
