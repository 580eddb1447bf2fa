//! Integration tests for the BIDSTRAT engine.
//!
//! Drives the public `BidStrategyEngine` API end to end: reference lots,
//! decision boundaries, degenerate inputs and whole-result invariants.

mod fixtures;
mod invariants;
mod reference;
