//! BIDSTRAT — Tax-deed auction bid strategy optimization engine
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod aggregator;
pub mod config;
pub mod history;
pub mod report;
pub mod strategy;
pub mod types;
