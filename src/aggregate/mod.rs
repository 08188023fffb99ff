//! Deterministic reducers from daily series to yearly, monthly, seasonal and
//! exceedance summaries, plus an ordinary-least-squares trend fit.
//!
//! Every grouping key comes from the year (`[0..4]`) and month (`[5..7]`)
//! substrings of the ISO date. Missing values are skipped, never read as zero,
//! and inputs are only ever borrowed.

pub mod error;
pub mod exceedance;
pub mod seasonal;
pub mod trend;
pub mod yearly;
