//! Discrete risk tiers for index values.

use crate::index::IndexFamily;
use serde::Serialize;
use std::fmt;

/// Five ordered tiers, least severe first. `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Safe,
    Caution,
    ExtremeCaution,
    Danger,
    ExtremeDanger,
}

impl RiskLevel {
    const ASCENDING: [RiskLevel; 5] = [
        RiskLevel::Safe,
        RiskLevel::Caution,
        RiskLevel::ExtremeCaution,
        RiskLevel::Danger,
        RiskLevel::ExtremeDanger,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Caution => "Caution",
            RiskLevel::ExtremeCaution => "Extreme Caution",
            RiskLevel::Danger => "Danger",
            RiskLevel::ExtremeDanger => "Extreme Danger",
        }
    }

    /// Display colour as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "#2e7d32",
            RiskLevel::Caution => "#f9a825",
            RiskLevel::ExtremeCaution => "#ef6c00",
            RiskLevel::Danger => "#c62828",
            RiskLevel::ExtremeDanger => "#6a1b9a",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bounds (°C, exclusive) of Safe, Caution, Extreme Caution and Danger
/// for the lookup-based family.
pub const LOOKUP_THRESHOLDS: [f64; 4] = [26.0, 30.0, 35.0, 40.0];

/// The same bounds for the baseline regression family (NWS Celsius chart).
pub const BASELINE_THRESHOLDS: [f64; 4] = [27.0, 32.0, 41.0, 54.0];

/// A tier with its presentation attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskTier {
    pub level: RiskLevel,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<RiskLevel> for RiskTier {
    fn from(level: RiskLevel) -> Self {
        Self {
            level,
            label: level.label(),
            color: level.color(),
        }
    }
}

fn thresholds(family: IndexFamily) -> &'static [f64; 4] {
    match family {
        IndexFamily::Lookup => &LOOKUP_THRESHOLDS,
        IndexFamily::Baseline => &BASELINE_THRESHOLDS,
    }
}

/// Classifies `value` with the thresholds of the family that produced it.
///
/// The first tier whose bound is strictly greater than `value` wins; anything
/// at or above the last bound (or NaN) is `ExtremeDanger`.
///
/// # Examples
///
/// ```
/// use heatstress::{classify, IndexFamily, RiskLevel};
///
/// assert_eq!(classify(29.0, IndexFamily::Lookup).level, RiskLevel::Caution);
/// assert_eq!(classify(29.0, IndexFamily::Baseline).level, RiskLevel::Caution);
/// assert_eq!(classify(32.0, IndexFamily::Baseline).level, RiskLevel::ExtremeCaution);
/// ```
pub fn classify(value: f64, family: IndexFamily) -> RiskTier {
    let level = thresholds(family)
        .iter()
        .position(|&bound| value < bound)
        .map_or(RiskLevel::ExtremeDanger, |i| RiskLevel::ASCENDING[i]);
    level.into()
}
