//! Heat-stress index engines: the lookup-table interpolant, the baseline
//! regression and the risk classifier shared by both.

pub mod baseline;
pub mod lookup;
pub mod lookup_table;
pub mod risk;

use crate::index::baseline::baseline_index;
use crate::index::lookup::LookupEngine;
use crate::index::risk::{classify, RiskTier};
use crate::types::work_intensity::WorkIntensity;
use serde::Serialize;

/// Which engine produced an index value. Selects the risk thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexFamily {
    Lookup,
    Baseline,
}

/// An index value tagged with its family and classified tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexReading {
    pub value: f64,
    pub family: IndexFamily,
    pub risk: RiskTier,
}

impl IndexReading {
    pub fn new(value: f64, family: IndexFamily) -> Self {
        Self {
            value,
            family,
            risk: classify(value, family),
        }
    }

    pub fn baseline(temperature: f64, humidity: f64) -> Self {
        Self::new(baseline_index(temperature, humidity), IndexFamily::Baseline)
    }
}

/// Heat stress at `level`: the lookup value when the engine can answer,
/// otherwise the baseline regression, each classified with its own thresholds.
pub fn heat_stress(
    engine: &LookupEngine<'_>,
    temperature: f64,
    humidity: f64,
    level: WorkIntensity,
) -> IndexReading {
    match engine.lookup(temperature, humidity, level) {
        Some(value) => IndexReading::new(value, IndexFamily::Lookup),
        None => IndexReading::baseline(temperature, humidity),
    }
}
