use crate::aggregate::error::{ensure_aligned, AggregateError};
use crate::types::daily_series::year_key;
use serde::Serialize;
use std::collections::BTreeMap;

/// Apparent-temperature severity thresholds (°C), ascending.
pub const EXCEEDANCE_THRESHOLDS: [f64; 3] = [35.0, 40.0, 45.0];

/// Days in one year whose apparent max met or exceeded each threshold.
///
/// The buckets are cumulative: a 46 °C day counts towards all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExceedanceCount {
    pub year: i32,
    pub days_35: u32,
    pub days_40: u32,
    pub days_45: u32,
}

impl ExceedanceCount {
    fn new(year: i32) -> Self {
        Self {
            year,
            days_35: 0,
            days_40: 0,
            days_45: 0,
        }
    }

    fn record(&mut self, apparent_max: f64) {
        let [t35, t40, t45] = EXCEEDANCE_THRESHOLDS;
        if apparent_max >= t35 {
            self.days_35 += 1;
        }
        if apparent_max >= t40 {
            self.days_40 += 1;
        }
        if apparent_max >= t45 {
            self.days_45 += 1;
        }
    }
}

/// Counts exceedance days per year.
///
/// Every year with at least one valid value is listed, including years where
/// all three counts are zero.
pub fn exceedance_counts(
    dates: &[impl AsRef<str>],
    apparent_max: &[Option<f64>],
) -> Result<Vec<ExceedanceCount>, AggregateError> {
    ensure_aligned(dates, apparent_max)?;

    let mut years: BTreeMap<i32, ExceedanceCount> = BTreeMap::new();
    for (date, value) in dates.iter().zip(apparent_max) {
        let (Some(year), Some(value)) = (year_key(date.as_ref()), value) else {
            continue;
        };
        years
            .entry(year)
            .or_insert_with(|| ExceedanceCount::new(year))
            .record(*value);
    }
    Ok(years.into_values().collect())
}
