//! Interpolation over the lookup table.
//!
//! Temperature is interpolated linearly between the two bracketing whole
//! degrees; humidity is snapped to the nearest whole percent. The table's
//! humidity axis is coarser than its temperature axis, so the asymmetry is kept.

use crate::index::lookup_table::{LookupTable, TableCache};
use crate::types::work_intensity::WorkIntensity;

pub const MIN_TEMPERATURE: f64 = 20.0;
pub const MAX_TEMPERATURE: f64 = 55.0;
pub const MIN_HUMIDITY: f64 = 10.0;
pub const MAX_HUMIDITY: f64 = 100.0;

/// Reads interpolated values out of a [`TableCache`].
#[derive(Debug, Clone, Copy)]
pub struct LookupEngine<'a> {
    cache: &'a TableCache,
}

impl<'a> LookupEngine<'a> {
    pub fn new(cache: &'a TableCache) -> Self {
        Self { cache }
    }

    /// Looks up the index for `temperature` (°C) and `humidity` (%) at `level`.
    ///
    /// Returns `None` when the table is not loaded, the level is absent, or
    /// neither bracketing temperature has an entry for the humidity. Callers
    /// fall back to the baseline index in that case.
    pub fn lookup(&self, temperature: f64, humidity: f64, level: WorkIntensity) -> Option<f64> {
        let table = self.cache.table()?;
        interpolate(&table, temperature, humidity, level)
    }
}

/// Interpolates directly against a table.
pub fn interpolate(
    table: &LookupTable,
    temperature: f64,
    humidity: f64,
    level: WorkIntensity,
) -> Option<f64> {
    if temperature.is_nan() || humidity.is_nan() {
        return None;
    }
    let grid = table.grid(level)?;

    let t = temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
    let rh = humidity.clamp(MIN_HUMIDITY, MAX_HUMIDITY).round() as i32;

    let t_floor = t.floor();
    let fraction = t - t_floor;
    let lower = grid.get(&(t_floor as i32)).and_then(|row| row.get(&rh));
    let upper = grid.get(&(t.ceil() as i32)).and_then(|row| row.get(&rh));

    match (lower, upper) {
        (None, None) => None,
        (Some(&lower), None) => Some(lower),
        // No extrapolation downward either: hand back the only bracket present.
        (None, Some(&upper)) => Some(upper),
        (Some(&lower), Some(&upper)) => Some(lower + (upper - lower) * fraction),
    }
}
