//! The physiological lookup table and its load-once session cache.

use crate::types::work_intensity::WorkIntensity;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Humidity (%) → index value (°C).
pub type HumidityRow = BTreeMap<i32, f64>;
/// Temperature (°C) → humidity row.
pub type IntensityGrid = BTreeMap<i32, HumidityRow>;

/// Precomputed heat-stress values keyed by work intensity, whole-degree
/// temperature and whole-percent relative humidity.
///
/// Deserialises from the table asset, whose keys are stringified integers:
///
/// ```json
/// { "light": { "30": { "50": 33.8, ... }, ... }, "moderate": {...}, "heavy": {...} }
/// ```
///
/// A level missing from the asset is treated as unavailable rather than a
/// parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LookupTable {
    #[serde(default)]
    light: Option<IntensityGrid>,
    #[serde(default)]
    moderate: Option<IntensityGrid>,
    #[serde(default)]
    heavy: Option<IntensityGrid>,
}

impl LookupTable {
    /// Builds a table from in-memory grids. Levels not supplied stay absent.
    pub fn from_grids(grids: impl IntoIterator<Item = (WorkIntensity, IntensityGrid)>) -> Self {
        let mut table = Self::default();
        for (level, grid) in grids {
            *table.slot_mut(level) = Some(grid);
        }
        table
    }

    pub fn grid(&self, level: WorkIntensity) -> Option<&IntensityGrid> {
        match level {
            WorkIntensity::Light => self.light.as_ref(),
            WorkIntensity::Moderate => self.moderate.as_ref(),
            WorkIntensity::Heavy => self.heavy.as_ref(),
        }
    }

    /// Direct cell access, no interpolation.
    pub fn entry(&self, level: WorkIntensity, temperature: i32, humidity: i32) -> Option<f64> {
        self.grid(level)?.get(&temperature)?.get(&humidity).copied()
    }

    fn slot_mut(&mut self, level: WorkIntensity) -> &mut Option<IntensityGrid> {
        match level {
            WorkIntensity::Light => &mut self.light,
            WorkIntensity::Moderate => &mut self.moderate,
            WorkIntensity::Heavy => &mut self.heavy,
        }
    }
}

/// Lifecycle of the session's lookup table.
///
/// Transitions only move forward: `Unloaded → Loading → Loaded | Unavailable`.
/// `Unavailable` is permanent; nothing retries a failed load.
#[derive(Debug, Clone, Default)]
pub enum TableState {
    #[default]
    Unloaded,
    Loading,
    Loaded(Arc<LookupTable>),
    Unavailable,
}

impl TableState {
    pub fn is_settled(&self) -> bool {
        matches!(self, TableState::Loaded(_) | TableState::Unavailable)
    }
}

/// An explicitly owned, injectable holder for the session's lookup table.
///
/// Once `Loaded`, the table is shared read-only through an `Arc`.
#[derive(Debug, Default)]
pub struct TableCache {
    state: RwLock<TableState>,
}

impl TableCache {
    /// A cache with nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that already holds `table`. Used to inject a prebuilt table.
    pub fn loaded(table: LookupTable) -> Self {
        Self {
            state: RwLock::new(TableState::Loaded(Arc::new(table))),
        }
    }

    /// A cache whose table is known to be unavailable for the session.
    pub fn unavailable() -> Self {
        Self {
            state: RwLock::new(TableState::Unavailable),
        }
    }

    pub fn state(&self) -> TableState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The table, when it has been loaded.
    pub fn table(&self) -> Option<Arc<LookupTable>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            TableState::Loaded(table) => Some(Arc::clone(table)),
            _ => None,
        }
    }

    /// Moves `Unloaded → Loading`. Returns `false` if a load was already
    /// started or has settled, in which case the caller must not load again.
    pub fn begin_loading(&self) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, TableState::Unloaded) {
            *state = TableState::Loading;
            true
        } else {
            false
        }
    }

    /// Settles an in-flight load. `None` marks the table unavailable for good.
    ///
    /// Ignored unless the cache is `Loading`.
    pub fn finish_loading(&self, table: Option<LookupTable>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, TableState::Loading) {
            *state = match table {
                Some(table) => TableState::Loaded(Arc::new(table)),
                None => TableState::Unavailable,
            };
        }
    }
}
