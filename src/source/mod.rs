//! Upstream data sources the acquisition pipeline reads from.

pub mod endpoints;
pub mod open_meteo;

use crate::dashboard::LatLon;
use crate::fetch::error::FetchError;
use crate::index::lookup_table::LookupTable;
use crate::types::current::CurrentConditions;
use crate::types::daily_series::DailySeries;
use crate::types::projection::ClimateDaily;
use async_trait::async_trait;
use chrono::NaiveDate;

/// The four read-only query shapes plus the lookup-table asset.
///
/// Implemented against Open-Meteo by [`open_meteo::OpenMeteoSource`]; tests
/// substitute scripted sources.
#[async_trait]
pub trait ClimateSource: Send + Sync {
    /// The lookup-table asset.
    async fn lookup_table(&self) -> Result<LookupTable, FetchError>;

    /// Current conditions at `location`.
    async fn current(&self, location: LatLon) -> Result<CurrentConditions, FetchError>;

    /// Daily max and apparent max from `start` to `end`, inclusive.
    async fn daily_archive(
        &self,
        location: LatLon,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailySeries, FetchError>;

    /// Daily max temperature per climate model over whole years.
    async fn projections(
        &self,
        location: LatLon,
        start_year: i32,
        end_year: i32,
        models: &[String],
    ) -> Result<ClimateDaily, FetchError>;
}
