//! [`ClimateSource`] backed by the Open-Meteo forecast, archive and climate APIs.

use crate::dashboard::LatLon;
use crate::fetch::client::{read_json_file, FetchClient};
use crate::fetch::error::FetchError;
use crate::index::lookup_table::LookupTable;
use crate::source::endpoints::{Endpoints, TableLocation};
use crate::source::ClimateSource;
use crate::types::current::CurrentConditions;
use crate::types::daily_series::DailySeries;
use crate::types::projection::ClimateDaily;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,wind_speed_10m";
const ARCHIVE_FIELDS: &str = "temperature_2m_max,apparent_temperature_max";
const PROJECTION_FIELDS: &str = "temperature_2m_max";

#[derive(Deserialize)]
struct CurrentResponse {
    current: CurrentConditions,
}

#[derive(Deserialize)]
struct DailyResponse<T> {
    daily: T,
}

pub struct OpenMeteoSource {
    client: FetchClient,
    endpoints: Endpoints,
}

impl OpenMeteoSource {
    pub fn new(client: FetchClient, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    fn current_url(&self, location: LatLon) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&current={}&timezone=auto",
            self.endpoints.forecast, location.0, location.1, CURRENT_FIELDS
        )
    }

    fn archive_url(&self, location: LatLon, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/v1/archive?latitude={}&longitude={}&start_date={}&end_date={}&daily={}&timezone=auto",
            self.endpoints.archive,
            location.0,
            location.1,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            ARCHIVE_FIELDS
        )
    }

    fn projection_url(
        &self,
        location: LatLon,
        start_year: i32,
        end_year: i32,
        models: &[String],
    ) -> String {
        format!(
            "{}/v1/climate?latitude={}&longitude={}&start_date={:04}-01-01&end_date={:04}-12-31&models={}&daily={}",
            self.endpoints.climate,
            location.0,
            location.1,
            start_year,
            end_year,
            models.join(","),
            PROJECTION_FIELDS
        )
    }
}

#[async_trait]
impl ClimateSource for OpenMeteoSource {
    async fn lookup_table(&self) -> Result<LookupTable, FetchError> {
        match &self.endpoints.table {
            // The asset is static; one attempt is enough.
            TableLocation::Url(url) => self.client.fetch_json_retrying(url, 1).await,
            TableLocation::File(path) => read_json_file(path).await,
        }
    }

    async fn current(&self, location: LatLon) -> Result<CurrentConditions, FetchError> {
        let response: CurrentResponse = self.client.fetch_json(&self.current_url(location)).await?;
        Ok(response.current)
    }

    async fn daily_archive(
        &self,
        location: LatLon,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailySeries, FetchError> {
        let url = self.archive_url(location, start, end);
        let response: DailyResponse<DailySeries> = self.client.fetch_json(&url).await?;
        Ok(response.daily)
    }

    async fn projections(
        &self,
        location: LatLon,
        start_year: i32,
        end_year: i32,
        models: &[String],
    ) -> Result<ClimateDaily, FetchError> {
        let url = self.projection_url(location, start_year, end_year, models);
        let response: DailyResponse<ClimateDaily> = self.client.fetch_json(&url).await?;
        Ok(response.daily)
    }
}
