//! Derived, already-aggregated values handed to the renderer.

use crate::aggregate::exceedance::{exceedance_counts, ExceedanceCount};
use crate::aggregate::seasonal::{monthly_peak_grid, seasonal_calendar, PeakGrid, SeasonalCalendar};
use crate::aggregate::trend::{linear_trend, TrendFit};
use crate::aggregate::yearly::{to_yearly, YearlyMean};
use crate::index::lookup::LookupEngine;
use crate::index::{heat_stress, IndexReading};
use crate::pipeline::error::PhaseError;
use crate::types::current::CurrentConditions;
use crate::types::daily_series::DailySeries;
use crate::types::projection::{ClimateDaily, ProjectionSeries};
use crate::types::work_intensity::WorkIntensity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Current(CurrentView),
    Projections(ProjectionView),
    RecentHistory(RecentHistoryView),
    SeasonalCalendar(SeasonalCalendar),
    MonthlyPeaks(PeakGrid),
    LongTermTrend(LongTermView),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityReading {
    pub intensity: WorkIntensity,
    pub reading: IndexReading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub name: String,
    pub time: String,
    pub temperature: f64,
    pub humidity: f64,
    pub apparent_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    /// Regression index, always computed for comparison.
    pub baseline: IndexReading,
    /// One reading per work intensity; falls back to the baseline family
    /// when the table cannot answer.
    pub by_intensity: Vec<IntensityReading>,
}

impl CurrentView {
    pub fn derive(name: &str, current: &CurrentConditions, engine: &LookupEngine<'_>) -> Self {
        let t = current.temperature_2m;
        let rh = current.relative_humidity_2m;
        Self {
            name: name.to_string(),
            time: current.time.clone(),
            temperature: t,
            humidity: rh,
            apparent_temperature: current.apparent_temperature,
            wind_speed: current.wind_speed_10m,
            baseline: IndexReading::baseline(t, rh),
            by_intensity: WorkIntensity::ALL
                .iter()
                .map(|&intensity| IntensityReading {
                    intensity,
                    reading: heat_stress(engine, t, rh, intensity),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionView {
    pub series: ProjectionSeries,
    /// Trend of the multi-model mean; absent when fewer than two years came back.
    pub ensemble_trend: Option<TrendFit>,
}

impl ProjectionView {
    pub fn derive(daily: &ClimateDaily, models: &[String]) -> Result<Self, PhaseError> {
        if daily.time.is_empty() {
            return Err(PhaseError::MissingField("time"));
        }
        let series = ProjectionSeries::from_daily(daily, models)?;
        if series.models.is_empty() {
            return Err(PhaseError::MissingField("temperature_2m_max"));
        }
        let ensemble_trend = linear_trend(&series.ensemble).ok();
        Ok(Self {
            series,
            ensemble_trend,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentHistoryView {
    pub yearly_max: Vec<YearlyMean>,
    pub yearly_apparent_max: Vec<YearlyMean>,
    pub exceedance: Vec<ExceedanceCount>,
}

impl RecentHistoryView {
    pub fn derive(series: &DailySeries) -> Result<Self, PhaseError> {
        Ok(Self {
            yearly_max: to_yearly(&series.time, &series.temperature_2m_max)?,
            yearly_apparent_max: to_yearly(&series.time, &series.apparent_temperature_max)?,
            exceedance: exceedance_counts(&series.time, &series.apparent_temperature_max)?,
        })
    }
}

/// The three phase-2 views, derived together from one short-window series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryViews {
    pub recent: RecentHistoryView,
    pub seasonal: SeasonalCalendar,
    pub peaks: PeakGrid,
}

impl HistoryViews {
    pub fn derive(series: &DailySeries) -> Result<Self, PhaseError> {
        require_columns(series)?;
        Ok(Self {
            recent: RecentHistoryView::derive(series)?,
            seasonal: seasonal_calendar(series),
            peaks: monthly_peak_grid(series),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongTermView {
    pub yearly: Vec<YearlyMean>,
    pub trend: TrendFit,
    pub chunks: usize,
}

impl LongTermView {
    /// Yearly mean daily max plus its trend.
    ///
    /// # Errors
    ///
    /// [`PhaseError::Aggregate`] when the series spans fewer than two years
    /// with data.
    pub fn derive(series: &DailySeries, chunks: usize) -> Result<Self, PhaseError> {
        if series.is_empty() {
            return Err(PhaseError::MissingField("time"));
        }
        if series.temperature_2m_max.iter().all(Option::is_none) {
            return Err(PhaseError::MissingField("temperature_2m_max"));
        }
        let yearly = to_yearly(&series.time, &series.temperature_2m_max)?;
        let trend = linear_trend(&yearly)?;
        Ok(Self {
            yearly,
            trend,
            chunks,
        })
    }
}

fn require_columns(series: &DailySeries) -> Result<(), PhaseError> {
    if series.is_empty() {
        return Err(PhaseError::MissingField("time"));
    }
    if series.temperature_2m_max.is_empty() {
        return Err(PhaseError::MissingField("temperature_2m_max"));
    }
    if series.apparent_temperature_max.is_empty() {
        return Err(PhaseError::MissingField("apparent_temperature_max"));
    }
    Ok(())
}
