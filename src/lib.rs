mod aggregate;
mod dashboard;
mod error;
mod fetch;
mod index;
mod pipeline;
mod render;
mod source;
mod types;

pub use dashboard::*;
pub use error::HeatStressError;

pub use aggregate::error::AggregateError;
pub use aggregate::exceedance::{exceedance_counts, ExceedanceCount, EXCEEDANCE_THRESHOLDS};
pub use aggregate::seasonal::{
    monthly_peak_grid, seasonal_calendar, to_monthly, MonthSlot, PeakGrid, SeasonalCalendar,
    HOT_DAY_THRESHOLD,
};
pub use aggregate::trend::{linear_trend, TrendFit};
pub use aggregate::yearly::{to_yearly, YearlyMean};

pub use fetch::client::{read_json_file, FetchClient};
pub use fetch::error::FetchError;
pub use fetch::retry::{Backoff, ExponentialBackoff, LinearBackoff, RetryPolicy};

pub use index::baseline::{baseline_index, celsius_to_fahrenheit, fahrenheit_to_celsius};
pub use index::lookup::{interpolate, LookupEngine};
pub use index::lookup_table::{HumidityRow, IntensityGrid, LookupTable, TableCache, TableState};
pub use index::risk::{classify, RiskLevel, RiskTier};
pub use index::{heat_stress, IndexFamily, IndexReading};

pub use pipeline::chunks::{fetch_chunked, plan_chunks, YearChunk};
pub use pipeline::config::PipelineConfig;
pub use pipeline::error::PhaseError;
pub use pipeline::views::{
    CurrentView, HistoryViews, IntensityReading, LongTermView, ProjectionView, RecentHistoryView,
    View,
};
pub use pipeline::{AcquisitionPipeline, PhaseStatus, PipelineReport, Site};

pub use render::json_lines::JsonLinesRenderer;
pub use render::{Region, RenderTarget, Renderer};

pub use source::endpoints::{Endpoints, TableLocation};
pub use source::open_meteo::OpenMeteoSource;
pub use source::ClimateSource;

pub use types::current::CurrentConditions;
pub use types::daily_series::{DailyObservation, DailySeries};
pub use types::projection::{ClimateDaily, ModelProjection, ProjectionSeries};
pub use types::work_intensity::WorkIntensity;
