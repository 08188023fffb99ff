//! Tunables of the acquisition pipeline.

use crate::fetch::retry::RetryPolicy;
use crate::source::endpoints::Endpoints;
use bon::Builder;
use chrono::{Datelike, Local, NaiveDate};
use std::time::Duration;

pub const DEFAULT_PHASE2_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_PHASE3_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Climate-endpoint models requested for projections.
pub const DEFAULT_PROJECTION_MODELS: [&str; 7] = [
    "CMCC_CM2_VHR4",
    "FGOALS_f3_H",
    "HiRAM_SIT_HR",
    "MRI_AGCM3_2_S",
    "EC_Earth3P_HR",
    "MPI_ESM1_2_XR",
    "NICAM16_8S",
];

/// Pipeline settings. Every field has a default; use
/// [`PipelineConfig::builder`] to override individual values.
///
/// The delays are a courtesy to the upstream rate limiter, not a
/// correctness requirement, so tests set them to zero with
/// [`PipelineConfig::without_delays`].
///
/// # Examples
///
/// ```
/// use heatstress::PipelineConfig;
/// use std::time::Duration;
///
/// let config = PipelineConfig::builder()
///     .recent_years(10)
///     .chunk_delay(Duration::from_secs(3))
///     .build();
/// assert_eq!(config.recent_years, 10);
/// assert_eq!(config.chunk_years, 25);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct PipelineConfig {
    /// Pause between phase 1 and phase 2.
    #[builder(default = DEFAULT_PHASE2_DELAY)]
    pub phase2_delay: Duration,
    /// Pause between phase 2 and phase 3.
    #[builder(default = DEFAULT_PHASE3_DELAY)]
    pub phase3_delay: Duration,
    /// Pause between consecutive long-term chunks. None after the last one.
    #[builder(default = DEFAULT_CHUNK_DELAY)]
    pub chunk_delay: Duration,
    #[builder(default)]
    pub retry: RetryPolicy,
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
    /// Length of the short historical window, in whole calendar years.
    #[builder(default = 5)]
    pub recent_years: u32,
    #[builder(default = 1950)]
    pub long_term_start_year: i32,
    /// Years per long-term sub-request.
    #[builder(default = 25)]
    pub chunk_years: u32,
    #[builder(default = 2025)]
    pub projection_start_year: i32,
    #[builder(default = 2050)]
    pub projection_end_year: i32,
    #[builder(default = DEFAULT_PROJECTION_MODELS.iter().map(|m| m.to_string()).collect())]
    pub projection_models: Vec<String>,
    /// "Today" for window calculations. Defaults to the local date.
    pub reference_date: Option<NaiveDate>,
    #[builder(default)]
    pub endpoints: Endpoints,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PipelineConfig {
    /// The same configuration with every pause removed.
    pub fn without_delays(self) -> Self {
        Self {
            phase2_delay: Duration::ZERO,
            phase3_delay: Duration::ZERO,
            chunk_delay: Duration::ZERO,
            retry: RetryPolicy::immediate(),
            ..self
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// The most recent calendar year that has fully elapsed.
    pub fn last_complete_year(&self) -> i32 {
        self.today().year() - 1
    }

    /// First and last day of the short historical window.
    pub fn recent_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        let last = self.last_complete_year();
        let span = i32::try_from(self.recent_years.max(1)).ok()?;
        let first = last.checked_sub(span - 1)?;
        Some((
            NaiveDate::from_ymd_opt(first, 1, 1)?,
            NaiveDate::from_ymd_opt(last, 12, 31)?,
        ))
    }

    /// First and last year of the long-term window, inclusive.
    pub fn long_term_years(&self) -> (i32, i32) {
        (self.long_term_start_year, self.last_complete_year())
    }
}
