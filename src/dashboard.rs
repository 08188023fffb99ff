//! The public entry point: a heat-stress dashboard for one location.
//!
//! Wires the Open-Meteo source, the retrying fetch client and the acquisition
//! pipeline together, then hands every derived view to a [`Renderer`].

use crate::error::HeatStressError;
use crate::fetch::client::FetchClient;
use crate::index::lookup_table::TableCache;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::{AcquisitionPipeline, PipelineReport, Site};
use crate::render::Renderer;
use crate::source::open_meteo::OpenMeteoSource;
use bon::bon;
use reqwest::Client;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use heatstress::LatLon;
///
/// let seville = LatLon(37.39, -5.98);
/// assert_eq!(seville.0, 37.39); // Latitude
/// assert_eq!(seville.1, -5.98); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A heat-stress dashboard for a single location.
///
/// Create one with [`HeatStressDashboard::builder`], then call
/// [`HeatStressDashboard::run`] with the renderer that should receive the
/// derived values.
///
/// # Examples
///
/// ```no_run
/// use heatstress::{HeatStressDashboard, HeatStressError, JsonLinesRenderer, LatLon};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), HeatStressError> {
/// let dashboard = HeatStressDashboard::builder()
///     .location(LatLon(25.20, 55.27))
///     .name("Dubai")
///     .mount("heat-panel")
///     .build()?;
///
/// let report = dashboard.run(&JsonLinesRenderer::new(std::io::stdout())).await;
/// println!("All regions rendered: {}", report.all_succeeded());
/// # Ok(())
/// # }
/// ```
pub struct HeatStressDashboard {
    pipeline: AcquisitionPipeline<OpenMeteoSource>,
}

#[bon]
impl HeatStressDashboard {
    /// Builds a dashboard for `location`, labelled `name` and rendered under `mount`.
    ///
    /// * `.location(LatLon)`: **Required.**
    /// * `.name(&str)`: **Required.** Display name of the place.
    /// * `.mount(&str)`: **Required.** Identifier of the display mount point.
    /// * `.config(PipelineConfig)`: Optional. Defaults to [`PipelineConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`HeatStressError::HttpClient`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        location: LatLon,
        name: &str,
        mount: &str,
        config: Option<PipelineConfig>,
    ) -> Result<Self, HeatStressError> {
        let config = config.unwrap_or_default();
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .gzip(true)
            .build()
            .map_err(HeatStressError::HttpClient)?;
        let source = OpenMeteoSource::new(
            FetchClient::with_client(http, config.retry.clone()),
            config.endpoints.clone(),
        );
        let site = Site {
            location,
            name: name.to_string(),
            mount: mount.to_string(),
        };
        Ok(Self {
            pipeline: AcquisitionPipeline::new(source, site, config),
        })
    }

    /// Fetches, derives and renders every region. Never fails as a whole; the
    /// report tells which regions ended with an error placeholder.
    pub async fn run(&self, renderer: &impl Renderer) -> PipelineReport {
        self.pipeline.run(renderer).await
    }

    /// The session's lookup table. Settled after the first [`Self::run`].
    pub fn table_cache(&self) -> &TableCache {
        self.pipeline.table_cache()
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }
}
