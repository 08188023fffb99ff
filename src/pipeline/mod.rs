//! The three-phase acquisition pipeline.
//!
//! 1. Current conditions and climate projections, fetched concurrently while
//!    the lookup table loads in the background.
//! 2. After `phase2_delay`: the short historical window.
//! 3. After `phase3_delay`: the long-term window, fetched in sequential
//!    chunks, then a trend fit.
//!
//! A failure is caught at the region it affects and rendered as an error
//! placeholder there. It never stops a later phase.

pub mod chunks;
pub mod config;
pub mod error;
pub mod views;

use crate::dashboard::LatLon;
use crate::index::lookup::LookupEngine;
use crate::index::lookup_table::{TableCache, TableState};
use crate::pipeline::chunks::{fetch_chunked, plan_chunks};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::error::PhaseError;
use crate::pipeline::views::{CurrentView, HistoryViews, LongTermView, ProjectionView, View};
use crate::render::{Region, RenderTarget, Renderer};
use crate::source::ClimateSource;
use log::{info, warn};
use std::collections::BTreeMap;

/// The place a dashboard describes and where it is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub location: LatLon,
    pub name: String,
    pub mount: String,
}

/// Terminal state of one display region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseStatus {
    Succeeded,
    Failed(String),
}

impl PhaseStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, PhaseStatus::Succeeded)
    }
}

/// What a pipeline run ended with, per region.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub regions: BTreeMap<Region, PhaseStatus>,
    pub table: TableState,
}

impl PipelineReport {
    pub fn status(&self, region: Region) -> Option<&PhaseStatus> {
        self.regions.get(&region)
    }

    pub fn all_succeeded(&self) -> bool {
        self.regions.values().all(PhaseStatus::is_success)
    }
}

/// Orchestrates the phases against a [`ClimateSource`].
pub struct AcquisitionPipeline<S> {
    source: S,
    site: Site,
    config: PipelineConfig,
    table: TableCache,
}

impl<S: ClimateSource> AcquisitionPipeline<S> {
    pub fn new(source: S, site: Site, config: PipelineConfig) -> Self {
        Self {
            source,
            site,
            config,
            table: TableCache::new(),
        }
    }

    /// Replaces the table cache, e.g. with a prebuilt table. A cache that is
    /// already settled is not loaded again.
    pub fn with_table_cache(mut self, table: TableCache) -> Self {
        self.table = table;
        self
    }

    pub fn table_cache(&self) -> &TableCache {
        &self.table
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every phase to completion and reports the terminal state of each region.
    pub async fn run(&self, renderer: &impl Renderer) -> PipelineReport {
        let mut regions = BTreeMap::new();

        info!("Phase 1 for {}: current conditions and projections", self.site.name);
        self.current_phase(renderer, &mut regions).await;

        tokio::time::sleep(self.config.phase2_delay).await;
        info!("Phase 2 for {}: recent history", self.site.name);
        self.recent_phase(renderer, &mut regions).await;

        tokio::time::sleep(self.config.phase3_delay).await;
        info!("Phase 3 for {}: long-term trend", self.site.name);
        self.long_term_phase(renderer, &mut regions).await;

        PipelineReport {
            regions,
            table: self.table.state(),
        }
    }

    /// Loads the lookup table once. Failure only disables the lookup family.
    async fn load_table(&self) {
        if !self.table.begin_loading() {
            return;
        }
        match self.source.lookup_table().await {
            Ok(table) => {
                info!("Lookup table loaded");
                self.table.finish_loading(Some(table));
            }
            Err(e) => {
                warn!("Lookup table unavailable for this session, using baseline index: {}", e);
                self.table.finish_loading(None);
            }
        }
    }

    async fn current_phase(
        &self,
        renderer: &impl Renderer,
        regions: &mut BTreeMap<Region, PhaseStatus>,
    ) {
        let location = self.site.location;
        let models = &self.config.projection_models;

        // Both fetches and the table load are awaited together, so the table
        // state is settled before anything is derived from it.
        let ((), (current, projections)) = tokio::join!(self.load_table(), async {
            tokio::join!(
                self.source.current(location),
                self.source.projections(
                    location,
                    self.config.projection_start_year,
                    self.config.projection_end_year,
                    models,
                )
            )
        });

        let engine = LookupEngine::new(&self.table);
        let current = current
            .map(|c| View::Current(CurrentView::derive(&self.site.name, &c, &engine)))
            .map_err(PhaseError::from);
        self.settle(renderer, regions, Region::CurrentConditions, current);

        let projections = projections
            .map_err(PhaseError::from)
            .and_then(|daily| ProjectionView::derive(&daily, models))
            .map(View::Projections);
        self.settle(renderer, regions, Region::Projections, projections);
    }

    async fn recent_phase(
        &self,
        renderer: &impl Renderer,
        regions: &mut BTreeMap<Region, PhaseStatus>,
    ) {
        let targets = [
            Region::RecentHistory,
            Region::SeasonalCalendar,
            Region::MonthlyPeaks,
        ];
        let history = match self.config.recent_window() {
            Some((start, end)) => self
                .source
                .daily_archive(self.site.location, start, end)
                .await
                .map_err(PhaseError::from)
                .and_then(|series| HistoryViews::derive(&series)),
            None => Err(PhaseError::InvalidWindow {
                years: self.config.recent_years,
                last_year: self.config.last_complete_year(),
            }),
        };

        match history {
            Ok(views) => {
                let rendered = [
                    (Region::RecentHistory, View::RecentHistory(views.recent)),
                    (Region::SeasonalCalendar, View::SeasonalCalendar(views.seasonal)),
                    (Region::MonthlyPeaks, View::MonthlyPeaks(views.peaks)),
                ];
                for (region, view) in rendered {
                    self.settle(renderer, regions, region, Ok(view));
                }
            }
            Err(e) => {
                let message = e.to_string();
                for region in targets {
                    self.fail(renderer, regions, region, &message);
                }
            }
        }
    }

    async fn long_term_phase(
        &self,
        renderer: &impl Renderer,
        regions: &mut BTreeMap<Region, PhaseStatus>,
    ) {
        let (first, last) = self.config.long_term_years();
        let chunks = plan_chunks(first, last, self.config.chunk_years);

        let result = match fetch_chunked(
            &self.source,
            self.site.location,
            &chunks,
            self.config.chunk_delay,
        )
        .await
        {
            Ok(series) => LongTermView::derive(&series, chunks.len()).map(View::LongTermTrend),
            Err(e) => Err(PhaseError::from(e)),
        };
        self.settle(renderer, regions, Region::LongTermTrend, result);
    }

    fn settle(
        &self,
        renderer: &impl Renderer,
        regions: &mut BTreeMap<Region, PhaseStatus>,
        region: Region,
        result: Result<View, PhaseError>,
    ) {
        match result {
            Ok(view) => {
                renderer.render(&self.target(region), &view);
                info!("Region {} rendered", region);
                regions.insert(region, PhaseStatus::Succeeded);
            }
            Err(e) => self.fail(renderer, regions, region, &e.to_string()),
        }
    }

    fn fail(
        &self,
        renderer: &impl Renderer,
        regions: &mut BTreeMap<Region, PhaseStatus>,
        region: Region,
        message: &str,
    ) {
        warn!("Region {} failed: {}", region, message);
        renderer.render_error(&self.target(region), message);
        regions.insert(region, PhaseStatus::Failed(message.to_string()));
    }

    fn target(&self, region: Region) -> RenderTarget {
        RenderTarget::new(&self.site.mount, region)
    }
}
