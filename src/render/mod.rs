//! The rendering collaborator: receives derived values or error messages for
//! a display region and owns no business logic.

pub mod json_lines;

use crate::pipeline::views::View;
use serde::Serialize;
use std::fmt;

/// A display region. Each region is written by exactly one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    CurrentConditions,
    Projections,
    RecentHistory,
    SeasonalCalendar,
    MonthlyPeaks,
    LongTermTrend,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::CurrentConditions,
        Region::Projections,
        Region::RecentHistory,
        Region::SeasonalCalendar,
        Region::MonthlyPeaks,
        Region::LongTermTrend,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Region::CurrentConditions => "current",
            Region::Projections => "projections",
            Region::RecentHistory => "recent-history",
            Region::SeasonalCalendar => "seasonal",
            Region::MonthlyPeaks => "monthly-peaks",
            Region::LongTermTrend => "long-term",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Where a view is displayed: a region under the dashboard's mount point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RenderTarget {
    pub mount: String,
    pub region: Region,
}

impl RenderTarget {
    pub fn new(mount: &str, region: Region) -> Self {
        Self {
            mount: mount.to_string(),
            region,
        }
    }

    /// `"<mount>-<region>"`, e.g. `"heat-panel-seasonal"`.
    pub fn element_id(&self) -> String {
        format!("{}-{}", self.mount, self.region)
    }
}

pub trait Renderer {
    /// Displays `view` in `target`.
    fn render(&self, target: &RenderTarget, view: &View);

    /// Replaces `target` with an error placeholder carrying `message`.
    fn render_error(&self, target: &RenderTarget, message: &str);
}
