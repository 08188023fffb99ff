use std::path::PathBuf;

pub const FORECAST_BASE: &str = "https://api.open-meteo.com";
pub const ARCHIVE_BASE: &str = "https://archive-api.open-meteo.com";
pub const CLIMATE_BASE: &str = "https://climate-api.open-meteo.com";
pub const TABLE_PATH: &str = "data/ehi_table.json";

/// Where the lookup-table asset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLocation {
    Url(String),
    File(PathBuf),
}

impl Default for TableLocation {
    fn default() -> Self {
        TableLocation::File(PathBuf::from(TABLE_PATH))
    }
}

/// Base URLs of the upstream services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub forecast: String,
    pub archive: String,
    pub climate: String,
    pub table: TableLocation,
}

impl Endpoints {
    /// Points every service, and the table asset, at one host.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            forecast: base.to_string(),
            archive: base.to_string(),
            climate: base.to_string(),
            table: TableLocation::Url(format!("{base}/{TABLE_PATH}")),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: FORECAST_BASE.to_string(),
            archive: ARCHIVE_BASE.to_string(),
            climate: CLIMATE_BASE.to_string(),
            table: TableLocation::default(),
        }
    }
}
