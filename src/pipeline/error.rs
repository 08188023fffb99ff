use crate::aggregate::error::AggregateError;
use crate::fetch::error::FetchError;
use thiserror::Error;

/// Why a phase (or one region of it) ended in the failed state.
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Upstream response is missing the '{0}' series; please try again later")]
    MissingField(&'static str),

    #[error("Cannot build a {years}-year historical window ending in {last_year}")]
    InvalidWindow { years: u32, last_year: i32 },
}
