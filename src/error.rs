use crate::aggregate::error::AggregateError;
use crate::fetch::error::FetchError;
use crate::pipeline::error::PhaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeatStressError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
