//! Splitting the long-term window into sequential sub-requests.

use crate::dashboard::LatLon;
use crate::fetch::error::FetchError;
use crate::source::ClimateSource;
use crate::types::daily_series::DailySeries;
use chrono::NaiveDate;
use log::debug;
use std::time::Duration;

/// One sub-request of the long-term archive window, whole years, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearChunk {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Splits `first_year..=last_year` into chronological spans of `span` years.
/// The last chunk may be shorter. An inverted range yields no chunks.
pub fn plan_chunks(first_year: i32, last_year: i32, span: u32) -> Vec<YearChunk> {
    let span = span.max(1) as i32;
    let mut chunks = Vec::new();
    let mut year = first_year;
    while year <= last_year {
        let chunk_end = (year + span - 1).min(last_year);
        if let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(chunk_end, 12, 31),
        ) {
            chunks.push(YearChunk { start, end });
        }
        year = chunk_end + 1;
    }
    chunks
}

/// Fetches `chunks` one after another and concatenates them in order.
///
/// Each request is awaited before the next is sent, with `delay` between
/// consecutive requests. The first failing chunk fails the whole fetch.
pub async fn fetch_chunked<S: ClimateSource + ?Sized>(
    source: &S,
    location: LatLon,
    chunks: &[YearChunk],
    delay: Duration,
) -> Result<DailySeries, FetchError> {
    let mut combined = DailySeries::default();
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        debug!(
            "Fetching long-term chunk {}/{} ({} to {})",
            i + 1,
            chunks.len(),
            chunk.start,
            chunk.end
        );
        let part = source.daily_archive(location, chunk.start, chunk.end).await?;
        combined.extend(part);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years(chunks: &[YearChunk]) -> Vec<(String, String)> {
        chunks
            .iter()
            .map(|c| (c.start.to_string(), c.end.to_string()))
            .collect()
    }

    #[test]
    fn test_plan_three_chunks() {
        let chunks = plan_chunks(1950, 2023, 25);
        assert_eq!(
            years(&chunks),
            vec![
                ("1950-01-01".to_string(), "1974-12-31".to_string()),
                ("1975-01-01".to_string(), "1999-12-31".to_string()),
                ("2000-01-01".to_string(), "2023-12-31".to_string()),
            ]
        );
    }

    #[test]
    fn test_plan_exact_multiple_and_single_year() {
        assert_eq!(plan_chunks(2000, 2009, 5).len(), 2);
        assert_eq!(plan_chunks(2000, 2000, 25).len(), 1);
        assert!(plan_chunks(2001, 2000, 25).is_empty());
    }

    #[test]
    fn test_plan_zero_span_is_one_year() {
        assert_eq!(plan_chunks(2000, 2002, 0).len(), 3);
    }
}
