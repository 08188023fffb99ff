use crate::aggregate::error::AggregateError;
use crate::aggregate::yearly::YearlyMean;
use serde::Serialize;
use std::collections::BTreeSet;

/// Ordinary-least-squares line through (year, yearly mean) points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendFit {
    /// °C per year.
    pub slope: f64,
    pub intercept: f64,
    /// `slope × (last_year − first_year)`.
    pub total_change: f64,
    pub first_year: i32,
    pub last_year: i32,
}

impl TrendFit {
    /// Fitted value for `year`.
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

/// Fits a linear trend to yearly means.
///
/// # Errors
///
/// Returns [`AggregateError::DegenerateTrend`] when fewer than two distinct
/// years are present, since the year variance would be zero.
///
/// # Examples
///
/// ```
/// use heatstress::{linear_trend, YearlyMean};
///
/// let points = [
///     YearlyMean { year: 2000, mean: 30.0 },
///     YearlyMean { year: 2001, mean: 31.0 },
///     YearlyMean { year: 2002, mean: 32.0 },
/// ];
/// let fit = linear_trend(&points).unwrap();
/// assert!((fit.slope - 1.0).abs() < 1e-9);
/// assert!((fit.total_change - 2.0).abs() < 1e-9);
/// ```
pub fn linear_trend(points: &[YearlyMean]) -> Result<TrendFit, AggregateError> {
    let distinct_years = points.iter().map(|p| p.year).collect::<BTreeSet<_>>();
    let (Some(&first_year), Some(&last_year)) = (distinct_years.first(), distinct_years.last())
    else {
        return Err(AggregateError::DegenerateTrend { distinct_years: 0 });
    };
    if distinct_years.len() < 2 {
        return Err(AggregateError::DegenerateTrend {
            distinct_years: distinct_years.len(),
        });
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.year as f64).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.mean).sum::<f64>() / n;

    let (covariance, variance) = points.iter().fold((0.0, 0.0), |(cov, var), p| {
        let dx = p.year as f64 - mean_x;
        (cov + dx * (p.mean - mean_y), var + dx * dx)
    });
    if variance == 0.0 {
        return Err(AggregateError::DegenerateTrend {
            distinct_years: distinct_years.len(),
        });
    }

    let slope = covariance / variance;
    Ok(TrendFit {
        slope,
        intercept: mean_y - slope * mean_x,
        total_change: slope * (last_year - first_year) as f64,
        first_year,
        last_year,
    })
}
