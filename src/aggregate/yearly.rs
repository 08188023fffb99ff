use crate::aggregate::error::{ensure_aligned, AggregateError};
use crate::types::daily_series::year_key;
use serde::Serialize;
use std::collections::BTreeMap;

/// Arithmetic mean of the valid observations in one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyMean {
    pub year: i32,
    pub mean: f64,
}

/// Groups `values` by the year prefix of the matching date and averages each group.
///
/// `None` values are skipped. A year with no valid value does not appear in
/// the output. Years come back sorted ascending.
///
/// # Errors
///
/// Returns [`AggregateError::LengthMismatch`] when `dates` and `values` are not
/// index-aligned.
///
/// # Examples
///
/// ```
/// use heatstress::to_yearly;
///
/// let dates = ["2020-06-01", "2020-06-02", "2021-06-01"];
/// let values = [Some(30.0), Some(34.0), Some(32.0)];
/// let yearly = to_yearly(&dates, &values).unwrap();
///
/// assert_eq!(yearly.iter().map(|y| y.year).collect::<Vec<_>>(), vec![2020, 2021]);
/// assert_eq!(yearly.iter().map(|y| y.mean).collect::<Vec<_>>(), vec![32.0, 32.0]);
/// ```
pub fn to_yearly(
    dates: &[impl AsRef<str>],
    values: &[Option<f64>],
) -> Result<Vec<YearlyMean>, AggregateError> {
    ensure_aligned(dates, values)?;

    let mut groups: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for (date, value) in dates.iter().zip(values) {
        let (Some(year), Some(value)) = (year_key(date.as_ref()), value) else {
            continue;
        };
        let entry = groups.entry(year).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    Ok(groups
        .into_iter()
        .map(|(year, (sum, count))| YearlyMean {
            year,
            mean: sum / count as f64,
        })
        .collect())
}
