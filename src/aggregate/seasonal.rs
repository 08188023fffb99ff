//! Month-of-year reductions: monthly means, the seasonal calendar and the
//! year × month peak grid.

use crate::aggregate::error::{ensure_aligned, AggregateError};
use crate::types::daily_series::{month_key, year_key, DailySeries};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Apparent-temperature threshold (°C) counted by the seasonal calendar.
pub const HOT_DAY_THRESHOLD: f64 = 35.0;

/// One month of the seasonal calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthSlot {
    /// 1 = January … 12 = December.
    pub month: u32,
    pub mean_max: Option<f64>,
    pub mean_apparent_max: Option<f64>,
    /// Days with apparent max ≥ [`HOT_DAY_THRESHOLD`], averaged per year in the input.
    pub avg_hot_days: f64,
}

/// Twelve month slots, January first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalCalendar {
    pub months: [MonthSlot; 12],
    /// Number of distinct years the day counts were normalised by.
    pub years_observed: usize,
}

/// Maximum apparent temperature per (year, month) cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakGrid {
    /// Every year present in the input, ascending. One row per year.
    pub years: Vec<i32>,
    pub rows: Vec<[Option<f64>; 12]>,
}

#[derive(Default, Clone, Copy)]
struct Running {
    sum: f64,
    count: usize,
}

impl Running {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean of `values` per calendar month across every year of the input.
///
/// Months without a valid value are `None`.
pub fn to_monthly(
    dates: &[impl AsRef<str>],
    values: &[Option<f64>],
) -> Result<[Option<f64>; 12], AggregateError> {
    ensure_aligned(dates, values)?;

    let mut months = [Running::default(); 12];
    for (date, value) in dates.iter().zip(values) {
        if let (Some(month), Some(value)) = (month_key(date.as_ref()), value) {
            months[month as usize - 1].push(*value);
        }
    }
    Ok(months.map(|m| m.mean()))
}

/// Builds the seasonal calendar for a daily series.
///
/// The hot-day count of each month is divided by the number of distinct years
/// present in `series`, so a five-year and a thirty-year window both produce
/// a per-year rate.
pub fn seasonal_calendar(series: &DailySeries) -> SeasonalCalendar {
    let mut max = [Running::default(); 12];
    let mut apparent = [Running::default(); 12];
    let mut hot_days = [0usize; 12];
    let mut years = BTreeSet::new();

    for day in series.observations() {
        if let Some(year) = year_key(day.date) {
            years.insert(year);
        }
        let Some(month) = month_key(day.date) else {
            continue;
        };
        let slot = month as usize - 1;
        if let Some(t) = day.temperature_max {
            max[slot].push(t);
        }
        if let Some(at) = day.apparent_temperature_max {
            apparent[slot].push(at);
            if at >= HOT_DAY_THRESHOLD {
                hot_days[slot] += 1;
            }
        }
    }

    let years_observed = years.len();
    let months = std::array::from_fn(|i| MonthSlot {
        month: i as u32 + 1,
        mean_max: max[i].mean(),
        mean_apparent_max: apparent[i].mean(),
        avg_hot_days: if years_observed == 0 {
            0.0
        } else {
            hot_days[i] as f64 / years_observed as f64
        },
    });

    SeasonalCalendar {
        months,
        years_observed,
    }
}

/// Builds the year × month grid of peak apparent temperature.
pub fn monthly_peak_grid(series: &DailySeries) -> PeakGrid {
    let mut grid: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();

    for day in series.observations() {
        let Some(year) = year_key(day.date) else {
            continue;
        };
        let row = grid.entry(year).or_insert([None; 12]);
        let (Some(month), Some(at)) = (month_key(day.date), day.apparent_temperature_max) else {
            continue;
        };
        let cell = &mut row[month as usize - 1];
        *cell = Some(cell.map_or(at, |peak| peak.max(at)));
    }

    let (years, rows) = grid.into_iter().unzip();
    PeakGrid { years, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(days: &[(&str, Option<f64>, Option<f64>)]) -> DailySeries {
        DailySeries {
            time: days.iter().map(|d| d.0.to_string()).collect(),
            temperature_2m_max: days.iter().map(|d| d.1).collect(),
            apparent_temperature_max: days.iter().map(|d| d.2).collect(),
        }
    }

    #[test]
    fn test_to_monthly_across_years() {
        let dates = ["2020-01-10", "2021-01-10", "2021-02-01"];
        let values = [Some(10.0), Some(20.0), None];
        let months = to_monthly(&dates, &values).unwrap();
        assert_eq!(months[0], Some(15.0));
        assert_eq!(months[1], None);
        assert!(months[2..].iter().all(Option::is_none));
    }

    #[test]
    fn test_calendar_means_are_independently_null_safe() {
        let calendar = seasonal_calendar(&series(&[
            ("2020-07-01", Some(30.0), None),
            ("2020-07-02", Some(32.0), None),
            ("2020-08-01", None, Some(38.0)),
        ]));
        let july = calendar.months[6];
        assert_eq!(july.month, 7);
        assert_eq!(july.mean_max, Some(31.0));
        assert_eq!(july.mean_apparent_max, None);

        let august = calendar.months[7];
        assert_eq!(august.mean_max, None);
        assert_eq!(august.mean_apparent_max, Some(38.0));

        let january = calendar.months[0];
        assert_eq!(january.mean_max, None);
        assert_eq!(january.avg_hot_days, 0.0);
    }

    #[test]
    fn test_hot_days_normalised_by_distinct_years() {
        // Two years in the window, three hot July days in total.
        let calendar = seasonal_calendar(&series(&[
            ("2020-07-01", None, Some(35.0)),
            ("2020-07-02", None, Some(36.0)),
            ("2020-07-03", None, Some(34.9)),
            ("2021-07-01", None, Some(41.0)),
            ("2021-01-01", None, Some(5.0)),
        ]));
        assert_eq!(calendar.years_observed, 2);
        assert_eq!(calendar.months[6].avg_hot_days, 1.5);
    }

    #[test]
    fn test_denominator_follows_window_length() {
        let mut days = Vec::new();
        let dates: Vec<String> = (2001..=2010).map(|y| format!("{y}-06-15")).collect();
        for date in &dates {
            days.push((date.as_str(), None, Some(40.0)));
        }
        let calendar = seasonal_calendar(&series(&days));
        assert_eq!(calendar.years_observed, 10);
        assert_eq!(calendar.months[5].avg_hot_days, 1.0);
    }

    #[test]
    fn test_empty_series() {
        let calendar = seasonal_calendar(&DailySeries::default());
        assert_eq!(calendar.years_observed, 0);
        assert!(calendar
            .months
            .iter()
            .all(|m| m.mean_max.is_none() && m.avg_hot_days == 0.0));
    }

    #[test]
    fn test_peak_grid() {
        let grid = monthly_peak_grid(&series(&[
            ("2020-07-01", None, Some(33.0)),
            ("2020-07-02", None, Some(37.5)),
            ("2020-07-03", None, None),
            ("2021-01-05", None, None),
            ("2021-08-01", None, Some(29.0)),
        ]));
        assert_eq!(grid.years, vec![2020, 2021]);
        assert_eq!(grid.rows[0][6], Some(37.5));
        assert_eq!(grid.rows[0][7], None);
        assert_eq!(grid.rows[1][0], None);
        assert_eq!(grid.rows[1][7], Some(29.0));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = series(&[("2020-07-01", Some(30.0), Some(36.0))]);
        let before = input.clone();
        let _ = seasonal_calendar(&input);
        let _ = monthly_peak_grid(&input);
        assert_eq!(input, before);
    }
}
