//! Daily observation series as delivered by the archive endpoint.

use serde::{Deserialize, Serialize};

/// A single day of the series. Temperatures may be missing upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyObservation<'a> {
    /// ISO date, `YYYY-MM-DD`.
    pub date: &'a str,
    pub temperature_max: Option<f64>,
    pub apparent_temperature_max: Option<f64>,
}

/// Column-oriented daily series. The three arrays are index-aligned by date.
///
/// Deserialises directly from the `daily` object of an archive response. Any
/// array the upstream omitted comes back empty rather than failing the parse,
/// and a missing value inside an array becomes `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_max: Vec<Option<f64>>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterates the series one day at a time.
    ///
    /// A value array shorter than `time` yields `None` for the trailing days.
    pub fn observations(&self) -> impl Iterator<Item = DailyObservation<'_>> + '_ {
        self.time.iter().enumerate().map(move |(i, date)| DailyObservation {
            date: date.as_str(),
            temperature_max: self.temperature_2m_max.get(i).copied().flatten(),
            apparent_temperature_max: self.apparent_temperature_max.get(i).copied().flatten(),
        })
    }

    /// Appends `other` after `self`. Callers pass chunks in chronological order.
    ///
    /// Both sides are padded with `None` to the length of their `time`
    /// column, so the result stays index-aligned whichever part lacked a column.
    pub fn extend(&mut self, mut other: DailySeries) {
        self.pad_columns();
        other.pad_columns();

        self.time.extend(other.time);
        self.temperature_2m_max.extend(other.temperature_2m_max);
        self.apparent_temperature_max
            .extend(other.apparent_temperature_max);
    }

    fn pad_columns(&mut self) {
        let len = self.len();
        self.temperature_2m_max.resize(len, None);
        self.apparent_temperature_max.resize(len, None);
    }
}

/// Year key of an ISO-like date string: its first four characters.
pub fn year_key(date: &str) -> Option<i32> {
    date.get(0..4)?.parse().ok()
}

/// Month key (1-12) of an ISO-like date string: characters 5 and 6.
pub fn month_key(date: &str) -> Option<u32> {
    let month: u32 = date.get(5..7)?.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
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
    fn test_deserialize_with_nulls() {
        let json = r#"{
            "time": ["2021-07-01", "2021-07-02"],
            "temperature_2m_max": [31.2, null],
            "apparent_temperature_max": [null, 36.0]
        }"#;
        let parsed: DailySeries = serde_json::from_str(json).unwrap();
        let days: Vec<_> = parsed.observations().collect();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].temperature_max, Some(31.2));
        assert_eq!(days[0].apparent_temperature_max, None);
        assert_eq!(days[1].temperature_max, None);
        assert_eq!(days[1].apparent_temperature_max, Some(36.0));
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let parsed: DailySeries = serde_json::from_str(r#"{"time": ["2021-07-01"]}"#).unwrap();
        let day = parsed.observations().next().unwrap();
        assert_eq!(day.temperature_max, None);
        assert_eq!(day.apparent_temperature_max, None);
    }

    #[test]
    fn test_extend_keeps_chronological_order() {
        let mut first = series(&[("1990-01-01", Some(1.0), Some(2.0))]);
        let second = series(&[
            ("1991-01-01", Some(3.0), None),
            ("1991-01-02", None, Some(4.0)),
        ]);
        first.extend(second);
        assert_eq!(first.time, vec!["1990-01-01", "1991-01-01", "1991-01-02"]);
        assert_eq!(first.temperature_2m_max, vec![Some(1.0), Some(3.0), None]);
        assert_eq!(first.apparent_temperature_max, vec![Some(2.0), None, Some(4.0)]);
    }

    #[test]
    fn test_extend_pads_short_columns() {
        let mut first = DailySeries {
            time: vec!["1990-01-01".into()],
            temperature_2m_max: vec![],
            apparent_temperature_max: vec![Some(5.0)],
        };
        first.extend(series(&[("1990-01-02", Some(6.0), Some(7.0))]));
        assert_eq!(first.temperature_2m_max, vec![None, Some(6.0)]);
    }

    #[test]
    fn test_extend_pads_trailing_chunk_without_column() {
        let mut combined = DailySeries::default();
        combined.extend(series(&[
            ("2000-07-01", Some(30.0), Some(33.0)),
            ("2001-07-01", Some(31.0), Some(34.0)),
        ]));
        combined.extend(DailySeries {
            time: vec!["2002-07-01".into(), "2003-07-01".into()],
            temperature_2m_max: vec![],
            apparent_temperature_max: vec![Some(35.0), Some(36.0)],
        });
        assert_eq!(combined.len(), 4);
        assert_eq!(
            combined.temperature_2m_max,
            vec![Some(30.0), Some(31.0), None, None]
        );
        assert_eq!(combined.apparent_temperature_max.len(), 4);
    }

    #[test]
    fn test_date_keys() {
        assert_eq!(year_key("2020-06-01"), Some(2020));
        assert_eq!(month_key("2020-06-01"), Some(6));
        assert_eq!(month_key("2020-13-01"), None);
        assert_eq!(year_key("20"), None);
        assert_eq!(month_key("2020"), None);
    }
}
