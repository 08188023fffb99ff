//! Multi-model climate projections, reduced to yearly means.

use crate::aggregate::error::AggregateError;
use crate::aggregate::yearly::{to_yearly, YearlyMean};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const PROJECTED_VARIABLE: &str = "temperature_2m_max";

/// The `daily` object of a climate-endpoint response.
///
/// Each model's values arrive in their own column named
/// `temperature_2m_max_<MODEL>`, so the columns are kept as a map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClimateDaily {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(flatten)]
    pub columns: HashMap<String, Vec<Option<f64>>>,
}

impl ClimateDaily {
    /// The column for `model`. The unsuffixed column is only accepted for a
    /// single-model request, which is how the endpoint answers one.
    fn model_column(&self, model: &str, single_model: bool) -> Option<&[Option<f64>]> {
        self.columns
            .get(&format!("{PROJECTED_VARIABLE}_{model}"))
            .or_else(|| {
                single_model
                    .then(|| self.columns.get(PROJECTED_VARIABLE))
                    .flatten()
            })
            .map(Vec::as_slice)
    }
}

/// Yearly mean daily maximum for one climate model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelProjection {
    pub model: String,
    pub yearly: Vec<YearlyMean>,
}

/// Yearly mean daily maximum temperature per model plus the multi-model mean.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectionSeries {
    pub models: Vec<ModelProjection>,
    /// Per year, the mean over every model that has data for that year.
    pub ensemble: Vec<YearlyMean>,
}

impl ProjectionSeries {
    /// Reduces the raw climate columns for `models` to yearly means.
    ///
    /// Models whose column is absent from the response are skipped; a model
    /// that is present but holds no valid values ends up with an empty series.
    pub fn from_daily(daily: &ClimateDaily, models: &[String]) -> Result<Self, AggregateError> {
        let mut projections = Vec::with_capacity(models.len());
        for model in models {
            let Some(values) = daily.model_column(model, models.len() == 1) else {
                log::debug!("Projection response carries no column for model {}", model);
                continue;
            };
            projections.push(ModelProjection {
                model: model.clone(),
                yearly: to_yearly(&daily.time, values)?,
            });
        }

        let mut per_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
        for point in projections.iter().flat_map(|p| p.yearly.iter()) {
            let entry = per_year.entry(point.year).or_insert((0.0, 0));
            entry.0 += point.mean;
            entry.1 += 1;
        }
        let ensemble = per_year
            .into_iter()
            .map(|(year, (sum, count))| YearlyMean {
                year,
                mean: sum / count as f64,
            })
            .collect();

        Ok(Self {
            models: projections,
            ensemble,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_daily_builds_models_and_ensemble() {
        let json = r#"{
            "time": ["2030-01-01", "2030-07-01", "2031-01-01"],
            "temperature_2m_max_MODEL_A": [10.0, 30.0, 22.0],
            "temperature_2m_max_MODEL_B": [12.0, null, 24.0]
        }"#;
        let daily: ClimateDaily = serde_json::from_str(json).unwrap();
        let models = vec!["MODEL_A".to_string(), "MODEL_B".to_string()];
        let series = ProjectionSeries::from_daily(&daily, &models).unwrap();

        assert_eq!(series.models.len(), 2);
        assert_eq!(series.models[0].yearly[0], YearlyMean { year: 2030, mean: 20.0 });
        assert_eq!(series.models[1].yearly[0], YearlyMean { year: 2030, mean: 12.0 });
        assert_eq!(
            series.ensemble,
            vec![
                YearlyMean { year: 2030, mean: 16.0 },
                YearlyMean { year: 2031, mean: 23.0 },
            ]
        );
    }

    #[test]
    fn test_absent_model_is_skipped() {
        let json = r#"{
            "time": ["2030-01-01"],
            "temperature_2m_max_MODEL_A": [10.0]
        }"#;
        let daily: ClimateDaily = serde_json::from_str(json).unwrap();
        let models = vec!["MODEL_A".to_string(), "MODEL_B".to_string()];
        let series = ProjectionSeries::from_daily(&daily, &models).unwrap();
        assert_eq!(series.models.len(), 1);
        assert_eq!(series.models[0].model, "MODEL_A");
    }

    #[test]
    fn test_unsuffixed_column_only_for_single_model() {
        let json = r#"{
            "time": ["2030-01-01", "2031-01-01"],
            "temperature_2m_max": [20.0, 21.0]
        }"#;
        let daily: ClimateDaily = serde_json::from_str(json).unwrap();

        let single = ProjectionSeries::from_daily(&daily, &["MODEL_A".to_string()]).unwrap();
        assert_eq!(single.models.len(), 1);
        assert_eq!(single.models[0].yearly[1], YearlyMean { year: 2031, mean: 21.0 });

        let several = vec!["MODEL_A".to_string(), "MODEL_B".to_string()];
        let series = ProjectionSeries::from_daily(&daily, &several).unwrap();
        assert!(series.models.is_empty());
        assert!(series.ensemble.is_empty());
    }
}
