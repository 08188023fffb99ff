use serde::{Deserialize, Serialize};

/// Instantaneous readings from the `current` object of a forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: String,                      // local ISO timestamp
    pub temperature_2m: f64,               // °C
    pub relative_humidity_2m: f64,         // %
    pub apparent_temperature: Option<f64>, // °C
    pub wind_speed_10m: Option<f64>,       // km/h
}
