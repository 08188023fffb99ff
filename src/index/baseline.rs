//! Closed-form regression heat index (Rothfusz fit of Steadman's table).
//!
//! Used both as a comparison series and as the fallback when the lookup
//! table is unavailable. Works in °F internally, returns °C.

/// Below this temperature (°F) the regression is not applied.
pub const REGRESSION_FLOOR_F: f64 = 80.0;

const C1: f64 = -42.379;
const C2: f64 = 2.049_015_23;
const C3: f64 = 10.143_331_27;
const C4: f64 = -0.224_755_41;
const C5: f64 = -6.837_83e-3;
const C6: f64 = -5.481_717e-2;
const C7: f64 = 1.228_74e-3;
const C8: f64 = 8.5282e-4;
const C9: f64 = -1.99e-6;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Heat index for `temperature` (°C) and relative `humidity` (%), in °C.
///
/// Returns `temperature` unchanged when it converts to below 80 °F.
///
/// # Examples
///
/// ```
/// use heatstress::baseline_index;
///
/// assert_eq!(baseline_index(20.0, 90.0), 20.0);
/// assert!(baseline_index(35.0, 60.0) > 35.0);
/// ```
pub fn baseline_index(temperature: f64, humidity: f64) -> f64 {
    let t = celsius_to_fahrenheit(temperature);
    if t < REGRESSION_FLOOR_F {
        return temperature;
    }
    let rh = humidity;

    let mut hi = C1
        + C2 * t
        + C3 * rh
        + C4 * t * rh
        + C5 * t * t
        + C6 * rh * rh
        + C7 * t * t * rh
        + C8 * t * rh * rh
        + C9 * t * t * rh * rh;

    if rh < 13.0 && (80.0..=112.0).contains(&t) {
        hi -= ((13.0 - rh) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    } else if rh > 85.0 && (80.0..=87.0).contains(&t) {
        hi += ((rh - 85.0) / 10.0) * ((87.0 - t) / 5.0);
    }

    fahrenheit_to_celsius(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_regression_f(t: f64, rh: f64) -> f64 {
        C1 + C2 * t + C3 * rh + C4 * t * rh + C5 * t * t + C6 * rh * rh + C7 * t * t * rh
            + C8 * t * rh * rh
            + C9 * t * t * rh * rh
    }

    #[test]
    fn test_identity_below_80f() {
        // 26.6 °C = 79.88 °F
        for (t, rh) in [(-10.0, 50.0), (0.0, 100.0), (20.0, 90.0), (26.6, 100.0)] {
            assert_eq!(baseline_index(t, rh), t);
        }
    }

    #[test]
    fn test_regression_applies_above_80f() {
        // 27 °C = 80.6 °F
        let expected = fahrenheit_to_celsius(raw_regression_f(80.6, 40.0));
        assert!((baseline_index(27.0, 40.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_known_nws_value() {
        // NWS table: 96 °F at 65 % reads 121 °F.
        let value = celsius_to_fahrenheit(baseline_index(fahrenheit_to_celsius(96.0), 65.0));
        assert!((value - 121.0).abs() < 1.0, "got {value}");
    }

    #[test]
    fn test_low_humidity_correction() {
        let t_f = 100.0;
        let rh = 10.0;
        let base = raw_regression_f(t_f, rh);
        let adjusted = celsius_to_fahrenheit(baseline_index(fahrenheit_to_celsius(t_f), rh));
        let expected = base - (3.0 / 4.0) * ((17.0 - 5.0_f64) / 17.0).sqrt();
        assert!((adjusted - expected).abs() < 1e-9);
    }

    #[test]
    fn test_low_humidity_correction_inactive_above_112f() {
        let t_f = 115.0;
        let adjusted = celsius_to_fahrenheit(baseline_index(fahrenheit_to_celsius(t_f), 10.0));
        assert!((adjusted - raw_regression_f(t_f, 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_high_humidity_correction() {
        let t_f = 82.0;
        let rh = 95.0;
        let adjusted = celsius_to_fahrenheit(baseline_index(fahrenheit_to_celsius(t_f), rh));
        let expected = raw_regression_f(t_f, rh) + (10.0 / 10.0) * (5.0 / 5.0);
        assert!((adjusted - expected).abs() < 1e-9);
    }

    #[test]
    fn test_high_humidity_correction_inactive_above_87f() {
        let t_f = 90.0;
        let adjusted = celsius_to_fahrenheit(baseline_index(fahrenheit_to_celsius(t_f), 95.0));
        assert!((adjusted - raw_regression_f(t_f, 95.0)).abs() < 1e-9);
    }
}
