//! Open-Meteo (WMO) weather codes to short descriptions.
//!
//! The table is deliberately partial: freezing drizzle/rain (56, 57, 66, 67),
//! snow grains (77) and snow showers (85, 86) fall through to [`UNKNOWN_LABEL`].

use serde_json::Value;

pub const UNKNOWN_LABEL: &str = "Unknown";

pub const WEATHER_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Drizzle: Light"),
    (53, "Drizzle: Moderate"),
    (55, "Drizzle: Dense"),
    (61, "Rain: Slight"),
    (63, "Rain: Moderate"),
    (65, "Rain: Heavy"),
    (71, "Snow fall: Slight"),
    (73, "Snow fall: Moderate"),
    (75, "Snow fall: Heavy"),
    (80, "Rain showers: Slight"),
    (81, "Rain showers: Moderate"),
    (82, "Rain showers: Violent"),
    (95, "Thunderstorm: Moderate"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Translate a weather code. Total: anything outside the table is "Unknown".
pub fn describe(code: i64) -> &'static str {
    WEATHER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(UNKNOWN_LABEL, |(_, label)| label)
}

/// Translate a code as it appears in a JSON payload.
///
/// Integral floats (`61.0`) are accepted; `null`, strings and fractional
/// numbers are "Unknown".
pub fn describe_json(value: &Value) -> &'static str {
    if let Some(code) = value.as_i64() {
        return describe(code);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            describe(f as i64)
        }
        _ => UNKNOWN_LABEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_documented_examples() {
        assert_eq!(describe(3), "Overcast");
        assert_eq!(describe(1000), "Unknown");
    }

    #[test]
    fn test_every_table_entry() {
        let expected = [
            (0, "Clear sky"),
            (1, "Mainly clear"),
            (2, "Partly cloudy"),
            (45, "Fog"),
            (48, "Depositing rime fog"),
            (51, "Drizzle: Light"),
            (53, "Drizzle: Moderate"),
            (55, "Drizzle: Dense"),
            (61, "Rain: Slight"),
            (63, "Rain: Moderate"),
            (65, "Rain: Heavy"),
            (71, "Snow fall: Slight"),
            (73, "Snow fall: Moderate"),
            (75, "Snow fall: Heavy"),
            (80, "Rain showers: Slight"),
            (81, "Rain showers: Moderate"),
            (82, "Rain showers: Violent"),
            (95, "Thunderstorm: Moderate"),
            (96, "Thunderstorm with slight hail"),
            (99, "Thunderstorm with heavy hail"),
        ];
        for (code, label) in expected {
            assert_eq!(describe(code), label, "code {}", code);
        }
        assert_eq!(WEATHER_CODES.len(), 21);
    }

    #[test]
    fn test_unassigned_codes_are_unknown() {
        for code in [56, 57, 66, 67, 77, 85, 86, 4, 100, -1, i64::MIN, i64::MAX] {
            assert_eq!(describe(code), UNKNOWN_LABEL, "code {}", code);
        }
    }

    #[test]
    fn test_describe_json() {
        assert_eq!(describe_json(&json!(61)), "Rain: Slight");
        assert_eq!(describe_json(&json!(61.0)), "Rain: Slight");
        assert_eq!(describe_json(&json!(61.5)), UNKNOWN_LABEL);
        assert_eq!(describe_json(&Value::Null), UNKNOWN_LABEL);
        assert_eq!(describe_json(&json!("61")), UNKNOWN_LABEL);
    }
}
