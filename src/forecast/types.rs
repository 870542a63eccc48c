//! Core types for the forecast subsystem.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Day counts the weather collaborator is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ForecastDays {
    Three,
    Five,
    #[default]
    Seven,
    Ten,
}

impl ForecastDays {
    pub const ALL: [ForecastDays; 4] = [Self::Three, Self::Five, Self::Seven, Self::Ten];

    pub fn count(self) -> u8 {
        match self {
            Self::Three => 3,
            Self::Five => 5,
            Self::Seven => 7,
            Self::Ten => 10,
        }
    }
}

impl TryFrom<u8> for ForecastDays {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.count() == n)
            .ok_or_else(|| format!("Unsupported day count {}. Use 3, 5, 7 or 10.", n))
    }
}

impl From<ForecastDays> for u8 {
    fn from(d: ForecastDays) -> u8 {
        d.count()
    }
}

impl FromStr for ForecastDays {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("Unsupported day count '{}'. Use 3, 5, 7 or 10.", s))?;
        Self::try_from(n)
    }
}

impl fmt::Display for ForecastDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Raw weather payload, kept exactly as the collaborator sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastPayload(Map<String, Value>);

impl ForecastPayload {
    /// Accepts only JSON objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// IANA zone the collaborator localized the series to.
    pub fn timezone(&self) -> Option<&str> {
        self.0.get("timezone").and_then(Value::as_str)
    }

    pub fn daily(&self) -> Option<&Value> {
        self.0.get("daily")
    }

    /// The `current_weather` block; `None` when missing or empty.
    pub fn current(&self) -> Option<CurrentConditions> {
        let block = self.0.get("current_weather")?.as_object()?;
        if block.is_empty() {
            return None;
        }
        Some(CurrentConditions {
            temperature: block.get("temperature").and_then(Value::as_f64),
            windspeed: block.get("windspeed").and_then(Value::as_f64),
            wind_direction: block.get("winddirection").and_then(Value::as_f64),
            observed_at: block.get("time").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// Current conditions as reported alongside the daily series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    /// km/h
    pub windspeed: Option<f64>,
    /// Degrees, meteorological convention
    pub wind_direction: Option<f64>,
    /// Local ISO timestamp, e.g. "2024-01-01T12:00"
    pub observed_at: Option<String>,
}

impl CurrentConditions {
    /// Observation time with the zone abbreviation appended when the zone is known.
    ///
    /// The timestamp is already local, so this only labels it.
    pub fn observed_label(&self, timezone: Option<&str>) -> Option<String> {
        let raw = self.observed_at.as_deref()?;
        let labelled = timezone
            .and_then(|tz| tz.parse::<Tz>().ok())
            .zip(parse_local_timestamp(raw))
            .and_then(|(tz, naive)| tz.from_local_datetime(&naive).earliest())
            .map(|dt| dt.format("%Y-%m-%d %H:%M %Z").to_string());
        Some(labelled.unwrap_or_else(|| raw.to_string()))
    }
}

fn parse_local_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Date of a forecast row. A value that is not a calendar date is carried
/// through as the collaborator sent it, so the row count still matches the
/// date sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForecastDate {
    Day(NaiveDate),
    Unparsed(String),
}

impl ForecastDate {
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            Self::Day(d) => Some(*d),
            Self::Unparsed(_) => None,
        }
    }
}

impl From<NaiveDate> for ForecastDate {
    fn from(d: NaiveDate) -> Self {
        Self::Day(d)
    }
}

impl fmt::Display for ForecastDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(d) => write!(f, "{}", d),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: ForecastDate,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub condition_text: Option<String>,
}

/// Chronological daily records, in collaborator order.
pub type ForecastTable = Vec<DailyRecord>;

/// Why a forecast call produced no usable payload.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Weather service returned HTTP {0}")]
    Status(u16),
    #[error("Invalid weather response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> ForecastPayload {
        ForecastPayload::from_value(v).unwrap()
    }

    #[test]
    fn test_days_parse() {
        assert_eq!("5".parse::<ForecastDays>().unwrap(), ForecastDays::Five);
        assert_eq!(ForecastDays::try_from(10).unwrap(), ForecastDays::Ten);
        assert!("4".parse::<ForecastDays>().is_err());
        assert!("seven".parse::<ForecastDays>().is_err());
        assert_eq!(ForecastDays::default().count(), 7);
    }

    #[test]
    fn test_days_serde_as_number() {
        assert_eq!(serde_json::to_string(&ForecastDays::Three).unwrap(), "3");
        let d: ForecastDays = serde_json::from_str("10").unwrap();
        assert_eq!(d, ForecastDays::Ten);
        assert!(serde_json::from_str::<ForecastDays>("6").is_err());
    }

    #[test]
    fn test_payload_rejects_non_object() {
        assert!(ForecastPayload::from_value(json!([1, 2])).is_none());
        assert!(ForecastPayload::from_value(json!("x")).is_none());
    }

    #[test]
    fn test_current_block() {
        let p = payload(json!({
            "timezone": "Asia/Karachi",
            "current_weather": {
                "temperature": 31.2, "windspeed": 11.5,
                "winddirection": 240, "time": "2024-06-01T14:00"
            }
        }));
        let cur = p.current().unwrap();
        assert_eq!(cur.temperature, Some(31.2));
        assert_eq!(cur.wind_direction, Some(240.0));
        assert_eq!(p.timezone(), Some("Asia/Karachi"));
    }

    #[test]
    fn test_current_missing_or_empty() {
        assert!(payload(json!({"daily": {}})).current().is_none());
        assert!(payload(json!({"current_weather": {}})).current().is_none());
    }

    #[test]
    fn test_current_partial_fields() {
        let p = payload(json!({"current_weather": {"temperature": 3.5}}));
        let cur = p.current().unwrap();
        assert_eq!(cur.temperature, Some(3.5));
        assert!(cur.windspeed.is_none());
        assert!(cur.observed_at.is_none());
    }

    #[test]
    fn test_observed_label() {
        let cur = CurrentConditions {
            temperature: None,
            windspeed: None,
            wind_direction: None,
            observed_at: Some("2024-01-15T09:00".into()),
        };
        assert_eq!(
            cur.observed_label(Some("Europe/Berlin")).unwrap(),
            "2024-01-15 09:00 CET"
        );
        assert_eq!(cur.observed_label(Some("Mars/Olympus")).unwrap(), "2024-01-15T09:00");
        assert_eq!(cur.observed_label(None).unwrap(), "2024-01-15T09:00");
    }

    #[test]
    fn test_forecast_date_serializes_as_plain_string() {
        let day = ForecastDate::from(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(serde_json::to_value(&day).unwrap(), json!("2024-06-01"));
        assert_eq!(day.to_string(), "2024-06-01");

        let raw = ForecastDate::Unparsed("soon".into());
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!("soon"));
        assert_eq!(raw.day(), None);

        let back: ForecastDate = serde_json::from_value(json!("2024-06-01")).unwrap();
        assert_eq!(back, day);
    }
}
