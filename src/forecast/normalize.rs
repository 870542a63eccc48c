//! Daily-series normalizer.
//!
//! Open-Meteo returns the daily block column-wise: one array per variable,
//! aligned by index to the `time` array. This module turns it row-wise.
//! The `time` array drives the row count; a short or missing column only
//! yields absent cells.

use super::codes;
use super::types::{DailyRecord, ForecastDate, ForecastTable};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::warn;

const TIME: &str = "time";
const TEMP_MAX: &str = "temperature_2m_max";
const TEMP_MIN: &str = "temperature_2m_min";
const PRECIP: &str = "precipitation_sum";
const WEATHER_CODE: &str = "weathercode";

/// Daily variables requested from the collaborator, in request order.
pub const DAILY_FIELDS: [&str; 4] = [TEMP_MAX, TEMP_MIN, PRECIP, WEATHER_CODE];

/// Normalize a `daily` block. `None` when there is no date sequence to drive rows.
pub fn normalize_daily(daily: Option<&Value>) -> Option<ForecastTable> {
    let block = daily?.as_object()?;
    let dates = block.get(TIME)?.as_array()?;
    if dates.is_empty() {
        return None;
    }

    let tmax = column(block, TEMP_MAX);
    let tmin = column(block, TEMP_MIN);
    let precip = column(block, PRECIP);
    let wcode = column(block, WEATHER_CODE);

    let mut rows = Vec::with_capacity(dates.len());
    for (i, raw) in dates.iter().enumerate() {
        rows.push(DailyRecord {
            date: forecast_date(raw, i),
            max_temperature: number_at(tmax, i),
            min_temperature: number_at(tmin, i),
            precipitation_sum: number_at(precip, i),
            condition_text: wcode.get(i).map(|c| codes::describe_json(c).to_string()),
        });
    }
    Some(rows)
}

fn column<'a>(block: &'a Map<String, Value>, name: &str) -> &'a [Value] {
    block
        .get(name)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn forecast_date(raw: &Value, index: usize) -> ForecastDate {
    match raw.as_str().and_then(parse_day) {
        Some(day) => ForecastDate::Day(day),
        None => {
            warn!(index, value = %raw, "forecast date is not a calendar date; keeping it as sent");
            let text = raw.as_str().map_or_else(|| raw.to_string(), str::to_string);
            ForecastDate::Unparsed(text)
        }
    }
}

fn number_at(column: &[Value], i: usize) -> Option<f64> {
    column.get(i).and_then(Value::as_f64)
}

/// Calendar day from "YYYY-MM-DD" or an ISO date-time; the time part is dropped.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}
