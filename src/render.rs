//! Terminal rendering of a [`ForecastReport`]: current conditions, the daily
//! table, two ASCII charts and per-day details.

use crate::forecast::{CurrentConditions, DailyRecord};
use crate::service::ForecastReport;
use std::fmt::Write as _;

const CHART_WIDTH: usize = 40;
const MISSING: &str = "\u{2014}";

pub const ATTRIBUTION: &str =
    "APIs: Nominatim (OpenStreetMap) & Open-Meteo. Use responsibly and avoid high-frequency automated requests.";

/// Render the whole report. Charts are optional (`--no-charts`).
pub fn render_report(report: &ForecastReport, charts: bool) -> String {
    let mut out = String::new();
    out.push_str(&report.location.display_line());
    out.push_str("\n\n");

    match &report.current {
        Some(current) => out.push_str(&render_current(current, report.timezone.as_deref())),
        None => out.push_str("No current weather block available for this location.\n"),
    }
    out.push('\n');

    if report.daily.is_empty() {
        out.push_str("No daily forecast available.\n");
    } else {
        let _ = writeln!(out, "{}-day Forecast", report.daily.len());
        out.push_str(&render_table(&report.daily));
        if charts {
            out.push('\n');
            out.push_str(&render_temperature_chart(&report.daily));
            if let Some(precip) = render_precipitation_chart(&report.daily) {
                out.push('\n');
                out.push_str(&precip);
            }
        }
        out.push('\n');
        out.push_str(&render_day_details(&report.daily));
    }

    out.push_str("\n---\n");
    out.push_str(ATTRIBUTION);
    out.push('\n');
    out
}

// ─── Current conditions ─────────────────────────────────────────

pub fn render_current(current: &CurrentConditions, timezone: Option<&str>) -> String {
    let mut out = String::from("Current Weather\n");
    let _ = writeln!(out, "  Temperature: {} \u{b0}C", fmt_value(current.temperature));
    let _ = writeln!(out, "  Wind:        {} km/h", fmt_value(current.windspeed));
    let _ = writeln!(out, "  Wind dir:    {}\u{b0}", fmt_whole(current.wind_direction));
    let as_of = current
        .observed_label(timezone)
        .unwrap_or_else(|| MISSING.to_string());
    let _ = writeln!(out, "  As of:       {}", as_of);
    out
}

// ─── Daily table ────────────────────────────────────────────────

pub fn render_table(rows: &[DailyRecord]) -> String {
    let headers = ["Date", "Max (\u{b0}C)", "Min (\u{b0}C)", "Precip (mm)", "Condition"];
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|r| {
            [
                r.date.to_string(),
                fmt_value(r.max_temperature),
                fmt_value(r.min_temperature),
                fmt_value(r.precipitation_sum),
                r.condition_text.clone().unwrap_or_else(|| MISSING.to_string()),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| -> String {
        let segments: Vec<String> = widths.iter().map(|w| "\u{2500}".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };

    let mut out = String::new();
    out.push_str(&rule("\u{250c}", "\u{252c}", "\u{2510}"));
    out.push_str(&table_line(&headers.map(str::to_string), &widths));
    out.push_str(&rule("\u{251c}", "\u{253c}", "\u{2524}"));
    for row in &cells {
        out.push_str(&table_line(row, &widths));
    }
    out.push_str(&rule("\u{2514}", "\u{2534}", "\u{2518}"));
    out
}

fn table_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let mut line = String::from("\u{2502}");
    for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
        let pad = w - cell.chars().count();
        // numbers right-aligned, text left-aligned
        if (1..=3).contains(&i) {
            let _ = write!(line, " {}{} \u{2502}", " ".repeat(pad), cell);
        } else {
            let _ = write!(line, " {}{} \u{2502}", cell, " ".repeat(pad));
        }
    }
    line.push('\n');
    line
}

// ─── Charts ─────────────────────────────────────────────────────

/// One row per day: a bar spanning min..max on a scale shared by all days.
pub fn render_temperature_chart(rows: &[DailyRecord]) -> String {
    let mut out = String::from("Temperature range (\u{b0}C)\n");

    let values: Vec<f64> = rows
        .iter()
        .flat_map(|r| [r.min_temperature, r.max_temperature])
        .flatten()
        .collect();
    let Some((lo, hi)) = bounds(&values) else {
        out.push_str("  (no temperature data)\n");
        return out;
    };

    for r in rows {
        let mut bar = vec![' '; CHART_WIDTH];
        match (r.min_temperature, r.max_temperature) {
            (Some(min), Some(max)) => {
                let (a, b) = (scale(min.min(max), lo, hi), scale(min.max(max), lo, hi));
                for c in bar.iter_mut().take(b + 1).skip(a) {
                    *c = '\u{2500}';
                }
                bar[a] = '\u{251c}';
                bar[b] = if a == b { '\u{253c}' } else { '\u{2524}' };
            }
            (Some(v), None) | (None, Some(v)) => bar[scale(v, lo, hi)] = '\u{25cf}',
            (None, None) => {}
        }
        let _ = writeln!(
            out,
            "  {} \u{2502}{}\u{2502} {} .. {}",
            r.date,
            bar.iter().collect::<String>(),
            fmt_value(r.min_temperature),
            fmt_value(r.max_temperature),
        );
    }
    let _ = writeln!(
        out,
        "  {:10} {:<w$}{:>w2$}",
        "",
        format!("{:.1}", lo),
        format!("{:.1}", hi),
        w = CHART_WIDTH / 2 + 1,
        w2 = CHART_WIDTH / 2 + 1,
    );
    out
}

/// Horizontal precipitation bars, or `None` when no day carries a value.
pub fn render_precipitation_chart(rows: &[DailyRecord]) -> Option<String> {
    if rows.iter().all(|r| r.precipitation_sum.is_none()) {
        return None;
    }
    let peak = rows
        .iter()
        .filter_map(|r| r.precipitation_sum)
        .fold(0.0_f64, f64::max);

    let mut out = String::from("Precipitation (mm)\n");
    for r in rows {
        let len = match r.precipitation_sum {
            Some(p) if peak > 0.0 => ((p.max(0.0) / peak) * CHART_WIDTH as f64).round() as usize,
            _ => 0,
        };
        let _ = writeln!(
            out,
            "  {} \u{2502}{:<w$} {}",
            r.date,
            "\u{2588}".repeat(len),
            fmt_value(r.precipitation_sum),
            w = CHART_WIDTH,
        );
    }
    Some(out)
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let lo = values.iter().copied().reduce(f64::min)?;
    let hi = values.iter().copied().reduce(f64::max)?;
    Some((lo, hi))
}

fn scale(v: f64, lo: f64, hi: f64) -> usize {
    if hi <= lo {
        return 0;
    }
    let pos = ((v - lo) / (hi - lo) * (CHART_WIDTH - 1) as f64).round();
    (pos.max(0.0) as usize).min(CHART_WIDTH - 1)
}

// ─── Details ────────────────────────────────────────────────────

pub fn render_day_details(rows: &[DailyRecord]) -> String {
    let mut out = String::new();
    for r in rows {
        let _ = writeln!(
            out,
            "{} \u{2014} {}",
            r.date,
            r.condition_text.as_deref().unwrap_or(MISSING)
        );
        let _ = writeln!(out, "    Max: {} \u{b0}C", fmt_value(r.max_temperature));
        let _ = writeln!(out, "    Min: {} \u{b0}C", fmt_value(r.min_temperature));
        let _ = writeln!(out, "    Precipitation (sum): {} mm", fmt_value(r.precipitation_sum));
    }
    out
}

fn fmt_value(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING.to_string(), |v| format!("{:.1}", v))
}

fn fmt_whole(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING.to_string(), |v| format!("{:.0}", v))
}
