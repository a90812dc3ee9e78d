//! Plain-text rendering of forecasts and observing reports.

use crate::nws::ForecastPeriod;

use super::interval::Interval;
use super::series::ObservingRow;
use super::units::format_visibility;
use super::window::Recommendation;

/// Render a daily forecast as one block per period.
pub fn forecast(latitude: f64, longitude: f64, periods: &[ForecastPeriod]) -> String {
    let mut out = format!("Forecast for {latitude:.4}, {longitude:.4}:\n");
    for period in periods {
        out.push_str(&format!(
            "\n{}:\nTemperature: {}°{}\nWind: {} {}\n{}\n",
            period.name,
            period.temperature,
            period.temperature_unit,
            period.wind_speed,
            period.wind_direction,
            period.detailed_forecast,
        ));
    }
    out
}

/// Render an hourly forecast as one line per hour.
pub fn hourly_forecast(latitude: f64, longitude: f64, periods: &[ForecastPeriod]) -> String {
    let mut out = format!("Hourly forecast for {latitude:.4}, {longitude:.4}:\n");
    for period in periods {
        let label = Interval::parse(&period.start_time).start_label();
        out.push_str(&format!(
            "{label} | {}°{} | wind {} {} | {}\n",
            period.temperature,
            period.temperature_unit,
            period.wind_speed,
            period.wind_direction,
            period.short_forecast,
        ));
    }
    out
}

/// Render the aligned sky-condition rows.
pub fn sky_conditions(
    latitude: f64,
    longitude: f64,
    rows: &[ObservingRow],
    visibility_uom: Option<&str>,
) -> String {
    let mut out = format!("Sky conditions for {latitude:.4}, {longitude:.4}:\n");
    for row in rows {
        out.push_str(&row_line(row, visibility_uom));
        out.push('\n');
    }
    out
}

/// Render the observing report: recommendation first, then every slot.
pub fn observing_report(
    latitude: f64,
    longitude: f64,
    horizon: usize,
    rows: &[ObservingRow],
    best: Option<&Recommendation>,
    visibility_uom: Option<&str>,
) -> String {
    let mut out = format!(
        "Observing conditions for {latitude:.4}, {longitude:.4} over the next {horizon} slots:\n"
    );
    match best.and_then(|best| rows.get(best.index).map(|row| (row, best))) {
        Some((row, best)) => {
            out.push_str(&format!(
                "Best window: {} (score {})\n",
                row.interval.label(),
                best.score,
            ));
        }
        None => {
            out.push_str("No promising observing window in the requested horizon.\n");
        }
    }
    out.push_str("\nAll slots:\n");
    for row in rows {
        out.push_str(&row_line(row, visibility_uom));
        out.push('\n');
    }
    out
}

/// One aligned row as a report line.
fn row_line(row: &ObservingRow, visibility_uom: Option<&str>) -> String {
    format!(
        "{} | sky {} | precip {} | vis {}",
        row.interval.label(),
        percent(row.sky_cover),
        percent(row.precipitation),
        format_visibility(row.visibility, visibility_uom),
    )
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.0}%"),
        None => "?".to_string(),
    }
}
