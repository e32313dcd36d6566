//! Locate the requested day in a daily series and derive the displayed values.

use chrono::NaiveDate;

use crate::{
    error::{LookupError, UpstreamError},
    model::{DailySeries, ForecastDay, LocationResult, SelectedForecast, SnowRisk},
    weather_code::is_snow_code,
};

/// Days shown on each side of the selected day.
pub const WINDOW_RADIUS: usize = 3;

/// Snow is certain for a snow code, possible when it is cold and likely to
/// precipitate, absent otherwise.
pub fn snow_risk(weather_code: Option<i32>, temp_max: i64, rain_prob: f64) -> SnowRisk {
    if is_snow_code(weather_code) {
        SnowRisk::Yes
    } else if temp_max < 3 && rain_prob > 30.0 {
        SnowRisk::Possible
    } else {
        SnowRisk::No
    }
}

/// Inclusive index bounds of the week window around `index`, clipped to
/// a series of `len` entries.
pub fn window_bounds(index: usize, len: usize) -> (usize, usize) {
    let start = index.saturating_sub(WINDOW_RADIUS);
    let end = (index + WINDOW_RADIUS).min(len.saturating_sub(1));
    (start, end)
}

fn rounded(value: Option<f64>) -> i64 {
    value.unwrap_or_default().round() as i64
}

/// Build the derived record for entry `index` of `daily`.
///
/// `daily` must be aligned and `index` in bounds; [`select_day`] checks both.
pub(crate) fn forecast_day(daily: &DailySeries, index: usize, selected: usize) -> ForecastDay {
    let weather_code = daily.weather_code[index];
    let temp_max = rounded(daily.temperature_max[index]);
    let rain_prob = daily.precipitation_probability_max[index].unwrap_or_default();

    ForecastDay {
        date: daily.time[index],
        weather_code,
        temp_max,
        temp_min: rounded(daily.temperature_min[index]),
        rain_prob,
        wind_speed: rounded(daily.windspeed_max[index]),
        humidity: daily.relative_humidity_max[index].unwrap_or_default(),
        snow_risk: snow_risk(weather_code, temp_max, rain_prob),
        is_selected: index == selected,
    }
}

/// Time-of-day part of a provider timestamp such as `2024-01-02T08:00`.
pub fn time_of_day(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .map_or(timestamp, |(_, time)| time)
}

/// The ±3-day slice around `index`, chronological. Same precondition as
/// [`forecast_day`].
pub(crate) fn week_window(daily: &DailySeries, index: usize) -> Vec<ForecastDay> {
    let (start, end) = window_bounds(index, daily.len());
    (start..=end)
        .map(|i| forecast_day(daily, i, index))
        .collect()
}

/// Find `date` in the series and compute the selected day and its window.
///
/// A series whose arrays differ in length from `daily.time` is rejected as
/// an upstream failure.
pub fn select_day(
    daily: &DailySeries,
    date: NaiveDate,
    location: LocationResult,
    postal_code: &str,
) -> Result<SelectedForecast, LookupError> {
    if let Some(name) = daily.misaligned() {
        return Err(UpstreamError::IncompleteSeries(name).into());
    }

    let index = daily
        .time
        .iter()
        .position(|d| *d == date)
        .ok_or(LookupError::DateUnavailable(date))?;

    tracing::debug!(%date, index, len = daily.len(), "selected forecast day");

    Ok(SelectedForecast {
        location,
        postal_code: postal_code.to_string(),
        day: forecast_day(daily, index, index),
        sunrise: time_of_day(&daily.sunrise[index]).to_string(),
        sunset: time_of_day(&daily.sunset[index]).to_string(),
        week: week_window(daily, index),
    })
}
