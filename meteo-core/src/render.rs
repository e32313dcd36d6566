//! Write a [`SelectedForecast`] into the view.

use chrono::{Locale, NaiveDate, NaiveTime};

use crate::{
    Config,
    model::{ForecastDay, SelectedForecast},
    view::{DayCard, Region, View},
    weather_code::weather_info,
};

const LOCALE: Locale = Locale::fr_FR;
const CARD_TITLE: &str = "Cliquez pour voir les prévisions détaillées sur Ventusky";

fn localized(date: NaiveDate, fmt: &str) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(fmt, LOCALE)
        .to_string()
}

/// Long French form, e.g. `mardi 2 janvier 2024`.
pub fn long_date(date: NaiveDate) -> String {
    localized(date, "%A %-d %B %Y")
}

/// Abbreviated weekday, e.g. `mar.`.
pub fn short_day_name(date: NaiveDate) -> String {
    localized(date, "%a")
}

/// Day and abbreviated month, e.g. `2 janv.`.
pub fn short_date(date: NaiveDate) -> String {
    localized(date, "%-d %b")
}

pub fn day_card(day: &ForecastDay, href: &str) -> DayCard {
    DayCard {
        day_name: short_day_name(day.date),
        short_date: short_date(day.date),
        icon: weather_info(day.weather_code).icon.to_string(),
        temperature: format!("{}°C", day.temp_max),
        rain: format!("{}%", day.rain_prob),
        wind: format!("{} km/h", day.wind_speed),
        humidity: format!("{}%", day.humidity),
        snow: day.snow_risk.to_string(),
        href: href.to_string(),
        title: CARD_TITLE.to_string(),
        selected: day.is_selected,
    }
}

/// Fill the named output regions, then rebuild the week grid.
pub fn render<V: View + ?Sized>(view: &mut V, forecast: &SelectedForecast, config: &Config) {
    view.set_visible(Region::Loading, false);

    let day = &forecast.day;
    let info = weather_info(day.weather_code);

    view.set_text(
        Region::Location,
        &format!("{} ({})", forecast.location.city_name, forecast.postal_code),
    );
    view.set_text(Region::WeatherDate, &long_date(day.date));
    view.set_text(Region::Icon, info.icon);
    view.set_text(Region::Condition, info.description);
    view.set_text(Region::Temperature, &format!("{}°C", day.temp_max));
    view.set_text(Region::Wind, &format!("{} km/h", day.wind_speed));
    view.set_text(Region::Humidity, &format!("{}%", day.humidity));
    view.set_text(Region::RainProb, &format!("{}%", day.rain_prob));
    view.set_text(Region::SnowProb, day.snow_risk.label());
    view.set_text(Region::Sunrise, &forecast.sunrise);
    view.set_text(Region::Sunset, &forecast.sunset);
    view.set_visible(Region::Widget, true);

    render_week(view, forecast, config);
}

fn render_week<V: View + ?Sized>(view: &mut V, forecast: &SelectedForecast, config: &Config) {
    let href = config.radar_link(forecast.location.latitude, forecast.location.longitude);
    let cards = forecast
        .week
        .iter()
        .map(|day| day_card(day, &href))
        .collect();

    view.set_cards(Region::DaysGrid, cards);
    view.set_visible(Region::WeekForecast, true);
}
