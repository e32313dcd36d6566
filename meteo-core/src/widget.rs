//! The user-triggered action: validate → geocode → forecast → select → render.

use chrono::{Local, NaiveDate};

use crate::{
    Config,
    error::LookupError,
    model::{LookupRequest, SelectedForecast},
    provider::{ForecastSource, Geocoder, forecast_from_config, geocoder_from_config},
    render::render,
    select::select_day,
    validate::validate,
    view::{Region, View},
};

/// Result of one triggered run.
#[derive(Debug)]
pub enum Outcome {
    /// The host lacks the postal-code or date input; nothing was touched.
    NoInputs,
    /// The forecast was rendered.
    Shown(SelectedForecast),
    /// The error was written to the error region.
    Failed(LookupError),
}

impl Outcome {
    pub fn is_shown(&self) -> bool {
        matches!(self, Outcome::Shown(_))
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Holds the collaborators of the lookup. Keeps no state between runs.
#[derive(Debug)]
pub struct Widget {
    config: Config,
    geocoder: Box<dyn Geocoder>,
    forecasts: Box<dyn ForecastSource>,
    today: fn() -> NaiveDate,
}

impl Widget {
    pub fn new(
        config: Config,
        geocoder: Box<dyn Geocoder>,
        forecasts: Box<dyn ForecastSource>,
    ) -> Self {
        Self {
            config,
            geocoder,
            forecasts,
            today: local_today,
        }
    }

    /// Widget backed by the HTTP providers named in `config`.
    pub fn from_config(config: Config) -> Self {
        let geocoder = geocoder_from_config(&config);
        let forecasts = forecast_from_config(&config);
        Self::new(config, geocoder, forecasts)
    }

    /// Replace the clock used for the horizon check.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Prepare the host: the date input may not go before today.
    pub fn attach<V: View + ?Sized>(&self, view: &mut V) {
        let today = (self.today)().format("%Y-%m-%d").to_string();
        view.set_attribute(Region::Date, "min", &today);
    }

    /// Key handler for the two inputs; Enter runs the lookup.
    pub async fn on_key_press<V: View + ?Sized>(
        &self,
        view: &mut V,
        region: Region,
        key: &str,
    ) -> Option<Outcome> {
        if key != "Enter" || !matches!(region, Region::PostalCode | Region::Date) {
            return None;
        }
        Some(self.check_weather(view).await)
    }

    /// Run the whole flow against `view`. Errors never escape: they are
    /// written to the error region and returned as [`Outcome::Failed`].
    pub async fn check_weather<V: View + ?Sized>(&self, view: &mut V) -> Outcome {
        let (Some(postal_code), Some(date)) =
            (view.value(Region::PostalCode), view.value(Region::Date))
        else {
            tracing::warn!("postal code or date input not found on the host");
            return Outcome::NoInputs;
        };

        view.set_visible(Region::Error, false);
        view.set_visible(Region::Widget, false);
        view.set_visible(Region::WeekForecast, false);

        let request = match validate(&postal_code, &date, (self.today)()) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(%err, "input rejected");
                let err = LookupError::from(err);
                show_error(view, &err);
                return Outcome::Failed(err);
            }
        };

        view.set_visible(Region::Loading, true);

        match self.lookup(&request).await {
            Ok(forecast) => {
                render(view, &forecast, &self.config);
                Outcome::Shown(forecast)
            }
            Err(err) => {
                tracing::warn!(%err, postal_code = %request.postal_code, "lookup failed");
                view.set_visible(Region::Loading, false);
                show_error(view, &err);
                Outcome::Failed(err)
            }
        }
    }

    /// The two dependent remote steps followed by day selection.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<SelectedForecast, LookupError> {
        let location = self.geocoder.locate(&request.postal_code).await?;
        let daily = self.forecasts.daily_forecast(&location).await?;
        select_day(&daily, request.date, location, &request.postal_code)
    }
}

fn show_error<V: View + ?Sized>(view: &mut V, err: &LookupError) {
    view.set_text(Region::Error, &format!("⚠️ {err}"));
    view.set_visible(Region::Error, true);
}
