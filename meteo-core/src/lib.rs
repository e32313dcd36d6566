//! Core library for the `meteo` postal-code weather widget.
//!
//! This crate defines:
//! - Input validation (postal code, forecast horizon)
//! - Geocoding and daily forecast providers
//! - Day selection, snow-risk derivation and the week window
//! - The [`View`] capability and the renderer writing into it
//! - The [`Widget`] action tying the steps together
//!
//! It is used by `meteo-cli`, but any host able to implement [`View`] can
//! drive it.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod select;
pub mod validate;
pub mod view;
pub mod weather_code;
pub mod widget;

pub use config::Config;
pub use error::{LookupError, UpstreamError, ValidationError};
pub use model::{ForecastDay, LocationResult, LookupRequest, SelectedForecast, SnowRisk};
pub use provider::{ForecastSource, Geocoder};
pub use view::{DayCard, MemoryView, Region, View};
pub use widget::{Outcome, Widget};
