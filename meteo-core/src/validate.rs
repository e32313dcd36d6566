//! Input checks that run before any network call.

use chrono::{Days, NaiveDate};

use crate::{error::ValidationError, model::LookupRequest};

/// How many days ahead the forecast service provides data.
pub const FORECAST_HORIZON_DAYS: u64 = 16;

/// Last date accepted for a lookup started on `today`.
pub fn horizon_end(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(FORECAST_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// True when `code` is exactly five ASCII digits.
pub fn is_postal_code(code: &str) -> bool {
    code.len() == 5 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Check the raw host inputs and turn them into a [`LookupRequest`].
///
/// The postal code is trimmed; the date must be `YYYY-MM-DD` and no later
/// than [`horizon_end`]. There is no lower bound on the date.
pub fn validate(
    postal_code: &str,
    date: &str,
    today: NaiveDate,
) -> Result<LookupRequest, ValidationError> {
    let postal_code = postal_code.trim();
    if !is_postal_code(postal_code) {
        return Err(ValidationError::InvalidPostalCode);
    }

    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::MissingDate);
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

    let max = horizon_end(today);
    if date > max {
        return Err(ValidationError::BeyondHorizon { max });
    }

    Ok(LookupRequest {
        postal_code: postal_code.to_string(),
        date,
    })
}
