use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inputs accepted by the validator, ready for the lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub postal_code: String,
    pub date: NaiveDate,
}

/// First geocoding match for a postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub city_name: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Index-aligned daily series as returned by the forecast service.
///
/// Every vector has the same length as `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<Option<i32>>,
    pub temperature_max: Vec<Option<f64>>,
    pub temperature_min: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
    pub windspeed_max: Vec<Option<f64>>,
    pub relative_humidity_max: Vec<Option<f64>>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Name of the first array whose length differs from `time`.
    pub fn misaligned(&self) -> Option<&'static str> {
        let len = self.len();
        [
            ("weathercode", self.weather_code.len()),
            ("temperature_2m_max", self.temperature_max.len()),
            ("temperature_2m_min", self.temperature_min.len()),
            ("precipitation_probability_max", self.precipitation_probability_max.len()),
            ("windspeed_10m_max", self.windspeed_max.len()),
            ("relative_humidity_2m_max", self.relative_humidity_max.len()),
            ("sunrise", self.sunrise.len()),
            ("sunset", self.sunset.len()),
        ]
        .into_iter()
        .find_map(|(name, n)| (n != len).then_some(name))
    }
}

/// Three-valued snow indicator derived from code and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SnowRisk {
    Yes,
    Possible,
    No,
}

impl SnowRisk {
    pub fn label(&self) -> &'static str {
        match self {
            SnowRisk::Yes => "OUI",
            SnowRisk::Possible => "POSSIBLE",
            SnowRisk::No => "NON",
        }
    }
}

impl std::fmt::Display for SnowRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of the forecast after rounding and snow classification.
///
/// `rain_prob` and `humidity` are the provider's numbers, unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub weather_code: Option<i32>,
    pub temp_max: i64,
    pub temp_min: i64,
    pub rain_prob: f64,
    pub wind_speed: i64,
    pub humidity: f64,
    pub snow_risk: SnowRisk,
    pub is_selected: bool,
}

/// Everything the renderer needs for one lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedForecast {
    pub location: LocationResult,
    pub postal_code: String,
    pub day: ForecastDay,
    pub sunrise: String,
    pub sunset: String,
    /// Chronological, at most seven days, contains `day` exactly once.
    pub week: Vec<ForecastDay>,
}

impl SelectedForecast {
    pub fn date(&self) -> NaiveDate {
        self.day.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snow_risk_labels() {
        assert_eq!(SnowRisk::Yes.to_string(), "OUI");
        assert_eq!(SnowRisk::Possible.to_string(), "POSSIBLE");
        assert_eq!(SnowRisk::No.to_string(), "NON");
    }

    #[test]
    fn default_series_is_aligned() {
        let mut daily = DailySeries::default();
        assert_eq!(daily.misaligned(), None);
        daily.weather_code.push(Some(0));
        assert_eq!(daily.misaligned(), Some("weathercode"));
    }

    #[test]
    fn snow_risk_serializes_uppercase() {
        let json = serde_json::to_string(&SnowRisk::Possible).unwrap();
        assert_eq!(json, "\"POSSIBLE\"");
    }
}
