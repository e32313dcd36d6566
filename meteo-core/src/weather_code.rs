/// Icon and French description for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherInfo {
    pub icon: &'static str,
    pub description: &'static str,
}

pub const FALLBACK: WeatherInfo = WeatherInfo {
    icon: "🌤️",
    description: "Variable",
};

/// Codes that always count as snow.
pub const SNOW_CODES: [i32; 6] = [71, 73, 75, 77, 85, 86];

const fn info(icon: &'static str, description: &'static str) -> WeatherInfo {
    WeatherInfo { icon, description }
}

/// Look up a code, falling back to [`FALLBACK`] for unknown or missing codes.
/// See: <https://open-meteo.com/en/docs#weathervariables>
pub fn weather_info(code: Option<i32>) -> WeatherInfo {
    let Some(code) = code else {
        return FALLBACK;
    };

    match code {
        0 => info("☀️", "Ciel dégagé"),
        1 => info("🌤️", "Principalement dégagé"),
        2 => info("⛅", "Partiellement nuageux"),
        3 => info("☁️", "Couvert"),
        45 => info("🌫️", "Brouillard"),
        48 => info("🌫️", "Brouillard givrant"),
        51 => info("🌦️", "Bruine légère"),
        53 => info("🌦️", "Bruine modérée"),
        55 => info("🌧️", "Bruine dense"),
        61 => info("🌧️", "Pluie légère"),
        63 => info("🌧️", "Pluie modérée"),
        65 => info("🌧️", "Pluie forte"),
        71 => info("🌨️", "Neige légère"),
        73 => info("🌨️", "Neige modérée"),
        75 => info("❄️", "Neige forte"),
        77 => info("🌨️", "Grains de neige"),
        80 => info("🌦️", "Averses légères"),
        81 => info("🌧️", "Averses modérées"),
        82 => info("⛈️", "Averses violentes"),
        85 => info("🌨️", "Averses de neige légères"),
        86 => info("❄️", "Averses de neige fortes"),
        95 => info("⛈️", "Orage"),
        96 => info("⛈️", "Orage avec grêle légère"),
        99 => info("⛈️", "Orage avec grêle forte"),
        _ => FALLBACK,
    }
}

pub fn is_snow_code(code: Option<i32>) -> bool {
    code.is_some_and(|c| SNOW_CODES.contains(&c))
}
