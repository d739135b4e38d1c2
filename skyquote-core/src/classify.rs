//! Open-Meteo (WMO) weather code classification.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use crate::model::WeatherInfo;

const fn info(icon: &'static str, description: &'static str) -> WeatherInfo {
    WeatherInfo { icon, description }
}

/// Rows are checked in order; the first row listing the code wins.
pub static WEATHER_CODES: &[(&[i64], WeatherInfo)] = &[
    (&[0], info("☀️", "clear sky")),
    (&[1, 2], info("🌤️", "mainly clear")),
    (&[3], info("☁️", "overcast")),
    (&[45, 48], info("🌫️", "foggy")),
    (&[51, 53, 55], info("🌦️", "drizzle")),
    (&[56, 57], info("🌧️", "freezing drizzle")),
    (&[61, 63, 65], info("🌧️", "rain")),
    (&[66, 67], info("🌧️", "freezing rain")),
    (&[71, 73, 75, 77], info("❄️", "snow")),
    (&[80, 81, 82], info("🌧️", "rain showers")),
    (&[95], info("⛈️", "thunderstorm")),
    (&[96, 99], info("⛈️", "thunderstorm with hail")),
];

pub const UNKNOWN: WeatherInfo = info("🌡️", "unknown");

/// Map any weather code to an icon and description.
pub fn classify(code: i64) -> WeatherInfo {
    WEATHER_CODES
        .iter()
        .find(|(codes, _)| codes.contains(&code))
        .map(|(_, info)| *info)
        .unwrap_or(UNKNOWN)
}
