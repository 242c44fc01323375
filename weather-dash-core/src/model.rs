use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display-ready weather for one city.
///
/// Records are created from a successful provider response and never
/// mutated afterwards; the dashboard only appends or removes them whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// City name as returned by the provider. Dedup key (case-insensitive).
    pub city: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub description: String,
    /// Raw provider icon code, e.g. "01d".
    pub icon: String,
    /// km/h
    pub wind_speed: u32,
    pub humidity: u8,
    pub observed_at: DateTime<Utc>,
}

impl WeatherRecord {
    /// Case-insensitive comparison on the city name.
    pub fn same_city(&self, other: &str) -> bool {
        self.city.to_lowercase() == other.to_lowercase()
    }
}

/// Round to the nearest integer, halves towards positive infinity
/// (-3.5 becomes -3, 2.5 becomes 3).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round a Celsius reading to the nearest whole degree.
pub fn round_celsius(value: f64) -> i32 {
    round_half_up(value) as i32
}

/// Convert m/s to whole km/h.
pub fn mps_to_kmh(speed: f64) -> u32 {
    round_half_up(speed * 3.6).max(0.0) as u32
}
