use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};

#[derive(Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
}

#[derive(Deserialize)]
pub struct FullCurrent {
    pub id: i64,
    pub name: String,
    pub sys: Sys,
    pub main: CurrentMain,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    #[serde(default)]
    pub visibility: Option<u32>,
}

#[derive(Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
    pub humidity: u8,
}

#[serde_as]
#[derive(Deserialize)]
pub struct ForecastItem {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
    pub main: ForecastMain,
    pub weather: Vec<Condition>,
}

#[derive(Deserialize)]
pub struct FullForecast {
    pub list: Vec<ForecastItem>,
}

#[derive(Deserialize)]
pub struct GeoLocation {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Current weather conditions at one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub temp: f64,
    pub feels_like: f64,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: f64,
    pub visibility: Option<u32>,
}

/// A city matching a partially typed search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl From<GeoLocation> for CitySuggestion {
    fn from(g: GeoLocation) -> Self {
        CitySuggestion {
            name: g.name,
            country: g.country,
            state: g.state,
            lat: g.lat,
            lon: g.lon,
        }
    }
}
