pub mod errors;
pub mod models;

use std::time::Duration;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::manager_forecast::models::WeatherSample;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::{CitySuggestion, Condition, CurrentWeather, FullCurrent, FullForecast, GeoLocation};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Struct for fetching current weather, forecasts and city suggestions from OpenWeatherMap
pub struct OWM {
    client: Client,
    api_key: String,
    base_url: String,
    suggestion_limit: u8,
}

impl OWM {
    /// Returns an OWM struct ready for requests against the OpenWeatherMap API
    ///
    /// # Arguments
    ///
    /// * 'api_key' - OpenWeatherMap application id
    /// * 'base_url' - scheme and host of the API, without trailing slash
    /// * 'timeout_secs' - timeout for each request
    /// * 'suggestion_limit' - max number of cities returned from a suggestion search
    pub fn new(api_key: &str, base_url: &str, timeout_secs: u64, suggestion_limit: u8) -> Result<OWM, OWMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            suggestion_limit,
        })
    }

    /// Retrieves current weather for a city given by name
    ///
    /// # Arguments
    ///
    /// * 'city' - city name, optionally followed by country code (e.g. "Paris,FR")
    pub async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, OWMError> {
        let doc: FullCurrent = self.get_document("/data/2.5/weather", &[
            ("q", city.to_string()),
            ("units", "metric".to_string()),
        ]).await?;

        current_weather(doc)
    }

    /// Retrieves current weather for a coordinate pair
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'lon' - longitude of the location
    pub async fn current_by_coordinates(&self, lat: f64, lon: f64) -> Result<CurrentWeather, OWMError> {
        let doc: FullCurrent = self.get_document("/data/2.5/weather", &[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", "metric".to_string()),
        ]).await?;

        current_weather(doc)
    }

    /// Retrieves the five day forecast for a city, one sample per three hours in ascending order
    ///
    /// # Arguments
    ///
    /// * 'city' - city name, optionally followed by country code
    pub async fn forecast_samples(&self, city: &str) -> Result<Vec<WeatherSample>, OWMError> {
        let doc: FullForecast = self.get_document("/data/2.5/forecast", &[
            ("q", city.to_string()),
            ("units", "metric".to_string()),
        ]).await?;

        let mut samples: Vec<WeatherSample> = Vec::with_capacity(doc.list.len());
        for item in doc.list {
            let condition = first_condition(item.weather)?;
            samples.push(WeatherSample {
                timestamp: item.dt,
                temperature: item.main.temp,
                humidity: item.main.humidity,
                description: condition.description,
                icon_code: condition.icon,
            });
        }

        Ok(samples)
    }

    /// Retrieves cities whose names match a search query
    ///
    /// # Arguments
    ///
    /// * 'query' - the (partial) city name
    pub async fn suggestions(&self, query: &str) -> Result<Vec<CitySuggestion>, OWMError> {
        let doc: Vec<GeoLocation> = self.get_document("/geo/1.0/direct", &[
            ("q", query.to_string()),
            ("limit", self.suggestion_limit.to_string()),
        ]).await?;

        Ok(doc.into_iter().map(CitySuggestion::from).collect())
    }

    /// Sends a GET request and decodes the JSON body of a successful response
    ///
    /// # Arguments
    ///
    /// * 'path' - API path starting with a slash
    /// * 'query' - query parameters besides the application id
    async fn get_document<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, OWMError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("requesting {} with {:?}", url, query);

        let req = self.client
            .get(url)
            .query(query)
            .query(&[("appid", &self.api_key)])
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OWMError::NotFound(format!("{} answered with {}", path, status)));
        }

        let json = req.text().await?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn current_weather(doc: FullCurrent) -> Result<CurrentWeather, OWMError> {
    let condition = first_condition(doc.weather)?;

    Ok(CurrentWeather {
        id: doc.id,
        name: doc.name,
        country: doc.sys.country,
        temp: doc.main.temp,
        feels_like: doc.main.feels_like,
        description: condition.description,
        icon: condition.icon,
        humidity: doc.main.humidity,
        wind_speed: doc.wind.speed,
        pressure: doc.main.pressure,
        visibility: doc.visibility,
    })
}

fn first_condition(weather: Vec<Condition>) -> Result<Condition, OWMError> {
    weather
        .into_iter()
        .next()
        .ok_or(OWMError::Document("no weather condition in document".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn owm(server: &MockServer) -> OWM {
        OWM::new("test_key", &server.uri(), 5, 5).unwrap()
    }

    fn current_json() -> serde_json::Value {
        serde_json::json!({
            "id": 2643743,
            "name": "London",
            "sys": {"country": "GB", "sunrise": 1714537800},
            "main": {"temp": 14.2, "feels_like": 13.1, "humidity": 72, "pressure": 1012},
            "weather": [
                {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"},
                {"id": 701, "main": "Mist", "description": "mist", "icon": "50d"}
            ],
            "wind": {"speed": 4.6, "deg": 240},
            "visibility": 10000
        })
    }

    #[tokio::test]
    async fn test_current_by_city() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London,GB"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_json()))
            .mount(&mock_server)
            .await;

        let current = owm(&mock_server).current_by_city("London,GB").await.unwrap();

        assert_eq!(current.id, 2643743);
        assert_eq!(current.country, "GB");
        assert_eq!(current.description, "light rain");
        assert_eq!(current.icon, "10d");
        assert_eq!(current.humidity, 72);
        assert_eq!(current.wind_speed, 4.6);
        assert_eq!(current.visibility, Some(10000));
    }

    #[tokio::test]
    async fn test_current_by_coordinates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "51.5"))
            .and(query_param("lon", "-0.12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_json()))
            .mount(&mock_server)
            .await;

        let current = owm(&mock_server).current_by_coordinates(51.5, -0.12).await.unwrap();

        assert_eq!(current.name, "London");
        assert_eq!(current.pressure, 1012.0);
    }

    #[tokio::test]
    async fn test_unknown_city() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&mock_server)
            .await;

        let result = owm(&mock_server).current_by_city("Nowhere").await;

        assert!(matches!(result, Err(OWMError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_condition() {
        let mock_server = MockServer::start().await;

        let mut body = current_json();
        body["weather"] = serde_json::json!([]);
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let result = owm(&mock_server).current_by_city("London").await;

        assert!(matches!(result, Err(OWMError::Document(_))));
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let result = owm(&mock_server).forecast_samples("London").await;

        assert!(matches!(result, Err(OWMError::Document(_))));
    }

    #[tokio::test]
    async fn test_forecast_samples() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("q", "Oslo"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": "200",
                "cnt": 2,
                "list": [
                    {
                        "dt": 1714564800,
                        "main": {"temp": 8.4, "temp_min": 7.9, "temp_max": 8.4, "humidity": 66},
                        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
                        "dt_txt": "2024-05-01 12:00:00"
                    },
                    {
                        "dt": 1714575600,
                        "main": {"temp": 6.1, "temp_min": 6.1, "temp_max": 6.1, "humidity": 74},
                        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
                        "dt_txt": "2024-05-01 15:00:00"
                    }
                ],
                "city": {"name": "Oslo", "country": "NO"}
            })))
            .mount(&mock_server)
            .await;

        let samples = owm(&mock_server).forecast_samples("Oslo").await.unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0].timestamp,
            DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z").unwrap().with_timezone(&Utc)
        );
        assert_eq!(samples[0].temperature, 8.4);
        assert_eq!(samples[0].humidity, 66);
        assert_eq!(samples[1].description, "clear sky");
        assert_eq!(samples[1].icon_code, "01n");
    }

    #[tokio::test]
    async fn test_suggestions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Spring"))
            .and(query_param("limit", "5"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Springfield", "local_names": {"en": "Springfield"}, "lat": 39.8, "lon": -89.64, "country": "US", "state": "Illinois"},
                {"name": "Springs", "lat": -26.25, "lon": 28.4, "country": "ZA"}
            ])))
            .mount(&mock_server)
            .await;

        let suggestions = owm(&mock_server).suggestions("Spring").await.unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].state, Some("Illinois".to_string()));
        assert_eq!(suggestions[1].state, None);
        assert_eq!(suggestions[1].country, "ZA");
    }
}
