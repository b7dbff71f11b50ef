use super::feed::FeedItem;
use crate::config::OpenWeatherMapConfig;
use crate::error::{JeepcastError, Result};
use crate::models::{ForecastFeed, ForecastLocation};
use chrono::Utc;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
    base_url: String,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<FeedItem>,
    city: OwmCity,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
    #[serde(default)]
    timezone: Option<i32>, // shift from UTC in seconds
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url: API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the 5-day/3-hour forecast.
    ///
    /// Metric units are requested so wind arrives in m/s; temperatures are
    /// converted to °F here.
    pub async fn fetch_forecast(&self) -> Result<ForecastFeed> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, self.config.latitude, self.config.longitude, self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                JeepcastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(JeepcastError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmForecastResponse = response.json().await.map_err(|e| {
            JeepcastError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        self.convert_response(owm_response)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, self.config.latitude, self.config.longitude, self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                JeepcastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    fn convert_response(&self, response: OwmForecastResponse) -> Result<ForecastFeed> {
        let points = response
            .list
            .iter()
            .map(|item| item.to_point(celsius_to_fahrenheit(item.main.temp)))
            .collect::<Result<Vec<_>>>()?;

        let name = self
            .config
            .location_name
            .clone()
            .unwrap_or(response.city.name);
        let mut location = ForecastLocation::new(name);
        location.utc_offset_seconds = response.city.timezone;

        tracing::info!(
            "Fetched {} forecast points for {}",
            points.len(),
            location.name
        );

        Ok(ForecastFeed::new(points)
            .with_location(location)
            .with_cached_at(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            latitude: 38.5733,
            longitude: -109.5498,
            location_name: None,
            enabled: true,
        }
    }

    const RESPONSE: &str = r#"{
        "cod": "200",
        "list": [
            {"dt": 1717243200, "main": {"temp": 20.0}, "wind": {"speed": 3.0},
             "weather": [{"id": 500}], "pop": 0.4}
        ],
        "city": {"name": "Moab", "country": "US", "timezone": -21600}
    }"#;

    #[test]
    fn client_creation() {
        let client = OpenWeatherMapClient::new(sample_config());
        assert!(client.config.enabled);
        assert_eq!(client.base_url, API_BASE_URL);
    }

    #[test]
    fn base_url_can_be_overridden() {
        let client =
            OpenWeatherMapClient::new(sample_config()).with_base_url("http://127.0.0.1:9/owm");
        assert_eq!(client.base_url, "http://127.0.0.1:9/owm");
    }

    #[test]
    fn converts_metric_response() {
        let client = OpenWeatherMapClient::new(sample_config());
        let response: OwmForecastResponse = serde_json::from_str(RESPONSE).unwrap();
        let feed = client.convert_response(response).unwrap();

        assert_eq!(feed.points.len(), 1);
        assert!((feed.points[0].temp_f - 68.0).abs() < 1e-9);
        assert_eq!(feed.points[0].wind_speed_mps, 3.0);
        assert_eq!(feed.utc_offset_seconds(), Some(-21600));
        assert_eq!(feed.location.unwrap().name, "Moab");
        assert!(feed.cached_at.is_some());
    }

    #[test]
    fn configured_name_overrides_city() {
        let mut config = sample_config();
        config.location_name = Some("Home".into());
        let client = OpenWeatherMapClient::new(config);
        let response: OwmForecastResponse = serde_json::from_str(RESPONSE).unwrap();
        let feed = client.convert_response(response).unwrap();
        assert_eq!(feed.location.unwrap().name, "Home");
    }

    #[test]
    fn celsius_conversion() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }
}
