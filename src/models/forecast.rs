use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hourly forecast snapshot handed to the engine for one analysis pass.
///
/// Points are in chronological order; insertion order is time order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastFeed {
    pub points: Vec<ForecastPoint>,
    pub location: Option<ForecastLocation>,
    pub cached_at: Option<DateTime<Utc>>,
}

impl ForecastFeed {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self {
            points,
            location: None,
            cached_at: None,
        }
    }

    pub fn with_location(mut self, location: ForecastLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_cached_at(mut self, cached_at: DateTime<Utc>) -> Self {
        self.cached_at = Some(cached_at);
        self
    }

    /// UTC offset of the forecast location in seconds, if known
    pub fn utc_offset_seconds(&self) -> Option<i32> {
        self.location.as_ref().and_then(|l| l.utc_offset_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub name: String,
    pub utc_offset_seconds: Option<i32>,
}

impl ForecastLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            utc_offset_seconds: None,
        }
    }

    pub fn with_utc_offset(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = Some(seconds);
        self
    }
}

/// A single forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temp_f: f64,
    pub wind_speed_mps: f64,
    pub condition_id: Option<u32>, // OpenWeatherMap condition code
    pub precipitation_prob: Option<f64>, // 0.0-1.0
}

impl ForecastPoint {
    pub fn new(timestamp: DateTime<Utc>, temp_f: f64, wind_speed_mps: f64) -> Self {
        Self {
            timestamp,
            temp_f,
            wind_speed_mps,
            condition_id: None,
            precipitation_prob: None,
        }
    }

    pub fn with_condition(mut self, id: u32) -> Self {
        self.condition_id = Some(id);
        self
    }

    pub fn with_precipitation_prob(mut self, prob: f64) -> Self {
        self.precipitation_prob = Some(prob);
        self
    }

    pub fn weather_condition(&self) -> WeatherCondition {
        self.condition_id
            .map(WeatherCondition::from_owm_id)
            .unwrap_or(WeatherCondition::Other)
    }
}

/// OpenWeatherMap condition groups that matter for rain. Snow, fog and
/// cloud codes all land in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Thunderstorm,
    Drizzle,
    Rain,
    Other,
}

impl WeatherCondition {
    pub fn from_owm_id(id: u32) -> Self {
        match id {
            200..=232 => WeatherCondition::Thunderstorm,
            300..=321 => WeatherCondition::Drizzle,
            500..=531 => WeatherCondition::Rain,
            _ => WeatherCondition::Other,
        }
    }

    /// Conditions that count as wet when no probability is reported
    pub fn is_rainy(&self) -> bool {
        !matches!(self, WeatherCondition::Other)
    }
}
