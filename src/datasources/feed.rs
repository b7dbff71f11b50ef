use crate::error::{JeepcastError, Result};
use crate::models::{ForecastFeed, ForecastLocation, ForecastPoint};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Read;

// Feed document structures (OpenWeatherMap forecast list plus location/cache metadata)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedDocument {
    list: Vec<FeedItem>,
    #[serde(default)]
    location: Option<FeedLocation>,
    #[serde(default)]
    cache_timestamp: Option<i64>, // epoch millis
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedLocation {
    name: String,
    #[serde(default)]
    utc_offset_seconds: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedItem {
    pub dt: i64,
    pub main: FeedMain,
    pub wind: FeedWind,
    #[serde(default)]
    pub weather: Vec<FeedWeather>,
    #[serde(default)]
    pub pop: Option<f64>, // probability of precipitation
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedWeather {
    pub id: u32,
}

impl FeedItem {
    /// Convert to a forecast point, taking the temperature already in °F
    pub(crate) fn to_point(&self, temp_f: f64) -> Result<ForecastPoint> {
        let timestamp = DateTime::from_timestamp(self.dt, 0).ok_or_else(|| {
            JeepcastError::InvalidData(format!("forecast timestamp out of range: {}", self.dt))
        })?;

        Ok(ForecastPoint {
            timestamp,
            temp_f,
            wind_speed_mps: self.wind.speed,
            condition_id: self.weather.first().map(|w| w.id),
            precipitation_prob: self.pop,
        })
    }
}

/// Parse a feed document whose temperatures are °F and wind speeds m/s
pub fn parse_feed(json: &str) -> Result<ForecastFeed> {
    let document: FeedDocument = serde_json::from_str(json)?;
    convert_document(document)
}

pub fn read_feed<R: Read>(reader: R) -> Result<ForecastFeed> {
    let document: FeedDocument = serde_json::from_reader(reader)?;
    convert_document(document)
}

fn convert_document(document: FeedDocument) -> Result<ForecastFeed> {
    let points = document
        .list
        .iter()
        .map(|item| item.to_point(item.main.temp))
        .collect::<Result<Vec<_>>>()?;

    let mut feed = ForecastFeed::new(points);

    if let Some(location) = document.location {
        let mut loc = ForecastLocation::new(location.name);
        loc.utc_offset_seconds = location.utc_offset_seconds;
        feed = feed.with_location(loc);
    }

    if let Some(millis) = document.cache_timestamp {
        let cached_at: DateTime<Utc> = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            JeepcastError::InvalidData(format!("cache timestamp out of range: {}", millis))
        })?;
        feed = feed.with_cached_at(cached_at);
    }

    tracing::debug!("Parsed feed with {} points", feed.points.len());
    Ok(feed)
}
