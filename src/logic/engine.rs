use super::conditions::{analyze_day, recommend};
use super::day_window::select_today;
use super::rain_timing::analyze_rain_timing;
use super::segments::analyze_time_of_day;
use crate::error::Result;
use crate::models::{DayConditions, ForecastFeed, RecommendationResult, Settings};
use chrono::{DateTime, Utc};

pub const DEFAULT_CITY: &str = "Current Location";

/// Runs the full analysis pipeline over one forecast snapshot.
///
/// Stateless; the settings are copied in and never modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine {
    settings: Settings,
}

impl RecommendationEngine {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Analyze "today" as of the current instant
    pub fn analyze(&self, feed: &ForecastFeed) -> Result<RecommendationResult> {
        self.analyze_at(feed, Utc::now())
    }

    /// Analyze the day containing `now` at the forecast location
    pub fn analyze_at(
        &self,
        feed: &ForecastFeed,
        now: DateTime<Utc>,
    ) -> Result<RecommendationResult> {
        let window = select_today(feed, now);
        let conditions = analyze_day(&window.points)?;
        let decision = recommend(&conditions, &self.settings);

        let rain_timing = analyze_rain_timing(&window.points, window.offset);
        let time_based = analyze_time_of_day(&window.points, window.offset, &self.settings);

        let mut explanations = time_based.recommendations.clone();
        if rain_timing.has_rain {
            explanations.push(format!("Rain timing: {}", rain_timing.summary));
        }
        explanations.push(self.technical_details(&conditions));

        let city = feed
            .location
            .as_ref()
            .map(|l| l.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        tracing::info!(
            "{}: top off {}, doors off {}",
            city,
            decision.top_off,
            decision.doors_off
        );

        Ok(RecommendationResult {
            city,
            last_updated: feed.cached_at.unwrap_or(now),
            top_off: decision.top_off,
            doors_off: decision.doors_off,
            max_temp: conditions.max_temp_f,
            min_rain: conditions.max_rain_chance,
            max_wind: conditions.max_wind_mph,
            rain_timing,
            time_based_recommendations: time_based,
            explanations,
        })
    }

    fn technical_details(&self, conditions: &DayConditions) -> String {
        let s = &self.settings;
        format!(
            "Details: high {}°F, rain chance {}%, wind {} mph (top off at {}°F+, doors off at {}°F+, rain under {}%, wind under {} mph)",
            conditions.max_temp_f,
            conditions.max_rain_chance,
            conditions.max_wind_mph,
            s.top_off_min_temp_f,
            s.doors_off_min_temp_f,
            s.max_rain_chance_percent,
            s.max_wind_mph
        )
    }
}
