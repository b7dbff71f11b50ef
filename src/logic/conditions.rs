use super::calculations::{rain_chance, round_half_up, temp_f, wind_mph};
use crate::error::{JeepcastError, Result};
use crate::models::{DayConditions, ForecastPoint, Settings};

/// Reduce today's points to worst-case peaks.
///
/// Every metric is a maximum, never an average: one wet or windy hour
/// anywhere in the day is enough to keep the recommendation conservative.
pub fn analyze_day(points: &[&ForecastPoint]) -> Result<DayConditions> {
    if points.is_empty() {
        return Err(JeepcastError::NoForecastData);
    }

    let mut max_temp = i32::MIN;
    let mut max_rain = 0.0_f64;
    let mut max_wind = i32::MIN;

    for point in points {
        max_temp = max_temp.max(temp_f(point));
        max_rain = max_rain.max(rain_chance(point));
        max_wind = max_wind.max(wind_mph(point));
    }

    let conditions = DayConditions {
        max_temp_f: max_temp,
        max_rain_chance: round_half_up(max_rain),
        max_wind_mph: max_wind,
    };

    tracing::debug!(
        "Day conditions: {}°F, {}% rain, {} mph",
        conditions.max_temp_f,
        conditions.max_rain_chance,
        conditions.max_wind_mph
    );

    Ok(conditions)
}

/// Day-level top/doors decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopDoors {
    pub top_off: bool,
    pub doors_off: bool,
}

pub fn recommend(conditions: &DayConditions, settings: &Settings) -> TopDoors {
    let temp = conditions.max_temp_f as f64;
    let rain = conditions.max_rain_chance as f64;
    let wind = conditions.max_wind_mph as f64;

    TopDoors {
        top_off: settings.allows_top_off(temp, rain),
        doors_off: settings.allows_doors_off(temp, rain, wind),
    }
}
