use crate::models::ForecastPoint;
use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Rain chance at or above this starts (or extends) a rain period
pub const RAIN_PERIOD_THRESHOLD: f64 = 10.0;

/// Rain chance assumed for a rainy condition code with no reported probability
pub const RAINY_CONDITION_CHANCE: f64 = 50.0;

const MPS_TO_MPH: f64 = 2.237;

/// Rain chance (0-100) for a single forecast point. Not rounded.
///
/// A reported probability always wins over the condition code.
pub fn rain_chance(point: &ForecastPoint) -> f64 {
    match point.precipitation_prob {
        Some(prob) => prob * 100.0,
        None if point.weather_condition().is_rainy() => RAINY_CONDITION_CHANCE,
        None => 0.0,
    }
}

/// Wind speed in whole mph
pub fn wind_mph(point: &ForecastPoint) -> i32 {
    round_half_up(point.wind_speed_mps * MPS_TO_MPH)
}

pub fn temp_f(point: &ForecastPoint) -> i32 {
    round_half_up(point.temp_f)
}

/// Round to nearest, with halves going up (-2.5 -> -2, 2.5 -> 3)
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

pub fn local_hour(timestamp: DateTime<Utc>, offset: FixedOffset) -> u32 {
    timestamp.with_timezone(&offset).hour()
}

/// "3:00 PM"
pub fn clock_label(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp
        .with_timezone(&offset)
        .format("%-I:%M %p")
        .to_string()
}

/// "3 PM"
pub fn hour_label(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp
        .with_timezone(&offset)
        .format("%-I %p")
        .to_string()
}

/// "58°F" or "58°F - 71°F"
pub fn temp_range_label(min: i32, max: i32) -> String {
    if min == max {
        format!("{}°F", min)
    } else {
        format!("{}°F - {}°F", min, max)
    }
}
