use super::advisories;
use super::calculations::{hour_label, local_hour, rain_chance, round_half_up, temp_f, wind_mph};
use crate::models::{
    DayPattern, DaySegment, ForecastPoint, SegmentConditions, SegmentPeriods, Settings,
    TimeBasedRecommendations,
};
use chrono::FixedOffset;

/// Morning/afternoon/evening breakdown with grouped advice
pub fn analyze_time_of_day(
    points: &[&ForecastPoint],
    offset: FixedOffset,
    settings: &Settings,
) -> TimeBasedRecommendations {
    let periods = analyze_segments(points, offset, settings);
    let valid = periods.valid();
    let pattern = classify(&valid);
    let recommendations = advisories::advise(&valid, pattern, settings);

    tracing::debug!(
        "Time-of-day analysis: {} segment(s), {:?} pattern",
        valid.len(),
        pattern
    );

    TimeBasedRecommendations {
        periods,
        recommendations,
        pattern,
    }
}

pub fn analyze_segments(
    points: &[&ForecastPoint],
    offset: FixedOffset,
    settings: &Settings,
) -> SegmentPeriods {
    let mut buckets: [Vec<&ForecastPoint>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    for point in points.iter().copied() {
        let hour = local_hour(point.timestamp, offset);
        if let Some(segment) = DaySegment::from_hour(hour) {
            buckets[segment as usize].push(point);
        }
    }

    let mut periods = SegmentPeriods::default();
    for (segment, bucket) in DaySegment::ALL.into_iter().zip(buckets.iter()) {
        if let Some(conditions) = summarize_segment(segment, bucket, offset, settings) {
            periods.set(conditions);
        }
    }
    periods
}

/// Segment aggregates. Temperature is the average here, unlike the
/// day-level peak; rain and wind stay worst-case.
fn summarize_segment(
    segment: DaySegment,
    points: &[&ForecastPoint],
    offset: FixedOffset,
    settings: &Settings,
) -> Option<SegmentConditions> {
    let first = points.first()?;
    let last = points.last()?;

    let temp_sum: f64 = points.iter().map(|p| p.temp_f).sum();
    let avg_temp_f = round_half_up(temp_sum / points.len() as f64);

    let max_rain = points
        .iter()
        .map(|p| rain_chance(p))
        .fold(0.0_f64, f64::max);
    let max_rain_chance = round_half_up(max_rain);

    let max_wind_mph = points.iter().map(|p| wind_mph(p)).max()?;
    let min_point_temp_f = points.iter().map(|p| temp_f(p)).min()?;
    let max_point_temp_f = points.iter().map(|p| temp_f(p)).max()?;

    let temp = avg_temp_f as f64;
    let rain = max_rain_chance as f64;

    Some(SegmentConditions {
        segment,
        avg_temp_f,
        max_rain_chance,
        max_wind_mph,
        start_time: hour_label(first.timestamp, offset),
        end_time: hour_label(last.timestamp, offset),
        top_off: settings.allows_top_off(temp, rain),
        doors_off: settings.allows_doors_off(temp, rain, max_wind_mph as f64),
        min_point_temp_f,
        max_point_temp_f,
    })
}

/// Uniform when every segment with data agrees on the top, variable otherwise
pub fn classify(valid: &[&SegmentConditions]) -> DayPattern {
    if valid.is_empty() {
        return DayPattern::Unknown;
    }
    let top_off_count = valid.iter().filter(|s| s.top_off).count();
    if top_off_count == 0 || top_off_count == valid.len() {
        DayPattern::Consistent
    } else {
        DayPattern::Variable
    }
}
