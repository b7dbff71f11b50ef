use crate::models::{DaySegment, RecommendationResult, SegmentConditions};

fn on_off(off: bool) -> &'static str {
    if off {
        "OFF"
    } else {
        "ON"
    }
}

/// Plain-text rendering of one analysis result
pub fn render(result: &RecommendationResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} (updated {})\n",
        result.city,
        result.last_updated.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!(
        "Top: {}  Doors: {}\n",
        on_off(result.top_off),
        on_off(result.doors_off)
    ));
    out.push_str(&format!(
        "High {}°F | Rain {}% | Wind {} mph\n",
        result.max_temp, result.min_rain, result.max_wind
    ));
    out.push('\n');

    let periods = &result.time_based_recommendations.periods;
    for segment in DaySegment::ALL {
        match periods.get(segment) {
            Some(conditions) => out.push_str(&segment_line(conditions)),
            None => out.push_str(&format!("{:<10} no data\n", capitalized(segment))),
        }
    }
    out.push('\n');

    for line in &result.explanations {
        out.push_str(&format!("- {}\n", line));
    }

    out
}

fn segment_line(conditions: &SegmentConditions) -> String {
    let range = format!("{}-{}", conditions.start_time, conditions.end_time);
    format!(
        "{:<10} {:<12} {:>4}°F {:>4}% {:>3} mph  top {}, doors {}\n",
        capitalized(conditions.segment),
        range,
        conditions.avg_temp_f,
        conditions.max_rain_chance,
        conditions.max_wind_mph,
        on_off(conditions.top_off).to_lowercase(),
        on_off(conditions.doors_off).to_lowercase()
    )
}

fn capitalized(segment: DaySegment) -> &'static str {
    match segment {
        DaySegment::Morning => "Morning",
        DaySegment::Afternoon => "Afternoon",
        DaySegment::Evening => "Evening",
    }
}
