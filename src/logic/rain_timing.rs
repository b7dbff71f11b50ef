use super::calculations::{
    clock_label, local_hour, rain_chance, round_half_up, RAIN_PERIOD_THRESHOLD,
};
use crate::models::{ForecastPoint, RainPeriod, RainSample, RainTiming};
use chrono::FixedOffset;

/// Group consecutive wet points into rain periods and summarize them.
///
/// Points must already be in ascending time order.
pub fn analyze_rain_timing(points: &[&ForecastPoint], offset: FixedOffset) -> RainTiming {
    let periods = find_rain_periods(points, offset);
    let summary = summarize(&periods);

    tracing::debug!("Rain timing: {} period(s)", periods.len());

    RainTiming {
        has_rain: !periods.is_empty(),
        periods,
        summary,
    }
}

pub fn find_rain_periods(points: &[&ForecastPoint], offset: FixedOffset) -> Vec<RainPeriod> {
    let mut periods = Vec::new();
    let mut current: Option<RainPeriod> = None;

    for point in points {
        let chance = rain_chance(point);

        if chance < RAIN_PERIOD_THRESHOLD {
            if let Some(period) = current.take() {
                periods.push(period);
            }
            continue;
        }

        let time = clock_label(point.timestamp, offset);
        let hour = local_hour(point.timestamp, offset);

        let period = current.get_or_insert_with(|| RainPeriod {
            start_time: time.clone(),
            end_time: time.clone(),
            start_hour: hour,
            end_hour: hour,
            max_chance: chance,
            forecasts: Vec::new(),
        });

        period.end_time = time.clone();
        period.end_hour = hour;
        period.max_chance = period.max_chance.max(chance);
        period.forecasts.push(RainSample {
            timestamp: point.timestamp,
            time,
            chance,
        });
    }

    if let Some(period) = current {
        periods.push(period);
    }

    periods
}

pub fn summarize(periods: &[RainPeriod]) -> String {
    match periods {
        [] => "No significant rain expected today".to_string(),
        [period] if period.is_single_instant() => format!(
            "Rain expected around {} ({}% chance)",
            period.start_time,
            round_half_up(period.max_chance)
        ),
        [period] => format!(
            "Rain expected from {} to {} (up to {}% chance)",
            period.start_time,
            period.end_time,
            round_half_up(period.max_chance)
        ),
        _ => {
            let fragments: Vec<String> = periods.iter().map(period_fragment).collect();
            format!("Rain expected: {}", fragments.join(", "))
        }
    }
}

fn period_fragment(period: &RainPeriod) -> String {
    let peak = round_half_up(period.max_chance);
    if period.is_single_instant() {
        format!("{} ({}%)", period.start_time, peak)
    } else {
        format!("{}-{} ({}%)", period.start_time, period.end_time, peak)
    }
}
