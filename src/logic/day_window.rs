use crate::models::{ForecastFeed, ForecastPoint};
use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};

/// Points used when the feed has nothing for today
pub const FALLBACK_POINT_COUNT: usize = 8;

/// The forecast points that make up "today" at the forecast location,
/// with the UTC offset that was used to find them.
#[derive(Debug, Clone)]
pub struct DayWindow<'a> {
    pub points: Vec<&'a ForecastPoint>,
    pub offset: FixedOffset,
    pub used_fallback: bool,
}

impl DayWindow<'_> {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn offset_millis(&self) -> i64 {
        self.offset.local_minus_utc() as i64 * 1000
    }
}

/// Location offset from the feed, or the observer's own offset at `now`
pub fn resolve_offset(feed: &ForecastFeed, now: DateTime<Utc>) -> FixedOffset {
    if let Some(seconds) = feed.utc_offset_seconds() {
        match FixedOffset::east_opt(seconds) {
            Some(offset) => return offset,
            None => tracing::warn!(
                "Ignoring out-of-range location offset {}s, using local timezone",
                seconds
            ),
        }
    }
    Local.offset_from_utc_datetime(&now.naive_utc()).fix()
}

/// Select today's points using the feed's location timezone
pub fn select_today(feed: &ForecastFeed, now: DateTime<Utc>) -> DayWindow<'_> {
    let offset = resolve_offset(feed, now);
    select_day(&feed.points, now, offset)
}

/// Select the points whose local date matches the local date of `now`.
///
/// Falls back to the first few points, regardless of date, when none match.
pub fn select_day(
    points: &[ForecastPoint],
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> DayWindow<'_> {
    let today = now.with_timezone(&offset).date_naive();

    let todays: Vec<&ForecastPoint> = points
        .iter()
        .filter(|p| p.timestamp.with_timezone(&offset).date_naive() == today)
        .collect();

    if !todays.is_empty() {
        tracing::debug!("Day window {}: {} points", today, todays.len());
        return DayWindow {
            points: todays,
            offset,
            used_fallback: false,
        };
    }

    tracing::warn!(
        "No forecast points for {}, falling back to the first {} points",
        today,
        FALLBACK_POINT_COUNT
    );

    DayWindow {
        points: points.iter().take(FALLBACK_POINT_COUNT).collect(),
        offset,
        used_fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastLocation;
    use chrono::Duration;
    use proptest::prelude::*;

    fn points_from(start: DateTime<Utc>, count: usize) -> Vec<ForecastPoint> {
        (0..count)
            .map(|i| {
                ForecastPoint::new(start + Duration::hours(3 * i as i64), 60.0 + i as f64, 2.0)
            })
            .collect()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn selects_only_todays_points() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let points = points_from(start, 16);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let window = select_day(&points, now, utc());
        assert!(!window.used_fallback);
        assert_eq!(window.points.len(), 8);
        assert_eq!(window.points[0].timestamp, start);
        assert_eq!(window.points[7].timestamp, start + Duration::hours(21));
    }

    #[test]
    fn day_boundary_follows_location_offset() {
        // 2024-06-01 06:00 UTC is 00:00 in UTC+6
        let start = Utc.with_ymd_and_hms(2024, 5, 31, 18, 0, 0).unwrap();
        let points = points_from(start, 16);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let offset = FixedOffset::east_opt(6 * 3600).unwrap();

        let window = select_day(&points, now, offset);
        assert_eq!(window.points.len(), 8);
        assert_eq!(
            window.points[0].timestamp,
            Utc.with_ymd_and_hms(2024, 5, 31, 18, 0, 0).unwrap()
        );
        assert!(window
            .points
            .iter()
            .all(|p| p.timestamp < Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()));
        assert_eq!(window.offset_millis(), 6 * 3600 * 1000);
    }

    #[test]
    fn falls_back_to_first_points_when_feed_starts_tomorrow() {
        let start = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        let points = points_from(start, 12);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let window = select_day(&points, now, utc());
        assert!(window.used_fallback);
        assert_eq!(window.points.len(), FALLBACK_POINT_COUNT);
        assert_eq!(window.points[0].timestamp, start);
    }

    #[test]
    fn empty_feed_yields_empty_window() {
        let window = select_day(&[], Utc::now(), utc());
        assert!(window.is_empty());
        assert!(window.used_fallback);
    }

    #[test]
    fn feed_offset_is_used_when_present() {
        let feed = ForecastFeed::new(Vec::new())
            .with_location(ForecastLocation::new("Moab").with_utc_offset(-6 * 3600));
        let offset = resolve_offset(&feed, Utc::now());
        assert_eq!(offset.local_minus_utc(), -6 * 3600);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_local() {
        let now = Utc::now();
        let feed = ForecastFeed::new(Vec::new())
            .with_location(ForecastLocation::new("Nowhere").with_utc_offset(200_000));
        let expected = Local.offset_from_utc_datetime(&now.naive_utc()).fix();
        assert_eq!(resolve_offset(&feed, now), expected);
    }

    proptest! {
        #[test]
        fn fallback_returns_leading_points_in_order(count in 0usize..20, days_ahead in 1i64..5) {
            let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
            let start =
                Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::days(days_ahead);
            let points: Vec<ForecastPoint> = (0..count)
                .map(|i| ForecastPoint::new(start + Duration::hours(i as i64), 50.0, 1.0))
                .collect();

            let window = select_day(&points, now, utc());
            let expected: Vec<&ForecastPoint> = points.iter().take(8).collect();
            prop_assert_eq!(window.points, expected);
        }
    }
}
