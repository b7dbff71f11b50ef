use super::calculations::temp_range_label;
use crate::models::{DayPattern, DaySegment, SegmentConditions, Settings, Setup};

pub const NO_DETAILED_FORECAST: &str = "No detailed forecast available for today";

pub const PERFECT_ALL_DAY: &str = "Perfect weather all day! Keep both top and doors off.";
pub const TOP_OFF_ALL_DAY: &str =
    "Great weather for the top off all day, but keep doors on due to wind or temperature.";
pub const KEEP_ON_TODAY: &str = "Weather conditions suggest keeping top and doors on today.";

pub const TRANSITION_TIP: &str =
    "Conditions change during the day, so plan to stop and adjust your setup.";

const ALL_DAY: &str = "all day";

/// Advisory sentences for the segments that have data, in day order
pub fn advise(
    valid: &[&SegmentConditions],
    pattern: DayPattern,
    settings: &Settings,
) -> Vec<String> {
    if valid.is_empty() {
        return vec![NO_DETAILED_FORECAST.to_string()];
    }

    let mut sentences = match pattern {
        DayPattern::Variable => variable_day(valid, settings),
        DayPattern::Consistent | DayPattern::Unknown => vec![consistent_day(valid).to_string()],
    };

    // A single sentence spanning several segments gets the day's temperature range
    if sentences.len() == 1 && valid.len() > 1 {
        let range = day_temp_range(valid);
        sentences[0] = sentences[0].replace(ALL_DAY, &range);
    }

    sentences
}

fn consistent_day(valid: &[&SegmentConditions]) -> &'static str {
    let all_top_off = valid.iter().all(|s| s.top_off);
    let all_doors_off = valid.iter().all(|s| s.doors_off);

    if all_top_off && all_doors_off {
        PERFECT_ALL_DAY
    } else if all_top_off {
        TOP_OFF_ALL_DAY
    } else {
        KEEP_ON_TODAY
    }
}

fn variable_day(valid: &[&SegmentConditions], settings: &Settings) -> Vec<String> {
    let runs = group_runs(valid);

    let mut sentences: Vec<String> = runs.iter().map(|run| run.sentence(settings)).collect();

    let changes = runs.windows(2).any(|pair| {
        let (a, b) = (pair[0].lead(), pair[1].lead());
        a.top_off != b.top_off || a.doors_off != b.doors_off
    });
    if runs.len() >= 2 && changes {
        sentences.push(TRANSITION_TIP.to_string());
    }

    sentences
}

/// Consecutive segments sharing one setup
#[derive(Debug)]
pub struct Run<'a> {
    pub setup: Setup,
    pub segments: Vec<&'a SegmentConditions>,
}

impl<'a> Run<'a> {
    fn lead(&self) -> &'a SegmentConditions {
        self.segments[0]
    }

    pub fn time_phrase(&self) -> TimePhrase {
        match self.segments.as_slice() {
            [only] => TimePhrase::Single(only.segment),
            [first, second] => TimePhrase::Pair(first.segment, second.segment),
            _ => TimePhrase::AllDay,
        }
    }

    /// Worst-case factors behind the run's setup, e.g. " (as cool as 58°F, 40% rain chance)"
    pub fn reason_clause(&self, settings: &Settings) -> String {
        let min_temp = self
            .segments
            .iter()
            .map(|s| s.avg_temp_f)
            .min()
            .unwrap_or(i32::MAX);
        let max_rain = self
            .segments
            .iter()
            .map(|s| s.max_rain_chance)
            .max()
            .unwrap_or(0);
        let max_wind = self
            .segments
            .iter()
            .map(|s| s.max_wind_mph)
            .max()
            .unwrap_or(0);

        let temp_floor = match self.setup {
            Setup::TopOff => settings.doors_off_min_temp_f,
            Setup::BothOff | Setup::BothOn => settings.top_off_min_temp_f,
        };

        let mut reasons = Vec::new();
        if (min_temp as f64) < temp_floor {
            reasons.push(format!("as cool as {}°F", min_temp));
        }
        if max_rain as f64 >= settings.max_rain_chance_percent {
            reasons.push(format!("{}% rain chance", max_rain));
        }
        if max_wind as f64 >= settings.max_wind_mph {
            reasons.push(format!("winds up to {} mph", max_wind));
        }

        if reasons.is_empty() {
            String::new()
        } else {
            format!(" ({})", reasons.join(", "))
        }
    }

    pub fn sentence(&self, settings: &Settings) -> String {
        let phrase = self.time_phrase();
        template(self.setup, phrase.is_all_day())
            .replace("{phrase}", &capitalize(&phrase.text()))
            .replace("{reason}", &self.reason_clause(settings))
    }
}

pub fn group_runs<'a>(valid: &[&'a SegmentConditions]) -> Vec<Run<'a>> {
    let mut runs: Vec<Run<'a>> = Vec::new();
    for segment in valid.iter().copied() {
        match runs.last_mut() {
            Some(run) if run.setup == segment.setup() => run.segments.push(segment),
            _ => runs.push(Run {
                setup: segment.setup(),
                segments: vec![segment],
            }),
        }
    }
    runs
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePhrase {
    Single(DaySegment),
    Pair(DaySegment, DaySegment),
    AllDay,
}

impl TimePhrase {
    pub fn is_all_day(&self) -> bool {
        matches!(self, TimePhrase::AllDay)
    }

    pub fn text(&self) -> String {
        match self {
            TimePhrase::Single(segment) => format!("This {}", segment),
            TimePhrase::Pair(first, second) => format!("{} and {}", first, second),
            TimePhrase::AllDay => ALL_DAY.to_string(),
        }
    }
}

/// Sentence templates keyed by setup and whether the run covers the whole day
fn template(setup: Setup, all_day: bool) -> &'static str {
    match (setup, all_day) {
        (Setup::BothOff, false) => "{phrase}: perfect for top and doors off{reason}.",
        (Setup::BothOff, true) => "Top and doors off all day{reason}.",
        (Setup::TopOff, false) => "{phrase}: top off, but keep the doors on{reason}.",
        (Setup::TopOff, true) => "Top off all day, but keep the doors on{reason}.",
        (Setup::BothOn, false) => "{phrase}: keep the top and doors on{reason}.",
        (Setup::BothOn, true) => "Keep the top and doors on all day{reason}.",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Range over the segments with data. Pre-dawn points (before 6 AM) are
/// left out, even though they count toward the day-level peaks.
fn day_temp_range(valid: &[&SegmentConditions]) -> String {
    let min = valid.iter().map(|s| s.min_point_temp_f).min().unwrap_or(0);
    let max = valid.iter().map(|s| s.max_point_temp_f).max().unwrap_or(0);
    temp_range_label(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            top_off_min_temp_f: 60.0,
            doors_off_min_temp_f: 65.0,
            max_rain_chance_percent: 10.0,
            max_wind_mph: 15.0,
        }
    }

    fn segment(segment: DaySegment, temp: i32, rain: i32, wind: i32) -> SegmentConditions {
        let s = settings();
        SegmentConditions {
            segment,
            avg_temp_f: temp,
            max_rain_chance: rain,
            max_wind_mph: wind,
            start_time: "6 AM".into(),
            end_time: "9 AM".into(),
            top_off: s.allows_top_off(temp as f64, rain as f64),
            doors_off: s.allows_doors_off(temp as f64, rain as f64, wind as f64),
            min_point_temp_f: temp - 2,
            max_point_temp_f: temp + 2,
        }
    }

    fn advise_for(segments: &[SegmentConditions]) -> (DayPattern, Vec<String>) {
        let valid: Vec<&SegmentConditions> = segments.iter().collect();
        let pattern = crate::logic::segments::classify(&valid);
        (pattern, advise(&valid, pattern, &settings()))
    }

    #[test]
    fn no_segments() {
        assert_eq!(
            advise(&[], DayPattern::Unknown, &settings()),
            vec![NO_DETAILED_FORECAST.to_string()]
        );
    }

    #[test]
    fn perfect_day_gets_temperature_range() {
        let segments = [
            segment(DaySegment::Morning, 68, 0, 4),
            segment(DaySegment::Afternoon, 75, 0, 5),
            segment(DaySegment::Evening, 70, 0, 3),
        ];
        let (pattern, recs) = advise_for(&segments);
        assert_eq!(pattern, DayPattern::Consistent);
        assert_eq!(
            recs,
            vec!["Perfect weather 66°F - 77°F! Keep both top and doors off."]
        );
    }

    #[test]
    fn single_segment_keeps_all_day_wording() {
        let segments = [segment(DaySegment::Evening, 70, 0, 3)];
        let (_, recs) = advise_for(&segments);
        assert_eq!(recs, vec![PERFECT_ALL_DAY.to_string()]);
    }

    #[test]
    fn consistent_top_off_with_doors_on() {
        let segments = [
            segment(DaySegment::Morning, 62, 0, 4),
            segment(DaySegment::Afternoon, 70, 0, 20),
        ];
        let (pattern, recs) = advise_for(&segments);
        assert_eq!(pattern, DayPattern::Consistent);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Great weather for the top off 60°F - 72°F"));
    }

    #[test]
    fn consistent_keep_on() {
        let segments = [
            segment(DaySegment::Morning, 50, 0, 4),
            segment(DaySegment::Afternoon, 55, 40, 4),
            segment(DaySegment::Evening, 52, 0, 4),
        ];
        let (pattern, recs) = advise_for(&segments);
        assert_eq!(pattern, DayPattern::Consistent);
        assert_eq!(recs, vec![KEEP_ON_TODAY.to_string()]);
    }

    #[test]
    fn variable_day_groups_runs() {
        let segments = [
            segment(DaySegment::Morning, 55, 0, 4),
            segment(DaySegment::Afternoon, 72, 0, 5),
            segment(DaySegment::Evening, 70, 0, 3),
        ];
        let (pattern, recs) = advise_for(&segments);
        assert_eq!(pattern, DayPattern::Variable);
        assert_eq!(
            recs,
            vec![
                "This morning: keep the top and doors on (as cool as 55°F).".to_string(),
                "Afternoon and evening: perfect for top and doors off.".to_string(),
                TRANSITION_TIP.to_string(),
            ]
        );
    }

    #[test]
    fn reason_clause_lists_every_failing_factor() {
        let segments = [
            segment(DaySegment::Morning, 70, 0, 4),
            segment(DaySegment::Afternoon, 58, 30, 18),
            segment(DaySegment::Evening, 64, 0, 3),
        ];
        let (pattern, recs) = advise_for(&segments);
        assert_eq!(pattern, DayPattern::Variable);
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0], "This morning: perfect for top and doors off.");
        assert_eq!(
            recs[1],
            "This afternoon: keep the top and doors on (as cool as 58°F, 30% rain chance, winds up to 18 mph)."
        );
        assert_eq!(
            recs[2],
            "This evening: top off, but keep the doors on (as cool as 64°F)."
        );
        assert_eq!(recs[3], TRANSITION_TIP);
    }

    #[test]
    fn run_count_matches_setup_changes() {
        let segments = [
            segment(DaySegment::Morning, 62, 0, 4),
            segment(DaySegment::Afternoon, 64, 0, 4),
            segment(DaySegment::Evening, 50, 0, 4),
        ];
        let valid: Vec<&SegmentConditions> = segments.iter().collect();
        let runs = group_runs(&valid);
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[0].time_phrase(),
            TimePhrase::Pair(DaySegment::Morning, DaySegment::Afternoon)
        );
        assert_eq!(runs[1].time_phrase(), TimePhrase::Single(DaySegment::Evening));
    }

    #[test]
    fn time_phrases() {
        assert_eq!(
            TimePhrase::Single(DaySegment::Afternoon).text(),
            "This afternoon"
        );
        assert_eq!(
            TimePhrase::Pair(DaySegment::Morning, DaySegment::Evening).text(),
            "morning and evening"
        );
        assert_eq!(TimePhrase::AllDay.text(), "all day");
        assert!(TimePhrase::AllDay.is_all_day());
    }

    #[test]
    fn every_template_fills_its_placeholders() {
        for setup in [Setup::BothOff, Setup::TopOff, Setup::BothOn] {
            for all_day in [false, true] {
                let text = template(setup, all_day)
                    .replace("{phrase}", "X")
                    .replace("{reason}", "");
                assert!(!text.contains('{'));
                assert!(text.ends_with('.'));
                assert_eq!(text.contains(ALL_DAY), all_day);
            }
        }
    }
}
