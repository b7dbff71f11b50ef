use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Worst-case conditions across the whole day window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayConditions {
    pub max_temp_f: i32,
    pub max_rain_chance: i32,
    pub max_wind_mph: i32,
}

/// One forecast sample that belongs to a rain period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainSample {
    pub timestamp: DateTime<Utc>,
    pub time: String,
    pub chance: f64,
}

/// A maximal run of consecutive points at or above the rain threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainPeriod {
    pub start_time: String,
    pub end_time: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub max_chance: f64,
    pub forecasts: Vec<RainSample>,
}

impl RainPeriod {
    pub fn is_single_instant(&self) -> bool {
        self.start_time == self.end_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RainTiming {
    pub periods: Vec<RainPeriod>,
    pub has_rain: bool,
    pub summary: String,
}

/// Fixed local-time buckets used for finer-grained advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaySegment {
    Morning,
    Afternoon,
    Evening,
}

impl DaySegment {
    pub const ALL: [DaySegment; 3] = [
        DaySegment::Morning,
        DaySegment::Afternoon,
        DaySegment::Evening,
    ];

    /// Local hour range, start inclusive and end exclusive
    pub fn hours(&self) -> (u32, u32) {
        match self {
            DaySegment::Morning => (6, 12),
            DaySegment::Afternoon => (12, 18),
            DaySegment::Evening => (18, 24),
        }
    }

    pub fn from_hour(hour: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|segment| {
            let (start, end) = segment.hours();
            hour >= start && hour < end
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DaySegment::Morning => "morning",
            DaySegment::Afternoon => "afternoon",
            DaySegment::Evening => "evening",
        }
    }
}

impl std::fmt::Display for DaySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregates for one day segment that had at least one forecast point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentConditions {
    pub segment: DaySegment,
    pub avg_temp_f: i32,
    pub max_rain_chance: i32,
    pub max_wind_mph: i32,
    pub start_time: String,
    pub end_time: String,
    pub top_off: bool,
    pub doors_off: bool,
    #[serde(skip)]
    pub min_point_temp_f: i32,
    #[serde(skip)]
    pub max_point_temp_f: i32,
}

impl SegmentConditions {
    pub fn setup(&self) -> Setup {
        Setup::from_flags(self.top_off, self.doors_off)
    }
}

/// Morning/afternoon/evening analysis; empty segments are `None`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentPeriods {
    pub morning: Option<SegmentConditions>,
    pub afternoon: Option<SegmentConditions>,
    pub evening: Option<SegmentConditions>,
}

impl SegmentPeriods {
    pub fn get(&self, segment: DaySegment) -> Option<&SegmentConditions> {
        match segment {
            DaySegment::Morning => self.morning.as_ref(),
            DaySegment::Afternoon => self.afternoon.as_ref(),
            DaySegment::Evening => self.evening.as_ref(),
        }
    }

    pub fn set(&mut self, conditions: SegmentConditions) {
        match conditions.segment {
            DaySegment::Morning => self.morning = Some(conditions),
            DaySegment::Afternoon => self.afternoon = Some(conditions),
            DaySegment::Evening => self.evening = Some(conditions),
        }
    }

    /// Segments with data in Morning -> Afternoon -> Evening order
    pub fn valid(&self) -> Vec<&SegmentConditions> {
        DaySegment::ALL
            .iter()
            .filter_map(|segment| self.get(*segment))
            .collect()
    }
}

/// Top/doors configuration class used to group segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Setup {
    BothOff,
    TopOff,
    BothOn,
}

impl Setup {
    pub fn from_flags(top_off: bool, doors_off: bool) -> Self {
        match (top_off, doors_off) {
            (true, true) => Setup::BothOff,
            (true, false) => Setup::TopOff,
            _ => Setup::BothOn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPattern {
    Consistent,
    Variable,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedRecommendations {
    pub periods: SegmentPeriods,
    pub recommendations: Vec<String>,
    pub pattern: DayPattern,
}

/// Everything a rendering layer needs from one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub city: String,
    pub last_updated: DateTime<Utc>,
    pub top_off: bool,
    pub doors_off: bool,
    pub max_temp: i32,
    /// Peak rain chance for the day; the field name is historical
    pub min_rain: i32,
    pub max_wind: i32,
    pub rain_timing: RainTiming,
    pub time_based_recommendations: TimeBasedRecommendations,
    pub explanations: Vec<String>,
}
