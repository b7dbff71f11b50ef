use serde::{Deserialize, Serialize};

/// Comfort thresholds supplied by the caller. Never mutated by the engine.
///
/// `doors_off_min_temp_f` is expected to be at or above `top_off_min_temp_f`,
/// but nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub top_off_min_temp_f: f64,
    pub doors_off_min_temp_f: f64,
    #[serde(alias = "rainChanceThreshold")]
    pub max_rain_chance_percent: f64,
    #[serde(alias = "windSpeedThreshold")]
    pub max_wind_mph: f64,
}

impl Settings {
    /// Top can come off when it is warm enough and dry enough
    pub fn allows_top_off(&self, temp_f: f64, rain_chance: f64) -> bool {
        temp_f >= self.top_off_min_temp_f && rain_chance < self.max_rain_chance_percent
    }

    /// Doors additionally need calm enough wind
    pub fn allows_doors_off(&self, temp_f: f64, rain_chance: f64, wind_mph: f64) -> bool {
        temp_f >= self.doors_off_min_temp_f
            && rain_chance < self.max_rain_chance_percent
            && wind_mph < self.max_wind_mph
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_off_min_temp_f: 60.0,
            doors_off_min_temp_f: 70.0,
            max_rain_chance_percent: 20.0,
            max_wind_mph: 15.0,
        }
    }
}
