pub mod advisories;
pub mod calculations;
pub mod conditions;
pub mod day_window;
pub mod engine;
pub mod rain_timing;
pub mod segments;

pub use engine::RecommendationEngine;
