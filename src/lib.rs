//! Jeep top/doors recommendations from hourly forecast data.
//!
//! The engine takes a [`ForecastFeed`](models::ForecastFeed) and comfort
//! [`Settings`](models::Settings) and produces a
//! [`RecommendationResult`](models::RecommendationResult): worst-case day
//! conditions, rain periods, and morning/afternoon/evening advice.

pub mod cli;
pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;
pub mod report;

pub use error::{JeepcastError, Result};
pub use logic::RecommendationEngine;
