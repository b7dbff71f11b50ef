pub mod feed;
pub mod openweathermap;

pub use feed::{parse_feed, read_feed};
pub use openweathermap::OpenWeatherMapClient;
