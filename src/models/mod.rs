pub mod forecast;
pub mod recommendation;
pub mod settings;

pub use forecast::*;
pub use recommendation::*;
pub use settings::*;
