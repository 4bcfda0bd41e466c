pub mod forecast;
pub mod health;

pub use forecast::get_forecasts;
pub use health::health_check;
