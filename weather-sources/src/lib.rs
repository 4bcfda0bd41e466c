//! External forecast sources consulted on a cache miss.

pub mod file;
pub mod openweather;

pub use file::FileWeatherSource;
pub use openweather::OpenWeatherSource;
