#![deny(clippy::all)]

pub mod domain;
pub mod manager;
pub mod ports;

pub use domain::{Forecast, Forecasts};
pub use manager::{ForecastManager, ForecastManagerBuilder, ForecastManagerService};
pub use ports::{ForecastProvider, WriteableForecastProvider};
