use crate::domain::Forecast;
use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable extension points for forecast sources and stores

/// Read-only source of forecasts, keyed by city name.
/// Returns `Error::NotFound` (or an error of that kind) when the city is unknown.
#[async_trait]
pub trait ForecastProvider: Send + Sync + 'static {
    async fn get_forecast(&self, city: &str) -> Result<Forecast>;
}

/// A forecast source that also accepts writes (e.g. a cache).
/// Implementations must keep per-city reads and writes safe under concurrent access.
#[async_trait]
pub trait WriteableForecastProvider: ForecastProvider {
    async fn save_forecast(&self, city: &str, forecast: Forecast) -> Result<()>;
}
