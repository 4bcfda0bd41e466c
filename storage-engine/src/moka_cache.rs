use async_trait::async_trait;
use moka::future::Cache;
use shared::{Error, Result};
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;
use weather::ports::{ForecastProvider, WriteableForecastProvider};
use weather::Forecast;

/// Moka-based forecast store with a fixed time-to-live per entry.
/// Lock-free and safe for concurrent reads and writes on any city.
#[derive(Clone)]
pub struct MokaForecastStore {
    cache: Cache<String, Forecast>,
}

impl MokaForecastStore {
    /// Create an unbounded store whose entries expire `ttl` after being written
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, None)
    }

    /// Create a store with an optional bound on the number of cached cities
    pub fn with_capacity(ttl: Duration, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().name("forecasts").time_to_live(ttl);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl ForecastProvider for MokaForecastStore {
    async fn get_forecast(&self, city: &str) -> Result<Forecast> {
        // Either never stored or TTL expired
        self.cache.get(city).await.ok_or(Error::NotFound)
    }
}

#[async_trait]
impl WriteableForecastProvider for MokaForecastStore {
    async fn save_forecast(&self, city: &str, forecast: Forecast) -> Result<()> {
        self.cache.insert(city.to_string(), forecast).await;
        debug!("stored forecast for {}", city);
        Ok(())
    }
}

impl Debug for MokaForecastStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaForecastStore")
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}
