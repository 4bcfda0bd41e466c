use shared::config::{Config, Source};
use std::sync::Arc;
use storage_engine::MokaForecastStore;
use weather::{ForecastManager, ForecastManagerService, ForecastProvider};
use weather_sources::{FileWeatherSource, OpenWeatherSource};

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub forecast_manager: Arc<dyn ForecastManager>,
}

impl AppState {
    pub fn new(forecast_manager: Arc<dyn ForecastManager>) -> Self {
        Self { forecast_manager }
    }

    /// Wire the cache and the configured external source into a forecast manager
    pub fn from_config(config: &Config) -> shared::Result<Self> {
        let external_provider: Arc<dyn ForecastProvider> = match &config.source {
            Source::OpenWeather {
                api_url,
                api_key,
                timeout,
            } => {
                tracing::info!("Using OpenWeatherMap source at {}", api_url);
                Arc::new(OpenWeatherSource::new(
                    api_url.clone(),
                    api_key.clone(),
                    *timeout,
                )?)
            }
            Source::Directory(dir) => {
                tracing::info!("Using file source in {}", dir.display());
                Arc::new(FileWeatherSource::new(dir.clone()))
            }
        };

        let storage_provider = Arc::new(MokaForecastStore::with_capacity(
            config.cache_ttl,
            config.cache_capacity,
        ));
        tracing::info!(
            "Forecast cache initialized (ttl={:?}, capacity={:?})",
            config.cache_ttl,
            config.cache_capacity
        );

        let manager = ForecastManagerService::builder()
            .external_provider(external_provider)
            .storage_provider(storage_provider)
            .build()?;

        Ok(Self::new(Arc::new(manager)))
    }
}
