use crate::domain::{Forecast, Forecasts};
use crate::ports::{ForecastProvider, WriteableForecastProvider};
use async_trait::async_trait;
use shared::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Entry point used by the transport layer
#[async_trait]
pub trait ForecastManager: Send + Sync + 'static {
    async fn get_forecasts(&self, cities: &[String]) -> Result<Forecasts>;
}

/// Cache-aside orchestration over a storage provider and an external provider.
///
/// Cities are resolved one at a time, in request order. A storage hit is
/// returned as is. A storage miss is fetched from the external provider and
/// written back to storage before moving on. The first failure aborts the
/// whole batch and nothing collected so far is returned.
#[derive(Clone)]
pub struct ForecastManagerService {
    external_provider: Arc<dyn ForecastProvider>,
    storage_provider: Arc<dyn WriteableForecastProvider>,
}

impl ForecastManagerService {
    pub fn new(
        external_provider: Arc<dyn ForecastProvider>,
        storage_provider: Arc<dyn WriteableForecastProvider>,
    ) -> Self {
        Self {
            external_provider,
            storage_provider,
        }
    }

    pub fn builder() -> ForecastManagerBuilder {
        ForecastManagerBuilder::default()
    }

    async fn resolve(&self, city: &str) -> Result<Forecast> {
        match self.storage_provider.get_forecast(city).await {
            Ok(forecast) => {
                info!("cache hit for {}", city);
                return Ok(forecast);
            }
            Err(err) if err.is_not_found() => {
                info!("cache miss for {}", city);
            }
            Err(err) => {
                warn!("storage lookup failed for {}: {}", city, err);
                return Err(err.wrap_internal(format!(
                    "error fetching forecast from storage for {}",
                    city
                )));
            }
        }

        let forecast = self
            .external_provider
            .get_forecast(city)
            .await
            .map_err(|err| {
                warn!("external provider failed for {}: {}", city, err);
                err.wrap(format!(
                    "error fetching forecast from external provider for {}",
                    city
                ))
            })?;

        self.storage_provider
            .save_forecast(city, forecast.clone())
            .await
            .map_err(|err| {
                warn!("saving forecast for {} failed: {}", city, err);
                err.wrap_internal(format!("error saving forecast for {}", city))
            })?;

        debug!("cached forecast for {}", city);
        Ok(forecast)
    }
}

#[async_trait]
impl ForecastManager for ForecastManagerService {
    async fn get_forecasts(&self, cities: &[String]) -> Result<Forecasts> {
        let mut forecasts = Forecasts::new();

        for city in cities {
            let forecast = self.resolve(city).await?;
            forecasts.insert(city.clone(), forecast);
        }

        Ok(forecasts)
    }
}

impl std::fmt::Debug for ForecastManagerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastManagerService")
            .field("external_provider", &"<dyn ForecastProvider>")
            .field("storage_provider", &"<dyn WriteableForecastProvider>")
            .finish()
    }
}

/// Builder for `ForecastManagerService`; both providers are required.
#[derive(Default)]
pub struct ForecastManagerBuilder {
    external_provider: Option<Arc<dyn ForecastProvider>>,
    storage_provider: Option<Arc<dyn WriteableForecastProvider>>,
}

impl ForecastManagerBuilder {
    pub fn external_provider(mut self, provider: Arc<dyn ForecastProvider>) -> Self {
        self.external_provider = Some(provider);
        self
    }

    pub fn storage_provider(mut self, provider: Arc<dyn WriteableForecastProvider>) -> Self {
        self.storage_provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<ForecastManagerService> {
        let external_provider = self
            .external_provider
            .ok_or_else(|| Error::Misconfigured.wrap("forecast manager has no external provider"))?;
        let storage_provider = self
            .storage_provider
            .ok_or_else(|| Error::Misconfigured.wrap("forecast manager has no storage provider"))?;

        Ok(ForecastManagerService::new(external_provider, storage_provider))
    }
}
