use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{Error, Result};
use std::time::Duration;
use tracing::debug;
use weather::Forecast;
use weather::ports::ForecastProvider;

/// Client for the OpenWeatherMap "current weather" endpoint.
///
/// Upstream statuses are classified as: 404 -> `NotFound`, 401 ->
/// `Misconfigured`, 429 -> `RateLimited`, anything else that is not 200 ->
/// `Internal`. Every call is bounded by the client timeout.
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a source with its own HTTP client and call deadline
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::internal(format!("unable to build http client: {}", e)))?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create a source around an existing HTTP client
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherSource {
    async fn get_forecast(&self, city: &str) -> Result<Forecast> {
        debug!("requesting forecast for {} from {}", city, self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::internal(format!("request to external service failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(Error::NotFound),
            StatusCode::UNAUTHORIZED => return Err(Error::Misconfigured),
            StatusCode::TOO_MANY_REQUESTS => return Err(Error::RateLimited),
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::internal(format!(
                    "external service returned {} and {}",
                    status.as_u16(),
                    body
                )));
            }
        }

        response
            .json::<Forecast>()
            .await
            .map_err(|e| Error::internal(format!("unable to decode forecast: {}", e)))
    }
}
