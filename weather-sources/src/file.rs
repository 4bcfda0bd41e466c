use async_trait::async_trait;
use shared::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use weather::Forecast;
use weather::ports::ForecastProvider;

/// Serves forecasts from `<dir>/<city>.json`, city lowercased.
/// Meant for offline runs and tests.
#[derive(Debug, Clone)]
pub struct FileWeatherSource {
    dir: PathBuf,
}

impl FileWeatherSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, city: &str) -> Option<PathBuf> {
        // city names never address anything outside the directory
        if city.is_empty() || city.contains(['/', '\\']) || city.contains("..") {
            return None;
        }
        Some(self.dir.join(format!("{}.json", city.to_lowercase())))
    }
}

#[async_trait]
impl ForecastProvider for FileWeatherSource {
    async fn get_forecast(&self, city: &str) -> Result<Forecast> {
        let path = self.path_for(city).ok_or(Error::NotFound)?;
        debug!("reading forecast for {} from {}", city, path.display());

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Error::NotFound),
            Err(e) => return Err(Error::from(e).wrap("unable to read file")),
        };

        serde_json::from_slice(&bytes).map_err(|e| Error::from(e).wrap("unable to unmarshal bytes"))
    }
}
