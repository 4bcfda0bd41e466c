use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required variable {0} is not set")]
    MissingVar(&'static str),
    #[error("invalid value '{value}' for {var}")]
    InvalidValue { var: &'static str, value: String },
    #[error("invalid duration '{0}'")]
    InvalidDuration(String),
}

/// Where forecasts come from on a cache miss
#[derive(Clone, PartialEq, Eq)]
pub enum Source {
    OpenWeather {
        api_url: String,
        api_key: String,
        timeout: Duration,
    },
    Directory(PathBuf),
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub listen: String,
    pub source: Source,
    pub cache_ttl: Duration,
    pub cache_capacity: Option<u64>,
}

impl Config {
    pub const DEFAULT_LISTEN: &'static str = "localhost:5555";
    pub const DEFAULT_API_URL: &'static str = "https://api.openweathermap.org/data/2.5/weather";
    pub const DEFAULT_CACHE_TTL: &'static str = "5h";
    pub const DEFAULT_SRC_TIMEOUT: &'static str = "10s";

    /// Longest accepted cache entry lifetime
    pub const MAX_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

    /// Build from a variable lookup such as the process environment.
    /// Unset and blank variables fall back to the defaults above.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let listen = get("WEATHER_LISTEN").unwrap_or_else(|| Self::DEFAULT_LISTEN.to_string());

        let raw_ttl = get("WEATHER_CACHE_TTL").unwrap_or_else(|| Self::DEFAULT_CACHE_TTL.to_string());
        let cache_ttl = parse_duration(&raw_ttl)?;
        // zero expires every save at once; moka rejects lifetimes past 1000 years
        if cache_ttl.is_zero() || cache_ttl > Self::MAX_CACHE_TTL {
            return Err(ConfigError::InvalidValue {
                var: "WEATHER_CACHE_TTL",
                value: raw_ttl,
            });
        }

        let cache_capacity = match get("WEATHER_CACHE_CAPACITY") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    var: "WEATHER_CACHE_CAPACITY",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };

        let source = match get("WEATHER_SRC_DIR") {
            Some(dir) => {
                warn!("WEATHER_SRC_DIR set, serving forecasts from {}", dir);
                Source::Directory(PathBuf::from(dir))
            }
            None => Source::OpenWeather {
                api_url: get("WEATHER_SRC_API_URL")
                    .unwrap_or_else(|| Self::DEFAULT_API_URL.to_string()),
                api_key: get("WEATHER_SRC_API_KEY")
                    .ok_or(ConfigError::MissingVar("WEATHER_SRC_API_KEY"))?,
                timeout: parse_duration(
                    &get("WEATHER_SRC_TIMEOUT")
                        .unwrap_or_else(|| Self::DEFAULT_SRC_TIMEOUT.to_string()),
                )?,
            },
        };

        Ok(Self {
            listen,
            source,
            cache_ttl,
            cache_capacity,
        })
    }
}

// The API key never reaches the logs.
impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::OpenWeather {
                api_url, timeout, ..
            } => f
                .debug_struct("OpenWeather")
                .field("api_url", api_url)
                .field("api_key", &"<redacted>")
                .field("timeout", timeout)
                .finish(),
            Source::Directory(dir) => f.debug_tuple("Directory").field(dir).finish(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen", &self.listen)
            .field("source", &self.source)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

/// Parse a duration string such as "500ms", "30s", "5m", "5h" or "1d".
/// A bare number is read as seconds.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ConfigError::InvalidDuration(s.to_string()));
    }

    let num_end = s
        .chars()
        .position(|c| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());

    let (num_str, unit) = s.split_at(num_end);
    let num: f64 = num_str
        .parse()
        .map_err(|_| ConfigError::InvalidDuration(s.to_string()))?;

    let multiplier_ms: u64 = match unit.trim() {
        "ms" => 1,
        "" | "s" => 1000,
        "m" => 60 * 1000,
        "h" => 60 * 60 * 1000,
        "d" => 24 * 60 * 60 * 1000,
        _ => return Err(ConfigError::InvalidDuration(s.to_string())),
    };

    Ok(Duration::from_millis((num * multiplier_ms as f64) as u64))
}
