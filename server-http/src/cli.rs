//! Command-line interface. Every option can also be set through its
//! environment variable (or a `.env` file); flags win over the environment.

use clap::Parser;
use shared::config::{Config, ConfigError};

/// Weather forecast server
#[derive(Parser, Debug)]
#[command(name = "server-http")]
#[command(about = "Cached weather forecasts over HTTP")]
#[command(version)]
pub struct Cli {
    /// Bind address
    #[arg(long, env = "WEATHER_LISTEN", default_value = Config::DEFAULT_LISTEN)]
    pub listen: String,

    /// OpenWeatherMap API key, required unless --src-dir is given
    #[arg(long, env = "WEATHER_SRC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream forecast endpoint
    #[arg(long, env = "WEATHER_SRC_API_URL", default_value = Config::DEFAULT_API_URL)]
    pub api_url: String,

    /// Upstream call deadline, e.g. 500ms, 10s
    #[arg(long, env = "WEATHER_SRC_TIMEOUT", default_value = Config::DEFAULT_SRC_TIMEOUT)]
    pub timeout: String,

    /// Serve forecasts from <DIR>/<city>.json instead of OpenWeatherMap
    #[arg(long, value_name = "DIR", env = "WEATHER_SRC_DIR")]
    pub src_dir: Option<String>,

    /// Cache entry lifetime, e.g. 30m, 5h, 1d (at most 365d)
    #[arg(long, env = "WEATHER_CACHE_TTL", default_value = Config::DEFAULT_CACHE_TTL)]
    pub cache_ttl: String,

    /// Max number of cached cities, unbounded when unset
    #[arg(long, env = "WEATHER_CACHE_CAPACITY")]
    pub cache_capacity: Option<String>,
}

impl Cli {
    pub fn config(&self) -> Result<Config, ConfigError> {
        Config::from_lookup(|var| self.lookup(var))
    }

    fn lookup(&self, var: &str) -> Option<String> {
        match var {
            "WEATHER_LISTEN" => Some(self.listen.clone()),
            "WEATHER_SRC_API_KEY" => self.api_key.clone(),
            "WEATHER_SRC_API_URL" => Some(self.api_url.clone()),
            "WEATHER_SRC_TIMEOUT" => Some(self.timeout.clone()),
            "WEATHER_SRC_DIR" => self.src_dir.clone(),
            "WEATHER_CACHE_TTL" => Some(self.cache_ttl.clone()),
            "WEATHER_CACHE_CAPACITY" => self.cache_capacity.clone(),
            _ => None,
        }
    }
}
