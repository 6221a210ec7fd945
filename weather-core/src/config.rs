use std::{fmt, net::SocketAddr};

use crate::{
    error::{Error, Result},
    provider::ProviderId,
};

pub const OWM_API_KEY: &str = "OWM_API_KEY";
pub const WU_API_KEY: &str = "WU_API_KEY";
pub const OWM_BASE_URL: &str = "OWM_BASE_URL";
pub const WU_BASE_URL: &str = "WU_BASE_URL";
pub const WU_LOCALE: &str = "WU_LOCALE";
pub const LISTEN_ADDR: &str = "WEATHER_LISTEN_ADDR";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_WU_LOCALE: &str = "de";

/// API key for a single provider. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Configuration for a single provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: ApiKey,
    /// Overrides the provider's public host, e.g. to point at a mock server.
    pub base_url: Option<String>,
}

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub openweathermap: ProviderConfig,
    pub wunderground: ProviderConfig,
    /// Locale segment used in Weather Underground condition URLs.
    pub wunderground_locale: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Both API keys are required; empty or whitespace-only values count as
    /// missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let require = |name: &'static str| {
            get(name)
                .map(ApiKey::new)
                .ok_or(Error::MissingEnv { name })
        };

        let openweathermap = ProviderConfig {
            api_key: require(OWM_API_KEY)?,
            base_url: get(OWM_BASE_URL),
        };
        let wunderground = ProviderConfig {
            api_key: require(WU_API_KEY)?,
            base_url: get(WU_BASE_URL),
        };

        let wunderground_locale =
            get(WU_LOCALE).unwrap_or_else(|| DEFAULT_WU_LOCALE.to_string());

        let raw_addr = get(LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw_addr.parse::<SocketAddr>().map_err(|e| {
            Error::InvalidConfig(format!("{LISTEN_ADDR}={raw_addr} is not a socket address: {e}"))
        })?;

        Ok(Self {
            openweathermap,
            wunderground,
            wunderground_locale,
            listen_addr,
        })
    }

    pub fn provider_config(&self, id: ProviderId) -> &ProviderConfig {
        match id {
            ProviderId::OpenWeatherMap => &self.openweathermap,
            ProviderId::WeatherUnderground => &self.wunderground,
        }
    }
}
