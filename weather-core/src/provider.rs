use crate::{
    Config,
    error::{Error, Result},
    provider::{openweathermap::OpenWeatherMapProvider, wunderground::WeatherUndergroundProvider},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweathermap;
pub mod wunderground;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeatherMap,
    WeatherUnderground,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "openweathermap",
            ProviderId::WeatherUnderground => "wunderground",
        }
    }

    /// All known providers, in the order their readings are averaged.
    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeatherMap, ProviderId::WeatherUnderground]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can produce a Celsius reading for a city.
#[async_trait]
pub trait TemperatureProvider: Send + Sync + Debug {
    /// Tag used in log lines.
    fn name(&self) -> &str;

    async fn temperature(&self, city: &str) -> Result<f64>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Box<dyn TemperatureProvider> {
    let provider_config = config.provider_config(id);
    let api_key = provider_config.api_key.clone();
    let base_url = provider_config.base_url.clone();

    match id {
        ProviderId::OpenWeatherMap => {
            let provider = OpenWeatherMapProvider::new(api_key);
            Box::new(match base_url {
                Some(url) => provider.with_base_url(url),
                None => provider,
            })
        }
        ProviderId::WeatherUnderground => {
            let provider = WeatherUndergroundProvider::new(api_key)
                .with_locale(config.wunderground_locale.clone());
            Box::new(match base_url {
                Some(url) => provider.with_base_url(url),
                None => provider,
            })
        }
    }
}

/// Construct every known provider, in averaging order.
pub fn providers_from_config(config: &Config) -> Vec<Box<dyn TemperatureProvider>> {
    ProviderId::all()
        .iter()
        .map(|id| provider_from_config(*id, config))
        .collect()
}

/// Turns a non-2xx upstream reply into an error, otherwise yields the body.
///
/// Request URLs embed API keys, so they are stripped from transport errors.
pub(crate) async fn read_body(provider: ProviderId, res: reqwest::Response) -> Result<String> {
    let status = res.status();
    let body = res.text().await.map_err(reqwest::Error::without_url)?;

    if !status.is_success() {
        return Err(Error::UpstreamStatus {
            provider,
            status,
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OWM_API_KEY, OWM_BASE_URL, WU_API_KEY};

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: Vec<(String, String)> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| {
            vars.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
        })
        .expect("config should load")
    }

    #[test]
    fn provider_id_display_matches_log_tag() {
        assert_eq!(ProviderId::OpenWeatherMap.to_string(), "openweathermap");
        assert_eq!(ProviderId::WeatherUnderground.to_string(), "wunderground");
    }

    #[test]
    fn providers_from_config_keeps_order() {
        let cfg = config(&[(OWM_API_KEY, "OPEN_KEY"), (WU_API_KEY, "WU_KEY")]);
        let providers = providers_from_config(&cfg);

        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["openweathermap", "wunderground"]);
    }

    #[test]
    fn provider_from_config_does_not_leak_key_in_debug() {
        let cfg = config(&[
            (OWM_API_KEY, "OPEN_KEY"),
            (WU_API_KEY, "WU_KEY"),
            (OWM_BASE_URL, "http://localhost:1"),
        ]);
        let provider = provider_from_config(ProviderId::OpenWeatherMap, &cfg);

        let debug = format!("{provider:?}");
        assert!(!debug.contains("OPEN_KEY"));
        assert!(debug.contains("http://localhost:1"));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }
}
