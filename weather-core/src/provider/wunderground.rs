use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::{config::ApiKey, error::Result};

use super::{ProviderId, TemperatureProvider, read_body};

const DEFAULT_BASE_URL: &str = "http://api.wunderground.com";
const DEFAULT_LOCALE: &str = "de";

#[derive(Debug, Clone)]
pub struct WeatherUndergroundProvider {
    api_key: ApiKey,
    base_url: String,
    locale: String,
    http: Client,
}

impl WeatherUndergroundProvider {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// The city and locale are path segments, so both are percent-encoded.
    fn conditions_url(&self, city: &str) -> String {
        format!(
            "{}/api/{}/conditions/q/{}/{}.json",
            self.base_url,
            urlencoding::encode(self.api_key.expose()),
            urlencoding::encode(&self.locale),
            urlencoding::encode(city),
        )
    }
}

#[derive(Debug, Deserialize)]
struct WuObservation {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WuConditionsResponse {
    current_observation: WuObservation,
}

#[async_trait]
impl TemperatureProvider for WeatherUndergroundProvider {
    fn name(&self) -> &str {
        ProviderId::WeatherUnderground.as_str()
    }

    async fn temperature(&self, city: &str) -> Result<f64> {
        let res = self
            .http
            .get(self.conditions_url(city))
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let body = read_body(ProviderId::WeatherUnderground, res).await?;
        let parsed: WuConditionsResponse = serde_json::from_str(&body)?;
        let celsius = parsed.current_observation.temp_c;

        info!("{}: {}: {:.2}", self.name(), city, celsius);
        Ok(celsius)
    }
}
