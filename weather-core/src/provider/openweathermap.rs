use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::{config::ApiKey, error::Result};

use super::{ProviderId, TemperatureProvider, read_body};

const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherMapProvider {
    api_key: ApiKey,
    base_url: String,
    http: Client,
}

impl OpenWeatherMapProvider {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn current_url(&self) -> String {
        format!("{}/data/2.5/weather", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
}

#[async_trait]
impl TemperatureProvider for OpenWeatherMapProvider {
    fn name(&self) -> &str {
        ProviderId::OpenWeatherMap.as_str()
    }

    async fn temperature(&self, city: &str) -> Result<f64> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[
                ("appid", self.api_key.expose()),
                ("q", city),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let body = read_body(ProviderId::OpenWeatherMap, res).await?;
        let parsed: OwmCurrentResponse = serde_json::from_str(&body)?;
        let celsius = parsed.main.temp;

        info!("{}: {}: {:.2}", self.name(), city, celsius);
        Ok(celsius)
    }
}
