//! reqwest adapters for the two remote services.

use async_trait::async_trait;
use compute::error::{ComputeError, Result};
use compute::feed::{FeatureCollection, FeedSource};
use compute::weather::{WeatherLookup, WeatherOutcome, parse_current_weather};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

/// USGS GeoJSON summary feed.
#[derive(Debug, Clone)]
pub struct UsgsFeed {
    client: Client,
    url: String,
}

impl UsgsFeed {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FeedSource for UsgsFeed {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<FeatureCollection> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ComputeError::Feed(format!("Request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| ComputeError::Feed(format!("Feed returned an error: {}", e)))?;

        let collection: FeatureCollection = resp
            .json()
            .await
            .map_err(|e| ComputeError::Feed(format!("Invalid feed document: {}", e)))?;
        debug!("Feed returned {} features", collection.features.len());
        Ok(collection)
    }
}

/// OpenWeatherMap "current weather" endpoint, metric units.
#[derive(Clone)]
pub struct OpenWeather {
    client: Client,
    url: String,
    api_key: String,
}

impl OpenWeather {
    pub fn new(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for OpenWeather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeather")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WeatherLookup for OpenWeather {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherOutcome> {
        // Unknown cities come back as 404 with a JSON body, so the status is
        // left to parse_current_weather instead of error_for_status.
        let resp = self
            .client
            .get(&self.url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| ComputeError::Weather(format!("Request failed: {}", e)))?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| ComputeError::Weather(format!("Invalid response ({}): {}", status, e)))?;
        parse_current_weather(body)
    }
}
