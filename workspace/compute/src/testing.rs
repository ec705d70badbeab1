//! In-memory stand-ins for the remote services, used by the tests of this
//! crate and by the API tests of the server.

use std::collections::HashMap;

use async_trait::async_trait;
use common::{FormData, Prediction};

use crate::error::{ComputeError, Result};
use crate::feed::{FeatureCollection, FeedSource};
use crate::prediction::Predictor;
use crate::weather::{WeatherLookup, WeatherOutcome, WeatherReport};

/// Predictor that always fails with the given reason.
#[derive(Debug, Clone)]
pub struct FailingPredictor {
    reason: String,
}

impl FailingPredictor {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl Predictor for FailingPredictor {
    async fn predict(&self, _form: &FormData) -> Result<Prediction> {
        Err(ComputeError::Prediction(self.reason.clone()))
    }
}

/// Feed that serves a fixed document, or fails.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    response: std::result::Result<FeatureCollection, String>,
}

impl StaticFeed {
    pub fn new(collection: FeatureCollection) -> Self {
        Self { response: Ok(collection) }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self { response: Err(reason.into()) }
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch(&self) -> Result<FeatureCollection> {
        self.response.clone().map_err(ComputeError::Feed)
    }
}

/// Weather lookup backed by a map of known cities (case insensitive).
#[derive(Debug, Clone, Default)]
pub struct StaticWeather {
    cities: HashMap<String, WeatherReport>,
    failure: Option<String>,
}

impl StaticWeather {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            cities: HashMap::new(),
            failure: Some(reason.into()),
        }
    }

    pub fn with_city(mut self, city: &str, report: WeatherReport) -> Self {
        self.cities.insert(city.to_lowercase(), report);
        self
    }
}

#[async_trait]
impl WeatherLookup for StaticWeather {
    async fn current_weather(&self, city: &str) -> Result<WeatherOutcome> {
        if let Some(reason) = &self.failure {
            return Err(ComputeError::Weather(reason.clone()));
        }
        Ok(self
            .cities
            .get(&city.to_lowercase())
            .cloned()
            .map_or(WeatherOutcome::NotFound, WeatherOutcome::Found))
    }
}
