use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ComputeError, Result};

/// Current conditions for a city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// City name as the service spells it
    pub name: String,
    pub description: String,
    /// Degrees Celsius
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    Found(WeatherReport),
    /// The service answered but did not know the city.
    NotFound,
}

/// Live weather source. Transport failures are `Err`.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn current_weather(&self, city: &str) -> Result<WeatherOutcome>;
}

#[async_trait]
impl<T: WeatherLookup + ?Sized> WeatherLookup for Arc<T> {
    async fn current_weather(&self, city: &str) -> Result<WeatherOutcome> {
        (**self).current_weather(city).await
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: String,
    weather: Vec<Condition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

/// Interpret an OpenWeatherMap "current weather" body.
///
/// The service reports its own status in `cod`, as a number on success and
/// usually as a string ("404") on failure.
pub fn parse_current_weather(body: Value) -> Result<WeatherOutcome> {
    let code = match body.get("cod") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse::<i64>().ok(),
        _ => None,
    };

    if code != Some(200) {
        debug!("Weather service answered with code {:?}", code);
        return Ok(WeatherOutcome::NotFound);
    }

    let current: CurrentWeather = serde_json::from_value(body)?;
    let description = current
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .ok_or_else(|| {
            ComputeError::Weather(format!("No conditions reported for {}", current.name))
        })?;

    Ok(WeatherOutcome::Found(WeatherReport {
        name: current.name,
        description,
        temperature: current.main.temp,
    }))
}
