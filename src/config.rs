use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use compute::chatbot::Chatbot;
use compute::clock::{Clock, SystemClock};
use compute::default_predictor;
use compute::weather::WeatherLookup;
use reqwest::Client;
use tracing::{info, warn};

use crate::clients::{OpenWeather, UsgsFeed};
use crate::schemas::AppState;

pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Settings shared by every command that talks to the remote services.
#[derive(Args, Debug, Clone)]
pub struct AppConfig {
    /// USGS GeoJSON summary feed used for the recent events list
    #[arg(long, env = "EARTHQUAKE_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// OpenWeatherMap "current weather" endpoint
    #[arg(long, env = "WEATHER_API_URL", default_value = DEFAULT_WEATHER_API_URL)]
    pub weather_api_url: String,

    /// OpenWeatherMap API key used by the chat assistant
    #[arg(long, env = "WEATHER_API_KEY", default_value = "", hide_env_values = true)]
    pub weather_api_key: String,

    /// Simulated latency of the prediction model in milliseconds
    #[arg(long, env = "PREDICTION_DELAY_MS", default_value_t = 1500)]
    pub prediction_delay_ms: u64,
}

impl AppConfig {
    pub fn prediction_delay(&self) -> Duration {
        Duration::from_millis(self.prediction_delay_ms)
    }

    pub fn has_weather_key(&self) -> bool {
        !self.weather_api_key.trim().is_empty()
    }
}

/// HTTP client for the outbound calls. No request timeout is configured.
pub fn build_http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("quakecast/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Initialize application state from the configuration
pub fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    let client = build_http_client()?;

    if !config.has_weather_key() {
        warn!("WEATHER_API_KEY is not set, weather questions will not find any city");
    }

    info!(
        "Prediction delay set to {} ms",
        config.prediction_delay_ms
    );
    let predictor = default_predictor(Some(config.prediction_delay()));

    let feed = UsgsFeed::new(client.clone(), &config.feed_url);
    let weather: Arc<dyn WeatherLookup> = Arc::new(OpenWeather::new(
        client,
        &config.weather_api_url,
        &config.weather_api_key,
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let chatbot = Chatbot::new(weather, clock).context("Failed to compile chat rules")?;

    Ok(AppState {
        predictor: Arc::new(predictor),
        feed: Arc::new(feed),
        chatbot: Arc::new(chatbot),
        weather_configured: config.has_weather_key(),
    })
}
