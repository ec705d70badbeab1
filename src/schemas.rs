use std::sync::Arc;

use common::{
    ApiResponse, ChatMessage, ChatRequest, ErrorResponse, ForecastEntry, FormData, Prediction,
    PredictionResult, RecentEvent, Sender, ValidationErrorResponse,
};
use compute::chatbot::Chatbot;
use compute::clock::Clock;
use compute::feed::FeedSource;
use compute::prediction::Predictor;
use compute::weather::WeatherLookup;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub type SharedChatbot = Arc<Chatbot<Arc<dyn WeatherLookup>, Arc<dyn Clock>>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Magnitude model
    pub predictor: Arc<dyn Predictor>,
    /// Source of the recent events list
    pub feed: Arc<dyn FeedSource>,
    /// Rule based chat assistant
    pub chatbot: SharedChatbot,
    /// Whether a weather API key was configured
    pub weather_configured: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chat_rules", &self.chatbot.rules().len())
            .field("weather_configured", &self.weather_configured)
            .finish_non_exhaustive()
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// "configured" or "missing"
    pub weather_api: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::predictions::create_prediction,
        crate::handlers::events::get_recent_events,
        crate::handlers::chat::send_message,
    ),
    components(
        schemas(
            ApiResponse<Prediction>,
            ApiResponse<Vec<RecentEvent>>,
            ApiResponse<ChatMessage>,
            ErrorResponse,
            ValidationErrorResponse,
            HealthResponse,
            ChatRequest,
            FormData,
            Prediction,
            PredictionResult,
            ForecastEntry,
            RecentEvent,
            ChatMessage,
            Sender,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "predictions", description = "Magnitude prediction endpoints"),
        (name = "events", description = "Recent earthquake events"),
        (name = "chat", description = "Chat assistant"),
    ),
    info(
        title = "QuakeCast API",
        description = "Earthquake magnitude prediction form backend with recent events and a chat assistant",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

