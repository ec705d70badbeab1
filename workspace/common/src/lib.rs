//! Common transport-layer types shared between backend and frontend.
//! The structs here mirror the backend handlers' request/response payloads
//! so the frontend can deserialize API responses without duplicating shapes.
//! The form validation rules and the form state machine also live here so the
//! browser validates with exactly the same rules the server applies.

pub mod chat;
pub mod controller;
pub mod events;
pub mod form;
pub mod prediction;

pub use chat::{ChatMessage, ChatRequest, Sender, Transcript};
pub use controller::{FormController, SubmitError};
pub use events::RecentEvent;
pub use form::{FieldError, FormData, FormField, SeismicParameters, ValidationErrors};
pub use prediction::{FORECAST_DAYS, ForecastEntry, ForecastSeries, Prediction, PredictionResult};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Error response for a rejected prediction form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Error message
    pub error: String,
    /// Error code, always `VALIDATION_FAILED`
    pub code: String,
    /// Field name to human readable message
    pub fields: BTreeMap<String, String>,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ValidationErrorResponse {
    pub fn from_errors(errors: &ValidationErrors) -> Self {
        Self {
            error: format!("{} field(s) failed validation", errors.len()),
            code: "VALIDATION_FAILED".to_string(),
            fields: errors.to_messages(),
            success: false,
        }
    }
}
