use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use common::{
    ApiResponse, ErrorResponse, FormController, FormData, Prediction, SubmitError,
    ValidationErrorResponse,
};
use compute::submission::{SubmitOutcome, submit};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::schemas::AppState;

/// Predict the magnitude for a set of seismic parameters
///
/// Every field is sent as the raw text the user typed. All seven are checked
/// before the model runs; the response lists one message per failing field.
#[utoipa::path(
    post,
    path = "/api/v1/predictions",
    tag = "predictions",
    request_body = FormData,
    responses(
        (status = 200, description = "Prediction generated successfully", body = ApiResponse<Prediction>),
        (status = 422, description = "One or more fields are invalid", body = ValidationErrorResponse),
        (status = 500, description = "Prediction failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> Result<Json<ApiResponse<Prediction>>, Response> {
    trace!("Entering create_prediction function");
    let mut controller = FormController::with_form(form);

    match submit(&mut controller, state.predictor.as_ref()).await {
        Ok(SubmitOutcome::Stored) => match controller.prediction() {
            Some(prediction) => {
                info!(
                    "Prediction generated with magnitude {:.2}",
                    prediction.result.magnitude
                );
                Ok(Json(ApiResponse {
                    data: prediction.clone(),
                    message: "Prediction generated successfully".to_string(),
                    success: true,
                }))
            }
            None => {
                error!("Prediction reported as stored but missing");
                Err(prediction_failed("Prediction missing after submission"))
            }
        },
        Ok(SubmitOutcome::Failed) => {
            let alert = controller.alert().unwrap_or("Prediction failed");
            error!("{}", alert);
            Err(prediction_failed(alert))
        }
        Err(SubmitError::Invalid(count)) => {
            debug!("Rejecting prediction form with {} invalid field(s)", count);
            let body = ValidationErrorResponse::from_errors(controller.errors());
            Err((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response())
        }
        Err(SubmitError::AlreadyLoading) => {
            // A fresh controller is never loading.
            warn!("Unexpected concurrent submission");
            Err(prediction_failed("A prediction is already in progress"))
        }
    }
}

fn prediction_failed(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
            code: "PREDICTION_FAILED".to_string(),
            success: false,
        }),
    )
        .into_response()
}
