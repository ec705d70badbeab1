use axum::{extract::State, http::StatusCode, response::Json};
use common::{ApiResponse, ChatMessage, ChatRequest, ErrorResponse};
use tracing::{debug, instrument, trace, warn};

use crate::schemas::AppState;

/// Send a message to the chat assistant
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant replied", body = ApiResponse<ChatMessage>),
        (status = 400, description = "Empty or blank message", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatMessage>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering send_message function");
    let message = request.message.trim();

    if message.is_empty() {
        warn!("Rejecting blank chat message");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Message must not be empty".to_string(),
                code: "EMPTY_MESSAGE".to_string(),
                success: false,
            }),
        ));
    }

    let reply = state
        .chatbot
        .respond_in(message, request.utc_offset())
        .await;
    debug!("Assistant reply: {}", reply);

    Ok(Json(ApiResponse {
        data: ChatMessage::bot(reply),
        message: "Reply generated successfully".to_string(),
        success: true,
    }))
}
