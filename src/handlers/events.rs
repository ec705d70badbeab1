use axum::{extract::State, http::StatusCode, response::Json};
use common::{ApiResponse, ErrorResponse, RecentEvent};
use compute::feed::fetch_recent_events;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, instrument, trace};

use crate::schemas::AppState;

/// Get the three strongest events of the last day
///
/// Values the feed leaves empty (station count, gap, distance, RMS) are filled
/// with plausible random numbers so every event can populate the form.
#[utoipa::path(
    get,
    path = "/api/v1/events/recent",
    tag = "events",
    responses(
        (status = 200, description = "Recent events retrieved successfully", body = ApiResponse<Vec<RecentEvent>>),
        (status = 502, description = "Earthquake feed unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_recent_events(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RecentEvent>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_recent_events function");
    let mut rng = StdRng::from_entropy();

    match fetch_recent_events(state.feed.as_ref(), &mut rng).await {
        Ok(events) => {
            info!("Returning {} recent events", events.len());
            Ok(Json(ApiResponse {
                data: events,
                message: "Recent events retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Failed to load recent events: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Failed to load recent earthquake events".to_string(),
                    code: "FEED_UNAVAILABLE".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
