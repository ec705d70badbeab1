use common::RecentEvent;
use crate::api_client;

/// Get the strongest earthquakes of the last day
pub async fn get_recent_events() -> Result<Vec<RecentEvent>, String> {
    log::trace!("Fetching recent events");
    let result: Result<Vec<RecentEvent>, String> = api_client::get("/events/recent").await;
    match &result {
        Ok(events) => log::info!("Fetched {} recent events", events.len()),
        Err(e) => log::error!("Failed to fetch recent events: {}", e),
    }
    result
}
