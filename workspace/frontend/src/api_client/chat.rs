use common::{ChatMessage, ChatRequest};
use crate::api_client;

/// Browser's offset from UTC in minutes, east positive.
fn local_utc_offset_minutes() -> i32 {
    // getTimezoneOffset() is UTC minus local time.
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}

/// Ask the assistant for a reply to one message
pub async fn send_message(message: &str) -> Result<ChatMessage, String> {
    log::debug!("Sending chat message ({} chars)", message.len());
    let request = ChatRequest::new(message).with_utc_offset(local_utc_offset_minutes());
    let result: Result<ChatMessage, String> = api_client::post("/chat", &request).await;
    if let Err(e) = &result {
        log::error!("Chat request failed: {}", e);
    }
    result
}
