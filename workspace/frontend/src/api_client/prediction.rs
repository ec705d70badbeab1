use common::{FormData, Prediction};
use crate::api_client;

/// Run the magnitude model on the submitted form.
///
/// The error is the bare reason; the form controller adds its own
/// "Prediction failed" prefix when it raises the alert.
pub async fn predict(form: &FormData) -> Result<Prediction, String> {
    log::debug!("Requesting prediction for lat={} lon={}", form.latitude, form.longitude);
    let result: Result<Prediction, String> = api_client::post("/predictions", form).await;
    match result {
        Ok(prediction) => {
            log::info!("Received prediction: {:.1}", prediction.result.magnitude);
            Ok(prediction)
        }
        Err(e) => {
            log::error!("Prediction request failed: {}", e);
            Err(match e.strip_prefix("Prediction failed: ") {
                Some(reason) => reason.to_string(),
                None => e,
            })
        }
    }
}
