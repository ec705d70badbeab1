use common::{FormController, SubmitError};
use tracing::{error, info};

use crate::prediction::Predictor;

/// What happened to a submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The prediction was stored on the controller.
    Stored,
    /// The predictor failed; the controller carries an alert.
    Failed,
}

/// Validate the controller's form and run it through `predictor`.
///
/// Validation failures are returned as `Err` and leave the controller out of
/// the loading state. Predictor failures are not errors here: they end up as
/// the controller's alert and the previous prediction is kept.
pub async fn submit<P>(controller: &mut FormController, predictor: &P) -> Result<SubmitOutcome, SubmitError>
where
    P: Predictor + ?Sized,
{
    let form = controller.begin_submission()?;

    match predictor.predict(&form).await {
        Ok(prediction) => {
            info!("Prediction completed");
            controller.complete_submission(Ok(prediction));
            Ok(SubmitOutcome::Stored)
        }
        Err(e) => {
            error!("Predictor failed: {}", e);
            controller.complete_submission(Err(e.to_string()));
            Ok(SubmitOutcome::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::prediction::StubPredictor;
    use crate::testing::FailingPredictor;
    use chrono::{TimeZone, Utc};
    use common::FormField;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn predictor() -> StubPredictor<StdRng, FixedClock> {
        StubPredictor::with_parts(
            StdRng::seed_from_u64(11),
            FixedClock(Utc.with_ymd_and_hms(2024, 2, 4, 8, 0, 0).unwrap()),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_each_missing_field_blocks_submission() {
        let predictor = predictor();
        for field in FormField::ALL {
            let mut controller = FormController::new();
            controller.load_example();
            controller.update_field(field, "");

            let result = submit(&mut controller, &predictor).await;
            assert_eq!(result, Err(SubmitError::Invalid(1)));
            assert!(controller.errors().contains(field));
            assert!(controller.prediction().is_none());
            assert!(!controller.is_loading());
        }
    }

    #[tokio::test]
    async fn test_valid_form_stores_prediction() {
        let mut controller = FormController::new();
        controller.load_example();

        let outcome = submit(&mut controller, &predictor()).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Stored);

        let prediction = controller.prediction().expect("prediction stored");
        assert!(prediction.is_well_formed());
        assert!((4.75..7.75).contains(&prediction.result.magnitude));
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_failing_predictor_keeps_previous_result() {
        let mut controller = FormController::new();
        controller.load_example();
        submit(&mut controller, &predictor()).await.unwrap();
        let previous = controller.prediction().cloned();

        let outcome = submit(&mut controller, &FailingPredictor::new("model offline"))
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.prediction().cloned(), previous);
        assert!(controller.alert().unwrap().contains("model offline"));
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_block_submission() {
        let mut controller = FormController::new();
        controller.load_example();
        controller.update_field(FormField::Latitude, "-95");
        controller.update_field(FormField::Longitude, "181");
        controller.update_field(FormField::Depth, "0");

        assert_eq!(
            submit(&mut controller, &predictor()).await,
            Err(SubmitError::Invalid(3))
        );
    }
}
