pub mod chatbot;
pub mod clock;
pub mod error;
pub mod feed;
pub mod prediction;
pub mod submission;
pub mod testing;
pub mod weather;

use std::time::Duration;

use prediction::{DEFAULT_DELAY, StubPredictor};

/// Returns the predictor the application runs with.
///
/// `delay` overrides the simulated model latency; `None` uses [`DEFAULT_DELAY`].
pub fn default_predictor(delay: Option<Duration>) -> StubPredictor {
    StubPredictor::new(delay.unwrap_or(DEFAULT_DELAY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::FormData;
    use prediction::Predictor;

    #[test]
    fn test_default_predictor_uses_default_delay() {
        assert_eq!(default_predictor(None).delay(), DEFAULT_DELAY);
        assert_eq!(
            default_predictor(Some(Duration::ZERO)).delay(),
            Duration::ZERO
        );
    }

    #[tokio::test]
    async fn test_default_predictor_without_delay() {
        let predictor = default_predictor(Some(Duration::ZERO));
        let prediction = predictor.predict(&FormData::example()).await.unwrap();
        assert!(prediction.is_well_formed());
    }
}
