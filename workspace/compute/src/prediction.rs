//! Stand-in for a magnitude prediction model.
//!
//! [`StubPredictor`] ignores its input, sleeps for a configurable delay and
//! draws a magnitude and a five day forecast from the injected RNG. Dates are
//! taken from the injected [`Clock`], starting the day after "now".

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Days;
use common::{FORECAST_DAYS, ForecastEntry, FormData, Prediction, PredictionResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, trace};

use crate::clock::{Clock, SystemClock};
use crate::error::{ComputeError, Result};

/// Delay used by the stub when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

const BASE_MAGNITUDE: f64 = 5.0;
const BASE_SPREAD: f64 = 2.5;
const BASE_JITTER: f64 = 0.25;
const DAILY_JITTER: f64 = 0.4;

/// Anything that turns a submitted form into a prediction.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, form: &FormData) -> Result<Prediction>;
}

pub struct StubPredictor<R = StdRng, C = SystemClock> {
    rng: Mutex<R>,
    clock: C,
    delay: Duration,
}

impl StubPredictor {
    /// Entropy seeded RNG and the wall clock.
    pub fn new(delay: Duration) -> Self {
        Self::with_parts(StdRng::from_entropy(), SystemClock, delay)
    }
}

impl<R, C> StubPredictor<R, C>
where
    R: Rng + Send,
    C: Clock,
{
    pub fn with_parts(rng: R, clock: C, delay: Duration) -> Self {
        Self {
            rng: Mutex::new(rng),
            clock,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Draw a prediction without waiting.
    pub fn generate(&self) -> Result<Prediction> {
        let now = self.clock.now();
        let today = now.date_naive();

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| ComputeError::Runtime(format!("Predictor RNG poisoned: {}", e)))?;

        let base = BASE_MAGNITUDE
            + rng.gen_range(0.0..BASE_SPREAD)
            + rng.gen_range(-BASE_JITTER..BASE_JITTER);
        trace!("Drew base magnitude {:.3}", base);

        let forecast = (1..=FORECAST_DAYS as u64)
            .map(|offset| -> Result<ForecastEntry> {
                let date = today.checked_add_days(Days::new(offset)).ok_or_else(|| {
                    ComputeError::Date(format!("Cannot add {} days to {}", offset, today))
                })?;
                Ok(ForecastEntry {
                    date,
                    magnitude: base + rng.gen_range(-DAILY_JITTER..DAILY_JITTER),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Prediction {
            result: PredictionResult {
                magnitude: base,
                timestamp: now,
            },
            forecast,
        })
    }
}

#[async_trait]
impl<R, C> Predictor for StubPredictor<R, C>
where
    R: Rng + Send,
    C: Clock,
{
    #[instrument(skip(self, _form))]
    async fn predict(&self, _form: &FormData) -> Result<Prediction> {
        if !self.delay.is_zero() {
            debug!("Simulating model latency of {:?}", self.delay);
            tokio::time::sleep(self.delay).await;
        }
        self.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn seeded(seed: u64) -> StubPredictor<StdRng, FixedClock> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 12, 30, 23, 15, 0).unwrap());
        StubPredictor::with_parts(StdRng::seed_from_u64(seed), clock, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_prediction_shape() {
        let predictor = seeded(7);
        let prediction = predictor.predict(&FormData::example()).await.unwrap();

        assert!(prediction.is_well_formed());
        assert_eq!(
            prediction.forecast[0].date,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert_eq!(
            prediction.forecast[4].date,
            NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()
        );
        assert_eq!(
            prediction.result.timestamp,
            Utc.with_ymd_and_hms(2024, 12, 30, 23, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_magnitudes_stay_in_range() {
        let predictor = seeded(42);
        for _ in 0..500 {
            let prediction = predictor.generate().unwrap();
            let base = prediction.result.magnitude;
            assert!((4.75..7.75).contains(&base), "base {base} out of range");
            for entry in &prediction.forecast {
                assert!((entry.magnitude - base).abs() < DAILY_JITTER);
            }
        }
    }

    #[test]
    fn test_same_seed_same_prediction() {
        assert_eq!(seeded(3).generate().unwrap(), seeded(3).generate().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let predictor =
            StubPredictor::with_parts(StdRng::seed_from_u64(1), clock, DEFAULT_DELAY);

        let started = tokio::time::Instant::now();
        predictor.predict(&FormData::default()).await.unwrap();
        assert!(started.elapsed() >= DEFAULT_DELAY);
    }
}
