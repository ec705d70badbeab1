#[cfg(test)]
pub mod test_utils {
    use std::ops::Deref;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum_test::TestServer;
    use chrono::{TimeZone, Utc};
    use compute::chatbot::Chatbot;
    use compute::clock::{Clock, FixedClock};
    use compute::feed::{FeatureCollection, FeedSource};
    use compute::prediction::{Predictor, StubPredictor};
    use compute::testing::{FailingPredictor, StaticFeed, StaticWeather};
    use compute::weather::{WeatherLookup, WeatherReport};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;
    use tracing::Level;
    use tracing::subscriber::DefaultGuard;
    use tracing_subscriber::FmtSubscriber;

    /// 2024-03-15 10:30:00 UTC, a Friday.
    pub fn test_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap())
    }

    /// Four features: three complete events of different strength, one
    /// without any station values and one without a magnitude.
    pub fn sample_feed() -> FeatureCollection {
        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "id": "us7000a",
                    "geometry": { "coordinates": [142.37, 38.29, 24.4] },
                    "properties": {
                        "mag": 4.7, "place": "off the east coast of Honshu, Japan",
                        "time": 1710498600000_i64, "nst": 88, "gap": 41, "dmin": 2.113, "rms": 0.71
                    }
                },
                {
                    "id": "ci4000b",
                    "geometry": { "coordinates": [-117.6, 35.77, 8.04] },
                    "properties": {
                        "mag": 2.1, "place": "12 km SW of Searles Valley, CA",
                        "time": 1710495000000_i64, "nst": 31, "gap": 62, "dmin": 0.05, "rms": 0.19
                    }
                },
                {
                    "id": "ak5000c",
                    "geometry": { "coordinates": [-151.2, 61.4, 70.0] },
                    "properties": { "mag": 5.6, "place": null, "time": null }
                },
                {
                    "id": "nc6000d",
                    "geometry": { "coordinates": [-122.8, 38.8, 2.1] },
                    "properties": { "mag": null, "place": "The Geysers, CA" }
                }
            ]
        }))
        .unwrap()
    }

    pub fn test_weather() -> StaticWeather {
        StaticWeather::new()
            .with_city(
                "Kolkata",
                WeatherReport {
                    name: "Kolkata".to_string(),
                    description: "haze".to_string(),
                    temperature: 31.0,
                },
            )
            .with_city(
                "Paris",
                WeatherReport {
                    name: "Paris".to_string(),
                    description: "light rain".to_string(),
                    temperature: 12.5,
                },
            )
    }

    /// State assembled from in-memory stand-ins for the given parts.
    pub fn build_state(
        predictor: Arc<dyn Predictor>,
        feed: Arc<dyn FeedSource>,
        weather: Arc<dyn WeatherLookup>,
    ) -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(test_clock());
        let chatbot = Chatbot::with_parts(weather, clock, StdRng::seed_from_u64(11))
            .expect("Failed to build chatbot");
        AppState {
            predictor,
            feed,
            chatbot: Arc::new(chatbot),
            weather_configured: true,
        }
    }

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        let predictor =
            StubPredictor::with_parts(StdRng::seed_from_u64(7), test_clock(), Duration::ZERO);
        build_state(
            Arc::new(predictor),
            Arc::new(StaticFeed::new(sample_feed())),
            Arc::new(test_weather()),
        )
    }

    /// AppState whose remote services and model all fail
    pub fn setup_failing_app_state() -> AppState {
        build_state(
            Arc::new(FailingPredictor::new("model offline")),
            Arc::new(StaticFeed::failing("connection refused")),
            Arc::new(StaticWeather::failing("connection refused")),
        )
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    fn init_test_tracing() -> DefaultGuard {
        // Get log level from environment variable or default to WARN
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Test server that keeps test tracing installed for as long as it lives.
    pub struct TestApp {
        server: TestServer,
        _tracing: DefaultGuard,
    }

    impl TestApp {
        fn new(state: AppState) -> Self {
            let tracing = init_test_tracing();
            let server =
                TestServer::new(create_router(state)).expect("Failed to start test server");
            Self {
                server,
                _tracing: tracing,
            }
        }
    }

    impl Deref for TestApp {
        type Target = TestServer;

        fn deref(&self) -> &TestServer {
            &self.server
        }
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> TestApp {
        TestApp::new(setup_test_app_state())
    }

    /// Create axum app whose dependencies all fail
    pub fn setup_failing_app() -> TestApp {
        TestApp::new(setup_failing_app_state())
    }

    #[tokio::test]
    async fn test_tracing_guard_outlives_setup() {
        let has_subscriber = || {
            tracing::dispatcher::get_default(|dispatch| {
                !dispatch.is::<tracing::subscriber::NoSubscriber>()
            })
        };

        let app = setup_test_app();
        assert!(has_subscriber());
        drop(app);
        assert!(!has_subscriber());
    }
}
