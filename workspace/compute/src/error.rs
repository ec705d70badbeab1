use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The event feed could not be fetched
    #[error("Feed error: {0}")]
    Feed(String),

    /// The weather service could not be reached
    #[error("Weather lookup error: {0}")]
    Weather(String),

    /// A payload from a remote service had an unexpected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The predictor failed to produce a result
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Error from date operations
    #[error("Date error: {0}")]
    Date(String),

    /// Runtime error for unexpected situations
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
