use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of entries in a forecast series.
pub const FORECAST_DAYS: usize = 5;

/// Predicted magnitude and when it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionResult {
    pub magnitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// One day of the forecast series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub magnitude: f64,
}

pub type ForecastSeries = Vec<ForecastEntry>;

/// A prediction together with the forecast generated in the same call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prediction {
    pub result: PredictionResult,
    #[schema(value_type = Vec<ForecastEntry>)]
    pub forecast: ForecastSeries,
}

impl Prediction {
    /// Exactly [`FORECAST_DAYS`] entries, each one day after the previous.
    pub fn is_well_formed(&self) -> bool {
        self.forecast.len() == FORECAST_DAYS
            && self
                .forecast
                .windows(2)
                .all(|pair| pair[0].date.succ_opt() == Some(pair[1].date))
    }

    /// Smallest and largest forecast magnitude, `None` for an empty forecast.
    pub fn forecast_bounds(&self) -> Option<(f64, f64)> {
        self.forecast.iter().map(|entry| entry.magnitude).fold(None, |acc, m| match acc {
            None => Some((m, m)),
            Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn prediction(days: &[u32]) -> Prediction {
        Prediction {
            result: PredictionResult {
                magnitude: 6.1,
                timestamp: Utc.with_ymd_and_hms(2024, 2, 4, 12, 0, 0).unwrap(),
            },
            forecast: days
                .iter()
                .zip([5.8, 6.2, 5.5, 6.5, 6.0])
                .map(|(day, magnitude)| ForecastEntry {
                    date: NaiveDate::from_ymd_opt(2024, 2, *day).unwrap(),
                    magnitude,
                })
                .collect(),
        }
    }

    #[test]
    fn test_consecutive_series_is_well_formed() {
        assert!(prediction(&[5, 6, 7, 8, 9]).is_well_formed());
    }

    #[test]
    fn test_gaps_and_short_series_are_rejected() {
        assert!(!prediction(&[5, 6, 8, 9, 10]).is_well_formed());
        assert!(!prediction(&[5, 6, 7, 8]).is_well_formed());
    }

    #[test]
    fn test_forecast_bounds() {
        assert_eq!(prediction(&[5, 6, 7, 8, 9]).forecast_bounds(), Some((5.5, 6.5)));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(prediction(&[5, 6, 7, 8, 9])).unwrap();
        assert_eq!(json["forecast"][0]["date"], "2024-02-05");
        assert_eq!(json["result"]["magnitude"], 6.1);
    }
}
