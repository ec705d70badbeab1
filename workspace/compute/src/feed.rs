//! Recent seismic events from a GeoJSON summary feed.
//!
//! The feed is the USGS summary format: a `FeatureCollection` whose features
//! carry `geometry.coordinates = [lon, lat, depth]` and a `properties` object.
//! Station metrics the form needs are often missing from the feed; those get
//! plausible synthetic values so a selected event always fills every field.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::RecentEvent;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::Result;

/// How many events are offered for selection.
pub const TOP_EVENTS: usize = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<String>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Milliseconds since the Unix epoch
    pub time: Option<i64>,
    pub nst: Option<f64>,
    pub gap: Option<f64>,
    pub dmin: Option<f64>,
    pub rms: Option<f64>,
}

/// Where feed documents come from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<FeatureCollection>;
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Convert one feature. Features without coordinates or magnitude are dropped.
pub fn map_feature<R: Rng + ?Sized>(feature: Feature, rng: &mut R) -> Option<RecentEvent> {
    let coordinates = feature.geometry.map(|g| g.coordinates).unwrap_or_default();
    let [longitude, latitude, depth] = match coordinates.as_slice() {
        [lon, lat, depth, ..] => [*lon, *lat, *depth],
        _ => {
            trace!("Skipping feature {:?} without full coordinates", feature.id);
            return None;
        }
    };

    let props = feature.properties;
    let Some(magnitude) = props.mag else {
        trace!("Skipping feature {:?} without magnitude", feature.id);
        return None;
    };

    let nst = match props.nst {
        Some(nst) if nst >= 0.0 => nst.round() as u32,
        _ => rng.gen_range(10..=60),
    };
    let gap = props.gap.unwrap_or_else(|| round_to(rng.gen_range(20.0..180.0), 1));
    let clo = props.dmin.unwrap_or_else(|| round_to(rng.gen_range(0.1..5.0), 2));
    let rms = props.rms.unwrap_or_else(|| round_to(rng.gen_range(0.1..1.5), 2));

    Some(RecentEvent {
        id: feature.id.unwrap_or_default(),
        latitude,
        longitude,
        depth: round_to(depth, 1),
        magnitude,
        place: props.place.unwrap_or_else(|| "Unknown location".to_string()),
        time: props.time.and_then(DateTime::<Utc>::from_timestamp_millis),
        nst,
        gap,
        clo,
        rms,
    })
}

/// Map a whole feed and keep the strongest [`TOP_EVENTS`] events.
pub fn top_events<R: Rng + ?Sized>(collection: FeatureCollection, rng: &mut R) -> Vec<RecentEvent> {
    let total = collection.features.len();
    let mut events: Vec<RecentEvent> = collection
        .features
        .into_iter()
        .filter_map(|feature| map_feature(feature, &mut *rng))
        .collect();
    debug!("Mapped {} of {} features", events.len(), total);

    events.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    events.truncate(TOP_EVENTS);
    events
}

/// Fetch the feed once and return the strongest events.
#[instrument(skip(source, rng))]
pub async fn fetch_recent_events<S, R>(source: &S, rng: &mut R) -> Result<Vec<RecentEvent>>
where
    S: FeedSource + ?Sized,
    R: Rng + Send + ?Sized,
{
    let collection = source.fetch().await?;
    Ok(top_events(collection, rng))
}

/// Holds the list of events currently offered for selection.
#[derive(Debug, Clone, Default)]
pub struct RecentEventFetcher {
    events: Vec<RecentEvent>,
}

impl RecentEventFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RecentEvent] {
        &self.events
    }

    pub fn select(&self, index: usize) -> Option<&RecentEvent> {
        self.events.get(index)
    }

    /// Replace the list with a fresh fetch. On failure the old list stays.
    pub async fn refresh<S, R>(&mut self, source: &S, rng: &mut R) -> Result<&[RecentEvent]>
    where
        S: FeedSource + ?Sized,
        R: Rng + Send + ?Sized,
    {
        match fetch_recent_events(source, rng).await {
            Ok(events) => {
                info!("Loaded {} recent events", events.len());
                self.events = events;
                Ok(&self.events)
            }
            Err(e) => {
                warn!("Keeping {} cached events after failed refresh: {}", self.events.len(), e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticFeed;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn sample_feed() -> FeatureCollection {
        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "id": "ak001",
                    "geometry": { "type": "Point", "coordinates": [-150.1, 61.2, 33.456] },
                    "properties": { "mag": 2.1, "place": "Alaska", "time": 1700000000000i64 }
                },
                {
                    "id": "us002",
                    "geometry": { "type": "Point", "coordinates": [142.3, 38.1, 10.04] },
                    "properties": { "mag": 6.4, "place": "Japan", "nst": 120, "gap": 15.0, "dmin": 2.3, "rms": 0.91 }
                },
                {
                    "id": "nc003",
                    "geometry": { "type": "Point", "coordinates": [-122.8, 38.8, 2.0] },
                    "properties": { "mag": null, "place": "California" }
                },
                {
                    "id": "us004",
                    "geometry": { "type": "Point", "coordinates": [-70.5, -33.4, 101.25] },
                    "properties": { "mag": 5.0, "place": "Chile" }
                },
                {
                    "id": "us005",
                    "geometry": { "type": "Point", "coordinates": [120.9, 14.6, 50.0] },
                    "properties": { "mag": 4.4, "place": "Philippines" }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_coordinates_are_reordered_and_depth_rounded() {
        let mut rng = StdRng::seed_from_u64(1);
        let feature = sample_feed().features.remove(0);
        let event = map_feature(feature, &mut rng).unwrap();

        assert_eq!(event.latitude, 61.2);
        assert_eq!(event.longitude, -150.1);
        assert_eq!(event.depth, 33.5);
        assert_eq!(event.magnitude, 2.1);
        assert_eq!(event.time.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_source_station_values_are_kept() {
        let mut rng = StdRng::seed_from_u64(1);
        let feature = sample_feed().features.remove(1);
        let event = map_feature(feature, &mut rng).unwrap();

        assert_eq!(event.nst, 120);
        assert_eq!(event.gap, 15.0);
        assert_eq!(event.clo, 2.3);
        assert_eq!(event.rms, 0.91);
    }

    #[test]
    fn test_missing_station_values_are_synthesized_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let feature = sample_feed().features.remove(0);
            let event = map_feature(feature, &mut rng).unwrap();
            assert!((10..=60).contains(&event.nst));
            assert!((20.0..=180.0).contains(&event.gap));
            assert!((0.1..=5.0).contains(&event.clo));
            assert!((0.1..=1.5).contains(&event.rms));
            assert!(event.to_form_data().validate().is_ok());
        }
    }

    #[test]
    fn test_top_events_sorted_by_magnitude() {
        let mut rng = StdRng::seed_from_u64(5);
        let events = top_events(sample_feed(), &mut rng);

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["us002", "us004", "us005"]);
    }

    #[test]
    fn test_feature_without_geometry_is_skipped() {
        let feed: FeatureCollection = serde_json::from_value(json!({
            "features": [ { "id": "x", "geometry": null, "properties": { "mag": 3.0 } } ]
        }))
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(top_events(feed, &mut rng).is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_existing_list() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut fetcher = RecentEventFetcher::new();

        fetcher
            .refresh(&StaticFeed::new(sample_feed()), &mut rng)
            .await
            .unwrap();
        assert_eq!(fetcher.events().len(), 3);
        let before = fetcher.events().to_vec();

        let result = fetcher.refresh(&StaticFeed::failing("connection reset"), &mut rng).await;
        assert!(result.is_err());
        assert_eq!(fetcher.events(), before.as_slice());
        assert_eq!(fetcher.select(0).unwrap().id, "us002");
        assert!(fetcher.select(3).is_none());
    }

    #[tokio::test]
    async fn test_initial_failure_leaves_list_empty() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut fetcher = RecentEventFetcher::new();
        assert!(fetcher.refresh(&StaticFeed::failing("timeout"), &mut rng).await.is_err());
        assert!(fetcher.events().is_empty());
    }
}
