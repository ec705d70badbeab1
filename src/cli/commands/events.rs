use anyhow::Result;
use compute::feed::RecentEventFetcher;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, trace};

use crate::clients::UsgsFeed;
use crate::config::{AppConfig, build_http_client};

pub async fn list_events(config: &AppConfig) -> Result<()> {
    trace!("Entering list_events function");
    let feed = UsgsFeed::new(build_http_client()?, &config.feed_url);
    let mut rng = StdRng::from_entropy();
    let mut fetcher = RecentEventFetcher::new();

    info!("Fetching recent events from {}", config.feed_url);
    let events = match fetcher.refresh(&feed, &mut rng).await {
        Ok(events) => events,
        Err(e) => {
            error!("Failed to load recent events: {}", e);
            return Err(e.into());
        }
    };

    if events.is_empty() {
        println!("No events with a magnitude in the feed.");
        return Ok(());
    }

    for (index, event) in events.iter().enumerate() {
        let form = event.to_form_data();
        println!("{}. M{:.1}  {}  ({})", index + 1, event.magnitude, event.place, event.id);
        println!(
            "   latitude={} longitude={} depth={} nst={} gap={} clo={} rms={}",
            form.latitude, form.longitude, form.depth, form.nst, form.gap, form.clo, form.rms
        );
    }

    Ok(())
}
