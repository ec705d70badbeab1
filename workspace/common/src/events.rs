use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::form::FormData;

/// A recent seismic event offered as a form-filling shortcut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentEvent {
    /// Feed identifier of the event
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Depth in km, rounded to one decimal
    pub depth: f64,
    pub magnitude: f64,
    /// Free text location, e.g. "10 km SW of Somewhere"
    pub place: String,
    /// Origin time of the event, if the feed had one
    pub time: Option<DateTime<Utc>>,
    /// Number of reporting stations
    pub nst: u32,
    /// Azimuthal gap in degrees
    pub gap: f64,
    /// Distance to the closest station
    pub clo: f64,
    /// Root mean square travel time residual
    pub rms: f64,
}

impl RecentEvent {
    /// Form values for this event.
    pub fn to_form_data(&self) -> FormData {
        FormData {
            latitude: self.latitude.to_string(),
            longitude: self.longitude.to_string(),
            depth: format!("{:.1}", self.depth),
            nst: self.nst.to_string(),
            gap: format!("{:.1}", self.gap),
            clo: format!("{:.2}", self.clo),
            rms: format!("{:.2}", self.rms),
        }
    }
}
