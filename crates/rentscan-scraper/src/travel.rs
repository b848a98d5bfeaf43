//! Commute-time enrichment boundary.
//!
//! A [`TravelTimeSource`] answers "how long from each listing to a fixed
//! point". No concrete provider lives in this crate; callers plug in their
//! own API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::projection::ProjectedRecord;

/// A listing position to route from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Route result for one [`Destination`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTime {
    pub id: String,
    pub travel_time_secs: u64,
    pub distance_m: u64,
}

#[async_trait]
pub trait TravelTimeSource: Send + Sync {
    /// Routes every destination. Unreachable destinations are omitted from
    /// the result.
    async fn travel_times(&self, destinations: &[Destination]) -> anyhow::Result<Vec<TravelTime>>;
}

/// Builds destinations from records with `id`, `latitude` and `longitude`
/// fields. Records missing any of them, or with non-numeric coordinates, are
/// skipped. Numeric ids are rendered as strings.
#[must_use]
pub fn destinations(records: &[ProjectedRecord]) -> Vec<Destination> {
    records
        .iter()
        .filter_map(|record| {
            let id = match record.get("id")? {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some(Destination {
                id,
                latitude: record.get("latitude")?.as_f64()?,
                longitude: record.get("longitude")?.as_f64()?,
            })
        })
        .collect()
}
