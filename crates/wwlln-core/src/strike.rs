//! Strike records and whole-feed snapshots.
//!
//! The feed is a JSON object keyed by strike id, each value carrying at least
//! `lat`, `long` and `unixTime`. Unknown fields are ignored.

use std::collections::btree_map;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One lightning detection as reported by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    /// Feed key; filled in from the enclosing object when decoding.
    #[serde(skip_deserializing)]
    pub id: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "long")]
    pub longitude: f64,
    /// Seconds since the Unix epoch, with sub-second precision.
    #[serde(rename = "unixTime")]
    pub observed_at: f64,
}

impl Strike {
    /// Seconds elapsed between the observation and `now`. Negative when the
    /// feed reports a timestamp ahead of the local clock.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn age_secs(&self, now: DateTime<Utc>) -> f64 {
        now.timestamp_millis() as f64 / 1000.0 - self.observed_at
    }
}

/// A strike paired with its distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStrike {
    #[serde(flatten)]
    pub strike: Strike,
    pub distance: f64,
}

/// One complete fetch of the feed, keyed by strike id.
///
/// Iteration follows id order, so filters that pick "the first" match are
/// deterministic for a given snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StrikeSnapshot {
    strikes: BTreeMap<String, Strike>,
}

impl StrikeSnapshot {
    /// Decodes a raw feed body.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if the body is not a JSON
    /// object of strike records.
    pub fn from_feed_json(body: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, Strike> = serde_json::from_str(body)?;
        let strikes = raw
            .into_iter()
            .map(|(id, mut strike)| {
                strike.id.clone_from(&id);
                (id, strike)
            })
            .collect();
        Ok(Self { strikes })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Strike> {
        self.strikes.get(id)
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Strike> {
        self.strikes.values()
    }
}

impl FromIterator<Strike> for StrikeSnapshot {
    fn from_iter<I: IntoIterator<Item = Strike>>(iter: I) -> Self {
        Self {
            strikes: iter.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StrikeSnapshot {
    type Item = &'a Strike;
    type IntoIter = btree_map::Values<'a, String, Strike>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
