//! Proximity and recency filters over a [`StrikeSnapshot`].
//!
//! Both filters return fresh [`NearbyStrike`] copies; the snapshot itself is
//! never modified, so a cached snapshot can be shared between callers.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::geo::{distance, Unit};
use crate::strike::{NearbyStrike, StrikeSnapshot};
use crate::CoreError;

/// Returns the strike closest to (`latitude`, `longitude`), with its distance
/// in kilometres. Ties go to the first strike in snapshot order.
///
/// # Errors
///
/// Returns [`CoreError::EmptySnapshot`] if the snapshot holds no strikes.
pub fn nearest(
    snapshot: &StrikeSnapshot,
    latitude: f64,
    longitude: f64,
) -> Result<NearbyStrike, CoreError> {
    let mut best = None;
    for strike in snapshot {
        let d = distance(latitude, longitude, strike.latitude, strike.longitude, Unit::Metric);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((strike, d));
        }
    }

    best.map(|(strike, distance)| NearbyStrike {
        strike: strike.clone(),
        distance,
    })
    .ok_or(CoreError::EmptySnapshot)
}

/// Returns every strike within `radius` (in `unit`) of the given point and,
/// when `window` is set, observed no longer than `window` before `now`.
#[must_use]
pub fn within_radius(
    snapshot: &StrikeSnapshot,
    latitude: f64,
    longitude: f64,
    radius: f64,
    unit: Unit,
    window: Option<Duration>,
    now: DateTime<Utc>,
) -> BTreeMap<String, NearbyStrike> {
    let window_secs = window.map(|w| w.as_secs_f64());

    snapshot
        .iter()
        .filter(|strike| window_secs.is_none_or(|w| strike.age_secs(now) <= w))
        .filter_map(|strike| {
            let d = distance(latitude, longitude, strike.latitude, strike.longitude, unit);
            (d <= radius).then(|| {
                (
                    strike.id.clone(),
                    NearbyStrike {
                        strike: strike.clone(),
                        distance: d,
                    },
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::strike::Strike;

    const LAT: f64 = 56.162_153_8;
    const LON: f64 = 92.233_356_1;

    fn strike(id: &str, latitude: f64, longitude: f64, observed_at: f64) -> Strike {
        Strike {
            id: id.to_owned(),
            latitude,
            longitude,
            observed_at,
        }
    }

    fn fixture(now: f64) -> StrikeSnapshot {
        [
            strike("1252081", 19.64, -82.93, 1_561_903_959.4),
            strike("1830720", 37.0, -67.7, 1_561_903_959.5),
            strike("4996442", 37.59, -66.58, 1_561_903_959.0),
            strike("5743673", 56.13, 92.73, 1_561_903_959.4),
            strike("9841561", 36.99, -67.72, 1_561_903_959.5),
            strike("999999", 56.13, 92.73, now),
        ]
        .into_iter()
        .collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn within_metric_radius_attaches_distance() {
        let hits = within_radius(&fixture(1.7e9), LAT, LON, 50.0, Unit::Metric, None, now());

        let ids: Vec<&str> = hits.keys().map(String::as_str).collect();
        assert_eq!(ids, ["5743673", "999999"]);
        for hit in hits.values() {
            assert!((hit.distance - 30.971_194_229_766_567).abs() < 1e-9);
        }
    }

    #[test]
    fn within_imperial_radius_matches_same_strikes() {
        let hits = within_radius(&fixture(1.7e9), LAT, LON, 80.0, Unit::Imperial, None, now());

        assert_eq!(hits.len(), 2);
        let first = hits.values().next().unwrap();
        assert!((first.distance - 19.244_822_432_396_78).abs() < 1e-9);
    }

    #[test]
    fn window_drops_old_strikes() {
        let hits = within_radius(
            &fixture(1.7e9 - 30.0),
            LAT,
            LON,
            50.0,
            Unit::Metric,
            Some(Duration::from_secs(600)),
            now(),
        );

        assert_eq!(hits.len(), 1);
        assert!(hits.contains_key("999999"));
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let snapshot: StrikeSnapshot = [strike("a", LAT, LON, 1.7e9 - 60.0)].into_iter().collect();
        let hits = within_radius(
            &snapshot,
            LAT,
            LON,
            1.0,
            Unit::Metric,
            Some(Duration::from_secs(60)),
            now(),
        );
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let snapshot: StrikeSnapshot = [strike("a", LAT, LON, 0.0)].into_iter().collect();
        let hits = within_radius(&snapshot, LAT, LON, 0.0, Unit::Metric, None, now());
        assert_eq!(hits["a"].distance, 0.0);
    }

    #[test]
    fn within_radius_leaves_snapshot_untouched() {
        let snapshot = fixture(1.7e9);
        let before = snapshot.clone();
        let _ = within_radius(&snapshot, LAT, LON, 50.0, Unit::Metric, None, now());
        assert_eq!(snapshot, before);
    }

    #[test]
    fn nearest_picks_minimum_distance() {
        let hit = nearest(&fixture(1.7e9), LAT, LON).expect("non-empty snapshot");
        // Two strikes share the minimum; the lower id wins.
        assert_eq!(hit.strike.id, "5743673");
        assert!((hit.distance - 30.971_194_229_766_567).abs() < 1e-9);
    }

    #[test]
    fn nearest_on_empty_snapshot_fails() {
        let result = nearest(&StrikeSnapshot::default(), LAT, LON);
        assert!(matches!(result, Err(CoreError::EmptySnapshot)));
    }
}
