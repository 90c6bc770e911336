// ---------------------------------------------------------------------------
// Geo Ranker — great-circle distance and the final ordering policy
// ---------------------------------------------------------------------------
//
// With a query location the primary sort key is distance ascending and the
// tie-break is score descending; venues without a computable distance sort
// last via a large sentinel rather than being excluded. Without a location
// the sort is purely score descending. After sorting, zero-or-negative
// scores are dropped unless that would empty the result (fail-open: a
// request that survived the hard filters never returns nothing).
// ---------------------------------------------------------------------------

use std::cmp::Ordering;

use crate::types::RankedVenue;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Sort key for venues lacking a computable distance.
const MISSING_DISTANCE_KM: f64 = 1e9;

/// Default result truncation.
pub const DEFAULT_TOP_K: usize = 15;

/// Great-circle distance in km between two (lat, lon) pairs, haversine.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
	let dlat = (lat2 - lat1).to_radians();
	let dlon = (lon2 - lon1).to_radians();

	let a = (dlat / 2.0).sin().powi(2)
		+ lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
	let c = 2.0 * a.sqrt().asin();
	EARTH_RADIUS_KM * c
}

fn sort_distance(venue: &RankedVenue) -> f64 {
	match venue.distance_km {
		Some(d) if d.is_finite() => d,
		_ => MISSING_DISTANCE_KM,
	}
}

fn by_score_desc(a: &RankedVenue, b: &RankedVenue) -> Ordering {
	b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Apply the final ordering policy and truncate to `top_k`.
pub fn rank(mut candidates: Vec<RankedVenue>, has_location: bool, top_k: usize) -> Vec<RankedVenue> {
	if has_location {
		candidates.sort_by(|a, b| {
			sort_distance(a)
				.partial_cmp(&sort_distance(b))
				.unwrap_or(Ordering::Equal)
				.then_with(|| by_score_desc(a, b))
		});
	} else {
		candidates.sort_by(by_score_desc);
	}

	let positive: Vec<RankedVenue> = candidates
		.iter()
		.filter(|c| c.score > 0.0)
		.cloned()
		.collect();

	let mut out = if positive.is_empty() { candidates } else { positive };
	out.truncate(top_k);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ranked(name: &str, score: f64, distance_km: Option<f64>) -> RankedVenue {
		RankedVenue {
			name: name.to_string(),
			score,
			distance_km,
		}
	}

	fn names(venues: &[RankedVenue]) -> Vec<&str> {
		venues.iter().map(|v| v.name.as_str()).collect()
	}

	#[test]
	fn haversine_zero_for_same_point() {
		assert!(haversine_km(45.0, -73.0, 45.0, -73.0).abs() < 1e-9);
	}

	#[test]
	fn haversine_known_distance() {
		// Montreal to Quebec City, roughly 233 km.
		let d = haversine_km(45.5019, -73.5674, 46.8131, -71.2075);
		assert!((d - 233.0).abs() < 5.0);
	}

	#[test]
	fn haversine_is_symmetric() {
		let a = haversine_km(45.5, -73.6, 46.8, -71.2);
		let b = haversine_km(46.8, -71.2, 45.5, -73.6);
		assert!((a - b).abs() < 1e-9);
	}

	#[test]
	fn located_query_sorts_by_distance_then_score() {
		let out = rank(
			vec![
				ranked("far", 0.9, Some(12.0)),
				ranked("near-weak", 0.2, Some(1.0)),
				ranked("near-strong", 0.8, Some(1.0)),
			],
			true,
			15,
		);
		assert_eq!(names(&out), vec!["near-strong", "near-weak", "far"]);
	}

	#[test]
	fn missing_distance_sorts_last() {
		let out = rank(
			vec![
				ranked("nowhere", 0.9, None),
				ranked("close", 0.1, Some(2.0)),
			],
			true,
			15,
		);
		assert_eq!(names(&out), vec!["close", "nowhere"]);
	}

	#[test]
	fn unlocated_query_sorts_by_score() {
		let out = rank(
			vec![
				ranked("b", 0.3, None),
				ranked("a", 0.9, None),
				ranked("c", 0.6, None),
			],
			false,
			15,
		);
		assert_eq!(names(&out), vec!["a", "c", "b"]);
	}

	#[test]
	fn zero_scores_dropped_when_others_survive() {
		let out = rank(
			vec![ranked("hit", 0.5, None), ranked("miss", 0.0, None)],
			false,
			15,
		);
		assert_eq!(names(&out), vec!["hit"]);
	}

	#[test]
	fn all_zero_scores_fail_open() {
		let out = rank(
			vec![
				ranked("a", 0.0, Some(3.0)),
				ranked("b", 0.0, Some(1.0)),
			],
			true,
			15,
		);
		// Nothing scored, so the full sorted list comes back.
		assert_eq!(names(&out), vec!["b", "a"]);
	}

	#[test]
	fn truncates_to_top_k() {
		let candidates: Vec<RankedVenue> = (0..30)
			.map(|i| ranked(&format!("v{i}"), 1.0 + i as f64, None))
			.collect();
		let out = rank(candidates, false, 15);
		assert_eq!(out.len(), 15);
		assert_eq!(out[0].name, "v29");
	}

	#[test]
	fn empty_input_stays_empty() {
		assert!(rank(Vec::new(), true, 15).is_empty());
	}
}
