// ---------------------------------------------------------------------------
// Rating store — per-user rating lookup with upsert semantics
// ---------------------------------------------------------------------------
//
// The ranking pipeline reads ratings through the `RatingSource` trait so
// the backing store stays an external collaborator. A missing user or an
// empty store degrades to an empty mapping; ranking proceeds content-only.
// ---------------------------------------------------------------------------

use std::collections::{BTreeMap, HashMap};

use crate::error::EngineError;
use crate::types::Rating;

pub trait RatingSource {
	/// All live ratings for one user, venue name → score. Unknown users
	/// yield an empty map, never an error.
	fn ratings_for(&self, user_id: &str) -> HashMap<String, f64>;

	/// Every live rating in the store, for the collaborative matrix.
	fn all_ratings(&self) -> Vec<Rating>;
}

/// In-memory store enforcing at most one live rating per (user, venue)
/// pair: later writes overwrite earlier ones.
#[derive(Debug, Default)]
pub struct MemoryRatingStore {
	by_user: BTreeMap<String, BTreeMap<String, f64>>,
}

impl MemoryRatingStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace a rating. Scores must sit on the 1–5 scale.
	pub fn upsert(&mut self, user_id: &str, venue_name: &str, score: f64) -> Result<(), EngineError> {
		if !(1.0..=5.0).contains(&score) {
			return Err(EngineError::RatingOutOfRange(score));
		}
		self.by_user
			.entry(user_id.to_string())
			.or_default()
			.insert(venue_name.to_string(), score);
		Ok(())
	}

	pub fn rating_count(&self) -> usize {
		self.by_user.values().map(|m| m.len()).sum()
	}
}

impl RatingSource for MemoryRatingStore {
	fn ratings_for(&self, user_id: &str) -> HashMap<String, f64> {
		self.by_user
			.get(user_id)
			.map(|m| m.iter().map(|(k, &v)| (k.clone(), v)).collect())
			.unwrap_or_default()
	}

	fn all_ratings(&self) -> Vec<Rating> {
		self.by_user
			.iter()
			.flat_map(|(user, venues)| {
				venues.iter().map(|(venue, &score)| Rating {
					user_id: user.clone(),
					venue_name: venue.clone(),
					score,
				})
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_user_yields_empty_map() {
		let store = MemoryRatingStore::new();
		assert!(store.ratings_for("ghost").is_empty());
	}

	#[test]
	fn upsert_replaces_earlier_rating() {
		let mut store = MemoryRatingStore::new();
		store.upsert("u1", "Ring", 2.0).unwrap();
		store.upsert("u1", "Ring", 5.0).unwrap();
		let ratings = store.ratings_for("u1");
		assert_eq!(ratings.len(), 1);
		assert_eq!(ratings["Ring"], 5.0);
		assert_eq!(store.rating_count(), 1);
	}

	#[test]
	fn upsert_rejects_out_of_range_scores() {
		let mut store = MemoryRatingStore::new();
		assert!(matches!(
			store.upsert("u1", "Ring", 0.5),
			Err(EngineError::RatingOutOfRange(_))
		));
		assert!(matches!(
			store.upsert("u1", "Ring", 5.5),
			Err(EngineError::RatingOutOfRange(_))
		));
		assert_eq!(store.rating_count(), 0);
	}

	#[test]
	fn all_ratings_flattens_every_pair() {
		let mut store = MemoryRatingStore::new();
		store.upsert("u1", "Ring", 4.0).unwrap();
		store.upsert("u1", "Bistro", 3.0).unwrap();
		store.upsert("u2", "Ring", 5.0).unwrap();
		let all = store.all_ratings();
		assert_eq!(all.len(), 3);
		assert!(all
			.iter()
			.any(|r| r.user_id == "u2" && r.venue_name == "Ring" && r.score == 5.0));
	}
}
