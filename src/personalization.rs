// ---------------------------------------------------------------------------
// Personalization Booster — rating-weighted similarity to liked venues
// ---------------------------------------------------------------------------
//
// Adjusts a candidate's content score using the venues the user has rated
// before. Each stored rating is centered around the neutral point 3.0 on
// the 1–5 scale, so a 5 contributes +2 x similarity and a 1 contributes
// -2 x similarity. Pure functions, no side effects.
// ---------------------------------------------------------------------------

use std::collections::HashMap;

use crate::cosine::cosine_similarity;

/// Ratings at or above this count as "liked" for personalization.
pub const LIKED_THRESHOLD: f64 = 4.0;

/// Neutral point of the 1–5 rating scale.
pub const NEUTRAL_RATING: f64 = 3.0;

/// Extract the liked subset of a user's ratings, in deterministic
/// (name-sorted) order. An empty map yields an empty liked set.
pub fn liked_set(ratings: &HashMap<String, f64>) -> Vec<(String, f64)> {
	let mut liked: Vec<(String, f64)> = ratings
		.iter()
		.filter(|(_, &score)| score >= LIKED_THRESHOLD)
		.map(|(name, &score)| (name.clone(), score))
		.collect();
	liked.sort_by(|a, b| a.0.cmp(&b.0));
	liked
}

/// Sum of `(rating - 3.0) x cos(candidate, liked)` over the liked venues.
/// `liked` pairs a liked venue's feature vector with its stored rating.
pub fn rating_boost(candidate: &[f32], liked: &[(&[f32], f64)]) -> f64 {
	liked
		.iter()
		.map(|(vec, rating)| (rating - NEUTRAL_RATING) * cosine_similarity(candidate, vec))
		.sum()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn liked_set_applies_threshold() {
		let mut ratings = HashMap::new();
		ratings.insert("A".to_string(), 5.0);
		ratings.insert("B".to_string(), 4.0);
		ratings.insert("C".to_string(), 3.9);
		ratings.insert("D".to_string(), 1.0);
		let liked = liked_set(&ratings);
		assert_eq!(
			liked,
			vec![("A".to_string(), 5.0), ("B".to_string(), 4.0)]
		);
	}

	#[test]
	fn liked_set_empty_ratings() {
		assert!(liked_set(&HashMap::new()).is_empty());
	}

	#[test]
	fn boost_is_zero_without_liked_venues() {
		let candidate = vec![1.0f32, 0.0, 1.0];
		assert_eq!(rating_boost(&candidate, &[]), 0.0);
	}

	#[test]
	fn boost_positive_for_similar_liked_venue() {
		let candidate = vec![1.0f32, 1.0, 0.0];
		let liked_vec = vec![1.0f32, 1.0, 0.0];
		let boost = rating_boost(&candidate, &[(&liked_vec, 5.0)]);
		// (5 - 3) x 1.0
		assert!((boost - 2.0).abs() < 1e-10);
	}

	#[test]
	fn boost_negative_for_similar_disliked_venue() {
		let candidate = vec![1.0f32, 1.0, 0.0];
		let disliked = vec![1.0f32, 1.0, 0.0];
		let boost = rating_boost(&candidate, &[(&disliked, 1.0)]);
		assert!((boost + 2.0).abs() < 1e-10);
	}

	#[test]
	fn boost_scales_with_feature_overlap() {
		let candidate = vec![1.0f32, 0.0, 1.0, 0.0];
		let close = vec![1.0f32, 0.0, 1.0, 0.0];
		let far = vec![0.0f32, 1.0, 0.0, 1.0];
		let strong = rating_boost(&candidate, &[(&close, 5.0)]);
		let weak = rating_boost(&candidate, &[(&far, 5.0)]);
		assert!(strong > weak);
		assert_eq!(weak, 0.0);
	}
}
