// ---------------------------------------------------------------------------
// Recommender — the end-to-end ranking pipeline
// ---------------------------------------------------------------------------
//
// Per request: encode the query, run the hard filters, drop venues the
// user already rated, score the survivors (content cosine + rating boost),
// predict collaborative ratings when an identity and a populated store
// exist, blend, then hand off to the geo ranker. Everything allocated
// here is request-local; the shared `VenueCatalog` is read-only.
// ---------------------------------------------------------------------------

use std::collections::HashMap;

use crate::catalog::VenueCatalog;
use crate::collaborative::{self, UserItemMatrix};
use crate::cosine::cosine_similarity;
use crate::filters::passes_filters;
use crate::geo::{self, haversine_km, DEFAULT_TOP_K};
use crate::hybrid;
use crate::personalization::{liked_set, rating_boost};
use crate::ratings::RatingSource;
use crate::types::{RankedVenue, Venue, VenueQuery};

/// Tunable ranking weights. The defaults match the deployed behavior.
#[derive(Debug, Clone)]
pub struct RankingOptions {
	/// Maximum number of returned venues.
	pub top_k: usize,
	/// Weight of the rating boost on the content score.
	pub personalization_weight: f64,
	/// Content share of the hybrid blend.
	pub blend_alpha: f64,
	/// Shrinkage constant for user similarity.
	pub shrink: f64,
	/// Neighborhood size for collaborative prediction.
	pub neighborhood: usize,
}

impl Default for RankingOptions {
	fn default() -> Self {
		Self {
			top_k: DEFAULT_TOP_K,
			personalization_weight: 0.1,
			blend_alpha: hybrid::DEFAULT_BLEND_ALPHA,
			shrink: collaborative::DEFAULT_SHRINK,
			neighborhood: collaborative::DEFAULT_NEIGHBORHOOD,
		}
	}
}

/// Rank the catalog for a query and return the ordered venue names.
pub fn recommend(
	catalog: &VenueCatalog,
	ratings: &dyn RatingSource,
	query: &VenueQuery,
	options: &RankingOptions,
) -> Vec<String> {
	rank_venues(catalog, ratings, query, options)
		.into_iter()
		.map(|v| v.name)
		.collect()
}

/// Rank the catalog for a query, keeping per-venue score and distance.
pub fn rank_venues(
	catalog: &VenueCatalog,
	ratings: &dyn RatingSource,
	query: &VenueQuery,
	options: &RankingOptions,
) -> Vec<RankedVenue> {
	let user_vec = catalog.vocabulary().encode_query(
		&query.categories,
		query.environment.as_deref(),
		query.parsed_intensity(),
	);

	let user_ratings: HashMap<String, f64> = query
		.user_id
		.as_deref()
		.map(|id| ratings.ratings_for(id))
		.unwrap_or_default();

	// Hard filters first; a venue already judged by this user is never
	// recommended back.
	let candidates: Vec<(&Venue, &[f32])> = catalog
		.venues()
		.iter()
		.filter(|v| passes_filters(v, query))
		.filter(|v| !user_ratings.contains_key(&v.name))
		.filter_map(|v| catalog.vector(&v.name).map(|vec| (v, vec)))
		.collect();

	if candidates.is_empty() {
		tracing::debug!("no candidate survived the hard filters");
		return Vec::new();
	}

	// Content axis: base cosine plus the liked-venue boost.
	let liked: Vec<(&[f32], f64)> = liked_set(&user_ratings)
		.into_iter()
		.filter_map(|(name, score)| catalog.vector(&name).map(|vec| (vec, score)))
		.collect();

	let content: Vec<f64> = candidates
		.iter()
		.map(|(_, vec)| {
			cosine_similarity(&user_vec, vec)
				+ options.personalization_weight * rating_boost(vec, &liked)
		})
		.collect();

	// Collaborative axis, when an identity and a populated store exist.
	let collab = collaborative_predictions(ratings, query.user_id.as_deref(), &candidates, options);

	let blended = hybrid::blend_scores(&content, &collab, options.blend_alpha);

	let location = query.location();
	let ranked: Vec<RankedVenue> = candidates
		.iter()
		.zip(blended)
		.map(|(&(venue, _), score)| RankedVenue {
			name: venue.name.clone(),
			score,
			distance_km: venue_distance(venue, location),
		})
		.collect();

	tracing::debug!(
		candidates = ranked.len(),
		located = location.is_some(),
		"ranking candidates"
	);
	geo::rank(ranked, location.is_some(), options.top_k)
}

fn venue_distance(venue: &Venue, location: Option<(f64, f64)>) -> Option<f64> {
	let (user_lat, user_lon) = location?;
	match (venue.latitude, venue.longitude) {
		(Some(lat), Some(lon)) => Some(haversine_km(user_lat, user_lon, lat, lon)),
		_ => None,
	}
}

fn collaborative_predictions(
	ratings: &dyn RatingSource,
	user_id: Option<&str>,
	candidates: &[(&Venue, &[f32])],
	options: &RankingOptions,
) -> Vec<Option<f64>> {
	let undefined = vec![None; candidates.len()];
	let Some(user) = user_id else {
		return undefined;
	};

	let all = ratings.all_ratings();
	if all.is_empty() {
		return undefined;
	}

	let matrix = UserItemMatrix::from_ratings(&all);
	let Some(user_slot) = matrix.user_slot(user) else {
		return undefined;
	};

	let sims = collaborative::user_similarity(&matrix, options.shrink);
	candidates
		.iter()
		.map(|(venue, _)| {
			matrix.item_slot(&venue.name).and_then(|item| {
				collaborative::predict(&matrix, &sims, user_slot, item, options.neighborhood)
			})
		})
		.collect()
}
