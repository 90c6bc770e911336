// ---------------------------------------------------------------------------
// Collaborative Engine — neighborhood user-based rating prediction
// ---------------------------------------------------------------------------
//
// Builds a user–item matrix from stored ratings, computes user–user
// similarity over co-rated items with overlap shrinkage, and predicts
// unseen ratings via a mean-centered, similarity-weighted average over the
// top-k positive neighbors. Missing cells are unknown, never zero. When no
// eligible neighbor exists the prediction is None; nothing is fabricated.
// ---------------------------------------------------------------------------

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::types::Rating;

/// Shrinkage constant: similarity from `n` co-ratings is discounted by
/// `n / (n + shrink)`.
pub const DEFAULT_SHRINK: f64 = 10.0;

/// Neighborhood size consulted per prediction.
pub const DEFAULT_NEIGHBORHOOD: usize = 20;

// ---------------------------------------------------------------------------
// User–item matrix
// ---------------------------------------------------------------------------

/// Sparse rating matrix with dense index maps. Rows are users, columns are
/// items; `None` cells are unknown ratings.
#[derive(Debug)]
pub struct UserItemMatrix {
	users: Vec<String>,
	items: Vec<String>,
	user_slots: HashMap<String, usize>,
	item_slots: HashMap<String, usize>,
	cells: Vec<Vec<Option<f64>>>,
}

impl UserItemMatrix {
	/// Build from rating triples. Users and items are indexed in sorted
	/// order so the layout is deterministic. A later duplicate for the
	/// same (user, item) pair overwrites the earlier cell, matching the
	/// store's upsert semantics.
	pub fn from_ratings(ratings: &[Rating]) -> Self {
		let users: Vec<String> = ratings
			.iter()
			.map(|r| r.user_id.clone())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect();
		let items: Vec<String> = ratings
			.iter()
			.map(|r| r.venue_name.clone())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect();

		let user_slots: HashMap<String, usize> = users
			.iter()
			.enumerate()
			.map(|(i, u)| (u.clone(), i))
			.collect();
		let item_slots: HashMap<String, usize> = items
			.iter()
			.enumerate()
			.map(|(i, it)| (it.clone(), i))
			.collect();

		let mut cells = vec![vec![None; items.len()]; users.len()];
		for rating in ratings {
			let row = user_slots[&rating.user_id];
			let col = item_slots[&rating.venue_name];
			cells[row][col] = Some(rating.score);
		}

		Self {
			users,
			items,
			user_slots,
			item_slots,
			cells,
		}
	}

	pub fn user_count(&self) -> usize {
		self.users.len()
	}

	pub fn item_count(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.users.is_empty() || self.items.is_empty()
	}

	pub fn user_slot(&self, user_id: &str) -> Option<usize> {
		self.user_slots.get(user_id).copied()
	}

	pub fn item_slot(&self, item: &str) -> Option<usize> {
		self.item_slots.get(item).copied()
	}

	pub fn rating(&self, user: usize, item: usize) -> Option<f64> {
		self.cells[user][item]
	}

	fn row(&self, user: usize) -> &[Option<f64>] {
		&self.cells[user]
	}

	/// Mean of a user's known ratings; None for a user with no ratings.
	pub fn user_mean(&self, user: usize) -> Option<f64> {
		let known: Vec<f64> = self.cells[user].iter().flatten().copied().collect();
		if known.is_empty() {
			return None;
		}
		Some(known.iter().sum::<f64>() / known.len() as f64)
	}
}

// ---------------------------------------------------------------------------
// User similarity
// ---------------------------------------------------------------------------

/// Cosine over the co-rated cells of two rows, with the overlap size.
/// Returns (0.0, 0) when the rows share no rated item.
fn overlap_cosine(a: &[Option<f64>], b: &[Option<f64>]) -> (f64, usize) {
	let mut dot = 0.0;
	let mut norm_a = 0.0;
	let mut norm_b = 0.0;
	let mut overlap = 0usize;

	for (x, y) in a.iter().zip(b.iter()) {
		if let (Some(x), Some(y)) = (x, y) {
			dot += x * y;
			norm_a += x * x;
			norm_b += y * y;
			overlap += 1;
		}
	}

	if overlap == 0 {
		return (0.0, 0);
	}
	let denom = (norm_a * norm_b).sqrt();
	if denom == 0.0 {
		return (0.0, overlap);
	}
	(dot / denom, overlap)
}

/// Full user–user similarity matrix: symmetric, zero diagonal, entries in
/// [-1, 1]. Similarity from `n` co-rated items is shrunk by `n / (n + shrink)`
/// to control variance on sparse overlaps.
pub fn user_similarity(matrix: &UserItemMatrix, shrink: f64) -> Vec<Vec<f64>> {
	let n = matrix.user_count();
	let mut sims = vec![vec![0.0; n]; n];

	for i in 0..n {
		for j in (i + 1)..n {
			let (cos, overlap) = overlap_cosine(matrix.row(i), matrix.row(j));
			let s = if overlap == 0 {
				0.0
			} else {
				cos * (overlap as f64 / (overlap as f64 + shrink))
			};
			sims[i][j] = s;
			sims[j][i] = s;
		}
	}

	sims
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

/// Predict `user`'s rating of `item` from the top-`k` positive-similarity
/// neighbors who rated it. Each neighbor's rating is centered on their own
/// mean before the similarity-weighted average, and the target user's mean
/// is added back. None when no eligible neighbor exists or all weights are
/// zero.
pub fn predict(
	matrix: &UserItemMatrix,
	sims: &[Vec<f64>],
	user: usize,
	item: usize,
	k: usize,
) -> Option<f64> {
	let mut neighbors: Vec<(usize, f64)> = (0..matrix.user_count())
		.filter(|&u| u != user && matrix.rating(u, item).is_some())
		.map(|u| (u, sims[user][u]))
		.filter(|&(_, s)| s > 0.0)
		.collect();
	neighbors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
	neighbors.truncate(k);

	if neighbors.is_empty() {
		return None;
	}

	let mut numerator = 0.0;
	let mut denominator = 0.0;
	for (neighbor, weight) in neighbors {
		let rating = matrix.rating(neighbor, item)?;
		let mean = matrix.user_mean(neighbor)?;
		numerator += weight * (rating - mean);
		denominator += weight.abs();
	}
	if denominator == 0.0 {
		return None;
	}

	let user_mean = matrix.user_mean(user)?;
	Some(user_mean + numerator / denominator)
}
