// ---------------------------------------------------------------------------
// Feature Vocabulary — token-to-slot assignment and one-hot encoding
// ---------------------------------------------------------------------------
//
// Derives, once, the ordered sets of category, environment, and level
// tokens observed across the catalog and assigns each a fixed slot in a
// shared coordinate space. Tokens are sorted before indexing, so two
// builds over the same catalog always produce identical slot assignments
// regardless of catalog iteration order.
//
// Slot layout: [categories | environments | levels].
// ---------------------------------------------------------------------------

use std::collections::{BTreeSet, HashMap};

use crate::types::{Intensity, Venue};

#[derive(Debug, Clone)]
pub struct FeatureVocabulary {
	category_slots: HashMap<String, usize>,
	environment_slots: HashMap<String, usize>,
	level_slots: HashMap<u8, usize>,
	dimension: usize,
}

impl FeatureVocabulary {
	/// Build the vocabulary from the catalog. Empty tokens are skipped.
	pub fn build(venues: &[Venue]) -> Self {
		let mut categories: BTreeSet<&str> = BTreeSet::new();
		let mut environments: BTreeSet<&str> = BTreeSet::new();
		let mut levels: BTreeSet<u8> = BTreeSet::new();

		for venue in venues {
			if !venue.category.is_empty() {
				categories.insert(venue.category.as_str());
			}
			if !venue.environment.is_empty() {
				environments.insert(venue.environment.as_str());
			}
			for &lvl in &venue.levels {
				levels.insert(lvl);
			}
		}

		let category_slots: HashMap<String, usize> = categories
			.iter()
			.enumerate()
			.map(|(i, t)| (t.to_string(), i))
			.collect();
		let env_offset = category_slots.len();
		let environment_slots: HashMap<String, usize> = environments
			.iter()
			.enumerate()
			.map(|(i, t)| (t.to_string(), env_offset + i))
			.collect();
		let level_offset = env_offset + environment_slots.len();
		let level_slots: HashMap<u8, usize> = levels
			.iter()
			.enumerate()
			.map(|(i, &lvl)| (lvl, level_offset + i))
			.collect();

		let dimension = level_offset + level_slots.len();
		Self {
			category_slots,
			environment_slots,
			level_slots,
			dimension,
		}
	}

	/// Total number of slots across all three regions.
	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn category_slot(&self, token: &str) -> Option<usize> {
		self.category_slots.get(token).copied()
	}

	pub fn environment_slot(&self, token: &str) -> Option<usize> {
		self.environment_slots.get(token).copied()
	}

	pub fn level_slot(&self, level: u8) -> Option<usize> {
		self.level_slots.get(&level).copied()
	}

	/// One-hot encode a venue's (category, environment, levels).
	/// Tokens unknown to the vocabulary are silently ignored.
	pub fn encode_venue(&self, venue: &Venue) -> Vec<f32> {
		let mut vec = vec![0.0f32; self.dimension];

		if let Some(slot) = self.category_slot(&venue.category) {
			vec[slot] = 1.0;
		}
		if let Some(slot) = self.environment_slot(&venue.environment) {
			vec[slot] = 1.0;
		}
		for &lvl in &venue.levels {
			if let Some(slot) = self.level_slot(lvl) {
				vec[slot] = 1.0;
			}
		}

		vec
	}

	/// Encode a user's declared preferences into the same coordinate space.
	/// Absent or unknown values leave their region all-zero.
	pub fn encode_query(
		&self,
		categories: &[String],
		environment: Option<&str>,
		intensity: Option<Intensity>,
	) -> Vec<f32> {
		let mut vec = vec![0.0f32; self.dimension];

		for category in categories {
			if let Some(slot) = self.category_slot(category) {
				vec[slot] = 1.0;
			}
		}
		if let Some(env) = environment {
			if let Some(slot) = self.environment_slot(env) {
				vec[slot] = 1.0;
			}
		}
		if let Some(intensity) = intensity {
			for &lvl in intensity.levels() {
				if let Some(slot) = self.level_slot(lvl) {
					vec[slot] = 1.0;
				}
			}
		}

		vec
	}
}
