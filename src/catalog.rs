// ---------------------------------------------------------------------------
// VenueCatalog — immutable ranking context built once at startup
// ---------------------------------------------------------------------------
//
// Owns the venue list, the feature vocabulary derived from it, and the
// per-venue feature vectors, all computed at construction and read-only
// afterwards. Safe to share across concurrent ranking calls without
// locking: no writer exists post-init.
// ---------------------------------------------------------------------------

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::EngineError;
use crate::types::Venue;
use crate::vocabulary::FeatureVocabulary;

#[derive(Debug)]
pub struct VenueCatalog {
	venues: Vec<Venue>,
	vocabulary: FeatureVocabulary,
	vectors: HashMap<String, Vec<f32>>,
}

impl VenueCatalog {
	/// Build the context from loaded venues. Names must be unique; the
	/// vector cache is keyed by them.
	pub fn new(venues: Vec<Venue>) -> Result<Self, EngineError> {
		if venues.is_empty() {
			return Err(EngineError::EmptyCatalog);
		}

		let mut seen: HashSet<&str> = HashSet::new();
		for venue in &venues {
			if !seen.insert(venue.name.as_str()) {
				return Err(EngineError::DuplicateVenue(venue.name.clone()));
			}
		}

		let vocabulary = FeatureVocabulary::build(&venues);
		let vectors: HashMap<String, Vec<f32>> = venues
			.iter()
			.map(|v| (v.name.clone(), vocabulary.encode_venue(v)))
			.collect();

		Ok(Self {
			venues,
			vocabulary,
			vectors,
		})
	}

	/// Parse a JSON array of venues in the catalog feed format.
	pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
		let venues: Vec<Venue> = serde_json::from_str(raw)
			.map_err(|e| EngineError::MalformedCatalog(e.to_string()))?;
		Self::new(venues)
	}

	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
		let raw = fs::read_to_string(path)?;
		Self::from_json_str(&raw)
	}

	pub fn venues(&self) -> &[Venue] {
		&self.venues
	}

	pub fn len(&self) -> usize {
		self.venues.len()
	}

	pub fn is_empty(&self) -> bool {
		self.venues.is_empty()
	}

	pub fn vocabulary(&self) -> &FeatureVocabulary {
		&self.vocabulary
	}

	/// The cached feature vector for a venue name, if the name is known.
	pub fn vector(&self, name: &str) -> Option<&[f32]> {
		self.vectors.get(name).map(|v| v.as_slice())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const FEED: &str = r#"[
		{
			"name": "Ring Boxing Club",
			"type": "Boxing",
			"level": [1, 2, 3],
			"env": "Indoor",
			"latitude": 45.52,
			"longitude": -73.58
		},
		{
			"name": "Parc La Fontaine",
			"type": "Parks",
			"level": [],
			"env": "Outdoor",
			"latitude": 45.527,
			"longitude": -73.57
		}
	]"#;

	#[test]
	fn builds_vocabulary_and_vector_cache_once() {
		let catalog = VenueCatalog::from_json_str(FEED).unwrap();
		assert_eq!(catalog.len(), 2);
		// 2 categories + 2 environments + 3 levels
		assert_eq!(catalog.vocabulary().dimension(), 7);
		for venue in catalog.venues() {
			let vec = catalog.vector(&venue.name).unwrap();
			assert_eq!(vec.len(), catalog.vocabulary().dimension());
		}
	}

	#[test]
	fn unknown_name_has_no_vector() {
		let catalog = VenueCatalog::from_json_str(FEED).unwrap();
		assert!(catalog.vector("Nowhere Gym").is_none());
	}

	#[test]
	fn rejects_empty_catalog() {
		assert!(matches!(
			VenueCatalog::from_json_str("[]"),
			Err(EngineError::EmptyCatalog)
		));
	}

	#[test]
	fn rejects_duplicate_names() {
		let raw = r#"[
			{"name": "Twin", "type": "Boxing", "env": "Indoor"},
			{"name": "Twin", "type": "Parks", "env": "Outdoor"}
		]"#;
		match VenueCatalog::from_json_str(raw) {
			Err(EngineError::DuplicateVenue(name)) => assert_eq!(name, "Twin"),
			other => panic!("expected DuplicateVenue, got {other:?}"),
		}
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(matches!(
			VenueCatalog::from_json_str("{not a list}"),
			Err(EngineError::MalformedCatalog(_))
		));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(FEED.as_bytes()).unwrap();
		let catalog = VenueCatalog::from_json_file(file.path()).unwrap();
		assert_eq!(catalog.len(), 2);
	}

	#[test]
	fn missing_file_is_io_error() {
		assert!(matches!(
			VenueCatalog::from_json_file("/definitely/not/here.json"),
			Err(EngineError::Io(_))
		));
	}
}
