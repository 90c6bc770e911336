use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
	#[error("Empty catalog: at least one venue is required")]
	EmptyCatalog,
	#[error("Duplicate venue name: {0}")]
	DuplicateVenue(String),
	#[error("Malformed catalog: {0}")]
	MalformedCatalog(String),
	#[error("Rating out of range: {0} (expected 1.0..=5.0)")]
	RatingOutOfRange(f64),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl EngineError {
	pub fn code(&self) -> &str {
		match self {
			Self::EmptyCatalog => "RANK_EMPTY_CATALOG",
			Self::DuplicateVenue(_) => "RANK_DUPLICATE_VENUE",
			Self::MalformedCatalog(_) => "RANK_MALFORMED_CATALOG",
			Self::RatingOutOfRange(_) => "RANK_RATING_RANGE",
			Self::Io(_) => "RANK_IO",
		}
	}

	pub fn to_json_rpc_error(&self) -> serde_json::Value {
		serde_json::json!({
			"rankCode": self.code(),
			"message": self.to_string(),
		})
	}
}
